use super::*;
use crate::manifest::ServiceSpec;
use tempfile::tempdir;

fn manifest_with(services: Vec<ServiceSpec>) -> ServicesManifest {
    ServicesManifest { services }
}

fn sleeper(name: &str, enabled: bool) -> ServiceSpec {
    ServiceSpec { name: name.to_string(), command: "/bin/sleep".to_string(), args: vec!["30".to_string()], enabled, description: None }
}

#[test]
fn status_of_an_unknown_service_errors() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), ServicesManifest::default());
    assert!(supervisor.status("ghost").is_err());
}

#[test]
fn disabled_service_reports_disabled_without_touching_pid_files() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", false)]));
    assert_eq!(supervisor.status("svc").unwrap(), ServiceState::Disabled);
}

#[test]
fn start_rejects_a_disabled_service() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", false)]));
    let err = supervisor.start("svc").unwrap_err();
    assert!(matches!(err, SupervisorError::Disabled(name) if name == "svc"));
}

#[test]
fn start_then_status_reports_running_with_a_pid() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", true)]));
    let pid = supervisor.start("svc").unwrap();

    match supervisor.status("svc").unwrap() {
        ServiceState::Running { pid: running_pid, .. } => assert_eq!(running_pid, pid as i32),
        other => panic!("expected Running, got {other:?}"),
    }
}

#[test]
fn starting_an_already_running_service_errors() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", true)]));
    supervisor.start("svc").unwrap();
    let err = supervisor.start("svc").unwrap_err();
    assert!(matches!(err, SupervisorError::AlreadyRunning(name, _) if name == "svc"));
}

#[tokio::test]
async fn stop_on_a_stopped_service_errors() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", true)]));
    let err = supervisor.stop("svc").await.unwrap_err();
    assert!(matches!(err, SupervisorError::NotRunning(name) if name == "svc"));
}

#[tokio::test]
async fn start_then_stop_reports_stopped() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", true)]));
    supervisor.start("svc").unwrap();
    supervisor.stop("svc").await.unwrap();
    assert_eq!(supervisor.status("svc").unwrap(), ServiceState::Stopped);
}

#[tokio::test]
async fn restart_starts_a_stopped_service() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", true)]));
    let pid = supervisor.restart("svc").await.unwrap();
    assert!(pid > 0);
    assert!(matches!(supervisor.status("svc").unwrap(), ServiceState::Running { .. }));
}

#[test]
fn diagnose_reports_command_resolution_and_recent_errors() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("svc", true)]));
    std::fs::write(dir.path().join("svc.log"), "starting\nerror: boom\n").unwrap();

    let diagnosis = supervisor.diagnose("svc").unwrap();
    assert!(diagnosis.on_path_or_absolute);
    assert!(diagnosis.executable);
    assert_eq!(diagnosis.state, ServiceStateSummary::Stopped);
    assert_eq!(diagnosis.recent_errors.len(), 1);
}

#[test]
fn status_all_reports_every_manifest_entry() {
    let dir = tempdir().unwrap();
    let supervisor = Supervisor::new(dir.path().to_path_buf(), manifest_with(vec![sleeper("a", true), sleeper("b", false)]));
    let statuses = supervisor.status_all();
    assert_eq!(statuses.len(), 2);
}
