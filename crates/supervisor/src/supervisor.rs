//! Ties the manifest, PID/log paths, and process control together into
//! the operations the `hal-services` CLI exposes.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::SupervisorError;
use crate::logs;
use crate::manifest::{ServiceSpec, ServicesManifest};
use crate::process;
use crate::runtime_paths;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    Running { pid: i32, uptime: Duration },
    Stopped,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub name: String,
    pub on_path_or_absolute: bool,
    pub executable: bool,
    pub state: ServiceStateSummary,
    pub recent_errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStateSummary {
    Running,
    Stopped,
    Disabled,
}

pub struct Supervisor {
    runtime_dir: PathBuf,
    manifest: ServicesManifest,
}

impl Supervisor {
    pub fn new(runtime_dir: PathBuf, manifest: ServicesManifest) -> Self {
        Self { runtime_dir, manifest }
    }

    pub fn services(&self) -> &[ServiceSpec] {
        &self.manifest.services
    }

    fn service(&self, name: &str) -> Result<&ServiceSpec, SupervisorError> {
        self.manifest.find(name)
    }

    pub fn start(&self, name: &str) -> Result<u32, SupervisorError> {
        let service = self.service(name)?;
        if !service.enabled {
            return Err(SupervisorError::Disabled(name.to_string()));
        }
        let pid_path = runtime_paths::pid_path(&self.runtime_dir, name);
        if let Some(existing) = runtime_paths::read_pid(&pid_path) {
            if runtime_paths::is_process_running(existing) {
                return Err(SupervisorError::AlreadyRunning(name.to_string(), existing));
            }
        }
        let log_path = runtime_paths::log_path(&self.runtime_dir, name);
        process::spawn(service, &pid_path, &log_path)
    }

    pub async fn stop(&self, name: &str) -> Result<(), SupervisorError> {
        let _service = self.service(name)?;
        let pid_path = runtime_paths::pid_path(&self.runtime_dir, name);
        let pid = runtime_paths::read_pid(&pid_path).filter(|p| runtime_paths::is_process_running(*p)).ok_or_else(|| SupervisorError::NotRunning(name.to_string()))?;
        process::stop(pid, Duration::from_secs(1)).await?;
        let _ = std::fs::remove_file(&pid_path);
        Ok(())
    }

    pub async fn restart(&self, name: &str) -> Result<u32, SupervisorError> {
        if self.stop(name).await.is_err() {
            tracing::info!(service = %name, "restart: service was not running");
        }
        self.start(name)
    }

    pub fn status(&self, name: &str) -> Result<ServiceState, SupervisorError> {
        let service = self.service(name)?;
        if !service.enabled {
            return Ok(ServiceState::Disabled);
        }
        let pid_path = runtime_paths::pid_path(&self.runtime_dir, name);
        match runtime_paths::read_pid(&pid_path) {
            Some(pid) if runtime_paths::is_process_running(pid) => {
                let uptime = runtime_paths::uptime(&pid_path).unwrap_or_default();
                Ok(ServiceState::Running { pid, uptime })
            }
            _ => Ok(ServiceState::Stopped),
        }
    }

    pub fn status_all(&self) -> Vec<(String, Result<ServiceState, SupervisorError>)> {
        self.manifest.services.iter().map(|s| (s.name.clone(), self.status(&s.name))).collect()
    }

    pub fn logs(&self, name: &str, tail_count: usize) -> Result<Vec<String>, SupervisorError> {
        let _service = self.service(name)?;
        Ok(logs::tail(&runtime_paths::log_path(&self.runtime_dir, name), tail_count))
    }

    pub fn diagnose(&self, name: &str) -> Result<Diagnosis, SupervisorError> {
        let service = self.service(name)?;
        let state = match self.status(name)? {
            ServiceState::Running { .. } => ServiceStateSummary::Running,
            ServiceState::Stopped => ServiceStateSummary::Stopped,
            ServiceState::Disabled => ServiceStateSummary::Disabled,
        };
        let log_path = runtime_paths::log_path(&self.runtime_dir, name);
        Ok(Diagnosis {
            name: name.to_string(),
            on_path_or_absolute: process::command_resolves(&service.command),
            executable: process::command_is_executable(&service.command),
            state,
            recent_errors: logs::scan_for_errors(&log_path),
        })
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
