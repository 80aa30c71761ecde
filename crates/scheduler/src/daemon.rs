//! Foreground run loop and detached re-exec for `hal-scheduler start`.

use std::path::PathBuf;

use hal9000_core::SystemClock;

use crate::config::SchedulerConfig;
use crate::engine::CronEngine;
use crate::error::SchedulerError;
use crate::notify::DesktopNotifyAdapter;
use crate::pidfile::PidLock;
use crate::schedule::Schedule;
use crate::task::discover_tasks;

/// Acquires the PID lock, builds the cron engine, and runs it until a
/// termination signal arrives. SIGHUP reloads the on-disk schedule.
pub async fn run_foreground(config: &SchedulerConfig) -> Result<(), SchedulerError> {
    let _pid_lock = PidLock::acquire(&config.pid_path)?;

    let schedule = Schedule::load(&config.schedule_path)?;
    let tasks = discover_tasks(&config.tasks_dir)?;
    tracing::info!(task_count = tasks.len(), entry_count = schedule.tasks.len(), "scheduler starting");

    let engine = std::sync::Arc::new(CronEngine::new(SystemClock, DesktopNotifyAdapter::new(), tasks, config.results_dir.clone(), &schedule));

    let mut sighup = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())?;
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let run_handle = {
        let engine = std::sync::Arc::clone(&engine);
        tokio::spawn(async move { engine.run_forever(shutdown_rx).await })
    };

    loop {
        tokio::select! {
            _ = sighup.recv() => {
                match Schedule::load(&config.schedule_path) {
                    Ok(fresh) => engine.reload(&fresh),
                    Err(e) => tracing::error!(error = %e, "failed to reload schedule on SIGHUP"),
                }
            }
            _ = sigterm.recv() => {
                tracing::info!("received SIGTERM, shutting down");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received interrupt, shutting down");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(());
    let _ = run_handle.await;
    Ok(())
}

/// Re-execs the current binary with `args`, detached into its own
/// process group so the parent CLI invocation can exit while the
/// scheduler keeps running. `unsafe_code` is forbidden workspace-wide, so
/// this uses the stable, safe `process_group` API rather than a
/// `pre_exec`-based `setsid()` — the child is detached from the parent's
/// process group, not granted a full POSIX session.
pub fn spawn_detached(args: &[String]) -> std::io::Result<u32> {
    let exe: PathBuf = std::env::current_exe()?;
    spawn_detached_command(&exe, args)
}

fn spawn_detached_command(program: &std::path::Path, args: &[String]) -> std::io::Result<u32> {
    use std::os::unix::process::CommandExt;

    let child = std::process::Command::new(program)
        .args(args)
        .process_group(0)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(child.id())
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
