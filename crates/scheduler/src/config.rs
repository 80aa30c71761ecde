//! Scheduler configuration, loaded from environment variables with
//! defaults derived from the shared runtime directory — same pattern as
//! the patrol daemon's own `PatrolConfig::load()`.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub pid_path: PathBuf,
    pub schedule_path: PathBuf,
    pub results_dir: PathBuf,
    pub tasks_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl SchedulerConfig {
    pub fn load() -> Self {
        let runtime = hal9000_watchers::runtime_dir::runtime_dir();
        Self {
            pid_path: env_path("HAL9000_SCHEDULER_PID_FILE", runtime.join("hal-scheduler.pid")),
            schedule_path: env_path("HAL9000_SCHEDULE_FILE", runtime.join("schedule.json")),
            results_dir: env_path("HAL9000_SCHEDULER_RESULTS_DIR", runtime.join("scheduler-results")),
            tasks_dir: env_path("HAL9000_TASKS_DIR", runtime.join("tasks")),
            log_dir: env_path("HAL9000_SCHEDULER_LOG_DIR", runtime.join("logs")),
        }
    }
}

fn env_path(var: &str, default: PathBuf) -> PathBuf {
    std::env::var(var).ok().map(PathBuf::from).unwrap_or(default)
}
