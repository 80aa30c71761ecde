//! PID file + exclusive lock, grounded on the teacher's startup lock
//! acquisition: open without truncating, lock, then truncate and write
//! the PID only once the lock is held.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::SchedulerError;

pub struct PidLock {
    path: PathBuf,
    file: std::fs::File,
}

impl PidLock {
    /// Acquires the lock at `path`, creating the file if needed. Returns
    /// `SchedulerError::AlreadyRunning` if another live process holds it.
    pub fn acquire(path: &Path) -> Result<Self, SchedulerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new().write(true).create(true).truncate(false).open(path)?;
        file.try_lock_exclusive().map_err(|_| SchedulerError::AlreadyRunning(path.to_path_buf()))?;

        let mut file = file;
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;

        Ok(Self { path: path.to_path_buf(), file })
    }
}

impl Drop for PidLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Reads the PID recorded at `path`, if any.
pub fn read_pid(path: &Path) -> Option<i32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Whether a process with `pid` is currently alive, via a signal-0 probe.
pub fn is_process_running(pid: i32) -> bool {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), None).is_ok()
}

#[cfg(test)]
#[path = "pidfile_tests.rs"]
mod tests;
