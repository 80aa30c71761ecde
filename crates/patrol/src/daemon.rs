//! The patrol daemon itself: one cycle of callback drain, health checks,
//! and cleanup, run on a timer. `Start`/`Stop` are idempotent-guarded
//! exactly as the teacher's own daemon lifecycle guards double-start
//! (`LifecycleError` family in `oj-daemon::lifecycle`), and `Stop` waits
//! for the in-flight cycle to finish via a done-channel.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hal9000_core::Clock;
use parking_lot::{Mutex, RwLock};
use tokio::sync::oneshot;

use crate::callback::{self, Callback, CallbackHandler};
use crate::cleaner::{self, Cleaner};
use crate::config::PatrolConfig;
use crate::error::PatrolError;
use crate::health::{self, HealthCheck, HealthStatus};

#[derive(Clone)]
pub struct Patrol<C: Clock> {
    config: Arc<PatrolConfig>,
    clock: C,
    queue: Arc<Mutex<VecDeque<Callback>>>,
    callback_handlers: Arc<RwLock<BTreeMap<String, Arc<dyn CallbackHandler>>>>,
    health_checks: Arc<RwLock<BTreeMap<String, Arc<dyn HealthCheck>>>>,
    cleaners: Arc<RwLock<BTreeMap<String, Arc<dyn Cleaner>>>>,
    last_health: Arc<RwLock<BTreeMap<String, HealthStatus>>>,
    running: Arc<AtomicBool>,
    shutdown: Arc<Mutex<Option<oneshot::Sender<()>>>>,
    done: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
}

impl<C: Clock> Patrol<C> {
    pub fn new(config: PatrolConfig, clock: C) -> Self {
        Self {
            config: Arc::new(config),
            clock,
            queue: Arc::new(Mutex::new(VecDeque::new())),
            callback_handlers: Arc::new(RwLock::new(BTreeMap::new())),
            health_checks: Arc::new(RwLock::new(BTreeMap::new())),
            cleaners: Arc::new(RwLock::new(BTreeMap::new())),
            last_health: Arc::new(RwLock::new(BTreeMap::new())),
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Mutex::new(None)),
            done: Arc::new(Mutex::new(None)),
        }
    }

    pub fn register_callback_handler(&self, source: impl Into<String>, handler: Arc<dyn CallbackHandler>) {
        self.callback_handlers.write().insert(source.into(), handler);
    }

    pub fn register_health_check(&self, check: Arc<dyn HealthCheck>) {
        self.health_checks.write().insert(check.name().to_string(), check);
    }

    pub fn register_cleaner(&self, cleaner: Arc<dyn Cleaner>) {
        self.cleaners.write().insert(cleaner.name().to_string(), cleaner);
    }

    /// Enqueue a callback for the next cycle, bypassing `callback_dir`.
    pub fn enqueue_callback(&self, callback: Callback) {
        self.queue.lock().push_back(callback);
    }

    pub fn last_health(&self) -> BTreeMap<String, HealthStatus> {
        self.last_health.read().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// `Start(ctx)`: idempotent-guarded, refuses a second start while
    /// already running.
    pub fn start(&self) -> Result<(), PatrolError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(PatrolError::AlreadyRunning);
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        *self.shutdown.lock() = Some(shutdown_tx);
        *self.done.lock() = Some(done_rx);

        let patrol = self.clone();
        tokio::spawn(async move {
            loop {
                patrol.run_cycle().await;
                if !patrol.running.load(Ordering::SeqCst) {
                    break;
                }
                tokio::select! {
                    _ = tokio::time::sleep(patrol.config.patrol_interval) => {}
                    _ = &mut shutdown_rx => break,
                }
            }
            let _ = done_tx.send(());
        });

        Ok(())
    }

    /// `Stop`: sets `running=false` and waits for the in-flight cycle to
    /// finish via the done-channel.
    pub async fn stop(&self) -> Result<(), PatrolError> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err(PatrolError::NotRunning);
        }
        if let Some(tx) = self.shutdown.lock().take() {
            let _ = tx.send(());
        }
        let done_rx = self.done.lock().take();
        if let Some(rx) = done_rx {
            let _ = rx.await;
        }
        Ok(())
    }

    /// One patrol cycle: callback drain, health checks, cleanup.
    pub async fn run_cycle(&self) {
        self.drain_callback_queue().await;
        if let Some(dir) = self.config.callback_dir.clone() {
            for callback in callback::drain_callback_dir(&dir) {
                self.queue.lock().push_back(callback);
            }
        }
        self.run_health_checks().await;
        self.run_cleaners().await;
    }

    async fn drain_callback_queue(&self) {
        let pending: Vec<Callback> = self.queue.lock().drain(..).collect();
        for cb in pending {
            let handler = self.callback_handlers.read().get(&cb.source).cloned();
            match handler {
                Some(handler) => {
                    if let Err(e) = handler.handle(&cb).await {
                        tracing::warn!(source = %cb.source, error = %e, "callback handler failed");
                    }
                }
                None => {
                    tracing::warn!(source = %cb.source, "no callback handler registered for source");
                }
            }
        }
    }

    async fn run_health_checks(&self) {
        let checks: Vec<(String, Arc<dyn HealthCheck>)> =
            self.health_checks.read().iter().map(|(name, check)| (name.clone(), Arc::clone(check))).collect();
        health::run_all(&checks, self.config.health_timeout, &self.last_health).await;
    }

    async fn run_cleaners(&self) {
        let cleaners: Vec<Arc<dyn Cleaner>> = self.cleaners.read().values().cloned().collect();
        let threshold = self.clock.now() - self.config.stale_threshold;
        cleaner::run_all(&cleaners, threshold).await;
    }
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
