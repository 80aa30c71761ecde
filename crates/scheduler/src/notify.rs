//! Desktop notification adapter, reused from the teacher's adapters
//! crate: the cron engine fires a notification after each task run
//! whose schedule entry has `notify: true`.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// On macOS, `notify-rust` routes through `mac-notification-sys`, which
/// runs an AppleScript bundle-identifier lookup on first use. In a daemon
/// without Automation permissions that lookup blocks forever, so the
/// bundle identifier is pre-set at construction time to skip it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            tracing::info!(%title, %message, "sending desktop notification");
            match notify_rust::Notification::new().summary(&title).body(&message).show() {
                Ok(_) => tracing::info!(%title, "desktop notification sent"),
                Err(e) => tracing::warn!(%title, error = %e, "desktop notification failed"),
            }
        });
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{NotifyAdapter, NotifyError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    pub struct NotifyCall {
        pub title: String,
        pub message: String,
    }

    struct FakeNotifyState {
        calls: Vec<NotifyCall>,
    }

    #[derive(Clone)]
    pub struct FakeNotifyAdapter {
        inner: Arc<Mutex<FakeNotifyState>>,
    }

    impl Default for FakeNotifyAdapter {
        fn default() -> Self {
            Self { inner: Arc::new(Mutex::new(FakeNotifyState { calls: Vec::new() })) }
        }
    }

    impl FakeNotifyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<NotifyCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl NotifyAdapter for FakeNotifyAdapter {
        async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
            self.inner.lock().calls.push(NotifyCall { title: title.to_string(), message: message.to_string() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
