//! Invocation of the LLM CLI as an external process (spec.md §4.6).
//!
//! Modeled on the teacher's own external-process execution pattern
//! (`oj-shell`'s command runner): spawn, capture stdout, and turn a
//! non-zero exit plus stderr content into a descriptive error.

use crate::error::DispatchError;
use async_trait::async_trait;
use tokio::process::Command;

/// Abstraction over "invoke the LLM CLI with this expanded prompt and
/// return its stdout", so the scheduler can be tested without spawning a
/// real process.
#[async_trait]
pub trait LlmInvoker: Clone + Send + Sync + 'static {
    async fn invoke(&self, prompt: &str) -> Result<String, DispatchError>;
}

/// Invokes a configured LLM CLI binary, passing the expanded prompt on
/// stdin and capturing stdout.
#[derive(Clone, Debug)]
pub struct ProcessLlmInvoker {
    binary: String,
    args: Vec<String>,
}

impl ProcessLlmInvoker {
    pub fn new(binary: impl Into<String>, args: Vec<String>) -> Self {
        Self { binary: binary.into(), args }
    }
}

#[async_trait]
impl LlmInvoker for ProcessLlmInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, DispatchError> {
        use tokio::io::AsyncWriteExt;

        let mut child = Command::new(&self.binary)
            .args(&self.args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(DispatchError::LlmNonZero {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct FakeLlmInvoker {
        calls: Arc<Mutex<Vec<String>>>,
        response: Arc<Mutex<Result<String, String>>>,
    }

    impl FakeLlmInvoker {
        pub fn new() -> Self {
            Self { calls: Arc::new(Mutex::new(Vec::new())), response: Arc::new(Mutex::new(Ok("ok".to_string()))) }
        }

        pub fn set_response(&self, response: Result<String, String>) {
            *self.response.lock() = response;
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl LlmInvoker for FakeLlmInvoker {
        async fn invoke(&self, prompt: &str) -> Result<String, DispatchError> {
            self.calls.lock().push(prompt.to_string());
            match self.response.lock().clone() {
                Ok(s) => Ok(s),
                Err(e) => Err(DispatchError::LlmFailed(e)),
            }
        }
    }
}

#[cfg(test)]
#[path = "llm_tests.rs"]
mod tests;
