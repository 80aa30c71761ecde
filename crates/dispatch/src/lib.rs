//! hal9000-dispatch: the action scheduler and dispatcher (spec.md §4.6,
//! §4.7) — matches bus events to registered actions, expands prompt
//! templates, and invokes the LLM CLI.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod journal_tail;
pub mod llm;
pub mod scheduler;

pub use config::DispatcherConfig;
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use handler::CustomHandler;
pub use journal_tail::JournalTail;
pub use llm::{LlmInvoker, ProcessLlmInvoker};
pub use scheduler::ActionScheduler;

#[cfg(any(test, feature = "test-support"))]
pub use llm::fake::FakeLlmInvoker;
