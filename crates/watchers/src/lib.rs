//! hal9000-watchers: the baseline/diff/classify/journal loop shared by
//! every watcher process (spec.md §4.4).

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bootstrap;
pub mod credentials;
pub mod error;
pub mod journal;
pub mod runtime_dir;
pub mod source;
pub mod state;
pub mod watch_loop;

pub use credentials::Credentials;
pub use error::WatcherError;
pub use journal::{JournalReader, JournalWriter};
pub use source::{FixtureSource, InMemorySource, Source, SourceItem};
pub use state::FloydState;
pub use watch_loop::{run_forever, run_tick, WatchConfig};
