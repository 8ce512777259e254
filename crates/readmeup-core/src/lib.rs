//! # readmeup core library
//!
//! Core logic for `readmeup`, a scheduled GitHub profile README updater.
//! It follows a CLI-first philosophy: every operation is available through
//! the `readmeup` binary, which stays a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Schedule window**: a pure, timezone-aware evaluator deciding
//!   whether a run should proceed now and when the next slot is
//! - **Storage**: JSON settings (`.github/settings.json`) and the
//!   last-run record (`.last-run.json`)
//! - **Fetch & stats**: paginated GitHub repository listing, per-language
//!   aggregation and badge rendering
//! - **Rendering**: placeholder templates or marker-block splicing
//! - **Workflow**: generation of the scheduled-workflow YAML
//!
//! ## Key Components
//!
//! - [`RunWindow`]: the schedule window evaluator
//! - [`Settings`]: run configuration loaded once per invocation
//! - [`GitHubClient`]: repository fetch with an injectable base URL
//! - [`run_update`]: the end-to-end update flow

pub mod error;
pub mod github;
pub mod stats;
pub mod storage;
pub mod template;
pub mod update;
pub mod window;
pub mod workflow;

pub use error::{ConfigError, CoreError, FetchError, RenderError};
pub use github::{GitHubClient, Repo};
pub use stats::RepoStats;
pub use storage::{LastRunRecord, Settings};
pub use update::{run_update, UpdateOptions, UpdateOutcome};
pub use window::{Clock, Evaluation, FixedClock, RunWindow, SystemClock};
