//! End-to-end README update flow.
//!
//! Evaluate the schedule window, fetch repository statistics, render the
//! README and record the run. The CLI stays a thin layer over this; tests
//! drive it directly with an injected clock and a mock API server.

use chrono::Utc;

use crate::error::{RenderError, Result};
use crate::github::GitHubClient;
use crate::stats::RepoStats;
use crate::storage::{LastRunRecord, Settings};
use crate::template::{render_template, splice_info_block, RenderContext};
use crate::window::Clock;

/// Knobs for one update invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Run regardless of the schedule window and last-run record.
    pub force: bool,
    /// Render everything but write nothing and record no run.
    pub dry_run: bool,
}

/// What an update invocation did.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// Outside the window; nothing was fetched or written.
    Skipped {
        next_run: Option<chrono::DateTime<Utc>>,
    },
    /// README rendered (and written, unless dry-run).
    Completed {
        total_projects: usize,
        next_run: Option<chrono::DateTime<Utc>>,
        rendered: String,
    },
}

/// Run one update: window gate, fetch, aggregate, render, write, record.
///
/// Rendering prefers the configured template file; when it does not exist
/// the info block is spliced into the existing README instead. Neither
/// being present is fatal.
pub async fn run_update(
    settings: &Settings,
    client: &GitHubClient,
    clock: &dyn Clock,
    options: UpdateOptions,
) -> Result<UpdateOutcome> {
    let tz = settings.parse_timezone()?;
    let window = settings.run_window()?;
    let now = clock.now();

    let last_run = LastRunRecord::load(&settings.last_run_path)?;
    if !window.should_run(now, last_run.map(|r| r.timestamp), options.force) {
        return Ok(UpdateOutcome::Skipped {
            next_run: window.next_eligible(now).map(|dt| dt.with_timezone(&Utc)),
        });
    }

    let repos = client.fetch_repos(&settings.github_user).await?;
    let stats = RepoStats::from_repos(&repos);

    let next = window.next_eligible(now);
    let ctx = RenderContext {
        stats: &stats,
        last_update: now.with_timezone(&tz),
        next_update: next,
    };

    let rendered = if settings.template_path.exists() {
        let template = std::fs::read_to_string(&settings.template_path)?;
        render_template(&template, &ctx)
    } else if settings.readme_path.exists() {
        let readme = std::fs::read_to_string(&settings.readme_path)?;
        splice_info_block(&readme, &ctx)
    } else {
        return Err(RenderError::NoRenderSource {
            template: settings.template_path.clone(),
            readme: settings.readme_path.clone(),
        }
        .into());
    };

    if !options.dry_run {
        std::fs::write(&settings.readme_path, &rendered)?;
        LastRunRecord::record(&settings.last_run_path, now)?;
    }

    Ok(UpdateOutcome::Completed {
        total_projects: stats.total_projects,
        next_run: next.map(|dt| dt.with_timezone(&Utc)),
        rendered,
    })
}
