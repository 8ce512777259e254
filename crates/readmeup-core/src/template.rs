//! README rendering.
//!
//! Two modes cover the two shapes profile repositories come in:
//! - template mode substitutes `{total_projects}`, `{language_lines}`,
//!   `{last_update}` and `{next_update_str}` in a template file;
//! - marker mode replaces the block between `<!-- INFO-START -->` and
//!   `<!-- INFO-END -->` inside an existing README, appending the block
//!   when no markers are present.
//!
//! Timestamps are formatted `dd/MM/yyyy HH:mm` in the configured timezone.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::stats::RepoStats;

pub const MARKER_START: &str = "<!-- INFO-START -->";
pub const MARKER_END: &str = "<!-- INFO-END -->";

const STAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Everything a render needs: the aggregated stats and the two civil
/// timestamps stamped into the output.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub stats: &'a RepoStats,
    pub last_update: DateTime<Tz>,
    pub next_update: Option<DateTime<Tz>>,
}

impl RenderContext<'_> {
    fn last_update_str(&self) -> String {
        self.last_update.format(STAMP_FORMAT).to_string()
    }

    fn next_update_str(&self) -> String {
        match self.next_update {
            Some(next) => next.format(STAMP_FORMAT).to_string(),
            None => "manual only".to_string(),
        }
    }
}

/// Substitute the first occurrence of each placeholder in `template`.
pub fn render_template(template: &str, ctx: &RenderContext<'_>) -> String {
    template
        .replacen("{total_projects}", &ctx.stats.total_projects.to_string(), 1)
        .replacen("{language_lines}", &ctx.stats.badge_line(), 1)
        .replacen("{last_update}", &ctx.last_update_str(), 1)
        .replacen("{next_update_str}", &ctx.next_update_str(), 1)
}

/// The marker-delimited info block, freshly rendered.
pub fn render_info_block(ctx: &RenderContext<'_>) -> String {
    format!(
        "{MARKER_START}\n\
         📊 <strong>Total projects:</strong> {}<br>\n\
         🧠 <strong>Projects by language:</strong><br>\n\
         {}<br>\n\
         ⏱️ <strong>Last update:</strong> {} ({})<br>\n\
         🔜 <strong>Next update:</strong> {}\n\
         {MARKER_END}",
        ctx.stats.total_projects,
        ctx.stats.bullet_lines(),
        ctx.last_update_str(),
        ctx.last_update.timezone().name(),
        ctx.next_update_str(),
    )
}

/// Replace the marker-delimited region of `readme` with a fresh info
/// block, or append the block when the markers are missing.
pub fn splice_info_block(readme: &str, ctx: &RenderContext<'_>) -> String {
    let block = render_info_block(ctx);
    let region = readme.find(MARKER_START).and_then(|start| {
        readme[start..]
            .find(MARKER_END)
            .map(|offset| (start, start + offset + MARKER_END.len()))
    });
    match region {
        Some((start, end)) => format!("{}{}{}", &readme[..start], block, &readme[end..]),
        None => format!("{readme}\n\n{block}"),
    }
}
