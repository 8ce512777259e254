//! Scheduled-workflow file generation.
//!
//! Emits `.github/workflows/update-readme.yml` with a schedule trigger
//! built from the configured cron expression. The expression is validated
//! before anything is written; GitHub cron is 5-field, while the `cron`
//! crate wants a seconds field, so one is prepended for parsing only.

use std::path::Path;
use std::str::FromStr;

use indoc::indoc;

use crate::error::{ConfigError, Result};

pub const DEFAULT_WORKFLOW_PATH: &str = ".github/workflows/update-readme.yml";

const WORKFLOW_TEMPLATE: &str = indoc! {r#"
    name: Update README

    on:
      schedule:
        - cron: "{cron}"
      workflow_dispatch:

    permissions:
      contents: write

    concurrency:
      group: update-readme
      cancel-in-progress: false

    jobs:
      update-readme:
        runs-on: ubuntu-latest

        steps:
          - name: Checkout
            uses: actions/checkout@v4

          - name: Install Rust
            uses: dtolnay/rust-toolchain@stable

          - name: Run update
            run: cargo run --release -p readmeup-cli -- update
            env:
              GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}

          - name: Commit README if changed
            run: |
              git config user.name "github-actions[bot]"
              git config user.email "github-actions[bot]@users.noreply.github.com"
              git add README.md .last-run.json || true
              git diff --cached --quiet || git commit -m "Automated README update"
              git push
"#};

/// Validate a 5-field cron expression.
pub fn validate_cron(expr: &str) -> Result<(), ConfigError> {
    if expr.split_whitespace().count() != 5 {
        return Err(ConfigError::InvalidCron(expr.to_string()));
    }
    let normalized = format!("0 {expr}");
    cron::Schedule::from_str(&normalized)
        .map_err(|_| ConfigError::InvalidCron(expr.to_string()))?;
    Ok(())
}

/// Render the workflow YAML for `cron_expr`.
pub fn render_workflow(cron_expr: &str) -> Result<String, ConfigError> {
    validate_cron(cron_expr)?;
    Ok(WORKFLOW_TEMPLATE.replacen("{cron}", cron_expr, 1))
}

/// Render and write the workflow file, creating parent directories.
pub fn write_workflow(path: &Path, cron_expr: &str) -> Result<()> {
    let content = render_workflow(cron_expr)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}
