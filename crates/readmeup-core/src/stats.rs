//! Repository statistics aggregation.
//!
//! Counts projects and per-language usage and renders the two line
//! formats the README consumers want: shields.io badges and plain bullet
//! lines. Repositories without a detected language count under `Other`.

use std::collections::HashMap;

use crate::github::Repo;

const FALLBACK_LANGUAGE: &str = "Other";

/// Aggregated statistics over a user's repositories.
#[derive(Debug, Clone)]
pub struct RepoStats {
    pub total_projects: usize,
    /// (language, count) sorted by count descending, name ascending on ties.
    languages: Vec<(String, usize)>,
}

impl RepoStats {
    pub fn from_repos(repos: &[Repo]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for repo in repos {
            let language = repo
                .language
                .clone()
                .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());
            *counts.entry(language).or_insert(0) += 1;
        }

        let mut languages: Vec<(String, usize)> = counts.into_iter().collect();
        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_projects: repos.len(),
            languages,
        }
    }

    pub fn languages(&self) -> &[(String, usize)] {
        &self.languages
    }

    /// One shields.io badge per language, most used first, joined by
    /// spaces.
    pub fn badge_line(&self) -> String {
        self.languages
            .iter()
            .map(|(language, count)| {
                format!(
                    "![{language}](https://img.shields.io/badge/{}-{count}-blue)",
                    urlencoding::encode(language)
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Plain `• language: count` lines for the marker-block renderer.
    pub fn bullet_lines(&self) -> String {
        if self.languages.is_empty() {
            return "• no languages detected".to_string();
        }
        self.languages
            .iter()
            .map(|(language, count)| format!("• {language}: {count}"))
            .collect::<Vec<_>>()
            .join("<br>\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, language: Option<&str>) -> Repo {
        Repo {
            name: name.to_string(),
            language: language.map(str::to_string),
            fork: false,
        }
    }

    #[test]
    fn counts_languages_most_used_first() {
        let repos = vec![
            repo("a", Some("Rust")),
            repo("b", Some("Rust")),
            repo("c", Some("Python")),
            repo("d", None),
        ];
        let stats = RepoStats::from_repos(&repos);
        assert_eq!(stats.total_projects, 4);
        assert_eq!(
            stats.languages(),
            &[
                ("Rust".to_string(), 2),
                ("Other".to_string(), 1),
                ("Python".to_string(), 1),
            ]
        );
    }

    #[test]
    fn badge_line_encodes_language_names() {
        let repos = vec![repo("a", Some("C++")), repo("b", Some("C++")), repo("c", Some("Rust"))];
        let stats = RepoStats::from_repos(&repos);
        assert_eq!(
            stats.badge_line(),
            "![C++](https://img.shields.io/badge/C%2B%2B-2-blue) \
             ![Rust](https://img.shields.io/badge/Rust-1-blue)"
        );
    }

    #[test]
    fn bullet_lines_join_with_break_tags() {
        let repos = vec![repo("a", Some("Rust")), repo("b", Some("Go"))];
        let stats = RepoStats::from_repos(&repos);
        assert_eq!(stats.bullet_lines(), "• Go: 1<br>\n• Rust: 1");
    }

    #[test]
    fn empty_repo_list_degrades_gracefully() {
        let stats = RepoStats::from_repos(&[]);
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.badge_line(), "");
        assert_eq!(stats.bullet_lines(), "• no languages detected");
    }
}
