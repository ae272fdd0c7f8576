//! Fuzzy Task Resolver: matches what a user typed to a loaded task.

use super::types::Task;
use anyhow::{bail, Result};
use std::collections::HashSet;

/// How a query was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Id,
    Slug,
    Fuzzy,
}

pub struct ResolveResult<'a> {
    pub task: &'a Task,
    pub kind: MatchKind,
    pub confidence: f64,
}

impl ResolveResult<'_> {
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.kind != MatchKind::Fuzzy
    }
}

pub struct TaskResolver<'a> {
    tasks: &'a [Task],
}

impl<'a> TaskResolver<'a> {
    #[must_use]
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks }
    }

    /// Resolves a user query into a task, falling back to fuzzy matching.
    ///
    /// # Errors
    /// Returns an error if no task matches.
    pub fn resolve(&self, query: &str) -> Result<ResolveResult<'a>> {
        let query = query.trim();
        if let Some(task) = self.tasks.iter().find(|t| t.id == query) {
            return Ok(ResolveResult {
                task,
                kind: MatchKind::Id,
                confidence: 1.0,
            });
        }

        let wanted = slugify(query);
        if let Some(task) = self.tasks.iter().find(|t| slugify(&t.title) == wanted) {
            return Ok(ResolveResult {
                task,
                kind: MatchKind::Slug,
                confidence: 1.0,
            });
        }

        self.fuzzy_resolve(query)
    }

    /// Resolves only an exact id or title slug. A fuzzy hit is reported
    /// as a suggestion, never returned.
    ///
    /// # Errors
    /// Returns an error naming the closest task when the match is not exact.
    pub fn resolve_exact(&self, query: &str) -> Result<&'a Task> {
        let found = self.resolve(query)?;
        if !found.is_exact() {
            bail!(
                "'{}' is not an exact task id or title. Closest: [{}] {} ({:.0}% match)",
                query.trim(),
                found.task.id,
                found.task.title,
                found.confidence * 100.0
            );
        }
        Ok(found.task)
    }

    fn fuzzy_resolve(&self, query: &str) -> Result<ResolveResult<'a>> {
        let query_lower = query.to_lowercase();
        let words: Vec<_> = query_lower.split_whitespace().collect();

        let best = self
            .tasks
            .iter()
            .map(|t| (calculate_score(t, &query_lower, &words), t))
            .filter(|(s, _)| *s > 0.3)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let Some((confidence, task)) = best else {
            bail!("No task matches '{query}'");
        };
        Ok(ResolveResult {
            task,
            kind: MatchKind::Fuzzy,
            confidence,
        })
    }
}

/// Generates a slug from a title string.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

fn calculate_score(task: &Task, query: &str, query_words: &[&str]) -> f64 {
    let title_lower = task.title.to_lowercase();
    let slug = slugify(&task.title);

    let mut score = 0.0;

    if title_lower.contains(query) {
        score += 0.7;
    }
    for word in query_words {
        if title_lower.contains(word) {
            score += 0.25;
        }
    }
    if slug.starts_with(&slugify(query)) {
        score += 0.5;
    }

    score += string_similarity(&slug, query) * 0.4;
    score.min(1.0)
}

#[allow(clippy::cast_precision_loss)]
fn string_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: HashSet<char> = a.chars().collect();
    let b_chars: HashSet<char> = b.chars().collect();

    let intersection = a_chars.intersection(&b_chars).count();
    let union = a_chars.union(&b_chars).count();

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}
