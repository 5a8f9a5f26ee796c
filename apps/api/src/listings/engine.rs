//! Listing filter/sort engine.
//!
//! Pure function of `(postings, query)`: every active predicate must hold for a
//! posting to be kept, then a stable sort orders the survivors. Never fails; an
//! empty result is a valid answer.

use std::cmp::Ordering;

use tracing::debug;

use crate::listings::query::{FilterQuery, SortKey, WageBracket};
use crate::models::job::JobPosting;

/// Switches for predicates whose semantics are still a product decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    /// When false the wage bracket is accepted but does not narrow results.
    pub apply_wage_bracket: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            apply_wage_bracket: true,
        }
    }
}

enum WagePredicate {
    Inactive,
    Bracket(WageBracket),
    /// Token present but unparseable: matches nothing.
    Malformed,
}

pub fn filter_and_sort(
    jobs: &[JobPosting],
    query: &FilterQuery,
    policy: &MatchPolicy,
) -> Vec<JobPosting> {
    let term = query.search_term.trim().to_lowercase();

    let wage = if query.wage_filter.is_empty() || !policy.apply_wage_bracket {
        WagePredicate::Inactive
    } else {
        match WageBracket::parse(&query.wage_filter) {
            Some(bracket) => WagePredicate::Bracket(bracket),
            None => WagePredicate::Malformed,
        }
    };

    let mut matched: Vec<JobPosting> = jobs
        .iter()
        .filter(|job| matches_text(job, &term))
        .filter(|job| matches_location(job, &query.location_filter))
        .filter(|job| matches_skills(job, query))
        .filter(|job| matches_wage(job, &wage))
        .cloned()
        .collect();

    sort_postings(&mut matched, query.sort_key);

    debug!(
        "Listings: {} of {} postings matched (sort={})",
        matched.len(),
        jobs.len(),
        query.sort_key.as_str()
    );
    matched
}

/// `term` is already trimmed and lower-cased; empty matches everything.
fn matches_text(job: &JobPosting, term: &str) -> bool {
    term.is_empty()
        || job.title.to_lowercase().contains(term)
        || job.company.to_lowercase().contains(term)
}

// Case-sensitive on purpose; see DESIGN.md open questions.
fn matches_location(job: &JobPosting, location: &str) -> bool {
    location.is_empty() || job.location.contains(location)
}

fn matches_skills(job: &JobPosting, query: &FilterQuery) -> bool {
    query.selected_skills.is_empty()
        || job
            .skills
            .iter()
            .any(|skill| query.selected_skills.contains(skill.as_str()))
}

fn matches_wage(job: &JobPosting, predicate: &WagePredicate) -> bool {
    match predicate {
        WagePredicate::Inactive => true,
        WagePredicate::Bracket(bracket) => bracket.matches(&job.wage),
        WagePredicate::Malformed => false,
    }
}

/// Stable: ties keep input order.
fn sort_postings(jobs: &mut [JobPosting], key: SortKey) {
    match key {
        SortKey::Newest => jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at)),
        SortKey::Deadline => jobs.sort_by_key(|job| job.deadline),
        SortKey::WageHigh => jobs.sort_by(|a, b| {
            compare_wages(a.wage.sort_value(), b.wage.sort_value(), true)
        }),
        SortKey::WageLow => jobs.sort_by(|a, b| {
            compare_wages(a.wage.sort_value(), b.wage.sort_value(), false)
        }),
    }
}

/// Wages without an hourly sort value (unparseable, or a non-hourly unit)
/// sort last in both directions.
fn compare_wages(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.total_cmp(&x),
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
