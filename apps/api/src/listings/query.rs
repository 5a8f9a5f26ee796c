use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::listings::wage::Wage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    WageHigh,
    WageLow,
    Deadline,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::WageHigh,
        SortKey::WageLow,
        SortKey::Deadline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::WageHigh => "wage-high",
            SortKey::WageLow => "wage-low",
            SortKey::Deadline => "deadline",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| {
                format!("unknown sort '{s}', expected one of: newest, wage-high, wage-low, deadline")
            })
    }
}

/// The listing filters a user currently has selected.
///
/// `Default` is the canonical empty query: no filters, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub search_term: String,
    pub location_filter: String,
    pub wage_filter: String,
    pub selected_skills: BTreeSet<String>,
    pub sort_key: SortKey,
}

impl FilterQuery {
    /// Selects `skill` if absent, deselects it if present.
    pub fn toggle_skill(&mut self, skill: &str) {
        if !self.selected_skills.remove(skill) {
            self.selected_skills.insert(skill.to_string());
        }
    }

    /// Resets every field in a single assignment.
    pub fn clear(&mut self) {
        *self = FilterQuery::default();
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.location_filter.is_empty()
            && self.wage_filter.is_empty()
            && self.selected_skills.is_empty()
    }
}

/// Hourly wage bracket token: `"15-20"` or `"30+"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WageBracket {
    Between { lo: f64, hi: f64 },
    AtLeast(f64),
}

impl WageBracket {
    /// Tokens offered by the listings filter panel.
    pub const OFFERED: [&'static str; 4] = ["15-20", "20-25", "25-30", "30+"];

    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(lo) = token.strip_suffix('+') {
            let lo = lo.trim().parse::<f64>().ok()?;
            return lo.is_finite().then_some(WageBracket::AtLeast(lo));
        }
        let (lo, hi) = token.split_once('-')?;
        let lo = lo.trim().parse::<f64>().ok()?;
        let hi = hi.trim().parse::<f64>().ok()?;
        (lo.is_finite() && hi.is_finite() && lo <= hi).then_some(WageBracket::Between { lo, hi })
    }

    /// True if the posting's hourly range overlaps the bracket.
    /// Non-hourly and unparseable wages never match.
    pub fn matches(&self, wage: &Wage) -> bool {
        let Some((min, max)) = wage.hourly_range() else {
            return false;
        };
        match *self {
            WageBracket::Between { lo, hi } => min <= hi && max >= lo,
            WageBracket::AtLeast(lo) => max >= lo,
        }
    }
}
