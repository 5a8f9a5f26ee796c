use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listings::wage::Wage;

/// Fixed trade vocabulary. Postings and laborer profiles only carry these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Construction,
    Plumbing,
    Electrical,
    Carpentry,
    Painting,
    Roofing,
    Landscaping,
    Welding,
    #[serde(rename = "HVAC")]
    Hvac,
    #[serde(rename = "General Labor")]
    GeneralLabor,
}

impl Skill {
    pub const ALL: [Skill; 10] = [
        Skill::Construction,
        Skill::Plumbing,
        Skill::Electrical,
        Skill::Carpentry,
        Skill::Painting,
        Skill::Roofing,
        Skill::Landscaping,
        Skill::Welding,
        Skill::Hvac,
        Skill::GeneralLabor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Construction => "Construction",
            Skill::Plumbing => "Plumbing",
            Skill::Electrical => "Electrical",
            Skill::Carpentry => "Carpentry",
            Skill::Painting => "Painting",
            Skill::Roofing => "Roofing",
            Skill::Landscaping => "Landscaping",
            Skill::Welding => "Welding",
            Skill::Hvac => "HVAC",
            Skill::GeneralLabor => "General Labor",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .iter()
            .find(|skill| skill.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown skill '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Seasonal,
}

impl JobType {
    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Temporary => "Temporary",
            JobType::Seasonal => "Seasonal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
    Draft,
    Active,
    Closed,
}

/// A job listing. `posted_at`, `deadline` and the parsed wage bounds are the
/// sortable fields; display labels are derived from them at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub hirer_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub wage: Wage,
    pub job_type: JobType,
    pub posted_at: DateTime<Utc>,
    pub deadline: NaiveDate,
    pub skills: BTreeSet<Skill>,
    pub benefits: Vec<String>,
    pub urgency: Option<Urgency>,
    pub status: PostingStatus,
}

impl JobPosting {
    pub fn is_open(&self) -> bool {
        self.status == PostingStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_round_trips_through_display_name() {
        for skill in Skill::ALL {
            assert_eq!(skill.as_str().parse::<Skill>().unwrap(), skill);
        }
    }

    #[test]
    fn test_unknown_skill_is_rejected() {
        assert!("Pipe Fitting".parse::<Skill>().is_err());
        assert!("hvac".parse::<Skill>().is_err());
    }

    #[test]
    fn test_skill_serde_uses_display_names() {
        let json = serde_json::to_string(&vec![Skill::Hvac, Skill::GeneralLabor]).unwrap();
        assert_eq!(json, r#"["HVAC","General Labor"]"#);
    }

    #[test]
    fn test_job_type_serde_is_kebab_case() {
        let parsed: JobType = serde_json::from_str(r#""full-time""#).unwrap();
        assert_eq!(parsed, JobType::FullTime);
        assert_eq!(parsed.label(), "Full-time");
    }
}
