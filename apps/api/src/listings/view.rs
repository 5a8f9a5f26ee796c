use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::listings::wage::WageUnit;
use crate::models::job::{JobPosting, JobType, PostingStatus, Skill, Urgency};

/// A posting as rendered in listing cards: raw fields plus display labels.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub id: Uuid,
    pub hirer_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub wage: String,
    pub wage_min: Option<f64>,
    pub wage_max: Option<f64>,
    pub wage_unit: WageUnit,
    pub job_type: JobType,
    pub job_type_label: &'static str,
    pub posted_at: DateTime<Utc>,
    pub posted_label: String,
    pub deadline: NaiveDate,
    pub deadline_label: String,
    pub skills: Vec<Skill>,
    pub benefits: Vec<String>,
    pub urgency: Option<Urgency>,
    pub status: PostingStatus,
}

impl JobView {
    pub fn render(job: &JobPosting, now: DateTime<Utc>) -> Self {
        Self {
            id: job.id,
            hirer_id: job.hirer_id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            wage: job.wage.display.clone(),
            wage_min: job.wage.min,
            wage_max: job.wage.max,
            wage_unit: job.wage.unit,
            job_type: job.job_type,
            job_type_label: job.job_type.label(),
            posted_at: job.posted_at,
            posted_label: posted_label(job.posted_at, now),
            deadline: job.deadline,
            deadline_label: deadline_label(job.deadline),
            skills: job.skills.iter().copied().collect(),
            benefits: job.benefits.clone(),
            urgency: job.urgency,
            status: job.status,
        }
    }
}

/// "3 hours ago", "1 day ago", "2 weeks ago".
pub fn posted_label(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(posted_at);
    let (count, unit) = if elapsed.num_minutes() < 1 {
        return "just now".to_string();
    } else if elapsed.num_hours() < 1 {
        (elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 7 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_days() < 30 {
        (elapsed.num_weeks(), "week")
    } else {
        return format!("on {}", deadline_label(posted_at.date_naive()));
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// "Dec 15, 2024"
pub fn deadline_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_posted_labels() {
        let now = now();
        assert_eq!(posted_label(now - Duration::seconds(20), now), "just now");
        assert_eq!(posted_label(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(posted_label(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(posted_label(now - Duration::days(1), now), "1 day ago");
        assert_eq!(posted_label(now - Duration::weeks(1), now), "1 week ago");
        assert_eq!(posted_label(now - Duration::days(45), now), "on Oct 17, 2024");
    }

    #[test]
    fn test_deadline_label_format() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        assert_eq!(deadline_label(date), "Dec 5, 2024");
    }
}
