//! Hirer-side posting lifecycle: create (or draft), publish, close.

pub mod handlers;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::listings::wage::{Wage, WageUnit};
use crate::models::job::{JobPosting, JobType, PostingStatus, Skill, Urgency};
use crate::models::user::HirerProfile;
use crate::notify::SubmissionError;
use crate::validation::validate_form;

fn default_publish() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostJobForm {
    #[validate(length(min = 3, max = 120, message = "Job title must be between 3 and 120 characters"))]
    pub title: String,
    #[validate(length(min = 10, max = 5000, message = "Description must be between 10 and 5000 characters"))]
    pub description: String,
    #[validate(length(min = 2, max = 120, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Wage is required"))]
    pub wage: String,
    #[serde(default)]
    pub wage_type: WageUnit,
    #[validate(length(min = 1, message = "Select at least one required skill"))]
    pub required_skills: Vec<Skill>,
    pub job_type: JobType,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default = "default_publish")]
    pub publish: bool,
}

/// Validates the form and builds a posting owned by `hirer`.
pub fn build_posting(
    form: PostJobForm,
    hirer: &HirerProfile,
    now: DateTime<Utc>,
) -> Result<JobPosting, SubmissionError> {
    let form = PostJobForm {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        location: form.location.trim().to_string(),
        wage: form.wage.trim().to_string(),
        ..form
    };
    validate_form(&form)?;

    if form.deadline < now.date_naive() {
        return Err(SubmissionError::Invalid(
            "deadline: Application deadline cannot be in the past".to_string(),
        ));
    }

    let wage = Wage::from_amount(&form.wage, form.wage_type).ok_or_else(|| {
        SubmissionError::Invalid("wage: Enter an amount like 25 or 25-30".to_string())
    })?;

    let benefits = form
        .benefits
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();

    Ok(JobPosting {
        id: Uuid::new_v4(),
        hirer_id: hirer.id,
        title: form.title,
        company: hirer.company_name.clone(),
        location: form.location,
        description: form.description,
        wage,
        job_type: form.job_type,
        posted_at: now,
        deadline: form.deadline,
        skills: form.required_skills.into_iter().collect(),
        benefits,
        urgency: form.urgency,
        status: if form.publish {
            PostingStatus::Active
        } else {
            PostingStatus::Draft
        },
    })
}

fn status_label(status: PostingStatus) -> &'static str {
    match status {
        PostingStatus::Draft => "draft",
        PostingStatus::Active => "active",
        PostingStatus::Closed => "closed",
    }
}

/// Draft -> Active (restamps `posted_at`) and Active -> Closed. Nothing else.
pub fn transition(
    job: &mut JobPosting,
    target: PostingStatus,
    now: DateTime<Utc>,
) -> Result<(), SubmissionError> {
    match (job.status, target) {
        (PostingStatus::Draft, PostingStatus::Active) => {
            job.status = PostingStatus::Active;
            job.posted_at = now;
            Ok(())
        }
        (PostingStatus::Active, PostingStatus::Closed) => {
            job.status = PostingStatus::Closed;
            Ok(())
        }
        (from, to) => Err(SubmissionError::Conflict(format!(
            "A {} posting cannot become {}",
            status_label(from),
            status_label(to)
        ))),
    }
}
