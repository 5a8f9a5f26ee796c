//! Own-profile edits, public profiles, and hirer reviews of laborers.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::job::{PostingStatus, Skill};
use crate::models::user::{BusinessType, ExperienceLevel, HirerProfile, LaborerProfile, Review};
use crate::notify::SubmissionError;
use crate::store::MarketplaceStore;
use crate::validation::validate_form;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ProfileView {
    Laborer(LaborerProfile),
    Hirer(HirerProfile),
}

/// Editable laborer fields. Email is not among them.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LaborerProfileUpdate {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(length(min = 7, max = 20, message = "Phone number must be between 7 and 20 characters"))]
    pub phone: String,
    #[validate(length(min = 2, max = 120, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Select at least one skill"))]
    pub skills: Vec<Skill>,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HirerProfileUpdate {
    #[validate(length(min = 2, max = 120, message = "Company name must be between 2 and 120 characters"))]
    pub company_name: String,
    #[validate(length(min = 2, max = 100, message = "Contact person must be between 2 and 100 characters"))]
    pub contact_person: String,
    #[validate(length(min = 7, max = 20, message = "Phone number must be between 7 and 20 characters"))]
    pub phone: String,
    #[validate(length(min = 2, max = 120, message = "Location is required"))]
    pub location: String,
    pub business_type: BusinessType,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, max = 1000, message = "Comment must be between 1 and 1000 characters"))]
    pub comment: String,
    #[serde(default)]
    pub project: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobHistoryEntry {
    pub job_id: Uuid,
    pub title: String,
    pub company: String,
    pub status: PostingStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub profile: ProfileView,
    pub reviews: Vec<Review>,
    pub review_count: usize,
    pub average_rating: Option<f64>,
    pub job_history: Vec<JobHistoryEntry>,
}

pub fn update_laborer(
    store: &mut MarketplaceStore,
    laborer_id: Uuid,
    update: LaborerProfileUpdate,
) -> Result<LaborerProfile, SubmissionError> {
    let update = LaborerProfileUpdate {
        full_name: update.full_name.trim().to_string(),
        phone: update.phone.trim().to_string(),
        location: update.location.trim().to_string(),
        bio: update.bio.trim().to_string(),
        ..update
    };
    validate_form(&update)?;

    let profile = store
        .laborers
        .get_mut(&laborer_id)
        .ok_or_else(|| SubmissionError::NotFound("Profile not found".to_string()))?;
    profile.full_name = update.full_name;
    profile.phone = update.phone;
    profile.location = update.location;
    profile.skills = update.skills.into_iter().collect();
    profile.experience_level = update.experience_level;
    profile.bio = update.bio;

    info!("Laborer profile updated: id={laborer_id}");
    Ok(profile.clone())
}

/// Renames propagate to the company shown on the hirer's postings.
pub fn update_hirer(
    store: &mut MarketplaceStore,
    hirer_id: Uuid,
    update: HirerProfileUpdate,
) -> Result<HirerProfile, SubmissionError> {
    let update = HirerProfileUpdate {
        company_name: update.company_name.trim().to_string(),
        contact_person: update.contact_person.trim().to_string(),
        phone: update.phone.trim().to_string(),
        location: update.location.trim().to_string(),
        description: update.description.trim().to_string(),
        ..update
    };
    validate_form(&update)?;

    let profile = store
        .hirers
        .get_mut(&hirer_id)
        .ok_or_else(|| SubmissionError::NotFound("Profile not found".to_string()))?;
    profile.company_name = update.company_name;
    profile.contact_person = update.contact_person;
    profile.phone = update.phone;
    profile.location = update.location;
    profile.business_type = update.business_type;
    profile.description = update.description;
    let updated = profile.clone();

    for job in store.jobs.iter_mut().filter(|job| job.hirer_id == hirer_id) {
        job.company = updated.company_name.clone();
    }
    for review in store.reviews.iter_mut().filter(|r| r.reviewer_id == hirer_id) {
        review.reviewer_name = updated.company_name.clone();
    }

    info!("Hirer profile updated: id={hirer_id}");
    Ok(updated)
}

/// Mean rating rounded to one decimal, `None` without reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(total) / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Applications the laborer has sent, most recent first.
pub fn job_history(store: &MarketplaceStore, laborer_id: Uuid) -> Vec<JobHistoryEntry> {
    let mut history: Vec<JobHistoryEntry> = store
        .applications_by(laborer_id)
        .filter_map(|application| {
            let job = store.job(application.job_id)?;
            Some(JobHistoryEntry {
                job_id: job.id,
                title: job.title.clone(),
                company: job.company.clone(),
                status: job.status,
                applied_at: application.submitted_at,
            })
        })
        .collect();
    history.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
    history
}

pub fn public_profile(store: &MarketplaceStore, user_id: Uuid) -> Option<PublicProfile> {
    if let Some(laborer) = store.laborers.get(&user_id) {
        let mut reviews = store.reviews_for(user_id);
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        return Some(PublicProfile {
            profile: ProfileView::Laborer(laborer.clone()),
            review_count: reviews.len(),
            average_rating: average_rating(&reviews),
            reviews,
            job_history: job_history(store, user_id),
        });
    }

    store.hirers.get(&user_id).map(|hirer| PublicProfile {
        profile: ProfileView::Hirer(hirer.clone()),
        reviews: Vec::new(),
        review_count: 0,
        average_rating: None,
        job_history: Vec::new(),
    })
}

pub fn add_review(
    store: &mut MarketplaceStore,
    laborer_id: Uuid,
    reviewer: &HirerProfile,
    form: ReviewForm,
    now: DateTime<Utc>,
) -> Result<Review, SubmissionError> {
    let form = ReviewForm {
        comment: form.comment.trim().to_string(),
        project: form
            .project
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        ..form
    };
    validate_form(&form)?;

    if !store.laborers.contains_key(&laborer_id) {
        return Err(SubmissionError::NotFound(
            "Reviews can only be left on laborer profiles".to_string(),
        ));
    }

    let review = Review {
        id: Uuid::new_v4(),
        laborer_id,
        reviewer_id: reviewer.id,
        reviewer_name: reviewer.company_name.clone(),
        rating: form.rating,
        comment: form.comment,
        project: form.project,
        created_at: now,
    };
    store.reviews.push(review.clone());
    info!("Review {} left for laborer {laborer_id}", review.id);
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::Application;
    use crate::store::seed::{self, DemoAccounts};

    fn seeded() -> (MarketplaceStore, DemoAccounts) {
        let mut store = MarketplaceStore::default();
        let accounts = seed::seed(&mut store, Utc::now());
        (store, accounts)
    }

    fn review(rating: u8) -> Review {
        Review {
            id: Uuid::new_v4(),
            laborer_id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            reviewer_name: "BuildCorp LLC".to_string(),
            rating,
            comment: "Solid work".to_string(),
            project: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_rating_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(average_rating(&[review(5), review(4), review(4)]), Some(4.3));
        assert_eq!(average_rating(&[review(5), review(4)]), Some(4.5));
    }

    #[test]
    fn test_public_laborer_profile_has_reviews_and_history() {
        let (mut store, accounts) = seeded();
        let job_id = store.jobs[1].id;
        store
            .applications
            .push(Application::new(job_id, accounts.laborer_id, Utc::now()));

        let profile = public_profile(&store, accounts.laborer_id).unwrap();
        assert!(matches!(profile.profile, ProfileView::Laborer(_)));
        assert_eq!(profile.review_count, 3);
        assert!(profile.average_rating.is_some());
        assert_eq!(profile.job_history.len(), 1);
        assert_eq!(profile.job_history[0].title, "Experienced Plumber Needed");
        assert_eq!(profile.job_history[0].company, "Metro Plumbing Services");
    }

    #[test]
    fn test_public_hirer_profile_has_no_reviews() {
        let (store, accounts) = seeded();
        let profile = public_profile(&store, accounts.hirer_id).unwrap();
        assert!(matches!(profile.profile, ProfileView::Hirer(_)));
        assert_eq!(profile.average_rating, None);
        assert!(public_profile(&store, Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_laborer_update_keeps_email() {
        let (mut store, accounts) = seeded();
        let update = LaborerProfileUpdate {
            full_name: "John A. Smith".to_string(),
            phone: "(555) 123-4567".to_string(),
            location: "Queens, NY".to_string(),
            skills: vec![Skill::Welding],
            experience_level: ExperienceLevel::Expert,
            bio: String::new(),
        };
        let updated = update_laborer(&mut store, accounts.laborer_id, update).unwrap();
        assert_eq!(updated.full_name, "John A. Smith");
        assert_eq!(updated.email, "john.smith@email.com");
        assert_eq!(updated.skills.len(), 1);
    }

    #[test]
    fn test_hirer_rename_updates_postings_and_reviews() {
        let (mut store, accounts) = seeded();
        let update = HirerProfileUpdate {
            company_name: "BuildCorp Group".to_string(),
            contact_person: "Sarah Johnson".to_string(),
            phone: "(555) 987-6543".to_string(),
            location: "New York, NY".to_string(),
            business_type: BusinessType::ConstructionCompany,
            description: String::new(),
        };
        update_hirer(&mut store, accounts.hirer_id, update).unwrap();
        let companies: Vec<&str> = store
            .jobs
            .iter()
            .filter(|job| job.hirer_id == accounts.hirer_id)
            .map(|job| job.company.as_str())
            .collect();
        assert_eq!(companies, vec!["BuildCorp Group"]);

        let reviewers: Vec<String> = store
            .reviews_for(accounts.laborer_id)
            .into_iter()
            .map(|review| review.reviewer_name)
            .collect();
        assert!(!reviewers.is_empty());
        assert!(reviewers.iter().all(|name| name == "BuildCorp Group"));
    }

    #[test]
    fn test_review_rules() {
        let (mut store, accounts) = seeded();
        let reviewer = store.hirers[&accounts.hirer_id].clone();

        let bad_rating = ReviewForm {
            rating: 6,
            comment: "Great".to_string(),
            project: None,
        };
        assert!(matches!(
            add_review(&mut store, accounts.laborer_id, &reviewer, bad_rating, Utc::now()),
            Err(SubmissionError::Invalid(_))
        ));

        let on_hirer = ReviewForm {
            rating: 4,
            comment: "Great".to_string(),
            project: None,
        };
        assert!(matches!(
            add_review(&mut store, accounts.hirer_id, &reviewer, on_hirer, Utc::now()),
            Err(SubmissionError::NotFound(_))
        ));

        let good = ReviewForm {
            rating: 4,
            comment: " Showed up early every day. ".to_string(),
            project: Some("  ".to_string()),
        };
        let review = add_review(&mut store, accounts.laborer_id, &reviewer, good, Utc::now()).unwrap();
        assert_eq!(review.comment, "Showed up early every day.");
        assert_eq!(review.project, None);
        assert_eq!(review.reviewer_name, "BuildCorp LLC");
        assert_eq!(store.reviews_for(accounts.laborer_id).len(), 4);
    }
}
