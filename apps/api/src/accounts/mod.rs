//! Laborer and hirer signup.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::job::Skill;
use crate::models::user::{BusinessType, ExperienceLevel, HirerProfile, LaborerProfile, Role};
use crate::notify::SubmissionError;
use crate::store::MarketplaceStore;
use crate::validation::validate_form;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LaborerSignupForm {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
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
pub struct HirerSignupForm {
    #[validate(length(min = 2, max = 120, message = "Company name must be between 2 and 120 characters"))]
    pub company_name: String,
    #[validate(length(min = 2, max = 100, message = "Contact person must be between 2 and 100 characters"))]
    pub contact_person: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "Phone number must be between 7 and 20 characters"))]
    pub phone: String,
    #[validate(length(min = 2, max = 120, message = "Location is required"))]
    pub location: String,
    pub business_type: BusinessType,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
}

/// Returned once on signup; the token is the caller's session from now on.
#[derive(Debug, Serialize)]
pub struct SignupReceipt<P> {
    pub session_token: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub profile: P,
}

fn trimmed(s: String) -> String {
    s.trim().to_string()
}

pub fn register_laborer(
    store: &mut MarketplaceStore,
    form: LaborerSignupForm,
    now: DateTime<Utc>,
) -> Result<LaborerProfile, SubmissionError> {
    let form = LaborerSignupForm {
        full_name: trimmed(form.full_name),
        email: trimmed(form.email),
        phone: trimmed(form.phone),
        location: trimmed(form.location),
        bio: trimmed(form.bio),
        ..form
    };
    validate_form(&form)?;
    ensure_email_free(store, &form.email)?;

    let profile = LaborerProfile {
        id: Uuid::new_v4(),
        full_name: form.full_name,
        email: form.email,
        phone: form.phone,
        location: form.location,
        skills: form.skills.into_iter().collect(),
        experience_level: form.experience_level,
        bio: form.bio,
        created_at: now,
    };
    store.laborers.insert(profile.id, profile.clone());
    info!("Laborer account created: id={}", profile.id);
    Ok(profile)
}

pub fn register_hirer(
    store: &mut MarketplaceStore,
    form: HirerSignupForm,
    now: DateTime<Utc>,
) -> Result<HirerProfile, SubmissionError> {
    let form = HirerSignupForm {
        company_name: trimmed(form.company_name),
        contact_person: trimmed(form.contact_person),
        email: trimmed(form.email),
        phone: trimmed(form.phone),
        location: trimmed(form.location),
        description: trimmed(form.description),
        ..form
    };
    validate_form(&form)?;
    ensure_email_free(store, &form.email)?;

    let profile = HirerProfile {
        id: Uuid::new_v4(),
        company_name: form.company_name,
        contact_person: form.contact_person,
        email: form.email,
        phone: form.phone,
        location: form.location,
        business_type: form.business_type,
        description: form.description,
        created_at: now,
    };
    store.hirers.insert(profile.id, profile.clone());
    info!("Hirer account created: id={}", profile.id);
    Ok(profile)
}

fn ensure_email_free(store: &MarketplaceStore, email: &str) -> Result<(), SubmissionError> {
    if store.email_taken(email) {
        return Err(SubmissionError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laborer_form() -> LaborerSignupForm {
        LaborerSignupForm {
            full_name: "  Maria Lopez ".to_string(),
            email: "maria@example.com".to_string(),
            phone: "(555) 222-1111".to_string(),
            location: "Bronx, NY".to_string(),
            skills: vec![Skill::Painting, Skill::Carpentry],
            experience_level: ExperienceLevel::Intermediate,
            bio: String::new(),
        }
    }

    fn hirer_form() -> HirerSignupForm {
        HirerSignupForm {
            company_name: "Bronx Builders".to_string(),
            contact_person: "Tom Hale".to_string(),
            email: "tom@bronxbuilders.com".to_string(),
            phone: "5550001111".to_string(),
            location: "Bronx, NY".to_string(),
            business_type: BusinessType::GeneralContractor,
            description: "Small renovation outfit.".to_string(),
        }
    }

    #[test]
    fn test_laborer_signup_trims_and_stores() {
        let mut store = MarketplaceStore::default();
        let profile = register_laborer(&mut store, laborer_form(), Utc::now()).unwrap();
        assert_eq!(profile.full_name, "Maria Lopez");
        assert_eq!(profile.skills.len(), 2);
        assert!(store.laborers.contains_key(&profile.id));
    }

    #[test]
    fn test_laborer_signup_requires_a_skill() {
        let mut store = MarketplaceStore::default();
        let form = LaborerSignupForm {
            skills: vec![],
            ..laborer_form()
        };
        let err = register_laborer(&mut store, form, Utc::now()).unwrap_err();
        assert!(matches!(err, SubmissionError::Invalid(ref m) if m.contains("skill")));
        assert!(store.laborers.is_empty());
    }

    #[test]
    fn test_blank_name_fails_after_trim() {
        let mut store = MarketplaceStore::default();
        let form = LaborerSignupForm {
            full_name: "    ".to_string(),
            ..laborer_form()
        };
        assert!(register_laborer(&mut store, form, Utc::now()).is_err());
    }

    #[test]
    fn test_email_is_unique_across_roles() {
        let mut store = MarketplaceStore::default();
        register_laborer(&mut store, laborer_form(), Utc::now()).unwrap();
        let form = HirerSignupForm {
            email: "MARIA@example.com".to_string(),
            ..hirer_form()
        };
        let err = register_hirer(&mut store, form, Utc::now()).unwrap_err();
        assert!(matches!(err, SubmissionError::Conflict(_)));
    }

    #[test]
    fn test_hirer_signup_rejects_bad_email() {
        let mut store = MarketplaceStore::default();
        let form = HirerSignupForm {
            email: "not-an-email".to_string(),
            ..hirer_form()
        };
        let err = register_hirer(&mut store, form, Utc::now()).unwrap_err();
        assert!(matches!(err, SubmissionError::Invalid(ref m) if m.starts_with("email")));
    }
}
