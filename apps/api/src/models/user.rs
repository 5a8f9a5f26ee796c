use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::Skill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Laborer,
    Hirer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Laborer => f.write_str("laborer"),
            Role::Hirer => f.write_str("hirer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Intermediate,
    Experienced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessType {
    #[serde(rename = "Construction Company")]
    ConstructionCompany,
    #[serde(rename = "General Contractor")]
    GeneralContractor,
    Landscaping,
    #[serde(rename = "Property Management")]
    PropertyManagement,
    Manufacturing,
    #[serde(rename = "Warehouse/Logistics")]
    WarehouseLogistics,
    #[serde(rename = "Restaurant/Hospitality")]
    RestaurantHospitality,
    Retail,
    Agriculture,
    #[serde(rename = "Cleaning Services")]
    CleaningServices,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborerProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub skills: BTreeSet<Skill>,
    pub experience_level: ExperienceLevel,
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HirerProfile {
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub business_type: BusinessType,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Feedback left by a hirer on a laborer's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub laborer_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewer_name: String,
    /// 1 – 5
    pub rating: u8,
    pub comment: String,
    pub project: Option<String>,
    pub created_at: DateTime<Utc>,
}
