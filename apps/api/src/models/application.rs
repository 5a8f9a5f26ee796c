use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A laborer's application to a single posting. One per (job, laborer) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub laborer_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl Application {
    pub fn new(job_id: Uuid, laborer_id: Uuid, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            laborer_id,
            submitted_at,
        }
    }
}
