use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A bookable service from the catalog; its duration is the slot length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub duration_minutes: u32,
    pub price: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub company_id: i64,
    pub name: String,
    pub duration_minutes: u32,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceChanges {
    pub name: Option<String>,
    pub duration_minutes: Option<u32>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}
