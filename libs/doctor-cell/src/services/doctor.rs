use std::sync::Arc;

use tracing::debug;

use shared_database::Database;
use shared_models::{Doctor, NewDoctor};
use shared_utils::AppState;

use crate::models::{CreateDoctorRequest, DoctorError};

pub struct DoctorService {
    db: Arc<Database>,
    default_company_id: i64,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            default_company_id: state.config.default_company_id,
        }
    }

    /// Create a new doctor profile
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let full_name = request.full_name.trim();
        if full_name.is_empty() {
            return Err(DoctorError::ValidationError("full_name must not be empty".to_string()));
        }

        let doctor = self.db.insert_doctor(NewDoctor {
            company_id: request.company_id.unwrap_or(self.default_company_id),
            full_name: full_name.to_string(),
            specialty: request.specialty,
        }).await;

        debug!("Doctor created with ID: {}", doctor.id);
        Ok(doctor)
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, DoctorError> {
        self.db.get_doctor(doctor_id).await.map_err(|_| DoctorError::NotFound(doctor_id))
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.db.list_doctors().await
    }
}
