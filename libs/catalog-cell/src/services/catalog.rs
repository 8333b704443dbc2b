use std::sync::Arc;

use tracing::debug;

use shared_database::Database;
use shared_models::{NewService, Service, ServiceChanges};
use shared_utils::AppState;

use crate::models::{CatalogError, CreateServiceRequest, UpdateServiceRequest, MAX_DURATION_MINUTES};

pub struct CatalogService {
    db: Arc<Database>,
    default_company_id: i64,
}

impl CatalogService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            default_company_id: state.config.default_company_id,
        }
    }

    pub async fn create_service(&self, request: CreateServiceRequest) -> Result<Service, CatalogError> {
        let name = validate_name(&request.name)?;
        validate_duration(request.duration_minutes)?;
        validate_price(request.price)?;

        let service = self.db.insert_service(NewService {
            company_id: request.company_id.unwrap_or(self.default_company_id),
            name,
            duration_minutes: request.duration_minutes,
            price: request.price,
        }).await;

        debug!("Service {} created ({} min)", service.id, service.duration_minutes);
        Ok(service)
    }

    pub async fn get_service(&self, service_id: i64) -> Result<Service, CatalogError> {
        self.db.get_service(service_id).await.map_err(|_| CatalogError::NotFound(service_id))
    }

    pub async fn list_services(&self) -> Vec<Service> {
        self.db.list_services().await
    }

    pub async fn update_service(&self, service_id: i64, request: UpdateServiceRequest) -> Result<Service, CatalogError> {
        let name = request.name.as_deref().map(validate_name).transpose()?;
        if let Some(duration) = request.duration_minutes {
            validate_duration(duration)?;
        }
        validate_price(request.price)?;

        let service = self.db.update_service(service_id, ServiceChanges {
            name,
            duration_minutes: request.duration_minutes,
            price: request.price,
            is_active: request.is_active,
        }).await.map_err(|_| CatalogError::NotFound(service_id))?;

        debug!("Service {} updated", service_id);
        Ok(service)
    }
}

fn validate_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::ValidationError("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn validate_duration(duration_minutes: u32) -> Result<(), CatalogError> {
    if duration_minutes == 0 || duration_minutes > MAX_DURATION_MINUTES {
        return Err(CatalogError::ValidationError(format!(
            "duration_minutes must be between 1 and {}", MAX_DURATION_MINUTES
        )));
    }
    Ok(())
}

fn validate_price(price: Option<f64>) -> Result<(), CatalogError> {
    match price {
        Some(price) if !price.is_finite() || price < 0.0 => {
            Err(CatalogError::ValidationError("price must be a non-negative amount".to_string()))
        }
        _ => Ok(()),
    }
}
