use anyhow::Context;
use shared::{parse_date, CreateYouthRequest, Youth, REQUIRED_FIELDS_MESSAGE};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::storage::YouthStorage;

#[derive(Debug, Error)]
pub enum CreateYouthError {
    #[error("{}", REQUIRED_FIELDS_MESSAGE)]
    MissingFields,

    #[error("Birthday must be a valid date (YYYY-MM-DD)")]
    InvalidBirthday,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Service for creating and listing youth records
#[derive(Clone)]
pub struct YouthService {
    storage: Arc<dyn YouthStorage>,
}

impl YouthService {
    pub fn new(storage: Arc<dyn YouthStorage>) -> Self {
        Self { storage }
    }

    /// Validate, trim and store a new youth under a fresh id
    pub async fn create_youth(&self, request: CreateYouthRequest) -> Result<Youth, CreateYouthError> {
        info!("Creating youth: {} {}", request.first_name, request.last_name);

        if request.has_blank_field() {
            warn!("Rejected youth with blank fields");
            return Err(CreateYouthError::MissingFields);
        }

        let birthday = parse_date(request.birthday.trim()).ok_or_else(|| {
            warn!("Rejected youth with invalid birthday {:?}", request.birthday);
            CreateYouthError::InvalidBirthday
        })?;

        let youth = Youth {
            id: Youth::generate_id(),
            user_id: request.user_id.trim().to_string(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            birthday: birthday.format("%Y-%m-%d").to_string(),
            address: request.address.trim().to_string(),
            education_level: request.education_level.trim().to_string(),
        };

        self.storage
            .store_youth(&youth)
            .await
            .context("Failed to store youth")?;

        info!("Created youth with ID: {}", youth.id);
        Ok(youth)
    }

    /// List all youth, unfiltered
    pub async fn list_youth(&self) -> anyhow::Result<Vec<Youth>> {
        let youths = self
            .storage
            .list_youth()
            .await
            .context("Failed to list youth")?;

        info!("Found {} youth", youths.len());
        Ok(youths)
    }
}
