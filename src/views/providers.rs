//! Provider settings view state.
//!
//! Credential rows sorted by provider name. Keys are validated non-blank
//! locally; the plaintext only ever travels in the PUT body and the view
//! re-reads the redacted server state afterwards.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{ProviderKeyUpdate, ProviderSetting};

use super::ValidationError;

pub struct ProvidersView {
    client: Arc<ApiClient>,
    pub settings: Vec<ProviderSetting>,
}

impl ProvidersView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            settings: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let mut settings = self.client.provider_settings().await?;
        settings.sort_by(|a, b| a.provider.cmp(&b.provider));
        self.settings = settings;
        Ok(())
    }

    /// Store a key (already validated via [`key_update`]), then refresh.
    pub async fn save_key(
        &mut self,
        provider: &str,
        update: &ProviderKeyUpdate,
    ) -> Result<(), ClientError> {
        self.client.put_provider_key(provider, update).await?;
        self.refresh().await
    }

    pub async fn remove_key(&mut self, provider: &str) -> Result<(), ClientError> {
        self.client.delete_provider_key(provider).await?;
        self.refresh().await
    }
}

/// Build a key update, rejecting a blank key before any request.
pub fn key_update(key: &str) -> Result<ProviderKeyUpdate, ValidationError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::ApiKeyEmpty);
    }
    Ok(ProviderKeyUpdate {
        api_key: trimmed.to_string(),
    })
}
