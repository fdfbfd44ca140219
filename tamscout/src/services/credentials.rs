use std::sync::Arc;

use serde::Serialize;

use crate::db::SettingsStore;
use crate::error::{Result, ScoutError};

/// Settings key holding a user-supplied provider API key.
pub const PROVIDER_API_KEY_SETTING: &str = "provider_api_key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    Environment,
    Settings,
}

/// What the settings endpoints report about the active key. Never the key itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatus {
    pub configured: bool,
    pub source: Option<CredentialSource>,
    pub masked_key: Option<String>,
}

/// Picks the provider API key: environment first, then the settings table.
pub struct CredentialResolver<S: SettingsStore + ?Sized> {
    env_key: Option<String>,
    store: Arc<S>,
}

impl<S: SettingsStore + ?Sized> CredentialResolver<S> {
    pub fn new(env_key: Option<String>, store: Arc<S>) -> Self {
        Self {
            env_key: env_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            store,
        }
    }

    async fn active(&self) -> Result<Option<(String, CredentialSource)>> {
        if let Some(key) = &self.env_key {
            return Ok(Some((key.clone(), CredentialSource::Environment)));
        }

        let stored = self
            .store
            .get_setting(PROVIDER_API_KEY_SETTING)
            .await?
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(stored.map(|k| (k, CredentialSource::Settings)))
    }

    pub async fn resolve(&self) -> Result<String> {
        self.active()
            .await?
            .map(|(key, _)| key)
            .ok_or(ScoutError::MissingCredential)
    }

    pub async fn status(&self) -> Result<CredentialStatus> {
        Ok(match self.active().await? {
            Some((key, source)) => CredentialStatus {
                configured: true,
                source: Some(source),
                masked_key: Some(mask_key(&key)),
            },
            None => CredentialStatus {
                configured: false,
                source: None,
                masked_key: None,
            },
        })
    }

    /// Stores a key in settings. An environment key still takes precedence.
    pub async fn store(&self, key: &str) -> Result<CredentialStatus> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ScoutError::Validation("API key must not be empty".to_string()));
        }

        self.store.set_setting(PROVIDER_API_KEY_SETTING, key).await?;
        if self.env_key.is_some() {
            tracing::warn!("Stored provider API key is shadowed by KEYWORDS_API_KEY");
        }
        self.status().await
    }

    pub async fn clear(&self) -> Result<bool> {
        self.store.delete_setting(PROVIDER_API_KEY_SETTING).await
    }
}

/// Keeps the last four characters visible, e.g. `****c0de`.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len().max(4));
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
}
