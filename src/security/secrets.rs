//! API key storage for Studiocycle.
//!
//! Stores the generation service key in the operating system's native
//! credential storage:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet, etc.)
//!
//! # Security Features
//!
//! - Memory is zeroed when secrets are dropped (using zeroize)
//! - Secrets are never logged
//! - Environment variables override the stored key

#[cfg(feature = "secrets")]
use keyring::Entry;
#[cfg(feature = "secrets")]
use zeroize::Zeroize;

use std::fmt;
use thiserror::Error;

/// The service name used for keyring entries.
const SERVICE_NAME: &str = "studiocycle";

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Result type for secrets operations.
pub type SecretsResult<T> = Result<T, SecretsError>;

/// Errors that can occur during secrets operations.
#[derive(Debug, Error)]
pub enum SecretsError {
    /// Failed to access the system keychain.
    #[error("Failed to access system keychain: {0}")]
    KeychainAccess(String),

    /// Secret not found.
    #[error("Secret not found: {0}")]
    NotFound(String),

    /// Failed to store secret.
    #[error("Failed to store secret: {0}")]
    StoreFailed(String),

    /// Failed to delete secret.
    #[error("Failed to delete secret: {0}")]
    DeleteFailed(String),

    /// Invalid secret format.
    #[error("Invalid secret format: {0}")]
    InvalidFormat(String),

    /// Feature not available.
    #[error("Secrets feature not available - compile with 'secrets' feature")]
    FeatureNotAvailable,
}

/// A secret value that is zeroed on drop.
#[cfg(feature = "secrets")]
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue {
    value: String,
}

#[cfg(not(feature = "secrets"))]
#[derive(Clone)]
pub struct SecretValue {
    value: String,
}

impl SecretValue {
    /// Create a new secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    /// Get the secret value.
    ///
    /// Note: Use sparingly and ensure the value is not logged.
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Get the length of the secret.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Check if the secret is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Masked form for display: first four and last four characters.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

// Prevent accidental logging of secrets
impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue([REDACTED])")
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Where an API key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Environment variable
    Environment,
    /// OS keychain
    Keychain,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment ({GEMINI_API_KEY_ENV})"),
            Self::Keychain => write!(f, "system keychain"),
        }
    }
}

/// Manages the stored API key.
#[derive(Debug)]
pub struct SecretsManager {
    /// Service name for keyring entries.
    service: String,
}

impl Default for SecretsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretsManager {
    /// Keychain entry name for the Gemini key.
    const GEMINI_KEY: &'static str = "gemini_api_key";

    /// Create a new secrets manager.
    pub fn new() -> Self {
        Self { service: SERVICE_NAME.to_string() }
    }

    /// Create a secrets manager with a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }

    /// Store the Gemini API key in the system keychain.
    pub fn store_gemini_api_key(&self, secret: &SecretValue) -> SecretsResult<()> {
        if secret.is_blank() {
            return Err(SecretsError::InvalidFormat("API key is empty".to_string()));
        }
        self.store_with_key(Self::GEMINI_KEY, secret)
    }

    /// Remove the stored Gemini API key.
    pub fn delete_gemini_api_key(&self) -> SecretsResult<()> {
        self.delete_with_key(Self::GEMINI_KEY)
    }

    /// Get the Gemini API key from the environment or the keychain.
    pub fn get_gemini_api_key(&self) -> SecretsResult<(SecretValue, KeySource)> {
        if let Ok(value) = std::env::var(GEMINI_API_KEY_ENV) {
            if !value.trim().is_empty() {
                return Ok((SecretValue::new(value.trim()), KeySource::Environment));
            }
        }

        self.retrieve_with_key(Self::GEMINI_KEY).map(|secret| (secret, KeySource::Keychain))
    }

    /// Store a secret with a custom key.
    #[cfg(feature = "secrets")]
    pub fn store_with_key(&self, key: &str, secret: &SecretValue) -> SecretsResult<()> {
        let entry = Entry::new(&self.service, key)
            .map_err(|e| SecretsError::KeychainAccess(e.to_string()))?;

        entry.set_password(secret.expose()).map_err(|e| SecretsError::StoreFailed(e.to_string()))
    }

    /// Store a secret with a custom key.
    #[cfg(not(feature = "secrets"))]
    pub fn store_with_key(&self, _key: &str, _secret: &SecretValue) -> SecretsResult<()> {
        Err(SecretsError::FeatureNotAvailable)
    }

    /// Retrieve a secret with a custom key.
    #[cfg(feature = "secrets")]
    pub fn retrieve_with_key(&self, key: &str) -> SecretsResult<SecretValue> {
        let entry = Entry::new(&self.service, key)
            .map_err(|e| SecretsError::KeychainAccess(e.to_string()))?;

        let password = entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => SecretsError::NotFound(key.to_string()),
            other => SecretsError::KeychainAccess(other.to_string()),
        })?;

        Ok(SecretValue::new(password))
    }

    /// Retrieve a secret with a custom key.
    #[cfg(not(feature = "secrets"))]
    pub fn retrieve_with_key(&self, key: &str) -> SecretsResult<SecretValue> {
        Err(SecretsError::NotFound(key.to_string()))
    }

    /// Delete a secret with a custom key.
    #[cfg(feature = "secrets")]
    pub fn delete_with_key(&self, key: &str) -> SecretsResult<()> {
        let entry = Entry::new(&self.service, key)
            .map_err(|e| SecretsError::KeychainAccess(e.to_string()))?;

        entry.delete_credential().map_err(|e| match e {
            keyring::Error::NoEntry => SecretsError::NotFound(key.to_string()),
            other => SecretsError::DeleteFailed(other.to_string()),
        })
    }

    /// Delete a secret with a custom key.
    #[cfg(not(feature = "secrets"))]
    pub fn delete_with_key(&self, _key: &str) -> SecretsResult<()> {
        Err(SecretsError::FeatureNotAvailable)
    }
}
