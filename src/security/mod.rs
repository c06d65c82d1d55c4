//! Credential handling for the generation service.

pub mod secrets;

pub use secrets::{KeySource, SecretValue, SecretsError, SecretsManager, GEMINI_API_KEY_ENV};
