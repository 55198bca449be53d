//! Configuration for the content pipeline.
//!
//! Credentials are read once from environment variables at construction:
//! - `OPENAI_API_KEY` - OpenAI credential (chat + image models).
//! - `ANTHROPIC_API_KEY` - Anthropic credential.
//! - `GOOGLE_AI_API_KEY` - Google AI credential.
//!
//! The pipeline starts in simulation mode. `enable_real_mode` switches every
//! capability to its configured real model after validating the provider
//! credential and the per-capability model allowlists. No network calls are
//! made during validation.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chat models accepted for the research and writing capabilities.
pub const SUPPORTED_CHAT_MODELS: &[&str] = &["gpt-4-1106-preview", "gpt-4", "gpt-3.5-turbo"];

/// Image models accepted for the image capability.
pub const SUPPORTED_IMAGE_MODELS: &[&str] = &["dall-e-3", "dall-e-2"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no valid API key found for provider '{0}'")]
    InvalidCredential(Provider),

    #[error("no model specified for {0} configuration")]
    MissingModel(Capability),

    #[error("unsupported model '{model}' for {capability}; supported models: {supported}")]
    UnsupportedModel {
        capability: Capability,
        model: String,
        supported: String,
    },
}

/// Supported AI providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
}

impl Provider {
    /// All providers, in credential-lookup order.
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Google];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Google => "GOOGLE_AI_API_KEY",
        }
    }

    /// Accepted key prefixes. An empty list means no prefix requirement.
    fn key_prefixes(&self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["sk-", "org-"],
            Provider::Anthropic => &["sk-ant-"],
            Provider::Google => &[],
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three pipeline capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Research,
    Writing,
    Image,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::Research, Capability::Writing, Capability::Image];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Research => "research",
            Capability::Writing => "writing",
            Capability::Image => "image",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image dimensions accepted by the image capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1792")]
    Portrait,
    #[serde(rename = "1792x1024")]
    Landscape,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Portrait => "1024x1792",
            ImageSize::Landscape => "1792x1024",
        }
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1024x1024" => Ok(ImageSize::Square),
            "1024x1792" => Ok(ImageSize::Portrait),
            "1792x1024" => Ok(ImageSize::Landscape),
            other => Err(format!(
                "size must be one of 1024x1024, 1024x1792, 1792x1024, got '{other}'"
            )),
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image quality accepted by the image capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

impl FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ImageQuality::Standard),
            "hd" => Ok(ImageQuality::Hd),
            other => Err(format!("quality must be one of standard, hd, got '{other}'")),
        }
    }
}

impl std::fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation parameters, by model family.
#[derive(Debug, Clone, Copy)]
pub enum GenerationParams {
    Chat {
        max_completion_tokens: u64,
        temperature: f64,
    },
    Image {
        size: ImageSize,
        quality: ImageQuality,
    },
}

/// Settings for a single capability.
#[derive(Debug, Clone)]
pub struct CapabilityConfig {
    /// Model identifier used in real mode.
    pub model: String,
    /// When true, output comes from the deterministic templater.
    pub simulation_mode: bool,
    /// Generation parameters matching the model family.
    pub params: GenerationParams,
}

impl CapabilityConfig {
    fn chat(model: &str, max_completion_tokens: u64, temperature: f64) -> Self {
        Self {
            model: model.to_string(),
            simulation_mode: true,
            params: GenerationParams::Chat {
                max_completion_tokens,
                temperature,
            },
        }
    }

    fn image(model: &str, size: ImageSize, quality: ImageQuality) -> Self {
        Self {
            model: model.to_string(),
            simulation_mode: true,
            params: GenerationParams::Image { size, quality },
        }
    }

    /// Token limit and temperature, when this is a chat capability.
    pub fn chat_params(&self) -> Option<(u64, f64)> {
        match self.params {
            GenerationParams::Chat {
                max_completion_tokens,
                temperature,
            } => Some((max_completion_tokens, temperature)),
            GenerationParams::Image { .. } => None,
        }
    }

    /// Size and quality, when this is an image capability.
    pub fn image_params(&self) -> Option<(ImageSize, ImageQuality)> {
        match self.params {
            GenerationParams::Image { size, quality } => Some((size, quality)),
            GenerationParams::Chat { .. } => None,
        }
    }

    /// Human-readable model description for progress logs.
    ///
    /// Temperature is omitted for models that do not accept one (o4-mini
    /// family).
    pub fn model_info(&self) -> String {
        if self.simulation_mode {
            return format!("Simulation Mode (production: {})", self.model);
        }
        match self.params {
            GenerationParams::Chat { temperature, .. } if !self.model.contains("o4-mini") => {
                format!("{} @ {} temp", self.model, temperature)
            }
            _ => self.model.clone(),
        }
    }
}

/// Capability-keyed configuration table for one pipeline process.
///
/// Constructed once at startup, then passed by reference to every agent call.
/// The only mutation is `enable_real_mode`, which re-validates the whole
/// table before taking effect.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    research: CapabilityConfig,
    writing: CapabilityConfig,
    image: CapabilityConfig,
    credentials: HashMap<Provider, String>,
    active_provider: Option<Provider>,
}

impl PipelineConfig {
    /// Build the default configuration, reading provider credentials from the
    /// environment. Starts in simulation mode for every capability.
    pub fn from_env() -> Self {
        let mut credentials = HashMap::new();
        for provider in Provider::ALL {
            if let Ok(key) = std::env::var(provider.env_var()) {
                credentials.insert(provider, key);
            }
        }
        Self::with_credentials(credentials)
    }

    /// Build the default configuration with an explicit credential map
    /// (useful for testing).
    pub fn with_credentials(credentials: HashMap<Provider, String>) -> Self {
        Self {
            research: CapabilityConfig::chat("gpt-4-1106-preview", 1500, 0.3),
            writing: CapabilityConfig::chat("gpt-4-1106-preview", 2000, 0.7),
            image: CapabilityConfig::image("dall-e-3", ImageSize::Square, ImageQuality::Standard),
            credentials,
            active_provider: None,
        }
    }

    /// Settings for a capability.
    pub fn get(&self, capability: Capability) -> &CapabilityConfig {
        match capability {
            Capability::Research => &self.research,
            Capability::Writing => &self.writing,
            Capability::Image => &self.image,
        }
    }

    /// The provider real mode was enabled for, if any.
    pub fn active_provider(&self) -> Option<Provider> {
        self.active_provider
    }

    /// The stored credential for a provider, if one was present at
    /// construction.
    pub fn credential(&self, provider: Provider) -> Option<&str> {
        self.credentials.get(&provider).map(String::as_str)
    }

    /// Whether a provider has a credential that passes the format check:
    /// minimum length plus the provider-specific prefix.
    pub fn has_valid_credential(&self, provider: Provider) -> bool {
        match self.credential(provider) {
            Some(key) => credential_is_valid(provider, key),
            None => false,
        }
    }

    /// Switch every capability to its configured real model.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidCredential` if the provider has no credential or
    /// the credential fails the format check. `ConfigError::UnsupportedModel`
    /// if any capability names a model outside its allowlist. On error the
    /// configuration is left unchanged.
    pub fn enable_real_mode(&mut self, provider: Provider) -> Result<(), ConfigError> {
        if !self.has_valid_credential(provider) {
            return Err(ConfigError::InvalidCredential(provider));
        }
        for capability in Capability::ALL {
            validate_model(capability, self.get(capability))?;
        }
        self.active_provider = Some(provider);
        self.research.simulation_mode = false;
        self.writing.simulation_mode = false;
        self.image.simulation_mode = false;
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_credentials(HashMap::new())
    }
}

fn credential_is_valid(provider: Provider, key: &str) -> bool {
    if key.len() < 20 {
        return false;
    }
    let prefixes = provider.key_prefixes();
    prefixes.is_empty() || prefixes.iter().any(|p| key.starts_with(p))
}

fn validate_model(capability: Capability, config: &CapabilityConfig) -> Result<(), ConfigError> {
    if config.model.is_empty() {
        return Err(ConfigError::MissingModel(capability));
    }
    let supported = match config.params {
        GenerationParams::Chat { .. } => SUPPORTED_CHAT_MODELS,
        GenerationParams::Image { .. } => SUPPORTED_IMAGE_MODELS,
    };
    if !supported.contains(&config.model.as_str()) {
        return Err(ConfigError::UnsupportedModel {
            capability,
            model: config.model.clone(),
            supported: supported.join(", "),
        });
    }
    Ok(())
}

/// Parse an environment variable as a boolean flag.
///
/// Recognises `1`, `true`, `yes`, `y`, `on` (case-insensitive) as `true`;
/// everything else (including unset) maps to `false`.
pub fn env_flag(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) => matches!(
            value.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        ),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_openai_key(key: &str) -> PipelineConfig {
        let mut credentials = HashMap::new();
        credentials.insert(Provider::OpenAi, key.to_string());
        PipelineConfig::with_credentials(credentials)
    }

    #[test]
    fn defaults_start_in_simulation_mode() {
        let config = PipelineConfig::default();
        for capability in Capability::ALL {
            assert!(config.get(capability).simulation_mode);
        }
        assert!(config.active_provider().is_none());
    }

    #[test]
    fn missing_credential_is_invalid() {
        let config = PipelineConfig::default();
        assert!(!config.has_valid_credential(Provider::OpenAi));
    }

    #[test]
    fn short_credential_is_rejected() {
        let config = config_with_openai_key("sk-short");
        assert!(!config.has_valid_credential(Provider::OpenAi));
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let config = config_with_openai_key("pk-0123456789abcdef0123456789");
        assert!(!config.has_valid_credential(Provider::OpenAi));
    }

    #[test]
    fn valid_openai_credential_passes_format_check() {
        let config = config_with_openai_key("sk-0123456789abcdef0123456789");
        assert!(config.has_valid_credential(Provider::OpenAi));
    }

    #[test]
    fn anthropic_prefix_is_enforced() {
        let mut credentials = HashMap::new();
        credentials.insert(Provider::Anthropic, "sk-0123456789abcdef0123456789".to_string());
        let config = PipelineConfig::with_credentials(credentials);
        assert!(!config.has_valid_credential(Provider::Anthropic));

        let mut credentials = HashMap::new();
        credentials.insert(
            Provider::Anthropic,
            "sk-ant-REDACTED".to_string(),
        );
        let config = PipelineConfig::with_credentials(credentials);
        assert!(config.has_valid_credential(Provider::Anthropic));
    }

    #[test]
    fn enable_real_mode_without_credential_fails() {
        let mut config = PipelineConfig::default();
        let err = config.enable_real_mode(Provider::OpenAi).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCredential(Provider::OpenAi)));
        assert!(config.get(Capability::Research).simulation_mode);
    }

    #[test]
    fn enable_real_mode_flips_all_capabilities() {
        let mut config = config_with_openai_key("sk-0123456789abcdef0123456789");
        config.enable_real_mode(Provider::OpenAi).unwrap();
        for capability in Capability::ALL {
            assert!(!config.get(capability).simulation_mode);
        }
        assert_eq!(config.active_provider(), Some(Provider::OpenAi));
    }

    #[test]
    fn enable_real_mode_rejects_unsupported_model() {
        let mut config = config_with_openai_key("sk-0123456789abcdef0123456789");
        config.writing.model = "gpt-imaginary".to_string();
        let err = config.enable_real_mode(Provider::OpenAi).unwrap_err();
        match err {
            ConfigError::UnsupportedModel { capability, model, .. } => {
                assert_eq!(capability, Capability::Writing);
                assert_eq!(model, "gpt-imaginary");
            }
            other => panic!("unexpected error: {other}"),
        }
        // The failed mutation must leave the table untouched.
        assert!(config.get(Capability::Research).simulation_mode);
        assert!(config.active_provider().is_none());
    }

    #[test]
    fn image_size_parses_wire_strings() {
        assert_eq!("1024x1024".parse::<ImageSize>().unwrap(), ImageSize::Square);
        assert_eq!("1792x1024".parse::<ImageSize>().unwrap(), ImageSize::Landscape);
        assert!("640x480".parse::<ImageSize>().is_err());
        assert_eq!("hd".parse::<ImageQuality>().unwrap(), ImageQuality::Hd);
        assert!("ultra".parse::<ImageQuality>().is_err());
    }

    #[test]
    fn model_info_reflects_mode() {
        let mut config = config_with_openai_key("sk-0123456789abcdef0123456789");
        assert_eq!(
            config.get(Capability::Research).model_info(),
            "Simulation Mode (production: gpt-4-1106-preview)"
        );
        config.enable_real_mode(Provider::OpenAi).unwrap();
        assert_eq!(
            config.get(Capability::Research).model_info(),
            "gpt-4-1106-preview @ 0.3 temp"
        );
        assert_eq!(config.get(Capability::Image).model_info(), "dall-e-3");
    }
}
