use crate::models::ModelTier;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_STANDARD_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_PRO_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    pub base_url: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub text_model: String,
    pub standard_image_model: String,
    pub pro_image_model: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            standard_image_model: DEFAULT_STANDARD_IMAGE_MODEL.to_string(),
            pro_image_model: DEFAULT_PRO_IMAGE_MODEL.to_string(),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from `STUDIO_*` variables; anything unset keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout_secs = env::var("STUDIO_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        StudioConfig {
            base_url: env::var("STUDIO_BASE_URL").unwrap_or(defaults.base_url),
            api_key_env: env::var("STUDIO_API_KEY_ENV").unwrap_or(defaults.api_key_env),
            timeout_secs,
            text_model: env::var("STUDIO_TEXT_MODEL").unwrap_or(defaults.text_model),
            standard_image_model: env::var("STUDIO_STANDARD_MODEL")
                .unwrap_or(defaults.standard_image_model),
            pro_image_model: env::var("STUDIO_PRO_MODEL").unwrap_or(defaults.pro_image_model),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = name.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_models(
        mut self,
        standard: impl Into<String>,
        pro: impl Into<String>,
    ) -> Self {
        self.standard_image_model = standard.into();
        self.pro_image_model = pro.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn image_model(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.standard_image_model,
            ModelTier::Pro => &self.pro_image_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_selects_image_model() {
        let config = StudioConfig::new();
        assert_eq!(config.image_model(ModelTier::Standard), DEFAULT_STANDARD_IMAGE_MODEL);
        assert_eq!(config.image_model(ModelTier::Pro), DEFAULT_PRO_IMAGE_MODEL);

        let config = config.with_image_models("std-x", "pro-x");
        assert_eq!(config.image_model(ModelTier::Pro), "pro-x");
    }
}
