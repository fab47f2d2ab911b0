use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

/// Model used for every modality unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default upload ceiling (20MB) for multipart endpoints.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub provider: ProviderKind,
    pub google: GoogleConfig,
    pub limits: LimitsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

/// Which model capability backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown GENAI_PROVIDER '{}', expected 'gemini' or 'mock'",
                other
            ))),
        }
    }
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider: ProviderKind = get_env("GENAI_PROVIDER", Some("gemini"), false)?.parse()?;

        // The mock provider never talks to Google, so a key is optional there.
        let api_key = match provider {
            ProviderKind::Gemini => get_env("GEMINI_API_KEY", None, is_prod)?,
            ProviderKind::Mock => get_env("GEMINI_API_KEY", Some(""), is_prod)?,
        };

        let max_upload_bytes = get_env(
            "GATEWAY_MAX_UPLOAD_BYTES",
            Some(&DEFAULT_MAX_UPLOAD_BYTES.to_string()),
            false,
        )?
        .parse()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "GATEWAY_MAX_UPLOAD_BYTES must be a byte count: {}",
                e
            ))
        })?;

        Ok(GatewayConfig {
            common: common_config,
            provider,
            google: GoogleConfig {
                api_key,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_API_BASE), false)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL), false)?,
            },
            limits: LimitsConfig { max_upload_bytes },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
