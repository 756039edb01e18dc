use crate::core::registry::{FundraiserRegistry, DEFAULT_AUTHORITY};
use crate::core::RegistrySettings;
use crate::domain::model::{Identity, NewFundraiser};
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub registry: RegistrySection,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub fundraisers: Vec<SeedFundraiser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySection {
    #[serde(default = "default_authority")]
    pub authority: String,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            authority: default_authority(),
        }
    }
}

fn default_authority() -> String {
    DEFAULT_AUTHORITY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFundraiser {
    pub name: String,
    pub url: String,
    pub image_url: String,
    pub description: String,
    pub beneficiary: String,
}

impl From<&SeedFundraiser> for NewFundraiser {
    fn from(seed: &SeedFundraiser) -> Self {
        NewFundraiser::new(
            seed.name.clone(),
            seed.url.clone(),
            seed.image_url.clone(),
            seed.description.clone(),
            Identity::new(seed.beneficiary.clone()),
        )
    }
}

impl RegistryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BENEFICIARY})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("registry.authority", &self.registry.authority).map_err(|_| {
            RegistryError::ConfigValidationError {
                field: "registry.authority".to_string(),
                message: "Authority cannot be empty".to_string(),
            }
        })?;

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(RegistryError::ConfigValidationError {
                    field: "logging.level".to_string(),
                    message: format!(
                        "Unsupported level '{}'. Valid levels: {}",
                        level,
                        valid_levels.join(", ")
                    ),
                });
            }
        }

        for (i, seed) in self.fundraisers.iter().enumerate() {
            let fields = [
                ("name", &seed.name),
                ("url", &seed.url),
                ("image_url", &seed.image_url),
                ("description", &seed.description),
                ("beneficiary", &seed.beneficiary),
            ];
            for (field, value) in fields {
                let field = format!("fundraisers[{}].{}", i, field);
                validate_non_empty_string(&field, value).map_err(|e| {
                    RegistryError::ConfigValidationError {
                        message: match e {
                            RegistryError::InvalidInput { reason, .. } => reason,
                            other => other.to_string(),
                        },
                        field,
                    }
                })?;
            }
        }

        Ok(())
    }

    /// Builds a registry owned by the configured authority and replays the seed list.
    pub fn build_registry(&self) -> Result<FundraiserRegistry> {
        let registry = FundraiserRegistry::from_settings(self);
        for seed in self.seeds() {
            registry.create_fundraiser(seed)?;
        }
        tracing::debug!(
            "Seeded {} fundraisers for {}",
            registry.fundraisers_count(),
            registry.authority()
        );
        Ok(registry)
    }

    pub fn seeds(&self) -> impl Iterator<Item = NewFundraiser> + '_ {
        self.fundraisers.iter().map(NewFundraiser::from)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl RegistrySettings for RegistryConfig {
    fn authority(&self) -> &str {
        &self.registry.authority
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
