use crate::config::RunConfig;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::Config {
            message: format!("cannot read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays the values present in this file onto `config`.
    pub fn apply_to(&self, config: &mut RunConfig) -> Result<()> {
        if let Some(input) = &self.input {
            if let Some(path) = &input.path {
                config.input_path = path.clone();
            }
            if let Some(delimiter) = input.delimiter {
                config.delimiter = validation::validate_delimiter("input.delimiter", delimiter)?;
            }
        }
        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_ref()) {
            config.output_path = path.clone();
        }
        if let Some(monitoring) = &self.monitoring {
            config.monitor = monitoring.enabled;
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            if let Some(path) = &input.path {
                validation::validate_path("input.path", path)?;
            }
            if let Some(delimiter) = input.delimiter {
                validation::validate_delimiter("input.delimiter", delimiter)?;
            }
        }
        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_ref()) {
            validation::validate_path("output.path", path)?;
        }
        Ok(())
    }
}
