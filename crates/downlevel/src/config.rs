//! Build configuration.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;

/// Config file names looked up in a project root, in order.
pub const CONFIG_FILES: [&str; 2] = ["downlevel.toml", "downlevel.json"];

/// Prefix for environment overrides, e.g. `DOWNLEVEL_TARGET=es2017`.
pub const ENV_PREFIX: &str = "DOWNLEVEL_";

/// Options shared by every unit of a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Raw deployment target: `false`, a token string such as `"es2018"`,
    /// or a list of tokens. Left as raw JSON so the resolver can report
    /// exactly what it was given. An absent target disables lowering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,

    /// Worker threads for unit processing; defaults to the available
    /// parallelism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<usize>,
}

impl BuildConfig {
    pub fn new(target: impl Into<Value>) -> Self {
        Self {
            target: Some(target.into()),
            parallelism: None,
        }
    }

    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Load configuration for a project root.
    /// Priority: environment variables > config file > defaults
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let file = CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.exists());
        Self::extract(file)
    }

    /// Load configuration from an explicit file (TOML, or JSON by extension).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::extract(Some(path.to_path_buf()))
    }

    fn extract(file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = file {
            debug!(path = %path.display(), "loading build config");
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            figment = if is_json {
                figment.merge(Json::file(path))
            } else {
                figment.merge(Toml::file(path))
            };
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            },
            value: e.kind.to_string(),
            hint: "Check downlevel.toml / downlevel.json syntax and field types".to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallelism == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "parallelism".to_string(),
                value: "0".to_string(),
                hint: "Use at least one worker thread, or omit it to use all cores".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialization() {
        let config = BuildConfig::new(json!(["chrome120", "safari16"])).with_parallelism(4);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({ "target": ["chrome120", "safari16"], "parallelism": 4 })
        );

        // skip_serializing_if
        let value = serde_json::to_value(BuildConfig::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_validation() {
        assert!(BuildConfig::default().validate().is_ok());
        assert!(BuildConfig::new(false).with_parallelism(1).validate().is_ok());

        let err = BuildConfig::new(false)
            .with_parallelism(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "parallelism"));
    }
}
