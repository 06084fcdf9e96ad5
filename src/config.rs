use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Upstream provider settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            model: default_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Overlays `OPENAI_API_KEY`, `OPENAI_API_BASE` and `OPENAI_MODEL` when set.
    /// Empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(api_key) = get("OPENAI_API_KEY") {
            self.api_key = api_key;
        }
        if let Some(api_base) = get("OPENAI_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.model = model;
        }
        self
    }

    pub fn completions_url(&self) -> String {
        let path = "chat/completions";
        if self.api_base.ends_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: sk-test\nmodel: gpt-4o-mini").unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(Config::from_file("/nonexistent/gateway.yaml").is_err());
    }

    #[test]
    fn test_with_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_API_KEY", "sk-env"),
            ("OPENAI_API_BASE", "http://localhost:9999/v1"),
            ("OPENAI_MODEL", ""),
        ]);
        let config = Config::default().with_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_key, "sk-env");
        assert_eq!(config.api_base, "http://localhost:9999/v1");
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_completions_url() {
        let mut config = Config::default();
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
        config.api_base = "http://127.0.0.1:1234/".to_string();
        assert_eq!(config.completions_url(), "http://127.0.0.1:1234/chat/completions");
    }
}
