use crate::{ConfigError, FshConfig};
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/fsh/fsh.yaml"));
        }
        search_paths.push(PathBuf::from("./fsh.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/fsh/fsh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn load(&self) -> Result<FshConfig, ConfigError> {
        let mut config = FshConfig::default();

        if let Ok(env_path) = std::env::var("FSH_CONFIG") {
            let content =
                std::fs::read_to_string(&env_path).map_err(|e| ConfigError::ReadFile {
                    path: PathBuf::from(&env_path),
                    source: e,
                })?;
            config = self.parse_yaml(&content)?;
        } else if let Some(ref explicit) = self.explicit_file {
            let content = std::fs::read_to_string(explicit).map_err(|e| ConfigError::ReadFile {
                path: explicit.clone(),
                source: e,
            })?;
            config = self.parse_yaml(&content)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    if let Ok(content) = std::fs::read_to_string(path) {
                        debug!(path = %path.display(), "loading config file");
                        config = self.merge_yaml(&config, &content)?;
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config);
        Ok(config)
    }

    fn parse_yaml(&self, content: &str) -> Result<FshConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &FshConfig, content: &str) -> Result<FshConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        let overlay: FshConfig = serde_yaml::from_str(&expanded)?;
        Ok(self.merge_configs(base, &overlay))
    }

    fn merge_configs(&self, base: &FshConfig, overlay: &FshConfig) -> FshConfig {
        let mut result = base.clone();
        let defaults = FshConfig::default();

        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt = overlay.shell.prompt.clone();
        }
        if overlay.shell.history.file != defaults.shell.history.file
            || overlay.shell.history.max_entries != defaults.shell.history.max_entries
            || overlay.shell.history.enabled != defaults.shell.history.enabled
        {
            result.shell.history = overlay.shell.history.clone();
        }
        if overlay.logging.level != defaults.logging.level {
            result.logging.level = overlay.logging.level;
        }
        if !overlay.logging.filter.is_empty() {
            result.logging.filter = overlay.logging.filter.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut FshConfig) {
        if let Ok(prompt) = std::env::var("FSH_PROMPT") {
            if !prompt.is_empty() {
                config.shell.prompt = prompt;
            }
        }
        if let Ok(file) = std::env::var("FSH_HISTORY_FILE") {
            if !file.is_empty() {
                config.shell.history.file = file;
            }
        }
        if let Ok(level) = std::env::var("FSH_LOG_LEVEL") {
            if let Ok(l) = serde_yaml::from_str(&level) {
                config.logging.level = l;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_env_vars_works() {
        std::env::set_var("FSH_TEST_VAR_123", "hello");
        let loader = ConfigLoader::new();
        let result = loader.expand_env_vars("value: ${FSH_TEST_VAR_123}");
        assert_eq!(result, "value: hello");
        std::env::remove_var("FSH_TEST_VAR_123");
    }

    #[test]
    fn missing_env_var_becomes_empty() {
        let loader = ConfigLoader::new();
        let result = loader.expand_env_vars("value: ${NONEXISTENT_VAR_XYZ}");
        assert_eq!(result, "value: ");
    }

    #[test]
    fn env_overrides_config() {
        std::env::set_var("FSH_HISTORY_FILE", "/tmp/fsh_test_history");
        let mut config = FshConfig::default();
        let loader = ConfigLoader::new();
        loader.apply_env_overrides(&mut config);
        assert_eq!(config.shell.history.file, "/tmp/fsh_test_history");
        std::env::remove_var("FSH_HISTORY_FILE");
    }

    #[test]
    fn merge_keeps_base_for_default_overlay_fields() {
        let loader = ConfigLoader::new();
        let mut base = FshConfig::default();
        base.shell.prompt = "custom> ".to_string();

        let overlay = FshConfig::default();
        let merged = loader.merge_configs(&base, &overlay);
        assert_eq!(merged.shell.prompt, "custom> ");
    }

    #[test]
    fn load_explicit_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            "shell:\n  prompt: \"[{{cwd}}] \"\n  history:\n    enabled: false"
        )
        .expect("write temp file");

        let loader = ConfigLoader::new().with_file(file.path().to_str().unwrap());
        let config = loader.load().expect("load config");
        assert_eq!(config.shell.prompt, "[{cwd}] ");
        assert!(!config.shell.history.enabled);
    }
}
