//! fsh Configuration System
//!
//! Provides YAML-based configuration for the fsh shell.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/fsh/fsh.yaml` (system-wide)
//! 3. `~/.config/fsh/fsh.yaml` (user)
//! 4. `./fsh.yaml` (project-local)
//! 5. `FSH_CONFIG=/path/to/config.yaml` (explicit)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   prompt: "{cwd} > "
//!   history:
//!     enabled: true
//!     file: "~/.fsh_history"
//!     max_entries: 10000
//!
//! logging:
//!   level: warn
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<FshConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<FshConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FshConfig::default();
        assert_eq!(config.shell.prompt, "{cwd} > ");
        assert!(config.shell.history.enabled);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = r#"
shell:
  prompt: "$ "
"#;
        let config: FshConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.prompt, "$ ");
        assert_eq!(config.shell.history.max_entries, 10000); // default
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
shell:
  prompt: "fsh {cwd} % "
  history:
    enabled: false
    file: "/tmp/history"
    max_entries: 500

logging:
  level: debug
  filter: "fsh=trace"
"#;
        let config: FshConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.prompt, "fsh {cwd} % ");
        assert!(!config.shell.history.enabled);
        assert_eq!(config.shell.history.max_entries, 500);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.directive(), "fsh=trace");
    }

    #[test]
    fn history_path_expands_tilde() {
        let config = FshConfig::default();
        let path = config.shell.history.path();
        assert!(path.is_absolute() || !path.starts_with("~"));
        assert!(path.to_string_lossy().ends_with(".fsh_history"));
    }
}
