// Shortcuts Config Parser - TOML with Serde
// Loads shortcut bindings from TOML files

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::action::EventAction;
use crate::platform::Platform;
use crate::service::ShortcutService;

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Binding for command '{0}' has an empty key combination")]
    EmptyCombination(String),

    #[error("Binding for keys '{0}' has an empty command")]
    EmptyCommand(String),
}

/// Root TOML table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    general: Option<GeneralConfig>,

    #[serde(default)]
    binding: Vec<BindingEntry>,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeneralConfig {
    /// Platform name override, e.g. "MacIntel"
    platform: Option<String>,
}

/// One `[[binding]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingEntry {
    /// Combination string, e.g. "mod+s"
    pub keys: String,
    /// Label reported when the binding fires
    pub command: String,
    /// Optional explicit event phase
    #[serde(default)]
    pub action: Option<EventAction>,
}

/// Shortcut bindings loaded from a file
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Platform name from `[general]`, if any
    pub platform: Option<String>,
    /// Bindings in file order
    pub bindings: Vec<BindingEntry>,
}

impl Config {
    /// Parse a TOML bindings file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse bindings from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        for entry in &toml_config.binding {
            if entry.keys.trim().is_empty() {
                return Err(ConfigError::EmptyCombination(entry.command.clone()));
            }
            if entry.command.trim().is_empty() {
                return Err(ConfigError::EmptyCommand(entry.keys.clone()));
            }
        }

        log::debug!("Parsed {} bindings from config", toml_config.binding.len());

        Ok(Self {
            platform: toml_config.general.and_then(|g| g.platform),
            bindings: toml_config.binding,
        })
    }

    /// Default bindings file location (~/.config/shortcuts/bindings.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("shortcuts").join("bindings.toml"))
    }

    /// Load from the default location, or an empty config if the file is absent
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        Ok(Self::default())
    }

    /// Platform to build the service for: `override_name` first, then the
    /// file's `[general] platform`, then the host
    pub fn resolve_platform(&self, override_name: Option<&str>) -> Platform {
        override_name
            .or(self.platform.as_deref())
            .map(Platform::new)
            .unwrap_or_else(Platform::host)
    }

    /// Bind every entry on `service`; each callback reports its command
    /// through `on_fire`.
    pub fn apply<F>(&self, service: &ShortcutService, on_fire: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let on_fire = Arc::new(on_fire);
        for entry in &self.bindings {
            let on_fire = Arc::clone(&on_fire);
            let command = entry.command.clone();
            service.bind(&entry.keys, move || on_fire(&command), entry.action);
        }
        log::info!("Applied {} bindings", self.bindings.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventBus, RawKeyEvent};
    use parking_lot::Mutex;

    const SAMPLE: &str = r#"
        [general]
        platform = "MacIntel"

        [[binding]]
        keys = "mod+s"
        command = "save"

        [[binding]]
        keys = "esc"
        command = "close"
        action = "up"

        [[binding]]
        keys = "shift+2"
        command = "mention"
        action = "keydown"
    "#;

    #[test]
    fn test_config_parse() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(config.platform.as_deref(), Some("MacIntel"));
        assert_eq!(config.bindings.len(), 3);
        assert_eq!(config.bindings[0].keys, "mod+s");
        assert_eq!(config.bindings[0].action, None);
        assert_eq!(config.bindings[1].action, Some(EventAction::Up));
        assert_eq!(config.bindings[2].action, Some(EventAction::Down));
    }

    #[test]
    fn test_config_empty() {
        let config = Config::from_toml("").unwrap();
        assert!(config.platform.is_none());
        assert!(config.bindings.is_empty());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let toml = r#"
            [[binding]]
            keys = "a"
            command = "x"
            repeat = true
        "#;
        let result = Config::from_toml(toml);
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_config_rejects_bad_action() {
        let toml = r#"
            [[binding]]
            keys = "a"
            command = "x"
            action = "hold"
        "#;
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_config_empty_combination() {
        let toml = r#"
            [[binding]]
            keys = "   "
            command = "nothing"
        "#;
        let err = Config::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCombination(ref c) if c == "nothing"));
        assert!(err.to_string().contains("empty key combination"));
    }

    #[test]
    fn test_config_empty_command() {
        let toml = r#"
            [[binding]]
            keys = "a"
            command = ""
        "#;
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::EmptyCommand(_))
        ));
    }

    #[test]
    fn test_resolve_platform() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert!(config.resolve_platform(None).is_apple());
        assert!(!config.resolve_platform(Some("Win32")).is_apple());
        assert_eq!(
            Config::default().resolve_platform(None),
            Platform::host()
        );
    }

    #[test]
    fn test_apply_binds_and_reports_commands() {
        let config = Config::from_toml(SAMPLE).unwrap();
        let mut bus = EventBus::new();
        let service = ShortcutService::new(&mut bus, &config.resolve_platform(None));

        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        config.apply(&service, move |command| sink.lock().push(command.to_string()));
        assert_eq!(service.binding_count(), 3);

        use crate::modifier::Modifier;
        bus.dispatch(&RawKeyEvent::down("s").with_modifier(Modifier::Meta));
        bus.dispatch(&RawKeyEvent::down("Escape"));
        bus.dispatch(&RawKeyEvent::up("Escape"));
        bus.dispatch(&RawKeyEvent::down("@").with_modifier(Modifier::Shift));

        assert_eq!(*fired.lock(), vec!["save", "close", "mention"]);
    }

    #[test]
    fn test_from_toml_path_missing_file() {
        let result = Config::from_toml_path("/nonexistent/shortcuts/bindings.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
