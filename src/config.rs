//! Shim configuration
//!
//! Loaded from TOML. A missing file is not an error: the shim falls back to
//! the defaults below so it always starts. A file that exists but does not
//! parse or validate is reported, because silently ignoring it would hide a
//! typo in a binding.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::controller::ButtonType;
use crate::mapping::{CommandBindings, MovementSettings};

pub const CONFIG_ENV_VAR: &str = "PADSHIM_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub stick_deadzone: f32,
    pub trigger_deadzone: f32,
    pub look_sensitivity: f32,
    pub invert_look: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        let settings = MovementSettings::default();
        Self {
            stick_deadzone: settings.stick_deadzone,
            trigger_deadzone: settings.trigger_deadzone,
            look_sensitivity: settings.look_sensitivity,
            invert_look: settings.invert_look,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CommandsConfig {
    pub queue_capacity: usize,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1000,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ShimConfig {
    pub input: InputConfig,
    pub commands: CommandsConfig,
    /// Button name to console command
    pub bindings: BTreeMap<String, String>,
}

impl Default for ShimConfig {
    fn default() -> Self {
        let bindings = [
            ("A", "+jump"),
            ("B", "+movedown"),
            ("X", "+use"),
            ("Y", "impulse 10"),
            ("RightBumper", "+attack"),
            ("LeftBumper", "+speed"),
            ("Start", "togglemenu"),
            ("Select", "+showscores"),
            ("DPadUp", "impulse 12"),
            ("DPadDown", "impulse 11"),
        ]
        .into_iter()
        .map(|(button, command)| (button.to_string(), command.to_string()))
        .collect();

        Self {
            input: InputConfig::default(),
            commands: CommandsConfig::default(),
            bindings,
        }
    }
}

impl ShimConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: ShimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                info!("Loading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// `$PADSHIM_CONFIG`, else `<config dir>/padshim/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("padshim").join("config.toml"))
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                warn!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let input = &self.input;
        for (name, value) in [
            ("stick_deadzone", input.stick_deadzone),
            ("trigger_deadzone", input.trigger_deadzone),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in [0, 1), got {}",
                    name, value
                )));
            }
        }
        if !input.look_sensitivity.is_finite() || input.look_sensitivity <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "look_sensitivity must be positive, got {}",
                input.look_sensitivity
            )));
        }
        if self.commands.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "commands.queue_capacity must be greater than zero".to_string(),
            ));
        }
        self.command_bindings().map(|_| ())
    }

    pub fn movement_settings(&self) -> MovementSettings {
        MovementSettings {
            stick_deadzone: self.input.stick_deadzone,
            trigger_deadzone: self.input.trigger_deadzone,
            look_sensitivity: self.input.look_sensitivity,
            invert_look: self.input.invert_look,
        }
    }

    pub fn command_bindings(&self) -> Result<CommandBindings, ConfigError> {
        let mut bindings = CommandBindings::new();
        for (name, command) in &self.bindings {
            let button: ButtonType = name
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{}", e)))?;
            let command = command.trim();
            if command.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Binding for {} is empty",
                    button
                )));
            }
            debug!("Binding {} -> {}", button, command);
            bindings.bind(button, command);
        }
        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ShimConfig::default();
        config.validate().unwrap();
        let bindings = config.command_bindings().unwrap();
        assert_eq!(
            bindings.get(ButtonType::RightBumper).unwrap().release.as_deref(),
            Some("-attack")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ShimConfig::from_toml(
            r#"
            [input]
            invert_look = true

            [bindings]
            a = "+jump"
            Guide = "screenshot"
            "#,
        )
        .unwrap();

        assert!(config.input.invert_look);
        assert_eq!(config.input.stick_deadzone, InputConfig::default().stick_deadzone);
        assert_eq!(config.commands.queue_capacity, 1000);
        let bindings = config.command_bindings().unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get(ButtonType::Guide).unwrap().press, "screenshot");
    }

    #[test]
    fn rejects_unknown_button() {
        let err = ShimConfig::from_toml("[bindings]\nTurbo = \"+attack\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("Turbo")));
    }

    #[test]
    fn rejects_empty_command_and_bad_deadzone() {
        assert!(matches!(
            ShimConfig::from_toml("[bindings]\nA = \"  \"\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ShimConfig::from_toml("[input]\nstick_deadzone = 1.0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ShimConfig::from_toml("[commands]\nqueue_capacity = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            ShimConfig::from_toml("[input\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShimConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ShimConfig::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[input]\nlook_sensitivity = 2.5").unwrap();
        let config = ShimConfig::load(file.path()).unwrap();
        assert_eq!(config.movement_settings().look_sensitivity, 2.5);
    }
}
