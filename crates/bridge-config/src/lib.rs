//! Configuration lookup for the translation layer.
//!
//! The rest of the workspace only ever needs two booleans: whether the
//! synthesized component item is installed into the registry, and whether
//! command suggestions are sent to the client at all. Everything else a
//! real bridge would configure (network, logging level, world settings)
//! lives outside this crate's concern.

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub items: ItemsSection,
    pub commands: CommandsSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsSection {
    /// Whether to register the synthesized furnace-minecart component item.
    #[serde(default)]
    pub synthesize_extra_item: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandsSection {
    /// Whether command suggestions (the translated command tree) are sent.
    #[serde(default = "default_true")]
    pub command_suggestions_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            items: ItemsSection {
                synthesize_extra_item: false,
            },
            commands: CommandsSection {
                command_suggestions_enabled: true,
            },
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a TOML file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml_str = r#"
            [items]
            synthesize_extra_item = true

            [commands]
            command_suggestions_enabled = false
        "#;
        let config: BridgeConfig = toml::from_str(toml_str).unwrap();
        assert!(config.items.synthesize_extra_item);
        assert!(!config.commands.command_suggestions_enabled);
    }

    #[test]
    fn defaults_when_absent() {
        let toml_str = r#"
            [items]
            [commands]
        "#;
        let config: BridgeConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.items.synthesize_extra_item);
        assert!(config.commands.command_suggestions_enabled);
    }

    #[test]
    fn default_impl() {
        let config = BridgeConfig::default();
        assert!(!config.items.synthesize_extra_item);
        assert!(config.commands.command_suggestions_enabled);
    }
}
