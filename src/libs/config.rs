//! Configuration management for the tidvis application.
//!
//! Settings live in a JSON file in the platform data directory and are split
//! into optional modules so users only configure what they use:
//!
//! - **User**: the operator's identity; every timer and time entry is owned
//!   by this name, and timer operations refuse to run without it
//! - **Billing**: whether new entries are rounded to 15-minute blocks and
//!   whether the 15-minute minimum is enforced on short entries
//! - **Export**: default directory for invoice-basis export files
//!
//! `Config::init` runs an interactive setup wizard with the current values
//! pre-filled as defaults.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name within the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// A configurable module shown in the interactive setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Identity of the operator; the owner of timers and time entries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserConfig {
    pub name: String,
}

/// Billing behavior for new time entries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BillingConfig {
    /// Round new entries up to the next 15-minute block.
    pub rounding_enabled: bool,
    /// Extend entries shorter than 15 minutes to exactly 15 minutes.
    pub enforce_minimum: bool,
}

/// Export defaults for the invoice-basis export command.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConfig {
    /// Directory where export files are written when no path is given.
    pub output_dir: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<BillingConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            rounding_enabled: true,
            enforce_minimum: false,
        }
    }
}

impl Config {
    /// Reads the configuration file, falling back to defaults when no file
    /// exists yet. A present-but-unparseable file is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON in the data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Presents a multi-select of modules, then prompts for each selected
    /// module's settings with existing values as defaults. Returns the
    /// updated configuration for the caller to save.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let node_descriptions = vec![
            ConfigModule {
                key: "user".to_string(),
                name: "User".to_string(),
            },
            ConfigModule {
                key: "billing".to_string(),
                name: "Billing".to_string(),
            },
            ConfigModule {
                key: "export".to_string(),
                name: "Export".to_string(),
            },
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "user" => {
                    let default = config.user.clone().unwrap_or(UserConfig { name: String::new() });
                    msg_print!(Message::ConfigModuleUser);
                    config.user = Some(UserConfig {
                        name: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUserName.to_string())
                            .default(default.name)
                            .interact_text()?,
                    });
                }
                "billing" => {
                    let default = config.billing.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleBilling);
                    config.billing = Some(BillingConfig {
                        rounding_enabled: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRoundingEnabled.to_string())
                            .default(default.rounding_enabled)
                            .interact()?,
                        enforce_minimum: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptEnforceMinimum.to_string())
                            .default(default.enforce_minimum)
                            .interact()?,
                    });
                }
                "export" => {
                    let default = config.export.clone().unwrap_or(ExportConfig { output_dir: ".".to_string() });
                    msg_print!(Message::ConfigModuleExport);
                    config.export = Some(ExportConfig {
                        output_dir: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptExportDir.to_string())
                            .default(default.output_dir)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
