// The adjustable knobs of the poll, read from an optional JSON file.

use std::fs;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app::{AppResult, OpeningConfigSnafu, ParsingConfigSnafu};
use snafu::prelude::*;

fn default_title() -> String {
    "Tournoi La Légende – 3e Édition".to_string()
}

fn default_payment_number() -> String {
    "0709467472".to_string()
}

fn default_amount() -> String {
    "200".to_string()
}

fn default_pin() -> String {
    "1234".to_string()
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(rename = "paymentNumber", default = "default_payment_number")]
    pub payment_number: String,
    #[serde(rename = "defaultAmount", default = "default_amount")]
    pub default_amount: String,
    #[serde(rename = "organizerPin", default = "default_pin")]
    pub organizer_pin: String,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            title: default_title(),
            payment_number: default_payment_number(),
            default_amount: default_amount(),
            organizer_pin: default_pin(),
        }
    }
}

/// Loads the configuration, or the built-in defaults when no file is given.
///
/// Unlike the state file, a config file that was explicitly requested but
/// cannot be read or parsed is an error: silently running with the default
/// PIN would be surprising.
pub fn load_config(path: &Option<String>) -> AppResult<AppConfig> {
    let path = match path {
        None => return Ok(AppConfig::default()),
        Some(p) => p.as_str(),
    };
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    debug!("load_config: read {:?} bytes from {:?}", contents.len(), path);
    serde_json::from_str(&contents).context(ParsingConfigSnafu { path })
}
