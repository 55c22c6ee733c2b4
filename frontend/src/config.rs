use chrono::{NaiveDate, NaiveDateTime};
use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site_name: String,
    /// Local wall-clock time the countdown runs toward.
    pub countdown_target: NaiveDateTime,
    pub hero_title: String,
    pub avatar_endpoint: String,
    pub avatar_background: String,
    pub avatar_color: String,
    /// Cards inside this region never tilt.
    pub tilt_exempt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_name: "KARE OSS Website".to_string(),
            countdown_target: NaiveDate::from_ymd_opt(2026, 3, 13)
                .and_then(|date| date.and_hms_opt(9, 0, 0))
                .unwrap_or_default(),
            hero_title: "WONDERS OF AI 3.0".to_string(),
            avatar_endpoint: "https://ui-avatars.com/api/".to_string(),
            avatar_background: "8b0000".to_string(),
            avatar_color: "fff".to_string(),
            tilt_exempt: "#charter-official".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the override block if the page has one, defaults otherwise.
    pub fn from_document(document: &Document) -> Result<Self> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
