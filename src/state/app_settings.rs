use log::LevelFilter;
use std::str::FromStr;

pub const LOG_LEVEL_ENV: &str = "PITCHSIDE_LOG_LEVEL";

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Unrecognised levels are ignored rather than fatal.
        let log_level = lookup(LOG_LEVEL_ENV).and_then(|raw| LevelFilter::from_str(raw.trim()).ok());
        Self { full_screen: false, log_level }
    }
}
