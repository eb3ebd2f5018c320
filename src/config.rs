use crate::logging::LogLevel;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

const DEFAULT_TYPEWRITER_TEXT: &str = "Ayush Chand";
const DEFAULT_TYPEWRITER_START_DELAY_MS: u32 = 2_000;
const DEFAULT_TYPEWRITER_CHAR_DELAY_MS: u32 = 150;
const DEFAULT_LOADING_SCREEN_MS: u32 = 3_000;
const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 768;
const DEFAULT_SUBMIT_DELAY_MS: u32 = 1_500;
const DEFAULT_MESSAGE_HIDE_MS: u32 = 5_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TYPEWRITER_START_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const TYPEWRITER_CHAR_DELAY_MS_BOUNDS: (u32, u32) = (10, 2_000);
const LOADING_SCREEN_MS_BOUNDS: (u32, u32) = (0, 15_000);
const MOBILE_BREAKPOINT_PX_BOUNDS: (u32, u32) = (320, 2_048);
const SUBMIT_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const MESSAGE_HIDE_MS_BOUNDS: (u32, u32) = (500, 60_000);
const TYPEWRITER_TEXT_MAX_CHARS: usize = 80;

/// Tunables for the page effects, resolved once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub typewriter_text: String,
    pub typewriter_start_delay_ms: u32,
    pub typewriter_char_delay_ms: u32,
    pub loading_screen_ms: u32,
    pub mobile_breakpoint_px: u32,
    pub submit_delay_ms: u32,
    pub message_hide_ms: u32,
    pub log_level: LogLevel,
}

/// Raw shape of the optional `#site-config` JSON block; every key may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteConfigFile {
    typewriter_text: Option<String>,
    typewriter_start_delay_ms: Option<u32>,
    typewriter_char_delay_ms: Option<u32>,
    loading_screen_ms: Option<u32>,
    mobile_breakpoint_px: Option<u32>,
    submit_delay_ms: Option<u32>,
    message_hide_ms: Option<u32>,
    log_level: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            typewriter_text: DEFAULT_TYPEWRITER_TEXT.to_string(),
            typewriter_start_delay_ms: DEFAULT_TYPEWRITER_START_DELAY_MS,
            typewriter_char_delay_ms: DEFAULT_TYPEWRITER_CHAR_DELAY_MS,
            loading_screen_ms: DEFAULT_LOADING_SCREEN_MS,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            message_hide_ms: DEFAULT_MESSAGE_HIDE_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    /// Parses the JSON block. Unknown keys are ignored, out-of-range values fall back
    /// to their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let file: SiteConfigFile = serde_json::from_str(raw)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: SiteConfigFile) -> Self {
        let typewriter_text = file
            .typewriter_text
            .map(|value| value.trim().to_string())
            .filter(|value| {
                !value.is_empty() && value.chars().count() <= TYPEWRITER_TEXT_MAX_CHARS
            })
            .unwrap_or_else(|| DEFAULT_TYPEWRITER_TEXT.to_string());

        Self {
            typewriter_text,
            typewriter_start_delay_ms: within_bounds(
                file.typewriter_start_delay_ms,
                DEFAULT_TYPEWRITER_START_DELAY_MS,
                TYPEWRITER_START_DELAY_MS_BOUNDS,
            ),
            typewriter_char_delay_ms: within_bounds(
                file.typewriter_char_delay_ms,
                DEFAULT_TYPEWRITER_CHAR_DELAY_MS,
                TYPEWRITER_CHAR_DELAY_MS_BOUNDS,
            ),
            loading_screen_ms: within_bounds(
                file.loading_screen_ms,
                DEFAULT_LOADING_SCREEN_MS,
                LOADING_SCREEN_MS_BOUNDS,
            ),
            mobile_breakpoint_px: within_bounds(
                file.mobile_breakpoint_px,
                DEFAULT_MOBILE_BREAKPOINT_PX,
                MOBILE_BREAKPOINT_PX_BOUNDS,
            ),
            submit_delay_ms: within_bounds(
                file.submit_delay_ms,
                DEFAULT_SUBMIT_DELAY_MS,
                SUBMIT_DELAY_MS_BOUNDS,
            ),
            message_hide_ms: within_bounds(
                file.message_hide_ms,
                DEFAULT_MESSAGE_HIDE_MS,
                MESSAGE_HIDE_MS_BOUNDS,
            ),
            log_level: file
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }

    pub fn mobile_breakpoint(&self) -> f64 {
        f64::from(self.mobile_breakpoint_px)
    }
}

fn within_bounds(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json("{}").expect("empty object parses");
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.mobile_breakpoint_px, 768);
        assert_eq!(config.typewriter_text, "Ayush Chand");
    }

    #[test]
    fn in_range_values_are_kept() {
        let config = SiteConfig::from_json(
            r#"{"typewriterText":"Jane Doe","submitDelayMs":250,"logLevel":"debug"}"#,
        )
        .expect("valid config parses");

        assert_eq!(config.typewriter_text, "Jane Doe");
        assert_eq!(config.submit_delay_ms, 250);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.message_hide_ms, DEFAULT_MESSAGE_HIDE_MS);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let config = SiteConfig::from_json(
            r#"{"typewriterCharDelayMs":1,"mobileBreakpointPx":99999,"typewriterText":"   ","logLevel":"loud"}"#,
        )
        .expect("config with bad values still parses");

        assert_eq!(config.typewriter_char_delay_ms, DEFAULT_TYPEWRITER_CHAR_DELAY_MS);
        assert_eq!(config.mobile_breakpoint_px, DEFAULT_MOBILE_BREAKPOINT_PX);
        assert_eq!(config.typewriter_text, DEFAULT_TYPEWRITER_TEXT);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SiteConfig::from_json("{ not json").is_err());
    }
}
