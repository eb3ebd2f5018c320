#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Writes one JSON object per event, dropping anything below `min_level`.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        if let Some(line) = self.render(now_unix_millis(), level, event, fields) {
            emit(level, &line);
        }
    }

    fn render(
        &self,
        ts: u64,
        level: LogLevel,
        event: &str,
        fields: serde_json::Value,
    ) -> Option<String> {
        if level < self.min_level {
            return None;
        }

        let mut payload = serde_json::Map::new();
        payload.insert("ts".to_string(), serde_json::Value::from(ts));
        payload.insert(
            "level".to_string(),
            serde_json::Value::String(level.as_str().to_string()),
        );
        payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

        if let serde_json::Value::Object(extra) = fields {
            for (key, value) in extra {
                payload.insert(key, value);
            }
        }

        Some(serde_json::Value::Object(payload).to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&value),
        LogLevel::Info => web_sys::console::log_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Warn => eprintln!("{line}"),
        LogLevel::Debug | LogLevel::Info => println!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_below_threshold_are_dropped() {
        let logger = Logger::new(LogLevel::Info);

        assert!(logger
            .render(1, LogLevel::Debug, "feature_skipped", json!({}))
            .is_none());
        assert!(logger
            .render(1, LogLevel::Warn, "page_error", json!({}))
            .is_some());
    }

    #[test]
    fn rendered_line_carries_base_and_extra_fields() {
        let logger = Logger::new(LogLevel::Debug);
        let line = logger
            .render(
                1_700_000_000_000,
                LogLevel::Info,
                "particles_generated",
                json!({ "count": 50 }),
            )
            .expect("info passes a debug threshold");

        let parsed: serde_json::Value = serde_json::from_str(&line).expect("line is JSON");
        assert_eq!(parsed["ts"], 1_700_000_000_000u64);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "particles_generated");
        assert_eq!(parsed["count"], 50);
    }

    #[test]
    fn level_parsing_accepts_known_names_only() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
    }
}
