use std::{fs, path::Path};

use recognition::RecognizerSettings;
use tracing::warn;

/// Defaults, overridden by the optional TOML file, overridden by APP__*
/// environment variables. A broken file falls back to defaults instead of
/// aborting the run.
pub fn load_settings(path: Option<&Path>) -> RecognizerSettings {
    let mut settings = RecognizerSettings::default();

    if let Some(path) = path {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(parsed) => settings = parsed,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "invalid settings file, using defaults")
                }
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable settings file, using defaults")
            }
        }
    }

    if let Ok(v) = std::env::var("APP__MIN_CONFIDENCE") {
        if let Ok(v) = v.parse() {
            settings.min_confidence = v;
        }
    }
    if let Ok(v) = std::env::var("APP__STABILITY_FRAMES") {
        if let Ok(v) = v.parse() {
            settings.stability_frames = v;
        }
    }
    if let Ok(v) = std::env::var("APP__GESTURE_COOLDOWN_MS") {
        if let Ok(v) = v.parse() {
            settings.gesture_cooldown_ms = v;
        }
    }
    if let Ok(v) = std::env::var("APP__ADAPTIVE_PROCESSING") {
        if let Ok(v) = v.parse() {
            settings.adaptive_processing = v;
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let settings = load_settings(None);
        assert_eq!(settings, RecognizerSettings::default());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let parsed: RecognizerSettings = toml::from_str("stability_frames = 3").unwrap();
        assert_eq!(parsed.stability_frames, 3);
        assert_eq!(
            parsed.gesture_cooldown_ms,
            RecognizerSettings::default().gesture_cooldown_ms
        );
    }
}
