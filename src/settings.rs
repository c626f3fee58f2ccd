//! Runtime settings
//!
//! Supplied by the host page (web) or a JSON file (native). Every field has a
//! default, so partial documents are accepted.

use serde::Deserialize;

/// How a slot decides that its rocket has reached the apex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Burst while the cycle lies inside the narrow trigger window.
    /// Can miss a burst at very low frame rates, or fire twice.
    #[default]
    Window,
    /// Burst when the apex time falls between two frames.
    /// Fires once per cycle at any frame rate; a frame gap spanning several
    /// apexes bursts once.
    Crossing,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerMode::Window => "window",
            TriggerMode::Crossing => "crossing",
        }
    }
}

/// Show settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence all tones
    pub muted: bool,
    /// Burst trigger strategy
    pub trigger: TriggerMode,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
            trigger: TriggerMode::Window,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Volume applied to tones
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    /// Element holding a JSON settings document on the host page
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "fireworks-settings";

    /// Load settings from the host page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from an optional JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_windowed_trigger() {
        let s = Settings::default();
        assert_eq!(s.trigger, TriggerMode::Window);
        assert_eq!(s.effective_volume(), 1.0);
        assert!(s.seed.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "trigger": "crossing", "seed": 42 }"#).unwrap();
        assert_eq!(s.trigger, TriggerMode::Crossing);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.master_volume, 1.0);
        assert!(!s.muted);
    }

    #[test]
    fn test_volume_clamped_and_muted() {
        let s = Settings::from_json(r#"{ "master_volume": 3.0 }"#).unwrap();
        assert_eq!(s.master_volume, 1.0);

        let s = Settings::from_json(r#"{ "muted": true }"#).unwrap();
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ trigger: ").is_err());
        assert!(Settings::from_json(r#"{ "trigger": "sometimes" }"#).is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load(Some(std::path::Path::new("/nonexistent/fireworks.json")));
        assert_eq!(s, Settings::default());
    }
}
