use anyhow::Result;
use quartz_render::{OrchestratorConfig, DEFAULT_EYE_HEIGHT};
use quartz_ui::OverlaySettings;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use tracing::warn;

pub const DEFAULT_CLIENT_PATH: &str = "config/client.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub show_debug_screen: bool,
    /// Seconds between refreshes of the statistics shown in the debug panel.
    pub statistics_interval_secs: f64,
    pub debug_spacer_height: i32,
    /// Eye height above the player's feet, in blocks.
    pub eye_height: f32,
    pub window_width: u32,
    pub window_height: u32,
    /// Physical pixels per GUI unit.
    pub gui_scale: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            show_debug_screen: false,
            statistics_interval_secs: 0.4,
            debug_spacer_height: 6,
            eye_height: DEFAULT_EYE_HEIGHT,
            window_width: 854,
            window_height: 480,
            gui_scale: 2,
        }
    }
}

impl ClientConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ClientConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ClientConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Client config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ClientConfig::default()
            }
        }
    }

    /// Save client configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            fov_degrees: self.fov_degrees,
            eye_height: self.eye_height,
            ..OrchestratorConfig::default()
        }
    }

    pub fn overlay(&self) -> OverlaySettings {
        OverlaySettings {
            show_debug_screen: self.show_debug_screen,
            debug_spacer_height: self.debug_spacer_height,
            gui_scale: self.gui_scale.max(1),
            statistics_interval: Duration::try_from_secs_f64(self.statistics_interval_secs)
                .unwrap_or_else(|err| {
                    warn!(%err, "Invalid statistics interval. Using default");
                    OverlaySettings::default().statistics_interval
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "quartz-{name}-{}.toml",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ClientConfig::load_from_path(Path::new("does/not/exist.toml"));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        fs::write(&path, "fov_degrees = 70.0\nshow_debug_screen = true\n").unwrap();

        let config = ClientConfig::load_from_path(&path);
        assert_eq!(config.fov_degrees, 70.0);
        assert!(config.show_debug_screen);
        assert_eq!(config.gui_scale, 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_path("malformed");
        fs::write(&path, "fov_degrees = \"wide\"").unwrap();
        assert_eq!(ClientConfig::load_from_path(&path), ClientConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_config_loads_back() {
        let path = temp_path("saved");
        let config = ClientConfig {
            fov_degrees: 110.0,
            window_width: 1280,
            window_height: 720,
            ..ClientConfig::default()
        };
        config.save_to_path(&path).unwrap();
        assert_eq!(ClientConfig::load_from_path(&path), config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn settings_are_derived_from_the_config() {
        let config = ClientConfig {
            statistics_interval_secs: -1.0,
            gui_scale: 0,
            ..ClientConfig::default()
        };
        let overlay = config.overlay();
        assert_eq!(overlay.statistics_interval, Duration::from_millis(400));
        assert_eq!(overlay.gui_scale, 1);
        assert_eq!(config.orchestrator().fov_degrees, 90.0);
    }
}
