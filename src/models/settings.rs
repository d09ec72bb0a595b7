//! Persisted settings (`zoomtrack.json`) and the engine configuration
//! resolved from them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::animation::AnimationTimings;
use crate::algorithm::follow::DEFAULT_FOLLOW_SPEED;
use crate::error::{Result, ZoomError};
use crate::input::keys::{parse_hotkey, KeyCode, Modifiers, MouseButton};
use crate::input::trigger::{TriggerBinding, TriggerConfig, TriggerMode};

pub const SETTINGS_FILE_NAME: &str = "zoomtrack.json";
const DEFAULT_HOTKEY: &str = "Ctrl+F1";
const DEFAULT_ANIM_MS: i64 = 180;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Name of the scene item to drive.
    pub source_name: String,
    pub hotkey: String,
    /// `hold` or `toggle`.
    pub hotkey_mode: String,
    /// `keyboard` or `mouse`.
    pub trigger_type: String,
    /// `left`, `right`, `middle`, `x1` or `x2`.
    pub mouse_button: String,
    pub mod_ctrl: bool,
    pub mod_alt: bool,
    pub mod_shift: bool,
    pub mod_win: bool,
    pub zoom_factor: f64,
    pub anim_in_ms: i64,
    pub anim_out_ms: i64,
    pub follow_mouse: bool,
    pub follow_speed: f64,
    pub portrait_cover: bool,
    pub debug: bool,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            source_name: String::new(),
            hotkey: DEFAULT_HOTKEY.to_string(),
            hotkey_mode: "hold".to_string(),
            trigger_type: "keyboard".to_string(),
            mouse_button: "x1".to_string(),
            mod_ctrl: true,
            mod_alt: false,
            mod_shift: false,
            mod_win: false,
            zoom_factor: 2.0,
            anim_in_ms: DEFAULT_ANIM_MS,
            anim_out_ms: DEFAULT_ANIM_MS,
            follow_mouse: true,
            follow_speed: DEFAULT_FOLLOW_SPEED,
            portrait_cover: true,
            debug: false,
        }
    }
}

/// `<config dir>/zoomtrack/zoomtrack.json`.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zoomtrack").join(SETTINGS_FILE_NAME))
}

impl ZoomSettings {
    /// Loads and sanitizes settings. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("settings: {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ZoomError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut settings: ZoomSettings =
            serde_json::from_str(&raw).map_err(|source| ZoomError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.sanitize();
        log::info!("settings: loaded from {}", path.display());
        Ok(settings)
    }

    /// Writes through a temporary file so a crash never leaves a torn file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| ZoomError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(self).map_err(|source| ZoomError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, data).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;
        log::info!("settings: saved to {}", path.display());
        Ok(())
    }

    /// Replaces out-of-range values with defaults.
    pub fn sanitize(&mut self) {
        if self.hotkey.trim().is_empty() {
            self.hotkey = DEFAULT_HOTKEY.to_string();
        }
        if self.hotkey_mode != "toggle" {
            self.hotkey_mode = "hold".to_string();
        }
        if self.trigger_type != "mouse" {
            self.trigger_type = "keyboard".to_string();
        }
        if self.mouse_button.trim().is_empty() {
            self.mouse_button = "x1".to_string();
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor < 0.0 {
            self.zoom_factor = 0.0;
        }
        if self.anim_in_ms < 0 {
            self.anim_in_ms = DEFAULT_ANIM_MS;
        }
        if self.anim_out_ms < 0 {
            self.anim_out_ms = DEFAULT_ANIM_MS;
        }
        if !self.follow_speed.is_finite() || self.follow_speed <= 0.1 {
            self.follow_speed = DEFAULT_FOLLOW_SPEED;
        }
    }

    fn mode(&self) -> TriggerMode {
        if self.hotkey_mode == "toggle" {
            TriggerMode::Toggle
        } else {
            TriggerMode::Hold
        }
    }

    fn modifier_flags(&self) -> Modifiers {
        Modifiers {
            ctrl: self.mod_ctrl,
            alt: self.mod_alt,
            shift: self.mod_shift,
            meta: self.mod_win,
        }
    }

    /// Keyboard triggers take their modifiers from the hotkey text; mouse
    /// triggers from the `mod_*` flags.
    pub fn trigger_config(&self) -> Result<TriggerConfig> {
        let mode = self.mode();
        if self.trigger_type == "mouse" {
            let button: MouseButton = self.mouse_button.parse()?;
            return Ok(TriggerConfig {
                mode,
                binding: TriggerBinding::Button(button),
                modifiers: self.modifier_flags(),
            });
        }

        let hotkey = parse_hotkey(&self.hotkey)?;
        let binding = match hotkey.key {
            Some(key) => TriggerBinding::Key(key),
            None => TriggerBinding::ModifiersOnly,
        };
        Ok(TriggerConfig {
            mode,
            binding,
            modifiers: hotkey.modifiers,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        let trigger = self.trigger_config().unwrap_or_else(|err| {
            log::warn!("settings: trigger disabled: {err}");
            TriggerConfig {
                mode: self.mode(),
                binding: TriggerBinding::ModifiersOnly,
                modifiers: Modifiers::NONE,
            }
        });

        EngineConfig {
            zoom_factor: self.zoom_factor.max(0.0),
            timings: AnimationTimings {
                zoom_in_ms: clamp_ms(self.anim_in_ms),
                zoom_out_ms: clamp_ms(self.anim_out_ms),
            },
            follow_mouse: self.follow_mouse,
            follow_speed: self.follow_speed,
            cover: self.portrait_cover,
            trigger,
        }
    }
}

fn clamp_ms(ms: i64) -> u32 {
    ms.clamp(0, u32::MAX as i64) as u32
}

/// Per-tick constants plus the trigger binding. Swappable mid-cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub zoom_factor: f64,
    pub timings: AnimationTimings,
    pub follow_mouse: bool,
    pub follow_speed: f64,
    pub cover: bool,
    pub trigger: TriggerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom_factor: 2.0,
            timings: AnimationTimings::default(),
            follow_mouse: true,
            follow_speed: DEFAULT_FOLLOW_SPEED,
            cover: true,
            trigger: TriggerConfig {
                mode: TriggerMode::Hold,
                binding: TriggerBinding::Key(KeyCode::F(1)),
                modifiers: Modifiers {
                    ctrl: true,
                    ..Modifiers::NONE
                },
            },
        }
    }
}
