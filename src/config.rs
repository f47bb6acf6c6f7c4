//! Configuration management for haighframe
//!
//! [`WindowSettings`] is the construction input for a window. [`Config`]
//! wraps it together with logging preferences so the demo binary can load
//! everything from one TOML file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::geometry::Size;
use crate::platform::CursorIcon;
use crate::reconcile::SizeLimits;
use crate::render::GlVersion;
use crate::window::{BorderStyle, WindowState};

/// Invisible resize border assumed (at 96 DPI) while a window is hidden
/// and Windows reports no frame padding for it
pub const DEFAULT_INVISIBLE_BORDER_FALLBACK: i32 = 7;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Window construction settings
    pub window: WindowSettings,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("haighframe")
            .join("config.toml")
    }

    /// Load configuration from file or create default
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            return Ok(Self::load_from(&config_path).unwrap_or_else(|e| {
                warn!("Failed to parse config, using defaults: {}", e);
                Self::default()
            }));
        }

        let config = Self::default();
        config.save_to(&config_path)?;
        Ok(config)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to: {:?}", path);
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: error, warn, info, debug or trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Everything needed to construct a window.
///
/// Positions and sizes are logical pixels (100% scale). `width` and
/// `height` are the client size; `x` and `y` place the visible frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub visible: bool,
    /// Destroy the window when a close is requested
    pub exit_on_close: bool,
    pub title: String,
    /// Image file used as the window icon
    pub icon: Option<PathBuf>,
    pub border: BorderStyle,
    pub state: WindowState,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Zero on an axis means unconstrained
    pub min_client_size: Size,
    /// Zero on an axis means unconstrained
    pub max_client_size: Size,
    /// Centre on the monitor work area, ignoring `x`/`y`
    pub centre: bool,
    pub cursor: CursorIcon,
    pub cursor_visible: bool,
    pub cursor_locked_to_window: bool,
    pub gl_version: GlVersion,
    /// Invisible border (logical px) assumed for a hidden framed window;
    /// 0 disables the assumption
    pub invisible_border_fallback: i32,
    /// Fullscreen covers the whole monitor instead of its work area
    pub fullscreen_covers_monitor: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            visible: true,
            exit_on_close: true,
            title: "Haigh Window".to_string(),
            icon: None,
            border: BorderStyle::SizingBorder,
            state: WindowState::Normal,
            x: 100,
            y: 100,
            width: 800,
            height: 600,
            min_client_size: Size::ZERO,
            max_client_size: Size::ZERO,
            centre: false,
            cursor: CursorIcon::Arrow,
            cursor_visible: true,
            cursor_locked_to_window: false,
            gl_version: GlVersion::default(),
            invisible_border_fallback: DEFAULT_INVISIBLE_BORDER_FALLBACK,
            fullscreen_covers_monitor: false,
        }
    }
}

impl WindowSettings {
    pub fn client_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits::new(self.min_client_size, self.max_client_size)
    }

    /// Reject settings no window can be built from
    pub fn validate(&self) -> FrameResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(FrameError::InvalidSettings(format!(
                "client size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        let limits = self.size_limits();
        if !limits.is_consistent() {
            return Err(FrameError::InvalidSettings(format!(
                "min client size {:?} does not fit under max {:?}",
                limits.min, limits.max
            )));
        }
        if !limits.contains(self.client_size()) {
            return Err(FrameError::InvalidSettings(format!(
                "client size {}x{} is outside {:?}..{:?}",
                self.width, self.height, limits.min, limits.max
            )));
        }

        if self.invisible_border_fallback < 0 {
            return Err(FrameError::InvalidSettings(
                "invisible border fallback cannot be negative".to_string(),
            ));
        }

        if !self.gl_version.is_valid() {
            return Err(FrameError::InvalidSettings(format!(
                "OpenGL {} does not exist",
                self.gl_version
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn toml_roundtrip_default() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&s).expect("parse");
        assert_eq!(cfg.window, parsed.window);
        assert_eq!(cfg.logging.level, parsed.logging.level);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [window]
            title = "Tool"
            border = "NoBorder"
            min_client_size = { width = 200, height = 150 }
            "#,
        )
        .expect("parse");
        assert_eq!(parsed.window.title, "Tool");
        assert_eq!(parsed.window.border, BorderStyle::NoBorder);
        assert_eq!(parsed.window.min_client_size, Size::new(200, 150));
        assert_eq!(parsed.window.width, 800);
        assert_eq!(parsed.window.invisible_border_fallback, 7);
        assert_eq!(parsed.logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.window.title = "Saved".to_string();
        cfg.window.state = WindowState::Maximized;
        cfg.logging.level = "debug".to_string();
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.window.title, "Saved");
        assert_eq!(loaded.window.state, WindowState::Maximized);
        assert_eq!(loaded.logging.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn config_path_ends_with_crate_dir() {
        let p = Config::config_path();
        let s = p.to_string_lossy();
        assert!(
            s.ends_with("haighframe/config.toml") || s.ends_with("haighframe\\config.toml"),
            "unexpected config path: {}",
            s
        );
    }

    #[test]
    fn validation_rejects_bad_sizes() {
        let ok = WindowSettings::default();
        assert!(ok.validate().is_ok());

        let negative = WindowSettings {
            width: -5,
            ..WindowSettings::default()
        };
        assert!(matches!(negative.validate(), Err(FrameError::InvalidSettings(_))));

        let inverted = WindowSettings {
            min_client_size: Size::new(900, 0),
            max_client_size: Size::new(850, 0),
            ..WindowSettings::default()
        };
        assert!(inverted.validate().is_err());

        let outside = WindowSettings {
            width: 400,
            height: 400,
            min_client_size: Size::new(500, 0),
            ..WindowSettings::default()
        };
        assert!(outside.validate().is_err());

        let bad_gl = WindowSettings {
            gl_version: GlVersion::new(3, 9),
            ..WindowSettings::default()
        };
        assert!(bad_gl.validate().is_err());
    }
}
