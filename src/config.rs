//! Render settings with environment overrides.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `QR_PIXELS_PER_MODULE` | magnification, at least 1 | 10 |
//! | `QR_EC_LEVEL` | `L`, `M`, `Q` or `H` | `L` |
//! | `QR_DARK_COLOR` | `#rrggbb` or `#rrggbbaa` | black |
//! | `QR_LIGHT_COLOR` | `#rrggbb` or `#rrggbbaa` | white |
//!
//! Unparsable values fall back to the default with a warning.

use crate::models::ECLevel;
use crate::render::{BLACK, Color, WHITE};
use image::Rgba;
use std::sync::OnceLock;

/// Default magnification
pub const DEFAULT_PIXELS_PER_MODULE: u32 = 10;

/// How a payload is encoded and drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Pixels per module edge
    pub pixels_per_module: u32,
    /// Color of set modules
    pub dark: Color,
    /// Color of unset modules
    pub light: Color,
    /// Error correction requested from the encoder
    pub ec_level: ECLevel,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_module: DEFAULT_PIXELS_PER_MODULE,
            dark: BLACK,
            light: WHITE,
            ec_level: ECLevel::L,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(name: &str, default: T, parse: impl FnOnce(&str) -> Option<T>) -> T {
    match env_value(name) {
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            log::warn!("ignoring invalid {name}={raw:?}");
            default
        }),
        None => default,
    }
}

/// Parse `#rrggbb` / `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

impl RenderConfig {
    /// Defaults with any `QR_*` environment overrides applied
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            pixels_per_module: parse_env(
                "QR_PIXELS_PER_MODULE",
                defaults.pixels_per_module,
                |v| v.parse::<u32>().ok().filter(|&p| p >= 1),
            ),
            dark: parse_env("QR_DARK_COLOR", defaults.dark, parse_hex_color),
            light: parse_env("QR_LIGHT_COLOR", defaults.light, parse_hex_color),
            ec_level: parse_env("QR_EC_LEVEL", defaults.ec_level, |v| v.parse().ok()),
        }
    }

    /// [`RenderConfig::from_env`], read once per process
    pub fn env_defaults() -> &'static RenderConfig {
        static ENV_DEFAULTS: OnceLock<RenderConfig> = OnceLock::new();
        ENV_DEFAULTS.get_or_init(Self::from_env)
    }
}
