use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::error::PreferenceError;
use crate::preferences::{PreferenceStore, THEME_PREFERENCE_KEY};

/// Theme chosen in the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeType::Light => "light",
            ThemeType::Dark => "dark",
            ThemeType::System => "system",
        }
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeType::Light),
            "dark" => Ok(ThemeType::Dark),
            "system" => Ok(ThemeType::System),
            other => Err(format!("unknown theme type: {}", other)),
        }
    }
}

/// Color scheme reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(format!("unknown color scheme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub error: &'static str,
    pub text: &'static str,
    pub secondary_text: &'static str,
    pub border: &'static str,
    pub card: &'static str,
    pub notification: &'static str,
    pub inactive: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        primary: "#3498db",
        secondary: "#2ecc71",
        background: "#f8f9fa",
        surface: "#ffffff",
        error: "#e74c3c",
        text: "#2d3436",
        secondary_text: "#636e72",
        border: "#dfe6e9",
        card: "#ffffff",
        notification: "#e74c3c",
        inactive: "#b2bec3",
        success: "#27ae60",
        warning: "#f39c12",
        info: "#3498db",
    };

    pub const DARK: Palette = Palette {
        primary: "#3498db",
        secondary: "#2ecc71",
        background: "#2d3436",
        surface: "#1e272e",
        error: "#e74c3c",
        text: "#f5f6fa",
        secondary_text: "#dcdde1",
        border: "#636e72",
        card: "#2d3436",
        notification: "#e74c3c",
        inactive: "#636e72",
        success: "#27ae60",
        warning: "#f39c12",
        info: "#3498db",
    };
}

/// The theme in effect after applying the device scheme to the chosen type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub theme_type: ThemeType,
    pub is_dark: bool,
    pub palette: Palette,
}

impl Theme {
    pub fn resolve(theme_type: ThemeType, system: ColorScheme) -> Self {
        let is_dark = match theme_type {
            ThemeType::Dark => true,
            ThemeType::Light => false,
            ThemeType::System => system == ColorScheme::Dark,
        };

        Theme {
            theme_type,
            is_dark,
            palette: if is_dark { Palette::DARK } else { Palette::LIGHT },
        }
    }
}

/// Loads and persists the theme choice through a [`PreferenceStore`].
pub struct ThemeSettings {
    store: Arc<dyn PreferenceStore>,
    system: ColorScheme,
}

impl ThemeSettings {
    pub fn new(store: Arc<dyn PreferenceStore>, system: ColorScheme) -> Self {
        Self { store, system }
    }

    /// The saved theme type; `System` when nothing usable is stored.
    pub async fn theme_type(&self) -> ThemeType {
        match self.store.get(THEME_PREFERENCE_KEY).await {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring saved theme preference");
                ThemeType::System
            }),
            Ok(None) => ThemeType::System,
            Err(e) => {
                warn!(error = %e, "Error loading theme preference");
                ThemeType::System
            }
        }
    }

    pub async fn theme(&self) -> Theme {
        Theme::resolve(self.theme_type().await, self.system)
    }

    pub async fn set_theme_type(&self, theme_type: ThemeType) -> Result<Theme, PreferenceError> {
        self.store
            .set(THEME_PREFERENCE_KEY, theme_type.as_str())
            .await
            .inspect_err(|e| warn!(error = %e, "Error saving theme preference"))?;

        Ok(Theme::resolve(theme_type, self.system))
    }
}
