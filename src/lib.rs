//! Furrow Paywall Generator
//!
//! Builds a subscription paywall screen as a tree of auto-layout frames and
//! text nodes, once per color theme, and commits both trees side by side to a
//! design-tool host for import.
//!
//! # Features
//!
//! - **Pure builder**: [`paywall::build`] is a deterministic function of a
//!   theme, fonts, uploaded images and copy; nothing touches the host until
//!   the finished tree is committed
//! - **Host abstraction**: node creation, font loading and the viewport sit
//!   behind the [`host::Host`] trait; [`host::RecordingHost`] keeps
//!   everything in memory
//! - **All-or-nothing runs**: theme errors abort before any node exists and
//!   host failures roll back what was created
//!
//! # Example
//!
//! ```no_run
//! use paywallgen::{GeneratorConfig, host::RecordingHost, orchestrator::{self, Assets}};
//!
//! # async fn demo() -> paywallgen::Result<()> {
//! let config = GeneratorConfig {
//!     gutter: 80.0,
//!     ..Default::default()
//! };
//!
//! let mut host = RecordingHost::new();
//! let generated = orchestrator::run(&mut host, &config, &Assets::placeholder()).await?;
//! println!("dark root at x = {}", generated.dark.x);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod b64;
pub mod color;
pub mod fonts;
pub mod host;
pub mod layout;
pub mod orchestrator;
pub mod paywall;
pub mod theme;

pub use fonts::{FontFamily, FontSet};
pub use paywall::PaywallCopy;
pub use theme::{ColorRole, Palette, Theme};

/// Horizontal space between the light and dark roots
pub const DEFAULT_GUTTER: f64 = 50.0;

/// Configuration for a generator run
///
/// Defaults reproduce the stock Furrow paywall: Nunito with an Inter
/// fallback, the built-in light and dark themes, and a 50px gutter so the
/// dark root lands at x = 440.
///
/// # Examples
///
/// ```
/// let cfg = paywallgen::GeneratorConfig::default();
/// assert_eq!(cfg.fonts[0].family, "Nunito");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Gap between the light root's right edge and the dark root
    pub gutter: f64,
    /// Font families tried in order; the first that fully loads is used
    pub fonts: Vec<FontFamily>,
    pub light: Theme,
    pub dark: Theme,
    pub copy: PaywallCopy,
    /// Passed to the host once both roots are placed
    pub completion_message: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gutter: DEFAULT_GUTTER,
            fonts: vec![FontFamily::nunito(), FontFamily::inter()],
            light: Theme::light(),
            dark: Theme::dark(),
            copy: PaywallCopy::default(),
            completion_message: "Done! Both paywalls generated.".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    /// Reject settings no run could succeed with. Theme contents are checked
    /// later, when each theme is resolved.
    pub fn validate(&self) -> Result<()> {
        if self.fonts.is_empty() {
            return Err(Error::Config("at least one font family is required".into()));
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            return Err(Error::Config(format!("gutter must be a non-negative number, got {}", self.gutter)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.gutter, 50.0);
        assert_eq!(config.fonts.len(), 2);
        assert_eq!(config.fonts[1].family, "Inter");
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GeneratorConfig::from_json_str(r#"{ "gutter": 120, "copy": { "cta": "Go Pro" } }"#).unwrap();
        assert_eq!(config.gutter, 120.0);
        assert_eq!(config.copy.cta, "Go Pro");
        assert_eq!(config.copy.headline, PaywallCopy::default().headline);
        assert_eq!(config.light, Theme::light());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{ "fonts": [] }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{ "gutter": -1 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(GeneratorConfig::from_json_str("{"), Err(Error::Json(_))));
    }
}
