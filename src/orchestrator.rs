//! End-to-end generator run: fonts, both themes, placement, viewport.

use log::info;

use crate::b64;
use crate::fonts::{load_fonts, FontSet};
use crate::host::{commit, discard, Host, NodeId};
use crate::layout::LayoutNode;
use crate::paywall::{self, ImageSet, ROOT_WIDTH};
use crate::theme::Palette;
use crate::{GeneratorConfig, Result};

/// 1x1 transparent PNG used when no asset is supplied
const PLACEHOLDER_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Raw image bytes for the two painted assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    /// 144x144 app icon PNG
    pub app_icon: Vec<u8>,
    /// 390x280 hero gradient PNG
    pub hero_background: Vec<u8>,
}

impl Assets {
    /// Decode assets from their embedded base64 form.
    pub fn from_base64(app_icon: &str, hero_background: &str) -> Self {
        Self {
            app_icon: b64::decode(app_icon),
            hero_background: b64::decode(hero_background),
        }
    }

    pub fn placeholder() -> Self {
        Self::from_base64(PLACEHOLDER_PNG_B64, PLACEHOLDER_PNG_B64)
    }
}

/// A committed root and where it was placed
#[derive(Debug, Clone)]
pub struct PlacedRoot {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub tree: LayoutNode,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct Generated {
    pub fonts: FontSet,
    pub light: PlacedRoot,
    pub dark: PlacedRoot,
}

fn root_width(tree: &LayoutNode) -> f64 {
    tree.as_frame().and_then(|f| f.props.width).unwrap_or(ROOT_WIDTH)
}

/// Generate both themed paywalls on `host`.
///
/// Either both roots end up on the host, placed and focused, or an error is
/// returned and every node this run created is removed again.
///
/// Uploaded images are not rolled back since [`Host`] has no call to delete
/// them: a run that fails after the upload step leaves both images on the
/// host. A node the host refuses to remove is logged and left in place.
pub async fn run<H: Host + ?Sized>(host: &mut H, config: &GeneratorConfig, assets: &Assets) -> Result<Generated> {
    config.validate()?;
    let fonts = load_fonts(&*host, &config.fonts).await?;

    // Resolve both themes up front so a bad record fails before any upload
    Palette::resolve(&config.light)?;
    Palette::resolve(&config.dark)?;

    let images = ImageSet {
        app_icon: host.create_image(&assets.app_icon)?,
        hero_background: host.create_image(&assets.hero_background)?,
    };

    let light = LayoutNode::from(paywall::build(&config.light, &fonts, &images, &config.copy)?);
    info!("Built '{}' ({} nodes)", light.name(), light.node_count());
    let dark = LayoutNode::from(paywall::build(&config.dark, &fonts, &images, &config.copy)?);
    info!("Built '{}' ({} nodes)", dark.name(), dark.node_count());

    let light_id = commit(host, &light)?;
    let dark_id = match commit(host, &dark) {
        Ok(id) => id,
        Err(e) => {
            discard(host, light_id);
            return Err(e);
        }
    };

    let dark_x = root_width(&light) + config.gutter;
    if let Err(e) = place(host, light_id, dark_id, dark_x) {
        discard(host, light_id);
        discard(host, dark_id);
        return Err(e);
    }
    host.finish(&config.completion_message);
    info!("{}", config.completion_message);

    Ok(Generated {
        fonts,
        light: PlacedRoot {
            id: light_id,
            x: 0.0,
            y: 0.0,
            tree: light,
        },
        dark: PlacedRoot {
            id: dark_id,
            x: dark_x,
            y: 0.0,
            tree: dark,
        },
    })
}

fn place<H: Host + ?Sized>(host: &mut H, light: NodeId, dark: NodeId, dark_x: f64) -> Result<()> {
    host.set_position(light, 0.0, 0.0)?;
    host.set_position(dark, dark_x, 0.0)?;
    host.focus_viewport(&[light, dark])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::theme::ColorRole;
    use crate::Error;

    #[test]
    fn placeholder_decodes_to_png() {
        let assets = Assets::placeholder();
        assert_eq!(&assets.app_icon[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn run_places_dark_after_light_plus_gutter() {
        let mut host = RecordingHost::new();
        let config = GeneratorConfig::default();
        let out = run(&mut host, &config, &Assets::placeholder()).await.unwrap();

        assert_eq!(out.dark.x, ROOT_WIDTH + config.gutter);
        assert_eq!(host.node(out.dark.id).unwrap().x, 440.0);
        assert_eq!(host.node(out.light.id).unwrap().x, 0.0);
        assert_eq!(host.viewport(), &[out.light.id, out.dark.id]);
        assert_eq!(host.finished(), Some(config.completion_message.as_str()));
        assert_eq!(host.roots().len(), 2);
    }

    #[tokio::test]
    async fn bad_theme_creates_no_nodes() {
        let mut host = RecordingHost::new();
        let mut config = GeneratorConfig::default();
        config.dark.colors.remove(&ColorRole::FooterSeparator);

        let err = run(&mut host, &config, &Assets::placeholder()).await.unwrap_err();
        assert!(matches!(err, Error::MissingThemeField { .. }));
        assert_eq!(host.creation_count(), 0);
        assert!(host.snapshot().images.is_empty());
        assert!(host.finished().is_none());
    }

    #[tokio::test]
    async fn host_failure_rolls_back_light_root() {
        let light_nodes = {
            let mut first = RecordingHost::new();
            let out = run(&mut first, &GeneratorConfig::default(), &Assets::placeholder()).await.unwrap();
            out.light.tree.node_count()
        };

        // enough for the light tree plus part of the dark one
        let mut host = RecordingHost::new().with_node_limit(light_nodes + 5);
        let err = run(&mut host, &GeneratorConfig::default(), &Assets::placeholder()).await.unwrap_err();
        assert!(matches!(err, Error::Host(_)));
        assert_eq!(host.live_nodes(), 0);
        assert!(host.viewport().is_empty());
        // images are uploaded before any node and are not rolled back
        assert_eq!(host.snapshot().images.len(), 1);
    }

    #[tokio::test]
    async fn refused_rollback_still_reports_the_failure() {
        let light_nodes = {
            let mut first = RecordingHost::new();
            let out = run(&mut first, &GeneratorConfig::default(), &Assets::placeholder()).await.unwrap();
            out.light.tree.node_count()
        };

        let mut host = RecordingHost::new()
            .with_node_limit(light_nodes + 5)
            .with_refused_removal();
        let err = run(&mut host, &GeneratorConfig::default(), &Assets::placeholder()).await.unwrap_err();
        assert!(matches!(err, Error::Host(_)));
        assert!(host.live_nodes() > 0);
        assert!(host.finished().is_none());
    }
}
