//! Paywall screen composition
//!
//! [`build`] turns a theme into the full screen tree: hero, headline and
//! subtitle, feature list, package selector, call-to-action, a flexible
//! spacer and the footer. It is a pure function of its inputs; nothing is
//! created on a host until the finished tree is committed.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::fonts::FontSet;
use crate::layout::{
    make_container, make_text, Align, AxisSizing, Direction, FontName, Frame, FrameOptions, ImageHash, PaddingSpec, Paint,
    ScaleMode, Sizing, Text, TextAlign, TextAutoResize, TextOptions,
};
use crate::theme::{Palette, Theme};
use crate::Result;

pub const ROOT_WIDTH: f64 = 390.0;
pub const ROOT_HEIGHT: f64 = 844.0;
pub const HERO_HEIGHT: f64 = 280.0;
pub const ICON_SIZE: f64 = 144.0;

/// The plan whose card is highlighted and badged
pub const SELECTED_PLAN: Plan = Plan::Yearly;

const CHECKMARK: &str = "\u{2713}";
const SEPARATOR: &str = "\u{00B7}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Monthly,
    Yearly,
    Lifetime,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Monthly, Plan::Yearly, Plan::Lifetime];

    pub fn identifier(self) -> &'static str {
        match self {
            Plan::Monthly => "monthly",
            Plan::Yearly => "yearly",
            Plan::Lifetime => "lifetime",
        }
    }

    /// Layer name of the plan's card, as the importer expects it
    pub fn layer_name(self) -> String {
        format!("Package({})", self.identifier())
    }
}

/// Uploaded images the screen paints with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    pub app_icon: ImageHash,
    pub hero_background: ImageHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCopy {
    pub label: String,
    pub price: String,
    pub period: String,
    #[serde(default)]
    pub breakdown: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packages {
    pub monthly: PackageCopy,
    pub yearly: PackageCopy,
    pub lifetime: PackageCopy,
}

impl Packages {
    pub fn get(&self, plan: Plan) -> &PackageCopy {
        match plan {
            Plan::Monthly => &self.monthly,
            Plan::Yearly => &self.yearly,
            Plan::Lifetime => &self.lifetime,
        }
    }
}

/// Every user-visible string on the screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaywallCopy {
    pub headline: String,
    pub subtitle: String,
    pub features: [String; 4],
    pub packages: Packages,
    pub badge: String,
    pub cta: String,
    pub restore: String,
    pub terms: String,
    pub privacy: String,
}

impl Default for PaywallCopy {
    fn default() -> Self {
        let package = |label: &str, price: &str, period: &str, breakdown: Option<&str>| PackageCopy {
            label: label.into(),
            price: price.into(),
            period: period.into(),
            breakdown: breakdown.map(String::from),
        };
        Self {
            headline: "Grow without limits".into(),
            subtitle: "Unlock unlimited plants, seasons, frost alerts & more with Furrow Pro.".into(),
            features: [
                "Unlimited plants & seasons".into(),
                "Frost alerts for every location".into(),
                "Full harvest tracking & journal".into(),
                "Priority support".into(),
            ],
            packages: Packages {
                monthly: package("MONTHLY", "$2.99", "/month", None),
                yearly: package("YEARLY", "$19.99", "/year", Some("$1.67/mo \u{2014} Save 44%")),
                lifetime: package("LIFETIME", "$49.99", "one time", Some("Pay once, grow forever")),
            },
            badge: "BEST VALUE".into(),
            cta: "Start Growing Pro".into(),
            restore: "Restore Purchases".into(),
            terms: "Terms".into(),
            privacy: "Privacy".into(),
        }
    }
}

fn solid(c: Rgb) -> Vec<Paint> {
    vec![Paint::solid(c, 1.0)]
}

fn fixed(width: f64, height: f64) -> FrameOptions {
    FrameOptions {
        primary_sizing: AxisSizing::Fixed,
        counter_sizing: AxisSizing::Fixed,
        width: Some(width),
        height: Some(height),
        ..Default::default()
    }
}

fn padded(padding: PaddingSpec) -> FrameOptions {
    FrameOptions {
        padding,
        ..Default::default()
    }
}

fn centered(options: FrameOptions) -> FrameOptions {
    FrameOptions {
        primary_align: Some(Align::Center),
        counter_align: Some(Align::Center),
        ..options
    }
}

/// Build the whole screen for one theme.
///
/// The theme is fully resolved first, so a missing or malformed role fails
/// before any node exists.
pub fn build(theme: &Theme, fonts: &FontSet, images: &ImageSet, copy: &PaywallCopy) -> Result<Frame> {
    let palette = Palette::resolve(theme)?;
    let p = &palette;

    let mut root = make_container(
        p.name.clone(),
        Direction::Vertical,
        FrameOptions {
            fills: solid(p.background),
            clips_content: Some(true),
            ..fixed(ROOT_WIDTH, ROOT_HEIGHT)
        },
    );

    root.append(hero(images)).horizontal(Sizing::Fill).vertical(Sizing::Fixed);
    root.append(content(p, fonts, copy)).horizontal(Sizing::Fill).vertical(Sizing::Hug);
    root.append(call_to_action(p, fonts, copy)).horizontal(Sizing::Fill).vertical(Sizing::Hug);
    // Absorbs leftover height so the footer sits at the bottom edge
    root.append(make_container("Spacer", Direction::Vertical, FrameOptions::default())).fill();
    root.append(footer(p, fonts, copy)).horizontal(Sizing::Fill).vertical(Sizing::Hug);

    Ok(root)
}

fn hero(images: &ImageSet) -> Frame {
    let mut hero = make_container(
        "Hero",
        Direction::Vertical,
        centered(FrameOptions {
            fills: vec![Paint::image(images.hero_background.clone(), ScaleMode::Fill)],
            clips_content: Some(true),
            ..fixed(ROOT_WIDTH, HERO_HEIGHT)
        }),
    );
    hero.append(make_container(
        "App Icon",
        Direction::Vertical,
        centered(FrameOptions {
            fills: vec![Paint::image(images.app_icon.clone(), ScaleMode::Fill)],
            corner_radius: 28.0,
            clips_content: Some(true),
            ..fixed(ICON_SIZE, ICON_SIZE)
        }),
    ));
    hero
}

fn content(p: &Palette, fonts: &FontSet, copy: &PaywallCopy) -> Frame {
    let mut content = make_container(
        "Content",
        Direction::Vertical,
        padded(PaddingSpec::default().x(24.0).top(20.0)),
    );

    content.append(make_text(
        &copy.headline,
        &fonts.extra_bold,
        28.0,
        solid(p.headline),
        TextOptions {
            name: Some("Headline".into()),
            auto_resize: Some(TextAutoResize::WidthAndHeight),
            ..Default::default()
        },
    ));

    let mut subtitle_wrap = make_container("Subtitle Wrap", Direction::Vertical, padded(PaddingSpec::default().top(8.0)));
    subtitle_wrap
        .append(make_text(
            &copy.subtitle,
            &fonts.regular,
            16.0,
            solid(p.subtitle),
            TextOptions {
                name: Some("Subtitle".into()),
                auto_resize: Some(TextAutoResize::Height),
                line_height: Some(22.0),
                ..Default::default()
            },
        ))
        .horizontal(Sizing::Fill);
    content.append(subtitle_wrap).horizontal(Sizing::Fill).vertical(Sizing::Hug);

    let mut features = make_container(
        "Features",
        Direction::Vertical,
        FrameOptions {
            gap: 12.0,
            ..Default::default()
        },
    );
    for feature in &copy.features {
        features
            .append(feature_row(p, fonts, feature))
            .horizontal(Sizing::Fill)
            .vertical(Sizing::Hug);
    }
    let mut features_wrap = make_container("Features Wrap", Direction::Vertical, padded(PaddingSpec::default().top(24.0)));
    features_wrap.append(features).horizontal(Sizing::Fill).vertical(Sizing::Hug);
    content.append(features_wrap).horizontal(Sizing::Fill).vertical(Sizing::Hug);

    let mut packages = make_container(
        "Packages",
        Direction::Horizontal,
        FrameOptions {
            gap: 10.0,
            ..Default::default()
        },
    );
    for plan in Plan::ALL {
        // Filling both axes keeps the three cards equal in width and height
        packages.append(package_card(p, fonts, plan, copy)).fill();
    }
    let mut packages_wrap = make_container("Packages Wrap", Direction::Vertical, padded(PaddingSpec::default().top(28.0)));
    packages_wrap.append(packages).horizontal(Sizing::Fill).vertical(Sizing::Hug);
    content.append(packages_wrap).horizontal(Sizing::Fill).vertical(Sizing::Hug);

    content
}

fn feature_row(p: &Palette, fonts: &FontSet, label: &str) -> Frame {
    let mut row = make_container(
        "Feature Row",
        Direction::Horizontal,
        FrameOptions {
            gap: 12.0,
            counter_align: Some(Align::Center),
            ..Default::default()
        },
    );
    row.append(make_text(
        CHECKMARK,
        &fonts.bold,
        20.0,
        solid(p.checkmark),
        TextOptions {
            name: Some("Icon(check)".into()),
            ..Default::default()
        },
    ));
    row.append(make_text(
        label,
        &fonts.semi_bold,
        15.0,
        solid(p.body_text),
        TextOptions {
            auto_resize: Some(TextAutoResize::Height),
            ..Default::default()
        },
    ))
    .horizontal(Sizing::Fill);
    row
}

fn centered_text(content: &str, font: &FontName, size: f64, color: Rgb, options: TextOptions) -> Text {
    make_text(
        content,
        font,
        size,
        solid(color),
        TextOptions {
            align: Some(TextAlign::Center),
            ..options
        },
    )
}

fn package_card(p: &Palette, fonts: &FontSet, plan: Plan, copy: &PaywallCopy) -> Frame {
    let selected = plan == SELECTED_PLAN;
    let package = copy.packages.get(plan);

    let mut card = make_container(
        plan.layer_name(),
        Direction::Vertical,
        centered(FrameOptions {
            gap: 2.0,
            padding: PaddingSpec::default()
                .top(if selected { 18.0 } else { 14.0 })
                .bottom(14.0)
                .x(8.0),
            fills: solid(if selected { p.selected_card_background } else { p.card_background }),
            corner_radius: 16.0,
            stroke: Some(solid(if selected { p.selected_border } else { p.unselected_border })),
            stroke_weight: Some(2.0),
            selected,
            ..Default::default()
        }),
    );

    if selected {
        let mut badge = make_container(
            "Badge",
            Direction::Horizontal,
            centered(FrameOptions {
                padding: PaddingSpec::xy(10.0, 3.0),
                fills: solid(p.badge_background),
                corner_radius: 20.0,
                ..Default::default()
            }),
        );
        badge.append(make_text(
            &copy.badge,
            &fonts.extra_bold,
            9.0,
            solid(p.badge_text),
            TextOptions {
                letter_spacing: Some(0.5),
                ..Default::default()
            },
        ));
        card.append(badge);
    }

    card.append(centered_text(
        &package.label,
        &fonts.bold,
        11.0,
        p.price_name,
        TextOptions {
            letter_spacing: Some(0.5),
            ..Default::default()
        },
    ));
    card.append(centered_text(&package.price, &fonts.extra_bold, 22.0, p.price_label, TextOptions::default()));
    card.append(centered_text(&package.period, &fonts.regular, 11.0, p.price_period, TextOptions::default()));
    if let Some(breakdown) = &package.breakdown {
        card.append(centered_text(
            breakdown,
            &fonts.semi_bold,
            10.0,
            p.price_breakdown,
            TextOptions {
                line_height: Some(14.0),
                ..Default::default()
            },
        ))
        .horizontal(Sizing::Fill);
    }
    card
}

fn call_to_action(p: &Palette, fonts: &FontSet, copy: &PaywallCopy) -> Frame {
    let mut button = make_container(
        "Purchase Button",
        Direction::Horizontal,
        centered(FrameOptions {
            padding: PaddingSpec::default().y(16.0),
            fills: solid(p.cta_background),
            corner_radius: 12.0,
            ..Default::default()
        }),
    );
    button.append(centered_text(
        &copy.cta,
        &fonts.extra_bold,
        17.0,
        p.cta_text,
        TextOptions {
            letter_spacing: Some(0.3),
            ..Default::default()
        },
    ));

    let mut wrap = make_container("CTA Wrap", Direction::Vertical, padded(PaddingSpec::default().x(24.0).top(20.0)));
    wrap.append(button).horizontal(Sizing::Fill).vertical(Sizing::Hug);
    wrap
}

fn footer(p: &Palette, fonts: &FontSet, copy: &PaywallCopy) -> Frame {
    let link = |label: &str| make_text(label, &fonts.semi_bold, 12.0, solid(p.footer_text), TextOptions::default());
    let separator = || make_text(SEPARATOR, &fonts.regular, 12.0, solid(p.footer_separator), TextOptions::default());

    let mut footer = make_container(
        "Footer",
        Direction::Horizontal,
        centered(FrameOptions {
            gap: 6.0,
            padding: PaddingSpec::default().top(16.0).bottom(34.0),
            ..Default::default()
        }),
    );

    let mut restore = make_container(
        "Button(action=restore_purchases)",
        Direction::Horizontal,
        centered(FrameOptions::default()),
    );
    restore.append(link(&copy.restore));

    footer.append(restore);
    footer.append(separator());
    footer.append(link(&copy.terms));
    footer.append(separator());
    footer.append(link(&copy.privacy));
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontFamily;
    use crate::layout::LayoutNode;
    use crate::theme::ColorRole;
    use crate::Error;

    fn images() -> ImageSet {
        ImageSet {
            app_icon: ImageHash("icon".into()),
            hero_background: ImageHash("hero".into()),
        }
    }

    fn build_with(theme: &Theme) -> Result<LayoutNode> {
        build(theme, &FontFamily::nunito().font_set(), &images(), &PaywallCopy::default()).map(LayoutNode::from)
    }

    fn child_names(node: &LayoutNode) -> Vec<&str> {
        node.children().iter().map(|c| c.node.name()).collect()
    }

    #[test]
    fn root_is_fixed_and_clipped() {
        let root = build(&Theme::light(), &FontFamily::inter().font_set(), &images(), &PaywallCopy::default()).unwrap();
        assert_eq!(root.props.width, Some(ROOT_WIDTH));
        assert_eq!(root.props.height, Some(ROOT_HEIGHT));
        assert_eq!(root.props.clips_content, Some(true));
        assert_eq!(root.props.name, "Furrow / Paywall / Light");
    }

    #[test]
    fn sections_in_order() {
        let root = build_with(&Theme::dark()).unwrap();
        assert_eq!(child_names(&root), vec!["Hero", "Content", "CTA Wrap", "Spacer", "Footer"]);

        let spacer = &root.children()[3];
        assert_eq!((spacer.horizontal, spacer.vertical), (Sizing::Fill, Sizing::Fill));
        assert!(spacer.node.children().is_empty());
    }

    #[test]
    fn hero_paints_images() {
        let root = build_with(&Theme::light()).unwrap();
        let hero = root.find("Hero").and_then(LayoutNode::as_frame).unwrap();
        assert_eq!(hero.props.height, Some(HERO_HEIGHT));
        assert_eq!(hero.props.fills, vec![Paint::image(ImageHash("hero".into()), ScaleMode::Fill)]);

        let icon = root.find("App Icon").and_then(LayoutNode::as_frame).unwrap();
        assert_eq!((icon.props.width, icon.props.height), (Some(ICON_SIZE), Some(ICON_SIZE)));
        assert_eq!(icon.props.corner_radius, 28.0);
        assert_eq!(icon.props.fills, vec![Paint::image(ImageHash("icon".into()), ScaleMode::Fill)]);
    }

    #[test]
    fn four_feature_rows_with_filling_labels() {
        let root = build_with(&Theme::light()).unwrap();
        let features = root.find("Features").unwrap();
        assert_eq!(features.children().len(), 4);
        for row in features.children() {
            assert_eq!(child_names(&row.node)[0], "Icon(check)");
            assert_eq!(row.node.children()[1].horizontal, Sizing::Fill);
        }
    }

    #[test]
    fn only_yearly_is_selected_and_badged() {
        let palette = Palette::resolve(&Theme::light()).unwrap();
        let root = build_with(&Theme::light()).unwrap();
        let packages = root.find("Packages").unwrap();
        assert_eq!(child_names(packages), vec!["Package(monthly)", "Package(yearly)", "Package(lifetime)"]);

        for card in packages.children() {
            assert_eq!((card.horizontal, card.vertical), (Sizing::Fill, Sizing::Fill));
            let frame = card.node.as_frame().unwrap();
            let stroke = frame.props.stroke.as_ref().unwrap();
            let is_yearly = frame.props.name == SELECTED_PLAN.layer_name();
            assert_eq!(frame.props.selected, is_yearly);
            let expected = if is_yearly { palette.selected_border } else { palette.unselected_border };
            assert_eq!(stroke.paints, solid(expected));
            assert_eq!(card.node.find("Badge").is_some(), is_yearly);
        }
    }

    #[test]
    fn selection_survives_identical_card_colors() {
        let mut theme = Theme::light();
        let plain = theme.hex(ColorRole::CardBackground).unwrap().to_string();
        let border = theme.hex(ColorRole::UnselectedBorder).unwrap().to_string();
        theme.colors.insert(ColorRole::SelectedCardBackground, plain);
        theme.colors.insert(ColorRole::SelectedBorder, border);

        let root = build_with(&theme).unwrap();
        let selected: Vec<&str> = root
            .find("Packages")
            .unwrap()
            .children()
            .iter()
            .filter_map(|c| c.node.as_frame())
            .filter(|f| f.props.selected)
            .map(|f| f.props.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Package(yearly)"]);
    }

    #[test]
    fn monthly_has_no_breakdown() {
        let root = build_with(&Theme::light()).unwrap();
        assert_eq!(root.find("Package(monthly)").unwrap().children().len(), 3);
        assert_eq!(root.find("Package(lifetime)").unwrap().children().len(), 4);
        // badge + label + price + period + breakdown
        assert_eq!(root.find("Package(yearly)").unwrap().children().len(), 5);
    }

    #[test]
    fn footer_has_three_links_and_two_separators() {
        let root = build_with(&Theme::dark()).unwrap();
        let footer = root.find("Footer").unwrap();
        let texts: Vec<&str> = footer
            .descendants()
            .into_iter()
            .filter_map(LayoutNode::as_text)
            .map(|t| t.characters.as_str())
            .collect();
        assert_eq!(texts, vec!["Restore Purchases", SEPARATOR, "Terms", SEPARATOR, "Privacy"]);
    }

    #[test]
    fn missing_theme_field_fails_before_building() {
        let mut theme = Theme::light();
        theme.colors.remove(&ColorRole::Checkmark);
        match build_with(&theme) {
            Err(Error::MissingThemeField { field, .. }) => assert_eq!(field, "checkmark"),
            other => panic!("expected MissingThemeField, got {:?}", other.map(|n| n.node_count())),
        }
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(build_with(&Theme::light()).unwrap(), build_with(&Theme::light()).unwrap());
    }
}
