//! Structural properties of built paywall trees

use paywallgen::layout::{ImageHash, LayoutNode, Paint, Sizing};
use paywallgen::paywall::{self, ImageSet, PaywallCopy, ROOT_HEIGHT, ROOT_WIDTH};
use paywallgen::{ColorRole, Error, FontFamily, Palette, Theme};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn images() -> ImageSet {
    ImageSet {
        app_icon: ImageHash("icon-hash".into()),
        hero_background: ImageHash("hero-hash".into()),
    }
}

fn build(theme: &Theme) -> paywallgen::Result<LayoutNode> {
    paywall::build(theme, &FontFamily::nunito().font_set(), &images(), &PaywallCopy::default()).map(LayoutNode::from)
}

/// Drop every color value, keeping the rest of the tree.
fn strip_colors(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("color");
            for v in map.values_mut() {
                strip_colors(v);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_colors),
        _ => {}
    }
}

#[test]
fn light_and_dark_differ_only_in_color() {
    let light = build(&Theme::light()).unwrap();
    let dark = build(&Theme::dark()).unwrap();

    assert_eq!(light.node_count(), dark.node_count());
    let names = |n: &LayoutNode| n.descendants().iter().map(|d| d.name().to_string()).collect::<Vec<_>>();
    // roots are named after their theme
    assert_eq!(&names(&light)[1..], &names(&dark)[1..]);

    let mut l = serde_json::to_value(&light).unwrap();
    let mut d = serde_json::to_value(&dark).unwrap();
    strip_colors(&mut l);
    strip_colors(&mut d);
    l["name"] = Value::Null;
    d["name"] = Value::Null;
    assert_eq!(l, d);
}

#[test]
fn fingerprints_ignore_theme_colors() {
    let mut light = Theme::light();
    let dark = Theme::dark();
    light.name = dark.name.clone();
    assert_eq!(build(&light).unwrap().fingerprint(), build(&dark).unwrap().fingerprint());
}

#[test]
fn root_is_390_by_844_and_clipped_for_both_themes() {
    for theme in [Theme::light(), Theme::dark()] {
        let root = build(&theme).unwrap();
        let frame = root.as_frame().unwrap();
        assert_eq!(frame.props.width, Some(ROOT_WIDTH));
        assert_eq!(frame.props.height, Some(ROOT_HEIGHT));
        assert_eq!(frame.props.clips_content, Some(true));
    }
}

#[test]
fn exactly_one_selected_card_and_it_is_yearly() {
    let mut same_colors = Theme::light();
    let card = same_colors.hex(ColorRole::CardBackground).unwrap().to_string();
    same_colors.colors.insert(ColorRole::SelectedCardBackground, card);

    for theme in [Theme::light(), Theme::dark(), same_colors] {
        let root = build(&theme).unwrap();
        let cards = root.find("Packages").unwrap().children();
        assert_eq!(cards.len(), 3);

        let selected: Vec<&str> = cards
            .iter()
            .filter(|c| c.node.as_frame().unwrap().props.selected)
            .map(|c| c.node.name())
            .collect();
        assert_eq!(selected, vec!["Package(yearly)"]);
    }
}

#[test]
fn selected_card_uses_the_selected_colors() {
    let palette = Palette::resolve(&Theme::dark()).unwrap();
    let root = build(&Theme::dark()).unwrap();
    for card in root.find("Packages").unwrap().children() {
        let frame = card.node.as_frame().unwrap();
        let expected = if frame.props.selected {
            palette.selected_card_background
        } else {
            palette.card_background
        };
        assert_eq!(frame.props.fills, vec![Paint::solid(expected, 1.0)]);
    }
}

#[test]
fn package_cards_share_the_row_equally() {
    let root = build(&Theme::light()).unwrap();
    for card in root.find("Packages").unwrap().children() {
        assert_eq!(card.horizontal, Sizing::Fill);
        assert_eq!(card.vertical, Sizing::Fill);
        let frame = card.node.as_frame().unwrap();
        assert_eq!(frame.props.corner_radius, 16.0);
        assert_eq!(frame.props.stroke.as_ref().unwrap().weight, 2.0);
    }
}

#[test]
fn footer_has_three_labels_and_two_separators() {
    for theme in [Theme::light(), Theme::dark()] {
        let root = build(&theme).unwrap();
        let footer = root.find("Footer").unwrap();
        let texts: Vec<String> = footer
            .descendants()
            .into_iter()
            .filter_map(LayoutNode::as_text)
            .map(|t| t.characters.clone())
            .collect();
        let separators = texts.iter().filter(|t| t.as_str() == "\u{00B7}").count();
        assert_eq!(texts.len() - separators, 3);
        assert_eq!(separators, 2);
        assert!(footer.find("Button(action=restore_purchases)").is_some());
    }
}

#[test]
fn text_nodes_are_leaves() {
    let root = build(&Theme::dark()).unwrap();
    for node in root.descendants() {
        if node.as_text().is_some() {
            assert!(node.children().is_empty());
        }
    }
}

#[test]
fn every_missing_role_is_reported() {
    for role in ColorRole::ALL {
        let mut theme = Theme::light();
        theme.colors.remove(&role);
        match build(&theme) {
            Err(Error::MissingThemeField { field, .. }) => assert_eq!(field, role.key()),
            other => panic!("{:?}: expected MissingThemeField, got {:?}", role, other.map(|n| n.node_count())),
        }
    }
}
