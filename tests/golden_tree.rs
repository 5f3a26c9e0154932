//! Golden outlines of the built light and dark trees.
//!
//! Each fixture under `tests/goldens/expected` lists every node with its
//! kind, sizing in the parent, fixed size, paints, text and font. Run with
//! `UPDATE_GOLDENS=1` to rewrite the fixtures after an intended change.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use paywallgen::layout::{Child, ImageHash, LayoutNode, Paint};
use paywallgen::paywall::{self, ImageSet, PaywallCopy};
use paywallgen::{FontFamily, Theme};
use pretty_assertions::assert_eq;

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn paints(paints: &[Paint]) -> String {
    paints
        .iter()
        .map(|paint| match paint {
            Paint::Solid { color, .. } => {
                let [r, g, b] = color.to_bytes();
                format!("#{:02X}{:02X}{:02X}", r, g, b)
            }
            Paint::Image { image_hash, .. } => format!("image:{}", image_hash),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn render(node: &LayoutNode, edge: Option<&Child>, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    if let Some(child) = edge {
        write!(out, "[{:?}/{:?}] ", child.horizontal, child.vertical).unwrap();
    }
    match node {
        LayoutNode::Frame(f) => {
            let p = &f.props;
            write!(out, "FRAME \"{}\" {:?}", p.name, p.layout_mode).unwrap();
            if let (Some(w), Some(h)) = (p.width, p.height) {
                write!(out, " {}x{}", w, h).unwrap();
            }
            if !p.fills.is_empty() {
                write!(out, " fill={}", paints(&p.fills)).unwrap();
            }
            if let Some(stroke) = &p.stroke {
                write!(out, " stroke={}", paints(&stroke.paints)).unwrap();
            }
            if p.selected {
                out.push_str(" selected");
            }
        }
        LayoutNode::Text(t) => {
            write!(out, "TEXT \"{}\"", t.characters).unwrap();
            if let Some(name) = &t.name {
                write!(out, " as \"{}\"", name).unwrap();
            }
            let font = &t.style.font_name;
            write!(out, " {} {} {}", font.family, font.style, t.style.font_size).unwrap();
            write!(out, " fill={}", paints(&t.fills)).unwrap();
        }
    }
    out.push('\n');
    for child in node.children() {
        render(&child.node, Some(child), depth + 1, out);
    }
}

fn outline_for(theme: &Theme) -> String {
    let images = ImageSet {
        app_icon: ImageHash("icon".into()),
        hero_background: ImageHash("hero".into()),
    };
    let root = paywall::build(theme, &FontFamily::nunito().font_set(), &images, &PaywallCopy::default())
        .expect("build failed");
    let mut out = String::new();
    render(&LayoutNode::from(root), None, 0, &mut out);
    out
}

fn check_golden(name: &str, theme: &Theme) {
    let outline = outline_for(theme);
    let expected_path = golden_path(name);
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &outline).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
        panic!(
            "unable to read golden {:?} ({}); run with UPDATE_GOLDENS=1 to create it",
            expected_path, e
        )
    });
    assert_eq!(outline.trim_end(), exp.trim_end());
}

#[test]
fn golden_light_tree_matches_fixture() {
    check_golden("light_tree.txt", &Theme::light());
}

#[test]
fn golden_dark_tree_matches_fixture() {
    check_golden("dark_tree.txt", &Theme::dark());
}
