/// Auto-layout frames and text leaves, plus the factories that build them

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::paint::{Paint, Stroke, StrokeAlign};
use super::sizing::{Attached, Child};

/// Stroke weight used when a border is requested without one
pub const DEFAULT_STROKE_WEIGHT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Vertical,
    Horizontal,
    None,
}

/// Sizing of a frame along its own primary or counter axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisSizing {
    Fixed,
    /// Hug contents
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Align {
    Min,
    Center,
    Max,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Padding shorthand as written at a call site.
///
/// Resolution per side: explicit side, then the axis shorthand (`x` for
/// left/right, `y` for top/bottom), then `all`, then 0. An explicit
/// `Some(0.0)` wins over any shorthand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddingSpec {
    pub all: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl PaddingSpec {
    pub fn all(v: f64) -> Self {
        Self { all: Some(v), ..Default::default() }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    pub fn x(mut self, v: f64) -> Self {
        self.x = Some(v);
        self
    }

    pub fn y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }

    pub fn top(mut self, v: f64) -> Self {
        self.top = Some(v);
        self
    }

    pub fn bottom(mut self, v: f64) -> Self {
        self.bottom = Some(v);
        self
    }

    pub fn left(mut self, v: f64) -> Self {
        self.left = Some(v);
        self
    }

    pub fn right(mut self, v: f64) -> Self {
        self.right = Some(v);
        self
    }

    pub fn resolve(&self) -> Padding {
        let pick = |side: Option<f64>, axis: Option<f64>| side.or(axis).or(self.all).unwrap_or(0.0);
        Padding {
            top: pick(self.top, self.y),
            right: pick(self.right, self.x),
            bottom: pick(self.bottom, self.y),
            left: pick(self.left, self.x),
        }
    }
}

/// Declarative options for [`make_container`]. Everything defaults to
/// "unset": hug on both axes, no gap, no padding, transparent, square corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOptions {
    pub primary_sizing: AxisSizing,
    pub counter_sizing: AxisSizing,
    pub gap: f64,
    pub padding: PaddingSpec,
    pub fills: Vec<Paint>,
    /// Only meaningful when the matching axis is fixed; `None` leaves that
    /// axis at whatever size the host computes.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub corner_radius: f64,
    pub stroke: Option<Vec<Paint>>,
    /// Defaults to [`DEFAULT_STROKE_WEIGHT`]
    pub stroke_weight: Option<f64>,
    pub primary_align: Option<Align>,
    pub counter_align: Option<Align>,
    pub clips_content: Option<bool>,
    /// Marks the chosen option in a group of alternatives
    pub selected: bool,
}

/// Resolved properties of a frame, without its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameProps {
    pub name: String,
    pub layout_mode: Direction,
    pub primary_axis_sizing_mode: AxisSizing,
    pub counter_axis_sizing_mode: AxisSizing,
    pub item_spacing: f64,
    pub padding: Padding,
    pub fills: Vec<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub corner_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_axis_align_items: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_items: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clips_content: Option<bool>,
    /// The active option of a selector group, independent of how it is painted
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    #[serde(flatten)]
    pub props: FrameProps,
    pub children: Vec<Child>,
}

impl Frame {
    /// Attach `child` as the last child. Sizing relative to this frame can
    /// then be set on the returned handle.
    pub fn append(&mut self, child: impl Into<LayoutNode>) -> Attached<'_> {
        let child = Child::new(child.into());
        self.children.push(child);
        let last = self.children.len() - 1;
        Attached::new(&mut self.children[last])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl std::fmt::Display for FontName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    /// Fixed box
    None,
    WidthAndHeight,
    Height,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_name: FontName,
    pub font_size: f64,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_auto_resize: Option<TextAutoResize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOptions {
    pub name: Option<String>,
    pub letter_spacing: Option<f64>,
    pub line_height: Option<f64>,
    pub align: Option<TextAlign>,
    pub auto_resize: Option<TextAutoResize>,
}

/// A text leaf. Text nodes never have children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    /// Layer name; hosts name unnamed text after its characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub characters: String,
    #[serde(flatten)]
    pub style: TextStyle,
    pub fills: Vec<Paint>,
}

impl Text {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.characters)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutNode {
    Frame(Frame),
    Text(Text),
}

impl From<Frame> for LayoutNode {
    fn from(f: Frame) -> Self {
        LayoutNode::Frame(f)
    }
}

impl From<Text> for LayoutNode {
    fn from(t: Text) -> Self {
        LayoutNode::Text(t)
    }
}

impl LayoutNode {
    pub fn name(&self) -> &str {
        match self {
            LayoutNode::Frame(f) => &f.props.name,
            LayoutNode::Text(t) => t.name(),
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            LayoutNode::Frame(f) => Some(f),
            LayoutNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            LayoutNode::Text(t) => Some(t),
            LayoutNode::Frame(_) => None,
        }
    }

    pub fn children(&self) -> &[Child] {
        match self {
            LayoutNode::Frame(f) => &f.children,
            LayoutNode::Text(_) => &[],
        }
    }

    /// This node and all descendants, depth-first pre-order.
    pub fn descendants(&self) -> Vec<&LayoutNode> {
        let mut out = vec![self];
        for c in self.children() {
            out.extend(c.node.descendants());
        }
        out
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node.node_count()).sum::<usize>()
    }

    /// First node (depth-first) with the given layer name.
    pub fn find(&self, name: &str) -> Option<&LayoutNode> {
        self.descendants().into_iter().find(|n| n.name() == name)
    }

    /// Hex SHA-256 over everything but color values: names, kinds, nesting,
    /// geometry, sizing, text and fonts. Two trees built from different
    /// themes have equal fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        self.feed(&mut hasher, 0);
        hex::encode(hasher.finalize())
    }

    fn feed(&self, hasher: &mut Sha256, depth: usize) {
        let paints = |fills: &[Paint]| fills.iter().map(Paint::shape).collect::<Vec<_>>().join(",");
        let line = match self {
            LayoutNode::Frame(f) => {
                let p = &f.props;
                format!(
                    "{}FRAME|{}|{:?}|{:?}/{:?}|{}|{:?}|{}|{:?}x{:?}|{}|{}|{:?}/{:?}|{:?}|{}\n",
                    depth,
                    p.name,
                    p.layout_mode,
                    p.primary_axis_sizing_mode,
                    p.counter_axis_sizing_mode,
                    p.item_spacing,
                    p.padding,
                    paints(&p.fills),
                    p.width,
                    p.height,
                    p.corner_radius,
                    p.stroke
                        .as_ref()
                        .map(|s| format!("{}@{}:{:?}", paints(&s.paints), s.weight, s.align))
                        .unwrap_or_default(),
                    p.primary_axis_align_items,
                    p.counter_axis_align_items,
                    p.clips_content,
                    p.selected,
                )
            }
            LayoutNode::Text(t) => format!(
                "{}TEXT|{}|{}|{:?}|{}\n",
                depth,
                t.name(),
                t.characters,
                t.style,
                paints(&t.fills),
            ),
        };
        hasher.update(line.as_bytes());
        for c in self.children() {
            hasher.update(format!("{:?}/{:?}\n", c.horizontal, c.vertical).as_bytes());
            c.node.feed(hasher, depth + 1);
        }
    }
}

/// Create an auto-layout frame.
pub fn make_container(name: impl Into<String>, direction: Direction, options: FrameOptions) -> Frame {
    let stroke = options.stroke.map(|paints| Stroke {
        paints,
        weight: options.stroke_weight.unwrap_or(DEFAULT_STROKE_WEIGHT),
        align: StrokeAlign::Inside,
    });

    Frame {
        props: FrameProps {
            name: name.into(),
            layout_mode: direction,
            primary_axis_sizing_mode: options.primary_sizing,
            counter_axis_sizing_mode: options.counter_sizing,
            item_spacing: options.gap,
            padding: options.padding.resolve(),
            fills: options.fills,
            width: options.width,
            height: options.height,
            corner_radius: options.corner_radius,
            stroke,
            primary_axis_align_items: options.primary_align,
            counter_axis_align_items: options.counter_align,
            clips_content: options.clips_content,
            selected: options.selected,
        },
        children: Vec::new(),
    }
}

/// Create a text leaf.
pub fn make_text(content: impl Into<String>, font: &FontName, size: f64, fills: Vec<Paint>, options: TextOptions) -> Text {
    Text {
        name: options.name,
        characters: content.into(),
        style: TextStyle {
            font_name: font.clone(),
            font_size: size,
            letter_spacing: options.letter_spacing,
            line_height: options.line_height,
            text_align_horizontal: options.align,
            text_auto_resize: options.auto_resize,
        },
        fills,
    }
}
