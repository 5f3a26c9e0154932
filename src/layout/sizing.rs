//! Per-child sizing relative to the parent frame.
//!
//! Fill sizing only means something once a node sits inside a parent, so
//! sizing lives on the parent/child edge ([`Child`]) and can only be changed
//! through the [`Attached`] handle that [`Frame::append`] returns. A detached
//! node has no sizing to set.
//!
//! [`Frame::append`]: super::node::Frame::append

use serde::{Deserialize, Serialize};

use super::node::{AxisSizing, Direction, LayoutNode, TextAutoResize};

/// How a child sizes itself along one axis of its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sizing {
    Fixed,
    Hug,
    /// Take all remaining space the parent allocates
    Fill,
}

impl From<AxisSizing> for Sizing {
    fn from(a: AxisSizing) -> Self {
        match a {
            AxisSizing::Fixed => Sizing::Fixed,
            AxisSizing::Auto => Sizing::Hug,
        }
    }
}

/// A node placed in a frame, with its sizing along each of the parent's axes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Child {
    #[serde(flatten)]
    pub node: LayoutNode,
    #[serde(rename = "layoutSizingHorizontal")]
    pub horizontal: Sizing,
    #[serde(rename = "layoutSizingVertical")]
    pub vertical: Sizing,
}

impl Child {
    /// Wrap a node with the sizing its own creation options imply.
    pub fn new(node: LayoutNode) -> Self {
        let (horizontal, vertical) = intrinsic_sizing(&node);
        Self {
            node,
            horizontal,
            vertical,
        }
    }
}

/// Sizing a node gets on attach, before any explicit override.
pub fn intrinsic_sizing(node: &LayoutNode) -> (Sizing, Sizing) {
    match node {
        LayoutNode::Frame(f) => {
            let primary = Sizing::from(f.props.primary_axis_sizing_mode);
            let counter = Sizing::from(f.props.counter_axis_sizing_mode);
            match f.props.layout_mode {
                Direction::Horizontal => (primary, counter),
                Direction::Vertical => (counter, primary),
                Direction::None => (Sizing::Fixed, Sizing::Fixed),
            }
        }
        LayoutNode::Text(t) => match t.style.text_auto_resize {
            None | Some(TextAutoResize::WidthAndHeight) => (Sizing::Hug, Sizing::Hug),
            Some(TextAutoResize::Height) => (Sizing::Fixed, Sizing::Hug),
            Some(TextAutoResize::None) => (Sizing::Fixed, Sizing::Fixed),
        },
    }
}

/// Handle to a freshly attached child
#[derive(Debug)]
pub struct Attached<'a> {
    child: &'a mut Child,
}

impl<'a> Attached<'a> {
    pub(crate) fn new(child: &'a mut Child) -> Self {
        Self { child }
    }

    pub fn horizontal(self, mode: Sizing) -> Self {
        self.child.horizontal = mode;
        self
    }

    pub fn vertical(self, mode: Sizing) -> Self {
        self.child.vertical = mode;
        self
    }

    /// Fill on both axes.
    pub fn fill(self) -> Self {
        self.horizontal(Sizing::Fill).vertical(Sizing::Fill)
    }

    #[cfg(test)]
    pub(crate) fn child(&self) -> &Child {
        &*self.child
    }
}
