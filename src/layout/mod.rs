//! Layout tree primitives
//!
//! Frames and text leaves are built from declarative options, attached to a
//! parent, and sized relative to it on the returned handle:
//!
//! ```text
//! make_container/make_text -> Frame::append -> Attached::{horizontal, vertical}
//! ```

pub mod node;
pub mod paint;
pub mod sizing;

pub use node::{
    make_container, make_text, Align, AxisSizing, Direction, FontName, Frame, FrameOptions, FrameProps,
    LayoutNode, Padding, PaddingSpec, Text, TextAlign, TextAutoResize, TextOptions, TextStyle,
};
pub use paint::{ImageHash, Paint, ScaleMode, Stroke, StrokeAlign};
pub use sizing::{Attached, Child, Sizing};
