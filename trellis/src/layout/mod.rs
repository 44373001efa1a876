//! Layout System for Trellis
//!
//! Resolves a tree of box nodes into integer pixel rectangles. Sizes follow
//! a box model (pixels, percentages of the parent content box, or `auto`
//! from content) and flex containers distribute their main axis among
//! children.
//!
//! # Architecture
//!
//! ```text
//! TreeBuilder -> Tree -> build() -> ResolvedTree -> DisplayList
//! ```
//!
//! `build` is one combined pass: placement runs top-down from the viewport,
//! and any `auto` size it needs is measured bottom-up on demand and memoized
//! for the rest of the pass. Nothing survives between frames.

pub mod cache;
pub mod context;
pub mod flex;
pub mod length;
pub mod measure;
pub mod node;
pub mod pass;
pub mod resolve;
pub mod tree;

pub use context::{Extent, LayoutContext};
pub use length::{
    AlignItems, FlexContainer, FlexDirection, FlexItem, FlexWrap, JustifyContent, Length,
};
pub use measure::{ContentMeasurer, MonospaceMeasurer};
pub use node::{
    Container, ContainerLayout, Geometry, ImageContent, InputContent, IntrinsicSize, Node,
    NodeKind, PathCommand, RectangleStyle, ScaleMode, ScrollLayer, TextAlign, TextContent,
    VectorContent,
};
pub use pass::{ResolvedNode, ResolvedTree, build};
pub use resolve::{ResolvedBox, resolve};
pub use tree::{NodeId, Tree, TreeBuilder};
