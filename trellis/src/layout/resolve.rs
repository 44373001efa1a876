//! Size Resolver.
//!
//! Turns a node's geometry intent into pixels against its parent's content
//! box. Pixel values pass through, percentages round against the parent
//! content dimension, and `auto` sizes come from content: the primitive's
//! intrinsic size for leaves, or the arranged extent of children for
//! containers. Content sizes are computed bottom-up on demand and memoized
//! in the context's [`MeasureCache`](super::cache::MeasureCache).

use serde::Serialize;

use super::cache::MeasureKey;
use super::context::{Extent, LayoutContext};
use super::flex;
use super::length::Length;
use super::node::{ContainerLayout, Node, NodeKind};
use super::tree::NodeId;
use crate::primitives::{Rect, Size};

/// A node's resolved outer (border-box) rect and its content rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedBox {
    pub outer: Rect,
    pub content: Rect,
}

impl ResolvedBox {
    pub fn new(outer: Rect, node: &Node) -> Self {
        Self {
            outer,
            content: outer.inset(node.padding),
        }
    }
}

/// Resolve a node positioned by its own x/y inside `parent_content`.
///
/// Margins offset the node from the position it asks for but never shrink
/// its own box.
pub fn resolve(ctx: &mut LayoutContext<'_>, id: NodeId, parent_content: Rect) -> ResolvedBox {
    let node = ctx.node(id);
    let parent = Extent::of_rect(parent_content);
    let size = ctx.outer_size(id, parent, Extent::NONE);

    let x = node.geometry.x.resolve(parent_content.width).unwrap_or(0);
    let y = node.geometry.y.resolve(parent_content.height).unwrap_or(0);
    let outer = Rect::new(
        parent_content.x + x + node.margin.left,
        parent_content.y + y + node.margin.top,
        size.width,
        size.height,
    );
    ResolvedBox::new(outer, node)
}

impl LayoutContext<'_> {
    /// Outer size of `id` given its parent's content size (where known) and
    /// any sizes the parent's layout imposes.
    ///
    /// Percentages against an unknown parent dimension behave like `auto`.
    /// Negative results clamp to 0.
    pub fn outer_size(&mut self, id: NodeId, parent: Extent, forced: Extent) -> Size {
        let key = MeasureKey {
            node: id,
            parent: (parent.width, parent.height),
            forced: (forced.width, forced.height),
        };
        if let Some(size) = self.cache.get(&key) {
            return size;
        }

        let size = self.compute_outer_size(id, parent, forced);

        self.cache.insert(key, size);
        size
    }

    fn compute_outer_size(&mut self, id: NodeId, parent: Extent, forced: Extent) -> Size {
        let node = self.node(id);
        let pad_h = node.padding.horizontal();
        let pad_v = node.padding.vertical();

        let width = forced.width.or_else(|| resolve_against(&node.geometry.width, parent.width));
        let height = forced
            .height
            .or_else(|| resolve_against(&node.geometry.height, parent.height));

        if let (Some(w), Some(h)) = (width, height) {
            return Size::new(w.max(0), h.max(0));
        }

        // Width text may wrap within: our own width if known, else whatever
        // the parent offers after our margins.
        let wrap_width = match width {
            Some(w) => Some(w - pad_h),
            None => parent.width.map(|pw| pw - node.margin.horizontal() - pad_h),
        }
        .map(|w| w.max(0));

        // An auto-width row lays its lines out within the width on offer, so
        // it wraps and shrinks the same way it will once arranged.
        let row_limit = match &node.kind {
            NodeKind::Container(c) if c.layout.flex().is_some_and(|f| f.direction.is_row()) => {
                wrap_width
            }
            _ => None,
        };
        let inner = Extent {
            width: width.map(|w| (w - pad_h).max(0)).or(row_limit),
            height: height.map(|h| (h - pad_v).max(0)),
        };
        let content = self.content_size(id, inner, wrap_width);

        Size::new(
            width.unwrap_or(content.width + pad_h).max(0),
            height.unwrap_or(content.height + pad_v).max(0),
        )
    }

    /// Size of a node's content box when it is driven by content.
    fn content_size(&mut self, id: NodeId, inner: Extent, wrap_width: Option<i32>) -> Size {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Container(container) => match container.layout.flex() {
                Some(settings) => {
                    flex::measure(self, id, settings, container.layout.is_stack(), inner)
                }
                None => self.layer_extent(id, inner),
            },
            NodeKind::Rectangle(_) => Size::ZERO,
            kind => match kind.intrinsic_size(self.measurer, wrap_width) {
                Some(size) => size,
                None => {
                    self.note_missing(id);
                    Size::ZERO
                }
            },
        }
    }

    /// Union of children positioned by x/y, including their margins.
    fn layer_extent(&mut self, id: NodeId, inner: Extent) -> Size {
        debug_assert!(matches!(
            self.node(id).kind.container().map(|c| c.layout),
            Some(ContainerLayout::Layer)
        ));
        let mut extent = Size::ZERO;
        for &child in self.children(id) {
            let node = self.node(child);
            let size = self.outer_size(child, inner, Extent::NONE);
            let x = position_against(&node.geometry.x, inner.width);
            let y = position_against(&node.geometry.y, inner.height);
            extent.width = extent.width.max(x + node.margin.horizontal() + size.width);
            extent.height = extent.height.max(y + node.margin.vertical() + size.height);
        }
        extent
    }
}

/// Resolve a size against a parent dimension that may be unknown.
pub(crate) fn resolve_against(length: &Length, parent: Option<i32>) -> Option<i32> {
    match (length, parent) {
        (Length::Percent(_), None) => None,
        (length, parent) => {
            let value = length.resolve(parent.unwrap_or(0))?;
            if value < 0 {
                tracing::debug!("invalid geometry: {} resolves negative, clamping to 0", length);
            }
            Some(value.max(0))
        }
    }
}

/// Resolve an x/y position; unknown or `auto` means 0.
fn position_against(length: &Length, parent: Option<i32>) -> i32 {
    match (length, parent) {
        (Length::Percent(_), None) => 0,
        (length, parent) => length.resolve(parent.unwrap_or(0)).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::MonospaceMeasurer;
    use crate::layout::Tree;
    use crate::primitives::{Color, Edges};

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer {
            char_width: 10,
            line_height: 20,
            base_font_size: 14,
        }
    }

    #[test]
    fn percent_resolves_against_parent_content() {
        let tree = Tree::with_root(Node::rectangle(Color::WHITE).size("50%", "25%").x("10%"));
        let m = measurer();
        let mut ctx = LayoutContext::new(&tree, &m);
        let root = tree.root().unwrap();

        let resolved = resolve(&mut ctx, root, Rect::new(0, 0, 301, 200));
        // round(0.5 * 301) = 151 (half rounds away from zero)
        assert_eq!(resolved.outer, Rect::new(30, 0, 151, 50));
    }

    #[test]
    fn negative_pixels_clamp_to_zero() {
        let tree = Tree::with_root(Node::rectangle(Color::WHITE).size(-5, 10));
        let m = measurer();
        let mut ctx = LayoutContext::new(&tree, &m);
        let resolved = resolve(&mut ctx, tree.root().unwrap(), Rect::new(0, 0, 100, 100));
        assert_eq!(resolved.outer.size(), Size::new(0, 10));
    }

    #[test]
    fn content_rect_is_outer_minus_padding() {
        let node = Node::rectangle(Color::WHITE)
            .size(100, 50)
            .padding(Edges::new(5, 10, 15, 20))
            .margin(Edges::all(7));
        let tree = Tree::with_root(node);
        let m = measurer();
        let mut ctx = LayoutContext::new(&tree, &m);

        let resolved = resolve(&mut ctx, tree.root().unwrap(), Rect::new(0, 0, 500, 500));
        assert_eq!(resolved.outer, Rect::new(7, 7, 100, 50));
        assert_eq!(resolved.content, Rect::new(27, 12, 70, 30));
    }

    #[test]
    fn auto_text_uses_intrinsic_size_plus_padding() {
        let tree = Tree::with_root(Node::text("abc").padding(Edges::all(2)));
        let m = measurer();
        let mut ctx = LayoutContext::new(&tree, &m);
        let resolved = resolve(&mut ctx, tree.root().unwrap(), Rect::new(0, 0, 500, 500));
        assert_eq!(resolved.outer.size(), Size::new(34, 24));
    }

    #[test]
    fn auto_without_intrinsic_size_is_zero() {
        let tree = Tree::with_root(Node::rectangle(Color::WHITE).width(40));
        let m = measurer();
        let mut ctx = LayoutContext::new(&tree, &m);
        let resolved = resolve(&mut ctx, tree.root().unwrap(), Rect::new(0, 0, 500, 500));
        assert_eq!(resolved.outer.size(), Size::new(40, 0));
    }

    #[test]
    fn auto_layer_unions_children() {
        let mut tree = Tree::with_root(Node::layer().padding(Edges::all(1)));
        let root = tree.root().unwrap();
        tree.insert(root, Node::rectangle(Color::WHITE).x(10).y(5).size(20, 20))
            .unwrap();
        tree.insert(
            root,
            Node::rectangle(Color::WHITE)
                .size(5, 40)
                .margin(Edges::new(0, 3, 0, 0)),
        )
        .unwrap();

        let m = measurer();
        let mut ctx = LayoutContext::new(&tree, &m);
        let size = ctx.outer_size(root, Extent::NONE, Extent::NONE);
        assert_eq!(size, Size::new(32, 42));
    }

    #[test]
    fn percent_against_unknown_parent_is_auto() {
        assert_eq!(resolve_against(&Length::Percent(50.0), None), None);
        assert_eq!(resolve_against(&Length::Px(-3), None), Some(0));
        assert_eq!(position_against(&Length::Percent(50.0), None), 0);
    }

    #[test]
    fn measurements_are_memoized() {
        let tree = Tree::with_root(Node::text("hello world"));
        let m = measurer();
        let mut ctx = LayoutContext::new(&tree, &m);
        let root = tree.root().unwrap();
        let a = ctx.outer_size(root, Extent::NONE, Extent::NONE);
        let b = ctx.outer_size(root, Extent::NONE, Extent::NONE);
        assert_eq!(a, b);
        assert_eq!(ctx.cache.len(), 1);
    }
}
