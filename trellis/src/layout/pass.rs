//! Combined resolution pass.
//!
//! `build` resolves every node reachable from the root in one top-down walk.
//! Whenever a node needs a content-driven size, the resolver measures its
//! subtree bottom-up first; those measurements are memoized for the rest of
//! the pass and thrown away with it.

use serde::Serialize;

use super::context::LayoutContext;
use super::flex;
use super::measure::ContentMeasurer;
use super::resolve::{ResolvedBox, resolve};
use super::tree::{NodeId, Tree};
use crate::error::LayoutError;
use crate::primitives::{Point, Rect, Size};

/// A node's resolved geometry, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedNode {
    pub parent: Option<NodeId>,
    /// Outer rect relative to the parent's outer origin. The root's rect is
    /// in viewport coordinates.
    pub rect: Rect,
    /// Content rect relative to this node's outer origin.
    pub content: Rect,
    /// Far edge of the children's margin boxes, measured from the content
    /// origin. Scroll containers use its height as their content height.
    pub children_extent: Size,
}

/// One frame's layout result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTree {
    nodes: Vec<Option<ResolvedNode>>,
    root: NodeId,
    viewport: Rect,
}

impl ResolvedTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Resolved geometry of `id`, if it was reachable from the root.
    pub fn get(&self, id: NodeId) -> Option<&ResolvedNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Outer rect of `id` in viewport coordinates (before any scrolling).
    pub fn absolute_rect(&self, id: NodeId) -> Option<Rect> {
        let mut node = self.get(id)?;
        let mut rect = node.rect;
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            rect = rect.translate(node.rect.origin());
        }
        Some(rect)
    }
}

/// Resolve every node reachable from the tree's root against `viewport`.
pub fn build(
    tree: &Tree,
    viewport: Rect,
    measurer: &dyn ContentMeasurer,
) -> Result<ResolvedTree, LayoutError> {
    let root = tree.root().ok_or(LayoutError::EmptyTree)?;
    let mut ctx = LayoutContext::new(tree, measurer);
    let mut resolved = ResolvedTree {
        nodes: vec![None; tree.len()],
        root,
        viewport,
    };

    let root_box = resolve(&mut ctx, root, viewport);
    place(&mut ctx, &mut resolved, root, None, root_box, Point::ORIGIN);

    #[cfg(debug_assertions)]
    {
        let (hits, misses) = ctx.cache.stats();
        tracing::trace!("layout pass: {} measure hits, {} misses", hits, misses);
    }

    Ok(resolved)
}

/// Record `id` at its absolute box, then resolve and place its children.
fn place(
    ctx: &mut LayoutContext<'_>,
    out: &mut ResolvedTree,
    id: NodeId,
    parent: Option<NodeId>,
    abs: ResolvedBox,
    parent_origin: Point,
) {
    let node = ctx.node(id);
    let children: Vec<(NodeId, ResolvedBox)> = match node.kind.container() {
        Some(container) => match container.layout.flex() {
            Some(settings) => flex::arrange(
                ctx,
                id,
                settings,
                container.layout.is_stack(),
                abs.content,
            )
            .into_iter()
            .map(|(child, rect)| (child, ResolvedBox::new(rect, ctx.node(child))))
            .collect(),
            None => ctx
                .children(id)
                .iter()
                .map(|&child| (child, resolve(ctx, child, abs.content)))
                .collect(),
        },
        None => Vec::new(),
    };

    let mut extent = Size::ZERO;
    for (child, child_box) in &children {
        let margin = ctx.node(*child).margin;
        extent.width = extent
            .width
            .max(child_box.outer.right() + margin.right - abs.content.x);
        extent.height = extent
            .height
            .max(child_box.outer.bottom() + margin.bottom - abs.content.y);
    }

    let origin = abs.outer.origin();
    out.nodes[id.index()] = Some(ResolvedNode {
        parent,
        rect: abs.outer.translate(Point::ORIGIN - parent_origin),
        content: abs.content.translate(Point::ORIGIN - origin),
        children_extent: extent,
    });

    for (child, child_box) in children {
        place(ctx, out, child, Some(id), child_box, origin);
    }
}
