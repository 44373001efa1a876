//! Layout context carried through one resolution pass.
//!
//! The LayoutContext carries state through the layout tree:
//! - The tree being resolved and the intrinsic-size provider
//! - The per-frame measure cache
//! - Which nodes already reported a missing intrinsic size this frame

use std::collections::HashSet;
use std::sync::LazyLock;

use super::cache::MeasureCache;
use super::measure::ContentMeasurer;
use super::node::Node;
use super::tree::{NodeId, Tree};
use crate::error::LayoutError;
use crate::primitives::{Rect, Size};

/// Per-axis sizes that may or may not be known yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Extent {
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };

    pub fn definite(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }

    pub fn of_rect(rect: Rect) -> Self {
        Self::definite(rect.size())
    }

    #[inline]
    pub fn main(&self, row: bool) -> Option<i32> {
        if row { self.width } else { self.height }
    }

    #[inline]
    pub fn cross(&self, row: bool) -> Option<i32> {
        if row { self.height } else { self.width }
    }

    /// Build from main/cross values for a row (`row = true`) or column.
    #[inline]
    pub fn from_axes(row: bool, main: Option<i32>, cross: Option<i32>) -> Self {
        if row {
            Self {
                width: main,
                height: cross,
            }
        } else {
            Self {
                width: cross,
                height: main,
            }
        }
    }
}

/// Layout context passed through the tree.
pub struct LayoutContext<'a> {
    pub tree: &'a Tree,
    pub measurer: &'a dyn ContentMeasurer,
    pub cache: MeasureCache,

    missing: HashSet<NodeId>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(tree: &'a Tree, measurer: &'a dyn ContentMeasurer) -> Self {
        Self {
            tree,
            measurer,
            cache: MeasureCache::new(),
            missing: HashSet::new(),
        }
    }

    /// The node for a handle taken from this tree.
    ///
    /// Handles come from `Tree::children` and `Tree::root`, so a miss means
    /// the tree was built wrong; the node is then treated as an empty layer.
    pub fn node(&self, id: NodeId) -> &'a Node {
        match self.tree.get(id) {
            Some(node) => node,
            None => &*EMPTY_NODE,
        }
    }

    pub fn children(&self, id: NodeId) -> &'a [NodeId] {
        self.tree.children(id)
    }

    /// Record that `id` could not report its intrinsic size. Logged once per
    /// node per frame.
    pub fn note_missing(&mut self, id: NodeId) {
        if self.missing.insert(id) {
            let name = self.node(id).id.as_deref().unwrap_or("<anonymous>");
            let err = LayoutError::MissingIntrinsicSize(format!("{id:?} ({name})"));
            tracing::debug!("{}, using 0", err);
        }
    }
}

static EMPTY_NODE: LazyLock<Node> = LazyLock::new(Node::layer);
