//! Arena tree of box nodes, rebuilt every frame.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. A node
//! has at most one parent; [`Tree::reparent`] unlinks it from the old parent
//! before linking it under the new one. Detached subtrees stay in the arena
//! but are never reached from the root, so they are neither laid out nor
//! painted. The whole arena is dropped at the end of the frame.

use serde::{Deserialize, Serialize};

use super::node::Node;
use crate::error::LayoutError;

/// Handle to a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree whose root is `node`.
    pub fn with_root(node: Node) -> Self {
        let mut tree = Self::new();
        let root = tree.alloc(node, None);
        tree.root = Some(root);
        tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).map(|slot| &slot.node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index()).map(|slot| &mut slot.node)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.index()).and_then(|slot| slot.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.index())
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Append `node` as the last child of `parent`.
    pub fn insert(&mut self, parent: NodeId, node: Node) -> Result<NodeId, LayoutError> {
        self.check_container(parent)?;
        let id = self.alloc(node, Some(parent));
        self.slots[parent.index()].children.push(id);
        Ok(id)
    }

    /// Move `id` (and its subtree) to the end of `new_parent`'s children.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), LayoutError> {
        self.check_exists(id)?;
        self.check_container(new_parent)?;
        if self.is_ancestor_or_self(id, new_parent) {
            return Err(LayoutError::WouldCycle {
                node: id,
                parent: new_parent,
            });
        }

        self.unlink(id);
        self.slots[id.index()].parent = Some(new_parent);
        self.slots[new_parent.index()].children.push(id);
        if self.root == Some(id) {
            self.root = None;
        }
        Ok(())
    }

    /// Unlink `id` from its parent. The subtree is no longer rendered.
    pub fn detach(&mut self, id: NodeId) -> Result<(), LayoutError> {
        self.check_exists(id)?;
        self.unlink(id);
        self.slots[id.index()].parent = None;
        if self.root == Some(id) {
            self.root = None;
        }
        Ok(())
    }

    /// Find a reachable node by its string id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.descendants().find(|&n| self.slots[n.index()].node.id.as_deref() == Some(id))
    }

    /// Pre-order walk from the root.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    fn alloc(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            node,
            parent,
            children: Vec::new(),
        });
        id
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(old) = self.slots[id.index()].parent {
            self.slots[old.index()].children.retain(|&c| c != id);
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.parent(node) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn check_exists(&self, id: NodeId) -> Result<(), LayoutError> {
        if id.index() < self.slots.len() {
            Ok(())
        } else {
            Err(LayoutError::UnknownNode(id))
        }
    }

    fn check_container(&self, id: NodeId) -> Result<(), LayoutError> {
        let node = self.get(id).ok_or(LayoutError::UnknownNode(id))?;
        if node.kind.is_container() {
            Ok(())
        } else {
            Err(LayoutError::NotAContainer(id))
        }
    }
}

// =========================================================================
// TreeBuilder
// =========================================================================

/// Builds a [`Tree`] with an explicit stack of open containers.
///
/// ```
/// use trellis::layout::{Node, TreeBuilder};
/// use trellis::primitives::Color;
///
/// let mut builder = TreeBuilder::new();
/// builder.open(Node::vbox().id("root")).unwrap();
/// builder.add(Node::rectangle(Color::WHITE).height(20)).unwrap();
/// builder.close().unwrap();
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: Tree,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The container new nodes are appended to.
    pub fn current(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// Add `node` under the current container, or as the root if the tree
    /// is still empty.
    pub fn add(&mut self, node: Node) -> Result<NodeId, LayoutError> {
        match self.current() {
            Some(parent) => self.tree.insert(parent, node),
            None if self.tree.root.is_none() => {
                let id = self.tree.alloc(node, None);
                self.tree.root = Some(id);
                Ok(id)
            }
            None => Err(LayoutError::NoOpenContainer),
        }
    }

    /// Add a container and make it current. A leaf passed here is still
    /// added under the current container, then reported as `NotAContainer`.
    pub fn open(&mut self, node: Node) -> Result<NodeId, LayoutError> {
        if !node.kind.is_container() {
            let id = self.add(node)?;
            return Err(LayoutError::NotAContainer(id));
        }
        let id = self.add(node)?;
        self.stack.push(id);
        Ok(id)
    }

    /// Close the current container, returning its handle.
    pub fn close(&mut self) -> Result<NodeId, LayoutError> {
        self.stack.pop().ok_or(LayoutError::NoOpenContainer)
    }

    /// Open `node`, run `body` with it current, then close it.
    pub fn scope<F>(&mut self, node: Node, body: F) -> Result<NodeId, LayoutError>
    where
        F: FnOnce(&mut Self) -> Result<(), LayoutError>,
    {
        let id = self.open(node)?;
        body(self)?;
        let closed = self.close()?;
        debug_assert_eq!(closed, id);
        Ok(id)
    }

    pub fn finish(self) -> Result<Tree, LayoutError> {
        if !self.stack.is_empty() {
            return Err(LayoutError::UnbalancedBuilder(self.stack.len()));
        }
        if self.tree.root.is_none() {
            return Err(LayoutError::EmptyTree);
        }
        Ok(self.tree)
    }
}
