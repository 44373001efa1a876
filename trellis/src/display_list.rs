//! Display list: the flattened, absolute output of one frame's layout.
//!
//! Built once after layout and read by both the renderer and the event
//! router. Records are in pre-order (parents before children, siblings in
//! order), which is the paint order; later records paint on top and win
//! hit tests.
//!
//! Scroll containers shift every descendant up by their offset and attach
//! their outer rect as a clip. A record's `clip` is the intersection of all
//! clips from its scrolling ancestors, so one containment check covers them
//! all.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{EngineConfig, SpatialIndexConfig};
use crate::event::{EventKind, EventSet};
use crate::layout::{NodeId, NodeKind, ResolvedTree, Tree};
use crate::primitives::{Point, Rect};
use crate::spatial_index::QuadTree;

/// Scroll state of a scroll container, as applied to this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollInfo {
    /// Applied offset, within `0..=max_offset`.
    pub offset: i32,
    pub max_offset: i32,
    pub content_height: i32,
    pub viewport_height: i32,
}

impl ScrollInfo {
    fn new(requested: i32, content_height: i32, viewport_height: i32) -> Self {
        let max_offset = (content_height - viewport_height).max(0);
        Self {
            offset: requested.clamp(0, max_offset),
            max_offset,
            content_height,
            viewport_height,
        }
    }
}

/// One node's draw record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub node: NodeId,
    /// Index of the parent's record.
    pub parent: Option<usize>,
    pub depth: u32,
    /// One past the index of this record's last descendant.
    pub subtree_end: usize,
    /// Absolute outer rect, after scroll offsets.
    pub rect: Rect,
    /// Absolute content rect, after scroll offsets.
    pub content: Rect,
    /// Points outside this rect miss the record.
    pub clip: Option<Rect>,
    pub id: Option<String>,
    pub listens: EventSet,
    pub paint: NodeKind,
    pub scroll: Option<ScrollInfo>,
}

impl DisplayRecord {
    /// Inside the rect and inside the clip.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point) && self.clip.is_none_or(|clip| clip.contains(point))
    }

    /// Part of the rect that can actually be seen.
    pub fn visible_rect(&self) -> Option<Rect> {
        match self.clip {
            Some(clip) => self.rect.intersection(&clip),
            None if self.rect.is_empty() => None,
            None => Some(self.rect),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayList {
    records: Vec<DisplayRecord>,
    /// String id -> record index. The first record with an id wins.
    ids: IndexMap<String, usize>,
    index: QuadTree,
    index_config: SpatialIndexConfig,
    viewport: Rect,
    cull_offscreen: bool,
}

impl DisplayList {
    /// Flatten a resolved tree with default settings.
    pub fn from_resolved(tree: &Tree, resolved: &ResolvedTree) -> Self {
        Self::with_config(tree, resolved, &EngineConfig::default())
    }

    pub fn with_config(tree: &Tree, resolved: &ResolvedTree, config: &EngineConfig) -> Self {
        let mut records = Vec::with_capacity(tree.len());
        emit(
            tree,
            resolved,
            &mut records,
            resolved.root(),
            None,
            Point::ORIGIN,
            None,
            0,
        );

        let mut ids = IndexMap::new();
        for (i, record) in records.iter().enumerate() {
            if let Some(id) = &record.id {
                if ids.contains_key(id) {
                    tracing::warn!("duplicate node id {:?}; events go to the first", id);
                } else {
                    ids.insert(id.clone(), i);
                }
            }
        }

        let mut list = Self {
            records,
            ids,
            index: QuadTree::new(Rect::ZERO, config.spatial_index),
            index_config: config.spatial_index,
            viewport: resolved.viewport(),
            cull_offscreen: config.cull_offscreen,
        };
        list.rebuild_index(config.spatial_index);
        list
    }

    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&DisplayRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Record index for a string id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&DisplayRecord> {
        self.index_of(id).and_then(|i| self.records.get(i))
    }

    /// Addressable ids in paint order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// `index` itself, then its ancestors up to the root.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let mut next = (index < self.records.len()).then_some(index);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.records[current].parent;
            Some(current)
        })
    }

    /// Topmost record under `point` that has an id and listens for `kind`.
    pub fn hit_test(&self, point: Point, kind: EventKind) -> Option<usize> {
        self.hit_test_where(point, |record| {
            record.id.is_some() && record.listens.listens(kind)
        })
    }

    /// Topmost record under `point` that has an id and listens for any of
    /// `events`.
    pub fn hit_test_any(&self, point: Point, events: EventSet) -> Option<usize> {
        self.hit_test_where(point, |record| {
            record.id.is_some() && record.listens.intersects(events)
        })
    }

    /// Topmost record under `point` by geometry and clip alone.
    pub fn topmost_at(&self, point: Point) -> Option<usize> {
        self.hit_test_where(point, |_| true)
    }

    fn hit_test_where(&self, point: Point, accept: impl Fn(&DisplayRecord) -> bool) -> Option<usize> {
        // Candidates come back ascending; reverse scan is topmost-first.
        self.index
            .query_point(point)
            .into_iter()
            .rev()
            .find(|&i| {
                let record = &self.records[i];
                record.contains(point) && accept(record)
            })
    }

    /// Records that can be seen inside `region`, in paint order.
    pub fn visible(&self, region: Rect) -> Vec<usize> {
        self.index
            .query(region)
            .into_iter()
            .filter(|&i| {
                self.records[i]
                    .visible_rect()
                    .is_some_and(|r| r.intersects(&region))
            })
            .collect()
    }

    /// Move a scroll container to `offset` (clamped), shifting and
    /// re-clipping its descendants. Returns the applied offset, or `None` if
    /// `index` is not a scroll container.
    pub fn set_scroll_offset(&mut self, index: usize, offset: i32) -> Option<i32> {
        let record = self.records.get(index)?;
        let mut scroll = record.scroll?;
        let end = record.subtree_end;

        let previous = scroll.offset;
        scroll.offset = offset.clamp(0, scroll.max_offset);
        let shift = previous - scroll.offset;
        self.records[index].scroll = Some(scroll);
        if shift == 0 {
            return Some(scroll.offset);
        }

        let moved = Point::new(0, shift);
        for i in index + 1..end {
            let parent = self.records[i].parent;
            let clip = parent.and_then(|p| child_clip(&self.records[p]));
            let record = &mut self.records[i];
            record.rect = record.rect.translate(moved);
            record.content = record.content.translate(moved);
            record.clip = clip;
        }

        self.rebuild_index(self.index_config);
        Some(scroll.offset)
    }

    /// Serialize the records as pretty JSON, for debugging.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }

    fn rebuild_index(&mut self, config: SpatialIndexConfig) {
        let mut bounds: Option<Rect> = None;
        let visible: Vec<(usize, Rect)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| {
                let rect = record.visible_rect()?;
                if self.cull_offscreen {
                    rect.intersection(&self.viewport).map(|r| (i, r))
                } else {
                    Some((i, rect))
                }
            })
            .collect();
        for (_, rect) in &visible {
            bounds = Some(bounds.map_or(*rect, |b| b.union(rect)));
        }

        self.index = QuadTree::new(bounds.unwrap_or(Rect::ZERO), config);
        for (i, rect) in visible {
            self.index.insert(i, rect);
        }
    }
}

/// Clip applied to the children of `record`.
fn child_clip(record: &DisplayRecord) -> Option<Rect> {
    if record.scroll.is_none() {
        return record.clip;
    }
    Some(match record.clip {
        Some(clip) => clip
            .intersection(&record.rect)
            .unwrap_or(Rect::new(record.rect.x, record.rect.y, 0, 0)),
        None => record.rect,
    })
}

#[allow(clippy::too_many_arguments)]
fn emit(
    tree: &Tree,
    resolved: &ResolvedTree,
    records: &mut Vec<DisplayRecord>,
    id: NodeId,
    parent: Option<usize>,
    origin: Point,
    clip: Option<Rect>,
    depth: u32,
) {
    let (Some(node), Some(layout)) = (tree.get(id), resolved.get(id)) else {
        return;
    };

    let rect = layout.rect.translate(origin);
    let content = layout.content.translate(rect.origin());
    let scroll = node.scroll().map(|s| {
        let content_height = s.content_height.unwrap_or(layout.children_extent.height);
        ScrollInfo::new(s.offset, content_height, content.height)
    });

    let index = records.len();
    records.push(DisplayRecord {
        node: id,
        parent,
        depth,
        subtree_end: index + 1,
        rect,
        content,
        clip,
        id: node.id.clone(),
        listens: node.listens,
        paint: node.kind.clone(),
        scroll,
    });

    let children_clip = child_clip(&records[index]);
    let children_origin = match scroll {
        Some(s) => Point::new(rect.x, rect.y - s.offset),
        None => rect.origin(),
    };
    for &child in tree.children(id) {
        emit(
            tree,
            resolved,
            records,
            child,
            Some(index),
            children_origin,
            children_clip,
            depth + 1,
        );
    }
    records[index].subtree_end = records.len();
}
