//! Quadtree over display records.
//!
//! Used to narrow hit-test candidates and to cull records outside a visible
//! region. Items are referenced by their index in the display list; an item
//! is stored in every leaf its rect overlaps, so queries deduplicate.

use crate::config::SpatialIndexConfig;
use crate::primitives::{Point, Rect};

#[derive(Debug, Clone)]
struct QuadNode {
    bounds: Rect,
    depth: usize,
    items: Vec<(usize, Rect)>,
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    fn new(bounds: Rect, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    fn insert(&mut self, item: usize, rect: Rect, config: &SpatialIndexConfig) -> bool {
        if !self.bounds.intersects(&rect) {
            return false;
        }

        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                child.insert(item, rect, config);
            }
            return true;
        }

        self.items.push((item, rect));
        if self.items.len() > config.max_items
            && self.depth < config.max_depth
            && self.bounds.width >= 2
            && self.bounds.height >= 2
        {
            self.subdivide(config);
        }
        true
    }

    /// Split into four quadrants and push items down.
    fn subdivide(&mut self, config: &SpatialIndexConfig) {
        let Rect { x, y, width: w, height: h } = self.bounds;
        let (hw, hh) = (w / 2, h / 2);
        let depth = self.depth + 1;
        let mut children = Box::new([
            QuadNode::new(Rect::new(x, y, hw, hh), depth),
            QuadNode::new(Rect::new(x + hw, y, w - hw, hh), depth),
            QuadNode::new(Rect::new(x, y + hh, hw, h - hh), depth),
            QuadNode::new(Rect::new(x + hw, y + hh, w - hw, h - hh), depth),
        ]);
        for (item, rect) in self.items.drain(..) {
            for child in children.iter_mut() {
                child.insert(item, rect, config);
            }
        }
        self.children = Some(children);
    }

    fn query(&self, area: &Rect, out: &mut Vec<(usize, Rect)>) {
        if !self.bounds.intersects(area) {
            return;
        }
        out.extend(
            self.items
                .iter()
                .filter(|(_, rect)| rect.intersects(area))
                .copied(),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(area, out);
            }
        }
    }

    fn remove(&mut self, item: usize) -> bool {
        let before = self.items.len();
        self.items.retain(|(i, _)| *i != item);
        let mut removed = self.items.len() != before;
        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                removed |= child.remove(item);
            }
        }
        removed
    }
}

#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadNode,
    config: SpatialIndexConfig,
    len: usize,
}

impl QuadTree {
    pub fn new(bounds: Rect, config: SpatialIndexConfig) -> Self {
        Self {
            root: QuadNode::new(bounds, 0),
            config,
            len: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.root.bounds
    }

    /// Insert an item. Returns `false` (and stores nothing) when `rect` is
    /// empty or lies outside the tree's bounds.
    pub fn insert(&mut self, item: usize, rect: Rect) -> bool {
        let inserted = self.root.insert(item, rect, &self.config);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Items whose rects overlap `area`, ascending and deduplicated.
    pub fn query(&self, area: Rect) -> Vec<usize> {
        self.collect(area, |_| true)
    }

    /// Items whose rects contain `point`, ascending.
    pub fn query_point(&self, point: Point) -> Vec<usize> {
        self.collect(Rect::new(point.x, point.y, 1, 1), |rect| rect.contains(point))
    }

    fn collect(&self, area: Rect, keep: impl Fn(&Rect) -> bool) -> Vec<usize> {
        let mut found = Vec::new();
        self.root.query(&area, &mut found);
        let mut items: Vec<usize> = found
            .into_iter()
            .filter(|(_, rect)| keep(rect))
            .map(|(item, _)| item)
            .collect();
        items.sort_unstable();
        items.dedup();
        items
    }

    pub fn remove(&mut self, item: usize) -> bool {
        let removed = self.root.remove(item);
        if removed {
            self.len -= 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.root = QuadNode::new(self.root.bounds, 0);
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SpatialIndexConfig {
        SpatialIndexConfig {
            max_items: 2,
            max_depth: 4,
        }
    }

    #[test]
    fn query_finds_overlapping_items() {
        let mut tree = QuadTree::new(Rect::new(0, 0, 100, 100), small());
        tree.insert(0, Rect::new(0, 0, 10, 10));
        tree.insert(1, Rect::new(80, 80, 10, 10));
        tree.insert(2, Rect::new(40, 40, 20, 20));
        tree.insert(3, Rect::new(0, 90, 100, 10));

        assert_eq!(tree.query(Rect::new(0, 0, 50, 50)), vec![0, 2]);
        assert_eq!(tree.query(Rect::new(50, 50, 50, 50)), vec![1, 2, 3]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn straddling_item_reported_once() {
        let mut tree = QuadTree::new(Rect::new(0, 0, 100, 100), small());
        for i in 0..5 {
            tree.insert(i, Rect::new(i as i32 * 2, 0, 1, 1));
        }
        tree.insert(9, Rect::new(0, 0, 100, 100));
        let hits = tree.query(Rect::new(0, 0, 100, 100));
        assert_eq!(hits.iter().filter(|&&i| i == 9).count(), 1);
        assert_eq!(hits.len(), 6);
    }

    #[test]
    fn point_query_checks_containment() {
        let mut tree = QuadTree::new(Rect::new(0, 0, 100, 100), small());
        tree.insert(0, Rect::new(10, 10, 10, 10));
        tree.insert(1, Rect::new(15, 15, 10, 10));
        assert_eq!(tree.query_point(Point::new(16, 16)), vec![0, 1]);
        assert_eq!(tree.query_point(Point::new(22, 22)), vec![1]);
        assert!(tree.query_point(Point::new(50, 50)).is_empty());
    }

    #[test]
    fn point_query_after_subdividing() {
        let mut tree = QuadTree::new(Rect::new(0, 0, 100, 100), small());
        // The wide item lands in several leaves once the root splits.
        tree.insert(0, Rect::new(0, 40, 100, 20));
        for i in 1..8 {
            tree.insert(i, Rect::new(i as i32 * 12, 0, 10, 10));
        }
        assert_eq!(tree.query_point(Point::new(75, 50)), vec![0]);
        assert_eq!(tree.query_point(Point::new(25, 5)), vec![2]);
        assert!(tree.query_point(Point::new(22, 5)).is_empty());
    }

    #[test]
    fn outside_and_empty_rects_are_rejected() {
        let mut tree = QuadTree::new(Rect::new(0, 0, 100, 100), small());
        assert!(!tree.insert(0, Rect::new(200, 200, 5, 5)));
        assert!(!tree.insert(1, Rect::new(5, 5, 0, 5)));
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut tree = QuadTree::new(Rect::new(0, 0, 100, 100), small());
        for i in 0..6 {
            tree.insert(i, Rect::new(i as i32 * 10, 0, 10, 10));
        }
        assert!(tree.remove(3));
        assert!(!tree.remove(3));
        assert!(!tree.query(Rect::new(0, 0, 100, 100)).contains(&3));
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.query(Rect::new(0, 0, 100, 100)).is_empty());
    }
}
