//! Flex layout for flex containers, VBox and HBox.
//!
//! This module provides axis-agnostic flex layout math. Containers run it in
//! two modes:
//! - `measure` reports the content size the children need, for `auto`-sized
//!   containers during the bottom-up pre-pass.
//! - `arrange` assigns every child its final rect inside a definite content
//!   box during the top-down pass.
//!
//! Both modes share `collect_lines`, which resolves bases, breaks lines,
//! distributes free space and settles each item's cross size.
//!
//! All sizes are integer pixels. Wherever space is split by factors, the
//! shares go through [`distribute`], so a line's sizes always add up exactly.

use super::context::{Extent, LayoutContext};
use super::length::{AlignItems, FlexContainer, FlexWrap, JustifyContent};
use super::resolve::resolve_against;
use super::tree::NodeId;
use crate::primitives::{Rect, Size};

/// Split `total` pixels proportionally to `weights`.
///
/// Uses largest-remainder allocation: every share is first floored, then
/// the leftover pixels go one each to the largest fractional parts. Equal
/// fractions favor the earlier index. Negative totals are split by
/// magnitude and negated. Non-positive weights get nothing; if no weight is
/// positive, nothing is distributed.
///
/// The result always sums to `total` unless no weight is positive.
pub fn distribute(total: i32, weights: &[f32]) -> Vec<i32> {
    let mut shares = vec![0i32; weights.len()];
    let sum: f64 = weights.iter().map(|&w| w.max(0.0) as f64).sum();
    if total == 0 || sum <= 0.0 {
        return shares;
    }

    let magnitude = (total as i64).abs();
    let mut fractions: Vec<(usize, f64)> = Vec::with_capacity(weights.len());
    let mut assigned = 0i64;
    for (i, &w) in weights.iter().enumerate() {
        let exact = magnitude as f64 * w.max(0.0) as f64 / sum;
        let floor = exact.floor();
        shares[i] = floor as i32;
        assigned += floor as i64;
        if w > 0.0 {
            fractions.push((i, exact - floor));
        }
    }

    // Stable sort keeps index order among equal fractions.
    fractions.sort_by(|a, b| b.1.total_cmp(&a.1));
    let leftover = (magnitude - assigned).max(0) as usize;
    for &(i, _) in fractions.iter().cycle().take(leftover) {
        shares[i] += 1;
    }

    if total < 0 {
        for share in &mut shares {
            *share = -*share;
        }
    }
    shares
}

/// Resolve flexible lengths for one line.
///
/// # Arguments
/// * `bases` - Each item's flex basis (border-box main size)
/// * `grow` / `shrink` - Each item's flex factors
/// * `free` - Line main size minus outer bases and gaps
///
/// # Returns
/// Final main sizes. Positive free space is shared by grow factor. A
/// deficit is shared by `shrink * basis`; items that would go below zero
/// are frozen at zero and the rest of the deficit is shared again among
/// the others.
pub fn flexible_lengths(bases: &[i32], grow: &[f32], shrink: &[f32], free: i32) -> Vec<i32> {
    let mut sizes = bases.to_vec();

    if free > 0 {
        for (size, share) in sizes.iter_mut().zip(distribute(free, grow)) {
            *size += share;
        }
        return sizes;
    }

    let mut deficit = -free;
    let mut active: Vec<usize> = (0..bases.len())
        .filter(|&i| shrink[i] > 0.0 && bases[i] > 0)
        .collect();

    while deficit > 0 && !active.is_empty() {
        let weights: Vec<f32> = active
            .iter()
            .map(|&i| shrink[i] * bases[i] as f32)
            .collect();
        let shares = distribute(deficit, &weights);

        let mut frozen = Vec::new();
        for (k, &i) in active.iter().enumerate() {
            if shares[k] >= sizes[i] {
                frozen.push(i);
            }
        }

        if frozen.is_empty() {
            for (k, &i) in active.iter().enumerate() {
                sizes[i] -= shares[k];
            }
            break;
        }

        for &i in &frozen {
            deficit -= sizes[i];
            sizes[i] = 0;
        }
        active.retain(|i| !frozen.contains(i));
    }

    sizes
}

/// Space placed before each item and after the last one (`n + 1` slots).
///
/// Negative free space falls back: `space_between` packs from the start,
/// `space_around` and `space_evenly` center.
pub fn justify_slots(justify: JustifyContent, n: usize, free: i32) -> Vec<i32> {
    if n == 0 {
        return vec![free.max(0)];
    }

    let justify = if free < 0 {
        match justify {
            JustifyContent::SpaceBetween => JustifyContent::FlexStart,
            JustifyContent::SpaceAround | JustifyContent::SpaceEvenly => JustifyContent::Center,
            other => other,
        }
    } else {
        justify
    };

    let mut weights = vec![0.0f32; n + 1];
    match justify {
        JustifyContent::FlexStart => weights[n] = 1.0,
        JustifyContent::FlexEnd => weights[0] = 1.0,
        JustifyContent::Center => {
            weights[0] = 1.0;
            weights[n] = 1.0;
        }
        JustifyContent::SpaceBetween => {
            if n == 1 {
                weights[n] = 1.0;
            } else {
                weights[1..n].fill(1.0);
            }
        }
        JustifyContent::SpaceAround => {
            // Half a share at each edge, a full share between items.
            weights.fill(2.0);
            weights[0] = 1.0;
            weights[n] = 1.0;
        }
        JustifyContent::SpaceEvenly => weights.fill(1.0),
    }
    distribute(free, &weights)
}

// =========================================================================
// Line collection
// =========================================================================

/// One child's state during flex resolution, in main/cross terms.
#[derive(Debug, Clone)]
struct Item {
    id: NodeId,
    margin_main: (i32, i32),
    margin_cross: (i32, i32),
    basis: i32,
    grow: f32,
    shrink: f32,
    /// Final border-box main size.
    main: i32,
    /// Border-box cross size (hypothetical until stretched).
    cross: i32,
    /// Cross size is `auto` and may stretch.
    cross_auto: bool,
    /// Cross size an auto item is stretched to, when known before lines
    /// are collected.
    stretched: Option<i32>,
}

impl Item {
    fn outer_main(&self) -> i32 {
        self.main + self.margin_main.0 + self.margin_main.1
    }

    fn outer_basis(&self) -> i32 {
        self.basis + self.margin_main.0 + self.margin_main.1
    }

    fn outer_cross(&self) -> i32 {
        self.cross + self.margin_cross.0 + self.margin_cross.1
    }
}

#[derive(Debug, Clone, Copy)]
struct Line {
    start: usize,
    end: usize,
    cross: i32,
}

/// Resolve bases, break lines, distribute and settle cross sizes.
///
/// `inner` is the container's content size, where known. Without a known
/// main size nothing wraps and nothing grows or shrinks.
fn collect_lines(
    ctx: &mut LayoutContext<'_>,
    container: NodeId,
    flex: FlexContainer,
    stack: bool,
    inner: Extent,
) -> (Vec<Item>, Vec<Line>) {
    let row = flex.direction.is_row();
    let gap = flex.gap;
    let main_size = inner.main(row);
    let cross_size = inner.cross(row);
    // A single stretched line spans the whole cross size, so auto items are
    // measured at the cross size they will be given.
    let stretch_cross = match (flex.align, flex.wrap) {
        (AlignItems::Stretch, FlexWrap::NoWrap) => cross_size,
        _ => None,
    };

    // 1. Basis resolution
    let mut items: Vec<Item> = Vec::with_capacity(ctx.children(container).len());
    for &child in ctx.children(container) {
        let node = ctx.node(child);
        let (main_len, cross_len) = if row {
            (&node.geometry.width, &node.geometry.height)
        } else {
            (&node.geometry.height, &node.geometry.width)
        };
        let margin_main = if row {
            (node.margin.left, node.margin.right)
        } else {
            (node.margin.top, node.margin.bottom)
        };
        let margin_cross = if row {
            (node.margin.top, node.margin.bottom)
        } else {
            (node.margin.left, node.margin.right)
        };

        let cross = resolve_against(cross_len, cross_size);
        let stretched = match cross {
            None => stretch_cross.map(|c| (c - margin_cross.0 - margin_cross.1).max(0)),
            Some(_) => None,
        };

        let explicit_basis = if stack {
            None
        } else {
            resolve_against(&node.flex_item.basis, main_size)
        };
        let basis = match explicit_basis.or_else(|| resolve_against(main_len, main_size)) {
            Some(basis) => basis,
            None => {
                let size = ctx.outer_size(child, inner, Extent::from_axes(row, None, stretched));
                if row { size.width } else { size.height }
            }
        };

        let (grow, shrink) = if stack {
            (0.0, 0.0)
        } else {
            (node.flex_item.grow, node.flex_item.shrink)
        };

        items.push(Item {
            id: child,
            margin_main,
            margin_cross,
            basis,
            grow,
            shrink,
            main: basis,
            cross: cross.unwrap_or(0),
            cross_auto: cross.is_none(),
            stretched,
        });
    }

    // 2. Line breaking
    let mut lines = Vec::new();
    let wraps = flex.wrap != FlexWrap::NoWrap;
    let mut start = 0;
    let mut used = 0;
    for (i, item) in items.iter().enumerate() {
        let outer = item.outer_basis();
        let overflows = main_size.is_some_and(|limit| used + gap + outer > limit);
        if wraps && i > start && overflows {
            lines.push(Line { start, end: i, cross: 0 });
            start = i;
            used = 0;
        }
        used += if i > start { gap + outer } else { outer };
    }
    if start < items.len() {
        lines.push(Line {
            start,
            end: items.len(),
            cross: 0,
        });
    }

    // 3. Space distribution per line
    if let Some(limit) = main_size {
        for line in &lines {
            let slice = &mut items[line.start..line.end];
            let gaps = gap * (slice.len() as i32 - 1);
            let used: i32 = slice.iter().map(Item::outer_basis).sum();
            let free = limit - used - gaps;
            if free == 0 {
                continue;
            }

            let bases: Vec<i32> = slice.iter().map(|it| it.basis).collect();
            let grow: Vec<f32> = slice.iter().map(|it| it.grow).collect();
            let shrink: Vec<f32> = slice.iter().map(|it| it.shrink).collect();
            for (item, main) in slice.iter_mut().zip(flexible_lengths(&bases, &grow, &shrink, free)) {
                item.main = main;
            }
        }
    }

    // 5/6. Hypothetical cross sizes at the final main size, then line extents
    for item in &mut items {
        if item.cross_auto {
            let forced = Extent::from_axes(row, Some(item.main), item.stretched);
            let size = ctx.outer_size(item.id, inner, forced);
            item.cross = if row { size.height } else { size.width };
        }
    }
    let single_line = flex.wrap == FlexWrap::NoWrap;
    for line in &mut lines {
        line.cross = match (single_line, cross_size) {
            (true, Some(cross)) => cross,
            _ => items[line.start..line.end]
                .iter()
                .map(Item::outer_cross)
                .max()
                .unwrap_or(0),
        };
    }

    (items, lines)
}

/// Content size a flex container needs for its children.
pub fn measure(
    ctx: &mut LayoutContext<'_>,
    container: NodeId,
    flex: FlexContainer,
    stack: bool,
    inner: Extent,
) -> Size {
    let row = flex.direction.is_row();
    let (items, lines) = collect_lines(ctx, container, flex, stack, inner);

    let main = lines
        .iter()
        .map(|line| {
            let slice = &items[line.start..line.end];
            slice.iter().map(Item::outer_main).sum::<i32>() + flex.gap * (slice.len() as i32 - 1)
        })
        .max()
        .unwrap_or(0);
    let cross = lines.iter().map(|line| line.cross).sum::<i32>()
        + flex.gap * (lines.len() as i32 - 1).max(0);

    if row {
        Size::new(main, cross)
    } else {
        Size::new(cross, main)
    }
}

/// Assign each child of a flex container its outer rect.
///
/// # Arguments
/// * `content` - The container's resolved content rect (absolute)
/// * `stack` - VBox/HBox: children's grow and shrink are ignored
///
/// # Returns
/// `(child, outer_rect)` pairs in child order.
pub fn arrange(
    ctx: &mut LayoutContext<'_>,
    container: NodeId,
    flex: FlexContainer,
    stack: bool,
    content: Rect,
) -> Vec<(NodeId, Rect)> {
    let row = flex.direction.is_row();
    let inner = Extent::of_rect(content);
    let (mut items, lines) = collect_lines(ctx, container, flex, stack, inner);

    let (main_size, cross_size) = if row {
        (content.width, content.height)
    } else {
        (content.height, content.width)
    };
    let mut placed = Vec::with_capacity(items.len());
    let mut line_offset = 0;

    for line in &lines {
        let cross_start = if flex.wrap == FlexWrap::WrapReverse {
            cross_size - line_offset - line.cross
        } else {
            line_offset
        };
        line_offset += line.cross + flex.gap;

        let slice = &mut items[line.start..line.end];
        let n = slice.len();
        let used: i32 = slice.iter().map(Item::outer_main).sum();
        let free = main_size - used - flex.gap * (n as i32 - 1);
        let slots = justify_slots(flex.justify, n, free);

        let mut cursor = slots[0];
        for (k, item) in slice.iter_mut().enumerate() {
            // 4. Main-axis placement
            let mut main_pos = cursor + item.margin_main.0;
            cursor = main_pos + item.main + item.margin_main.1 + flex.gap + slots[k + 1];
            if flex.direction.is_reverse() {
                main_pos = main_size - main_pos - item.main;
            }

            // 5. Cross-axis alignment
            if flex.align == AlignItems::Stretch && item.cross_auto {
                item.cross = (line.cross - item.margin_cross.0 - item.margin_cross.1).max(0);
            }
            let cross_pos = match flex.align {
                AlignItems::Stretch | AlignItems::FlexStart | AlignItems::Baseline => {
                    item.margin_cross.0
                }
                AlignItems::Center => (line.cross - item.outer_cross()) / 2 + item.margin_cross.0,
                AlignItems::FlexEnd => line.cross - item.outer_cross() + item.margin_cross.0,
            } + cross_start;

            let rect = if row {
                Rect::new(
                    content.x + main_pos,
                    content.y + cross_pos,
                    item.main,
                    item.cross,
                )
            } else {
                Rect::new(
                    content.x + cross_pos,
                    content.y + main_pos,
                    item.cross,
                    item.main,
                )
            };
            placed.push((item.id, rect));
        }
    }

    placed
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::MonospaceMeasurer;
    use crate::layout::{FlexDirection, Node, Tree};
    use crate::primitives::{Color, Edges};

    #[test]
    fn test_distribute_sums_exactly() {
        let shares = distribute(200, &[1.0, 2.0]);
        assert_eq!(shares.iter().sum::<i32>(), 200);
        assert_eq!(shares, vec![67, 133]);
    }

    #[test]
    fn test_distribute_ties_go_to_earliest() {
        assert_eq!(distribute(5, &[1.0, 1.0]), vec![3, 2]);
        assert_eq!(distribute(2, &[1.0, 1.0, 1.0]), vec![1, 1, 0]);
    }

    #[test]
    fn test_distribute_negative_and_zero_weights() {
        assert_eq!(distribute(-5, &[1.0, 1.0]), vec![-3, -2]);
        assert_eq!(distribute(10, &[0.0, 0.0]), vec![0, 0]);
        assert_eq!(distribute(10, &[0.0, 1.0]), vec![0, 10]);
    }

    #[test]
    fn test_grow_one_to_two() {
        let sizes = flexible_lengths(&[50, 50], &[1.0, 2.0], &[1.0, 1.0], 200);
        assert_eq!(sizes.iter().sum::<i32>(), 300);
        assert!((sizes[0] - 116).abs() <= 1, "{sizes:?}");
        assert!((sizes[1] - 183).abs() <= 1, "{sizes:?}");
    }

    #[test]
    fn test_no_grow_factor_keeps_basis() {
        let sizes = flexible_lengths(&[50, 50], &[0.0, 0.0], &[1.0, 1.0], 200);
        assert_eq!(sizes, vec![50, 50]);
    }

    #[test]
    fn test_shrink_proportional_to_basis() {
        assert_eq!(
            flexible_lengths(&[80, 80], &[0.0, 0.0], &[1.0, 1.0], -60),
            vec![50, 50]
        );
        // Weighted by shrink * basis: 100*1 vs 50*1 share a deficit of 30 as 20/10.
        assert_eq!(
            flexible_lengths(&[100, 50], &[0.0, 0.0], &[1.0, 1.0], -30),
            vec![80, 40]
        );
    }

    #[test]
    fn test_shrink_never_below_zero() {
        // 10*1 + 100*10: the small item would take more than its size.
        let sizes = flexible_lengths(&[100, 10], &[0.0, 0.0], &[1.0, 100.0], -50);
        assert_eq!(sizes, vec![60, 0]);
    }

    #[test]
    fn test_zero_shrink_allows_overflow() {
        assert_eq!(
            flexible_lengths(&[80, 80], &[0.0, 0.0], &[0.0, 0.0], -60),
            vec![80, 80]
        );
    }

    #[test]
    fn test_justify_slots() {
        assert_eq!(justify_slots(JustifyContent::FlexStart, 2, 10), vec![0, 0, 10]);
        assert_eq!(justify_slots(JustifyContent::FlexEnd, 2, 10), vec![10, 0, 0]);
        assert_eq!(justify_slots(JustifyContent::Center, 2, 10), vec![5, 0, 5]);
        assert_eq!(justify_slots(JustifyContent::SpaceBetween, 3, 70), vec![0, 35, 35, 0]);
        assert_eq!(justify_slots(JustifyContent::SpaceBetween, 1, 70), vec![0, 70]);
        assert_eq!(justify_slots(JustifyContent::SpaceAround, 2, 40), vec![10, 20, 10]);
        assert_eq!(justify_slots(JustifyContent::SpaceEvenly, 2, 30), vec![10, 10, 10]);
    }

    #[test]
    fn test_justify_negative_free_fallbacks() {
        assert_eq!(justify_slots(JustifyContent::SpaceBetween, 2, -10), vec![0, 0, -10]);
        assert_eq!(justify_slots(JustifyContent::SpaceEvenly, 2, -10), vec![-5, 0, -5]);
    }

    fn arrange_root(tree: &Tree, content: Rect) -> Vec<(NodeId, Rect)> {
        let m = MonospaceMeasurer::default();
        let mut ctx = LayoutContext::new(tree, &m);
        let root = tree.root().unwrap();
        let layout = ctx.node(root).kind.container().unwrap().layout;
        arrange(&mut ctx, root, layout.flex().unwrap(), layout.is_stack(), content)
    }

    fn row_with(flex: FlexContainer, children: Vec<Node>) -> Tree {
        let mut tree = Tree::with_root(Node::flex(flex));
        let root = tree.root().unwrap();
        for child in children {
            tree.insert(root, child).unwrap();
        }
        tree
    }

    #[test]
    fn test_arrange_space_between() {
        let tree = row_with(
            FlexContainer::row().justify(JustifyContent::SpaceBetween),
            (0..3)
                .map(|_| Node::rectangle(Color::BLACK).width(10))
                .collect(),
        );
        let rects: Vec<Rect> = arrange_root(&tree, Rect::new(0, 0, 100, 20))
            .into_iter()
            .map(|(_, r)| r)
            .collect();
        assert_eq!(rects[0].x, 0);
        assert_eq!(rects[1].x, 45);
        assert_eq!(rects[2].right(), 100);
        // Stretch fills the cross axis.
        assert!(rects.iter().all(|r| r.height == 20));
    }

    #[test]
    fn test_arrange_wrap_starts_new_line() {
        let tree = row_with(
            FlexContainer::row().wrap(FlexWrap::Wrap),
            vec![
                Node::rectangle(Color::BLACK).size(60, 30),
                Node::rectangle(Color::BLACK).size(60, 30),
            ],
        );
        let placed = arrange_root(&tree, Rect::new(0, 0, 100, 200));
        assert_eq!(placed[0].1, Rect::new(0, 0, 60, 30));
        assert_eq!(placed[1].1, Rect::new(0, 30, 60, 30));
    }

    #[test]
    fn test_arrange_gaps_and_margins_add() {
        let tree = row_with(
            FlexContainer::row().gap(10),
            vec![
                Node::rectangle(Color::BLACK).size(20, 10).margin(Edges::new(0, 5, 0, 0)),
                Node::rectangle(Color::BLACK).size(20, 10).margin(Edges::new(0, 0, 0, 3)),
            ],
        );
        let placed = arrange_root(&tree, Rect::new(0, 0, 200, 10));
        assert_eq!(placed[1].1.x, 20 + 5 + 10 + 3);
    }

    #[test]
    fn test_arrange_row_reverse_mirrors() {
        let tree = row_with(
            FlexContainer::row().direction(FlexDirection::RowReverse),
            vec![
                Node::rectangle(Color::BLACK).size(20, 10),
                Node::rectangle(Color::BLACK).size(30, 10),
            ],
        );
        let placed = arrange_root(&tree, Rect::new(0, 0, 100, 10));
        assert_eq!(placed[0].1.x, 80);
        assert_eq!(placed[1].1.x, 50);
    }

    #[test]
    fn test_arrange_wrap_reverse_stacks_lines_from_the_end() {
        let tree = row_with(
            FlexContainer::row().wrap(FlexWrap::WrapReverse),
            vec![
                Node::rectangle(Color::BLACK).size(60, 30),
                Node::rectangle(Color::BLACK).size(60, 20),
            ],
        );
        let placed = arrange_root(&tree, Rect::new(0, 0, 100, 200));
        assert_eq!(placed[0].1, Rect::new(0, 170, 60, 30));
        assert_eq!(placed[1].1, Rect::new(0, 150, 60, 20));
    }

    #[test]
    fn test_arrange_column_reverse_mirrors() {
        let tree = row_with(
            FlexContainer::column().direction(FlexDirection::ColumnReverse),
            vec![
                Node::rectangle(Color::BLACK).size(10, 20),
                Node::rectangle(Color::BLACK).size(10, 30),
            ],
        );
        let placed = arrange_root(&tree, Rect::new(0, 0, 50, 100));
        assert_eq!(placed[0].1, Rect::new(0, 80, 10, 20));
        assert_eq!(placed[1].1, Rect::new(0, 50, 10, 30));
    }

    #[test]
    fn test_arrange_baseline_falls_back_to_start() {
        let tree = row_with(
            FlexContainer::row().align(AlignItems::Baseline),
            vec![
                Node::rectangle(Color::BLACK).size(10, 10),
                // Auto height is not stretched.
                Node::rectangle(Color::BLACK).width(10),
            ],
        );
        let placed = arrange_root(&tree, Rect::new(0, 0, 50, 30));
        assert_eq!(placed[0].1, Rect::new(0, 0, 10, 10));
        assert_eq!(placed[1].1, Rect::new(10, 0, 10, 0));
    }

    #[test]
    fn test_arrange_align_center_and_end() {
        let child = || Node::rectangle(Color::BLACK).size(10, 10);
        let center = row_with(FlexContainer::row().align(AlignItems::Center), vec![child()]);
        let end = row_with(FlexContainer::row().align(AlignItems::FlexEnd), vec![child()]);
        assert_eq!(arrange_root(&center, Rect::new(0, 0, 50, 30))[0].1.y, 10);
        assert_eq!(arrange_root(&end, Rect::new(0, 0, 50, 30))[0].1.y, 20);
    }

    #[test]
    fn test_vbox_ignores_grow_and_shrink() {
        let mut tree = Tree::with_root(Node::vbox());
        let root = tree.root().unwrap();
        tree.insert(root, Node::rectangle(Color::BLACK).height(80).grow(1.0))
            .unwrap();
        tree.insert(root, Node::rectangle(Color::BLACK).height(80)).unwrap();
        let placed = arrange_root(&tree, Rect::new(0, 0, 40, 100));
        assert_eq!(placed[0].1, Rect::new(0, 0, 40, 80));
        assert_eq!(placed[1].1, Rect::new(0, 80, 40, 80));
    }

    #[test]
    fn test_measure_wrapped_lines_stack() {
        let tree = row_with(
            FlexContainer::row().wrap(FlexWrap::Wrap).gap(4),
            vec![
                Node::rectangle(Color::BLACK).size(60, 10),
                Node::rectangle(Color::BLACK).size(60, 20),
                Node::rectangle(Color::BLACK).size(30, 5),
            ],
        );
        let m = MonospaceMeasurer::default();
        let mut ctx = LayoutContext::new(&tree, &m);
        let root = tree.root().unwrap();
        let size = measure(
            &mut ctx,
            root,
            FlexContainer::row().wrap(FlexWrap::Wrap).gap(4),
            false,
            Extent {
                width: Some(100),
                height: None,
            },
        );
        // Lines: [60] and [60, 30] -> cross 10 + 4 + 20
        assert_eq!(size, Size::new(94, 34));
    }
}
