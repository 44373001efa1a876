//! Event Router
//!
//! Turns decoded input into events addressed to node ids, using the same
//! display list the renderer painted. The router owns the only cross-frame
//! input state: which id has focus, which id captured the pointer, and
//! which id the pointer is hovering.
//!
//! Pointer capture ensures a press and its release reach the same node even
//! when the pointer leaves it in between.

use crate::config::EngineConfig;
use crate::display_list::DisplayList;
use crate::error::LayoutError;
use crate::event::{EventKind, EventSet, InputEvent, MouseButton, RoutedEvent, ScrollDelta};
use crate::primitives::Point;

/// Capture state for pointer events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No capture - events route based on hit-testing.
    #[default]
    None,

    /// Captured by the node with this id until the button is released.
    Captured(String),
}

impl CaptureState {
    pub fn is_captured(&self) -> bool {
        matches!(self, CaptureState::Captured(_))
    }

    pub fn captured_by(&self) -> Option<&str> {
        match self {
            CaptureState::Captured(id) => Some(id),
            CaptureState::None => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventRouter {
    focused: Option<String>,
    capture: CaptureState,
    hovered: Option<String>,
    line_scroll_px: i32,
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl EventRouter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            focused: None,
            capture: CaptureState::None,
            hovered: None,
            line_scroll_px: config.line_scroll_px,
        }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn capture(&self) -> &CaptureState {
        &self.capture
    }

    /// Move focus to `id` programmatically, emitting blur/focus like a click
    /// would. Ids missing from `list` are dropped and focus is unchanged.
    pub fn focus(&mut self, list: &DisplayList, id: &str) -> Vec<RoutedEvent> {
        self.forget_stale(list);
        let mut events = Vec::new();
        match list.get(id) {
            Some(record) if record.listens.listens(EventKind::Focus) => {
                self.move_focus(list, Some(id.to_owned()), &mut events);
            }
            Some(_) => tracing::trace!("focus request for {:?} dropped: not focusable", id),
            None => {
                let err = LayoutError::UnaddressableTarget(id.to_owned());
                tracing::trace!("{}: focus request dropped", err);
            }
        }
        events
    }

    /// Drop focus, emitting blur if the focused node listens for it.
    pub fn blur(&mut self, list: &DisplayList) -> Vec<RoutedEvent> {
        self.forget_stale(list);
        let mut events = Vec::new();
        self.move_focus(list, None, &mut events);
        events
    }

    /// Route one input against this frame's display list.
    ///
    /// Wheel input moves the targeted scroll container inside `list`, so the
    /// next hit test in the same frame already sees the new offset.
    pub fn route(&mut self, list: &mut DisplayList, input: &InputEvent) -> Vec<RoutedEvent> {
        self.forget_stale(list);
        let mut events = Vec::new();

        match input {
            InputEvent::MouseDown { button, position } => {
                self.mouse_down(list, *button, *position, &mut events)
            }
            InputEvent::MouseUp { button, position } => {
                self.mouse_up(list, *button, *position, &mut events)
            }
            InputEvent::MouseMotion { position } => {
                self.mouse_motion(list, *position, &mut events)
            }
            InputEvent::PointerLeft => self.set_hover(list, None, &mut events),
            InputEvent::Wheel { delta, position } => {
                self.wheel(list, *delta, *position, &mut events)
            }
            InputEvent::KeyDown { key, modifiers } => {
                if let Some(target) = self.focus_target(list, EventKind::KeyDown) {
                    events.push(RoutedEvent::KeyDown {
                        target,
                        key: key.clone(),
                        modifiers: *modifiers,
                    });
                }
            }
            InputEvent::TextInput { text } => {
                if let Some(target) = self.focus_target(list, EventKind::TextInput) {
                    events.push(RoutedEvent::TextInput {
                        target,
                        text: text.clone(),
                    });
                }
            }
        }

        events
    }

    fn mouse_down(
        &mut self,
        list: &DisplayList,
        button: MouseButton,
        position: Point,
        events: &mut Vec<RoutedEvent>,
    ) {
        // Focus and click are hit-tested separately; each goes to the topmost
        // record listening for that kind.
        let focus = list
            .hit_test(position, EventKind::Focus)
            .and_then(|i| list.records()[i].id.clone());
        self.move_focus(list, focus, events);

        let Some(record) = list
            .hit_test(position, EventKind::Click)
            .and_then(|i| list.record(i))
        else {
            return;
        };
        let Some(id) = record.id.clone() else {
            return;
        };
        events.push(RoutedEvent::Click {
            target: id.clone(),
            button,
            position,
            local: position - record.rect.origin(),
        });
        self.capture = CaptureState::Captured(id);
    }

    fn mouse_up(
        &mut self,
        list: &DisplayList,
        button: MouseButton,
        position: Point,
        events: &mut Vec<RoutedEvent>,
    ) {
        let captured = std::mem::take(&mut self.capture);
        let index = match captured.captured_by() {
            Some(id) => list.index_of(id),
            None => list.hit_test(position, EventKind::MouseUp),
        };
        let Some(record) = index.and_then(|i| list.record(i)) else {
            return;
        };
        if !record.listens.listens(EventKind::MouseUp) {
            return;
        }
        if let Some(id) = &record.id {
            events.push(RoutedEvent::MouseUp {
                target: id.clone(),
                button,
                position,
                local: position - record.rect.origin(),
            });
        }
    }

    fn mouse_motion(&mut self, list: &DisplayList, position: Point, events: &mut Vec<RoutedEvent>) {
        let hover = list
            .hit_test_any(position, EventSet::HOVER)
            .and_then(|i| list.records()[i].id.clone());
        self.set_hover(list, hover, events);

        let index = match self.capture.captured_by() {
            Some(id) => list.index_of(id),
            None => list.hit_test(position, EventKind::MouseMotion),
        };
        let Some(record) = index.and_then(|i| list.record(i)) else {
            return;
        };
        if !record.listens.listens(EventKind::MouseMotion) {
            return;
        }
        if let Some(id) = &record.id {
            events.push(RoutedEvent::MouseMotion {
                target: id.clone(),
                position,
                local: position - record.rect.origin(),
            });
        }
    }

    fn wheel(
        &mut self,
        list: &mut DisplayList,
        delta: ScrollDelta,
        position: Point,
        events: &mut Vec<RoutedEvent>,
    ) {
        let Some(hit) = list.topmost_at(position) else {
            return;
        };
        let container = list.ancestors(hit).find(|&i| {
            let record = &list.records()[i];
            record.scroll.is_some() && record.id.is_some() && record.listens.listens(EventKind::Scroll)
        });
        let Some(index) = container else {
            tracing::trace!("wheel at {:?} dropped: no scroll container", position);
            return;
        };

        let delta = delta.vertical_px(self.line_scroll_px);
        let current = list.records()[index].scroll.map_or(0, |s| s.offset);
        // Positive deltas scroll toward the start.
        let Some(offset) = list.set_scroll_offset(index, current.saturating_sub(delta)) else {
            return;
        };
        if let Some(id) = &list.records()[index].id {
            events.push(RoutedEvent::Scroll {
                target: id.clone(),
                delta,
                offset,
            });
        }
    }

    fn set_hover(&mut self, list: &DisplayList, hover: Option<String>, events: &mut Vec<RoutedEvent>) {
        if self.hovered == hover {
            return;
        }
        if let Some(old) = self.hovered.take() {
            if list.get(&old).is_some_and(|r| r.listens.listens(EventKind::HoverEnd)) {
                events.push(RoutedEvent::HoverEnd { target: old });
            }
        }
        if let Some(new) = &hover {
            if list.get(new).is_some_and(|r| r.listens.listens(EventKind::HoverStart)) {
                events.push(RoutedEvent::HoverStart { target: new.clone() });
            }
        }
        self.hovered = hover;
    }

    /// Blur the old focus (if it listens), then focus the new one.
    fn move_focus(&mut self, list: &DisplayList, next: Option<String>, events: &mut Vec<RoutedEvent>) {
        if self.focused == next {
            return;
        }
        if let Some(old) = self.focused.take() {
            if list.get(&old).is_some_and(|r| r.listens.listens(EventKind::Blur)) {
                events.push(RoutedEvent::Blur { target: old });
            }
        }
        if let Some(new) = &next {
            if list.get(new).is_some_and(|r| r.listens.listens(EventKind::Focus)) {
                events.push(RoutedEvent::Focus { target: new.clone() });
            }
        }
        self.focused = next;
    }

    fn focus_target(&self, list: &DisplayList, kind: EventKind) -> Option<String> {
        let id = self.focused.as_ref()?;
        match list.get(id) {
            Some(record) if record.listens.listens(kind) => Some(id.clone()),
            _ => {
                tracing::trace!("{:?} for {:?} dropped: not listening", kind, id);
                None
            }
        }
    }

    /// Forget ids that are no longer in the display list.
    fn forget_stale(&mut self, list: &DisplayList) {
        if let Some(id) = self.focused.take_if(|id| list.get(id).is_none()) {
            tracing::trace!("{}: dropping focus", LayoutError::UnaddressableTarget(id));
        }
        if let Some(id) = &self.hovered {
            if list.get(id).is_none() {
                self.hovered = None;
            }
        }
        if let Some(id) = self.capture.captured_by() {
            if list.get(id).is_none() {
                self.capture = CaptureState::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, Modifiers};
    use crate::layout::measure::MonospaceMeasurer;
    use crate::layout::{self, Node, TreeBuilder};
    use crate::primitives::{Color, Rect};

    fn frame(build: impl FnOnce(&mut TreeBuilder)) -> DisplayList {
        let mut b = TreeBuilder::new();
        b.open(Node::layer().size(400, 300)).unwrap();
        build(&mut b);
        b.close().unwrap();
        let tree = b.finish().unwrap();
        let m = MonospaceMeasurer::default();
        let resolved = layout::build(&tree, Rect::new(0, 0, 400, 300), &m).unwrap();
        DisplayList::from_resolved(&tree, &resolved)
    }

    fn button(id: &str, x: i32, y: i32) -> Node {
        Node::rectangle(Color::BLACK)
            .id(id)
            .x(x)
            .y(y)
            .size(50, 50)
            .listens(EventSet::CLICK | EventSet::FOCUS | EventSet::BLUR | EventSet::MOUSE_UP)
    }

    fn click(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseDown {
            button: MouseButton::Left,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn overlapping_click_goes_to_topmost() {
        let mut list = frame(|b| {
            b.add(button("under", 0, 0)).unwrap();
            b.add(button("over", 25, 25)).unwrap();
        });
        let mut router = EventRouter::default();
        let events = router.route(&mut list, &click(30, 30));
        let clicks: Vec<_> = events
            .iter()
            .filter(|e| e.kind() == EventKind::Click)
            .map(RoutedEvent::target)
            .collect();
        assert_eq!(clicks, vec!["over"]);
    }

    #[test]
    fn blur_precedes_focus() {
        let mut list = frame(|b| {
            b.add(button("a", 0, 0)).unwrap();
            b.add(button("b", 100, 0)).unwrap();
        });
        let mut router = EventRouter::default();
        router.route(&mut list, &click(10, 10));
        assert_eq!(router.focused(), Some("a"));

        let events = router.route(&mut list, &click(110, 10));
        assert_eq!(
            events,
            vec![
                RoutedEvent::Blur { target: "a".into() },
                RoutedEvent::Focus { target: "b".into() },
                RoutedEvent::Click {
                    target: "b".into(),
                    button: MouseButton::Left,
                    position: Point::new(110, 10),
                    local: Point::new(10, 10),
                },
            ]
        );
    }

    #[test]
    fn clicking_empty_space_blurs() {
        let mut list = frame(|b| {
            b.add(button("a", 0, 0)).unwrap();
        });
        let mut router = EventRouter::default();
        router.route(&mut list, &click(10, 10));
        let events = router.route(&mut list, &click(200, 200));
        assert_eq!(events, vec![RoutedEvent::Blur { target: "a".into() }]);
        assert_eq!(router.focused(), None);
    }

    #[test]
    fn keys_follow_focus() {
        let mut list = frame(|b| {
            b.add(Node::input(Default::default()).id("name").width(100)).unwrap();
        });
        let mut router = EventRouter::default();
        let key = InputEvent::KeyDown {
            key: Key::Character('x'),
            modifiers: Modifiers::NONE,
        };
        assert!(router.route(&mut list, &key).is_empty());

        router.route(&mut list, &click(5, 5));
        let events = router.route(&mut list, &key);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target(), "name");

        let events = router.route(
            &mut list,
            &InputEvent::TextInput {
                text: "hi".into(),
            },
        );
        assert_eq!(
            events,
            vec![RoutedEvent::TextInput {
                target: "name".into(),
                text: "hi".into(),
            }]
        );
    }

    #[test]
    fn mouse_up_goes_to_captured_node() {
        let mut list = frame(|b| {
            b.add(button("a", 0, 0)).unwrap();
            b.add(button("b", 100, 0)).unwrap();
        });
        let mut router = EventRouter::default();
        router.route(&mut list, &click(10, 10));
        assert_eq!(router.capture().captured_by(), Some("a"));

        let events = router.route(
            &mut list,
            &InputEvent::MouseUp {
                button: MouseButton::Left,
                position: Point::new(110, 10),
            },
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target(), "a");
        assert!(!router.capture().is_captured());
    }

    #[test]
    fn hover_start_and_end() {
        let mut list = frame(|b| {
            b.add(
                Node::rectangle(Color::WHITE)
                    .id("tip")
                    .size(20, 20)
                    .listens(EventSet::HOVER),
            )
            .unwrap();
        });
        let mut router = EventRouter::default();
        let moved = |x, y| InputEvent::MouseMotion {
            position: Point::new(x, y),
        };

        assert_eq!(
            router.route(&mut list, &moved(5, 5)),
            vec![RoutedEvent::HoverStart { target: "tip".into() }]
        );
        assert!(router.route(&mut list, &moved(6, 6)).is_empty());
        assert_eq!(
            router.route(&mut list, &moved(50, 50)),
            vec![RoutedEvent::HoverEnd { target: "tip".into() }]
        );
        router.route(&mut list, &moved(5, 5));
        assert_eq!(
            router.route(&mut list, &InputEvent::PointerLeft),
            vec![RoutedEvent::HoverEnd { target: "tip".into() }]
        );
    }

    #[test]
    fn wheel_scrolls_nearest_container_and_clamps() {
        let mut list = frame(|b| {
            b.open(Node::scroll_layer(0).id("list").size(100, 100)).unwrap();
            for i in 0..5 {
                b.add(button(&format!("row{i}"), 0, i * 50)).unwrap();
            }
            b.close().unwrap();
        });
        let mut router = EventRouter::default();
        let wheel = |y: f32| InputEvent::Wheel {
            delta: ScrollDelta::Lines { x: 0.0, y },
            position: Point::new(10, 10),
        };

        let events = router.route(&mut list, &wheel(-1.0));
        assert_eq!(
            events,
            vec![RoutedEvent::Scroll {
                target: "list".into(),
                delta: -40,
                offset: 40,
            }]
        );
        assert_eq!(list.get("row1").unwrap().rect.y, 10);

        // content 250, viewport 100
        let events = router.route(&mut list, &wheel(-10.0));
        assert!(matches!(events[0], RoutedEvent::Scroll { offset: 150, .. }));
        let events = router.route(&mut list, &wheel(10.0));
        assert!(matches!(events[0], RoutedEvent::Scroll { offset: 0, .. }));
    }

    #[test]
    fn focus_only_overlay_does_not_swallow_click() {
        let mut list = frame(|b| {
            b.add(button("button", 0, 0).listens(EventSet::CLICK)).unwrap();
            b.add(button("overlay", 0, 0).listens(EventSet::FOCUS)).unwrap();
        });
        let mut router = EventRouter::default();
        let events = router.route(&mut list, &click(10, 10));
        assert_eq!(
            events,
            vec![
                RoutedEvent::Focus {
                    target: "overlay".into()
                },
                RoutedEvent::Click {
                    target: "button".into(),
                    button: MouseButton::Left,
                    position: Point::new(10, 10),
                    local: Point::new(10, 10),
                },
            ]
        );
        assert_eq!(router.focused(), Some("overlay"));
    }

    #[test]
    fn click_only_node_over_focused_field_keeps_focus() {
        let mut list = frame(|b| {
            b.add(Node::input(Default::default()).id("field").size(100, 30))
                .unwrap();
            b.add(button("clear", 70, 0).size(30, 30).listens(EventSet::CLICK))
                .unwrap();
        });
        let mut router = EventRouter::default();
        router.route(&mut list, &click(5, 5));
        assert_eq!(router.focused(), Some("field"));

        let events = router.route(&mut list, &click(80, 10));
        assert_eq!(
            events,
            vec![RoutedEvent::Click {
                target: "clear".into(),
                button: MouseButton::Left,
                position: Point::new(80, 10),
                local: Point::new(10, 10),
            }]
        );
        assert_eq!(router.focused(), Some("field"));
    }

    #[test]
    fn extreme_wheel_delta_saturates() {
        let mut list = frame(|b| {
            b.open(Node::scroll_layer(0).id("list").size(100, 100)).unwrap();
            for i in 0..5 {
                b.add(button(&format!("row{i}"), 0, i * 50)).unwrap();
            }
            b.close().unwrap();
        });
        let mut router = EventRouter::default();
        let wheel = |y: i32| InputEvent::Wheel {
            delta: ScrollDelta::Pixels { x: 0, y },
            position: Point::new(10, 10),
        };
        let events = router.route(&mut list, &wheel(i32::MIN));
        assert!(matches!(events[0], RoutedEvent::Scroll { offset: 150, .. }));
        let events = router.route(&mut list, &wheel(i32::MAX));
        assert!(matches!(events[0], RoutedEvent::Scroll { offset: 0, .. }));
    }

    #[test]
    fn stale_focus_is_dropped() {
        let mut list = frame(|b| {
            b.add(button("a", 0, 0)).unwrap();
        });
        let mut router = EventRouter::default();
        router.route(&mut list, &click(10, 10));

        let mut next = frame(|_| {});
        let events = router.route(
            &mut next,
            &InputEvent::TextInput {
                text: "x".into(),
            },
        );
        assert!(events.is_empty());
        assert_eq!(router.focused(), None);
    }
}
