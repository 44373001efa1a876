//! Scroll State
//!
//! Application-side scroll offset for one scroll container. Trees are
//! rebuilt every frame, so the app keeps the offset here, feeds routed
//! scroll events into it, and passes `offset` to `Node::scroll_layer` when
//! it builds the next tree.

use crate::display_list::DisplayList;
use crate::event::RoutedEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    /// Node id of the scroll container this state follows.
    id: String,
    /// Current scroll offset (0 = top).
    pub offset: i32,
    /// Maximum scroll offset (synced from the display list each frame).
    pub max: i32,
}

impl ScrollState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            offset: 0,
            max: i32::MAX,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Take the offset the router reported for this container. Returns
    /// whether the event was for us.
    pub fn apply(&mut self, event: &RoutedEvent) -> bool {
        match event {
            RoutedEvent::Scroll { target, offset, .. } if *target == self.id => {
                self.offset = *offset;
                true
            }
            _ => false,
        }
    }

    /// Scroll by a delta (positive = scroll content toward the start).
    pub fn scroll_by(&mut self, delta: i32) {
        self.offset = self.offset.saturating_sub(delta).clamp(0, self.max);
    }

    /// Pull the scrollable range (and the clamped offset) from a built list.
    pub fn sync(&mut self, list: &DisplayList) {
        if let Some(scroll) = list.get(&self.id).and_then(|r| r.scroll) {
            self.max = scroll.max_offset;
            self.offset = scroll.offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_by_clamps() {
        let mut state = ScrollState::new("log");
        state.max = 100;
        state.scroll_by(-150);
        assert_eq!(state.offset, 100);
        state.scroll_by(30);
        assert_eq!(state.offset, 70);
        state.scroll_by(500);
        assert_eq!(state.offset, 0);
        state.scroll_by(i32::MIN);
        assert_eq!(state.offset, 100);
        state.scroll_by(i32::MAX);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn apply_only_takes_own_events() {
        let mut state = ScrollState::new("log");
        assert!(!state.apply(&RoutedEvent::Scroll {
            target: "other".into(),
            delta: -40,
            offset: 40,
        }));
        assert_eq!(state.offset, 0);
        assert!(state.apply(&RoutedEvent::Scroll {
            target: "log".into(),
            delta: -40,
            offset: 40,
        }));
        assert_eq!(state.offset, 40);
    }
}
