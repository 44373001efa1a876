//! Input and routed event types.
//!
//! [`InputEvent`] is what the windowing shell hands the router: decoded
//! pointer positions, wheel deltas, keys and text. [`RoutedEvent`] is what
//! the router hands back to the application, always addressed to the id of
//! a node present in the current display list.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::primitives::Point;

bitflags! {
    /// Set of event kinds a node listens for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EventSet: u16 {
        const CLICK = 1 << 0;
        const HOVER_START = 1 << 1;
        const HOVER_END = 1 << 2;
        const MOUSE_UP = 1 << 3;
        const MOUSE_MOTION = 1 << 4;
        const SCROLL = 1 << 5;
        const KEY_DOWN = 1 << 6;
        const TEXT_INPUT = 1 << 7;
        const FOCUS = 1 << 8;
        const BLUR = 1 << 9;

        const HOVER = Self::HOVER_START.bits() | Self::HOVER_END.bits();
    }
}

impl EventSet {
    /// What an editable text input listens for unless told otherwise.
    pub const INPUT_DEFAULT: Self = Self::CLICK
        .union(Self::KEY_DOWN)
        .union(Self::TEXT_INPUT)
        .union(Self::FOCUS)
        .union(Self::BLUR)
        .union(Self::MOUSE_UP)
        .union(Self::MOUSE_MOTION);

    #[inline]
    pub fn listens(&self, kind: EventKind) -> bool {
        self.contains(kind.flag())
    }
}

/// A single event kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Click,
    HoverStart,
    HoverEnd,
    MouseUp,
    MouseMotion,
    Scroll,
    KeyDown,
    TextInput,
    Focus,
    Blur,
}

impl EventKind {
    pub const fn flag(self) -> EventSet {
        match self {
            EventKind::Click => EventSet::CLICK,
            EventKind::HoverStart => EventSet::HOVER_START,
            EventKind::HoverEnd => EventSet::HOVER_END,
            EventKind::MouseUp => EventSet::MOUSE_UP,
            EventKind::MouseMotion => EventSet::MOUSE_MOTION,
            EventKind::Scroll => EventSet::SCROLL,
            EventKind::KeyDown => EventSet::KEY_DOWN,
            EventKind::TextInput => EventSet::TEXT_INPUT,
            EventKind::Focus => EventSet::FOCUS,
            EventKind::Blur => EventSet::BLUR,
        }
    }
}

impl From<EventKind> for EventSet {
    fn from(kind: EventKind) -> Self {
        kind.flag()
    }
}

impl FromIterator<EventKind> for EventSet {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EventSet::empty(), |set, kind| set | kind.flag())
    }
}

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Scroll delta types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDelta {
    /// Scroll by lines (discrete, e.g., mouse wheel notches).
    Lines { x: f32, y: f32 },

    /// Scroll by pixels (smooth, e.g., trackpad).
    Pixels { x: i32, y: i32 },
}

impl ScrollDelta {
    /// Vertical delta in pixels. Positive means the wheel moved up, which
    /// scrolls content toward its start.
    pub fn vertical_px(&self, line_scroll_px: i32) -> i32 {
        match *self {
            ScrollDelta::Lines { y, .. } => (y * line_scroll_px as f32).round() as i32,
            ScrollDelta::Pixels { y, .. } => y,
        }
    }
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
}

/// Decoded keys. The router never interprets these; they are forwarded to
/// the focused node unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Character(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Other(u32),
}

/// Raw input for one polling tick, already decoded by the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    MouseDown { button: MouseButton, position: Point },
    MouseUp { button: MouseButton, position: Point },
    MouseMotion { position: Point },
    /// The pointer left the window.
    PointerLeft,
    Wheel { delta: ScrollDelta, position: Point },
    KeyDown { key: Key, modifiers: Modifiers },
    TextInput { text: String },
}

/// An event addressed to a node id.
///
/// `local` positions are relative to the target's absolute rect origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutedEvent {
    Click {
        target: String,
        button: MouseButton,
        position: Point,
        local: Point,
    },
    MouseUp {
        target: String,
        button: MouseButton,
        position: Point,
        local: Point,
    },
    MouseMotion {
        target: String,
        position: Point,
        local: Point,
    },
    HoverStart {
        target: String,
    },
    HoverEnd {
        target: String,
    },
    Focus {
        target: String,
    },
    Blur {
        target: String,
    },
    /// `offset` is the container's vertical offset after the delta was applied.
    Scroll {
        target: String,
        delta: i32,
        offset: i32,
    },
    KeyDown {
        target: String,
        key: Key,
        modifiers: Modifiers,
    },
    TextInput {
        target: String,
        text: String,
    },
}

impl RoutedEvent {
    pub fn target(&self) -> &str {
        match self {
            RoutedEvent::Click { target, .. }
            | RoutedEvent::MouseUp { target, .. }
            | RoutedEvent::MouseMotion { target, .. }
            | RoutedEvent::HoverStart { target }
            | RoutedEvent::HoverEnd { target }
            | RoutedEvent::Focus { target }
            | RoutedEvent::Blur { target }
            | RoutedEvent::Scroll { target, .. }
            | RoutedEvent::KeyDown { target, .. }
            | RoutedEvent::TextInput { target, .. } => target,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            RoutedEvent::Click { .. } => EventKind::Click,
            RoutedEvent::MouseUp { .. } => EventKind::MouseUp,
            RoutedEvent::MouseMotion { .. } => EventKind::MouseMotion,
            RoutedEvent::HoverStart { .. } => EventKind::HoverStart,
            RoutedEvent::HoverEnd { .. } => EventKind::HoverEnd,
            RoutedEvent::Focus { .. } => EventKind::Focus,
            RoutedEvent::Blur { .. } => EventKind::Blur,
            RoutedEvent::Scroll { .. } => EventKind::Scroll,
            RoutedEvent::KeyDown { .. } => EventKind::KeyDown,
            RoutedEvent::TextInput { .. } => EventKind::TextInput,
        }
    }
}
