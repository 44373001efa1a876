//! Trellis: box-model and flexbox layout core
//!
//! Trellis turns a declarative tree of boxes into pixel rectangles, flattens
//! them into a display list for a renderer, and routes pointer, wheel and
//! keyboard input back to the nodes that asked for it.
//!
//! # Architecture
//!
//! Each frame is rebuilt from scratch:
//!
//! ```text
//! TreeBuilder -> Tree -> layout::build -> ResolvedTree
//!     -> DisplayList -> renderer
//!                    -> EventRouter::route -> RoutedEvent -> app
//! ```
//!
//! The display list is shared by painting and hit-testing, so what a user
//! sees is exactly what their clicks hit. The only state kept between frames
//! is focus and hover (owned by the [`EventRouter`]) and scroll offsets
//! (owned by the application, see [`ScrollState`]).
//!
//! # Usage
//!
//! ```
//! use trellis::{DisplayList, EventRouter, InputEvent, MouseButton, Node, Point, Rect, TreeBuilder};
//! use trellis::layout::{self, MonospaceMeasurer};
//!
//! let mut b = TreeBuilder::new();
//! b.open(Node::vbox().size("100%", "100%")).unwrap();
//! b.add(Node::text("Save").id("save").listen(trellis::EventKind::Click)).unwrap();
//! b.close().unwrap();
//! let tree = b.finish().unwrap();
//!
//! let resolved = layout::build(&tree, Rect::new(0, 0, 800, 600), &MonospaceMeasurer::default()).unwrap();
//! let mut list = DisplayList::from_resolved(&tree, &resolved);
//!
//! let mut router = EventRouter::default();
//! let events = router.route(
//!     &mut list,
//!     &InputEvent::MouseDown { button: MouseButton::Left, position: Point::new(2, 2) },
//! );
//! assert_eq!(events[0].target(), "save");
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod config;
pub mod event;

// Layout system (box model + flex)
pub mod layout;

// Frame output and queries
pub mod display_list;
pub mod spatial_index;

// Input routing and app-side state helpers
pub mod event_router;
pub mod scroll_state;

// Re-export core types
pub use primitives::{Color, Edges, Point, Rect, Size};
pub use error::{ConfigError, LayoutError};
pub use config::{EngineConfig, SpatialIndexConfig};
pub use event::{
    EventKind, EventSet, InputEvent, Key, Modifiers, MouseButton, RoutedEvent, ScrollDelta,
};
pub use layout::{Length, Node, NodeId, NodeKind, ResolvedTree, Tree, TreeBuilder};
pub use display_list::{DisplayList, DisplayRecord, ScrollInfo};
pub use spatial_index::QuadTree;
pub use event_router::{CaptureState, EventRouter};
pub use scroll_state::ScrollState;
