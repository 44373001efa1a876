//! Box nodes: the elements an application builds each frame.
//!
//! A [`Node`] carries the geometry intent, box-model spacing, identity and
//! listened events shared by every element. What the element draws lives
//! in its [`NodeKind`] payload. Children are not stored here; they belong to
//! the [`Tree`](super::Tree) arena.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::length::{FlexContainer, FlexItem, Length};
use super::measure::ContentMeasurer;
use crate::event::{EventKind, EventSet};
use crate::primitives::{Color, Edges, Size};

/// Position and size intent on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
}

/// A single element of the UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub geometry: Geometry,
    pub padding: Edges,
    pub margin: Edges,
    /// Nodes without an id are never targeted by events.
    pub id: Option<String>,
    pub listens: EventSet,
    /// Only read when the parent lays out as a flex container.
    pub flex_item: FlexItem,
    pub kind: NodeKind,
}

/// What a node draws, or how it arranges its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Rectangle(RectangleStyle),
    Text(TextContent),
    Image(ImageContent),
    Input(InputContent),
    Vector(VectorContent),
    Container(Container),
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Container(_))
    }

    pub fn container(&self) -> Option<&Container> {
        match self {
            NodeKind::Container(container) => Some(container),
            _ => None,
        }
    }

    /// Intrinsic content size for leaf kinds. Containers and rectangles
    /// report `None`; containers are sized from their children instead.
    pub fn intrinsic_size(
        &self,
        measurer: &dyn ContentMeasurer,
        available_width: Option<i32>,
    ) -> Option<Size> {
        match self {
            NodeKind::Text(text) => text.intrinsic_size(measurer, available_width),
            NodeKind::Image(image) => image.intrinsic_size(measurer, available_width),
            NodeKind::Input(input) => input.intrinsic_size(measurer, available_width),
            NodeKind::Vector(vector) => vector.intrinsic_size(measurer, available_width),
            NodeKind::Rectangle(_) | NodeKind::Container(_) => None,
        }
    }
}

/// Capability of primitives that can report a content size.
pub trait IntrinsicSize {
    /// Content size (excluding padding). `available_width` is the content
    /// width the node will be laid out in, when known; wrapping text uses it.
    fn intrinsic_size(
        &self,
        measurer: &dyn ContentMeasurer,
        available_width: Option<i32>,
    ) -> Option<Size>;
}

// =========================================================================
// Primitive payloads
// =========================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RectangleStyle {
    pub color: Color,
    pub radius: i32,
    pub border_color: Option<Color>,
    pub border_width: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
    /// Font size in pixels. `None` uses the measurer's base size.
    pub font_size: Option<i32>,
    pub color: Color,
    pub align: TextAlign,
    pub wrap: bool,
    pub ellipsis: bool,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            color: Color::BLACK,
            align: TextAlign::Left,
            wrap: true,
            ellipsis: false,
        }
    }
}

impl IntrinsicSize for TextContent {
    fn intrinsic_size(
        &self,
        measurer: &dyn ContentMeasurer,
        available_width: Option<i32>,
    ) -> Option<Size> {
        let wrap_width = if self.wrap { available_width } else { None };
        measurer.measure_text(&self.text, self.font_size, wrap_width)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    #[default]
    Fit,
    Fill,
    Stretch,
    Center,
}

/// An image reference. The renderer loads pixels; layout only needs the
/// natural size, taken from `natural_size` or probed from `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub source: String,
    #[serde(skip)]
    pub data: Option<Arc<[u8]>>,
    pub natural_size: Option<Size>,
    pub scale_mode: ScaleMode,
}

impl IntrinsicSize for ImageContent {
    fn intrinsic_size(&self, measurer: &dyn ContentMeasurer, _: Option<i32>) -> Option<Size> {
        self.natural_size.or_else(|| measurer.image_size(self))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputContent {
    pub text: String,
    pub placeholder: String,
    pub font_size: Option<i32>,
    pub color: Color,
    pub background: Option<Color>,
    pub border_color: Color,
    pub max_length: Option<usize>,
}

impl Default for InputContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            placeholder: String::new(),
            font_size: Some(16),
            color: Color::BLACK,
            background: Some(Color::WHITE),
            border_color: Color::BLACK,
            max_length: None,
        }
    }
}

impl IntrinsicSize for InputContent {
    /// One line tall, wide enough for the longer of text and placeholder
    /// plus a caret cell.
    fn intrinsic_size(&self, measurer: &dyn ContentMeasurer, _: Option<i32>) -> Option<Size> {
        let shown = if self.text.chars().count() >= self.placeholder.chars().count() {
            &self.text
        } else {
            &self.placeholder
        };
        let line = measurer.measure_text(shown, self.font_size, None)?;
        let caret = measurer.measure_text(" ", self.font_size, None)?;
        Some(Size::new(line.width + caret.width, line.height.max(caret.height)))
    }
}

/// Vector path commands, in pixels relative to the node's content origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { x: i32, y: i32 },
    LineTo { x: i32, y: i32 },
    CurveTo { cx1: i32, cy1: i32, cx2: i32, cy2: i32, x: i32, y: i32 },
    Arc { x: i32, y: i32, r: i32, start: i32, end: i32 },
    Pie { x: i32, y: i32, r: i32, start: i32, end: i32 },
    Circle { x: i32, y: i32, r: i32 },
    Rect { x: i32, y: i32, w: i32, h: i32, r: i32 },
    Stroke { color: Color, width: i32 },
    Fill { color: Color },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorContent {
    pub commands: Vec<PathCommand>,
    /// Explicit drawing size; otherwise the extent of the commands.
    pub view_size: Option<Size>,
}

impl VectorContent {
    /// Far extent of all geometry commands, measured from the origin.
    pub fn extent(&self) -> Size {
        let mut far = Size::ZERO;
        let mut reach = |x: i32, y: i32| {
            far.width = far.width.max(x);
            far.height = far.height.max(y);
        };
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => reach(x, y),
                PathCommand::CurveTo {
                    cx1,
                    cy1,
                    cx2,
                    cy2,
                    x,
                    y,
                } => {
                    // Control points bound the curve.
                    reach(cx1, cy1);
                    reach(cx2, cy2);
                    reach(x, y);
                }
                PathCommand::Arc { x, y, r, .. }
                | PathCommand::Pie { x, y, r, .. }
                | PathCommand::Circle { x, y, r } => reach(x + r.abs(), y + r.abs()),
                PathCommand::Rect { x, y, w, h, .. } => reach(x + w, y + h),
                PathCommand::Stroke { .. } | PathCommand::Fill { .. } => {}
            }
        }
        far
    }
}

impl IntrinsicSize for VectorContent {
    fn intrinsic_size(&self, _: &dyn ContentMeasurer, _: Option<i32>) -> Option<Size> {
        Some(self.view_size.unwrap_or_else(|| self.extent()))
    }
}

// =========================================================================
// Containers
// =========================================================================

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ContainerLayout {
    /// Children position themselves by x/y inside the content rect.
    Layer,
    /// Vertical stack: a flex column without grow or shrink.
    VBox,
    /// Horizontal stack: a flex row without grow or shrink.
    HBox,
    Flex(FlexContainer),
}

impl ContainerLayout {
    /// The flex settings this layout runs with, if it is flex-based.
    pub fn flex(&self) -> Option<FlexContainer> {
        match self {
            ContainerLayout::Layer => None,
            ContainerLayout::VBox => Some(FlexContainer::column()),
            ContainerLayout::HBox => Some(FlexContainer::row()),
            ContainerLayout::Flex(flex) => Some(*flex),
        }
    }

    /// Stacks ignore their children's grow and shrink factors.
    pub fn is_stack(&self) -> bool {
        matches!(self, ContainerLayout::VBox | ContainerLayout::HBox)
    }
}

/// Vertical scroll state of a scrollable container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollLayer {
    /// Requested offset; clamped to the scrollable range when the display
    /// list is built.
    pub offset: i32,
    /// Total content height. `None` measures it from the laid-out children.
    pub content_height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub layout: ContainerLayout,
    pub scroll: Option<ScrollLayer>,
    pub background: Option<Color>,
}

impl Container {
    pub fn new(layout: ContainerLayout) -> Self {
        Self {
            layout,
            scroll: None,
            background: None,
        }
    }
}

// =========================================================================
// Constructors and builder methods
// =========================================================================

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            geometry: Geometry::default(),
            padding: Edges::ZERO,
            margin: Edges::ZERO,
            id: None,
            listens: EventSet::empty(),
            flex_item: FlexItem::default(),
            kind,
        }
    }

    pub fn rectangle(color: Color) -> Self {
        Self::new(NodeKind::Rectangle(RectangleStyle {
            color,
            ..RectangleStyle::default()
        }))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(TextContent::new(text)))
    }

    pub fn image(image: ImageContent) -> Self {
        Self::new(NodeKind::Image(image))
    }

    /// A text input. Listens for click, key, text, focus, blur and pointer
    /// up/motion events.
    pub fn input(input: InputContent) -> Self {
        let mut node = Self::new(NodeKind::Input(input));
        node.listens = EventSet::INPUT_DEFAULT;
        node.padding = Edges::all(5);
        node
    }

    pub fn vector(commands: Vec<PathCommand>) -> Self {
        Self::new(NodeKind::Vector(VectorContent {
            commands,
            view_size: None,
        }))
    }

    pub fn layer() -> Self {
        Self::container(ContainerLayout::Layer)
    }

    pub fn vbox() -> Self {
        Self::container(ContainerLayout::VBox)
    }

    pub fn hbox() -> Self {
        Self::container(ContainerLayout::HBox)
    }

    pub fn flex(flex: FlexContainer) -> Self {
        Self::container(ContainerLayout::Flex(flex))
    }

    /// A layer that scrolls vertically and clips its descendants.
    pub fn scroll_layer(offset: i32) -> Self {
        let mut node = Self::layer();
        if let NodeKind::Container(container) = &mut node.kind {
            container.scroll = Some(ScrollLayer {
                offset,
                content_height: None,
            });
        }
        node.listens = EventSet::SCROLL;
        node
    }

    fn container(layout: ContainerLayout) -> Self {
        Self::new(NodeKind::Container(Container::new(layout)))
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn x(mut self, x: impl Into<Length>) -> Self {
        self.geometry.x = x.into();
        self
    }

    pub fn y(mut self, y: impl Into<Length>) -> Self {
        self.geometry.y = y.into();
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.geometry.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.geometry.height = height.into();
        self
    }

    pub fn size(self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.width(width).height(height)
    }

    pub fn padding(mut self, padding: impl Into<Edges>) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn margin(mut self, margin: impl Into<Edges>) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn listen(mut self, kind: EventKind) -> Self {
        self.listens |= kind.flag();
        self
    }

    pub fn listens(mut self, events: EventSet) -> Self {
        self.listens = events;
        self
    }

    pub fn flex_item(mut self, item: FlexItem) -> Self {
        self.flex_item = item;
        self
    }

    pub fn grow(mut self, grow: f32) -> Self {
        self.flex_item = self.flex_item.grow(grow);
        self
    }

    pub fn shrink(mut self, shrink: f32) -> Self {
        self.flex_item = self.flex_item.shrink(shrink);
        self
    }

    pub fn basis(mut self, basis: impl Into<Length>) -> Self {
        self.flex_item = self.flex_item.basis(basis);
        self
    }

    /// Set the background of a container. No effect on primitives.
    pub fn background(mut self, color: Color) -> Self {
        if let NodeKind::Container(container) = &mut self.kind {
            container.background = Some(color);
        }
        self
    }

    /// Fix the scrollable content height of a scroll layer.
    pub fn content_height(mut self, height: i32) -> Self {
        if let NodeKind::Container(Container {
            scroll: Some(scroll),
            ..
        }) = &mut self.kind
        {
            scroll.content_height = Some(height.max(0));
        }
        self
    }

    pub fn scroll(&self) -> Option<&ScrollLayer> {
        self.kind.container().and_then(|c| c.scroll.as_ref())
    }
}
