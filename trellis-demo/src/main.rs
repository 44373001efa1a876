//! Trellis demo.
//!
//! Builds a small form, lays it out at 800x600, prints the display list as
//! JSON and replays a scripted input sequence through the event router,
//! rebuilding the tree every frame the way an application would.
//!
//! Set `TRELLIS_CONFIG` to a JSON file to override engine settings and
//! `RUST_LOG` to see layout diagnostics.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use trellis::event::Key;
use trellis::layout::{self, FlexContainer, InputContent, JustifyContent, MonospaceMeasurer};
use trellis::{
    Color, DisplayList, Edges, EngineConfig, EventRouter, EventSet, InputEvent, Modifiers,
    MouseButton, Node, Point, Rect, RoutedEvent, ScrollDelta, ScrollState, Tree, TreeBuilder,
};

/// What the app remembers between frames.
struct AppState {
    name: String,
    saved: u32,
    log: ScrollState,
}

fn view(state: &AppState) -> anyhow::Result<Tree> {
    let mut b = TreeBuilder::new();
    b.scope(
        Node::vbox()
            .size("100%", "100%")
            .padding(Edges::all(16))
            .background(Color::rgb(245, 245, 245)),
        |b| {
            b.add(Node::text("Trellis demo").margin(Edges::new(0, 0, 12, 0)))?;
            b.add(
                Node::input(InputContent {
                    text: state.name.clone(),
                    placeholder: "Your name".into(),
                    ..InputContent::default()
                })
                .id("name")
                .width(300),
            )?;
            b.scope(
                Node::flex(FlexContainer::row().justify(JustifyContent::FlexEnd).gap(8))
                    .margin(Edges::new(12, 0, 12, 0)),
                |b| {
                    b.add(
                        Node::text("Clear")
                            .id("clear")
                            .padding(Edges::symmetric(4, 10))
                            .listens(EventSet::CLICK | EventSet::HOVER),
                    )?;
                    b.add(
                        Node::text("Save")
                            .id("save")
                            .padding(Edges::symmetric(4, 10))
                            .listens(EventSet::CLICK | EventSet::HOVER),
                    )?;
                    Ok(())
                },
            )?;
            b.scope(
                Node::scroll_layer(state.log.offset).id("log").height(120),
                |b| {
                    b.scope(Node::vbox().width("100%"), |b| {
                        for i in 0..(state.saved + 1) * 8 {
                            b.add(Node::text(format!("entry {i}")).id(format!("entry{i}")))?;
                        }
                        Ok(())
                    })?;
                    Ok(())
                },
            )?;
            Ok(())
        },
    )?;
    Ok(b.finish()?)
}

fn script() -> Vec<InputEvent> {
    let click = |x, y| InputEvent::MouseDown {
        button: MouseButton::Left,
        position: Point::new(x, y),
    };
    let release = |x, y| InputEvent::MouseUp {
        button: MouseButton::Left,
        position: Point::new(x, y),
    };
    vec![
        click(30, 50),
        InputEvent::TextInput { text: "Ada".into() },
        InputEvent::KeyDown {
            key: Key::Enter,
            modifiers: Modifiers::NONE,
        },
        InputEvent::MouseMotion {
            position: Point::new(760, 100),
        },
        click(760, 100),
        release(760, 100),
        InputEvent::Wheel {
            delta: ScrollDelta::Lines { x: 0.0, y: -1.0 },
            position: Point::new(40, 140),
        },
        InputEvent::PointerLeft,
    ]
}

fn update(state: &mut AppState, event: &RoutedEvent) {
    if state.log.apply(event) {
        return;
    }
    match event {
        RoutedEvent::TextInput { target, text } if target == "name" => state.name.push_str(text),
        RoutedEvent::Click { target, .. } if target == "save" => state.saved += 1,
        RoutedEvent::Click { target, .. } if target == "clear" => state.name.clear(),
        _ => {}
    }
}

fn frame(tree: &Tree, viewport: Rect, config: &EngineConfig) -> anyhow::Result<DisplayList> {
    let measurer = MonospaceMeasurer::from_config(config);
    let resolved = layout::build(tree, viewport, &measurer).context("layout failed")?;
    Ok(DisplayList::with_config(tree, &resolved, config))
}

fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::var_os("TRELLIS_CONFIG") {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.to_string_lossy()))?,
        None => EngineConfig::default(),
    };
    let viewport = Rect::new(0, 0, 800, 600);

    let mut state = AppState {
        name: String::new(),
        saved: 0,
        log: ScrollState::new("log"),
    };
    let mut router = EventRouter::new(&config);

    let tree = view(&state)?;
    let list = frame(&tree, viewport, &config)?;
    println!("{}", list.to_json()?);

    for input in script() {
        // Rebuild from scratch each tick; only the app state carries over.
        let tree = view(&state)?;
        let mut list = frame(&tree, viewport, &config)?;
        state.log.sync(&list);

        for event in router.route(&mut list, &input) {
            tracing::info!("{:?} -> {}", event.kind(), event.target());
            println!("{}", serde_json::to_string(&event)?);
            update(&mut state, &event);
        }
    }

    tracing::info!(
        "final state: name={:?} saved={} log offset={} focused={:?}",
        state.name,
        state.saved,
        state.log.offset,
        router.focused()
    );
    Ok(())
}
