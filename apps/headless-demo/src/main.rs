use std::cell::Cell;
use std::rc::Rc;

use trellis_app_shell::{AppShell, ShellConfig};
use trellis_core::ElementKey;
use trellis_foundation::{KeyEvent, Modifiers, PointerEventKind, UiEvent};
use trellis_render_common::{DrawOp, RecordingSurface};
use trellis_ui::{
    find_path_to_node_by_key, format_render_tree, AnyElement, BoxSpec, CrossAxisAlignment, HBox,
    Scroll, ScrollSpec, Text, TextInput, TextInputSpec, TextSpec, UiError, VBox, Window,
    TEXT_SLOT,
};
use trellis_ui_graphics::{Color, EdgeInsets, Point, Size};

const VIEWPORT: Size = Size {
    width: 480.0,
    height: 360.0,
};

const BUTTON_KEY: &str = "1.2.#toolbar.#button";
const NAME_KEY: &str = "1.2.#name";
const LIST_KEY: &str = "1.2.3.#list";

/// One simulated input from the scripted session.
enum Step {
    Click(&'static str),
    Hover(&'static str),
    Key(KeyEvent),
    Type(&'static str),
    Wheel(&'static str, f32),
}

fn main() {
    env_logger::init();

    println!("=== Trellis Headless Demo ===");
    println!("Runs a scripted session against a recording surface:");
    println!("  - clicking a button that counts its clicks");
    println!("  - focusing and editing a text field");
    println!("  - scrolling a clipped list");
    println!();

    let clicks = Rc::new(Cell::new(0u32));
    let content = {
        let clicks = Rc::clone(&clicks);
        move || demo_content(&clicks)
    };
    let config = ShellConfig {
        viewport: VIEWPORT,
        log_render_tree: true,
        ..ShellConfig::default()
    };
    let mut app = AppShell::with_config(RecordingSurface::default(), config, content);
    settle(&mut app);

    let script = vec![
        Step::Hover(BUTTON_KEY),
        Step::Click(BUTTON_KEY),
        Step::Click(BUTTON_KEY),
        Step::Click(NAME_KEY),
        Step::Key(KeyEvent::new("End")),
        Step::Type(", world"),
        Step::Key(KeyEvent::new("a").with_modifiers(Modifiers::CTRL)),
        Step::Type("Trellis"),
        Step::Wheel(LIST_KEY, 60.0),
    ];

    for step in script {
        let outcome = run_step(&mut app, &step);
        if let Err(err) = outcome {
            log::error!("step failed: {err}");
        }
        settle(&mut app);
    }

    if let Some(tree) = app.tree() {
        println!("{}", format_render_tree(tree));
    }
    let name: Option<String> = app.state().get(&ElementKey::new(NAME_KEY), TEXT_SLOT);
    println!("button clicked {} times", clicks.get());
    println!("name field holds {:?}", name.unwrap_or_default());
    println!("focused: {:?}", app.focused());
    println!();
    println!("Last frame:");
    for op in app.surface().operations() {
        match op {
            DrawOp::Text { value, origin, .. } => {
                println!("  text {value:?} at ({:.0}, {:.0})", origin.x, origin.y)
            }
            DrawOp::FillRect { rect, .. } => println!(
                "  fill {:.0}x{:.0} at ({:.0}, {:.0})",
                rect.width, rect.height, rect.x, rect.y
            ),
            DrawOp::StrokeRect { rect, width, .. } => println!(
                "  stroke {:.0}x{:.0} at ({:.0}, {:.0}) width {width:.0}",
                rect.width, rect.height, rect.x, rect.y
            ),
            DrawOp::Clip { rect } => println!(
                "  clip {:.0}x{:.0} at ({:.0}, {:.0})",
                rect.width, rect.height, rect.x, rect.y
            ),
        }
    }
}

fn demo_content(clicks: &Rc<Cell<u32>>) -> AnyElement {
    let on_click = {
        let clicks = Rc::clone(clicks);
        move |event: &UiEvent| {
            let UiEvent::Pointer(pointer) = event else {
                return Ok(false);
            };
            if pointer.kind != PointerEventKind::Up {
                return Ok(pointer.kind == PointerEventKind::Down);
            }
            clicks.set(clicks.get() + 1);
            Ok(true)
        }
    };

    let button = HBox(
        BoxSpec::new()
            .key("button")
            .padding(EdgeInsets::symmetric(8.0, 4.0))
            .border(EdgeInsets::uniform(1.0))
            .border_color(Color::GRAY)
            .background(Color::LIGHT_GRAY)
            .hover_background(Color::SELECTION)
            .on_event(on_click),
        vec![Text("Click me", TextSpec::new())],
    );
    let toolbar = HBox(
        BoxSpec::new()
            .key("toolbar")
            .cross_axis_alignment(CrossAxisAlignment::Center),
        vec![
            button,
            Text(
                format!("  clicked {} times", clicks.get()),
                TextSpec::new().color(Color::GRAY),
            ),
        ],
    );
    let items = (1..=20)
        .map(|index| Text(format!("Item {index}"), TextSpec::new()))
        .collect();
    let list = VBox(
        BoxSpec::new().flexible(),
        vec![Scroll(
            ScrollSpec::vertical()
                .key("list")
                .border(EdgeInsets::uniform(1.0), Color::GRAY),
            VBox(BoxSpec::new(), items),
        )],
    );

    Window(
        "Trellis demo",
        VBox(
            BoxSpec::new().fill().padding(EdgeInsets::uniform(8.0)),
            vec![
                toolbar,
                TextInput(TextInputSpec::new("Hello").key("name").min_width(200.0)),
                list,
            ],
        ),
    )
}

fn run_step(app: &mut AppShell<RecordingSurface>, step: &Step) -> Result<(), UiError> {
    match step {
        Step::Click(key) => {
            let center = center_of(app, key);
            println!("click {key}");
            app.pointer_moved(center.x, center.y)?;
            app.pointer_pressed()?;
            app.pointer_released()?;
        }
        Step::Hover(key) => {
            let center = center_of(app, key);
            println!("hover {key}");
            app.pointer_moved(center.x, center.y)?;
        }
        Step::Key(event) => {
            println!("key {}", event.key);
            app.key_pressed(event.clone())?;
        }
        Step::Type(text) => {
            println!("type {text:?}");
            for ch in text.chars() {
                app.key_pressed(KeyEvent::new(ch.to_string()))?;
            }
        }
        Step::Wheel(key, delta) => {
            let center = center_of(app, key);
            println!("wheel {delta} over {key}");
            app.pointer_moved(center.x, center.y)?;
            app.wheel(0.0, *delta)?;
        }
    }
    Ok(())
}

/// Root-space centre of the node with identity `key`, or the origin when the
/// node is missing.
fn center_of(app: &AppShell<RecordingSurface>, key: &str) -> Point {
    app.tree()
        .and_then(|tree| find_path_to_node_by_key(&ElementKey::new(key), tree))
        .map(|path| path.target_bounds().center())
        .unwrap_or_else(|| {
            log::warn!("no node with key {key}");
            Point::ZERO
        })
}

fn settle(app: &mut AppShell<RecordingSurface>) {
    let mut frames = 0;
    while app.should_render() && frames < 16 {
        app.update();
        frames += 1;
    }
}
