use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trellis_app_shell::{AppShell, ShellConfig};
use trellis_foundation::{PointerEventKind, UiEvent};
use trellis_render_common::RecordingSurface;
use trellis_ui::{
    AnyElement, BoxSpec, HBox, Scroll, ScrollSpec, Square, Text, TextSpec, VBox,
    SCROLL_OFFSET_SLOT,
};
use trellis_ui_graphics::{Color, Size};

fn long_list() -> AnyElement {
    Scroll(
        ScrollSpec::vertical(),
        VBox(
            BoxSpec::new(),
            (0..10).map(|_| Square(100.0, Color::BLACK)).collect(),
        ),
    )
}

fn settle(shell: &mut AppShell<RecordingSurface>) {
    for _ in 0..8 {
        if !shell.should_render() {
            return;
        }
        shell.update();
    }
}

#[test]
fn idle_shell_does_not_spin() {
    let mut shell = AppShell::new(RecordingSurface::default(), long_list);
    settle(&mut shell);
    assert!(!shell.should_render());

    // No node restyles on hover, so moving the pointer changes nothing.
    shell.pointer_moved(50.0, 50.0).unwrap();
    assert!(!shell.should_render());
}

#[test]
fn wheel_handler_requests_a_frame_and_content_moves() {
    let config = ShellConfig {
        viewport: Size::new(200.0, 300.0),
        ..ShellConfig::default()
    };
    let mut shell = AppShell::with_config(RecordingSurface::default(), config, long_list);
    settle(&mut shell);

    shell.pointer_moved(50.0, 50.0).unwrap();
    assert!(shell.wheel(0.0, 50.0).unwrap());
    assert!(shell.should_render());
    shell.update();
    assert_eq!(shell.tree().unwrap().children[0].position.y, -50.0);

    // 10 squares of 100 in a 300 tall viewport overflow by 700.
    shell.wheel(0.0, 5000.0).unwrap();
    settle(&mut shell);
    let root = shell.tree().unwrap();
    assert_eq!(root.children[0].position.y, -700.0);
    assert_eq!(
        shell.state().get::<f32>(&root.key, SCROLL_OFFSET_SLOT),
        Some(700.0)
    );
}

#[test]
fn frame_waker_fires_on_redraw_requests() {
    let mut shell = AppShell::new(RecordingSurface::default(), long_list);
    settle(&mut shell);
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&wakes);
    shell.runtime().set_frame_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    shell.pointer_moved(10.0, 10.0).unwrap();
    shell.wheel(0.0, 20.0).unwrap();
    assert_eq!(wakes.load(Ordering::SeqCst), 1);
}

#[test]
fn consumed_click_schedules_a_relayout() {
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    let mut shell = AppShell::new(RecordingSurface::default(), move || {
        let on_click = {
            let counter = Rc::clone(&counter);
            move |event: &UiEvent| match event {
                UiEvent::Pointer(pointer) if pointer.kind == PointerEventKind::Up => {
                    counter.set(counter.get() + 1);
                    Ok(true)
                }
                _ => Ok(false),
            }
        };
        VBox(
            BoxSpec::new(),
            vec![
                HBox(
                    BoxSpec::new().on_event(on_click),
                    vec![Square(40.0, Color::BLACK)],
                ),
                Text(format!("clicked {}", counter.get()), TextSpec::new()),
            ],
        )
    });
    settle(&mut shell);

    shell.pointer_moved(10.0, 10.0).unwrap();
    assert!(!shell.pointer_pressed().unwrap());
    assert!(!shell.should_render());

    // The handler never touches a frame requester.
    assert!(shell.pointer_released().unwrap());
    assert_eq!(clicks.get(), 1);
    assert!(shell.should_render());
    shell.update();
    assert!(shell.surface().texts().any(|text| text == "clicked 1"));
    assert!(!shell.should_render());
}
