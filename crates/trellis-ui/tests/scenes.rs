use std::cell::Cell;
use std::rc::Rc;

use trellis_foundation::KeyEvent;
use trellis_render_common::DrawOp;
use trellis_testing::{run_test_shell, LayoutTestRule};
use trellis_ui::{
    find_path_to_node_at_point, find_path_to_node_by_key, BoxSpec, ElementKey, Grid, GridSpec,
    HBox, NodeKind, Scroll, ScrollSpec, SelfLayout, Spacer, Square, Text, TextInput,
    TextInputSpec, TextSpec, VBox, Window, SCROLL_OFFSET_SLOT, TEXT_SLOT,
};
use trellis_ui_graphics::{Color, EdgeInsets, Point, Rect, Size};

#[test]
fn hit_paths_by_point_and_by_key_agree() {
    run_test_shell(|rule| {
        rule.set_content(|| {
            VBox(
                BoxSpec::new().padding(EdgeInsets::uniform(10.0)),
                vec![
                    HBox(
                        BoxSpec::new(),
                        vec![Square(30.0, Color::BLACK), Square(30.0, Color::GRAY)],
                    ),
                    Square(50.0, Color::BLACK),
                ],
            )
        })
        .unwrap();

        let root = rule.root().unwrap();
        let point = Point::new(55.0, 25.0);
        let by_point = find_path_to_node_at_point(point, root).unwrap();
        assert_eq!(by_point.target().key.as_str(), "1.1.2");

        let by_key = find_path_to_node_by_key(&by_point.target().key, root).unwrap();
        assert!(std::ptr::eq(by_key.target(), by_point.target()));
        assert_eq!(by_key.count(), 3);

        // 55 - 10 (padding) - 30 (first square)
        let local = by_point.to_target_point(point);
        assert_eq!(local, Point::new(15.0, 15.0));
        assert!(Rect::from_size(by_point.target().size).contains(local));
        assert_eq!(
            by_point.target_bounds(),
            Rect::new(40.0, 10.0, 30.0, 30.0)
        );
    });
}

#[test]
fn scroll_offset_persists_and_is_clamped() {
    let mut rule = LayoutTestRule::new().with_viewport(200.0, 100.0);
    rule.set_content(|| {
        Scroll(
            ScrollSpec::vertical().key("list"),
            VBox(
                BoxSpec::new(),
                (0..5).map(|_| Square(40.0, Color::BLACK)).collect(),
            ),
        )
    })
    .unwrap();
    let list = ElementKey::new("#list");

    assert!(rule.scroll(10.0, 10.0, 0.0, 30.0).unwrap());
    assert_eq!(rule.state().unwrap().get::<f32>(&list, SCROLL_OFFSET_SLOT), Some(30.0));
    assert_eq!(rule.node("#list.1").unwrap().position.y, -30.0);

    // Unrelated passes keep the offset.
    rule.relayout().unwrap();
    assert_eq!(rule.node("#list.1").unwrap().position.y, -30.0);

    // 200 of content in 100 of viewport.
    rule.scroll(10.0, 10.0, 0.0, 1000.0).unwrap();
    assert_eq!(rule.state().unwrap().get::<f32>(&list, SCROLL_OFFSET_SLOT), Some(100.0));
    rule.scroll(10.0, 10.0, 0.0, -1000.0).unwrap();
    assert_eq!(rule.state().unwrap().get::<f32>(&list, SCROLL_OFFSET_SLOT), Some(0.0));
}

#[test]
fn scrolled_out_content_is_clipped_from_paint() {
    let mut rule = LayoutTestRule::new().with_viewport(100.0, 40.0);
    rule.set_content(|| {
        Scroll(
            ScrollSpec::vertical(),
            VBox(
                BoxSpec::new(),
                vec![
                    Text("first", TextSpec::new()),
                    Text("second", TextSpec::new()),
                    Text("third", TextSpec::new()),
                ],
            ),
        )
    })
    .unwrap();
    let texts: Vec<String> = rule.surface().unwrap().texts().map(str::to_owned).collect();
    assert_eq!(texts, vec!["first", "second"]);

    rule.scroll(5.0, 5.0, 0.0, 20.0).unwrap();
    let texts: Vec<String> = rule.surface().unwrap().texts().map(str::to_owned).collect();
    assert_eq!(texts, vec!["second", "third"]);
}

#[test]
fn state_of_vanished_elements_is_swept() {
    let show_field = Rc::new(Cell::new(true));
    let flag = Rc::clone(&show_field);
    let mut rule = LayoutTestRule::new();
    rule.set_content(move || {
        let mut children = vec![Square(10.0, Color::BLACK)];
        if flag.get() {
            children.push(TextInput(TextInputSpec::new("draft").key("note")));
        }
        VBox(BoxSpec::new(), children)
    })
    .unwrap();

    let note = ElementKey::new("1.#note");
    rule.tap_key("1.#note").unwrap();
    rule.press_key(KeyEvent::new("End")).unwrap();
    rule.type_text("!").unwrap();
    assert_eq!(
        rule.state().unwrap().get::<String>(&note, TEXT_SLOT),
        Some("draft!".to_owned())
    );
    assert_eq!(rule.focused(), Some(&note));

    show_field.set(false);
    rule.relayout().unwrap();
    assert!(!rule.state().unwrap().contains(&note));
    assert!(rule.focused().is_none());

    // Coming back starts from the initial value again.
    show_field.set(true);
    rule.relayout().unwrap();
    assert_eq!(
        rule.state().unwrap().get::<String>(&note, TEXT_SLOT),
        Some("draft".to_owned())
    );
}

#[test]
fn grid_fills_rows_with_uniform_cells() {
    let mut rule = LayoutTestRule::new();
    rule.set_content(|| {
        Grid(
            GridSpec::new(3).spacing(5.0),
            vec![
                Square(10.0, Color::BLACK),
                Square(20.0, Color::BLACK),
                Square(10.0, Color::BLACK),
                Square(10.0, Color::BLACK),
            ],
        )
    })
    .unwrap();

    let root = rule.root().unwrap();
    assert_eq!(root.kind, NodeKind::Grid);
    assert_eq!(root.size, Size::new(70.0, 45.0));
    let positions: Vec<Point> = root.children.iter().map(|c| c.position).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(0.0, 0.0),
            Point::new(25.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(0.0, 25.0),
        ]
    );
}

#[test]
fn wrapped_text_stays_within_its_width() {
    let mut rule = LayoutTestRule::new().with_viewport(100.0, 200.0);
    rule.set_content(|| Text("the quick brown fox jumps", TextSpec::new().wrap()))
        .unwrap();

    let root = rule.root().unwrap();
    let lines: Vec<&str> = root
        .children
        .iter()
        .map(|line| line.text.as_ref().unwrap().value.as_str())
        .collect();
    assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    assert!(root.children.iter().all(|line| line.size.width <= 100.0));
    assert_eq!(root.size.height, 60.0);
}

#[test]
fn window_frames_title_and_content() {
    let mut rule = LayoutTestRule::new().with_viewport(300.0, 200.0);
    rule.set_content(|| Window("Notes", Square(40.0, Color::BLACK)))
        .unwrap();

    // The chrome is plain boxes.
    let root = rule.root().unwrap();
    assert_eq!(root.kind, NodeKind::Box);
    assert_eq!(root.size, Size::new(300.0, 200.0));
    let title_bar = rule.node("1.1").unwrap();
    // 1px frame border; 8x4 padding around a 20 tall title.
    assert_eq!(title_bar.position, Point::new(1.0, 1.0));
    assert_eq!(title_bar.size, Size::new(298.0, 28.0));
    assert_eq!(rule.node("1.2").unwrap().position, Point::new(1.0, 29.0));

    let surface = rule.surface().unwrap();
    assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["Notes"]);
    assert!(surface.operations().iter().any(|op| matches!(
        op,
        DrawOp::StrokeRect { color, .. } if *color == Color::GRAY
    )));
}

#[test]
fn hovering_restyles_the_nearest_hoverable_box() {
    let mut rule = LayoutTestRule::new();
    rule.set_content(|| {
        HBox(
            BoxSpec::new().main_axis_self_layout(SelfLayout::Shrink),
            vec![
                HBox(
                    BoxSpec::new()
                        .key("button")
                        .padding(EdgeInsets::uniform(5.0))
                        .background(Color::LIGHT_GRAY)
                        .hover_background(Color::BLUE),
                    vec![Square(10.0, Color::BLACK)],
                ),
                Spacer(),
            ],
        )
    })
    .unwrap();
    let button = ElementKey::new("1.#button");

    rule.hover(10.0, 10.0).unwrap();
    assert_eq!(rule.shell().unwrap().hovered(), Some(&button));
    let fills: Vec<Color> = rule
        .surface()
        .unwrap()
        .operations()
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillRect { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert!(fills.contains(&Color::BLUE));
    assert!(!fills.contains(&Color::LIGHT_GRAY));

    rule.hover(500.0, 500.0).unwrap();
    assert!(rule.shell().unwrap().hovered().is_none());
}
