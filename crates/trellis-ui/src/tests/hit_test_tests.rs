use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;
use crate::render_node::{EventHandler, NodeFlags, NodeKind};
use trellis_foundation::{PointerEvent, PointerEventKind, WheelEvent};
use trellis_ui_graphics::Size;

fn node(key: &str, position: Point, size: Size) -> RenderNode {
    RenderNode::builder(ElementKey::new(key), NodeKind::Box)
        .size(size)
        .build()
        .placed_at(position)
}

fn with_children(mut parent: RenderNode, children: Vec<RenderNode>) -> RenderNode {
    parent.children = children;
    parent
}

/// Root 100x100 at (10, 10) holding:
/// - 1.1: 50x50 at (0, 0) with child 1.1.1 (10x10 at (5, 5))
/// - 1.2: 50x50 at (25, 25), overlapping 1.1
/// - 1.3: shadow node covering everything
fn tree() -> RenderNode {
    let inner = node("1.1.1", Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    let first = with_children(
        node("1.1", Point::ZERO, Size::new(50.0, 50.0)),
        vec![inner],
    );
    let second = node("1.2", Point::new(25.0, 25.0), Size::new(50.0, 50.0));
    let mut shadow = node("1.3", Point::ZERO, Size::new(100.0, 100.0));
    shadow.flags |= NodeFlags::SHADOW;
    with_children(
        node("1", Point::new(10.0, 10.0), Size::new(100.0, 100.0)),
        vec![first, second, shadow],
    )
}

#[test]
fn deepest_node_is_found_and_path_runs_to_root() {
    let root = tree();
    let path = find_path_to_node_at_point(Point::new(17.0, 17.0), &root).unwrap();
    assert_eq!(path.target().key.as_str(), "1.1.1");
    assert_eq!(path.count(), 3);
    let keys: Vec<&str> = path.nodes().iter().map(|n| n.key.as_str()).collect();
    assert_eq!(keys, vec!["1.1.1", "1.1", "1"]);
    assert_eq!(path.root().key.as_str(), "1");
}

#[test]
fn later_sibling_wins_on_overlap_and_shadows_are_skipped() {
    let root = tree();
    let path = find_path_to_node_at_point(Point::new(45.0, 45.0), &root).unwrap();
    assert_eq!(path.target().key.as_str(), "1.2");

    // Only the shadow node and the root cover this point.
    let path = find_path_to_node_at_point(Point::new(100.0, 15.0), &root).unwrap();
    assert_eq!(path.target().key.as_str(), "1");
}

#[test]
fn points_outside_the_root_find_nothing() {
    let root = tree();
    assert!(find_path_to_node_at_point(Point::new(5.0, 5.0), &root).is_none());
    assert!(find_path_to_node_at_point(Point::new(110.0, 50.0), &root).is_none());
}

#[test]
fn to_target_point_subtracts_every_position_on_the_path() {
    let root = tree();
    let path = find_path_to_node_at_point(Point::new(17.0, 18.0), &root).unwrap();
    // 17 - 10 (root) - 0 (1.1) - 5 (1.1.1)
    assert_eq!(path.to_target_point(Point::new(17.0, 18.0)), Point::new(2.0, 3.0));
}

#[test]
fn key_search_agrees_with_point_search() {
    let root = tree();
    let by_point = find_path_to_node_at_point(Point::new(17.0, 17.0), &root).unwrap();
    let key = by_point.target().key.clone();
    let by_key = find_path_to_node_by_key(&key, &root).unwrap();
    assert!(std::ptr::eq(by_key.target(), by_point.target()));
    assert_eq!(by_key.count(), by_point.count());

    assert!(find_path_to_node_by_key(&ElementKey::new("1.3"), &root).is_none());
    assert!(find_path_to_node_by_key(&ElementKey::new("1.9"), &root).is_none());
}

type Frame = (u16, u16, u16, u16);

fn framed(key: &str, (x, y, width, height): Frame) -> RenderNode {
    node(
        key,
        Point::new(x as f32, y as f32),
        Size::new(width as f32, height as f32),
    )
}

/// A 200x200 root with up to four overlapping children, each holding up to
/// three grandchildren, some of them shadows.
fn arbitrary_tree() -> impl Strategy<Value = RenderNode> {
    let frame = (0u16..150, 0u16..150, 1u16..80, 1u16..80);
    let grandchild = (frame.clone(), any::<bool>());
    prop::collection::vec((frame, prop::collection::vec(grandchild, 0..3)), 0..5).prop_map(
        |children| {
            let children = children
                .into_iter()
                .enumerate()
                .map(|(index, (frame, grandchildren))| {
                    let key = format!("1.{}", index + 1);
                    let grandchildren = grandchildren
                        .into_iter()
                        .enumerate()
                        .map(|(inner, (frame, shadow))| {
                            let mut node = framed(&format!("{key}.{}", inner + 1), frame);
                            if shadow {
                                node.flags |= NodeFlags::SHADOW;
                            }
                            node
                        })
                        .collect();
                    with_children(framed(&key, frame), grandchildren)
                })
                .collect();
            with_children(framed("1", (0, 0, 200, 200)), children)
        },
    )
}

proptest! {
    #[test]
    fn point_and_key_searches_agree(root in arbitrary_tree(), x in 0u16..200, y in 0u16..200) {
        let point = Point::new(x as f32 + 0.5, y as f32 + 0.5);
        let by_point = find_path_to_node_at_point(point, &root);
        prop_assert!(by_point.is_some(), "the root covers every point");
        let by_point = by_point.unwrap();
        let target = by_point.target();
        prop_assert!(!target.is_shadow());

        let local = by_point.to_target_point(point);
        prop_assert!(local.x >= 0.0 && local.x <= target.size.width);
        prop_assert!(local.y >= 0.0 && local.y <= target.size.height);

        let by_key = find_path_to_node_by_key(&target.key, &root);
        prop_assert!(by_key.is_some());
        let by_key = by_key.unwrap();
        prop_assert!(std::ptr::eq(by_key.target(), target));
        prop_assert_eq!(by_key.count(), by_point.count());
        prop_assert_eq!(by_key.target_bounds(), by_point.target_bounds());
    }
}

#[test]
fn dispatch_rewrites_position_into_target_space() {
    let seen = Rc::new(RefCell::new(None));
    let recorder = Rc::clone(&seen);
    let mut root = tree();
    root.children[1].handler = Some(EventHandler::new(move |event| {
        *recorder.borrow_mut() = event.position();
        Ok(true)
    }));

    let event = UiEvent::Pointer(PointerEvent::new(
        PointerEventKind::Down,
        Point::new(40.0, 50.0),
    ));
    let path = find_path_to_node_at_point(Point::new(40.0, 50.0), &root).unwrap();
    assert!(path.dispatch(&event).unwrap());
    assert_eq!(*seen.borrow(), Some(Point::new(5.0, 15.0)));
}

#[test]
fn dispatch_without_handler_reports_unhandled() {
    let root = tree();
    let path = find_path_to_node_at_point(Point::new(17.0, 17.0), &root).unwrap();
    let event = UiEvent::Pointer(PointerEvent::new(
        PointerEventKind::Move,
        Point::new(17.0, 17.0),
    ));
    assert!(!path.dispatch(&event).unwrap());
}

#[test]
fn nearest_handler_receives_position_in_its_own_space() {
    let seen = Rc::new(RefCell::new(None));
    let recorder = Rc::clone(&seen);
    let mut root = tree();
    root.children[0].handler = Some(EventHandler::new(move |event| {
        *recorder.borrow_mut() = event.position();
        Ok(true)
    }));

    let event = UiEvent::Pointer(PointerEvent::new(
        PointerEventKind::Down,
        Point::new(17.0, 17.0),
    ));
    let path = find_path_to_node_at_point(Point::new(17.0, 17.0), &root).unwrap();
    let consumer = path.dispatch_to_nearest_handler(&event).unwrap();
    assert_eq!(consumer, Some(ElementKey::new("1.1")));
    assert_eq!(*seen.borrow(), Some(Point::new(7.0, 7.0)));
}

#[test]
fn scroll_target_is_the_deepest_scrollable_ancestor() {
    let mut root = tree();
    root.children[0].flags |= NodeFlags::CAN_SCROLL;

    let path = find_path_to_scroll_target_at_point(Point::new(17.0, 17.0), &root).unwrap();
    assert_eq!(path.target().key.as_str(), "1.1");
    assert_eq!(path.count(), 2);

    let wheel = UiEvent::Wheel(WheelEvent::new(Point::new(17.0, 17.0), Point::new(0.0, 4.0)));
    assert!(!path.dispatch(&wheel).unwrap());

    assert!(find_path_to_scroll_target_at_point(Point::new(45.0, 45.0), &root).is_none());
}
