use super::{CrossAxisAlignment, MainAxisAlignment};
use crate::{Constraints, LayoutError, SelfLayout};

#[test]
fn start_packs_from_origin() {
    let sizes = vec![10.0, 20.0];
    let mut positions = vec![0.0; sizes.len()];
    MainAxisAlignment::Start.arrange(100.0, &sizes, &mut positions);
    assert_eq!(positions, vec![0.0, 10.0]);
}

#[test]
fn center_centres_the_packed_run() {
    let sizes = vec![10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    MainAxisAlignment::Center.arrange(100.0, &sizes, &mut positions);
    assert_eq!(positions, vec![40.0, 50.0]);
}

#[test]
fn end_packs_flush_with_far_edge() {
    let sizes = vec![10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    MainAxisAlignment::End.arrange(100.0, &sizes, &mut positions);
    assert_eq!(positions, vec![80.0, 90.0]);
}

#[test]
fn between_distributes_gaps_evenly() {
    let sizes = vec![10.0, 10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    MainAxisAlignment::Between.arrange(100.0, &sizes, &mut positions);
    assert_eq!(positions, vec![0.0, 45.0, 90.0]);
}

#[test]
fn between_with_single_child_sits_at_start() {
    let sizes = vec![10.0];
    let mut positions = vec![0.0; 1];
    MainAxisAlignment::Between.arrange(100.0, &sizes, &mut positions);
    assert_eq!(positions, vec![0.0]);
}

#[test]
fn between_does_not_produce_negative_gaps() {
    let sizes = vec![15.0, 15.0];
    let mut positions = vec![0.0; sizes.len()];
    MainAxisAlignment::Between.arrange(20.0, &sizes, &mut positions);
    assert_eq!(positions, vec![0.0, 15.0]);
}

#[test]
fn unbounded_run_packs_from_start() {
    let sizes = vec![5.0, 5.0];
    let mut positions = vec![0.0; sizes.len()];
    MainAxisAlignment::End.arrange(f32::INFINITY, &sizes, &mut positions);
    assert_eq!(positions, vec![0.0, 5.0]);
}

#[test]
fn cross_alignment_respects_available_space() {
    assert_eq!(CrossAxisAlignment::Start.align(50.0, 10.0), 0.0);
    assert_eq!(CrossAxisAlignment::Center.align(50.0, 10.0), 20.0);
    assert_eq!(CrossAxisAlignment::End.align(50.0, 10.0), 40.0);
    assert_eq!(CrossAxisAlignment::End.align(5.0, 10.0), 0.0);
}

#[test]
fn unrecognized_modes_are_rejected() {
    assert_eq!("grow".parse::<SelfLayout>(), Ok(SelfLayout::Grow));
    assert_eq!(
        "stretch".parse::<SelfLayout>(),
        Err(LayoutError::UnknownSelfLayout("stretch".into()))
    );
    assert_eq!("between".parse::<MainAxisAlignment>(), Ok(MainAxisAlignment::Between));
    assert!(matches!(
        "baseline".parse::<CrossAxisAlignment>(),
        Err(LayoutError::UnknownAlignment(_))
    ));
}

#[test]
fn content_space_exposes_negative_remainders() {
    let constraints = Constraints::shrink(trellis_ui_graphics::Size::new(10.0, 10.0));
    let content = constraints.content_space(trellis_ui_graphics::EdgeInsets::uniform(6.0));
    assert!(!content.is_valid());
}
