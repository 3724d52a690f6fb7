//! Property-based tests for hover placement
//!
//! The edge of a hover is decided by the midpoint of the hovered box along
//! the level's axis, and the insertion line always sits on a box edge.

use gridcraft_core::{
    DragSession, DragSource, DropPosition, HoverCandidate, NestingLevel, Point, Rect,
    calculate_drop_position, compute_indicator, indicator_line,
};
use proptest::prelude::*;

fn level_strategy() -> impl Strategy<Value = NestingLevel> {
    prop_oneof![
        Just(NestingLevel::Row),
        Just(NestingLevel::Column),
        Just(NestingLevel::Item),
    ]
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500.0..500.0f64, -500.0..500.0f64, 10.0..800.0f64, 10.0..800.0f64)
        .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
}

fn source_for(level: NestingLevel) -> DragSource {
    match level {
        NestingLevel::Row => DragSource::Row {
            row: "dragged".to_string(),
        },
        NestingLevel::Column => DragSource::Column {
            row: "row1".to_string(),
            column: "dragged".to_string(),
        },
        NestingLevel::Item => DragSource::Item {
            row: "row1".to_string(),
            column: "column1".to_string(),
            item: "dragged".to_string(),
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Before the midpoint is `Before`, on or past it is `After`.
    #[test]
    fn prop_edge_follows_midpoint(
        bounds in rect_strategy(),
        level in level_strategy(),
        along in 0.0..1.0f64,
        across in 0.0..1.0f64,
    ) {
        let (pointer, ratio) = match level {
            NestingLevel::Column => (
                Point::new(bounds.x + along * bounds.width, bounds.y + across * bounds.height),
                along,
            ),
            NestingLevel::Row | NestingLevel::Item => (
                Point::new(bounds.x + across * bounds.width, bounds.y + along * bounds.height),
                along,
            ),
        };
        let position = calculate_drop_position(pointer, bounds, level);
        // stay clear of the midpoint itself, where rounding decides
        prop_assume!((ratio - 0.5).abs() > 1e-9);
        let expected = if ratio < 0.5 { DropPosition::Before } else { DropPosition::After };
        prop_assert_eq!(position, expected);
    }

    /// The insertion line lies on the box edge matching the edge.
    #[test]
    fn prop_indicator_line_on_box_edge(bounds in rect_strategy(), level in level_strategy()) {
        let before = indicator_line(bounds, DropPosition::Before, level);
        let after = indicator_line(bounds, DropPosition::After, level);
        let (start, extent) = match level {
            NestingLevel::Column => (bounds.x, bounds.width),
            NestingLevel::Row | NestingLevel::Item => (bounds.y, bounds.height),
        };
        prop_assert!((before - start).abs() < 1e-9);
        prop_assert!((after - (start + extent)).abs() < 1e-9);
    }

    /// An indicator arms only for a candidate at the dragged entity's level.
    #[test]
    fn prop_indicator_arms_only_at_matching_level(
        dragged in level_strategy(),
        hovered in level_strategy(),
        bounds in rect_strategy(),
    ) {
        let mut session = DragSession::new();
        session.start(source_for(dragged));
        let candidate = HoverCandidate {
            level: hovered,
            target: "other".to_string(),
            parent: Some("row1".to_string()),
            bounds,
        };
        let pointer = Point::new(bounds.x + 1.0, bounds.y + 1.0);
        let indicator = compute_indicator(&session, &candidate, pointer);
        prop_assert_eq!(indicator.is_some(), dragged == hovered);
    }

    /// Hovering the dragged entity itself never arms an indicator.
    #[test]
    fn prop_no_indicator_over_drag_source(level in level_strategy(), bounds in rect_strategy()) {
        let mut session = DragSession::new();
        session.start(source_for(level));
        let parent = match level {
            NestingLevel::Row => None,
            NestingLevel::Column => Some("row1".to_string()),
            NestingLevel::Item => Some("column1".to_string()),
        };
        let candidate = HoverCandidate {
            level,
            target: "dragged".to_string(),
            parent,
            bounds,
        };
        let pointer = Point::new(bounds.x, bounds.y);
        prop_assert!(compute_indicator(&session, &candidate, pointer).is_none());
    }
}
