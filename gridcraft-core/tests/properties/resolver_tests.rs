//! Property-based tests for drop resolution
//!
//! The shared index rule is checked against a model of "place the source
//! at the hovered edge", and dropping an entity back into its own slot is
//! checked to be a no-op at every nesting level.

use gridcraft_core::{
    DragSource, DropOutcome, DropPosition, DropTarget, HoverCandidate, Item, ItemType,
    LayoutEditor, LayoutTree, NestingLevel, NoOpReason, Point, Rect, resolve_insert_index,
};
use proptest::prelude::*;

fn position_strategy() -> impl Strategy<Value = DropPosition> {
    prop_oneof![Just(DropPosition::Before), Just(DropPosition::After)]
}

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("k{i}")).collect()
}

/// Moves `source` next to `anchor` by editing the pre-removal sequence.
fn model_move(seq: &[String], source: usize, anchor: usize, position: DropPosition) -> Vec<String> {
    let slot = match position {
        DropPosition::Before => anchor,
        DropPosition::After => anchor + 1,
    };
    let mut out: Vec<Option<&String>> = seq.iter().map(Some).collect();
    out.insert(slot, None);
    let from = if slot <= source { source + 1 } else { source };
    out.remove(from);
    out.into_iter()
        .map(|k| k.unwrap_or(&seq[source]).clone())
        .collect()
}

/// A single row of `columns` columns, the first holding `items` items.
fn grid(columns: usize, items: usize) -> LayoutTree {
    let mut tree = LayoutTree::new().insert_row("row1", 0).unwrap();
    for c in 0..columns {
        tree = tree.insert_column("row1", format!("column{}", c + 1), c).unwrap();
    }
    for i in 0..items {
        let item = Item::new(format!("item{i}"), ItemType::Text, "");
        tree = tree.insert_item("row1", "column1", item, i).unwrap();
    }
    tree
}

fn stacked_rows(n: usize) -> LayoutTree {
    (0..n).fold(LayoutTree::new(), |tree, i| {
        tree.insert_row_with_column(format!("row{}", i + 1), "column1", i)
            .unwrap()
    })
}

/// Pointer inside a 100x100 box on the requested side of the midpoint.
fn pointer_for(level: NestingLevel, position: DropPosition) -> Point {
    let offset = match position {
        DropPosition::Before => 25.0,
        DropPosition::After => 75.0,
    };
    match level {
        NestingLevel::Column => Point::new(offset, 50.0),
        NestingLevel::Row | NestingLevel::Item => Point::new(50.0, offset),
    }
}

fn candidate(level: NestingLevel, target: &str, parent: Option<&str>) -> HoverCandidate {
    HoverCandidate {
        level,
        target: target.to_string(),
        parent: parent.map(str::to_string),
        bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
    }
}

/// Neighbouring slots that put the entity at `index` back where it is.
fn own_slots(index: usize, len: usize) -> Vec<(usize, DropPosition)> {
    let mut slots = Vec::new();
    if index > 0 {
        slots.push((index - 1, DropPosition::After));
    }
    if index + 1 < len {
        slots.push((index + 1, DropPosition::Before));
    }
    slots
}

fn assert_self_drop(
    editor: &mut LayoutEditor,
    before: &LayoutTree,
    target: &DropTarget,
) -> Result<(), TestCaseError> {
    let outcome = editor.drop_on(target);
    prop_assert_eq!(outcome, DropOutcome::NoOp(NoOpReason::SelfDrop));
    prop_assert_eq!(editor.tree(), before);
    prop_assert!(!editor.session().is_active());
    prop_assert!(editor.hover().is_empty());
    prop_assert_eq!(editor.version(), 0);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applying the resolved index with remove-then-insert gives the same
    /// order as placing the source at the hovered edge.
    #[test]
    fn prop_resolved_index_matches_model(
        n in 1usize..10,
        source in any::<prop::sample::Index>(),
        anchor in any::<prop::sample::Index>(),
        position in position_strategy(),
    ) {
        let seq = keys(n);
        let (s, a) = (source.index(n), anchor.index(n));
        let expected = model_move(&seq, s, a, position);

        let resolved = resolve_insert_index(
            seq.iter().map(String::as_str),
            Some(seq[s].as_str()),
            Some((seq[a].as_str(), position)),
        );
        match resolved {
            None => prop_assert_eq!(&expected, &seq),
            Some(index) => {
                let mut actual = seq.clone();
                let moved = actual.remove(s);
                actual.insert(index, moved);
                prop_assert_eq!(&actual, &expected);
                prop_assert_ne!(&actual, &seq);
            }
        }
    }

    /// Into a foreign sequence the index is the hovered slot, or the end.
    #[test]
    fn prop_foreign_insert_index(
        n in 0usize..10,
        anchor in any::<prop::sample::Index>(),
        position in position_strategy(),
        active in any::<bool>(),
    ) {
        let seq = keys(n);
        let anchor_key = if n > 0 { seq[anchor.index(n)].clone() } else { "none".to_string() };
        let resolved = resolve_insert_index(
            seq.iter().map(String::as_str),
            None,
            active.then_some((anchor_key.as_str(), position)),
        );
        let expected = if active && n > 0 {
            let a = anchor.index(n);
            if position == DropPosition::After { a + 1 } else { a }
        } else {
            n
        };
        prop_assert_eq!(resolved, Some(expected));
    }

    /// Dropping a row next to itself changes nothing and ends the gesture.
    #[test]
    fn prop_row_self_drop_is_idempotent(n in 1usize..6, pick in any::<prop::sample::Index>()) {
        let tree = stacked_rows(n);
        let i = pick.index(n);
        let source = format!("row{}", i + 1);

        let mut editor = LayoutEditor::new(tree.clone());
        editor.begin_drag(DragSource::Row { row: source.clone() });
        assert_self_drop(&mut editor, &tree, &DropTarget::Row { row: source.clone() })?;

        for (neighbour, position) in own_slots(i, n) {
            let key = format!("row{}", neighbour + 1);
            let mut editor = LayoutEditor::new(tree.clone());
            editor.begin_drag(DragSource::Row { row: source.clone() });
            prop_assert!(editor.drag_over(
                &candidate(NestingLevel::Row, &key, None),
                pointer_for(NestingLevel::Row, position),
            ));
            assert_self_drop(&mut editor, &tree, &DropTarget::Row { row: key })?;
        }
    }

    /// Dropping a column next to itself changes nothing.
    #[test]
    fn prop_column_self_drop_is_idempotent(n in 1usize..6, pick in any::<prop::sample::Index>()) {
        let tree = grid(n, 0);
        let i = pick.index(n);
        let source = format!("column{}", i + 1);
        let drag = DragSource::Column { row: "row1".to_string(), column: source.clone() };

        let mut editor = LayoutEditor::new(tree.clone());
        editor.begin_drag(drag.clone());
        let onto_self = DropTarget::Column { row: "row1".to_string(), column: source.clone() };
        assert_self_drop(&mut editor, &tree, &onto_self)?;

        for (neighbour, position) in own_slots(i, n) {
            let key = format!("column{}", neighbour + 1);
            let mut editor = LayoutEditor::new(tree.clone());
            editor.begin_drag(drag.clone());
            prop_assert!(editor.drag_over(
                &candidate(NestingLevel::Column, &key, Some("row1")),
                pointer_for(NestingLevel::Column, position),
            ));
            let target = DropTarget::Column { row: "row1".to_string(), column: key };
            assert_self_drop(&mut editor, &tree, &target)?;
        }
    }

    /// Dropping an item next to itself changes nothing.
    #[test]
    fn prop_item_self_drop_is_idempotent(n in 1usize..6, pick in any::<prop::sample::Index>()) {
        let tree = grid(1, n);
        let i = pick.index(n);
        let drag = DragSource::Item {
            row: "row1".to_string(),
            column: "column1".to_string(),
            item: format!("item{i}"),
        };
        let target = DropTarget::Column { row: "row1".to_string(), column: "column1".to_string() };

        for (neighbour, position) in own_slots(i, n) {
            let key = format!("item{neighbour}");
            let mut editor = LayoutEditor::new(tree.clone());
            editor.begin_drag(drag.clone());
            prop_assert!(editor.drag_over(
                &candidate(NestingLevel::Item, &key, Some("column1")),
                pointer_for(NestingLevel::Item, position),
            ));
            assert_self_drop(&mut editor, &tree, &target)?;
        }

        if i + 1 == n {
            // the last item appended to its own column stays put
            let mut editor = LayoutEditor::new(tree.clone());
            editor.begin_drag(drag);
            assert_self_drop(&mut editor, &tree, &target)?;
        }
    }
}
