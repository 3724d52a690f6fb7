//! Property-based tests for the Tree Store
//!
//! Random sequences of structural edits must keep the heights mirror in
//! lockstep with the data tree, keep item ids unique, and leave nothing
//! behind when a row goes to the trash.

use std::collections::HashSet;

use gridcraft_core::{
    DragSource, DropTarget, ItemTemplate, ItemType, LayoutEditor, LayoutTree, sample_layout,
};
use proptest::prelude::*;

/// A structural edit addressed by selectors that are reduced modulo the
/// current number of rows or columns.
#[derive(Debug, Clone)]
enum Op {
    InsertRow(usize),
    RemoveRow(usize),
    MoveRow(usize, usize),
    InsertColumn(usize, usize),
    RemoveColumn(usize, usize),
    MoveColumn(usize, usize, usize),
    MoveColumnAcross(usize, usize, usize, usize),
    Resize(usize, usize, f64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let sel = || 0usize..8;
    prop_oneof![
        sel().prop_map(Op::InsertRow),
        sel().prop_map(Op::RemoveRow),
        (sel(), sel()).prop_map(|(r, i)| Op::MoveRow(r, i)),
        (sel(), sel()).prop_map(|(r, i)| Op::InsertColumn(r, i)),
        (sel(), sel()).prop_map(|(r, c)| Op::RemoveColumn(r, c)),
        (sel(), sel(), sel()).prop_map(|(r, c, i)| Op::MoveColumn(r, c, i)),
        (sel(), sel(), sel(), sel()).prop_map(|(r, c, t, i)| Op::MoveColumnAcross(r, c, t, i)),
        (sel(), sel(), 0.0..600.0f64).prop_map(|(r, c, h)| Op::Resize(r, c, h)),
    ]
}

fn row_at(tree: &LayoutTree, sel: usize) -> Option<String> {
    let count = tree.row_count();
    if count == 0 {
        return None;
    }
    tree.rows().get_index(sel % count).map(|(k, _)| k.clone())
}

fn column_at(tree: &LayoutTree, row: &str, sel: usize) -> Option<String> {
    let columns = tree.row(row)?;
    if columns.is_empty() {
        return None;
    }
    columns.get_index(sel % columns.len()).map(|(k, _)| k.clone())
}

fn apply(tree: &LayoutTree, op: &Op) -> LayoutTree {
    let result = match *op {
        Op::InsertRow(index) => tree.insert_row(tree.next_row_key(), index),
        Op::RemoveRow(r) => match row_at(tree, r) {
            Some(row) => tree.remove_row(&row),
            None => return tree.clone(),
        },
        Op::MoveRow(r, index) => match row_at(tree, r) {
            Some(row) => tree.move_row(&row, index),
            None => return tree.clone(),
        },
        Op::InsertColumn(r, index) => match row_at(tree, r) {
            Some(row) => {
                let key = tree.next_column_key(&row).unwrap();
                tree.insert_column(&row, key, index)
            }
            None => return tree.clone(),
        },
        Op::RemoveColumn(r, c) => {
            let Some(row) = row_at(tree, r) else {
                return tree.clone();
            };
            match column_at(tree, &row, c) {
                Some(column) => tree.remove_column(&row, &column).map(|(t, _)| t),
                None => return tree.clone(),
            }
        }
        Op::MoveColumn(r, c, index) => {
            let Some(row) = row_at(tree, r) else {
                return tree.clone();
            };
            match column_at(tree, &row, c) {
                Some(column) => tree.move_column(&row, &column, index),
                None => return tree.clone(),
            }
        }
        Op::MoveColumnAcross(r, c, t, index) => {
            let (Some(row), Some(target)) = (row_at(tree, r), row_at(tree, t)) else {
                return tree.clone();
            };
            match column_at(tree, &row, c) {
                Some(column) => tree
                    .move_column_across_row(&row, &column, &target, index)
                    .map(|(t, _)| t),
                None => return tree.clone(),
            }
        }
        Op::Resize(r, c, height) => {
            let Some(row) = row_at(tree, r) else {
                return tree.clone();
            };
            match column_at(tree, &row, c) {
                Some(column) => tree.set_column_height(&row, &column, height),
                None => return tree.clone(),
            }
        }
    };
    result.unwrap()
}

/// Key sets of both trees, compared level by level.
fn assert_mirrored(tree: &LayoutTree) -> Result<(), TestCaseError> {
    prop_assert!(tree.check_mirror().is_ok(), "{:?}", tree.check_mirror());
    let data_rows: Vec<_> = tree.rows().keys().collect();
    let height_rows: Vec<_> = tree.heights().keys().collect();
    prop_assert_eq!(&data_rows, &height_rows);
    for (row, columns) in tree.rows() {
        let data: HashSet<_> = columns.keys().collect();
        let heights: HashSet<_> = tree.heights().get(row.as_str()).unwrap().keys().collect();
        prop_assert_eq!(data, heights);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After every row or column edit the heights tree mirrors the data tree.
    #[test]
    fn prop_heights_mirror_data_after_every_edit(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut tree = sample_layout();
        for op in &ops {
            let next = apply(&tree, op);
            assert_mirrored(&next)?;
            tree = next;
        }
    }

    /// Heights never drop below the floor, whatever the edit sequence.
    #[test]
    fn prop_heights_respect_floor(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let tree = ops.iter().fold(sample_layout(), |t, op| apply(&t, op));
        for row in tree.heights().values() {
            for height in row.values() {
                prop_assert!(*height >= tree.min_column_height());
            }
        }
    }

    /// Items created from templates get ids never seen before, even after
    /// other created items were trashed.
    #[test]
    fn prop_created_item_ids_are_unique(
        drops in prop::collection::vec((0usize..3, 0usize..8, 0usize..8, any::<bool>()), 1..30),
    ) {
        let templates = [
            ItemTemplate::new(ItemType::Input, "Input Field"),
            ItemTemplate::new(ItemType::Text, "Text"),
            ItemTemplate::new(ItemType::Image, "Image"),
        ];
        let mut editor = LayoutEditor::new(sample_layout());
        let mut issued: HashSet<String> = editor
            .tree()
            .rows()
            .values()
            .flat_map(|c| c.values())
            .flat_map(|items| items.iter().map(|i| i.id.clone()))
            .collect();

        for (kind, r, c, trash_after) in drops {
            let Some(row) = row_at(editor.tree(), r) else { continue };
            let Some(column) = column_at(editor.tree(), &row, c) else { continue };
            editor.begin_drag(DragSource::NewItem { template: templates[kind].clone() });
            let outcome = editor.drop_on(&DropTarget::Column { row: row.clone(), column: column.clone() });
            let Some(gridcraft_core::DropEffect::ItemInserted { item, .. }) = outcome.effect().cloned() else {
                return Err(TestCaseError::fail("template drop was not applied"));
            };
            prop_assert!(issued.insert(item.clone()), "id {} issued twice", item);

            if trash_after {
                editor.begin_drag(DragSource::Item { row, column, item });
                prop_assert!(editor.drop_on(&DropTarget::Trash).is_applied());
            }
        }

        let mut seen = HashSet::new();
        for columns in editor.tree().rows().values() {
            for items in columns.values() {
                for item in items.iter() {
                    prop_assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
                }
            }
        }
    }

    /// Trashing a row removes it and everything under it from both trees.
    #[test]
    fn prop_trashed_row_leaves_no_residue(
        ops in prop::collection::vec(op_strategy(), 0..20),
        pick in 0usize..8,
    ) {
        let tree = ops.iter().fold(sample_layout(), |t, op| apply(&t, op));
        let Some(row) = row_at(&tree, pick) else { return Ok(()) };
        let doomed: Vec<String> = tree
            .row(&row)
            .unwrap()
            .values()
            .flat_map(|items| items.iter().map(|i| i.id.clone()))
            .collect();

        let mut editor = LayoutEditor::new(tree.clone());
        editor.begin_drag(DragSource::Row { row: row.clone() });
        prop_assert!(editor.drop_on(&DropTarget::Trash).is_applied());

        let after = editor.tree();
        prop_assert!(after.row(&row).is_none());
        prop_assert!(after.heights().get(row.as_str()).is_none());
        prop_assert_eq!(after.row_count(), tree.row_count() - 1);
        for id in &doomed {
            prop_assert!(!after.contains_item(id));
        }
        assert_mirrored(after)?;
    }
}
