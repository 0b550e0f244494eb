//! Property tests over arbitrary operation sequences.

use core_table::{CellValue, Column, Selectable, TableOptions, TableState};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Row {
    id: i64,
    label: String,
}

fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            id: i as i64,
            label: format!("row {}", i % 7),
        })
        .collect()
}

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::new("id", "ID", |r: &Row| CellValue::Int(r.id)),
        Column::new("label", "Label", |r: &Row| {
            CellValue::Text(r.label.clone())
        }),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
    Toggle,
    Sort(bool),
    Filter(String),
    ClearFilter,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Up),
        Just(Op::Down),
        Just(Op::PageUp),
        Just(Op::PageDown),
        Just(Op::First),
        Just(Op::Last),
        Just(Op::Toggle),
        any::<bool>().prop_map(Op::Sort),
        "[0-6 ]{0,3}".prop_map(Op::Filter),
        Just(Op::ClearFilter),
    ]
}

fn apply(
    state: TableState<Row>,
    op: &Op,
    cols: &[Column<Row>],
    options: &TableOptions<Row>,
) -> TableState<Row> {
    match op {
        Op::Up => state.navigate_up(),
        Op::Down => state.navigate_down(),
        Op::PageUp => state.navigate_page_up(),
        Op::PageDown => state.navigate_page_down(),
        Op::First => state.navigate_first(),
        Op::Last => state.navigate_last(),
        Op::Toggle => state.toggle_selection(Selectable::Multiple),
        Op::Sort(by_id) => {
            let key = if *by_id { "id" } else { "label" };
            state.toggle_sort(key, cols, options)
        }
        Op::Filter(q) => state.update_filter_query(q.clone(), cols, options),
        Op::ClearFilter => state.update_filter_query("", cols, options),
    }
}

proptest! {
    #[test]
    fn focus_and_window_stay_in_bounds(
        len in 0usize..40,
        page in 1usize..8,
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let cols = columns();
        let options = TableOptions::default()
            .selectable(Selectable::Multiple)
            .page_size(page);
        let mut state = TableState::new(rows(len), &cols, &options).unwrap();
        for op in &ops {
            state = apply(state, op, &cols, &options);
            let view_len = state.view_len();
            if view_len == 0 {
                prop_assert_eq!(state.focused_row(), 0);
                prop_assert_eq!(state.visible_range(), 0..0);
            } else {
                prop_assert!(state.focused_row() < view_len);
                let range = state.visible_range();
                prop_assert!(range.end <= view_len);
                prop_assert!(range.len() <= page);
                prop_assert!(range.contains(&state.focused_row()));
            }
        }
    }

    #[test]
    fn toggle_selection_is_self_inverse(
        len in 1usize..30,
        moves in 0usize..30,
    ) {
        let cols = columns();
        let options = TableOptions::default().selectable(Selectable::Multiple);
        let mut state = TableState::new(rows(len), &cols, &options).unwrap();
        for _ in 0..moves {
            state = state.navigate_down();
        }
        let before = state.selected_indices().clone();
        let state = state
            .toggle_selection(Selectable::Multiple)
            .toggle_selection(Selectable::Multiple);
        prop_assert_eq!(state.selected_indices(), &before);
    }

    #[test]
    fn select_all_count_matches_filtered_view(
        len in 0usize..40,
        digit in 0u32..7,
    ) {
        let cols = columns();
        let options = TableOptions::default().selectable(Selectable::Multiple);
        let query = format!("row {digit}");
        let state = TableState::new(rows(len), &cols, &options)
            .unwrap()
            .update_filter_query(query, &cols, &options)
            .select_all();
        prop_assert_eq!(state.selection_count(), state.view_len());
    }
}
