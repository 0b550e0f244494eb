//! The table as a prompt model.
//!
//! Binds [`TableState`] and [`TableView`] to the prompt engine: arrows and
//! page keys navigate, Space toggles selection, `s` sorts the focused
//! column (`S` clears the sort), `a`/`A` select and deselect the filtered
//! view, and `/` enters filter-editing mode when filtering is enabled.
//! While editing the filter, printable keys extend the query, Backspace
//! shortens it, and `/` returns to navigation; Enter always submits
//! through the engine.

use crate::column::Column;
use crate::config::{Selectable, TableOptions};
use crate::error::TableError;
use crate::state::TableState;
use crate::view::TableView;
use core_events::{Action, Key, KeyEvent};
use core_prompt::kinds::{assemble, header};
use core_prompt::{PromptModel, PromptState, RenderContext};
use core_render::Frame;

pub struct TablePrompt<T> {
    state: TableState<T>,
    columns: Vec<Column<T>>,
    options: TableOptions<T>,
}

impl<T: Clone> TablePrompt<T> {
    pub fn new(
        rows: Vec<T>,
        columns: Vec<Column<T>>,
        options: TableOptions<T>,
    ) -> Result<Self, TableError> {
        let state = TableState::new(rows, &columns, &options)?;
        Ok(Self {
            state,
            columns,
            options,
        })
    }

    pub fn state(&self) -> &TableState<T> {
        &self.state
    }
}

fn filter_step<T>(
    state: TableState<T>,
    key: &KeyEvent,
    columns: &[Column<T>],
    options: &TableOptions<T>,
) -> TableState<T> {
    if key.sequence == "/" {
        return state.set_filtering(false);
    }
    match key.name {
        Some(Key::Backspace) => {
            let mut query = state.filter_query().to_string();
            query.pop();
            state.update_filter_query(query, columns, options)
        }
        _ => match key.printable() {
            Some(c) => {
                let mut query = state.filter_query().to_string();
                query.push(c);
                state.update_filter_query(query, columns, options)
            }
            None => state,
        },
    }
}

fn navigation_step<T>(
    state: TableState<T>,
    key: &KeyEvent,
    action: Option<Action>,
    columns: &[Column<T>],
    options: &TableOptions<T>,
) -> TableState<T> {
    match (action, key.name) {
        (Some(Action::Up), _) => state.navigate_up(),
        (Some(Action::Down), _) => state.navigate_down(),
        (Some(Action::Left), _) => state.navigate_left(columns.len()),
        (Some(Action::Right), _) => state.navigate_right(columns.len()),
        (Some(Action::Space), _) => state.toggle_selection(options.selectable),
        (_, Some(Key::PageUp)) => state.navigate_page_up(),
        (_, Some(Key::PageDown)) => state.navigate_page_down(),
        (_, Some(Key::Home)) => state.navigate_first(),
        (_, Some(Key::End)) => state.navigate_last(),
        _ => match key.sequence.as_str() {
            "/" if options.filterable => state.set_filtering(true),
            "s" => match columns.get(state.focused_column()) {
                Some(column) => {
                    let sort_key = column.key.clone();
                    state.toggle_sort(&sort_key, columns, options)
                }
                None => state,
            },
            "S" => state.clear_sort(columns, options),
            "a" if options.selectable == Selectable::Multiple => state.select_all(),
            "A" if options.selectable != Selectable::None => state.clear_selection(),
            _ => state,
        },
    }
}

impl<T: Clone> PromptModel for TablePrompt<T> {
    type Value = Vec<T>;

    fn render(&self, ctx: &RenderContext<'_>) -> Frame {
        match ctx.state {
            PromptState::Submit | PromptState::Cancel => Frame::from_lines(vec![header(ctx)]),
            _ => {
                let view = TableView::new(ctx.columns as usize);
                let table = view.render(&self.state, &self.columns, &self.options);
                assemble(ctx, table.lines().to_vec())
            }
        }
    }

    fn update(mut self, key: &KeyEvent, action: Option<Action>) -> Self {
        let state = self.state;
        self.state = if state.is_filtering() {
            filter_step(state, key, &self.columns, &self.options)
        } else {
            navigation_step(state, key, action, &self.columns, &self.options)
        };
        self
    }

    /// The selected rows, or the focused row when the table is not
    /// selectable.
    fn value(&self) -> Vec<T> {
        if self.options.selectable == Selectable::None {
            return self
                .state
                .row_at(self.state.focused_row())
                .into_iter()
                .cloned()
                .collect();
        }
        self.state.selected_rows().into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::CellValue;
    use core_events::KeyBindings;

    #[derive(Debug, Clone, PartialEq)]
    struct Fruit {
        name: &'static str,
        stock: i64,
    }

    fn rows() -> Vec<Fruit> {
        [("apple", 4), ("banana", 0), ("cherry", 12)]
            .iter()
            .map(|&(name, stock)| Fruit { name, stock })
            .collect()
    }

    fn columns() -> Vec<Column<Fruit>> {
        vec![
            Column::new("name", "Name", |f: &Fruit| {
                CellValue::Text(f.name.to_string())
            }),
            Column::new("stock", "Stock", |f: &Fruit| CellValue::Int(f.stock)),
        ]
    }

    fn feed<T: Clone>(model: TablePrompt<T>, key: KeyEvent) -> TablePrompt<T> {
        let action = KeyBindings::default().action_for(&key);
        model.update(&key, action)
    }

    #[test]
    fn zero_columns_fails_fast() {
        assert!(TablePrompt::new(rows(), Vec::<Column<Fruit>>::new(), TableOptions::default())
            .is_err());
    }

    #[test]
    fn focused_row_submitted_when_not_selectable() {
        let prompt = TablePrompt::new(rows(), columns(), TableOptions::default()).unwrap();
        let prompt = feed(prompt, KeyEvent::named(Key::Down));
        assert_eq!(prompt.value()[0].name, "banana");
    }

    #[test]
    fn space_toggles_selection_in_multiple_mode() {
        let options = TableOptions::default().selectable(Selectable::Multiple);
        let prompt = TablePrompt::new(rows(), columns(), options).unwrap();
        let prompt = feed(prompt, KeyEvent::char(' '));
        let prompt = feed(prompt, KeyEvent::named(Key::Down));
        let prompt = feed(prompt, KeyEvent::char(' '));
        let names: Vec<_> = prompt.value().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["apple", "banana"]);
    }

    #[test]
    fn slash_enters_filter_mode_and_types_query() {
        let prompt = TablePrompt::new(rows(), columns(), TableOptions::default()).unwrap();
        let prompt = feed(prompt, KeyEvent::char('/'));
        assert!(prompt.state().is_filtering());
        let prompt = feed(prompt, KeyEvent::char('b'));
        assert_eq!(prompt.state().filter_query(), "b");
        assert_eq!(prompt.state().view_len(), 1);
        let prompt = feed(prompt, KeyEvent::named(Key::Backspace));
        assert_eq!(prompt.state().view_len(), 3);
        let prompt = feed(prompt, KeyEvent::char('/'));
        assert!(!prompt.state().is_filtering());
    }

    #[test]
    fn sort_keys_drive_the_focused_column() {
        let prompt = TablePrompt::new(rows(), columns(), TableOptions::default()).unwrap();
        let prompt = feed(prompt, KeyEvent::named(Key::Right));
        let prompt = feed(prompt, KeyEvent::char('s'));
        assert_eq!(prompt.state().sort().map(|s| s.key.as_str()), Some("stock"));
        assert_eq!(prompt.state().row_at(0).map(|f| f.name), Some("banana"));
        let prompt = feed(prompt, KeyEvent::char('S'));
        assert!(prompt.state().sort().is_none());
    }

    #[test]
    fn render_is_table_under_the_prompt_header() {
        let prompt = TablePrompt::new(rows(), columns(), TableOptions::default()).unwrap();
        let ctx = RenderContext {
            state: PromptState::Active,
            message: "Pick fruit",
            error: None,
            columns: 60,
        };
        let text = prompt.render(&ctx).text();
        assert!(text.contains("Pick fruit"));
        assert!(text.contains("apple"));
        assert!(text.contains("┌"));
    }
}
