//! The pure table transition engine.
//!
//! A [`TableState`] is a value: every transition consumes the state and
//! returns the successor, never mutating shared data. The original dataset
//! sits behind an `Arc` and is identical across all transitions; the
//! current view is a vector of indices into it, recomputed as
//! `sort(filter(original))` whenever the query or sort changes. Selection
//! is a set of original indices, so it survives any filter or sort and is
//! only changed by explicit selection operations.

use crate::column::{compare_null_last, Column};
use crate::config::{Selectable, SortDirection, SortSpec, TableOptions};
use crate::error::TableError;
use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TableState<T> {
    rows: Arc<Vec<T>>,
    /// Original-dataset indices making up the current filtered+sorted view.
    view: Vec<usize>,
    /// Selected original-dataset indices.
    selected: BTreeSet<usize>,
    /// Index into `view`; 0 when the view is empty.
    focused_row: usize,
    focused_column: usize,
    sort: Option<SortSpec>,
    filter_query: String,
    /// Whether the filter query is currently being edited.
    is_filtering: bool,
    visible_start: usize,
    page_size: usize,
}

impl<T> TableState<T> {
    pub fn new(
        rows: Vec<T>,
        columns: &[Column<T>],
        options: &TableOptions<T>,
    ) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        if let Some(sort) = &options.initial_sort {
            if !columns.iter().any(|c| c.key == sort.key) {
                return Err(TableError::UnknownSortKey(sort.key.clone()));
            }
        }
        let len = rows.len();
        for &index in &options.initial_selection {
            if index >= len {
                return Err(TableError::SelectionOutOfRange { index, len });
            }
        }
        let mut state = Self {
            rows: Arc::new(rows),
            view: Vec::new(),
            selected: options.initial_selection.iter().copied().collect(),
            focused_row: 0,
            focused_column: 0,
            sort: options.initial_sort.clone(),
            filter_query: String::new(),
            is_filtering: false,
            visible_start: 0,
            page_size: options.page_size.max(1),
        };
        state.recompute(columns, options);
        Ok(state)
    }

    pub fn rows(&self) -> &Arc<Vec<T>> {
        &self.rows
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn total_len(&self) -> usize {
        self.rows.len()
    }

    pub fn focused_row(&self) -> usize {
        self.focused_row
    }

    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    pub fn is_filtering(&self) -> bool {
        self.is_filtering
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The `[start, end)` slice of the view materialized for rendering.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.visible_start + self.page_size).min(self.view.len());
        self.visible_start..end
    }

    /// Row behind view position `index`, if in range.
    pub fn row_at(&self, index: usize) -> Option<&T> {
        self.view.get(index).map(|&i| &self.rows[i])
    }

    /// The original-dataset index behind view position `index`.
    pub fn original_index(&self, index: usize) -> Option<usize> {
        self.view.get(index).copied()
    }

    pub fn is_selected_at(&self, index: usize) -> bool {
        self.original_index(index)
            .is_some_and(|i| self.selected.contains(&i))
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected rows in original-dataset order.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.selected.iter().map(|&i| &self.rows[i]).collect()
    }

    pub fn selected_indices(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    // Navigation. All movement clamps; the viewport slides just far enough
    // to keep the focused row inside it.

    pub fn navigate_up(self) -> Self {
        let target = self.focused_row.saturating_sub(1);
        self.focus_to(target)
    }

    pub fn navigate_down(self) -> Self {
        let target = self.focused_row + 1;
        self.focus_to(target)
    }

    pub fn navigate_page_up(self) -> Self {
        let target = self.focused_row.saturating_sub(self.page_size);
        self.focus_to(target)
    }

    pub fn navigate_page_down(self) -> Self {
        let target = self.focused_row + self.page_size;
        self.focus_to(target)
    }

    pub fn navigate_first(self) -> Self {
        self.focus_to(0)
    }

    pub fn navigate_last(self) -> Self {
        let last = self.view.len().saturating_sub(1);
        self.focus_to(last)
    }

    pub fn navigate_left(mut self, column_count: usize) -> Self {
        self.focused_column = self.focused_column.saturating_sub(1).min(column_count.saturating_sub(1));
        self
    }

    pub fn navigate_right(mut self, column_count: usize) -> Self {
        self.focused_column = (self.focused_column + 1).min(column_count.saturating_sub(1));
        self
    }

    fn focus_to(mut self, target: usize) -> Self {
        if self.view.is_empty() {
            self.focused_row = 0;
            self.visible_start = 0;
            return self;
        }
        self.focused_row = target.min(self.view.len() - 1);
        self.slide_viewport();
        self
    }

    fn slide_viewport(&mut self) {
        if self.focused_row < self.visible_start {
            self.visible_start = self.focused_row;
        } else if self.focused_row >= self.visible_start + self.page_size {
            self.visible_start = self.focused_row + 1 - self.page_size;
        }
        // Keep the window inside the view even after it shrank.
        let max_start = self.view.len().saturating_sub(self.page_size);
        self.visible_start = self.visible_start.min(max_start);
    }

    // Selection. Membership is by original index, so nothing here is
    // disturbed by later filtering or sorting.

    pub fn toggle_selection(mut self, mode: Selectable) -> Self {
        let Some(original) = self.original_index(self.focused_row) else {
            return self;
        };
        match mode {
            Selectable::None => {}
            Selectable::Single => {
                let was_sole = self.selected.len() == 1 && self.selected.contains(&original);
                self.selected.clear();
                if !was_sole {
                    self.selected.insert(original);
                }
            }
            Selectable::Multiple => {
                if !self.selected.remove(&original) {
                    self.selected.insert(original);
                }
            }
        }
        self
    }

    /// Select every row of the current (possibly filtered) view.
    pub fn select_all(mut self) -> Self {
        self.selected.extend(self.view.iter().copied());
        self
    }

    /// Deselect every row of the current view; selections on rows hidden
    /// by the active filter are kept.
    pub fn clear_selection(mut self) -> Self {
        for index in &self.view {
            self.selected.remove(index);
        }
        self
    }

    // Sorting and filtering.

    /// Two-state cycle: first activation on a column sorts ascending, a
    /// second on the same column flips to descending, a different column
    /// restarts at ascending. Unsorted is only reachable via
    /// [`TableState::clear_sort`].
    pub fn toggle_sort(
        mut self,
        key: &str,
        columns: &[Column<T>],
        options: &TableOptions<T>,
    ) -> Self {
        if !options.sortable {
            return self;
        }
        let Some(column) = columns.iter().find(|c| c.key == key) else {
            return self;
        };
        if !column.sortable {
            return self;
        }
        self.sort = Some(match &self.sort {
            Some(sort) if sort.key == key && sort.direction == SortDirection::Ascending => {
                SortSpec::descending(key)
            }
            _ => SortSpec::ascending(key),
        });
        tracing::debug!(target: "table.state", key, "sort toggled");
        self.recompute(columns, options);
        self
    }

    pub fn clear_sort(mut self, columns: &[Column<T>], options: &TableOptions<T>) -> Self {
        self.sort = None;
        self.recompute(columns, options);
        self
    }

    pub fn update_filter_query(
        mut self,
        query: impl Into<String>,
        columns: &[Column<T>],
        options: &TableOptions<T>,
    ) -> Self {
        if !options.filterable {
            return self;
        }
        self.filter_query = query.into();
        tracing::debug!(
            target: "table.state",
            len = self.filter_query.len(),
            "filter query updated"
        );
        self.recompute(columns, options);
        self
    }

    pub fn set_filtering(mut self, filtering: bool) -> Self {
        self.is_filtering = filtering;
        self
    }

    /// Rebuild the view as `sort(filter(original))`. Filter always runs
    /// first; the sort is stable, so equal keys keep original relative
    /// order.
    fn recompute(&mut self, columns: &[Column<T>], options: &TableOptions<T>) {
        let focused_original = self.original_index(self.focused_row);

        let mut view: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.matches(&self.rows[i], columns, options))
            .collect();

        if let Some(sort) = &self.sort {
            if let Some(column) = columns.iter().find(|c| c.key == sort.key) {
                let descending = sort.direction == SortDirection::Descending;
                view.sort_by(|&a, &b| {
                    compare_null_last(
                        &column.value(&self.rows[a]),
                        &column.value(&self.rows[b]),
                        descending,
                    )
                });
            }
        }

        self.view = view;
        // Follow the previously focused row to its new view position when
        // it survived the transform; otherwise clamp.
        self.focused_row = focused_original
            .and_then(|orig| self.view.iter().position(|&i| i == orig))
            .unwrap_or_else(|| {
                self.focused_row.min(self.view.len().saturating_sub(1))
            });
        if self.view.is_empty() {
            self.focused_row = 0;
            self.visible_start = 0;
        } else {
            self.slide_viewport();
        }
    }

    fn matches(&self, row: &T, columns: &[Column<T>], options: &TableOptions<T>) -> bool {
        if self.filter_query.is_empty() {
            return true;
        }
        if let Some(custom) = &options.custom_filter {
            return custom(row, &self.filter_query);
        }
        let needle = self.filter_query.to_lowercase();
        columns
            .iter()
            .filter(|c| match &options.filter_columns {
                Some(keys) => keys.contains(&c.key),
                None => true,
            })
            .any(|c| c.text(row).to_lowercase().contains(&needle))
    }
}
