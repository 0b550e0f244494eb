//! Table configuration supplied at construction.

use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selectable {
    #[default]
    None,
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

type CustomFilter<T> = Rc<dyn Fn(&T, &str) -> bool>;

/// Everything a table's behavior is parameterized on. No global defaults;
/// callers hand a value of this to [`crate::TableState::new`].
#[derive(Clone)]
pub struct TableOptions<T> {
    pub selectable: Selectable,
    pub sortable: bool,
    pub filterable: bool,
    pub page_size: usize,
    pub initial_sort: Option<SortSpec>,
    /// Original-dataset indices selected from the start.
    pub initial_selection: Vec<usize>,
    /// Restrict the default filter matcher to these column keys.
    pub filter_columns: Option<Vec<String>>,
    /// Fully replaces the default matcher when present.
    pub custom_filter: Option<CustomFilter<T>>,
}

impl<T> Default for TableOptions<T> {
    fn default() -> Self {
        Self {
            selectable: Selectable::None,
            sortable: true,
            filterable: true,
            page_size: 10,
            initial_sort: None,
            initial_selection: Vec::new(),
            filter_columns: None,
            custom_filter: None,
        }
    }
}

impl<T> TableOptions<T> {
    pub fn selectable(mut self, mode: Selectable) -> Self {
        self.selectable = mode;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn initial_sort(mut self, sort: SortSpec) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    pub fn initial_selection(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.initial_selection = indices.into_iter().collect();
        self
    }

    pub fn filter_columns(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.filter_columns = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn custom_filter(mut self, f: impl Fn(&T, &str) -> bool + 'static) -> Self {
        self.custom_filter = Some(Rc::new(f));
        self
    }
}
