//! The virtualized table renderer.
//!
//! `render` touches exactly the rows in the state's visible range, so its
//! cost is proportional to the page size and independent of the dataset
//! size. Cell measurement, truncation and padding go through the text
//! metrics so wide clusters and embedded escapes never misalign a border.

use crate::column::{Align, Column, ColumnWidth};
use crate::config::{Selectable, SortDirection, TableOptions};
use crate::state::TableState;
use core_render::Frame;
use core_text::{display_width, truncate};

const REVERSE: &str = "\x1b[7m";
const REVERSE_OFF: &str = "\x1b[27m";

#[derive(Debug, Clone)]
pub struct TableView {
    /// Total display width available, borders included.
    pub max_width: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self { max_width: 80 }
    }
}

impl TableView {
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width: max_width.max(16),
        }
    }

    pub fn render<T>(
        &self,
        state: &TableState<T>,
        columns: &[Column<T>],
        options: &TableOptions<T>,
    ) -> Frame {
        let widths = self.resolve_widths(state, columns, options);
        let marker = marker_width(options);
        let mut lines = Vec::with_capacity(state.page_size() + 5);

        lines.push(border(&widths, marker, "┌", "┬", "┐"));
        lines.push(self.header_row(state, columns, &widths, marker));
        lines.push(border(&widths, marker, "├", "┼", "┤"));

        if state.view_len() == 0 {
            lines.push(placeholder_row(&widths, marker));
        } else {
            for index in state.visible_range() {
                lines.push(self.body_row(state, columns, options, &widths, index));
            }
        }

        lines.push(border(&widths, marker, "└", "┴", "┘"));
        lines.push(self.footer(state, options));
        Frame::from_lines(lines)
    }

    /// Resolve each column to a concrete cell width. Content columns look
    /// only at the visible rows, keeping resolution bounded like the rest
    /// of the render.
    fn resolve_widths<T>(
        &self,
        state: &TableState<T>,
        columns: &[Column<T>],
        options: &TableOptions<T>,
    ) -> Vec<usize> {
        let marker = marker_width(options);
        let mut widths: Vec<Option<usize>> = columns
            .iter()
            .map(|c| match c.width {
                // A sorted column is widened by the arrow so the marker
                // never crowds out the title.
                ColumnWidth::Fixed(w) => Some(w.max(1) + sort_marker_width(state, c)),
                ColumnWidth::Content => {
                    let mut w = display_width(&c.header) + sort_marker_width(state, c);
                    for index in state.visible_range() {
                        if let Some(row) = state.row_at(index) {
                            w = w.max(display_width(&c.text(row)));
                        }
                    }
                    Some(w.max(1))
                }
                ColumnWidth::Auto => None,
            })
            .collect();

        // Borders: one per column boundary plus the two edges; each cell
        // also carries one space of padding on each side.
        let chrome = columns.len() + 1 + 2 * columns.len() + marker;
        let fixed_total: usize = widths.iter().flatten().sum();
        let auto_count = widths.iter().filter(|w| w.is_none()).count();
        if auto_count > 0 {
            let remaining = self.max_width.saturating_sub(chrome + fixed_total);
            let share = (remaining / auto_count).max(1);
            let mut spare = remaining.saturating_sub(share * auto_count);
            for slot in widths.iter_mut().filter(|w| w.is_none()) {
                let extra = usize::from(spare > 0);
                spare = spare.saturating_sub(1);
                *slot = Some(share + extra);
            }
        }
        widths.into_iter().map(|w| w.unwrap_or(1)).collect()
    }

    fn header_row<T>(
        &self,
        state: &TableState<T>,
        columns: &[Column<T>],
        widths: &[usize],
        marker: usize,
    ) -> String {
        let mut cells = Vec::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            let arrow = match state.sort() {
                Some(sort) if sort.key == column.key => {
                    if sort.direction == SortDirection::Ascending {
                        " ↑"
                    } else {
                        " ↓"
                    }
                }
                _ => "",
            };
            cells.push(header_cell(&column.header, arrow, widths[i]));
        }
        assemble_row(&cells, &" ".repeat(marker))
    }

    fn body_row<T>(
        &self,
        state: &TableState<T>,
        columns: &[Column<T>],
        options: &TableOptions<T>,
        widths: &[usize],
        index: usize,
    ) -> String {
        let Some(row) = state.row_at(index) else {
            return placeholder_row(widths, marker_width(options));
        };
        let marker = match options.selectable {
            Selectable::None => "",
            _ if state.is_selected_at(index) => "◼ ",
            _ => "◻ ",
        };
        let cells: Vec<String> = columns
            .iter()
            .zip(widths)
            .map(|(column, &width)| pad(&column.text(row), width, column.align))
            .collect();
        let line = assemble_row(&cells, marker);
        if index == state.focused_row() {
            format!("{REVERSE}{line}{REVERSE_OFF}")
        } else {
            line
        }
    }

    fn footer<T>(&self, state: &TableState<T>, options: &TableOptions<T>) -> String {
        let mut parts = vec![format!("{} of {} rows", state.view_len(), state.total_len())];
        if options.selectable != Selectable::None {
            parts.push(format!("{} selected", state.selection_count()));
        }
        if state.is_filtering() {
            parts.push(format!("filter: {}▌", state.filter_query()));
        } else if !state.filter_query().is_empty() {
            parts.push(format!("filter: {}", state.filter_query()));
        }
        format!("  {}", parts.join("  ·  "))
    }
}

fn marker_width<T>(options: &TableOptions<T>) -> usize {
    if options.selectable == Selectable::None {
        0
    } else {
        2
    }
}

fn sort_marker_width<T>(state: &TableState<T>, column: &Column<T>) -> usize {
    match state.sort() {
        Some(sort) if sort.key == column.key => 2,
        _ => 0,
    }
}

/// Horizontal rule. The first column's run is widened by the selection
/// marker's cells so every row lines up.
fn border(widths: &[usize], marker: usize, left: &str, mid: &str, right: &str) -> String {
    let mut line = String::from(left);
    for (i, &w) in widths.iter().enumerate() {
        if i > 0 {
            line.push_str(mid);
        }
        let extra = if i == 0 { marker } else { 0 };
        line.push_str(&"─".repeat(w + 2 + extra));
    }
    line.push_str(right);
    line
}

/// Join padded cells with vertical borders. `marker` (selection state, or
/// blanks of the same width) leads the first cell.
fn assemble_row(cells: &[String], marker: &str) -> String {
    let mut line = String::from("│");
    for (i, cell) in cells.iter().enumerate() {
        if i == 0 {
            line.push_str(&format!(" {marker}{cell} │"));
        } else {
            line.push_str(&format!(" {cell} │"));
        }
    }
    line
}

/// Header cell that keeps the sort marker intact: when the cell is too
/// narrow for both, the title truncates and the arrow stays.
fn header_cell(title: &str, arrow: &str, width: usize) -> String {
    if arrow.is_empty() {
        return pad(title, width, Align::Left);
    }
    let arrow_width = display_width(arrow);
    if width <= arrow_width {
        return pad(arrow.trim_start(), width, Align::Left);
    }
    if display_width(title) + arrow_width <= width {
        return pad(&format!("{title}{arrow}"), width, Align::Left);
    }
    let head = pad(title, width - arrow_width, Align::Left);
    format!("{head}{arrow}")
}

fn placeholder_row(widths: &[usize], marker: usize) -> String {
    // Inner width across all columns: cells, padding, marker, inner
    // borders.
    let inner: usize =
        widths.iter().map(|w| w + 2).sum::<usize>() + widths.len() - 1 + marker;
    format!("│{}│", pad("no data", inner, Align::Center))
}

/// Truncate to `width` display cells and pad to exactly `width`.
fn pad(text: &str, width: usize, align: Align) -> String {
    let shown = truncate(text, width);
    let used = display_width(&shown);
    let gap = width.saturating_sub(used);
    match align {
        Align::Left => format!("{shown}{}", " ".repeat(gap)),
        Align::Right => format!("{}{shown}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{shown}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::CellValue;
    use crate::config::SortSpec;

    #[derive(Debug)]
    struct Item {
        name: String,
        count: i64,
    }

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item {
                name: format!("item-{i}"),
                count: i as i64,
            })
            .collect()
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("name", "Name", |r: &Item| CellValue::Text(r.name.clone()))
                .width(ColumnWidth::Content),
            Column::new("count", "Count", |r: &Item| CellValue::Int(r.count))
                .width(ColumnWidth::Fixed(6))
                .align(Align::Right),
        ]
    }

    #[test]
    fn line_count_bounded_by_page_size() {
        let options = TableOptions::default().page_size(5);
        let cols = columns();
        let state = TableState::new(items(10_000), &cols, &options).unwrap();
        let frame = TableView::new(60).render(&state, &cols, &options);
        // Borders (3) + header + 5 body rows + footer.
        assert_eq!(frame.height(), 10);
    }

    #[test]
    fn empty_view_renders_placeholder() {
        let options = TableOptions::default();
        let cols = columns();
        let state = TableState::new(items(0), &cols, &options).unwrap();
        let frame = TableView::new(60).render(&state, &cols, &options);
        assert!(frame.text().contains("no data"));
        assert!(frame.text().contains("0 of 0 rows"));
    }

    #[test]
    fn header_carries_sort_marker() {
        let options = TableOptions::default().initial_sort(SortSpec::ascending("count"));
        let cols = columns();
        let state = TableState::new(items(3), &cols, &options).unwrap();
        let frame = TableView::new(60).render(&state, &cols, &options);
        assert!(frame.line(1).is_some_and(|l| l.contains("Count ↑")));
    }

    #[test]
    fn sort_marker_survives_header_truncation() {
        let options = TableOptions::default().initial_sort(SortSpec::descending("name"));
        let cols = vec![Column::new("name", "Identifier", |r: &Item| {
            CellValue::Text(r.name.clone())
        })
        .width(ColumnWidth::Fixed(4))];
        let state = TableState::new(items(3), &cols, &options).unwrap();
        let frame = TableView::new(40).render(&state, &cols, &options);
        let header = frame.line(1).unwrap();
        assert!(header.contains('↓'));
        assert!(header.contains('…'));
        // Borders and the widened header cell still line up.
        assert_eq!(
            display_width(frame.line(0).unwrap()),
            display_width(header),
        );
    }

    #[test]
    fn focused_row_is_highlighted() {
        let options = TableOptions::default().page_size(3);
        let cols = columns();
        let state = TableState::new(items(3), &cols, &options)
            .unwrap()
            .navigate_down();
        let frame = TableView::new(60).render(&state, &cols, &options);
        let focused = frame.line(4).unwrap();
        assert!(focused.starts_with(REVERSE));
        assert!(focused.contains("item-1"));
    }

    #[test]
    fn selection_markers_rendered_when_selectable() {
        let options = TableOptions::default()
            .selectable(Selectable::Multiple)
            .page_size(3);
        let cols = columns();
        let state = TableState::new(items(3), &cols, &options)
            .unwrap()
            .toggle_selection(Selectable::Multiple);
        let frame = TableView::new(60).render(&state, &cols, &options);
        assert!(frame.text().contains("◼ "));
        assert!(frame.text().contains("◻ "));
        assert!(frame.text().contains("1 selected"));
    }

    #[test]
    fn only_visible_rows_appear() {
        let options = TableOptions::default().page_size(4);
        let cols = columns();
        let state = TableState::new(items(100), &cols, &options).unwrap();
        let text = TableView::new(60).render(&state, &cols, &options).text();
        assert!(text.contains("item-0"));
        assert!(text.contains("item-3"));
        assert!(!text.contains("item-4"));
        assert!(!text.contains("item-99"));
    }

    #[test]
    fn fixed_width_cells_truncate_with_ellipsis() {
        let options = TableOptions::default().page_size(2);
        let cols = vec![Column::new("name", "Name", |r: &Item| {
            CellValue::Text(r.name.clone())
        })
        .width(ColumnWidth::Fixed(6))];
        let rows = vec![Item {
            name: "a-very-long-name".to_string(),
            count: 0,
        }];
        let state = TableState::new(rows, &cols, &options).unwrap();
        let frame = TableView::new(40).render(&state, &cols, &options);
        assert!(frame.text().contains('…'));
    }

    #[test]
    fn rows_align_with_borders_despite_wide_clusters() {
        let options = TableOptions::default().page_size(2);
        let cols = vec![
            Column::new("name", "Name", |r: &Item| CellValue::Text(r.name.clone()))
                .width(ColumnWidth::Fixed(8)),
        ];
        let rows = vec![
            Item {
                name: "漢字テスト".to_string(),
                count: 0,
            },
            Item {
                name: "plain".to_string(),
                count: 1,
            },
        ];
        let state = TableState::new(rows, &cols, &options).unwrap();
        let frame = TableView::new(40).render(&state, &cols, &options);
        let top = display_width(frame.line(0).unwrap());
        let wide = display_width(frame.line(3).unwrap());
        let plain = display_width(frame.line(4).unwrap());
        assert_eq!(top, wide);
        assert_eq!(wide, plain);
    }
}
