use std::collections::HashSet;

use crate::element::Element;
use crate::event::{Event, MouseButton};
use crate::spinner::spinner_frame;
use crate::text::display_width;
use crate::types::{Border, Edges, Size, Style, TextWrap, Theme};

/// One row's backing data. Identity must be stable and unique; it is the
/// only key used for selection tracking.
pub trait TableRow {
    fn id(&self) -> &str;
    /// Named-field access for `Accessor::Field` columns. A missing field
    /// renders empty and sorts as the empty string.
    fn field(&self, key: &str) -> Option<String>;
}

/// How a column extracts its cell value.
pub enum Accessor<T> {
    /// A named field of the row. Only these participate in sorting.
    Field(String),
    /// A derivation over the whole row. Renders, never sorts.
    Derived(Box<dyn Fn(&T) -> String>),
}

impl<T> std::fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(key) => write!(f, "Field({key:?})"),
            Self::Derived(_) => write!(f, "Derived(...)"),
        }
    }
}

#[derive(Debug)]
pub struct Column<T> {
    header: String,
    accessor: Accessor<T>,
    sortable: bool,
}

impl<T: TableRow> Column<T> {
    /// Column backed by a named row field.
    pub fn field(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: Accessor::Field(key.into()),
            sortable: false,
        }
    }

    /// Column computed from the whole row.
    pub fn derived(header: impl Into<String>, derive: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            header: header.into(),
            accessor: Accessor::Derived(Box::new(derive)),
            sortable: false,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn value(&self, row: &T) -> String {
        match &self.accessor {
            Accessor::Field(key) => row.field(key).unwrap_or_default(),
            Accessor::Derived(derive) => derive(row),
        }
    }

    fn sort_key(&self) -> Option<&str> {
        match &self.accessor {
            Accessor::Field(key) if self.sortable => Some(key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// At most one column is sorted at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

/// Notification emitted towards the host. Selection changes always carry
/// the materialized subset of records, never bare identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<T> {
    SelectionChanged(Vec<T>),
}

/// Renders records as rows and columns, owning sort order and row
/// selection. Sorting is a pure projection of the input list; clearing
/// the sort state recovers the original order.
#[derive(Debug)]
pub struct Table<T> {
    id: String,
    columns: Vec<Column<T>>,
    selectable: bool,
    loading: bool,
    sort: SortState,
    selected: HashSet<String>,
}

impl<T: TableRow> Table<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            columns: Vec::new(),
            selectable: false,
            loading: false,
            sort: SortState::default(),
            selected: HashSet::new(),
        }
    }

    pub fn column(mut self, column: Column<T>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn clear_sort(&mut self) {
        self.sort = SortState::default();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    /// Toggle sorting on the column with the given field key. Same key
    /// flips direction, a different key resets to ascending. Columns that
    /// are not sortable field columns silently no-op.
    pub fn toggle_sort(&mut self, key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.sort_key() == Some(key));
        if !sortable {
            log::debug!("[table {}] ignoring sort on column {key:?}", self.id);
            return;
        }

        if self.sort.key.as_deref() == Some(key) {
            self.sort.direction = self.sort.direction.flipped();
        } else {
            self.sort = SortState {
                key: Some(key.to_string()),
                direction: SortDirection::Ascending,
            };
        }
    }

    fn toggle_sort_index(&mut self, index: usize) {
        let Some(key) = self.columns.get(index).and_then(|c| c.sort_key()) else {
            log::debug!("[table {}] ignoring sort on column index {index}", self.id);
            return;
        };
        let key = key.to_string();
        self.toggle_sort(&key);
    }

    /// Derive the displayed row order. Stable: equal values keep their
    /// relative input order. The input is never mutated.
    pub fn sorted<'a>(&self, data: &'a [T]) -> Vec<&'a T> {
        let mut rows: Vec<&T> = data.iter().collect();
        if let Some(key) = &self.sort.key {
            rows.sort_by(|a, b| {
                let av = a.field(key).unwrap_or_default();
                let bv = b.field(key).unwrap_or_default();
                match self.sort.direction {
                    SortDirection::Ascending => av.cmp(&bv),
                    SortDirection::Descending => bv.cmp(&av),
                }
            });
        }
        rows
    }

    /// Header checkbox state is derived, never stored: checked only when
    /// every visible record is selected and there is at least one.
    pub fn all_selected(&self, data: &[T]) -> bool {
        !data.is_empty() && data.iter().all(|row| self.selected.contains(row.id()))
    }

    fn select_all_id(&self) -> String {
        format!("{}/all", self.id)
    }

    fn header_cell_id(&self, index: usize) -> String {
        format!("{}/hdr/{index}", self.id)
    }

    fn row_checkbox_id(&self, row_id: &str) -> String {
        format!("{}/row/{row_id}", self.id)
    }
}

impl<T: TableRow + Clone> Table<T> {
    /// The currently selected subset of `data`, in data order.
    pub fn selected_records(&self, data: &[T]) -> Vec<T> {
        data.iter()
            .filter(|row| self.selected.contains(row.id()))
            .cloned()
            .collect()
    }

    /// Toggle one row's membership in the selection set. Returns the
    /// recomputed selected subset.
    pub fn toggle_row(&mut self, row_id: &str, data: &[T]) -> Vec<T> {
        if !self.selected.remove(row_id) && data.iter().any(|row| row.id() == row_id) {
            self.selected.insert(row_id.to_string());
        }
        self.selected_records(data)
    }

    /// Select every visible record, or clear the selection if everything
    /// is already selected. Returns the resulting selected subset.
    pub fn toggle_select_all(&mut self, data: &[T]) -> Vec<T> {
        if self.all_selected(data) {
            self.selected.clear();
        } else {
            self.selected = data.iter().map(|row| row.id().to_string()).collect();
        }
        self.selected_records(data)
    }

    /// Consume one high-level event against the given records. Returns
    /// the notification to forward to the host, if any.
    pub fn handle_event(&mut self, event: &Event, data: &[T]) -> Option<TableEvent<T>> {
        let Event::Click {
            target: Some(target),
            button: MouseButton::Left,
            ..
        } = event
        else {
            return None;
        };

        if let Some(rest) = target.strip_prefix(&format!("{}/hdr/", self.id)) {
            if let Ok(index) = rest.parse::<usize>() {
                self.toggle_sort_index(index);
            }
            return None;
        }

        if !self.selectable || self.loading {
            return None;
        }

        if *target == self.select_all_id() {
            if data.is_empty() {
                return None;
            }
            return Some(TableEvent::SelectionChanged(self.toggle_select_all(data)));
        }

        if let Some(row_id) = target.strip_prefix(&format!("{}/row/", self.id)) {
            let known = self.selected.contains(row_id) || data.iter().any(|r| r.id() == row_id);
            if !known {
                return None;
            }
            let row_id = row_id.to_string();
            return Some(TableEvent::SelectionChanged(self.toggle_row(&row_id, data)));
        }

        None
    }

    /// Build the element tree: header row, then exactly one of the three
    /// body states (loading, empty, rows).
    pub fn view(&self, data: &[T], theme: &Theme, tick: u64) -> Element {
        let rows = self.sorted(data);
        let widths = self.column_widths(&rows);

        let mut table = Element::col()
            .id(self.id.clone())
            .style(Style::new().border(Border::Single).foreground(theme.border))
            .padding(Edges::horizontal(1));

        table = table.child(self.header_row(data, &widths, theme));

        if self.loading {
            table = table.child(
                Element::row()
                    .id(format!("{}/loading", self.id))
                    .gap(1)
                    .child(
                        Element::text(spinner_frame(tick).to_string())
                            .style(Style::new().foreground(theme.accent)),
                    )
                    .child(
                        Element::text("Loading data...")
                            .style(Style::new().foreground(theme.muted)),
                    ),
            );
        } else if data.is_empty() {
            table = table.child(
                Element::text("No data available")
                    .id(format!("{}/empty", self.id))
                    .style(Style::new().foreground(theme.muted)),
            );
        } else {
            for row in rows {
                table = table.child(self.body_row(row, &widths, theme));
            }
        }

        table
    }

    fn header_row(&self, data: &[T], widths: &[u16], theme: &Theme) -> Element {
        let mut header = Element::row().id(format!("{}/header", self.id)).gap(1);

        if self.selectable {
            let usable = !self.loading && !data.is_empty();
            header = header.child(
                Element::checkbox(self.all_selected(data))
                    .id(self.select_all_id())
                    .clickable(usable)
                    .style(Style::new().foreground(theme.muted)),
            );
        }

        for (index, column) in self.columns.iter().enumerate() {
            let mut title = column.header.to_string();
            if self.sort.key.as_deref() == column.sort_key() && self.sort.key.is_some() {
                title.push(match self.sort.direction {
                    SortDirection::Ascending => '↑',
                    SortDirection::Descending => '↓',
                });
            }
            header = header.child(
                Element::text(title)
                    .id(self.header_cell_id(index))
                    .width(Size::Fixed(widths[index]))
                    .text_wrap(TextWrap::Truncate)
                    .clickable(column.sort_key().is_some() && !self.loading)
                    .style(Style::new().foreground(theme.text).bold()),
            );
        }

        header
    }

    fn body_row(&self, row: &T, widths: &[u16], theme: &Theme) -> Element {
        let selected = self.is_selected(row.id());
        let mut body = Element::row()
            .id(format!("{}/tr/{}", self.id, row.id()))
            .gap(1);
        if selected {
            body = body.style(Style::new().background(theme.highlight));
        }

        if self.selectable {
            body = body.child(
                Element::checkbox(selected)
                    .id(self.row_checkbox_id(row.id()))
                    .style(Style::new().foreground(theme.muted)),
            );
        }

        for (index, column) in self.columns.iter().enumerate() {
            body = body.child(
                Element::text(column.value(row))
                    .width(Size::Fixed(widths[index]))
                    .text_wrap(TextWrap::Truncate)
                    .style(Style::new().foreground(theme.text)),
            );
        }

        body
    }

    /// Widths fit the widest cell per column, plus room for the header's
    /// sort indicator.
    fn column_widths(&self, rows: &[&T]) -> Vec<u16> {
        self.columns
            .iter()
            .map(|column| {
                let mut width = display_width(&column.header) + 1;
                for row in rows {
                    width = width.max(display_width(&column.value(row)));
                }
                width as u16
            })
            .collect()
    }
}
