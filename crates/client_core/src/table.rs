//! Table view-model state: the reconciled rows plus the orthogonal UI
//! state the table needs (sort, filters, column visibility, selection,
//! pagination, manual reordering). Everything here is in-memory; none of
//! these operations can fail.

use std::collections::HashSet;

use shared::domain::EntryId;

use crate::reconcile::DisplayRow;

pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    CycleDay,
    Phase,
    Status,
    EstrogenLevel,
    ProgesteroneLevel,
    Symptoms,
    Reviewer,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::CycleDay,
        Column::Phase,
        Column::Status,
        Column::EstrogenLevel,
        Column::ProgesteroneLevel,
        Column::Symptoms,
        Column::Reviewer,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::CycleDay => "Cycle Day",
            Column::Phase => "Phase",
            Column::Status => "Status",
            Column::EstrogenLevel => "Estrogen Level",
            Column::ProgesteroneLevel => "Progesterone Level",
            Column::Symptoms => "Symptoms",
            Column::Reviewer => "Reviewer",
        }
    }

    /// Display text of this column's cell, which is also what sorting
    /// and filtering compare against.
    pub fn cell_text(&self, row: &DisplayRow) -> String {
        match self {
            Column::CycleDay => row.cycle_day.clone(),
            Column::Phase => row.phase.clone(),
            Column::Status => row.status.to_string(),
            Column::EstrogenLevel => row.estrogen_level.clone(),
            Column::ProgesteroneLevel => row.progesterone_level.clone(),
            Column::Symptoms => row.symptoms.clone(),
            Column::Reviewer => row.reviewer.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Case-insensitive substring match on one column's cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: Column,
    pub needle: String,
}

impl ColumnFilter {
    fn matches(&self, row: &DisplayRow) -> bool {
        self.column
            .cell_text(row)
            .to_lowercase()
            .contains(&self.needle.to_lowercase())
    }
}

#[derive(Debug)]
pub struct TableModel {
    /// Rows in the order the backend returned them. Authoritative:
    /// replaced wholesale on every successful refresh.
    rows: Vec<DisplayRow>,
    /// Ephemeral display order. Manual drag reordering permutes this and
    /// only this; a refresh rebuilds it from the fetched order, so local
    /// reordering is deliberately lost then.
    display_order: Vec<EntryId>,
    sort: Vec<(Column, SortDirection)>,
    filters: Vec<ColumnFilter>,
    hidden_columns: HashSet<Column>,
    selection: HashSet<EntryId>,
    page_index: usize,
    page_size: usize,
}

impl Default for TableModel {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            display_order: Vec::new(),
            sort: Vec::new(),
            filters: Vec::new(),
            hidden_columns: HashSet::new(),
            selection: HashSet::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableModel {
    /// Replaces the rows with a freshly reconciled set. Display order
    /// resets to fetched order, selection drops ids that no longer
    /// exist, and the page index is clamped to the new page count.
    pub fn install_rows(&mut self, rows: Vec<DisplayRow>) {
        self.display_order = rows.iter().map(|row| row.id).collect();
        let live: HashSet<EntryId> = self.display_order.iter().copied().collect();
        self.selection.retain(|id| live.contains(id));
        self.rows = rows;
        self.clamp_page();
    }

    /// Moves the row with `active` to the position of `over`, keeping
    /// every other row's relative order. Display-only: the backend
    /// ordering is untouched and the next refresh discards this.
    pub fn reorder(&mut self, active: EntryId, over: EntryId) {
        if active == over {
            return;
        }
        let (Some(from), Some(to)) = (self.position(active), self.position(over)) else {
            return;
        };
        let id = self.display_order.remove(from);
        self.display_order.insert(to, id);
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.display_order.iter().position(|entry| *entry == id)
    }

    pub fn set_sort(&mut self, sort: Vec<(Column, SortDirection)>) {
        self.sort = sort;
    }

    /// Sets (or replaces) the filter for a column. An empty needle
    /// clears it.
    pub fn set_filter(&mut self, column: Column, needle: impl Into<String>) {
        let needle = needle.into();
        self.filters.retain(|filter| filter.column != column);
        if !needle.is_empty() {
            self.filters.push(ColumnFilter { column, needle });
        }
        self.clamp_page();
    }

    pub fn clear_filter(&mut self, column: Column) {
        self.filters.retain(|filter| filter.column != column);
        self.clamp_page();
    }

    pub fn toggle_column_visibility(&mut self, column: Column) {
        if !self.hidden_columns.remove(&column) {
            self.hidden_columns.insert(column);
        }
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|column| !self.hidden_columns.contains(column))
            .collect()
    }

    pub fn set_selection(&mut self, selection: HashSet<EntryId>) {
        self.selection = selection;
    }

    pub fn toggle_selected(&mut self, id: EntryId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    pub fn is_selected(&self, id: EntryId) -> bool {
        self.selection.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
        self.clamp_page();
    }

    /// Changes the page size; anything outside the fixed allowed set is
    /// ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if PAGE_SIZES.contains(&page_size) {
            self.page_size = page_size;
            self.clamp_page();
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.filtered_rows().len().div_ceil(self.page_size)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_rows().len()
    }

    /// Rows in display order with filters and sort applied. Sorting is
    /// stable, so equal keys keep their display order.
    pub fn filtered_rows(&self) -> Vec<&DisplayRow> {
        let mut rows: Vec<&DisplayRow> = self
            .display_order
            .iter()
            .filter_map(|id| self.rows.iter().find(|row| row.id == *id))
            .filter(|row| self.filters.iter().all(|filter| filter.matches(row)))
            .collect();

        if !self.sort.is_empty() {
            rows.sort_by(|a, b| {
                for (column, direction) in &self.sort {
                    let ordering = column.cell_text(a).cmp(&column.cell_text(b));
                    let ordering = match direction {
                        SortDirection::Ascending => ordering,
                        SortDirection::Descending => ordering.reverse(),
                    };
                    if !ordering.is_eq() {
                        return ordering;
                    }
                }
                std::cmp::Ordering::Equal
            });
        }

        rows
    }

    /// The current page's slice of the filtered rows.
    pub fn page_rows(&self) -> Vec<&DisplayRow> {
        self.filtered_rows()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
        }
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
