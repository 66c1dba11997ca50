use crate::frontend::TableFrontend;
use egui::{Id, Label, Ui, Widget};
use egui_extras::Column as TableColumnConfig;
use filter_core::source::OneShotFlags;
use filter_core::{ColumnIdx, RowIdx, RowSet, RowSource, RowUid};

/// Column headers of the service request list, laid out for the default field mapping.
pub const REQUEST_LIST_COLUMNS: [&str; 8] = [
    "#",
    "Serial number",
    "Model",
    "Purchase date",
    "Dealer",
    "Status",
    "Warranty",
    "Created",
];

/// Column headers of the compact per-package request table.
pub const PACKAGE_MINI_COLUMNS: [&str; 4] = ["#", "Serial number", "Model", "Problem"];

/// Cells longer than this are clipped, with the full text in a tooltip.
const CLIP_CHARS: usize = 48;

/// Named columns over an in-memory [`RowSet`].
#[derive(Default)]
pub struct RequestBackend {
    columns: Vec<String>,
    rows: RowSet,
}

impl RequestBackend {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        RequestBackend {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: RowSet::new(),
        }
    }

    pub fn request_list() -> Self {
        RequestBackend::new(REQUEST_LIST_COLUMNS)
    }

    pub fn package_mini() -> Self {
        RequestBackend::new(PACKAGE_MINI_COLUMNS)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Replace column headers, keeps row data.
    pub fn set_columns<S: Into<String>>(&mut self, columns: impl IntoIterator<Item = S>) {
        self.columns = columns.into_iter().map(Into::into).collect();
        self.rows.one_shot_flags_mut().row_set_updated = true;
    }

    pub fn insert_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> RowUid {
        self.rows.push_row(cells)
    }

    /// Remove all rows, leaving the columns.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl RowSource for RequestBackend {
    fn row_count(&self) -> usize {
        self.rows.row_count()
    }

    fn row_uid(&self, row_idx: RowIdx) -> Option<RowUid> {
        self.rows.row_uid(row_idx)
    }

    fn cell_text(&self, row_uid: RowUid, column: ColumnIdx) -> Option<&str> {
        self.rows.cell_text(row_uid, column)
    }

    fn is_row_visible(&self, row_uid: RowUid) -> bool {
        self.rows.is_row_visible(row_uid)
    }

    fn set_row_visible(&mut self, row_uid: RowUid, visible: bool) {
        self.rows.set_row_visible(row_uid, visible);
    }

    fn one_shot_flags(&self) -> &OneShotFlags {
        self.rows.one_shot_flags()
    }

    fn one_shot_flags_mut(&mut self) -> &mut OneShotFlags {
        self.rows.one_shot_flags_mut()
    }

    fn visible_count(&self) -> usize {
        self.rows.visible_count()
    }
}

impl TableFrontend for RequestBackend {
    fn column_count(&self) -> usize {
        // Rows wider than the header still get drawn.
        self.columns.len().max(self.rows.max_row_len())
    }

    fn column_name(&self, col: ColumnIdx) -> Option<&str> {
        self.columns.get(col.0).map(|s| s.as_str())
    }

    fn visible_row_uids(&self) -> Vec<RowUid> {
        self.rows.visible_rows().collect()
    }

    fn show_cell_view(&self, row_uid: RowUid, col: ColumnIdx, ui: &mut Ui, _id: Id) {
        let Some(text) = self.rows.cell_text(row_uid, col) else {
            return;
        };
        let resp = Label::new(text).truncate().ui(ui);
        if let Some(tooltip) = self.cell_tooltip(row_uid, col) {
            resp.on_hover_text(tooltip);
        }
    }

    fn column_render_config(&mut self, col: ColumnIdx) -> TableColumnConfig {
        if col.0 == 0 {
            TableColumnConfig::auto().at_least(24.0).resizable(false)
        } else {
            TableColumnConfig::auto().at_least(48.0).clip(true).resizable(true)
        }
    }

    fn cell_tooltip(&self, row_uid: RowUid, col: ColumnIdx) -> Option<&str> {
        self.rows
            .cell_text(row_uid, col)
            .filter(|text| text.chars().count() > CLIP_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_to_rows() {
        let mut backend = RequestBackend::request_list();
        let a = backend.insert_row(["1", "SN123", "ModelX", "", "AcmeCo", "Active", "", "2024-01-01"]);
        let b = backend.insert_row(["2", "SN9"]);
        assert_eq!(backend.row_count(), 2);
        assert_eq!(backend.cell_text(a, ColumnIdx(4)), Some("AcmeCo"));
        assert_eq!(backend.cell_text(b, ColumnIdx(4)), None);
        assert_eq!(backend.column_name(ColumnIdx(5)), Some("Status"));

        backend.set_row_visible(b, false);
        assert_eq!(backend.visible_row_uids(), [a]);
        assert_eq!(backend.visible_count(), 1);
    }

    #[test]
    fn wide_rows_widen_table() {
        let mut backend = RequestBackend::package_mini();
        assert_eq!(backend.column_count(), 4);
        backend.insert_row(["1", "SN1", "M", "broken", "extra"]);
        assert_eq!(backend.column_count(), 5);
        assert_eq!(backend.column_name(ColumnIdx(4)), None);
    }

    #[test]
    fn long_cells_get_tooltip() {
        let mut backend = RequestBackend::package_mini();
        let long = "x".repeat(CLIP_CHARS + 1);
        let row = backend.insert_row(["1", "SN1", "M", long.as_str()]);
        assert_eq!(backend.cell_tooltip(row, ColumnIdx(3)), Some(long.as_str()));
        assert_eq!(backend.cell_tooltip(row, ColumnIdx(1)), None);
    }
}
