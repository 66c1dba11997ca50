use egui::{Id, Ui};
use egui_extras::Column as TableColumnConfig;
use filter_core::{ColumnIdx, RowSource, RowUid};

/// Everything [`crate::TableView`] needs on top of a [`RowSource`] to draw a table.
pub trait TableFrontend: RowSource {
    fn column_count(&self) -> usize;
    fn column_name(&self, col: ColumnIdx) -> Option<&str>;
    /// Ids of the rows to draw, in display order.
    fn visible_row_uids(&self) -> Vec<RowUid>;

    fn show_cell_view(&self, row_uid: RowUid, col: ColumnIdx, ui: &mut Ui, id: Id);

    /// Returns the rendering configuration for the column.
    fn column_render_config(&mut self, col: ColumnIdx) -> TableColumnConfig {
        let _ = col;
        TableColumnConfig::auto().resizable(true)
    }

    /// Show tooltip on cell hover
    fn cell_tooltip(&self, _row_uid: RowUid, _col: ColumnIdx) -> Option<&str> {
        None
    }
}
