use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TableViewConfig {
    /// Height of every row.
    pub row_height: f32,
    pub header_height: f32,
    pub striped: bool,
    /// Show "visible of total" line under the table.
    pub show_row_counter: bool,
}

impl Default for TableViewConfig {
    fn default() -> Self {
        TableViewConfig {
            row_height: 20.0,
            header_height: 22.0,
            striped: true,
            show_row_counter: true,
        }
    }
}

impl super::TableView {
    pub fn config_mut(&mut self) -> &mut TableViewConfig {
        &mut self.config
    }
}
