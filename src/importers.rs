pub mod csv;
pub mod csv_ui;
