pub mod backends;
pub mod filter_view;
pub mod frontend;
pub mod importers;
pub mod table_view;
pub mod util;

pub use filter_view::FilterEditorView;
pub use frontend::TableFrontend;
pub use table_view::TableView;
pub use filter_core;
