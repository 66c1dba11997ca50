mod config;
mod state;

pub use config::TableViewConfig;

use crate::frontend::TableFrontend;
use egui::{Align, Label, Layout, Response, RichText, ScrollArea, Ui, Widget};
use filter_core::ColumnIdx;
use log::trace;
use std::hash::Hash;
use tap::Tap;

/// Read-only table that draws the visible rows of a [`TableFrontend`].
pub struct TableView {
    state: state::State,
    config: TableViewConfig,
}

impl Default for TableView {
    fn default() -> Self {
        TableView::new()
    }
}

impl TableView {
    pub fn new() -> Self {
        TableView::with_config(TableViewConfig::default())
    }

    pub fn with_config(config: TableViewConfig) -> Self {
        TableView {
            state: state::State::default(),
            config,
        }
    }

    /// Several views in one `Ui` need distinct `id_salt` values.
    pub fn show(
        &mut self,
        backend: &mut impl TableFrontend,
        ui: &mut Ui,
        id_salt: impl Hash,
    ) -> Response {
        self.refresh(backend);
        let column_count = backend.column_count();

        ui.push_id(id_salt, |ui| {
            ScrollArea::horizontal()
                .drag_to_scroll(false)
                .show(ui, |ui| {
                    let mut builder = egui_extras::TableBuilder::new(ui)
                        .striped(self.config.striped)
                        .resizable(true)
                        .max_scroll_height(f32::MAX)
                        .cell_layout(Layout::left_to_right(Align::Center));
                    for col in 0..column_count {
                        builder = builder.column(backend.column_render_config(ColumnIdx(col)));
                    }

                    let backend = &*backend;
                    let visible_rows = &self.state.visible_rows;
                    builder
                        .header(self.config.header_height, |mut header| {
                            for col in 0..column_count {
                                header.col(|ui| {
                                    let name =
                                        backend.column_name(ColumnIdx(col)).unwrap_or_default();
                                    Label::new(RichText::new(name).strong())
                                        .selectable(false)
                                        .ui(ui);
                                });
                            }
                        })
                        .body(|body| {
                            body.rows(self.config.row_height, visible_rows.len(), |mut row| {
                                let Some(row_uid) = visible_rows.get(row.index()).copied() else {
                                    return;
                                };
                                for col in 0..column_count {
                                    row.col(|ui| {
                                        let id = ui.id();
                                        backend.show_cell_view(row_uid, ColumnIdx(col), ui, id);
                                    });
                                }
                            });
                        });
                });

            if self.config.show_row_counter {
                ui.weak(format!(
                    "{} of {} rows",
                    self.state.visible_rows.len(),
                    self.state.total_rows
                ));
            }
        })
        .response
    }

    /// Re-read visible rows when the backend reports a change since the last frame.
    fn refresh(&mut self, backend: &mut impl TableFrontend) {
        let flags = backend.one_shot_flags_mut().take();
        if self.state.is_initialized
            && !flags.visibility_changed
            && !flags.row_set_updated
            && !flags.cleared
        {
            return;
        }
        self.state.visible_rows = backend
            .visible_row_uids()
            .tap(|rows| trace!("TableView: {} rows visible", rows.len()));
        self.state.total_rows = backend.row_count();
        self.state.is_initialized = true;
    }
}
