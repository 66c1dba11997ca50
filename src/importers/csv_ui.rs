use super::csv::{CsvImporter, CsvImporterConfig, Separator};
use crate::backends::request::RequestBackend;
use egui::{RichText, Slider, Ui};
use log::warn;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use strum::IntoEnumIterator;

/// Options bar for loading a CSV export into a request table.
pub struct CsvImporterUi {
    config: CsvImporterConfig,
    importer: CsvImporter,
    picked_path: Option<PathBuf>,
}

impl Default for CsvImporterUi {
    fn default() -> Self {
        CsvImporterUi::new()
    }
}

impl CsvImporterUi {
    pub fn new() -> Self {
        CsvImporterUi {
            config: CsvImporterConfig::default(),
            importer: CsvImporter::new(),
            picked_path: None,
        }
    }

    /// Returns true if the backend was reloaded this frame.
    pub fn show(&mut self, backend: &mut RequestBackend, ui: &mut Ui) -> bool {
        let mut reload = false;
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("CSV Options").strong().monospace());

            if ui.button("Open file…").clicked() {
                if let Some(path) = rfd::FileDialog::new().add_filter("CSV", &["csv", "txt"]).pick_file() {
                    self.picked_path = Some(path);
                    reload = true;
                }
            }
            if ui
                .add_enabled(self.picked_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                reload = true;
            }
            ui.separator();

            let delim_changed = egui::ComboBox::from_label("Separator")
                .selected_text(format!("{}", self.config.separator))
                .show_ui(ui, |ui| {
                    let mut changed = false;
                    for s in Separator::iter() {
                        changed |= ui
                            .selectable_value(&mut self.config.separator, s, s.to_string())
                            .changed();
                    }
                    changed
                })
                .inner;
            reload |= delim_changed == Some(true);
            reload |= ui
                .checkbox(&mut self.config.has_headers, "Has header row")
                .changed();

            ui.separator();
            reload |= ui
                .add(Slider::new(&mut self.config.skip_first_rows, 0..=10).text("Skip first rows"))
                .on_hover_text("If file contains additional rows before header row, skip them")
                .changed();
        });

        if self.importer.status().is_error() {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("{:?}", self.importer.status()),
            );
        }

        reload && self.try_load(backend)
    }

    fn try_load(&mut self, backend: &mut RequestBackend) -> bool {
        let Some(path) = self.picked_path.clone() else {
            return false;
        };
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!("CsvImporterUi: cannot open {path:?}: {e}");
                return false;
            }
        };
        self.importer
            .load(&self.config, &mut BufReader::new(file), backend);
        !self.importer.status().is_error()
    }
}
