use egui::{ComboBox, Key, RichText, TextEdit, Ui};
use filter_core::{ClauseId, ClauseList, Field, FilterClause, FilterCommand, Notification, Operator, Severity};
use strum::IntoEnumIterator;

/// Clause editor: one line per clause plus Apply and Clear buttons.
///
/// The widget only edits the clause list in place and reports what the user asked for,
/// running the command is up to the caller.
pub struct FilterEditorView {
    value_width: f32,
}

impl Default for FilterEditorView {
    fn default() -> Self {
        FilterEditorView::new()
    }
}

impl FilterEditorView {
    pub fn new() -> Self {
        FilterEditorView { value_width: 180.0 }
    }

    pub fn value_width(mut self, width: f32) -> Self {
        self.value_width = width;
        self
    }

    pub fn show(&mut self, clauses: &mut ClauseList, ui: &mut Ui) -> Option<FilterCommand> {
        let mut command = None;
        let can_remove = clauses.len() > 1;

        ui.vertical(|ui| {
            for (id, clause) in clauses.iter_mut() {
                ui.horizontal(|ui| {
                    if let Some(c) = self.clause_row(id, clause, can_remove, ui) {
                        command = Some(c);
                    }
                });
            }

            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    command = Some(FilterCommand::ApplyAll);
                }
                if ui.button("Clear").clicked() {
                    command = Some(FilterCommand::ClearAll);
                }
            });
        });

        command
    }

    fn clause_row(
        &self,
        id: ClauseId,
        clause: &mut FilterClause,
        can_remove: bool,
        ui: &mut Ui,
    ) -> Option<FilterCommand> {
        let mut command = None;

        ComboBox::from_id_salt(("filter_field", id))
            .selected_text(clause.field.label())
            .show_ui(ui, |ui| {
                for field in Field::iter() {
                    ui.selectable_value(&mut clause.field, field, field.label());
                }
            });
        ComboBox::from_id_salt(("filter_operator", id))
            .selected_text(clause.operator.label())
            .show_ui(ui, |ui| {
                for operator in Operator::iter() {
                    ui.selectable_value(&mut clause.operator, operator, operator.label());
                }
            });

        let resp = TextEdit::singleline(&mut clause.value)
            .hint_text("Value")
            .desired_width(self.value_width)
            .show(ui)
            .response;
        if resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            command = Some(FilterCommand::ApplyAll);
        }

        if ui.button("➕").on_hover_text("Add filter").clicked() {
            command = Some(FilterCommand::AddClause);
        }
        if ui
            .add_enabled(can_remove, egui::Button::new("🗑"))
            .on_hover_text("Remove filter")
            .clicked()
        {
            command = Some(FilterCommand::RemoveClause(id));
        }
        command
    }
}

/// Draw the last command feedback, colored by severity.
pub fn notification_label(notification: &Notification, ui: &mut Ui) {
    let color = match notification.severity {
        Severity::Info => ui.visuals().text_color(),
        Severity::Warning => ui.visuals().warn_fg_color,
    };
    let icon = match notification.severity {
        Severity::Info => "ℹ",
        Severity::Warning => "⚠",
    };
    ui.label(RichText::new(format!("{icon} {}", notification.message)).color(color));
}
