use egui_request_filter::backends::request::RequestBackend;
use egui_request_filter::filter_view::notification_label;
use egui_request_filter::importers::csv_ui::CsvImporterUi;
use egui_request_filter::{util, FilterEditorView, TableView};
use filter_core::{FilterCommand, FilterController, Notification, RowSource};

const DEALERS: [&str; 4] = ["AcmeCo", "Globex", "Sound Pro", "Initech Audio"];
const MODELS: [&str; 5] = ["ModelX", "Bass 12", "Bass 15", "Sub 10 Pro", "ModelY"];
const STATUSES: [&str; 5] = ["Accepted by dealer", "Waiting", "Sent to service", "Closed", "Rejected"];
const WARRANTY: [&str; 3] = ["Warranty", "Paid repair", "Diagnostics"];

struct ServiceRequestsApp {
    requests: RequestBackend,
    packages: RequestBackend,
    requests_view: TableView,
    packages_view: TableView,
    filters: FilterController,
    editor: FilterEditorView,
    importer_ui: CsvImporterUi,
    notification: Option<Notification>,
}

impl Default for ServiceRequestsApp {
    fn default() -> Self {
        let mut requests = RequestBackend::request_list();
        let mut packages = RequestBackend::package_mini();
        for n in 0..60usize {
            let serial = format!("SN{:05}", 1000 + n * 37);
            let model = MODELS[n % MODELS.len()];
            requests.insert_row([
                (n + 1).to_string(),
                serial.clone(),
                model.to_string(),
                format!("2024-{:02}-{:02}", n % 12 + 1, n % 28 + 1),
                DEALERS[n % DEALERS.len()].to_string(),
                STATUSES[n % STATUSES.len()].to_string(),
                WARRANTY[n % WARRANTY.len()].to_string(),
                format!("2025-{:02}-{:02}", (n + 3) % 12 + 1, (n * 5) % 28 + 1),
            ]);
            if n % 4 == 0 {
                packages.insert_row([
                    (n / 4 + 1).to_string(),
                    serial,
                    model.to_string(),
                    "No sound".to_string(),
                ]);
            }
        }
        Self {
            requests,
            packages,
            requests_view: TableView::new(),
            packages_view: TableView::new(),
            filters: FilterController::default(),
            editor: FilterEditorView::new().value_width(220.0),
            importer_ui: CsvImporterUi::new(),
            notification: None,
        }
    }
}

impl ServiceRequestsApp {
    /// Bring both tables in line with the editor after the request rows were replaced.
    fn reapply_filters(&mut self) {
        let notification = self
            .filters
            .reapply(&mut [&mut self.requests, &mut self.packages]);
        log::info!("{notification}");
        self.notification = Some(notification);
    }

    fn run(&mut self, command: FilterCommand) {
        let notification = self
            .filters
            .dispatch(command, &mut [&mut self.requests, &mut self.packages]);
        if let Some(notification) = notification {
            log::info!("{notification}");
            self.notification = Some(notification);
        }
    }
}

impl eframe::App for ServiceRequestsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("MenuBar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
                ui.separator();
                if ui.button("Export visible…").clicked() {
                    util::export_csv(&self.requests);
                }
            })
        });

        egui::TopBottomPanel::top("Filters").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(command) = self.editor.show(self.filters.clauses_mut(), ui) {
                self.run(command);
            }
            if let Some(notification) = &self.notification {
                notification_label(notification, ui);
            }
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("Packages")
            .resizable(true)
            .default_height(160.0)
            .show(ctx, |ui| {
                ui.heading("Package requests");
                self.packages_view.show(&mut self.packages, ui, "packages");
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.importer_ui.show(&mut self.requests, ui) {
                log::info!("loaded {} requests", self.requests.row_count());
                self.reapply_filters();
            }
            ui.separator();
            self.requests_view.show(&mut self.requests, ui, "requests");
        });
    }
}

fn main() -> eframe::Result {
    use eframe::App;

    env_logger::init();

    eframe::run_simple_native(
        "Service requests",
        eframe::NativeOptions {
            centered: true,
            ..Default::default()
        },
        {
            let mut app = ServiceRequestsApp::default();
            move |ctx, frame| {
                app.update(ctx, frame);
            }
        },
    )
}
