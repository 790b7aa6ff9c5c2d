use std::path::{Path, PathBuf};

use crate::scan_data::ScanStore;
use crate::ui::console::Console;
use crate::ui::dialogs::{DialogAction, DialogTarget, OptionsDialog};
use crate::ui::tabs::continuum::ContinuumTab;
use crate::ui::tabs::focus::FocusTab;
use crate::ui::tabs::pointing::PointingTab;
use crate::ui::tabs::spectral::SpectralTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
enum TabId {
    Continuum,
    Pointing,
    Focus,
    Spectral,
}

/// The application window: scan list on the left, per-scan-type tabs in the
/// middle, console at the bottom. Owns the one mutable shared resource, the
/// active [`ScanStore`]; re-opening a project swaps it wholesale and resets
/// everything derived from it.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScanviewApp {
    archive_path: Option<PathBuf>,
    active_tab: TabId,
    continuum: ContinuumTab,
    pointing: PointingTab,
    focus: FocusTab,
    spectral: SpectralTab,
    #[serde(skip)]
    store: Option<ScanStore>,
    #[serde(skip)]
    selected_scan: Option<usize>,
    #[serde(skip)]
    console: Console,
    #[serde(skip)]
    dialog: Option<OptionsDialog>,
    #[serde(skip)]
    help_open: bool,
}

impl Default for ScanviewApp {
    fn default() -> Self {
        ScanviewApp {
            archive_path: None,
            active_tab: TabId::Continuum,
            continuum: ContinuumTab::default(),
            pointing: PointingTab::default(),
            focus: FocusTab::default(),
            spectral: SpectralTab::default(),
            store: None,
            selected_scan: None,
            console: Console::default(),
            dialog: None,
            help_open: false,
        }
    }
}

impl ScanviewApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Restore UI preferences (polarizations, spectral view, last archive).
        let mut app: ScanviewApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if let Some(path) = app.archive_path.clone() {
            app.open_archive(&path);
        }
        app
    }

    /// Create the app with a project already loaded (used by `main` when an
    /// archive path is given on the command line).
    pub fn with_archive(cc: &eframe::CreationContext<'_>, path: &Path) -> Self {
        let mut app = ScanviewApp::new(cc);
        app.open_archive(path);
        app
    }

    fn open_archive(&mut self, path: &Path) {
        match ScanStore::open(path, None) {
            Ok(store) => {
                self.console.write(format!(
                    "Opened project '{}' ({} scans) from {}",
                    store.project,
                    store.scan_count(),
                    path.display()
                ));
                // Atomic swap: the old store and everything derived from it
                // goes at once.
                self.store = Some(store);
                self.archive_path = Some(path.to_path_buf());
                self.selected_scan = None;
                self.continuum.reset();
                self.pointing.reset();
                self.focus.reset();
                self.spectral.reset();
            }
            Err(err) => {
                // The previous project stays loaded; a failed open must not
                // leave the tabs reading from a half-replaced store.
                self.console
                    .write_error(format!("Could not open {}: {}", path.display(), err));
            }
        }
    }

    fn select_scan(&mut self, scan_index: usize) {
        let Some(store) = &self.store else {
            return;
        };
        self.selected_scan = Some(scan_index);

        let scan_type = match store.record_by_index(scan_index) {
            Ok(record) => {
                self.console.write(format!(
                    "Displaying scan data for scan {} of type {}",
                    record.scan, record.scan_type
                ));
                record.scan_type.clone()
            }
            Err(err) => {
                self.console.write_error(err.to_string());
                return;
            }
        };

        // Every tab that handles this scan type gets the scan; the last one
        // in tab order becomes the active tab.
        if ContinuumTab::SCAN_TYPES.contains(&scan_type.as_str()) {
            self.continuum
                .display_scan(store, scan_index, &mut self.console);
            self.active_tab = TabId::Continuum;
        }
        if PointingTab::SCAN_TYPES.contains(&scan_type.as_str()) {
            self.pointing
                .display_scan(store, scan_index, &mut self.console);
            self.active_tab = TabId::Pointing;
        }
        if FocusTab::SCAN_TYPES.contains(&scan_type.as_str()) {
            self.focus
                .display_scan(store, scan_index, &mut self.console);
            self.active_tab = TabId::Focus;
        }
        if SpectralTab::SCAN_TYPES.contains(&scan_type.as_str()) {
            self.spectral
                .display_scan(store, scan_index, &mut self.console);
            self.active_tab = TabId::Spectral;
        }
    }

    fn menu_bar_ui(&mut self, ui: &mut egui::Ui) {
        let mut open_request: Option<PathBuf> = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open...").clicked() {
                    open_request = rfd::FileDialog::new()
                        .add_filter("Project archives", &["json"])
                        .pick_file();
                }
                if ui.button("Exit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.menu_button("Tabs", |ui| {
                if ui.button("Continuum").clicked() {
                    self.console
                        .write("There are no options for the Continuum tab");
                }
                if ui.button("Pointing...").clicked() {
                    self.dialog = Some(OptionsDialog::new(
                        DialogTarget::Pointing,
                        &self.pointing.polarization,
                    ));
                }
                if ui.button("Focus...").clicked() {
                    self.dialog = Some(OptionsDialog::new(
                        DialogTarget::Focus,
                        &self.focus.polarization,
                    ));
                }
            });
            ui.menu_button("Help", |ui| {
                if ui.button("Help").clicked() {
                    self.help_open = true;
                }
            });
        });

        if let Some(path) = open_request {
            self.open_archive(&path);
        }
    }

    fn scan_list_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Scans");
        ui.separator();

        let Some(store) = &self.store else {
            ui.weak("No project loaded.\nFile \u{2192} Open...");
            return;
        };

        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for index in 0..store.scan_count() {
                let Ok(record) = store.record_by_index(index) else {
                    continue;
                };
                let selected = self.selected_scan == Some(index);
                if ui
                    .selectable_label(selected, format!("Scan {}", record.scan))
                    .clicked()
                {
                    clicked = Some(index);
                }
            }
        });
        if let Some(index) = clicked {
            self.select_scan(index);
        }
    }

    fn tab_strip_ui(&mut self, ui: &mut egui::Ui) {
        // Tabs that handle the selected scan's type get a highlighted title.
        let selected_type = self
            .store
            .as_ref()
            .zip(self.selected_scan)
            .and_then(|(store, index)| store.record_by_index(index).ok())
            .map(|record| record.scan_type.clone());
        let matches =
            |types: &[&str]| selected_type.as_deref().is_some_and(|t| types.contains(&t));

        let tabs = [
            (
                TabId::Continuum,
                "Continuum",
                matches(ContinuumTab::SCAN_TYPES),
            ),
            (TabId::Pointing, "Pointing", matches(PointingTab::SCAN_TYPES)),
            (TabId::Focus, "Focus", matches(FocusTab::SCAN_TYPES)),
            (TabId::Spectral, "Spectral", matches(SpectralTab::SCAN_TYPES)),
        ];

        ui.horizontal(|ui| {
            for (id, title, highlight) in tabs {
                let mut text = egui::RichText::new(title);
                if highlight {
                    text = text.color(egui::Color32::LIGHT_BLUE);
                }
                if ui.selectable_label(self.active_tab == id, text).clicked() {
                    self.active_tab = id;
                }
            }
        });
        ui.separator();
    }

    fn active_tab_ui(&mut self, ui: &mut egui::Ui) {
        let Some(store) = &self.store else {
            ui.centered_and_justified(|ui| {
                ui.label("Open a project archive to browse scans.");
            });
            return;
        };
        match self.active_tab {
            TabId::Continuum => self.continuum.ui(ui, store, &mut self.console),
            TabId::Pointing => self.pointing.ui(ui),
            TabId::Focus => self.focus.ui(ui),
            TabId::Spectral => self.spectral.ui(ui, store, &mut self.console),
        }
    }

    fn dialogs_ui(&mut self, ctx: &egui::Context) {
        if let Some(dialog) = &mut self.dialog {
            let target = dialog.target;
            let action = dialog.ui(ctx);
            match action {
                DialogAction::Open => {}
                DialogAction::Apply(polarization) => {
                    match target {
                        DialogTarget::Pointing => self.pointing.set_polarization(
                            &polarization,
                            self.store.as_ref(),
                            &mut self.console,
                        ),
                        DialogTarget::Focus => self.focus.set_polarization(
                            &polarization,
                            self.store.as_ref(),
                            &mut self.console,
                        ),
                    }
                    self.dialog = None;
                }
                DialogAction::Cancel => self.dialog = None,
            }
        }

        if self.help_open {
            egui::Window::new("Help")
                .collapsible(false)
                .resizable(false)
                .open(&mut self.help_open)
                .show(ctx, |ui| {
                    ui.label("Please contact Customer Support");
                });
        }
    }
}

impl eframe::App for ScanviewApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("scanview_menu_bar").show(ctx, |ui| {
            self.menu_bar_ui(ui);
        });

        egui::TopBottomPanel::bottom("scanview_console")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Console").strong());
                self.console.ui(ui);
            });

        egui::SidePanel::left("scanview_scan_list")
            .resizable(true)
            .default_width(160.0)
            .show(ctx, |ui| {
                self.scan_list_ui(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.tab_strip_ui(ui);
            self.active_tab_ui(ui);
        });

        self.dialogs_ui(ctx);
    }
}
