use std::path::PathBuf;

use eframe::egui;

use crate::projection::Projection;
use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::{panels, plot};

/// Storage key of the persisted [`Settings`].
const SETTINGS_KEY: &str = "stereonet_settings";

/// Title the native window is created with.
pub const WINDOW_TITLE: &str = "Stereonet";

/// Startup options taken from the command line.
#[derive(Debug, Default)]
pub struct StartupOptions {
    pub file: Option<PathBuf>,
    pub projection: Option<Projection>,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StereonetApp {
    pub state: AppState,
    title: String,
}

impl StereonetApp {
    pub fn new(cc: &eframe::CreationContext<'_>, options: StartupOptions) -> Self {
        let mut settings: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();
        if let Some(projection) = options.projection {
            settings.projection = projection;
        }

        let mut state = AppState::new(settings);
        if let Some(path) = &options.file {
            state.open_path(path);
        }
        Self::with_state(state)
    }

    fn with_state(state: AppState) -> Self {
        Self {
            state,
            title: WINDOW_TITLE.to_string(),
        }
    }

    /// The new window title, if it differs from the one last shown.
    fn title_change(&mut self) -> Option<String> {
        let title = self.state.title();
        if title == self.title {
            return None;
        }
        self.title.clone_from(&title);
        Some(title)
    }
}

impl eframe::App for StereonetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_shortcuts(ctx, &mut self.state);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: status ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Left side panel: groups and data ----
        egui::SidePanel::left("group_panel")
            .default_width(340.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::group_panel(ui, &mut self.state);
                ui.add_space(8.0);
                panels::data_panel(ui, &mut self.state);
            });

        // ---- Central panel: stereonet ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::projection_tabs(ui, &mut self.state);
            plot::stereonet_plot(ui, &mut self.state);
        });

        if let Some(title) = self.title_change() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &self.state.settings);
    }
}
