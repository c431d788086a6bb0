use eframe::egui::{
    self, Color32, DragValue, Key, KeyboardShortcut, Modifiers, RichText, ScrollArea, TextEdit, Ui,
};
use egui_extras::{Column, TableBuilder};

use crate::color::{from_color32, to_color32};
use crate::data::filter::ItemKey;
use crate::data::model::DataType;
use crate::projection::Projection;
use crate::settings::Settings;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Actions shared by menus and keyboard shortcuts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    New,
    Open,
    Save,
    SaveAs,
    Export,
    Quit,
    AddGroup,
    RemoveGroup,
}

impl Action {
    fn shortcut(self) -> KeyboardShortcut {
        let key = match self {
            Action::New => Key::N,
            Action::Open => Key::O,
            Action::Save | Action::SaveAs => Key::S,
            Action::Export => Key::E,
            Action::Quit => Key::Q,
            Action::AddGroup => Key::G,
            Action::RemoveGroup => Key::D,
        };
        let modifiers = if self == Action::SaveAs {
            Modifiers::COMMAND | Modifiers::SHIFT
        } else {
            Modifiers::COMMAND
        };
        KeyboardShortcut::new(modifiers, key)
    }
}

/// Checked in this order: Ctrl+S also matches Ctrl+Shift+S, so the longer
/// shortcut goes first.
const SHORTCUT_ORDER: [Action; 8] = [
    Action::SaveAs,
    Action::Save,
    Action::New,
    Action::Open,
    Action::Export,
    Action::Quit,
    Action::AddGroup,
    Action::RemoveGroup,
];

/// Consume pressed shortcuts and run their actions.
pub fn handle_shortcuts(ctx: &egui::Context, state: &mut AppState) {
    let pressed = ctx.input_mut(|input| {
        SHORTCUT_ORDER
            .into_iter()
            .find(|action| input.consume_shortcut(&action.shortcut()))
    });
    if let Some(action) = pressed {
        perform(ctx, state, action);
    }
}

pub fn perform(ctx: &egui::Context, state: &mut AppState, action: Action) {
    match action {
        Action::New => state.new_file(),
        Action::Open => open_file_dialog(state),
        Action::Save => match state.current_file.clone() {
            Some(path) => state.save_to(&path),
            None => save_as_dialog(state),
        },
        Action::SaveAs => save_as_dialog(state),
        Action::Export => export_dialog(state),
        Action::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        Action::AddGroup => state.add_group(),
        Action::RemoveGroup => state.remove_current_group(),
    }
}

fn menu_item(ui: &mut Ui, state: &mut AppState, label: &str, action: Action) {
    let shortcut = ui.ctx().format_shortcut(&action.shortcut());
    if ui
        .add(egui::Button::new(label).shortcut_text(shortcut))
        .clicked()
    {
        ui.close_menu();
        perform(ui.ctx(), state, action);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            menu_item(ui, state, "New", Action::New);
            menu_item(ui, state, "Open…", Action::Open);
            menu_item(ui, state, "Save", Action::Save);
            menu_item(ui, state, "Save as…", Action::SaveAs);
            ui.separator();
            menu_item(ui, state, "Export SVG…", Action::Export);
            ui.separator();
            menu_item(ui, state, "Quit", Action::Quit);
        });

        ui.menu_button("Groups", |ui: &mut Ui| {
            menu_item(ui, state, "Add group", Action::AddGroup);
            menu_item(ui, state, "Remove current group", Action::RemoveGroup);
            ui.separator();
            if ui.button("Poles of planes").clicked() {
                ui.close_menu();
                state.planes_to_poles();
            }
            if ui.button("Planes of poles").clicked() {
                ui.close_menu();
                state.poles_to_planes();
            }
            if ui.button("Fit fold").clicked() {
                ui.close_menu();
                state.fit_fold();
            }
        });

        ui.menu_button("View", |ui: &mut Ui| view_menu(ui, &mut state.settings));
    });
}

fn view_menu(ui: &mut Ui, settings: &mut Settings) {
    for projection in Projection::ALL {
        ui.radio_value(&mut settings.projection, projection, projection.label());
    }
    ui.separator();
    ui.checkbox(&mut settings.show_guides, "Show guides");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Guide spacing");
        egui::ComboBox::from_id_salt("guide_spacing")
            .selected_text(format!("{}°", settings.guide_spacing_deg))
            .show_ui(ui, |ui: &mut Ui| {
                for spacing in Settings::GUIDE_SPACINGS {
                    ui.selectable_value(
                        &mut settings.guide_spacing_deg,
                        spacing,
                        format!("{spacing}°"),
                    );
                }
            });
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Curve samples");
        ui.add(DragValue::new(&mut settings.rotation_samples).range(8..=1000));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Fold top limb");
        ui.add(
            DragValue::new(&mut settings.top_limb_proportion)
                .range(0.0..=1.0)
                .speed(0.01),
        );
    });
}

// ---------------------------------------------------------------------------
// Group list
// ---------------------------------------------------------------------------

/// Radio-button group list with visibility and style editors.
pub fn group_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Groups");
        if ui.small_button("+").on_hover_text("Add group").clicked() {
            state.add_group();
        }
    });
    ui.separator();

    if state.project.is_empty() {
        ui.label("No groups. Add one to start entering data.");
        return;
    }

    let selected = state.project.selected_index();
    let mut select = None;
    let mut remove = None;

    ScrollArea::vertical()
        .id_salt("group_list")
        .auto_shrink([false, true])
        .max_height(ui.available_height() * 0.45)
        .show(ui, |ui: &mut Ui| {
            for (i, group) in state.project.groups.iter_mut().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.radio(selected == Some(i), "").clicked() {
                        select = Some(i);
                    }
                    ui.checkbox(&mut group.enabled, "")
                        .on_hover_text("Show on the net");

                    let mut color = to_color32(group.style.color);
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        group.style.color = from_color32(color);
                    }
                    ui.add(
                        DragValue::new(&mut group.style.width)
                            .range(0.5..=10.0)
                            .speed(0.1),
                    )
                    .on_hover_text("Line width");

                    ui.add(TextEdit::singleline(&mut group.name).desired_width(120.0));
                    if ui.small_button("🗑").on_hover_text("Delete group").clicked() {
                        remove = Some(i);
                    }
                });
            }
        });

    if let Some(i) = select {
        state.select_group(i);
    }
    if let Some(i) = remove {
        state.remove_group(i);
    }
}

// ---------------------------------------------------------------------------
// Data table and entry row
// ---------------------------------------------------------------------------

/// Type selector, measurement table and entry row of the selected group.
pub fn data_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data");
    ui.separator();

    let Some(selected) = state.project.selected_index() else {
        ui.label("Select a group.");
        return;
    };
    let group = &state.project.groups[selected];
    let current_type = group.data_type();
    let locked = !group.is_empty();

    // ---- Type selector, locked once the group holds data ----
    let mut requested = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Type");
        ui.add_enabled_ui(!locked, |ui: &mut Ui| {
            egui::ComboBox::from_id_salt("group_type")
                .selected_text(current_type.map_or("–".to_string(), |t| t.to_string()))
                .show_ui(ui, |ui: &mut Ui| {
                    for data_type in DataType::ENTERABLE {
                        if ui
                            .selectable_label(current_type == Some(data_type), data_type.to_string())
                            .clicked()
                        {
                            requested = Some(data_type);
                        }
                    }
                });
        });
    });
    if let Some(data_type) = requested {
        state.set_selected_type(data_type);
    }

    let group = &state.project.groups[selected];
    let fields = group
        .data_type()
        .and_then(DataType::field_names)
        .unwrap_or(["", ""]);

    // ---- Table ----
    let mut remove = None;
    let table_height = (ui.available_height() - 40.0).max(60.0);
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(table_height)
        .column(Column::auto().at_least(30.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            for field in fields {
                header.col(|ui: &mut Ui| {
                    ui.strong(field);
                });
            }
            header.col(|_ui: &mut Ui| {});
        })
        .body(|body| {
            body.rows(18.0, group.len(), |mut row| {
                let i = row.index();
                let netobj = &group.net_objects()[i];
                row.col(|ui: &mut Ui| {
                    ui.label((i + 1).to_string());
                });
                match netobj.field_degrees() {
                    Some(values) => {
                        for value in values {
                            row.col(|ui: &mut Ui| {
                                ui.label(value.to_string());
                            });
                        }
                    }
                    None => {
                        row.col(|ui: &mut Ui| {
                            ui.label(netobj.to_string());
                        });
                        row.col(|_ui: &mut Ui| {});
                    }
                }
                row.col(|ui: &mut Ui| {
                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                        remove = Some(i);
                    }
                });
            });
        });

    if let Some(item) = remove {
        state.remove_item(ItemKey {
            group: selected,
            item,
        });
    }

    // ---- Entry row ----
    ui.separator();
    let mut submit = false;
    ui.horizontal(|ui: &mut Ui| {
        for (field, text) in fields.iter().zip(state.entry.iter_mut()) {
            let response = ui.add(
                TextEdit::singleline(text)
                    .hint_text(*field)
                    .desired_width(60.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                submit = true;
            }
        }
        if ui.button("Add").clicked() {
            submit = true;
        }
    });
    if submit {
        state.submit_entry();
    }
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if let Some(hovered) = state.hovered_description() {
            ui.label(hovered);
            ui.separator();
        }
        match &state.status {
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn dialog(state: &AppState, title: &str) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new().set_title(title);
    match &state.settings.last_directory {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

pub fn open_file_dialog(state: &mut AppState) {
    let file = dialog(state, "Open stereonet data")
        .add_filter("Supported files", &["snet", "json", "txt", "csv"])
        .add_filter("Stereonet", &["snet"])
        .add_filter("Slash-separated text", &["txt", "csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn save_as_dialog(state: &mut AppState) {
    let file_name = state
        .current_file
        .as_ref()
        .and_then(|p| p.file_name())
        .map_or("Untitled.snet".to_string(), |n| n.to_string_lossy().into_owned());
    let file = dialog(state, "Save stereonet data")
        .add_filter("Stereonet", &["snet"])
        .set_file_name(file_name)
        .save_file();

    if let Some(path) = file {
        state.save_to(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = dialog(state, "Export net")
        .add_filter("SVG image", &["svg"])
        .set_file_name("stereonet.svg")
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
