use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::analysis::{self, Fold};
use crate::color::style_for_group;
use crate::data::filter::{self, ItemKey};
use crate::data::model::{DataGroup, DataType, GroupError, Project};
use crate::data::{loader, snet};
use crate::export;
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Groups of the open document.
    pub project: Project,

    /// Persisted preferences.
    pub settings: Settings,

    /// Path the document was opened from or last saved to.
    pub current_file: Option<PathBuf>,

    /// Status / error message shown in the status bar.
    pub status: Option<Status>,

    /// Measurement under the pointer on the canvas.
    pub hovered: Option<ItemKey>,

    /// Text of the two data-entry fields.
    pub entry: [String; 2],
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            project: Project::default(),
            settings,
            current_file: None,
            status: None,
            hovered: None,
            entry: Default::default(),
        }
    }

    fn info(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::info!("{msg}");
        self.status = Some(Status::Info(msg));
    }

    fn error(&mut self, context: &str, err: impl Display) {
        let msg = format!("{context}: {err:#}");
        log::error!("{msg}");
        self.status = Some(Status::Error(msg));
    }

    fn remember_directory(&mut self, path: &Path) {
        if let Some(dir) = path.parent() {
            self.settings.last_directory = Some(dir.to_path_buf());
        }
    }

    // ---- File operations ----

    /// Discard the current document.
    pub fn new_file(&mut self) {
        self.project.clear();
        self.current_file = None;
        self.hovered = None;
        self.info("New file");
    }

    /// Replace the document with the contents of `path`.
    ///
    /// On failure the current document is kept.
    pub fn open_path(&mut self, path: &Path) {
        self.remember_directory(path);
        match loader::load_file(path) {
            Ok(project) => {
                self.project = project;
                self.hovered = None;
                // Legacy imports are not .snet; saving must ask for a name.
                self.current_file = is_snet(path).then(|| path.to_path_buf());
                self.info(format!("Opened file {}.", path.display()));
            }
            Err(e) => self.error(&format!("Failed to open {}", path.display()), e),
        }
    }

    /// Save to `path` and make it the current file.
    pub fn save_to(&mut self, path: &Path) {
        self.remember_directory(path);
        match snet::save_file(path, &self.project) {
            Ok(()) => {
                self.current_file = Some(path.to_path_buf());
                self.status = Some(Status::Info(format!("Saved file {}.", path.display())));
            }
            Err(e) => self.error(&format!("Failed to save {}", path.display()), e),
        }
    }

    pub fn export_to(&mut self, path: &Path) {
        self.remember_directory(path);
        match export::export_svg(path, &self.project, self.settings.projection, &self.settings) {
            Ok(()) => {
                self.status = Some(Status::Info(format!("Exported {}.", path.display())));
            }
            Err(e) => self.error("Export failed", e),
        }
    }

    // ---- Groups ----

    /// Add an empty group, coloured by its position, and select it.
    pub fn add_group(&mut self) {
        let index = self.project.new_group();
        self.project.groups[index].style = style_for_group(index);
        log::debug!("Added group {}", self.project.groups[index].name);
    }

    /// Append a derived group (poles, fold planes, ...) and select it.
    fn push_group(&mut self, mut group: DataGroup) -> usize {
        group.style = style_for_group(self.project.groups.len());
        self.project.add_selected_group(group)
    }

    pub fn remove_group(&mut self, index: usize) {
        self.hovered = None;
        match self.project.remove_group(index) {
            Ok(group) => log::debug!("Removed group {}", group.name),
            Err(e) => self.error("Cannot remove group", e),
        }
    }

    pub fn remove_current_group(&mut self) {
        self.hovered = None;
        match self.project.remove_selected_group() {
            Ok(group) => self.info(format!("Removed group {}", group.name)),
            Err(e) => self.error("Cannot remove group", e),
        }
    }

    pub fn select_group(&mut self, index: usize) {
        if let Err(e) = self.project.select_group(index) {
            self.error("Cannot select group", e);
        }
    }

    /// Change the type of the selected group.
    pub fn set_selected_type(&mut self, data_type: DataType) {
        let result = match self.project.selected_group_mut() {
            Some(group) => group.set_data_type(data_type),
            None => Err(GroupError::NoGroupSelected),
        };
        if let Err(e) = result {
            self.error("Cannot change group type", e);
        }
    }

    // ---- Data entry ----

    /// Parse the entry fields as degrees and append the measurement to the
    /// selected group. Fields are cleared on success.
    pub fn submit_entry(&mut self) {
        let parsed: Result<Vec<f64>, _> =
            self.entry.iter().map(|s| s.trim().parse::<f64>()).collect();
        let values = match parsed {
            Ok(values) => values,
            Err(e) => {
                self.error("Invalid number", e);
                return;
            }
        };
        // NaN and infinities parse, but cannot be written to a .snet file.
        if let Some(text) = self
            .entry
            .iter()
            .zip(&values)
            .find(|(_, value)| !value.is_finite())
            .map(|(text, _)| text.trim().to_string())
        {
            self.error("Invalid number", format!("'{text}' is not a finite number"));
            return;
        }

        let Some(group) = self.project.selected_group_mut() else {
            self.error("Cannot add data", GroupError::NoGroupSelected);
            return;
        };
        let Some(data_type) = group.data_type() else {
            self.error("Cannot add data", "choose a group type first");
            return;
        };
        let Some(netobj) = data_type.from_degrees(values[0], values[1]) else {
            self.error("Cannot add data", format!("{data_type} data cannot be typed in"));
            return;
        };

        match group.add_net_object(netobj) {
            Ok(()) => {
                log::debug!("Added {netobj} to {}", group.name);
                self.entry = Default::default();
                self.status = None;
            }
            Err(e) => self.error("Cannot add data", e),
        }
    }

    pub fn remove_item(&mut self, key: ItemKey) {
        self.hovered = None;
        let result = match self.project.groups.get_mut(key.group) {
            Some(group) => group.remove_net_object(key.item).map(|_| ()),
            None => Err(GroupError::IndexOutOfRange(key.group)),
        };
        if let Err(e) = result {
            self.error("Cannot remove item", e);
        }
    }

    // ---- Analysis ----

    fn derive_from_selected(
        &mut self,
        what: &str,
        derive: impl FnOnce(&DataGroup) -> Result<DataGroup, analysis::AnalysisError>,
    ) {
        let Some(group) = self.project.selected_group() else {
            self.error(what, GroupError::NoGroupSelected);
            return;
        };
        match derive(group) {
            Ok(derived) => {
                let name = derived.name.clone();
                self.push_group(derived);
                self.info(format!("Created group {name}"));
            }
            Err(e) => self.error(what, e),
        }
    }

    pub fn planes_to_poles(&mut self) {
        self.derive_from_selected("Cannot compute poles", analysis::planes_to_poles);
    }

    pub fn poles_to_planes(&mut self) {
        self.derive_from_selected("Cannot compute planes", analysis::poles_to_planes);
    }

    /// Fit a fold to the selected group and add the fold planes and axis.
    pub fn fit_fold(&mut self) {
        let Some(group) = self.project.selected_group() else {
            self.error("Cannot fit fold", GroupError::NoGroupSelected);
            return;
        };
        let fitted = Fold::new(group.net_objects(), self.settings.top_limb_proportion)
            .and_then(|fold| fold.to_groups(&group.name));
        match fitted {
            Ok((planes, axis)) => {
                let msg = format!(
                    "Fold axis {}, profile {}",
                    axis.net_objects()[0],
                    planes.net_objects()[0]
                );
                self.push_group(planes);
                self.push_group(axis);
                self.info(msg);
            }
            Err(e) => self.error("Cannot fit fold", e),
        }
    }

    // ---- Hover ----

    /// Description of the hovered measurement for the status bar.
    pub fn hovered_description(&self) -> Option<String> {
        let key = self.hovered?;
        let netobj = filter::item(&self.project, key)?;
        let group = &self.project.groups[key.group];
        Some(format!("{}: {netobj}", group.name))
    }

    /// Window title: file name, if any.
    pub fn title(&self) -> String {
        match &self.current_file {
            Some(path) => format!(
                "Stereonet – {}",
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            ),
            None => "Stereonet".to_string(),
        }
    }
}

fn is_snet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("snet") || e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::NetObject;
    use crate::geometry::Plane;

    fn state() -> AppState {
        AppState::new(Settings::default())
    }

    fn typed_group(state: &mut AppState, data_type: DataType) {
        state.add_group();
        state.set_selected_type(data_type);
    }

    fn enter(state: &mut AppState, a: &str, b: &str) {
        state.entry = [a.to_string(), b.to_string()];
        state.submit_entry();
    }

    fn is_error(state: &AppState) -> bool {
        matches!(state.status, Some(Status::Error(_)))
    }

    #[test]
    fn entry_adds_to_selected_group_and_clears_fields() {
        let mut state = state();
        typed_group(&mut state, DataType::Plane);
        enter(&mut state, "210", " 85 ");

        let group = state.project.selected_group().unwrap();
        assert_eq!(group.net_objects()[0].field_degrees(), Some([210, 85]));
        assert_eq!(state.entry, [String::new(), String::new()]);
        assert!(!is_error(&state));
    }

    #[test]
    fn bad_entry_keeps_fields_and_reports() {
        let mut state = state();
        typed_group(&mut state, DataType::Line);
        enter(&mut state, "ten", "20");
        assert!(is_error(&state));
        assert_eq!(state.entry[0], "ten");
        assert!(state.project.selected_group().unwrap().is_empty());
    }

    #[test]
    fn non_finite_entry_is_rejected() {
        let mut state = state();
        typed_group(&mut state, DataType::Line);
        enter(&mut state, "NaN", "10");
        assert!(is_error(&state));
        enter(&mut state, "10", "inf");
        assert!(is_error(&state));
        assert_eq!(state.entry[1], "inf");
        assert!(state.project.selected_group().unwrap().is_empty());
    }

    #[test]
    fn entry_needs_selected_typed_group() {
        let mut state = state();
        enter(&mut state, "10", "20");
        assert!(is_error(&state));

        state.add_group();
        enter(&mut state, "10", "20");
        assert!(is_error(&state));
    }

    #[test]
    fn group_type_locks_after_entry() {
        let mut state = state();
        typed_group(&mut state, DataType::Line);
        enter(&mut state, "10", "180");
        state.set_selected_type(DataType::Plane);
        assert!(is_error(&state));
        assert_eq!(
            state.project.selected_group().unwrap().data_type(),
            Some(DataType::Line)
        );
    }

    #[test]
    fn selection_follows_radio_choice() {
        let mut state = state();
        state.add_group();
        state.add_group();
        state.select_group(0);
        assert_eq!(state.project.selected_index(), Some(0));

        state.remove_current_group();
        assert_eq!(state.project.selected_index(), None);
        assert_eq!(state.project.groups.len(), 1);

        state.remove_current_group();
        assert!(is_error(&state));
    }

    #[test]
    fn poles_group_is_created_and_selected() {
        let mut state = state();
        typed_group(&mut state, DataType::Plane);
        enter(&mut state, "30", "40");
        state.planes_to_poles();

        assert_eq!(state.project.groups.len(), 2);
        let poles = state.project.selected_group().unwrap();
        assert_eq!(poles.name, "New group #1 (poles)");
        assert_eq!(poles.data_type(), Some(DataType::Line));
    }

    #[test]
    fn fold_fit_adds_two_groups() {
        let mut state = state();
        typed_group(&mut state, DataType::Plane);
        for (strike, dip) in [("180", "60"), ("180", "30"), ("0", "30"), ("0", "60")] {
            enter(&mut state, strike, dip);
        }
        state.fit_fold();
        assert!(!is_error(&state), "{:?}", state.status);
        assert_eq!(state.project.groups.len(), 3);
    }

    #[test]
    fn hover_description_names_group_and_item() {
        let mut state = state();
        state.add_group();
        state
            .project
            .selected_group_mut()
            .unwrap()
            .add_net_object(NetObject::Plane(Plane::new(0.0, 0.5)))
            .unwrap();
        state.hovered = Some(ItemKey { group: 0, item: 0 });
        assert_eq!(state.hovered_description().as_deref(), Some("New group #1: 000/29"));

        state.remove_item(ItemKey { group: 0, item: 0 });
        assert_eq!(state.hovered_description(), None);
    }

    #[test]
    fn open_save_round_trip_tracks_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TestData.snet");

        let mut state = state();
        typed_group(&mut state, DataType::Line);
        enter(&mut state, "10", "180");
        state.save_to(&path);
        assert_eq!(state.current_file.as_deref(), Some(path.as_path()));
        assert_eq!(state.settings.last_directory.as_deref(), Some(dir.path()));

        let mut reopened = AppState::new(Settings::default());
        reopened.open_path(&path);
        assert_eq!(reopened.project.groups, state.project.groups);
        assert_eq!(reopened.title(), "Stereonet – TestData.snet");

        reopened.open_path(&dir.path().join("missing.snet"));
        assert!(is_error(&reopened));
        assert_eq!(reopened.project.groups.len(), 1);
    }
}
