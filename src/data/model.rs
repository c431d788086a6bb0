use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{to_int_degrees, Line, Plane, Rotation};

// ---------------------------------------------------------------------------
// NetObject – one structural measurement
// ---------------------------------------------------------------------------

/// Anything that can be plotted on the net.
///
/// Serialized untagged: the field names (`plunge`/`trend`, `strike`/`dip`,
/// `rotation_axis`/`base_line`) identify the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetObject {
    Line(Line),
    Plane(Plane),
    Rotation(Rotation),
}

impl NetObject {
    pub fn data_type(&self) -> DataType {
        match self {
            NetObject::Line(_) => DataType::Line,
            NetObject::Plane(_) => DataType::Plane,
            NetObject::Rotation(_) => DataType::Rotation,
        }
    }

    /// The two table fields in whole degrees (plunge/trend or strike/dip).
    pub fn field_degrees(&self) -> Option<[i64; 2]> {
        match self {
            NetObject::Line(l) => Some([to_int_degrees(l.plunge), to_int_degrees(l.trend)]),
            NetObject::Plane(p) => Some([to_int_degrees(p.strike), to_int_degrees(p.dip)]),
            NetObject::Rotation(_) => None,
        }
    }
}

impl fmt::Display for NetObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetObject::Line(l) => write!(f, "{l}"),
            NetObject::Plane(p) => write!(f, "{p}"),
            NetObject::Rotation(r) => write!(f, "{r}"),
        }
    }
}

// ---------------------------------------------------------------------------
// DataType – what a group holds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Line,
    Plane,
    Rotation,
}

impl DataType {
    /// Types a user can pick for a group and type in by hand.
    pub const ENTERABLE: [DataType; 2] = [DataType::Line, DataType::Plane];

    /// Column names for the two entry fields, in entry order.
    pub fn field_names(self) -> Option<[&'static str; 2]> {
        match self {
            DataType::Line => Some(["Plunge", "Trend"]),
            DataType::Plane => Some(["Strike", "Dip"]),
            DataType::Rotation => None,
        }
    }

    /// Build a net object of this type from two values in degrees.
    pub fn from_degrees(self, first: f64, second: f64) -> Option<NetObject> {
        let (first, second) = (first.to_radians(), second.to_radians());
        match self {
            DataType::Line => Some(NetObject::Line(Line::new(first, second))),
            DataType::Plane => Some(NetObject::Plane(Plane::new(first, second))),
            DataType::Rotation => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Line => "Line",
            DataType::Plane => "Plane",
            DataType::Rotation => "Rotation",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Group style
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
#[error("invalid colour '{0}', expected #rrggbb")]
pub struct ColorParseError(String);

/// An sRGB colour, stored in files as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// How a group is drawn: colour plus stroke width (point radius for lines).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupStyle {
    pub color: Rgb,
    pub width: f32,
}

impl Default for GroupStyle {
    fn default() -> Self {
        Self {
            color: Rgb([0x1f, 0x77, 0xb4]),
            width: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// DataGroup – measurements of a single type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum GroupError {
    #[error("expected a {expected}, but got a {found}")]
    TypeMismatch { expected: DataType, found: DataType },

    #[error("cannot change a group of {current} data to {requested} while it holds data")]
    TypeLocked {
        current: DataType,
        requested: DataType,
    },

    #[error("no item at index {0}")]
    IndexOutOfRange(usize),

    #[error("no group selected")]
    NoGroupSelected,
}

/// A named collection of measurements sharing one [`DataType`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataGroup {
    pub name: String,
    /// Whether the group is drawn.
    pub enabled: bool,
    pub style: GroupStyle,
    data_type: Option<DataType>,
    data: Vec<NetObject>,
}

impl DataGroup {
    /// An empty, untyped, visible group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            style: GroupStyle::default(),
            data_type: None,
            data: Vec::new(),
        }
    }

    pub fn with_type(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            ..Self::new(name)
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    /// Change the type. Only allowed while the group is empty, or when the
    /// type does not actually change.
    pub fn set_data_type(&mut self, data_type: DataType) -> Result<(), GroupError> {
        match self.data_type {
            Some(current) if current != data_type && !self.data.is_empty() => {
                Err(GroupError::TypeLocked {
                    current,
                    requested: data_type,
                })
            }
            _ => {
                self.data_type = Some(data_type);
                Ok(())
            }
        }
    }

    /// Append a measurement. The first item fixes the type of an untyped
    /// group.
    pub fn add_net_object(&mut self, netobj: NetObject) -> Result<(), GroupError> {
        let found = netobj.data_type();
        match self.data_type {
            Some(expected) if expected != found => {
                Err(GroupError::TypeMismatch { expected, found })
            }
            _ => {
                self.data_type = Some(found);
                self.data.push(netobj);
                Ok(())
            }
        }
    }

    pub fn remove_net_object(&mut self, index: usize) -> Result<NetObject, GroupError> {
        if index >= self.data.len() {
            return Err(GroupError::IndexOutOfRange(index));
        }
        Ok(self.data.remove(index))
    }

    pub fn net_objects(&self) -> &[NetObject] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Project – the whole document
// ---------------------------------------------------------------------------

/// The ordered groups of a `.snet` document plus the selected one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub groups: Vec<DataGroup>,
    selected: Option<usize>,
    new_group_counter: usize,
}

impl Project {
    pub fn from_groups(groups: Vec<DataGroup>) -> Self {
        Self {
            groups,
            ..Self::default()
        }
    }

    /// Append a group and return its index.
    pub fn add_group(&mut self, group: DataGroup) -> usize {
        self.groups.push(group);
        self.groups.len() - 1
    }

    /// Append a group, select it and return its index.
    pub fn add_selected_group(&mut self, group: DataGroup) -> usize {
        let index = self.add_group(group);
        self.selected = Some(index);
        index
    }

    /// Append an empty group named `New group #n` and select it.
    pub fn new_group(&mut self) -> usize {
        self.new_group_counter += 1;
        let name = format!("New group #{}", self.new_group_counter);
        self.add_selected_group(DataGroup::new(name))
    }

    /// Remove the group at `index`, keeping the selection on the same group
    /// when it survives.
    pub fn remove_group(&mut self, index: usize) -> Result<DataGroup, GroupError> {
        if index >= self.groups.len() {
            return Err(GroupError::IndexOutOfRange(index));
        }
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        Ok(self.groups.remove(index))
    }

    pub fn remove_selected_group(&mut self) -> Result<DataGroup, GroupError> {
        let index = self.selected.ok_or(GroupError::NoGroupSelected)?;
        self.remove_group(index)
    }

    pub fn select_group(&mut self, index: usize) -> Result<(), GroupError> {
        if index >= self.groups.len() {
            return Err(GroupError::IndexOutOfRange(index));
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_group(&self) -> Option<&DataGroup> {
        self.selected.and_then(|i| self.groups.get(i))
    }

    pub fn selected_group_mut(&mut self) -> Option<&mut DataGroup> {
        self.selected.and_then(|i| self.groups.get_mut(i))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use super::*;

    fn line() -> NetObject {
        NetObject::Line(Line::new(FRAC_PI_4, 0.0))
    }

    fn plane() -> NetObject {
        NetObject::Plane(Plane::new(0.0, FRAC_PI_4))
    }

    #[test]
    fn first_item_fixes_group_type() {
        let mut group = DataGroup::new("g");
        assert_eq!(group.data_type(), None);
        group.add_net_object(line()).unwrap();
        assert_eq!(group.data_type(), Some(DataType::Line));
        assert_eq!(
            group.add_net_object(plane()),
            Err(GroupError::TypeMismatch {
                expected: DataType::Line,
                found: DataType::Plane
            })
        );
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn type_is_locked_once_group_holds_data() {
        let mut group = DataGroup::with_type("g", DataType::Plane);
        group.set_data_type(DataType::Line).unwrap();
        group.add_net_object(line()).unwrap();
        assert!(group.set_data_type(DataType::Line).is_ok());
        assert_eq!(
            group.set_data_type(DataType::Plane),
            Err(GroupError::TypeLocked {
                current: DataType::Line,
                requested: DataType::Plane
            })
        );

        group.remove_net_object(0).unwrap();
        assert!(group.set_data_type(DataType::Plane).is_ok());
    }

    #[test]
    fn removing_missing_item_fails() {
        let mut group = DataGroup::new("g");
        assert_eq!(group.remove_net_object(0), Err(GroupError::IndexOutOfRange(0)));
    }

    #[test]
    fn new_groups_are_numbered_and_selected() {
        let mut project = Project::default();
        project.new_group();
        let second = project.new_group();
        assert_eq!(project.groups[0].name, "New group #1");
        assert_eq!(project.groups[1].name, "New group #2");
        assert_eq!(project.selected_index(), Some(second));
    }

    #[test]
    fn removing_groups_keeps_selection_consistent() {
        let mut project = Project::default();
        project.new_group();
        project.new_group();
        project.new_group();

        project.select_group(2).unwrap();
        project.remove_group(0).unwrap();
        assert_eq!(project.selected_group().map(|g| g.name.as_str()), Some("New group #3"));

        project.remove_selected_group().unwrap();
        assert_eq!(project.selected_index(), None);
        assert_eq!(project.remove_selected_group(), Err(GroupError::NoGroupSelected));
        assert_eq!(project.groups.len(), 1);
    }

    #[test]
    fn added_selected_group_becomes_current() {
        let mut project = Project::default();
        project.new_group();
        let index = project.add_selected_group(DataGroup::new("poles"));
        assert_eq!(index, 1);
        assert_eq!(project.selected_group().map(|g| g.name.as_str()), Some("poles"));
    }

    #[test]
    fn selecting_out_of_range_fails() {
        let mut project = Project::default();
        assert_eq!(project.select_group(0), Err(GroupError::IndexOutOfRange(0)));
    }

    #[test]
    fn rgb_parses_and_prints_hex() {
        let color: Rgb = "#1F77b4".parse().unwrap();
        assert_eq!(color, Rgb([0x1f, 0x77, 0xb4]));
        assert_eq!(color.to_string(), "#1f77b4");
        assert!("1f77b4".parse::<Rgb>().is_err());
        assert!("#1f77".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn degrees_entry_builds_typed_objects() {
        let obj = DataType::Plane.from_degrees(210.0, 85.0).unwrap();
        assert_eq!(obj.field_degrees(), Some([210, 85]));
        assert_eq!(obj.to_string(), "210/85");
        assert_eq!(DataType::Rotation.from_degrees(0.0, 0.0), None);
    }
}
