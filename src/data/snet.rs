use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::model::{DataGroup, DataType, GroupError, GroupStyle, NetObject, Project};

// ---------------------------------------------------------------------------
// On-disk record types
// ---------------------------------------------------------------------------

/// One group as stored in a `.snet` file:
///
/// ```json
/// {
///   "name": "bedding",
///   "enabled": true,
///   "data_type": "plane",
///   "style": { "color": "#1f77b4", "width": 2.0 },
///   "data": [ { "strike": 3.66, "dip": 1.48 } ]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
struct GroupRecord {
    name: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_type: Option<DataType>,
    #[serde(default)]
    style: GroupStyle,
    #[serde(default)]
    data: Vec<NetObject>,
}

fn default_enabled() -> bool {
    true
}

impl From<&DataGroup> for GroupRecord {
    fn from(group: &DataGroup) -> Self {
        GroupRecord {
            name: group.name.clone(),
            enabled: group.enabled,
            data_type: group.data_type(),
            style: group.style,
            data: group.net_objects().to_vec(),
        }
    }
}

impl TryFrom<GroupRecord> for DataGroup {
    type Error = GroupError;

    fn try_from(record: GroupRecord) -> Result<Self, Self::Error> {
        let mut group = DataGroup::new(record.name);
        group.enabled = record.enabled;
        group.style = record.style;
        if let Some(data_type) = record.data_type {
            group.set_data_type(data_type)?;
        }
        for netobj in record.data {
            group.add_net_object(netobj)?;
        }
        Ok(group)
    }
}

// ---------------------------------------------------------------------------
// Encoding / decoding
// ---------------------------------------------------------------------------

/// Serialize a project as pretty-printed `.snet` JSON.
pub fn encode(project: &Project) -> Result<String> {
    let records: Vec<GroupRecord> = project.groups.iter().map(GroupRecord::from).collect();
    serde_json::to_string_pretty(&records).context("serializing project")
}

/// Parse `.snet` JSON into a project. Nothing is selected afterwards.
pub fn decode(text: &str) -> Result<Project> {
    let records: Vec<GroupRecord> = serde_json::from_str(text).context("parsing .snet JSON")?;
    let groups = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let name = record.name.clone();
            DataGroup::try_from(record).with_context(|| format!("Group {i} ('{name}')"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Project::from_groups(groups))
}

pub fn load_snet(path: &Path) -> Result<Project> {
    let text = std::fs::read_to_string(path).context("reading .snet file")?;
    decode(&text)
}

/// Write the project to `path`, replacing any existing file.
pub fn save_file(path: &Path, project: &Project) -> Result<()> {
    let text = encode(project)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved {} groups to {}", project.groups.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;
    use crate::data::model::Rgb;
    use crate::geometry::{Line, Plane, Rotation};

    fn sample_project() -> Project {
        let mut lines = DataGroup::new("lineations");
        lines.add_net_object(NetObject::Line(Line::new(0.2, 3.1))).unwrap();
        lines.add_net_object(NetObject::Line(Line::new(0.1, 5.8))).unwrap();
        lines.style.color = Rgb([0xff, 0x00, 0x00]);

        let mut planes = DataGroup::new("bedding");
        planes.enabled = false;
        planes.add_net_object(NetObject::Plane(Plane::new(3.66, 1.48))).unwrap();

        let mut guides = DataGroup::new("guides");
        guides
            .add_net_object(NetObject::Rotation(Rotation::new(
                Line::new(FRAC_PI_2, 0.0),
                Line::new(FRAC_PI_4, 0.0),
            )))
            .unwrap();

        let empty = DataGroup::with_type("empty", DataType::Plane);

        Project::from_groups(vec![lines, planes, guides, empty])
    }

    #[test]
    fn save_then_load_preserves_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TestData.snet");
        let project = sample_project();

        save_file(&path, &project).unwrap();
        let loaded = load_snet(&path).unwrap();

        assert_eq!(loaded, project);
    }

    #[test]
    fn decodes_minimal_groups_with_defaults() {
        let text = r##"[
            {"name": "poles", "data": [{"plunge": 0.5, "trend": 1.0}]},
            {"name": "beds", "style": {"color": "#00ff00"}, "data": [{"strike": 1.0, "dip": 0.3}]}
        ]"##;
        let project = decode(text).unwrap();
        assert_eq!(project.groups.len(), 2);
        assert!(project.groups[0].enabled);
        assert_eq!(project.groups[0].data_type(), Some(DataType::Line));
        assert_eq!(project.groups[1].style.color, Rgb([0, 0xff, 0]));
        assert_eq!(project.groups[1].style.width, GroupStyle::default().width);
        assert_eq!(project.selected_index(), None);
    }

    #[test]
    fn mixed_group_is_rejected() {
        let text = r#"[{"name": "mixed", "data": [
            {"plunge": 0.5, "trend": 1.0},
            {"strike": 1.0, "dip": 0.3}
        ]}]"#;
        let err = decode(text).unwrap_err();
        assert!(format!("{err:#}").contains("mixed"), "{err:#}");
    }

    #[test]
    fn unknown_item_shape_is_rejected() {
        let text = r#"[{"name": "bad", "data": [{"azimuth": 1.0}]}]"#;
        assert!(decode(text).is_err());
    }

    #[test]
    fn rotation_uses_rotation_axis_key() {
        let text = encode(&sample_project()).unwrap();
        assert!(text.contains("\"rotation_axis\""));
        assert!(text.contains("\"base_line\""));
    }
}
