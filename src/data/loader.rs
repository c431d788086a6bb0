use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{DataGroup, DataType, NetObject, Project};
use super::snet;

/// Field names accepted in the header of a legacy text file.
const VALID_FIELDS: [&str; 4] = ["strike", "dip", "plunge", "trend"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a project from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.snet` / `.json` – JSON list of groups (see [`snet`])
/// * `.txt`  / `.csv`  – legacy slash-separated measurements in degrees
pub fn load_file(path: &Path) -> Result<Project> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let project = match ext.as_str() {
        "snet" | "json" => snet::load_snet(path)?,
        "txt" | "csv" => {
            let file = std::fs::File::open(path).context("opening text file")?;
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("imported");
            Project::from_groups(parse_legacy(file, name)?)
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::info!(
        "Loaded {} groups ({} measurements) from {}",
        project.groups.len(),
        project.groups.iter().map(DataGroup::len).sum::<usize>(),
        path.display()
    );
    Ok(project)
}

// ---------------------------------------------------------------------------
// Legacy text import
// ---------------------------------------------------------------------------

/// Legacy layout: a header naming the columns, then one measurement per
/// line, all separated by `/` and given in degrees:
///
/// ```text
/// strike/dip
/// 210/85
/// 030/40
/// ```
///
/// A `plunge`+`trend` pair becomes a line group and a `strike`+`dip` pair a
/// plane group. When both pairs are present each row feeds both groups.
pub fn parse_legacy(source: impl Read, name: &str) -> Result<Vec<DataGroup>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'/')
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .context("reading header line")?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();

    if let Some(unknown) = headers.iter().find(|h| !VALID_FIELDS.contains(&h.as_str())) {
        bail!("Unknown field '{unknown}', expected any of {VALID_FIELDS:?}");
    }

    let column = |field: &str| headers.iter().position(|h| h == field);
    let line_columns = column("plunge").zip(column("trend"));
    let plane_columns = column("strike").zip(column("dip"));

    let mut targets: Vec<((usize, usize), DataGroup)> = Vec::new();
    let both = line_columns.is_some() && plane_columns.is_some();
    if let Some(cols) = line_columns {
        let group_name = if both { format!("{name} (lines)") } else { name.to_string() };
        targets.push((cols, DataGroup::with_type(group_name, DataType::Line)));
    }
    if let Some(cols) = plane_columns {
        let group_name = if both { format!("{name} (planes)") } else { name.to_string() };
        targets.push((cols, DataGroup::with_type(group_name, DataType::Plane)));
    }
    if targets.is_empty() {
        bail!("Header {headers:?} has no complete plunge/trend or strike/dip pair");
    }

    // Data rows count from 1, after the header.
    for (row_no, result) in (1..).zip(reader.records()) {
        let record = result.with_context(|| format!("Row {row_no}"))?;
        let value = |col: usize| -> Result<f64> {
            let tok = record.get(col).unwrap_or("");
            let number = tok
                .parse::<f64>()
                .with_context(|| format!("Row {row_no}, {}: '{tok}' is not a number", headers[col]))?;
            if !number.is_finite() {
                bail!("Row {row_no}, {}: '{tok}' is not a finite number", headers[col]);
            }
            Ok(number)
        };

        for ((first, second), group) in &mut targets {
            let Some(data_type) = group.data_type() else {
                continue;
            };
            let netobj: Option<NetObject> = data_type.from_degrees(value(*first)?, value(*second)?);
            if let Some(netobj) = netobj {
                group.add_net_object(netobj)?;
            }
        }
    }

    Ok(targets.into_iter().map(|(_, group)| group).collect())
}
