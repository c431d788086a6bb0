//! SVG export of the stereonet.
//!
//! The drawing mirrors the canvas: a white square, the guide net, the
//! primitive circle, then every visible group in its own style.

use std::path::Path;

use anyhow::{Context, Result};
use svg::node::element as svg_element;

use crate::data::filter::visible_items;
use crate::data::model::{GroupStyle, Project};
use crate::projection::{self, Projected, Projection};
use crate::settings::Settings;

/// Side of the exported square in SVG user units.
pub const EXPORT_SIZE: f64 = 750.0;

fn points_attr(points: &[[f64; 2]], size: f64) -> String {
    points
        .iter()
        .map(|&p| {
            let [x, y] = projection::to_screen(p, size);
            format!("{x:.2},{y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn polyline(points: &[[f64; 2]], size: f64, stroke: &str, width: f64) -> svg_element::Polyline {
    svg_element::Polyline::new()
        .set("points", points_attr(points, size))
        .set("fill", "none")
        .set("stroke", stroke)
        .set("stroke-width", width)
}

fn render_item(shape: &Projected, style: &GroupStyle, size: f64) -> Box<dyn svg::Node> {
    let color = style.color.to_string();
    match shape {
        Projected::Point(p) => {
            let [cx, cy] = projection::to_screen(*p, size);
            // Point radius follows the canvas: width scaled with the net.
            let radius = f64::from(style.width) * size / 400.0;
            Box::new(
                svg_element::Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", radius.max(1.0))
                    .set("fill", color),
            )
        }
        Projected::Curve(points) => {
            Box::new(polyline(points, size, &color, f64::from(style.width)))
        }
    }
}

/// Build the SVG document for `project` drawn in `projection`.
pub fn render_svg(
    project: &Project,
    projection: Projection,
    settings: &Settings,
    size: f64,
) -> svg::Document {
    let mut doc = svg::Document::new()
        .set("viewBox", format!("0 0 {size} {size}"))
        .set("width", size)
        .set("height", size)
        .add(
            svg_element::Rectangle::new()
                .set("width", size)
                .set("height", size)
                .set("fill", "white"),
        );

    if settings.show_guides {
        let mut guides = svg_element::Group::new().set("id", "guides");
        for guide in projection::guide_rotations(settings.guide_spacing_deg) {
            let points = projection.rotation_coordinates(&guide, settings.samples());
            guides = guides.add(polyline(&points, size, "#bebebe", 0.5));
        }
        doc = doc.add(guides);
    }

    doc = doc.add(
        svg_element::Circle::new()
            .set("cx", size / 2.0)
            .set("cy", size / 2.0)
            .set("r", size / 2.0)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1.0),
    );

    let mut data = svg_element::Group::new().set("id", "data");
    for (_, group, netobj) in visible_items(project) {
        let shape = projection.project(netobj, settings.samples());
        data = data.add(render_item(&shape, &group.style, size));
    }
    doc.add(data)
}

/// Write the stereonet to `path` as SVG.
pub fn export_svg(
    path: &Path,
    project: &Project,
    projection: Projection,
    settings: &Settings,
) -> Result<()> {
    let doc = render_svg(project, projection, settings, EXPORT_SIZE);
    svg::save(path, &doc).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} net to {}", projection.label(), path.display());
    Ok(())
}
