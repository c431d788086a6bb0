use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::{to_color32, GUIDE_COLOR};
use crate::data::filter::{visible_items, ItemKey};
use crate::projection::{self, nearest_within, Projected, Projection};
use crate::state::AppState;

/// Pointer distance, in net radii, within which an item counts as hovered.
const HOVER_TOLERANCE: f64 = 0.03;

/// Extra width given to the hovered item.
const HOVER_BOOST: f32 = 1.5;

struct Shape<'a> {
    key: ItemKey,
    name: &'a str,
    color: Color32,
    width: f32,
    projected: Projected,
}

// ---------------------------------------------------------------------------
// Stereonet canvas (central panel)
// ---------------------------------------------------------------------------

/// Projection tabs above the net.
pub fn projection_tabs(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for projection in Projection::ALL {
            ui.selectable_value(&mut state.settings.projection, projection, projection.label());
        }
    });
}

/// Render the net and update the hovered item.
pub fn stereonet_plot(ui: &mut Ui, state: &mut AppState) {
    let settings = &state.settings;
    let projection = settings.projection;
    let samples = settings.samples();

    let shapes: Vec<Shape<'_>> = visible_items(&state.project)
        .into_iter()
        .map(|(key, group, netobj)| Shape {
            key,
            name: &group.name,
            color: to_color32(group.style.color),
            width: group.style.width,
            projected: projection.project(netobj, samples),
        })
        .collect();

    let guides: Vec<Vec<[f64; 2]>> = if settings.show_guides {
        projection::guide_rotations(settings.guide_spacing_deg)
            .iter()
            .map(|guide| projection.rotation_coordinates(guide, samples))
            .collect()
    } else {
        Vec::new()
    };

    let hovered = state.hovered;

    let response = Plot::new("stereonet")
        .legend(Legend::default())
        .data_aspect(1.0)
        .view_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.05)
        .include_x(1.05)
        .include_y(-1.05)
        .include_y(1.05)
        .show(ui, |plot_ui| {
            for guide in &guides {
                plot_ui.line(
                    Line::new(PlotPoints::from(guide.clone()))
                        .color(GUIDE_COLOR)
                        .width(0.5),
                );
            }
            plot_ui.line(
                Line::new(PlotPoints::from(projection::primitive_circle(360)))
                    .color(Color32::BLACK)
                    .width(1.0),
            );

            for shape in &shapes {
                let width = if hovered == Some(shape.key) {
                    shape.width + HOVER_BOOST
                } else {
                    shape.width
                };
                match &shape.projected {
                    Projected::Point(p) => plot_ui.points(
                        Points::new(PlotPoints::from(vec![*p]))
                            .name(shape.name)
                            .color(shape.color)
                            .radius(width * 1.5),
                    ),
                    Projected::Curve(points) => plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .name(shape.name)
                            .color(shape.color)
                            .width(width),
                    ),
                }
            }

            plot_ui.pointer_coordinate()
        });

    let hovered = response.inner.and_then(|pointer| {
        nearest_within(
            shapes.iter().map(|shape| (shape.key, &shape.projected)),
            [pointer.x, pointer.y],
            HOVER_TOLERANCE,
        )
    });
    state.hovered = hovered;
}
