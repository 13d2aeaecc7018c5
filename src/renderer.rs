/*
 * Renderer Module
 *
 * This module handles the rendering of the lattice simulation.
 * It resolves every primitive against the last projection and draws it:
 * filled quads for faces, lines for springs and dots for points.
 * Quads are filled as given, with no convexity check, so a twisted face
 * draws as a bow tie.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::pick::Primitive;
use crate::ui;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(BLACK);

    // Get the window rectangle
    let window_rect = app.window_rect();
    let projection = model.simulation.projection();
    let to_window = |pixel| model.camera.screen_to_window(pixel, window_rect);

    // Nothing to draw until the first frame has been projected
    if !projection.is_empty() {
        for primitive in model.simulation.primitives() {
            match primitive.resolve(projection) {
                Some(Primitive::Point { color, at }) => {
                    draw.ellipse()
                        .xy(to_window(at))
                        .radius(model.params.point_size)
                        .color(color);
                }
                Some(Primitive::Segment { color, ends: [a, b] }) => {
                    draw.line()
                        .start(to_window(a))
                        .end(to_window(b))
                        .weight(1.0)
                        .color(color);
                }
                Some(Primitive::Quad { color, corners }) => {
                    draw.polygon()
                        .color(color)
                        .points(corners.into_iter().map(to_window));
                }
                None => {}
            }
        }
    }

    // Draw debug info
    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, model.simulation.engine().len());
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}
