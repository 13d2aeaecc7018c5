/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

/// Buttons pressed during this UI frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiActions {
    pub reset: bool,
    pub shake: bool,
}

// Update the UI and return the button presses together with the detected parameter changes
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    point_count: usize,
) -> (UiActions, ParamChanges) {
    let mut actions = UiActions::default();

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Springs", |ui| {
                ui.add(egui::Slider::new(&mut params.stiffness, SimulationParams::get_stiffness_range()).text("Stiffness"));
                ui.add(egui::Slider::new(&mut params.damping, SimulationParams::get_damping_range()).text("Damping"));
                ui.add(egui::Slider::new(&mut params.start_offset.z, SimulationParams::get_depth_range()).text("Start Depth"));

                ui.horizontal(|ui| {
                    if ui.button("Reset Cube").clicked() {
                        actions.reset = true;
                    }
                    if ui.button("Shake").clicked() {
                        actions.shake = true;
                    }
                });
                ui.add(egui::Slider::new(&mut params.shake_magnitude, SimulationParams::get_shake_range()).text("Shake Strength"));
            });

            ui.collapsing("Idle Spin", |ui| {
                ui.add(egui::Slider::new(&mut params.base_rotation.alpha, SimulationParams::get_rotation_range()).text("X Spin"));
                ui.add(egui::Slider::new(&mut params.base_rotation.beta, SimulationParams::get_rotation_range()).text("Y Spin"));
                ui.add(egui::Slider::new(&mut params.base_rotation.gamma, SimulationParams::get_rotation_range()).text("Z Spin"));
            });

            ui.collapsing("Camera & Dragging", |ui| {
                ui.label("Move: arrow keys");
                ui.label("Drag a point: click and hold on it");
                ui.add(egui::Slider::new(&mut params.focal_length, SimulationParams::get_focal_length_range()).text("Focal Length"));
                ui.add(egui::Slider::new(&mut params.drag_scale, SimulationParams::get_drag_scale_range()).text("Drag Scale"));
                ui.add(egui::Slider::new(&mut params.pick_tolerance, SimulationParams::get_pick_tolerance_range()).text("Pick Radius (px)"));
            });

            ui.collapsing("Display", |ui| {
                ui.checkbox(&mut params.show_diagonals, "Show Face Diagonals");

                let mut highlight = params.highlighted_face.is_some();
                ui.checkbox(&mut highlight, "Fill One Face");
                if highlight {
                    let mut face = params.highlighted_face.unwrap_or(5);
                    ui.add(egui::Slider::new(&mut face, 0..=5).text("Face"));
                    params.highlighted_face = Some(face);
                } else {
                    params.highlighted_face = None;
                }

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Points: {}", point_count));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    (actions, params.detect_changes())
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    point_count: usize,
) {
    let debug_texts = debug_info.lines(point_count);

    // Create a background panel in the top-right corner, clear of the controls
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 260.0;
    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    // Draw the background panel
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + 100.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
