/*
 * Application Module
 *
 * This module defines the main application model and logic for the lattice simulation.
 * It handles the initialization and the per-frame update, handing the actual
 * physics to the owned Simulation context.
 *
 * Any error from the frame pipeline stops the app: the failed frame is never
 * drawn, since its physics state can no longer be trusted.
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input::{self, InputState};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub input: InputState,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Create simulation parameters
    let params = SimulationParams::default();
    let (width, height) = params.window_size;

    // Create the main window
    let window_id = app
        .new_window()
        .title("Spring Lattice Simulation")
        .size(width, height)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .unwrap();

    // Get the window
    let window = app.window(window_id).unwrap();

    // Create the UI
    let egui = Egui::from_window(&window);

    // Create camera
    let camera = Camera::new(width, height, params.focal_length, params.move_delta);

    // The reference cube is always valid, so failing here is a programming error
    let simulation = Simulation::new(&params).unwrap_or_else(|e| panic!("failed to build lattice: {e}"));

    Model {
        simulation,
        params,
        egui,
        debug_info: DebugInfo::default(),
        camera,
        input: InputState::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Update UI and apply whatever it asks for
    let point_count = model.simulation.engine().len();
    let (actions, changes) = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info, point_count);

    if actions.reset || changes.rebuild_lattice || std::mem::take(&mut model.input.reset_requested) {
        reset_lattice(app, model);
        return;
    }
    if changes.rebuild_primitives {
        model.simulation.rebuild_primitives(&model.params);
    }
    if actions.shake || std::mem::take(&mut model.input.shake_requested) {
        model.simulation.shake(&mut rand::thread_rng(), model.params.shake_magnitude);
    }

    // Keep the camera in step with the window and the sliders
    let window_rect = app.window_rect();
    model.camera.fit_window(window_rect);
    model.camera.focal_length = model.params.focal_length;

    let frame_input = model.input.take_frame_input(
        &model.camera,
        window_rect,
        input::held_directions(app),
        model.params.ticks(update.since_last),
    );

    if let Err(e) = model.simulation.advance(&frame_input, &model.params, &model.camera) {
        log::error!("simulation stopped: {e}");
        app.quit();
        return;
    }

    model.debug_info.record(&model.simulation);
}

// Replace the lattice with a fresh one built from the current parameters
fn reset_lattice(app: &App, model: &mut Model) {
    match Simulation::new(&model.params) {
        Ok(simulation) => {
            model.simulation = simulation;
            model.input = InputState {
                cursor: model.input.cursor,
                ..Default::default()
            };
            log::info!("lattice reset");
        }
        Err(e) => {
            log::error!("could not rebuild lattice: {e}");
            app.quit();
        }
    }
}
