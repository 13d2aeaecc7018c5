/*
 * Input Module
 *
 * This module handles user input events for the lattice simulation.
 * Window events only record what happened; the frame pipeline consumes the
 * recorded state once per update through `InputState::take_frame_input`.
 *
 * Features:
 * - Arrow keys move the lattice relative to the camera
 * - Left click grabs the point under the cursor, release lets go
 * - Space pauses, R rebuilds the lattice, S shakes it
 * - Handling UI interaction
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;
use crate::camera::{Camera, Directions};
use crate::simulation::FrameInput;

// Mouse state gathered between two updates, in window coordinates
#[derive(Default)]
pub struct InputState {
    pub cursor: Vec2,
    pub pending_click: Option<Vec2>,
    pub released: bool,
    pub reset_requested: bool,
    pub shake_requested: bool,
}

impl InputState {
    // Hand the pending events to the frame pipeline and clear them
    pub fn take_frame_input(&mut self, camera: &Camera, window_rect: Rect, directions: Directions, ticks: f64) -> FrameInput {
        FrameInput {
            directions,
            ticks,
            cursor: camera.window_to_screen(self.cursor, window_rect),
            click: self
                .pending_click
                .take()
                .map(|click| camera.window_to_screen(click, window_rect)),
            release: std::mem::take(&mut self.released),
        }
    }

    // A release still pending from an earlier drag is kept; the pipeline applies it before the click
    pub fn press(&mut self) {
        self.pending_click = Some(self.cursor);
    }

    pub fn release(&mut self) {
        // A press and release inside one frame never grabs anything
        if self.pending_click.take().is_none() {
            self.released = true;
        }
    }
}

// Read the arrow keys that are currently held down
pub fn held_directions(app: &App) -> Directions {
    Directions {
        up: app.keys.down.contains(&Key::Up),
        down: app.keys.down.contains(&Key::Down),
        left: app.keys.down.contains(&Key::Left),
        right: app.keys.down.contains(&Key::Right),
    }
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.input.cursor = pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        // Check if the click is on the UI before handling it
        if !model.egui.ctx().is_pointer_over_area() {
            model.input.press();
        }
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.input.release();
    }
}

// Keyboard shortcuts for the controls in the UI panel
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::R => model.input.reset_requested = true,
        Key::S => model.input.shake_requested = true,
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Pass events to egui
    model.egui.handle_raw_event(event);
}
