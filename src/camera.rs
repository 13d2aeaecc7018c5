/*
 * Camera Module
 *
 * This module defines the Camera struct: a fixed pinhole camera looking down
 * the +z axis. Held arrow keys move the lattice relative to it, and it
 * converts between nannou window coordinates (origin at the window centre,
 * y up) and screen pixels (origin at the top-left corner, y down), which is
 * the space the projection and picking work in.
 */

use glam::{DVec2, DVec3, IVec2};
use nannou::prelude::*;

/// Arrow keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

pub struct Camera {
    pub screen_center: DVec2,
    pub focal_length: f64,
    pub move_delta: f64,
}

impl Camera {
    pub fn new(width: u32, height: u32, focal_length: f64, move_delta: f64) -> Self {
        Self {
            screen_center: DVec2::new((width / 2) as f64, (height / 2) as f64),
            focal_length,
            move_delta,
        }
    }

    // Keep the projection centred when the window is resized
    pub fn fit_window(&mut self, window_rect: Rect) {
        self.screen_center = DVec2::new((window_rect.w() / 2.0).floor() as f64, (window_rect.h() / 2.0).floor() as f64);
    }

    /// Translation to apply to the whole lattice for the held keys.
    ///
    /// Up pushes the lattice away from the camera, down pulls it closer;
    /// left and right move the camera, so the lattice shifts the other way.
    /// `dt` is the frame time in target ticks.
    pub fn movement(&self, directions: Directions, dt: f64) -> DVec3 {
        let mut movement = DVec3::ZERO;

        if directions.up {
            movement.z -= 1.0;
        }
        if directions.down {
            movement.z += 1.0;
        }
        if directions.left {
            movement.x += 1.0;
        }
        if directions.right {
            movement.x -= 1.0;
        }

        movement * self.move_delta * dt
    }

    // Convert a point from window space to screen pixels
    pub fn window_to_screen(&self, point: Vec2, window_rect: Rect) -> DVec2 {
        DVec2::new(
            (point.x - window_rect.left()) as f64,
            (window_rect.top() - point.y) as f64,
        )
    }

    // Convert a screen pixel back to window space for drawing
    pub fn screen_to_window(&self, pixel: IVec2, window_rect: Rect) -> Point2 {
        pt2(window_rect.left() + pixel.x as f32, window_rect.top() - pixel.y as f32)
    }
}
