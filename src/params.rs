/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunable constants of the lattice simulation. These parameters can be
 * modified through the UI. It also provides methods for parameter change detection
 * so the app knows when the lattice or its drawable list has to be rebuilt.
 */

use std::time::Duration;

use glam::DVec3;

use crate::mode::EulerAngles;

// Parameters for the simulation that can be adjusted via UI
pub struct SimulationParams {
    // Spring physics
    pub stiffness: f64,
    pub damping: f64,
    pub base_rotation: EulerAngles,
    pub start_offset: DVec3,
    // Camera and interaction
    pub focal_length: f64,
    pub move_delta: f64,
    pub drag_scale: f64,
    pub pick_tolerance: u32,
    pub target_tick: Duration,
    // Drawing
    pub window_size: (u32, u32),
    pub point_size: f32,
    pub highlighted_face: Option<usize>,
    pub show_diagonals: bool,
    pub shake_magnitude: f64,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    stiffness: f64,
    damping: f64,
    start_offset: DVec3,
    highlighted_face: Option<usize>,
    show_diagonals: bool,
}

/// What a round of UI edits requires from the app.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    // Springs are fixed once built, so new constants mean a new lattice
    pub rebuild_lattice: bool,
    pub rebuild_primitives: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            stiffness: 0.001,
            damping: 0.005,
            base_rotation: EulerAngles::new(0.0004, 0.0015, 0.0003),
            start_offset: DVec3::new(0.0, 0.0, 10.0),
            focal_length: 1000.0,
            move_delta: 0.1,
            drag_scale: 0.005,
            pick_tolerance: 10,
            target_tick: Duration::from_millis(50),
            window_size: (1200, 1200),
            point_size: 6.0,
            highlighted_face: Some(5),
            show_diagonals: true,
            shake_magnitude: 0.3,
            show_debug: false,
            pause_simulation: false,
            // Initialize with no previous values
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            stiffness: self.stiffness,
            damping: self.damping,
            start_offset: self.start_offset,
            highlighted_face: self.highlighted_face,
            show_diagonals: self.show_diagonals,
        });
    }

    // Check if any parameters have changed since the last snapshot
    pub fn detect_changes(&self) -> ParamChanges {
        let mut changes = ParamChanges::default();

        // If we don't have previous values, nothing has changed
        if let Some(prev) = &self.previous_values {
            if self.stiffness != prev.stiffness
                || self.damping != prev.damping
                || self.start_offset != prev.start_offset
            {
                changes.rebuild_lattice = true;
            }

            if self.highlighted_face != prev.highlighted_face || self.show_diagonals != prev.show_diagonals {
                changes.rebuild_primitives = true;
            }
        }

        changes
    }

    // Frame time expressed in target ticks, used to scale camera movement
    pub fn ticks(&self, since_last: Duration) -> f64 {
        if self.target_tick.is_zero() {
            return 1.0;
        }
        since_last.as_secs_f64() / self.target_tick.as_secs_f64()
    }

    // Get parameter ranges for UI sliders
    pub fn get_stiffness_range() -> std::ops::RangeInclusive<f64> {
        0.0..=0.05
    }

    pub fn get_damping_range() -> std::ops::RangeInclusive<f64> {
        0.0..=0.1
    }

    pub fn get_rotation_range() -> std::ops::RangeInclusive<f64> {
        -0.02..=0.02
    }

    pub fn get_depth_range() -> std::ops::RangeInclusive<f64> {
        3.0..=40.0
    }

    pub fn get_focal_length_range() -> std::ops::RangeInclusive<f64> {
        100.0..=3000.0
    }

    pub fn get_drag_scale_range() -> std::ops::RangeInclusive<f64> {
        0.0005..=0.05
    }

    pub fn get_pick_tolerance_range() -> std::ops::RangeInclusive<u32> {
        1..=40
    }

    pub fn get_shake_range() -> std::ops::RangeInclusive<f64> {
        0.0..=1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_snapshot_means_no_changes() {
        let mut params = SimulationParams::default();
        params.stiffness = 0.5;
        assert_eq!(params.detect_changes(), ParamChanges::default());
    }

    #[test]
    fn spring_constants_rebuild_the_lattice() {
        let mut params = SimulationParams::default();
        params.take_snapshot();
        params.damping = 0.02;

        let changes = params.detect_changes();
        assert!(changes.rebuild_lattice);
        assert!(!changes.rebuild_primitives);
    }

    #[test]
    fn display_options_rebuild_primitives_only() {
        let mut params = SimulationParams::default();
        params.take_snapshot();
        params.show_diagonals = false;

        let changes = params.detect_changes();
        assert!(!changes.rebuild_lattice);
        assert!(changes.rebuild_primitives);
    }

    #[test]
    fn live_settings_need_no_rebuild() {
        let mut params = SimulationParams::default();
        params.take_snapshot();
        params.pause_simulation = true;
        params.focal_length = 1500.0;
        params.base_rotation.beta = 0.01;

        assert_eq!(params.detect_changes(), ParamChanges::default());
    }

    #[test]
    fn frame_time_is_measured_in_ticks() {
        let params = SimulationParams::default();
        assert!((params.ticks(Duration::from_millis(25)) - 0.5).abs() < 1e-12);
        assert!((params.ticks(Duration::from_millis(100)) - 2.0).abs() < 1e-12);
    }
}
