/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains frame metrics
 * and simulation state to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Current interaction mode and the held point
 * - Kinetic energy of the lattice
 * - Rotation pivot (centroid)
 */

use std::time::Duration;

use glam::DVec3;

use crate::simulation::Simulation;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub mode: &'static str,
    pub held_point: Option<usize>,
    pub kinetic_energy: f64,
    pub centroid: DVec3,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            mode: "",
            held_point: None,
            kinetic_energy: 0.0,
            centroid: DVec3::ZERO,
        }
    }
}

impl DebugInfo {
    // Refresh the simulation-derived fields after a frame
    pub fn record(&mut self, simulation: &Simulation) {
        let mode = simulation.mode();
        self.mode = mode.label();
        self.held_point = mode.drag_session().map(|session| session.point);
        self.kinetic_energy = simulation.engine().kinetic_energy();
        self.centroid = simulation.engine().centroid();
    }

    pub fn lines(&self, point_count: usize) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Points: {}", point_count),
            format!(
                "Mode: {}{}",
                self.mode,
                self.held_point.map(|p| format!(" (point {p})")).unwrap_or_default()
            ),
            format!("Kinetic energy: {:.3e}", self.kinetic_energy),
            format!(
                "Centroid: ({:.2}, {:.2}, {:.2})",
                self.centroid.x, self.centroid.y, self.centroid.z
            ),
        ]
    }
}
