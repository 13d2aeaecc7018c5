/*
 * Simulation Module
 *
 * The simulation context owned by the frame loop. It ties the physics engine,
 * the drawable list and the interaction mode together and runs one frame of
 * the pipeline at a time:
 *
 * 1. apply a pending release (back to idle spin)
 * 2. translate the lattice by the camera movement
 * 3. rotate by the current mode's angles
 * 4. displace the dragged point, or integrate the springs
 * 5. project to screen pixels
 * 6. resolve a pending click against that projection
 *
 * A frame that fails leaves the previous projection in place and reports the
 * error to the caller; nothing from the failed frame is ever drawn.
 */

use glam::{DVec2, IVec2};
use rand::Rng;

use crate::camera::{Camera, Directions};
use crate::engine::PhysicsEngine;
use crate::error::Result;
use crate::mode::Mode;
use crate::params::SimulationParams;
use crate::pick::{PickManager, Primitive};
use crate::topology::Topology;

/// Input collected between two frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub directions: Directions,
    // Frame time in target ticks
    pub ticks: f64,
    // Cursor position in screen pixels
    pub cursor: DVec2,
    // Cursor position captured when the button went down
    pub click: Option<DVec2>,
    pub release: bool,
}

pub struct Simulation {
    topology: Topology,
    engine: PhysicsEngine,
    picks: PickManager,
    mode: Mode,
    projection: Vec<IVec2>,
}

impl Simulation {
    pub fn new(params: &SimulationParams) -> Result<Self> {
        let topology = Topology::cube(params.start_offset, params.stiffness, params.damping);
        Self::from_topology(topology, params)
    }

    pub fn from_topology(topology: Topology, params: &SimulationParams) -> Result<Self> {
        let engine = PhysicsEngine::from_topology(&topology)?;
        let picks = PickManager::from_topology(&topology, params.highlighted_face, params.show_diagonals);

        log::info!(
            "built lattice with {} points and {} connections",
            engine.len(),
            engine.connections().len()
        );

        Ok(Self {
            topology,
            engine,
            picks,
            mode: Mode::idle(params.base_rotation),
            projection: Vec::new(),
        })
    }

    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Screen pixels of every point as of the last successful frame.
    pub fn projection(&self) -> &[IVec2] {
        &self.projection
    }

    pub fn primitives(&self) -> &[Primitive] {
        self.picks.primitives()
    }

    // Rebuild the drawable list after display options changed
    pub fn rebuild_primitives(&mut self, params: &SimulationParams) {
        self.picks = PickManager::from_topology(&self.topology, params.highlighted_face, params.show_diagonals);
    }

    pub fn shake<R: Rng>(&mut self, rng: &mut R, magnitude: f64) {
        log::info!("shaking lattice by up to {magnitude}");
        self.engine.shake(rng, magnitude);
    }

    /// Runs one frame of the pipeline.
    pub fn advance(&mut self, input: &FrameInput, params: &SimulationParams, camera: &Camera) -> Result<()> {
        if input.release {
            if let Some(point) = self.mode.release(params.base_rotation) {
                log::info!("released point {point}");
            }
        } else if let Mode::IdleSpin { angles } = &mut self.mode {
            // Pick up slider edits to the idle spin
            *angles = params.base_rotation;
        }

        self.engine.translate_all(camera.movement(input.directions, input.ticks));

        if !params.pause_simulation {
            let angles = self.mode.angles();
            self.engine.apply_rotation(angles.alpha, angles.beta, angles.gamma);
        }

        if let Some(session) = self.mode.drag_session_mut() {
            let delta = session.take_delta(input.cursor);
            self.engine.displace_point(session.point, delta, params.drag_scale)?;
        } else if !params.pause_simulation {
            self.engine.integrate_step();
        }

        let projection = self.engine.project_to_screen(camera.screen_center, camera.focal_length)?;
        self.projection = projection;

        if let Some(click) = input.click {
            let cursor = click.round().as_ivec2();
            match PickManager::resolve_pick(cursor, &self.projection, params.pick_tolerance) {
                Some(point) => {
                    log::info!("grabbed point {point} at {cursor}");
                    self.mode.begin_drag(point, click);
                }
                None => log::debug!("no point within {} px of {cursor}", params.pick_tolerance),
            }
        }

        log::trace!("kinetic energy {:.3e}", self.engine.kinetic_energy());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::mode::EulerAngles;
    use glam::DVec3;

    fn setup() -> (Simulation, SimulationParams, Camera) {
        let params = SimulationParams::default();
        let camera = Camera::new(1200, 1200, params.focal_length, params.move_delta);
        let simulation = Simulation::new(&params).unwrap();
        (simulation, params, camera)
    }

    fn idle_frame() -> FrameInput {
        FrameInput { ticks: 1.0, ..Default::default() }
    }

    #[test]
    fn first_frame_projects_every_point() {
        let (mut simulation, params, camera) = setup();
        assert!(simulation.projection().is_empty());

        simulation.advance(&idle_frame(), &params, &camera).unwrap();

        assert_eq!(simulation.projection().len(), 8);
        assert!(simulation.mode().integrates());
    }

    #[test]
    fn click_on_point_starts_drag() {
        let (mut simulation, params, camera) = setup();
        simulation.advance(&idle_frame(), &params, &camera).unwrap();

        let target = simulation.projection()[3].as_dvec2();
        let click = FrameInput { click: Some(target), cursor: target, ..idle_frame() };
        simulation.advance(&click, &params, &camera).unwrap();

        assert_eq!(simulation.mode().drag_session().map(|s| s.point), Some(3));
        assert_eq!(simulation.mode().angles(), EulerAngles::ZERO);
    }

    #[test]
    fn click_on_empty_space_keeps_spinning() {
        let (mut simulation, params, camera) = setup();
        let click = FrameInput { click: Some(DVec2::new(5.0, 5.0)), ..idle_frame() };

        simulation.advance(&click, &params, &camera).unwrap();

        assert_eq!(*simulation.mode(), Mode::idle(params.base_rotation));
    }

    #[test]
    fn release_then_missed_click_drops_the_point() {
        let (mut simulation, params, camera) = setup();
        simulation.advance(&idle_frame(), &params, &camera).unwrap();

        let target = simulation.projection()[3].as_dvec2();
        let click = FrameInput { click: Some(target), cursor: target, ..idle_frame() };
        simulation.advance(&click, &params, &camera).unwrap();
        assert!(simulation.mode().is_dragging());

        // Let go, then press on empty space before the next frame
        let empty = DVec2::new(5.0, 5.0);
        let frame = FrameInput { release: true, click: Some(empty), cursor: empty, ..idle_frame() };
        simulation.advance(&frame, &params, &camera).unwrap();

        assert_eq!(*simulation.mode(), Mode::idle(params.base_rotation));
    }

    #[test]
    fn dragging_moves_only_the_held_point() {
        let (mut simulation, params, camera) = setup();
        simulation.advance(&idle_frame(), &params, &camera).unwrap();

        let target = simulation.projection()[3].as_dvec2();
        let click = FrameInput { click: Some(target), cursor: target, ..idle_frame() };
        simulation.advance(&click, &params, &camera).unwrap();

        let before = simulation.engine().positions().to_vec();
        let velocities = simulation.engine().velocities().to_vec();

        let drag = FrameInput { cursor: target + DVec2::new(20.0, -10.0), ..idle_frame() };
        simulation.advance(&drag, &params, &camera).unwrap();

        let after = simulation.engine().positions();
        let expected = before[3] + DVec3::new(20.0, -10.0, 0.0) * params.drag_scale;
        assert!(after[3].abs_diff_eq(expected, 1e-9));
        for i in (0..8).filter(|&i| i != 3) {
            assert!(after[i].abs_diff_eq(before[i], 1e-9));
        }
        // No integration while held
        assert_eq!(simulation.engine().velocities(), velocities.as_slice());
    }

    #[test]
    fn dragged_point_leaves_the_pivot_stale() {
        let (mut simulation, params, camera) = setup();
        simulation.advance(&idle_frame(), &params, &camera).unwrap();

        let target = simulation.projection()[3].as_dvec2();
        let click = FrameInput { click: Some(target), cursor: target, ..idle_frame() };
        simulation.advance(&click, &params, &camera).unwrap();

        let drag = FrameInput { cursor: target + DVec2::new(40.0, 0.0), ..idle_frame() };
        simulation.advance(&drag, &params, &camera).unwrap();

        // The pivot is the mean taken before the point moved
        let positions = simulation.engine().positions();
        let mean = positions.iter().sum::<DVec3>() / positions.len() as f64;
        let shift = DVec3::new(40.0 * params.drag_scale / positions.len() as f64, 0.0, 0.0);
        assert!(simulation.engine().centroid().abs_diff_eq(mean - shift, 1e-9));

        // The next wholesale translation catches up
        simulation.advance(&FrameInput { cursor: drag.cursor, ..idle_frame() }, &params, &camera).unwrap();
        let positions = simulation.engine().positions();
        let mean = positions.iter().sum::<DVec3>() / positions.len() as f64;
        assert!(simulation.engine().centroid().abs_diff_eq(mean, 1e-9));
    }

    #[test]
    fn release_returns_to_idle_spin() {
        let (mut simulation, params, camera) = setup();
        simulation.advance(&idle_frame(), &params, &camera).unwrap();

        let target = simulation.projection()[0].as_dvec2();
        let click = FrameInput { click: Some(target), cursor: target, ..idle_frame() };
        simulation.advance(&click, &params, &camera).unwrap();
        assert!(simulation.mode().is_dragging());

        let release = FrameInput { release: true, cursor: target, ..idle_frame() };
        simulation.advance(&release, &params, &camera).unwrap();

        assert_eq!(*simulation.mode(), Mode::idle(params.base_rotation));
    }

    #[test]
    fn pause_freezes_springs_and_spin() {
        let (mut simulation, mut params, camera) = setup();
        params.pause_simulation = true;
        let before = simulation.engine().positions().to_vec();

        simulation.advance(&idle_frame(), &params, &camera).unwrap();

        assert_eq!(simulation.engine().positions(), before.as_slice());
    }

    #[test]
    fn camera_keys_translate_the_lattice() {
        let (mut simulation, mut params, camera) = setup();
        params.pause_simulation = true;
        let centroid = simulation.engine().centroid();

        let forward = FrameInput {
            directions: Directions { up: true, ..Default::default() },
            ..idle_frame()
        };
        simulation.advance(&forward, &params, &camera).unwrap();

        assert!(simulation.engine().centroid().abs_diff_eq(centroid - DVec3::Z * 0.1, 1e-12));
    }

    #[test]
    fn moving_behind_camera_fails_without_new_projection() {
        let (mut simulation, params, camera) = setup();
        simulation.advance(&idle_frame(), &params, &camera).unwrap();
        let last_good = simulation.projection().to_vec();

        let plunge = FrameInput {
            directions: Directions { up: true, ..Default::default() },
            ticks: 200.0,
            ..Default::default()
        };
        let err = simulation.advance(&plunge, &params, &camera).unwrap_err();

        assert!(matches!(err, SimError::DegenerateProjection { .. }));
        assert_eq!(simulation.projection(), last_good.as_slice());
    }

    #[test]
    fn display_options_rebuild_primitives() {
        let (mut simulation, mut params, _) = setup();
        assert_eq!(simulation.primitives().len(), 33);

        params.show_diagonals = false;
        params.highlighted_face = None;
        simulation.rebuild_primitives(&params);

        assert_eq!(simulation.primitives().len(), 20);
    }
}
