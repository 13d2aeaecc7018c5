use glam::{DVec2, DVec3};
use lattice_sim::camera::Camera;
use lattice_sim::engine::PhysicsEngine;
use lattice_sim::params::SimulationParams;
use lattice_sim::simulation::{FrameInput, Simulation};
use lattice_sim::topology::{Topology, CUBE_DIAGONALS, CUBE_EDGES};

const TOLERANCE: f64 = 1e-3;

fn assert_cube_shape(positions: &[DVec3]) {
    let diagonal = 2.0 * std::f64::consts::SQRT_2;

    for &(a, b) in &CUBE_EDGES {
        let d = positions[a].distance(positions[b]);
        assert!((d - 2.0).abs() < TOLERANCE, "edge ({a}, {b}) has length {d}");
    }
    for &(a, b) in &CUBE_DIAGONALS {
        let d = positions[a].distance(positions[b]);
        assert!((d - diagonal).abs() < TOLERANCE, "diagonal ({a}, {b}) has length {d}");
    }
}

#[test]
fn cube_holds_its_shape() {
    let topology = Topology::cube(DVec3::new(0.0, 0.0, 10.0), 0.001, 0.005);
    let mut engine = PhysicsEngine::from_topology(&topology).unwrap();

    for _ in 0..1000 {
        engine.integrate_step();
    }

    assert_cube_shape(engine.positions());
}

#[test]
fn dented_cube_springs_back() {
    let topology = Topology::cube(DVec3::new(0.0, 0.0, 10.0), 0.001, 0.005);
    let mut engine = PhysicsEngine::from_topology(&topology).unwrap();
    engine.displace_point(0, DVec2::new(80.0, -40.0), 0.005).unwrap();

    for _ in 0..4000 {
        engine.integrate_step();
    }

    assert_cube_shape(engine.positions());
    assert!(engine.kinetic_energy() < 1e-10);
}

#[test]
fn drag_and_release_cycle() {
    let params = SimulationParams::default();
    let camera = Camera::new(1200, 1200, params.focal_length, params.move_delta);
    let mut simulation = Simulation::new(&params).unwrap();
    let frame = FrameInput { ticks: 1.0, ..Default::default() };

    simulation.advance(&frame, &params, &camera).unwrap();

    // Grab corner 2 where it was drawn
    let grab = simulation.projection()[2].as_dvec2();
    simulation
        .advance(&FrameInput { click: Some(grab), cursor: grab, ..frame }, &params, &camera)
        .unwrap();
    assert_eq!(simulation.mode().drag_session().map(|s| s.point), Some(2));

    // Pull it across the screen over two frames
    let held = simulation.engine().positions()[2];
    for step in 1..=2 {
        let cursor = grab + DVec2::new(20.0, -10.0) * f64::from(step);
        simulation.advance(&FrameInput { cursor, ..frame }, &params, &camera).unwrap();
    }
    let pulled = simulation.engine().positions()[2];
    assert!((pulled - held).abs_diff_eq(DVec3::new(0.2, -0.1, 0.0), 1e-9));

    // Let go; the springs take over again
    let cursor = grab + DVec2::new(40.0, -20.0);
    simulation
        .advance(&FrameInput { release: true, cursor, ..frame }, &params, &camera)
        .unwrap();
    assert!(simulation.mode().integrates());

    for _ in 0..4000 {
        simulation.advance(&FrameInput { cursor, ..frame }, &params, &camera).unwrap();
    }

    assert_cube_shape(simulation.engine().positions());
    assert_eq!(simulation.projection().len(), 8);
}
