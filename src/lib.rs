/*
 * Spring Lattice Simulation - Module Definitions
 *
 * This file defines the module structure for the lattice simulation application.
 * The physics core (engine, mode, pick, topology, simulation) has no window
 * dependency beyond colour types; the remaining modules wire it into nannou.
 */

// Re-export key components for easier access
pub use app::Model;
pub use camera::{Camera, Directions};
pub use debug::DebugInfo;
pub use engine::PhysicsEngine;
pub use error::SimError;
pub use mode::{DragSession, EulerAngles, Mode};
pub use params::SimulationParams;
pub use pick::{PickManager, Primitive};
pub use simulation::{FrameInput, Simulation};
pub use topology::{Connection, Topology};

// Define modules
pub mod app;
pub mod camera;
pub mod debug;
pub mod engine;
pub mod error;
pub mod input;
pub mod mode;
pub mod params;
pub mod pick;
pub mod renderer;
pub mod simulation;
pub mod topology;
pub mod ui;
