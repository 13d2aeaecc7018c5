/*
 * Spring Lattice Simulation
 *
 * A cube skeleton of point masses held together by springs along its edges
 * and face diagonals. The cube spins slowly in front of a pinhole camera;
 * arrow keys move it, and any corner can be grabbed and pulled with the
 * mouse. Letting go lets the springs pull the cube back into shape.
 *
 * Set RUST_LOG=info (or debug, trace) to follow what the simulation does.
 */

use lattice_sim::app::{model, update};

fn main() {
    // Initialize logging
    env_logger::builder().init();

    nannou::app(model)
        .update(update)
        .run();
}
