/*
 * Error Module
 *
 * Contract violations raised by the physics engine and the lattice setup.
 * None of these are recoverable mid-frame: the frame loop stops on the
 * first one it sees.
 */

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("point index {index} is out of range for a lattice of {len} points")]
    InvalidIndex { index: usize, len: usize },

    #[error("point {index} is at or behind the camera plane (z = {z})")]
    DegenerateProjection { index: usize, z: f64 },

    #[error("lattice needs at least one point and one connection")]
    EmptyTopology,

    #[error("connection joins point {index} to itself")]
    DegenerateConnection { index: usize },
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
