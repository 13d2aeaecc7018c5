/*
 * Physics Engine Module
 *
 * This module owns the 3D state of the lattice: point positions, per-point
 * velocities, spring connections and the rotation pivot (centroid).
 *
 * Each step sums spring and damping forces into an accumulator, adds the
 * accumulator to the velocities and the velocities to the positions
 * (semi-implicit Euler). There is no explicit mass or timestep: both are
 * folded into the stiffness and damping constants.
 *
 * The centroid is only refreshed by whole-lattice moves (`translate_all` and
 * `shake`). Integration and point drags leave it where it was, so rotation
 * can pivot around a stale point after the lattice has contracted or been
 * pulled.
 */

use glam::{DMat3, DVec2, DVec3, IVec2};
use rand::Rng;

use crate::error::{Result, SimError};
use crate::topology::{Connection, Topology};

#[derive(Clone, Debug)]
pub struct PhysicsEngine {
    positions: Vec<DVec3>,
    velocities: Vec<DVec3>,
    connections: Vec<Connection>,
    centroid: DVec3,
    // Reused by every step so integration never allocates
    forces: Vec<DVec3>,
}

impl PhysicsEngine {
    pub fn new(positions: Vec<DVec3>, connections: Vec<Connection>) -> Result<Self> {
        let mut topology = Topology::new(positions);
        topology.connections = connections;
        Self::from_topology(&topology)
    }

    pub fn from_topology(topology: &Topology) -> Result<Self> {
        topology.validate()?;

        let positions = topology.points.clone();
        let len = positions.len();

        Ok(Self {
            centroid: mean(&positions),
            positions,
            velocities: vec![DVec3::ZERO; len],
            connections: topology.connections.clone(),
            forces: vec![DVec3::ZERO; len],
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[DVec3] {
        &self.velocities
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn centroid(&self) -> DVec3 {
        self.centroid
    }

    /// Moves every point by `delta` and recomputes the centroid.
    pub fn translate_all(&mut self, delta: DVec3) {
        for position in &mut self.positions {
            *position += delta;
        }
        self.centroid = mean(&self.positions);
    }

    /// Moves one point within the camera-facing plane.
    ///
    /// The z component of the displacement is always zero, and the centroid
    /// is left untouched.
    pub fn displace_point(&mut self, index: usize, delta_xy: DVec2, scale: f64) -> Result<()> {
        let len = self.positions.len();
        let position = self
            .positions
            .get_mut(index)
            .ok_or(SimError::InvalidIndex { index, len })?;

        *position += delta_xy.extend(0.0) * scale;
        Ok(())
    }

    /// Advances the spring system by one step.
    ///
    /// Damping is subtracted once per connection an endpoint takes part in,
    /// so well-connected points are damped harder than loosely connected
    /// ones.
    pub fn integrate_step(&mut self) {
        self.forces.fill(DVec3::ZERO);

        for connection in &self.connections {
            let (a, b) = (connection.a, connection.b);

            // Spring force, scaled by the full separation vector
            let separation = self.positions[a] - self.positions[b];
            let stretch = separation.length() - connection.rest_length;
            let spring = separation * stretch * connection.stiffness;
            self.forces[a] -= spring;
            self.forces[b] += spring;

            // Linear drag on both endpoints
            self.forces[a] -= connection.damping * self.velocities[a];
            self.forces[b] -= connection.damping * self.velocities[b];
        }

        for ((position, velocity), force) in self
            .positions
            .iter_mut()
            .zip(&mut self.velocities)
            .zip(&self.forces)
        {
            *velocity += *force;
            *position += *velocity;
        }
    }

    /// Rotates the lattice about the last computed centroid.
    pub fn apply_rotation(&mut self, alpha: f64, beta: f64, gamma: f64) {
        let rotation = rotation_matrix(alpha, beta, gamma);
        let pivot = self.centroid;

        for position in &mut self.positions {
            *position = rotation * (*position - pivot) + pivot;
        }
    }

    /// Pinhole projection along the z axis, rounded to whole pixels.
    ///
    /// Every point must sit strictly in front of the camera.
    pub fn project_to_screen(&self, screen_center: DVec2, focal_length: f64) -> Result<Vec<IVec2>> {
        self.positions
            .iter()
            .enumerate()
            .map(|(index, position)| {
                // Also rejects NaN depths
                if !(position.z > 0.0) {
                    return Err(SimError::DegenerateProjection { index, z: position.z });
                }

                let projected = screen_center + focal_length / position.z * position.truncate();
                Ok(IVec2::new(
                    projected.x.round_ties_even() as i32,
                    projected.y.round_ties_even() as i32,
                ))
            })
            .collect()
    }

    // Sum of squared velocities
    pub fn kinetic_energy(&self) -> f64 {
        self.velocities.iter().map(|v| v.length_squared()).sum()
    }

    /// Jolts every point by a random offset in `[-magnitude, magnitude]` per axis.
    pub fn shake<R: Rng>(&mut self, rng: &mut R, magnitude: f64) {
        let magnitude = magnitude.abs();
        for position in &mut self.positions {
            *position += DVec3::new(
                rng.gen_range(-magnitude..=magnitude),
                rng.gen_range(-magnitude..=magnitude),
                rng.gen_range(-magnitude..=magnitude),
            );
        }
        self.centroid = mean(&self.positions);
    }
}

/// Combined rotation `Rx * Ry * Rz`.
///
/// Positive angles turn the lattice clockwise when looking down each axis
/// towards the origin.
pub fn rotation_matrix(alpha: f64, beta: f64, gamma: f64) -> DMat3 {
    DMat3::from_rotation_x(-alpha) * DMat3::from_rotation_y(-beta) * DMat3::from_rotation_z(-gamma)
}

fn mean(points: &[DVec3]) -> DVec3 {
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}
