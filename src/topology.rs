/*
 * Topology Module
 *
 * This module defines the fixed lattice layout the simulation starts from:
 * point positions, spring connections between them, and the index lists the
 * renderer uses for dots, lines and faces.
 *
 * The reference lattice is a cube skeleton with side length 2, held together
 * by its 12 edges and 12 face diagonals.
 */

use glam::DVec3;

use crate::error::{Result, SimError};

// Cube corners, indexed by their stable column id
pub const CUBE_VERTICES: [[f64; 3]; 8] = [
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
];

pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (5, 7),
    (6, 7),
];

pub const CUBE_DIAGONALS: [(usize, usize); 12] = [
    (0, 3),
    (1, 7),
    (5, 6),
    (4, 2),
    (1, 4),
    (3, 6),
    (1, 2),
    (3, 5),
    (4, 7),
    (0, 6),
    (0, 5),
    (2, 7),
];

// Each side lists its corners in drawing order
pub const CUBE_SIDES: [[usize; 4]; 6] = [
    [0, 1, 3, 2],
    [1, 5, 7, 3],
    [0, 1, 5, 4],
    [0, 4, 6, 2],
    [2, 6, 7, 3],
    [4, 5, 7, 6],
];

pub const CUBE_EDGE_LENGTH: f64 = 2.0;

/// A spring between two points.
///
/// Connections are never deduplicated: two connections over the same pair
/// simply add their forces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub rest_length: f64,
    pub damping: f64,
    pub stiffness: f64,
}

impl Connection {
    pub fn new(a: usize, b: usize, rest_length: f64, damping: f64, stiffness: f64) -> Self {
        Self {
            a,
            b,
            rest_length,
            damping,
            stiffness,
        }
    }
}

/// Everything needed to build an engine and a pick manager.
#[derive(Clone, Debug)]
pub struct Topology {
    pub points: Vec<DVec3>,
    pub connections: Vec<Connection>,
    pub edges: Vec<(usize, usize)>,
    pub diagonals: Vec<(usize, usize)>,
    pub sides: Vec<[usize; 4]>,
}

impl Topology {
    pub fn new(points: Vec<DVec3>) -> Self {
        Self {
            points,
            connections: Vec::new(),
            edges: Vec::new(),
            diagonals: Vec::new(),
            sides: Vec::new(),
        }
    }

    // Build the reference cube, moved by `offset` so that it sits in front of the camera
    pub fn cube(offset: DVec3, stiffness: f64, damping: f64) -> Self {
        let points = CUBE_VERTICES
            .iter()
            .map(|&v| DVec3::from_array(v) + offset)
            .collect();

        let mut topology = Self::new(points);
        let diagonal_length = CUBE_EDGE_LENGTH * std::f64::consts::SQRT_2;

        for &(a, b) in &CUBE_EDGES {
            topology
                .connections
                .push(Connection::new(a, b, CUBE_EDGE_LENGTH, damping, stiffness));
        }
        for &(a, b) in &CUBE_DIAGONALS {
            topology
                .connections
                .push(Connection::new(a, b, diagonal_length, damping, stiffness));
        }

        topology.edges = CUBE_EDGES.to_vec();
        topology.diagonals = CUBE_DIAGONALS.to_vec();
        topology.sides = CUBE_SIDES.to_vec();
        topology
    }

    // Check every index reference and the non-empty requirement
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() || self.connections.is_empty() {
            return Err(SimError::EmptyTopology);
        }

        let len = self.points.len();
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(SimError::InvalidIndex { index, len })
            }
        };

        for connection in &self.connections {
            check(connection.a)?;
            check(connection.b)?;
            if connection.a == connection.b {
                return Err(SimError::DegenerateConnection { index: connection.a });
            }
        }
        for &(a, b) in self.edges.iter().chain(&self.diagonals) {
            check(a)?;
            check(b)?;
        }
        for side in &self.sides {
            side.iter().try_for_each(|&i| check(i))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_connections_start_at_rest() {
        let cube = Topology::cube(DVec3::new(0.0, 0.0, 10.0), 0.001, 0.005);
        assert_eq!(cube.points.len(), 8);
        assert_eq!(cube.connections.len(), 24);

        for c in &cube.connections {
            let length = cube.points[c.a].distance(cube.points[c.b]);
            assert!((length - c.rest_length).abs() < 1e-12, "{c:?} has length {length}");
        }
    }

    #[test]
    fn cube_sides_are_faces() {
        // Every side shares one coordinate across its four corners
        for side in CUBE_SIDES {
            let corners: Vec<DVec3> = side.iter().map(|&i| DVec3::from_array(CUBE_VERTICES[i])).collect();
            let shared = (0..3).any(|axis| corners.iter().all(|c| c[axis] == corners[0][axis]));
            assert!(shared, "side {side:?} is not planar");
        }
    }

    #[test]
    fn validate_rejects_empty_lattices() {
        let no_points = Topology::new(Vec::new());
        assert_eq!(no_points.validate(), Err(SimError::EmptyTopology));

        let no_springs = Topology::new(vec![DVec3::Z]);
        assert_eq!(no_springs.validate(), Err(SimError::EmptyTopology));
    }

    #[test]
    fn validate_rejects_bad_indices() {
        let mut topology = Topology::new(vec![DVec3::Z, DVec3::ONE]);
        topology.connections.push(Connection::new(0, 2, 1.0, 0.0, 0.1));
        assert_eq!(topology.validate(), Err(SimError::InvalidIndex { index: 2, len: 2 }));

        topology.connections[0] = Connection::new(1, 1, 1.0, 0.0, 0.1);
        assert_eq!(topology.validate(), Err(SimError::DegenerateConnection { index: 1 }));

        topology.connections[0] = Connection::new(0, 1, 1.0, 0.0, 0.1);
        topology.sides.push([0, 1, 1, 9]);
        assert_eq!(topology.validate(), Err(SimError::InvalidIndex { index: 9, len: 2 }));
    }
}
