/*
 * Pick Module
 *
 * This module holds the drawable primitives of the lattice and resolves a
 * cursor position to the point under it.
 *
 * Primitives only store point indices. They are turned into screen
 * coordinates each frame from the freshly computed projection, so they never
 * go stale when the lattice moves.
 */

use glam::IVec2;
use nannou::prelude::*;

use crate::topology::Topology;

/// A drawable shape whose corners are `P`: point indices while stored,
/// screen coordinates once resolved.
#[derive(Clone, Copy, Debug)]
pub enum Primitive<P = usize> {
    Point { color: Rgb<u8>, at: P },
    Segment { color: Rgb<u8>, ends: [P; 2] },
    Quad { color: Rgb<u8>, corners: [P; 4] },
}

impl Primitive {
    // Look up screen coordinates; `None` if an index is outside the projection
    pub fn resolve(&self, projected: &[IVec2]) -> Option<Primitive<IVec2>> {
        let at = |i: usize| projected.get(i).copied();

        Some(match *self {
            Primitive::Point { color, at: i } => Primitive::Point { color, at: at(i)? },
            Primitive::Segment { color, ends: [a, b] } => Primitive::Segment {
                color,
                ends: [at(a)?, at(b)?],
            },
            Primitive::Quad { color, corners } => Primitive::Quad {
                color,
                corners: [at(corners[0])?, at(corners[1])?, at(corners[2])?, at(corners[3])?],
            },
        })
    }
}

pub fn face_color() -> Rgb<u8> {
    rgb(252, 173, 3)
}

pub fn diagonal_color() -> Rgb<u8> {
    rgb(100, 100, 100)
}

#[derive(Clone, Debug, Default)]
pub struct PickManager {
    primitives: Vec<Primitive>,
}

impl PickManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the drawable list for a lattice.
    ///
    /// Only the side at `highlighted_face` is filled; the others stay
    /// wireframe. Faces go first so lines and dots are drawn on top.
    pub fn from_topology(topology: &Topology, highlighted_face: Option<usize>, show_diagonals: bool) -> Self {
        let mut manager = Self::new();

        if let Some(face) = highlighted_face {
            match topology.sides.get(face) {
                Some(&corners) => manager.add_quad(face_color(), corners),
                None => log::warn!("no side {face} to highlight, lattice has {}", topology.sides.len()),
            }
        }
        for &ends in &topology.edges {
            manager.add_segment(WHITE, ends);
        }
        if show_diagonals {
            for &ends in &topology.diagonals {
                manager.add_segment(diagonal_color(), ends);
            }
        }
        for i in 0..topology.points.len() {
            manager.add_point(WHITE, i);
        }

        manager
    }

    pub fn add_point(&mut self, color: Rgb<u8>, index: usize) {
        self.primitives.push(Primitive::Point { color, at: index });
    }

    pub fn add_segment(&mut self, color: Rgb<u8>, (a, b): (usize, usize)) {
        self.primitives.push(Primitive::Segment { color, ends: [a, b] });
    }

    pub fn add_quad(&mut self, color: Rgb<u8>, corners: [usize; 4]) {
        self.primitives.push(Primitive::Quad { color, corners });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Finds the point under `cursor`.
    ///
    /// Every projected point within `tolerance` pixels (inclusive) qualifies;
    /// when several do, the lowest index wins.
    ///
    /// Points very close to the camera project far off screen, up to the
    /// limits of `i32`, so distances are measured in `f64`.
    pub fn resolve_pick(cursor: IVec2, projected: &[IVec2], tolerance: u32) -> Option<usize> {
        let tolerance_sq = (tolerance as f64).powi(2);
        let cursor = cursor.as_dvec2();

        projected
            .iter()
            .position(|point| point.as_dvec2().distance_squared(cursor) <= tolerance_sq)
    }
}
