/*
 * Mode Module
 *
 * The per-frame interaction mode of the simulation. The lattice either spins
 * freely under its own spring forces, or one of its points is held by the
 * cursor. The mode decides which rotation angles are applied each frame and
 * whether integration runs.
 */

use glam::DVec2;

/// Per-frame rotation increments about the x, y and z axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerAngles {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl EulerAngles {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// A point held by the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub point: usize,
    // Cursor position (screen pixels) at the previous drag update
    pub last_cursor: DVec2,
}

impl DragSession {
    pub fn new(point: usize, cursor: DVec2) -> Self {
        Self { point, last_cursor: cursor }
    }

    // Cursor movement since the previous call, in screen pixels
    pub fn take_delta(&mut self, cursor: DVec2) -> DVec2 {
        let delta = cursor - self.last_cursor;
        self.last_cursor = cursor;
        delta
    }
}

/// Interaction state of the lattice.
///
/// Both states share one centroid policy: the rotation pivot is refreshed
/// only by wholesale moves (`translate_all` and `shake`). Spring contraction
/// and a held point moving with the cursor leave it stale until the next
/// frame's translation, so it carries no per-state field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// Springs integrate and the lattice turns by `angles` every frame.
    IdleSpin { angles: EulerAngles },
    /// Integration is suspended and the rotation is forced to zero.
    Dragging(DragSession),
}

impl Mode {
    pub fn idle(angles: EulerAngles) -> Self {
        Mode::IdleSpin { angles }
    }

    pub fn angles(&self) -> EulerAngles {
        match self {
            Mode::IdleSpin { angles } => *angles,
            Mode::Dragging(_) => EulerAngles::ZERO,
        }
    }

    pub fn integrates(&self) -> bool {
        matches!(self, Mode::IdleSpin { .. })
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        match self {
            Mode::Dragging(session) => Some(session),
            Mode::IdleSpin { .. } => None,
        }
    }

    pub fn drag_session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Mode::Dragging(session) => Some(session),
            Mode::IdleSpin { .. } => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Mode::Dragging(_))
    }

    // Grab a point; any earlier drag is replaced
    pub fn begin_drag(&mut self, point: usize, cursor: DVec2) {
        *self = Mode::Dragging(DragSession::new(point, cursor));
    }

    /// Drops whatever is being held and spins again at `base` angles.
    ///
    /// Returns the point that was released, if any.
    pub fn release(&mut self, base: EulerAngles) -> Option<usize> {
        let released = self.drag_session().map(|session| session.point);
        *self = Mode::idle(base);
        released
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::IdleSpin { .. } => "Idle spin",
            Mode::Dragging(_) => "Dragging",
        }
    }
}
