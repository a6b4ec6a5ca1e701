//! Drag-to-step quantizer.
//!
//! A drag only moves the cursor once the pointer has travelled further than
//! the movement radius from the anchor. The angle of that travel picks one
//! of eight directions and the cursor moves exactly one cell, then the
//! anchor jumps to the pointer.
//!
//! The circle is cut into four quadrants of four sub-bins each. The two
//! middle sub-bins of a quadrant resolve to its diagonal; the outer ones go
//! to the neighbouring cardinals. Cardinals sit on quadrant edges, so each
//! one collects a sub-bin from both sides and every direction ends up with
//! the same π/4 of arc.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::geometry::{Direction, GridPoint};

struct Quadrant {
    lower: f64,
    upper: f64,
    bins: [Direction; 4],
}

static QUADRANTS: [Quadrant; 4] = [
    Quadrant {
        lower: -PI,
        upper: -FRAC_PI_2,
        bins: [Direction::Left, Direction::UpLeft, Direction::UpLeft, Direction::Up],
    },
    Quadrant {
        lower: -FRAC_PI_2,
        upper: 0.0,
        bins: [Direction::Up, Direction::UpRight, Direction::UpRight, Direction::Right],
    },
    Quadrant {
        lower: 0.0,
        upper: FRAC_PI_2,
        bins: [Direction::Right, Direction::DownRight, Direction::DownRight, Direction::Down],
    },
    Quadrant {
        lower: FRAC_PI_2,
        upper: PI,
        bins: [Direction::Down, Direction::DownLeft, Direction::DownLeft, Direction::Left],
    },
];

/// Map an angle in `(-π, π]` (screen space, y down) to a direction.
pub fn direction_for_angle(theta: f64) -> Direction {
    // theta == π has no quadrant with a larger upper bound; it belongs to the last one.
    let quad = QUADRANTS
        .iter()
        .find(|q| theta < q.upper)
        .unwrap_or(&QUADRANTS[QUADRANTS.len() - 1]);

    let offset = (theta - quad.lower).max(0.0);
    let bin = (offset * 4.0 / FRAC_PI_2).min(3.0).floor() as usize;
    quad.bins[bin]
}

/// Direction of travel from `(from_x, from_y)` to `(to_x, to_y)`.
pub fn direction_between(from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> Direction {
    direction_for_angle((to_y - from_y).atan2(to_x - from_x))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug)]
pub struct DirectionQuantizer {
    cursor: GridPoint,
    anchor: DragAnchor,
    threshold_sqr: f64,
    dragging: bool,
}

impl DirectionQuantizer {
    /// `threshold_sqr` is the squared radius a drag must exceed.
    pub fn new(cursor: GridPoint, threshold_sqr: f64) -> Self {
        Self {
            cursor,
            anchor: DragAnchor { x: 0.0, y: 0.0 },
            threshold_sqr,
            dragging: false,
        }
    }

    pub fn cursor(&self) -> GridPoint {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: GridPoint) {
        self.cursor = cursor;
    }

    pub fn anchor(&self) -> DragAnchor {
        self.anchor
    }

    pub fn threshold_sqr(&self) -> f64 {
        self.threshold_sqr
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Non-finite coordinates are ignored.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.anchor = DragAnchor { x, y };
        self.dragging = true;
    }

    /// Resolve at most one step for the pointer at `(x, y)`.
    pub fn report_drag_position(&mut self, x: f64, y: f64) -> Option<Direction> {
        if !self.dragging || !x.is_finite() || !y.is_finite() {
            return None;
        }

        let dx = x - self.anchor.x;
        let dy = y - self.anchor.y;
        if dx * dx + dy * dy <= self.threshold_sqr {
            return None;
        }

        let direction = direction_for_angle(dy.atan2(dx));
        self.cursor = self.cursor.step(direction);
        self.anchor = DragAnchor { x, y };
        Some(direction)
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS_SQR: f64 = 16.0 * 16.0;

    fn quantizer() -> DirectionQuantizer {
        DirectionQuantizer::new(GridPoint::new(16, 16), RADIUS_SQR)
    }

    #[test]
    fn short_drags_never_step() {
        let mut q = quantizer();
        q.begin_drag(0.0, 0.0);
        for (x, y) in [(3.0, 4.0), (16.0, 0.0), (-11.0, 11.0), (0.0, -16.0)] {
            assert_eq!(q.report_drag_position(x, y), None);
        }
        assert_eq!(q.cursor(), GridPoint::new(16, 16));
        assert_eq!(q.anchor(), DragAnchor { x: 0.0, y: 0.0 });
    }

    #[test]
    fn cardinal_and_diagonal_drags() {
        let cases = [
            ((100.0, 0.0), Direction::Right, (17, 16)),
            ((0.0, 100.0), Direction::Down, (16, 17)),
            ((100.0, 100.0), Direction::DownRight, (17, 17)),
            ((-100.0, 0.0), Direction::Left, (15, 16)),
            ((0.0, -100.0), Direction::Up, (16, 15)),
            ((-100.0, -100.0), Direction::UpLeft, (15, 15)),
            ((100.0, -100.0), Direction::UpRight, (17, 15)),
            ((-100.0, 100.0), Direction::DownLeft, (15, 17)),
        ];
        for ((x, y), want, (cx, cy)) in cases {
            let mut q = quantizer();
            q.begin_drag(0.0, 0.0);
            assert_eq!(q.report_drag_position(x, y), Some(want), "drag to ({x}, {y})");
            assert_eq!(q.cursor(), GridPoint::new(cx, cy));
        }
    }

    #[test]
    fn one_step_per_call_and_reanchors() {
        let mut q = quantizer();
        q.begin_drag(0.0, 0.0);
        assert_eq!(q.report_drag_position(100.0, 0.0), Some(Direction::Right));
        assert_eq!(q.anchor(), DragAnchor { x: 100.0, y: 0.0 });
        // Same point again: distance to the new anchor is zero.
        assert_eq!(q.report_drag_position(100.0, 0.0), None);
        assert_eq!(q.report_drag_position(117.0, 0.0), Some(Direction::Right));
        assert_eq!(q.cursor(), GridPoint::new(18, 16));
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut q = quantizer();
        q.begin_drag(0.0, 0.0);
        assert_eq!(q.report_drag_position(16.0, 0.0), None);
        assert_eq!(q.report_drag_position(16.5, 0.0), Some(Direction::Right));
    }

    #[test]
    fn ignores_moves_outside_a_drag() {
        let mut q = quantizer();
        assert_eq!(q.report_drag_position(100.0, 0.0), None);
        q.begin_drag(0.0, 0.0);
        q.end_drag();
        assert_eq!(q.report_drag_position(100.0, 0.0), None);
        assert_eq!(q.cursor(), GridPoint::new(16, 16));
    }

    #[test]
    fn non_finite_pointers_leave_state_alone() {
        let mut q = quantizer();
        q.begin_drag(0.0, 0.0);
        assert_eq!(q.report_drag_position(f64::NAN, 0.0), None);
        assert_eq!(q.report_drag_position(0.0, f64::INFINITY), None);
        assert_eq!(q.anchor(), DragAnchor { x: 0.0, y: 0.0 });
        // One pixel of real motion after the bad event is still below the radius.
        assert_eq!(q.report_drag_position(1.0, 0.0), None);
        assert_eq!(q.cursor(), GridPoint::new(16, 16));

        q.begin_drag(f64::NAN, 5.0);
        assert_eq!(q.anchor(), DragAnchor { x: 0.0, y: 0.0 });
        assert_eq!(q.report_drag_position(100.0, 0.0), Some(Direction::Right));
    }

    #[test]
    fn pi_resolves_left() {
        assert_eq!(direction_for_angle(PI), Direction::Left);
        assert_eq!(direction_for_angle(-PI), Direction::Left);
        assert_eq!(direction_between(0.0, 0.0, -5.0, 0.0), Direction::Left);
    }

    #[test]
    fn bin_edges_are_lower_inclusive() {
        let eighth = PI / 8.0;
        assert_eq!(direction_for_angle(0.0), Direction::Right);
        assert_eq!(direction_for_angle(eighth - 1e-9), Direction::Right);
        assert_eq!(direction_for_angle(eighth + 1e-9), Direction::DownRight);
        assert_eq!(direction_for_angle(3.0 * eighth + 1e-9), Direction::Down);
        assert_eq!(direction_for_angle(-FRAC_PI_2), Direction::Up);
    }

    #[test]
    fn circle_is_partitioned_evenly() {
        // Sample bin centres: each of the 16 sub-bins hits exactly one direction.
        let mut arc = [0u32; 8];
        let samples = 1600;
        for i in 0..samples {
            let theta = -PI + (i as f64 + 0.5) * (2.0 * PI / samples as f64);
            arc[direction_for_angle(theta) as usize] += 1;
        }
        for (idx, count) in arc.iter().enumerate() {
            assert_eq!(*count, 200, "direction {idx} owns a quarter-quadrant pair");
        }
    }

    #[test]
    fn diagonals_own_two_bins_per_quadrant() {
        for quad in QUADRANTS.iter() {
            let diagonal = quad.bins.iter().filter(|d| d.is_diagonal()).count();
            assert_eq!(diagonal, 2);
            assert!(quad.bins[1].is_diagonal() && quad.bins[2].is_diagonal());
            assert!(quad.upper > quad.lower);
        }
    }
}
