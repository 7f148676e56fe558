//! Fixed-capacity ring buffer of recent airborne ball positions

use bevy::prelude::*;

use crate::constants::TRAIL_CAPACITY;

/// Owned by `GameSim`; cleared on reset
#[derive(Debug, Clone)]
pub struct BallTrail {
    points: [Vec3; TRAIL_CAPACITY],
    head: usize,
    len: usize,
}

impl Default for BallTrail {
    fn default() -> Self {
        Self {
            points: [Vec3::ZERO; TRAIL_CAPACITY],
            head: 0,
            len: 0,
        }
    }
}

impl BallTrail {
    /// Record a position, overwriting the oldest once full
    pub fn push(&mut self, point: Vec3) {
        self.points[self.head] = point;
        self.head = (self.head + 1) % TRAIL_CAPACITY;
        self.len = (self.len + 1).min(TRAIL_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Points oldest first
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        let start = (self.head + TRAIL_CAPACITY - self.len) % TRAIL_CAPACITY;
        (0..self.len).map(move |i| self.points[(start + i) % TRAIL_CAPACITY])
    }

    /// Nth most recent point (0 = newest)
    pub fn recent(&self, n: usize) -> Option<Vec3> {
        if n >= self.len {
            return None;
        }
        let idx = (self.head + TRAIL_CAPACITY - 1 - n) % TRAIL_CAPACITY;
        Some(self.points[idx])
    }
}
