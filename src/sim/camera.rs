//! Smoothed camera that trails the vehicle

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Render offset, eased toward the vehicle once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    pub fn at(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Exponential smoothing: move `smoothing` of the remaining gap
    pub fn follow(&mut self, target: Vec2, smoothing: f32) {
        self.pos += (target - self.pos) * smoothing;
    }
}
