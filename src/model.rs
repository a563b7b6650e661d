use std::ops::{Range, RangeInclusive};

/// Bright ANSI 256-colour indices; saturated enough to read on a dark background.
pub(crate) const PALETTE: [u8; 14] = [
    196, 202, 208, 214, 220, 226, 190, 118, 51, 45, 39, 33, 201, 207,
];

pub(crate) const GLYPHS: [char; 4] = ['*', '•', '·', '✶'];

pub(crate) const SPEED_RANGE: Range<f32> = 0.6..1.6;
pub(crate) const LIFE_RANGE: RangeInclusive<i32> = 18..=40;
pub(crate) const RADIUS_RANGE: Range<f32> = 6.0..12.0;
pub(crate) const SPAWN_MODULUS: RangeInclusive<u64> = 18..=26;

// explosion centres sit in the upper-middle of the canvas
pub(crate) const CENTER_X_BAND: (f32, f32) = (0.2, 0.8);
pub(crate) const CENTER_Y_BAND: (f32, f32) = (0.2, 0.45);

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Particle {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) vx: f32,
    pub(crate) vy: f32,
    pub(crate) life: i32,
    pub(crate) colour: u8,
}

impl Particle {
    /// One physics step. Position moves with the old velocity, then the
    /// velocity is damped and pulled down by gravity.
    ///
    /// Returns whether the spark is still alive: it has life left and has
    /// not risen above the top edge.
    pub(crate) fn advance(&mut self, gravity: f32, damping: f32) -> bool {
        if self.life <= 0 {
            return false;
        }

        self.x += self.vx;
        self.y += self.vy;
        self.vx *= damping;
        self.vy = self.vy * damping + gravity;
        self.life -= 1;
        self.life > 0 && self.y >= 0.0
    }

    #[cfg(test)]
    pub(crate) fn speed(&self) -> f32 {
        self.vx.hypot(self.vy)
    }
}

/// Fixed parameters of one show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShowParams {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) gravity: f32,
    pub(crate) damping: f32,
    pub(crate) sparks: usize,
}

impl ShowParams {
    pub(crate) fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for ShowParams {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            gravity: 0.12,
            damping: 0.92,
            sparks: 120,
        }
    }
}
