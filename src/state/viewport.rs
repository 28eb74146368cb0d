// Map viewport: scale + pan between screen pixels and world units.
// world = (screen - pan) / scale

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    /// Multiplies the current scale by `factor`, clamped to `[MIN_SCALE, MAX_SCALE]`.
    /// Factors that are not finite and positive leave the scale untouched.
    pub fn set_scale(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Raw screen-space pan, unbounded.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.pan_x) / self.scale,
            (screen_y - self.pan_y) / self.scale,
        )
    }

    pub fn to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            world_x * self.scale + self.pan_x,
            world_y * self.scale + self.pan_y,
        )
    }

    /// Back to identity, used when re-centering on the user.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whole-percent zoom for notices ("Zoom: 150%").
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}
