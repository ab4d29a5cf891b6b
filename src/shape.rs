use crate::Float;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: Float,
    pub y: Float,
}

impl Default for Point {
    fn default() -> Self {
        Self { x: 0., y: 0. }
    }
}

impl Point {
    pub fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Move the point by `velocity` scaled with `scale`
    pub fn translate(&mut self, velocity: Velocity, scale: Float) {
        self.x += velocity.vx * scale;
        self.y += velocity.vy * scale;
    }
}

/// Velocity of a dot, in surface units per step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub vx: Float,
    pub vy: Float,
}

impl Velocity {
    pub fn new(vx: Float, vy: Float) -> Self {
        Self { vx, vy }
    }

    pub fn squared_speed(&self) -> Float {
        self.vx * self.vx + self.vy * self.vy
    }

    /// Push the velocity along the unit direction `(dx, dy)`.
    ///
    /// Afterwards the velocity is softly pulled back into the unit circle: when the
    /// squared speed exceeds 1, both components are divided by the squared speed.
    /// This is not a true normalization, fast dots slow down more than needed.
    pub fn nudge(&mut self, (dx, dy): (Float, Float), intensity: Float) {
        self.vx += dx * intensity;
        self.vy += dy * intensity;

        let squared = self.squared_speed();
        if squared > 1. {
            self.vx /= squared;
            self.vy /= squared;
        }
    }
}

/// The rectangular area dots live on, origin at top left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: Float,
    pub height: Float,
}

impl Surface {
    pub fn new(width: Float, height: Float) -> Self {
        Self { width, height }
    }

    /// Coordinates of `point` relative to the surface size, `[0, 1]` when inside
    pub fn normalize(&self, point: Point) -> Point {
        Point::new(point.x / self.width, point.y / self.height)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 1000.,
            height: 1000.,
        }
    }
}
