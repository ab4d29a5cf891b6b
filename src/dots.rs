use rand::Rng;

use crate::{
    options::Boundary,
    shape::{Point, Surface, Velocity},
    Float,
};

/// Type alias to the underlying type for DotId.
/// DotId compare is in hot path, e.g, shared endpoint check, canonical key sort
type NumType = u32;

/// new type for dot id, currently is the index in `Dots`.
/// Ordering on ids is what canonical edge/triangle keys are sorted by.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DotId(pub(crate) NumType);

impl DotId {
    /// Get the inner value as usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Get the inner value as u32
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// helper method used in the crate when I know the `DotId` is valid in `Dots`
    pub(crate) fn get(&self, dots: &Dots) -> Point {
        dots.dots[self.as_usize()].position
    }
}

/// A moving particle
#[derive(Debug, Clone, Copy)]
pub struct Dot {
    pub position: Point,
    pub velocity: Velocity,
}

impl Dot {
    pub fn new(position: Point, velocity: Velocity) -> Self {
        Self { position, velocity }
    }

    /// Move one step, then steer back when the dot left the surface.
    pub fn advance(&mut self, scale: Float, boundary: Boundary, surface: Surface) {
        self.position.translate(self.velocity, scale);

        match boundary {
            Boundary::Reflect => {
                if self.position.x < 0. || self.position.x > surface.width {
                    self.velocity.vx *= -1.;
                }
                if self.position.y < 0. || self.position.y > surface.height {
                    self.velocity.vy *= -1.;
                }
            }
            Boundary::Margin(margin) => {
                const MIN_ESCAPE: Float = 0.5;

                if self.position.x - margin < 0. {
                    self.velocity.vx = self.velocity.vx.abs().max(MIN_ESCAPE);
                } else if self.position.x + margin > surface.width {
                    self.velocity.vx = (-self.velocity.vx.abs()).min(-MIN_ESCAPE);
                }

                if self.position.y - margin < 0. {
                    self.velocity.vy = self.velocity.vy.abs().max(MIN_ESCAPE);
                } else if self.position.y + margin > surface.height {
                    self.velocity.vy = (-self.velocity.vy.abs()).min(-MIN_ESCAPE);
                }
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct DotsBuilder {
    dots: Vec<Dot>,
}

impl DotsBuilder {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            dots: Vec::with_capacity(cap),
        }
    }

    /// Add a dot
    pub fn add_dot(&mut self, position: Point, velocity: Velocity) -> DotId {
        let dot_id = DotId(self.dots.len() as NumType);
        self.dots.push(Dot::new(position, velocity));
        dot_id
    }

    /// Add a resting dot
    pub fn add_point(&mut self, position: Point) -> DotId {
        self.add_dot(position, Velocity::default())
    }

    /// Add `count` dots at random whole-unit positions on the surface, with each
    /// velocity component in `[-0.5, 0.5)`
    pub fn add_random_dots(&mut self, count: usize, surface: Surface, rng: &mut impl Rng) {
        self.dots.reserve(count);
        for _ in 0..count {
            let x = (rng.gen::<Float>() * surface.width).round();
            let y = (rng.gen::<Float>() * surface.height).round();
            let vx = rng.gen::<Float>() - 0.5;
            let vy = rng.gen::<Float>() - 0.5;
            self.add_dot(Point::new(x, y), Velocity::new(vx, vy));
        }
    }

    pub fn build(self) -> Dots {
        Dots { dots: self.dots }
    }
}

/// Dot store, dots are never removed so ids stay valid for the whole run
#[derive(Clone, Default)]
pub struct Dots {
    dots: Vec<Dot>,
}

impl Dots {
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn get(&self, dot_id: DotId) -> Option<&Dot> {
        self.dots.get(dot_id.as_usize())
    }

    pub fn get_mut(&mut self, dot_id: DotId) -> Option<&mut Dot> {
        self.dots.get_mut(dot_id.as_usize())
    }

    /// get position for id
    pub fn get_point(&self, dot_id: DotId) -> Option<Point> {
        self.get(dot_id).map(|d| d.position)
    }

    /// iter all dots
    pub fn iter(&self) -> impl Iterator<Item = (DotId, &Dot)> {
        self.dots
            .iter()
            .enumerate()
            .map(|(idx, d)| (DotId(idx as NumType), d))
    }

    pub fn ids(&self) -> impl Iterator<Item = DotId> {
        (0..self.dots.len()).map(|idx| DotId(idx as NumType))
    }

    /// Move every dot one step
    pub fn advance(&mut self, scale: Float, boundary: Boundary, surface: Surface) {
        for dot in self.dots.iter_mut() {
            dot.advance(scale, boundary, surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_builder_ids() {
        let mut builder = DotsBuilder::default();
        let a = builder.add_point(Point::new(0., 0.));
        let b = builder.add_point(Point::new(1., 0.));
        let dots = builder.build();

        assert_eq!(a.as_usize(), 0);
        assert_eq!(b.as_u32(), 1);
        assert!(a < b);
        assert_eq!(dots.get_point(b), Some(Point::new(1., 0.)));
        assert!(dots.get(DotId(2)).is_none());
        assert_eq!(dots.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_random_dots_inside_surface() {
        let surface = Surface::new(200., 100.);
        let mut builder = DotsBuilder::default();
        builder.add_random_dots(50, surface, &mut StdRng::seed_from_u64(1));
        let dots = builder.build();

        assert_eq!(dots.len(), 50);
        for (_, dot) in dots.iter() {
            assert!((0. ..=200.).contains(&dot.position.x));
            assert!((0. ..=100.).contains(&dot.position.y));
            assert_eq!(dot.position.x.fract(), 0.);
            assert!(dot.velocity.vx.abs() <= 0.5);
            assert!(dot.velocity.vy.abs() <= 0.5);
        }
    }

    #[test]
    fn test_reflect_boundary() {
        let surface = Surface::new(10., 10.);
        let mut dot = Dot::new(Point::new(9.5, 5.), Velocity::new(1., 0.2));
        dot.advance(1., Boundary::Reflect, surface);
        assert_eq!(dot.position.x, 10.5);
        assert_eq!(dot.velocity.vx, -1.);
        assert_eq!(dot.velocity.vy, 0.2);
    }

    #[test]
    fn test_margin_boundary() {
        let surface = Surface::new(100., 100.);

        // a negative margin lets dots drift 10 units outside before turning
        let mut dot = Dot::new(Point::new(-8.5, 50.), Velocity::new(-1., 0.1));
        dot.advance(1., Boundary::Margin(-10.), surface);
        assert_eq!(dot.velocity.vx, -1.);
        dot.advance(1., Boundary::Margin(-10.), surface);
        // turned back inward
        assert_eq!(dot.velocity.vx, 1.);

        let mut dot = Dot::new(Point::new(95., 50.), Velocity::new(0.1, 0.1));
        dot.advance(1., Boundary::Margin(10.), surface);
        assert_eq!(dot.velocity.vx, -0.5);
        assert_eq!(dot.velocity.vy, 0.1);
    }
}
