use crate::{
    shape::{Point, Surface},
    Float,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// alpha in [0, 1]
    pub a: Float,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 1.);

    pub const fn new(r: u8, g: u8, b: u8, a: Float) -> Self {
        Self { r, g, b, a }
    }

    /// Fill color of a triangle, derived from where its corners sit on the surface.
    /// red follows the first corner's x, green the inverse of the second corner's x,
    /// blue the third corner's y. `intensity` is the alpha.
    pub fn for_triangle(points: [Point; 3], surface: Surface, intensity: Float) -> Self {
        let channel = |v: Float| (v.clamp(0., 1.) * 255.) as u8;
        let [p1, p2, p3] = points.map(|p| surface.normalize(p));
        Self {
            r: channel(p1.x),
            g: channel(1. - p2.x),
            b: channel(p3.y),
            a: intensity.clamp(0., 1.),
        }
    }

    /// css `rgba(..)` notation
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Drawing surface the swarm paints each frame on. Canvas, shader, svg or nothing at all.
#[allow(unused_variables)]
pub trait Renderer {
    /// wipe the previous frame
    fn clear(&mut self) {}

    /// fill a triangle, `intensity` grows with how often it was admitted recently
    fn draw_triangle(&mut self, points: [Point; 3], intensity: Float) {}

    fn draw_dot(&mut self, point: Point, color: Rgba, size: Float) {}

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba) {}
}

/// Headless renderer, draws nothing.
impl Renderer for () {}

/// One call received by a [`Recorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear,
    Triangle { points: [Point; 3], intensity: Float },
    Dot { point: Point, color: Rgba, size: Float },
    Line { from: Point, to: Point, color: Rgba },
}

/// Renderer keeping every call of the latest frame, for tests and offline drawing.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub commands: Vec<Command>,
    /// how many times `clear` was called
    pub frames: usize,
}

impl Recorder {
    pub fn triangles(&self) -> impl Iterator<Item = ([Point; 3], Float)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Triangle { points, intensity } => Some((*points, *intensity)),
            _ => None,
        })
    }

    /// number of recorded commands `predicate` accepts
    pub fn count(&self, predicate: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(*c)).count()
    }
}

impl Renderer for Recorder {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(Command::Clear);
        self.frames += 1;
    }

    fn draw_triangle(&mut self, points: [Point; 3], intensity: Float) {
        self.commands.push(Command::Triangle { points, intensity });
    }

    fn draw_dot(&mut self, point: Point, color: Rgba, size: Float) {
        self.commands.push(Command::Dot { point, color, size });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba) {
        self.commands.push(Command::Line { from, to, color });
    }
}
