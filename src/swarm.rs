use std::time::{Duration, Instant};

use rand::Rng;

use crate::{
    context::{Context, Grouping},
    dots::{DotId, Dots, DotsBuilder},
    grouper::{Grouper, Observer},
    neighbors::Neighborhoods,
    options::{Options, OptionsError},
    registry::{EdgeRegistry, Heat, TriangleRegistry},
    render::{Renderer, Rgba},
    utils::{direction, distance},
    Triangle,
};

/// The dot every traversal starts from
pub const SEED: DotId = DotId(0);

/// What one frame produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// dots reached by the traversal
    pub visited: usize,
    /// distinct edges admitted this frame
    pub edges: usize,
    /// triangles alive after drawing, including ones still cooling down
    pub triangles: usize,
    /// triangles evicted by decay at the end of the frame
    pub evicted: usize,
    pub elapsed: Duration,
}

/// Dots plus the per-frame machinery weaving them together.
pub struct Swarm {
    dots: Dots,
    options: Options,
    edges: EdgeRegistry,
    triangles: TriangleRegistry,
    frame: u64,
}

impl Swarm {
    /// Spawn `options.dot_count` dots at random positions
    pub fn new(options: Options, rng: &mut impl Rng) -> Result<Self, OptionsError> {
        let mut builder = DotsBuilder::with_capacity(options.dot_count);
        builder.add_random_dots(options.dot_count, options.surface, rng);
        Self::with_dots(options, builder.build())
    }

    /// Use the given dots, `options.dot_count` is ignored
    pub fn with_dots(options: Options, dots: Dots) -> Result<Self, OptionsError> {
        options.validate()?;

        let capacity = dots.len() * 3;
        Ok(Self {
            edges: EdgeRegistry::with_capacity(capacity, Heat::default()),
            triangles: TriangleRegistry::with_capacity(capacity, options.triangle.heat()),
            dots,
            options,
            frame: 0,
        })
    }

    pub fn dots(&self) -> &Dots {
        &self.dots
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Triangles currently alive, with their intensity
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles.iter_intensity().map(|(key, intensity)| {
            let dots = key.members();
            Triangle {
                dots,
                points: dots.map(|d| d.get(&self.dots)),
                intensity,
            }
        })
    }

    /// how many frames ran so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn is_moving(&self) -> bool {
        self.options.moving
    }

    /// Start or stop the animation. Returns whether the caller should schedule a
    /// frame now: true only when movement was just switched on.
    pub fn set_moving(&mut self, moving: bool) -> bool {
        let restart = moving && !self.options.moving;
        self.options.moving = moving;
        tracing::debug!(moving, restart, "movement toggled");
        restart
    }

    /// Run one frame
    pub fn step(&mut self, renderer: &mut impl Renderer) -> FrameStats {
        self.step_with_observer(renderer, &mut ())
    }

    /// Run one frame, reporting the traversal to `observer`.
    ///
    /// Dots move, neighbor lists are rebuilt, one traversal from [`SEED`] admits edges
    /// and triangles, triangles are drawn, forces act along own-connections, then the
    /// edges are forgotten and triangles cool down (or are forgotten too when decay
    /// is off).
    pub fn step_with_observer(
        &mut self,
        renderer: &mut impl Renderer,
        observer: &mut impl Observer,
    ) -> FrameStats {
        let start = Instant::now();

        renderer.clear();
        self.dots.advance(
            self.options.velocity,
            self.options.boundary,
            self.options.surface,
        );
        let neighborhoods = Neighborhoods::compute(&self.dots, self.options.max_neighbors);

        let mut context = Context::new(
            &self.dots,
            &neighborhoods,
            &mut self.edges,
            &mut self.triangles,
        );
        Grouper::group_with_observer(SEED, &mut context, observer);
        let grouping = context.finish();

        self.draw(renderer, &grouping);
        self.interact(&grouping);

        let mut stats = FrameStats {
            visited: grouping.visited_count(),
            edges: self.edges.len(),
            triangles: self.triangles.len(),
            ..Default::default()
        };

        self.edges.clear();
        match self.options.triangle.decay {
            Some(_) => stats.evicted = self.triangles.decay(),
            None => self.triangles.clear(),
        }

        self.frame += 1;
        stats.elapsed = start.elapsed();
        tracing::debug!(
            frame = self.frame,
            visited = stats.visited,
            edges = stats.edges,
            triangles = stats.triangles,
            evicted = stats.evicted,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "frame done"
        );
        stats
    }

    /// Run frames while moving, at most `max_frames`. Returns how many frames ran.
    pub fn run(&mut self, renderer: &mut impl Renderer, max_frames: usize) -> usize {
        let mut count = 0;
        while self.options.moving && count < max_frames {
            self.step(renderer);
            count += 1;
        }
        count
    }

    fn draw(&self, renderer: &mut impl Renderer, grouping: &Grouping) {
        for triangle in self.triangles() {
            renderer.draw_triangle(triangle.points, triangle.intensity);
        }

        if self.options.show_dots {
            for (_, dot) in self.dots.iter() {
                renderer.draw_dot(dot.position, Rgba::BLACK, self.options.dot_size);
            }
        }

        if self.options.show_own_connections {
            for (dot, other) in grouping.iter_connections() {
                renderer.draw_line(dot.get(&self.dots), other.get(&self.dots), Rgba::BLACK);
            }
        }
    }

    /// Push dots apart along short own-connections and pull them together along long
    /// ones. Only velocities change, so the order dots are processed in doesn't matter.
    fn interact(&mut self, grouping: &Grouping) {
        let attract = self.options.attract;
        let repulse = self.options.repulse;

        for dot_id in self.dots.ids() {
            let from = dot_id.get(&self.dots);
            for other in grouping.own_connections(dot_id) {
                let to = other.get(&self.dots);
                let Some(unit) = direction(from, to) else {
                    continue;
                };
                let distance = distance(from, to);

                let Some(dot) = self.dots.get_mut(dot_id) else {
                    continue;
                };
                if distance < repulse.distance {
                    dot.velocity.nudge(unit, -repulse.intensity);
                }
                if distance > attract.distance {
                    dot.velocity.nudge(unit, attract.intensity);
                }
            }
        }
    }
}
