use crate::{registry::Heat, shape::Surface, Float};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OptionsError {
    #[error("surface must have a positive size, got {width}x{height}")]
    Surface { width: Float, height: Float },
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: Float },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: Float },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: Float },
}

/// What happens to a dot leaving the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// flip the velocity component as soon as the dot is outside
    Reflect,
    /// once past the margin, point the velocity back inward with at least 0.5 speed.
    /// A negative margin lets dots drift outside the surface before turning.
    Margin(Float),
}

/// A pull or push applied along own-connections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    /// threshold distance, attraction acts beyond it, repulsion below it
    pub distance: Float,
    pub intensity: Float,
}

/// Triangle heat settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleOptions {
    /// heat lost per frame, `None` forgets all triangles between frames
    pub decay: Option<Float>,
    pub max_heat: Float,
    pub color_amplification: Float,
}

impl Default for TriangleOptions {
    fn default() -> Self {
        Self {
            decay: Some(0.5),
            max_heat: 100.,
            color_amplification: 2.,
        }
    }
}

impl TriangleOptions {
    pub(crate) fn heat(&self) -> Heat {
        Heat {
            max: self.max_heat,
            decay: self.decay.unwrap_or(0.),
            amplification: self.color_amplification,
        }
    }
}

/// Swarm configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// dots spawned at start, later changes have no effect
    pub dot_count: usize,
    pub surface: Surface,
    /// scale applied to every dot's velocity when moving
    pub velocity: Float,
    pub attract: Force,
    pub repulse: Force,
    /// how many nearest dots are considered per dot
    pub max_neighbors: usize,
    pub boundary: Boundary,
    pub show_dots: bool,
    pub show_own_connections: bool,
    pub dot_size: Float,
    pub triangle: TriangleOptions,
    /// whether frames keep being scheduled, toggle through `Swarm::set_moving`
    pub moving: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dot_count: 100,
            surface: Surface::default(),
            velocity: 1.,
            attract: Force {
                distance: 300.,
                intensity: 0.005,
            },
            repulse: Force {
                distance: 80.,
                intensity: 0.015,
            },
            max_neighbors: 10,
            boundary: Boundary::Margin(-50.),
            show_dots: false,
            show_own_connections: false,
            dot_size: 5.,
            triangle: TriangleOptions::default(),
            moving: true,
        }
    }
}

impl Options {
    pub fn with_dot_count(mut self, dot_count: usize) -> Self {
        self.dot_count = dot_count;
        self
    }

    pub fn with_surface(mut self, width: Float, height: Float) -> Self {
        self.surface = Surface::new(width, height);
        self
    }

    pub fn with_max_neighbors(mut self, max_neighbors: usize) -> Self {
        self.max_neighbors = max_neighbors;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_decay(mut self, decay: Option<Float>) -> Self {
        self.triangle.decay = decay;
        self
    }

    /// Check the values the swarm would otherwise trip over
    pub fn validate(&self) -> Result<(), OptionsError> {
        let Surface { width, height } = self.surface;
        if !(width > 0. && height > 0. && width.is_finite() && height.is_finite()) {
            return Err(OptionsError::Surface { width, height });
        }

        let finite = [
            ("velocity", self.velocity),
            ("attract.distance", self.attract.distance),
            ("attract.intensity", self.attract.intensity),
            ("repulse.distance", self.repulse.distance),
            ("repulse.intensity", self.repulse.intensity),
            ("dot_size", self.dot_size),
        ];
        if let Some((name, value)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(OptionsError::NotFinite { name, value });
        }
        if let Boundary::Margin(value) = self.boundary {
            if !value.is_finite() {
                return Err(OptionsError::NotFinite {
                    name: "margin",
                    value,
                });
            }
        }

        let triangle = &self.triangle;
        for (name, value) in [
            ("triangle.max_heat", triangle.max_heat),
            ("triangle.color_amplification", triangle.color_amplification),
        ] {
            if !value.is_finite() {
                return Err(OptionsError::NotFinite { name, value });
            }
            if value <= 0. {
                return Err(OptionsError::NotPositive { name, value });
            }
        }
        if let Some(value) = triangle.decay {
            if !value.is_finite() {
                return Err(OptionsError::NotFinite {
                    name: "triangle.decay",
                    value,
                });
            }
            if value < 0. {
                return Err(OptionsError::Negative {
                    name: "triangle.decay",
                    value,
                });
            }
        }

        Ok(())
    }
}
