use std::error::Error;

use nalgebra::{SVector, Scalar, Vector2};
use num_traits::AsPrimitive;

mod canvas;
mod chart;
mod color;
mod render;
mod renderable;
mod viewport;

pub use canvas::*;
pub use chart::*;
pub use color::*;
pub use render::*;
pub use renderable::*;
pub use viewport::*;

pub use either;
pub use nalgebra;
pub use num_traits;

/// A position in data coordinates, once converted for drawing.
pub type Point = Vector2<f64>;

#[inline]
pub(crate) fn to_point<S: Scalar + AsPrimitive<f64>>(v: &SVector<S, 2>) -> Point {
    v.map(|c| c.as_())
}

/// A fixed line segment standing for a reflecting surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Reflector<S = f64> {
    start: SVector<S, 2>,
    end: SVector<S, 2>,
}

impl<S> Reflector<S> {
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<SVector<S, 2>>, end: impl Into<SVector<S, 2>>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> &SVector<S, 2> {
        &self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> &SVector<S, 2> {
        &self.end
    }
}

/// The path a ray traveled, as the ordered list of positions it occupied,
/// along with optional drawing overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray<S = f64> {
    position_history: Vec<SVector<S, 2>>,
    color: Option<Color>,
    label: Option<String>,
}

impl<S> Default for Ray<S> {
    #[inline]
    fn default() -> Self {
        Self {
            position_history: Vec::new(),
            color: None,
            label: None,
        }
    }
}

impl<S> Ray<S> {
    #[inline]
    #[must_use]
    pub fn new(positions: impl IntoIterator<Item = impl Into<SVector<S, 2>>>) -> Self {
        positions.into_iter().collect()
    }

    /// Records a new position at the end of this ray's history.
    #[inline]
    pub fn push(&mut self, pos: impl Into<SVector<S, 2>>) {
        self.position_history.push(pos.into());
    }

    #[inline]
    #[must_use]
    pub fn position_history(&self) -> &[SVector<S, 2>] {
        &self.position_history
    }

    /// Color used for every segment of this ray, overriding the renderer's
    /// automatic assignment.
    #[inline]
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Legend label of this ray. Unlabelled rays are listed as `Ray i`.
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline]
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<S, P: Into<SVector<S, 2>>> FromIterator<P> for Ray<S> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            position_history: iter.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl<S, P: Into<SVector<S, 2>>> Extend<P> for Ray<S> {
    #[inline]
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.position_history.extend(iter.into_iter().map(Into::into));
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An axis range is empty or not finite.
    #[error("invalid {axis} range [{min}, {max}]: bounds must be finite and distinct")]
    InvalidRange { axis: Axis, min: f64, max: f64 },

    /// An image has no pixels, or too many to be addressed.
    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// The drawing surface reported a failure.
    #[error("drawing surface failed: {0}")]
    Surface(#[source] Box<dyn Error + Send + Sync>),
}

impl RenderError {
    #[inline]
    pub fn surface(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Surface(Box::new(err))
    }
}
