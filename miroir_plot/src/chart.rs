use super::*;

/// What a [`Segment`] was drawn for, and its index in the renderer's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Reflector(usize),
    Ray(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub kind: SegmentKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MarkerShape {
    #[default]
    Star,
    Circle,
    Cross,
    Triangle,
}

/// A point marker at a recorded ray position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub at: Point,
    pub color: Color,
    pub shape: MarkerShape,
    /// Index of the ray this position belongs to.
    pub ray: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub marker: Option<MarkerShape>,
}

/// Line width and marker size, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stroke {
    pub line_width: u32,
    pub marker_size: u32,
}

/// Everything a renderer decided to draw, independent of any drawing surface.
///
/// Built by [`Renderer::chart`], and replayed onto a [`Canvas`] with [`Chart::draw`].
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub viewport: Viewport,
    pub background: Color,
    pub stroke: Stroke,
    /// Reflector segments first, in input order, then ray segments, ray by ray,
    /// in traversal order.
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    /// Empty unless a legend was requested.
    pub legend: Vec<LegendEntry>,
}

impl Chart {
    pub fn reflector_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|s| matches!(s.kind, SegmentKind::Reflector(_)))
    }

    /// Segments drawn for the ray at index `ray` of the renderer's input.
    pub fn ray_segments(&self, ray: usize) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(move |s| s.kind == SegmentKind::Ray(ray))
    }

    /// Draws this chart onto `canvas`: segments, then markers, then the legend.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), RenderError> {
        canvas.begin(self).map_err(RenderError::surface)?;

        for segment in &self.segments {
            tracing::trace!(kind = ?segment.kind, "drawing segment");
            canvas.draw_segment(segment).map_err(RenderError::surface)?;
        }

        for marker in &self.markers {
            canvas.draw_marker(marker).map_err(RenderError::surface)?;
        }

        if !self.legend.is_empty() {
            canvas
                .draw_legend(&self.legend)
                .map_err(RenderError::surface)?;
        }

        canvas.finish().map_err(RenderError::surface)
    }
}
