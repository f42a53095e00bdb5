use core::convert::Infallible;

use tracing::debug;

use super::*;

/// Vertices sharing one color.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub color: [f32; 4],
    pub vertices: Vec<Vertex2D>,
}

/// Pushes `vertices` onto the last batch of `batches` if it has the same color,
/// or onto a new batch otherwise.
fn push_batched(
    batches: &mut Vec<Batch>,
    color: [f32; 4],
    vertices: impl IntoIterator<Item = Vertex2D>,
) {
    match batches.last_mut() {
        Some(batch) if batch.color == color => batch.vertices.extend(vertices),
        _ => batches.push(Batch {
            color,
            vertices: vertices.into_iter().collect(),
        }),
    }
}

/// Maps data coordinates to OpenGL's normalized device coordinates,
/// flipping the vertical axis according to [`Viewport::invert_y`].
#[must_use]
pub fn ndc_transform(viewport: &Viewport) -> Matrix4<f32> {
    let (x0, x1) = viewport.xlim();
    let (y0, y1) = viewport.ylim();

    let sx = 2. / (x1 - x0);
    let tx = -1. - x0 * sx;

    // NDC's y axis points up
    let dir = if viewport.invert_y() { -1. } else { 1. };
    let sy = 2. * dir / (y1 - y0);
    let ty = -dir - y0 * sy;

    #[rustfmt::skip]
    let m = Matrix4::new(
        sx, 0., 0., tx,
        0., sy, 0., ty,
        0., 0., 1., 0.,
        0., 0., 0., 1.,
    );

    m.cast()
}

/// A [`Canvas`] that collects a chart into vertex batches, ready to be
/// uploaded to the GPU and drawn in a [`ChartWindow`].
///
/// Segments become line lists, markers become points, expanded into
/// crosses when drawn. Legends have no text rendering here and are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct GlChart {
    transform: [[f32; 4]; 4],
    background: [f32; 4],
    line_width: f32,
    marker_size: f32,
    lines: Vec<Batch>,
    markers: Vec<Batch>,
}

impl Default for GlChart {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl GlChart {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            transform: Matrix4::<f32>::identity().into(),
            background: [1., 1., 1., 1.],
            line_width: 1.,
            marker_size: 0.,
            lines: vec![],
            markers: vec![],
        }
    }

    /// Column major, like GLSL's `mat4`.
    #[inline]
    pub const fn transform(&self) -> &[[f32; 4]; 4] {
        &self.transform
    }

    #[inline]
    pub const fn background(&self) -> [f32; 4] {
        self.background
    }

    #[inline]
    pub const fn line_width(&self) -> f32 {
        self.line_width
    }

    /// In pixels.
    #[inline]
    pub const fn marker_size(&self) -> f32 {
        self.marker_size
    }

    /// Pairs of vertices, one pair per segment.
    #[inline]
    pub fn line_batches(&self) -> &[Batch] {
        &self.lines
    }

    #[inline]
    pub fn marker_batches(&self) -> &[Batch] {
        &self.markers
    }
}

impl Canvas for GlChart {
    type Error = Infallible;

    fn begin(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        self.transform = ndc_transform(&chart.viewport).into();
        self.background = chart.background.into();
        self.line_width = chart.stroke.line_width as f32;
        self.marker_size = chart.stroke.marker_size as f32;
        self.lines.clear();
        self.markers.clear();
        Ok(())
    }

    fn draw_segment(&mut self, segment: &Segment) -> Result<(), Self::Error> {
        push_batched(
            &mut self.lines,
            segment.color.into(),
            [Vertex2D::from(&segment.from), Vertex2D::from(&segment.to)],
        );
        Ok(())
    }

    fn draw_marker(&mut self, marker: &Marker) -> Result<(), Self::Error> {
        push_batched(
            &mut self.markers,
            marker.color.into(),
            [Vertex2D::from(&marker.at)],
        );
        Ok(())
    }

    fn draw_legend(&mut self, entries: &[LegendEntry]) -> Result<(), Self::Error> {
        debug!(entries = entries.len(), "legends aren't drawn in chart windows");
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        debug!(
            line_batches = self.lines.len(),
            marker_batches = self.markers.len(),
            "chart batched"
        );
        Ok(())
    }
}
