use core::convert::Infallible;

use super::*;

/// A drawing surface a [`Chart`] can be replayed onto.
///
/// Calls always come in the same order: [`begin`](Self::begin) once, every segment,
/// every marker, [`draw_legend`](Self::draw_legend) if the chart has a legend,
/// then [`finish`](Self::finish).
pub trait Canvas {
    type Error: Error + Send + Sync + 'static;

    /// Prepares the surface (background, axes...) for drawing `chart`.
    fn begin(&mut self, chart: &Chart) -> Result<(), Self::Error>;

    fn draw_segment(&mut self, segment: &Segment) -> Result<(), Self::Error>;

    fn draw_marker(&mut self, marker: &Marker) -> Result<(), Self::Error>;

    /// Only called with a non-empty `entries`.
    fn draw_legend(&mut self, entries: &[LegendEntry]) -> Result<(), Self::Error>;

    /// Flushes whatever was drawn.
    fn finish(&mut self) -> Result<(), Self::Error>;
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    type Error = C::Error;

    #[inline]
    fn begin(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        (**self).begin(chart)
    }

    #[inline]
    fn draw_segment(&mut self, segment: &Segment) -> Result<(), Self::Error> {
        (**self).draw_segment(segment)
    }

    #[inline]
    fn draw_marker(&mut self, marker: &Marker) -> Result<(), Self::Error> {
        (**self).draw_marker(marker)
    }

    #[inline]
    fn draw_legend(&mut self, entries: &[LegendEntry]) -> Result<(), Self::Error> {
        (**self).draw_legend(entries)
    }

    #[inline]
    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Begin { viewport: Viewport, background: Color },
    Segment(Segment),
    Marker(Marker),
    Legend(Vec<LegendEntry>),
    Finish,
}

/// A [`Canvas`] that keeps every drawing call in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recorder {
    ops: Vec<DrawOp>,
}

impl Recorder {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    #[inline]
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Segment(s) => Some(s),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Marker(m) => Some(m),
            _ => None,
        })
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.ops.last(), Some(DrawOp::Finish))
    }
}

impl Canvas for Recorder {
    type Error = Infallible;

    fn begin(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Begin {
            viewport: chart.viewport,
            background: chart.background,
        });
        Ok(())
    }

    fn draw_segment(&mut self, segment: &Segment) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Segment(*segment));
        Ok(())
    }

    fn draw_marker(&mut self, marker: &Marker) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Marker(*marker));
        Ok(())
    }

    fn draw_legend(&mut self, entries: &[LegendEntry]) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Legend(entries.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Finish);
        Ok(())
    }
}
