use core::f64::consts::FRAC_PI_6;

use plotters::{
    coord::Shift,
    element::{Circle, Cross, PathElement, Rectangle, Text, TriangleMarker},
    prelude::{DrawingArea, DrawingAreaErrorKind, DrawingBackend},
    style::{
        text_anchor::{HPos, Pos, VPos},
        Color as _, IntoFont, RGBAColor, ShapeStyle, TextStyle, BLACK, WHITE,
    },
};

use super::*;

const MARGIN_TOP: i32 = 20;
const MARGIN_RIGHT: i32 = 20;
const MARGIN_BOTTOM: i32 = 40;
const MARGIN_LEFT: i32 = 50;

const TICK_TARGET: usize = 5;
const TICK_LEN: i32 = 5;
const FONT_SIZE: f64 = 12.;

const LEGEND_LINE_HEIGHT: i32 = 18;
const LEGEND_PADDING: i32 = 6;
/// Rough glyph width at [`FONT_SIZE`], no font metrics are available.
const LEGEND_CHAR_WIDTH: i32 = 7;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError<E: Error + Send + Sync> {
    #[error(transparent)]
    Drawing(#[from] DrawingAreaErrorKind<E>),
    #[error("chart primitives were drawn before `Canvas::begin`")]
    NotStarted,
}

/// The region of the surface data is drawn in.
#[derive(Clone, Copy, Debug)]
struct PlotArea {
    left: i32,
    top: i32,
    size: (u32, u32),
    viewport: Viewport,
    stroke: Stroke,
}

impl PlotArea {
    fn right(&self) -> i32 {
        self.left + self.size.0 as i32
    }

    fn bottom(&self) -> i32 {
        self.top + self.size.1 as i32
    }

    fn to_pixel_unit(&self, u: Point) -> (i32, i32) {
        (
            self.left + (u.x * f64::from(self.size.0)).round() as i32,
            self.top + (u.y * f64::from(self.size.1)).round() as i32,
        )
    }

    fn pixel(&self, p: &Point) -> (i32, i32) {
        self.to_pixel_unit(self.viewport.to_unit(p))
    }
}

/// A [`Canvas`] drawing onto a `plotters` drawing area.
///
/// Data is drawn inside a framed plot area, with ticks and tick labels on the
/// left and bottom edges. Segments leaving the visible range are clipped.
///
/// Bitmap backends can't draw text without a font engine, use
/// [`without_text`](Self::without_text) for them.
pub struct PlottersCanvas<DB: DrawingBackend> {
    root: DrawingArea<DB, Shift>,
    plot: Option<PlotArea>,
    text: bool,
}

impl<DB: DrawingBackend> PlottersCanvas<DB> {
    #[inline]
    pub fn new(root: DrawingArea<DB, Shift>) -> Self {
        Self {
            root,
            plot: None,
            text: true,
        }
    }

    /// Leaves out tick labels and legend labels, everything else is still drawn.
    #[inline]
    #[must_use]
    pub fn without_text(mut self) -> Self {
        self.text = false;
        self
    }

    fn draw_text(
        &self,
        text: &str,
        at: (i32, i32),
        style: TextStyle<'_>,
    ) -> Result<(), CanvasError<DB::ErrorType>> {
        if self.text {
            self.root.draw(&Text::new(text, at, style))?;
        }
        Ok(())
    }

    #[inline]
    pub fn into_inner(self) -> DrawingArea<DB, Shift> {
        self.root
    }

    fn plot(&self) -> Result<PlotArea, CanvasError<DB::ErrorType>> {
        self.plot.ok_or(CanvasError::NotStarted)
    }

    fn draw_axes(&self, plot: &PlotArea) -> Result<(), CanvasError<DB::ErrorType>> {
        let (left, top, right, bottom) = (plot.left, plot.top, plot.right(), plot.bottom());
        let line = BLACK.stroke_width(1);
        let font = font();

        self.root
            .draw(&Rectangle::new([(left, top), (right, bottom)], line))?;

        let vp = &plot.viewport;
        let (x_min, _) = vp.xlim();
        let (y_min, _) = vp.ylim();

        for x in vp.ticks(Axis::X, TICK_TARGET) {
            let (px, _) = plot.pixel(&Point::new(x, y_min));
            self.root
                .draw(&PathElement::new([(px, bottom), (px, bottom + TICK_LEN)], line))?;
            self.draw_text(
                &tick_label(x),
                (px, bottom + TICK_LEN + 2),
                font.pos(Pos::new(HPos::Center, VPos::Top)),
            )?;
        }

        for y in vp.ticks(Axis::Y, TICK_TARGET) {
            let (_, py) = plot.pixel(&Point::new(x_min, y));
            self.root
                .draw(&PathElement::new([(left - TICK_LEN, py), (left, py)], line))?;
            self.draw_text(
                &tick_label(y),
                (left - TICK_LEN - 2, py),
                font.pos(Pos::new(HPos::Right, VPos::Center)),
            )?;
        }

        Ok(())
    }

    fn draw_shape(
        &self,
        (x, y): (i32, i32),
        shape: MarkerShape,
        color: RGBAColor,
        size: u32,
    ) -> Result<(), CanvasError<DB::ErrorType>> {
        let r = (size / 2).max(1) as i32;
        let style = ShapeStyle {
            color,
            filled: false,
            stroke_width: 1,
        };

        match shape {
            MarkerShape::Circle => self.root.draw(&Circle::new((x, y), r, style.filled()))?,
            MarkerShape::Cross => self.root.draw(&Cross::new((x, y), r, style))?,
            MarkerShape::Triangle => self
                .root
                .draw(&TriangleMarker::new((x, y), r, style.filled()))?,
            MarkerShape::Star => {
                // three spokes, 60° apart
                let dx = (f64::from(r) * FRAC_PI_6.cos()).round() as i32;
                let dy = r / 2;

                for spoke in [
                    [(x, y - r), (x, y + r)],
                    [(x - dx, y - dy), (x + dx, y + dy)],
                    [(x - dx, y + dy), (x + dx, y - dy)],
                ] {
                    self.root.draw(&PathElement::new(spoke, style))?;
                }
            }
        }

        Ok(())
    }
}

impl<DB: DrawingBackend> Canvas for PlottersCanvas<DB>
where
    DB::ErrorType: 'static,
{
    type Error = CanvasError<DB::ErrorType>;

    fn begin(&mut self, chart: &Chart) -> Result<(), Self::Error> {
        let (width, height) = self.root.dim_in_pixel();

        let plot = PlotArea {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            size: (
                width.saturating_sub((MARGIN_LEFT + MARGIN_RIGHT) as u32).max(1),
                height.saturating_sub((MARGIN_TOP + MARGIN_BOTTOM) as u32).max(1),
            ),
            viewport: chart.viewport,
            stroke: chart.stroke,
        };

        self.root.fill(&rgba(chart.background))?;
        self.draw_axes(&plot)?;
        self.plot = Some(plot);

        Ok(())
    }

    fn draw_segment(&mut self, segment: &Segment) -> Result<(), Self::Error> {
        let plot = self.plot()?;
        let vp = &plot.viewport;

        let Some((a, b)) = clip_unit(vp.to_unit(&segment.from), vp.to_unit(&segment.to)) else {
            return Ok(());
        };

        let style = ShapeStyle {
            color: rgba(segment.color),
            filled: false,
            stroke_width: plot.stroke.line_width,
        };

        self.root.draw(&PathElement::new(
            [plot.to_pixel_unit(a), plot.to_pixel_unit(b)],
            style,
        ))?;

        Ok(())
    }

    fn draw_marker(&mut self, marker: &Marker) -> Result<(), Self::Error> {
        let plot = self.plot()?;

        if !plot.viewport.contains(&marker.at) {
            return Ok(());
        }

        self.draw_shape(
            plot.pixel(&marker.at),
            marker.shape,
            rgba(marker.color),
            plot.stroke.marker_size,
        )
    }

    fn draw_legend(&mut self, entries: &[LegendEntry]) -> Result<(), Self::Error> {
        let plot = self.plot()?;

        let longest = if self.text {
            entries
                .iter()
                .map(|e| e.label.chars().count())
                .max()
                .unwrap_or(0) as i32
        } else {
            0
        };

        let width = 40 + LEGEND_CHAR_WIDTH * longest;
        let height = LEGEND_LINE_HEIGHT * entries.len() as i32 + 2 * LEGEND_PADDING;

        let x0 = plot.right() - width - 10;
        let y0 = plot.top + 10;
        let corners = [(x0, y0), (x0 + width, y0 + height)];

        self.root
            .draw(&Rectangle::new(corners, WHITE.mix(0.8).filled()))?;
        self.root
            .draw(&Rectangle::new(corners, BLACK.stroke_width(1)))?;

        let font = font().pos(Pos::new(HPos::Left, VPos::Center));

        for (k, entry) in entries.iter().enumerate() {
            let y = y0 + LEGEND_PADDING + LEGEND_LINE_HEIGHT * k as i32 + LEGEND_LINE_HEIGHT / 2;
            let color = rgba(entry.color);

            self.root.draw(&PathElement::new(
                [(x0 + LEGEND_PADDING, y), (x0 + 26, y)],
                ShapeStyle {
                    color,
                    filled: false,
                    stroke_width: plot.stroke.line_width,
                },
            ))?;

            if let Some(shape) = entry.marker {
                self.draw_shape((x0 + 16, y), shape, color, plot.stroke.marker_size)?;
            }

            self.draw_text(&entry.label, (x0 + 32, y), font.clone())?;
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.root.present()?;
        Ok(())
    }
}

fn font() -> TextStyle<'static> {
    ("sans-serif", FONT_SIZE).into_font().color(&BLACK)
}

#[inline]
fn rgba(color: miroir_plot::Color) -> RGBAColor {
    let [r, g, b] = color.to_rgb8();
    RGBAColor(r, g, b, f64::from(color.alpha()))
}

fn tick_label(v: f64) -> String {
    // nice ticks are multiples of 1, 2 or 5 times a power of ten, strip the float noise
    let rounded = (v * 1e9).round() / 1e9;
    format!("{rounded}")
}
