//! Draws [`miroir_plot`] charts with the `plotters` crate, into SVG documents,
//! PNG (or any other format `image` can encode) files, or raw RGB buffers.
//!
//! No font engine is built in, so bitmap outputs carry no tick or legend labels.

use std::{error::Error, path::Path};

use miroir_plot::{
    clip_unit, nalgebra::Scalar, num_traits::AsPrimitive, Axis, Canvas, Chart, LegendEntry,
    Marker, MarkerShape, Plottable, Point, Ray, RenderError, Renderer, Segment, Stroke,
    Viewport,
};
use plotters::prelude::{BitMapBackend, DrawingBackend, IntoDrawingArea, SVGBackend};
use tracing::info;

mod canvas;
pub use canvas::*;

pub use miroir_plot;
pub use plotters;

/// Size, in pixels, of the images produced when none is specified.
pub const DEFAULT_SIZE: (u32, u32) = (800, 800);

/// Renders onto any `plotters` backend able to draw text, like [`SVGBackend`].
pub fn render_on<'a, S, DB>(
    backend: DB,
    renderer: &Renderer,
    reflectors: &(impl Plottable + ?Sized),
    rays: impl IntoIterator<Item = &'a Ray<S>>,
) -> Result<Chart, RenderError>
where
    S: Scalar + AsPrimitive<f64>,
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut canvas = PlottersCanvas::new(backend.into_drawing_area());
    renderer.render(reflectors, rays, &mut canvas)
}

fn render_bitmap<'a, S>(
    backend: BitMapBackend<'_>,
    renderer: &Renderer,
    reflectors: &(impl Plottable + ?Sized),
    rays: impl IntoIterator<Item = &'a Ray<S>>,
) -> Result<Chart, RenderError>
where
    S: Scalar + AsPrimitive<f64>,
{
    let mut canvas = PlottersCanvas::new(backend.into_drawing_area()).without_text();
    renderer.render(reflectors, rays, &mut canvas)
}

/// Number of bytes in an RGB image of `size`, if it has any pixel.
fn rgb_len((width, height): (u32, u32)) -> Result<usize, RenderError> {
    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h)?.checked_mul(3))
        .filter(|&len| len > 0)
        .ok_or(RenderError::InvalidSize { width, height })
}

/// Renders into an in-memory SVG document.
pub fn to_svg_string<'a, S>(
    renderer: &Renderer,
    reflectors: &(impl Plottable + ?Sized),
    rays: impl IntoIterator<Item = &'a Ray<S>>,
    size: (u32, u32),
) -> Result<String, RenderError>
where
    S: Scalar + AsPrimitive<f64>,
{
    let mut svg = String::new();
    render_on(SVGBackend::with_string(&mut svg, size), renderer, reflectors, rays)?;
    Ok(svg)
}

pub fn save_svg<'a, S>(
    path: impl AsRef<Path>,
    renderer: &Renderer,
    reflectors: &(impl Plottable + ?Sized),
    rays: impl IntoIterator<Item = &'a Ray<S>>,
    size: (u32, u32),
) -> Result<Chart, RenderError>
where
    S: Scalar + AsPrimitive<f64>,
{
    let path = path.as_ref();
    let chart = render_on(SVGBackend::new(path, size), renderer, reflectors, rays)?;
    info!(path = %path.display(), "chart saved");
    Ok(chart)
}

/// The image format is deduced from `path`'s extension.
pub fn save_png<'a, S>(
    path: impl AsRef<Path>,
    renderer: &Renderer,
    reflectors: &(impl Plottable + ?Sized),
    rays: impl IntoIterator<Item = &'a Ray<S>>,
    size: (u32, u32),
) -> Result<Chart, RenderError>
where
    S: Scalar + AsPrimitive<f64>,
{
    rgb_len(size)?;
    let path = path.as_ref();
    let chart = render_bitmap(BitMapBackend::new(path, size), renderer, reflectors, rays)?;
    info!(path = %path.display(), "chart saved");
    Ok(chart)
}

/// Renders into a row-major, 3 bytes per pixel, RGB buffer.
///
/// Fails with [`RenderError::InvalidSize`] if `size` has no pixels or too many to address.
pub fn render_rgb<'a, S>(
    renderer: &Renderer,
    reflectors: &(impl Plottable + ?Sized),
    rays: impl IntoIterator<Item = &'a Ray<S>>,
    size: (u32, u32),
) -> Result<Vec<u8>, RenderError>
where
    S: Scalar + AsPrimitive<f64>,
{
    let mut buf = vec![0; rgb_len(size)?];
    render_bitmap(
        BitMapBackend::with_buffer(&mut buf, size),
        renderer,
        reflectors,
        rays,
    )?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use miroir_plot::{Color, RenderParams};

    fn scene() -> (Vec<miroir_plot::Reflector>, Vec<Ray>) {
        (
            vec![miroir_plot::Reflector::new([0., 0.], [10., 10.])],
            vec![Ray::new([[1., 1.], [2., 2.], [3., 3.]])],
        )
    }

    #[test]
    fn svg_contains_every_segment() {
        let (reflectors, rays) = scene();
        let renderer = Renderer::new(RenderParams::default().with_marker(None));

        let svg = to_svg_string(&renderer, &reflectors, &rays, DEFAULT_SIZE).unwrap();

        assert!(svg.contains("<svg"));
        // the reflector in red, both ray segments in the first cycle color
        assert_eq!(svg.matches("#FF0000").count(), 1);
        assert_eq!(svg.matches("#1F77B4").count(), 2);
    }

    #[test]
    fn legend_is_written_out() {
        let (reflectors, rays) = scene();
        let renderer = Renderer::new(RenderParams::default().with_legend(true));

        let svg = to_svg_string(&renderer, &reflectors, &rays, DEFAULT_SIZE).unwrap();

        assert!(svg.contains("Ray 0"));
    }

    #[test]
    fn invalid_range_draws_nothing() {
        let (reflectors, rays) = scene();
        let renderer = Renderer::new(RenderParams::default().with_xlim(1., 1.));

        let err = to_svg_string(&renderer, &reflectors, &rays, DEFAULT_SIZE).unwrap_err();

        assert!(matches!(err, RenderError::InvalidRange { axis: Axis::X, .. }));
    }

    fn is_red(px: &[u8]) -> bool {
        px[0] > 200 && px[1] < 60 && px[2] < 60
    }

    /// Row indices containing at least one red pixel.
    fn red_rows(buf: &[u8], (width, height): (u32, u32)) -> Vec<usize> {
        let row_len = width as usize * 3;
        (0..height as usize)
            .filter(|&row| buf[row * row_len..(row + 1) * row_len].chunks(3).any(is_red))
            .collect()
    }

    #[test]
    fn y_axis_points_down() {
        let size = (200, 200);
        let top = [miroir_plot::Reflector::new([20., 10.], [80., 10.])];
        let bottom = [miroir_plot::Reflector::new([20., 90.], [80., 90.])];
        let no_rays: [Ray; 0] = [];

        let renderer = Renderer::default();

        let top_rows = red_rows(&render_rgb(&renderer, &top, &no_rays, size).unwrap(), size);
        let bottom_rows = red_rows(&render_rgb(&renderer, &bottom, &no_rays, size).unwrap(), size);

        assert!(!top_rows.is_empty() && !bottom_rows.is_empty());
        assert!(top_rows.iter().max() < bottom_rows.iter().min());
    }

    #[test]
    fn y_axis_points_up_when_not_inverted() {
        let size = (200, 200);
        let low = [miroir_plot::Reflector::new([20., 10.], [80., 10.])];
        let no_rays: [Ray; 0] = [];

        let renderer = Renderer::new(
            RenderParams::default()
                .with_invert_y(false)
                .with_reflector_color(Color::RED),
        );

        let rows = red_rows(&render_rgb(&renderer, &low, &no_rays, size).unwrap(), size);

        assert!(!rows.is_empty());
        assert!(rows.iter().all(|&row| row > 100));
    }

    #[test]
    fn bitmap_legend_has_no_text() {
        let (reflectors, rays) = scene();
        let renderer = Renderer::new(RenderParams::default().with_legend(true));

        let buf = render_rgb(&renderer, &reflectors, &rays, (120, 120)).unwrap();

        assert_eq!(buf.len(), 120 * 120 * 3);
    }

    #[test]
    fn empty_image_is_rejected() {
        let (reflectors, rays) = scene();

        let err = render_rgb(&Renderer::default(), &reflectors, &rays, (0, 50)).unwrap_err();

        assert!(matches!(
            err,
            RenderError::InvalidSize {
                width: 0,
                height: 50
            }
        ));
    }

    #[test]
    fn png_is_written() {
        let (reflectors, rays) = scene();
        let path = std::env::temp_dir().join(format!("miroir_plot_{}.png", std::process::id()));

        save_png(&path, &Renderer::default(), &reflectors, &rays, (160, 120)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
