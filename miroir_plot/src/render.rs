use tracing::debug;

use super::*;

/// How rays without an explicit [`color`](Ray::with_color) are colored.
#[derive(Clone, Debug, PartialEq)]
pub enum RayColoring {
    /// Every drawn ray takes the next color of the cycle, wrapping around.
    Cycle(Vec<Color>),
    /// Every ray is drawn with the same color.
    Uniform(Color),
}

impl Default for RayColoring {
    #[inline]
    fn default() -> Self {
        Self::Cycle(Color::TAB10.to_vec())
    }
}

impl RayColoring {
    /// The color of the `n`-th drawn ray.
    #[inline]
    #[must_use]
    pub fn color_for(&self, n: usize) -> Color {
        match self {
            Self::Cycle(colors) if !colors.is_empty() => colors[n % colors.len()],
            Self::Cycle(_) => Color::TAB10[n % Color::TAB10.len()],
            Self::Uniform(color) => *color,
        }
    }
}

/// A set of parameters for a rendering pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// Visible `(min, max)` range of the horizontal axis. Default: `(0, 100)`
    pub xlim: (f64, f64),
    /// Visible `(min, max)` range of the vertical axis. Default: `(0, 100)`
    pub ylim: (f64, f64),
    /// Whether the vertical axis grows downwards, like image coordinates. Default: `true`
    pub invert_y: bool,
    /// Default: [`Color::RED`]
    pub reflector_color: Color,
    pub ray_coloring: RayColoring,
    /// Marker drawn at every recorded ray position, `None` to draw none.
    /// Default: `Some(MarkerShape::Star)`
    pub marker: Option<MarkerShape>,
    pub marker_size: u32,
    pub line_width: u32,
    /// Whether to list every drawn ray in a legend. Default: `false`
    pub legend: bool,
    pub background: Color,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            xlim: (0., 100.),
            ylim: (0., 100.),
            invert_y: true,
            reflector_color: Color::RED,
            ray_coloring: RayColoring::default(),
            marker: Some(MarkerShape::Star),
            marker_size: 6,
            line_width: 2,
            legend: false,
            background: Color::WHITE,
        }
    }
}

impl RenderParams {
    #[inline]
    #[must_use]
    pub fn with_xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = (min, max);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = (min, max);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_invert_y(mut self, invert_y: bool) -> Self {
        self.invert_y = invert_y;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_reflector_color(mut self, color: Color) -> Self {
        self.reflector_color = color;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_ray_coloring(mut self, coloring: RayColoring) -> Self {
        self.ray_coloring = coloring;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_marker(mut self, marker: Option<MarkerShape>) -> Self {
        self.marker = marker;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_marker_size(mut self, size: u32) -> Self {
        self.marker_size = size;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }
}

/// Draws reflectors and ray paths onto a [`Canvas`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Renderer {
    params: RenderParams,
}

impl Renderer {
    #[inline]
    #[must_use]
    pub const fn new(params: RenderParams) -> Self {
        Self { params }
    }

    #[inline]
    #[must_use]
    pub const fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Decides what to draw, without drawing it.
    ///
    /// Every reflector yields one segment. Every ray with `k >= 2` recorded
    /// positions yields `k - 1` segments, all sharing one color, and `k` markers.
    /// Rays with fewer positions are skipped.
    pub fn chart<'a, S>(
        &self,
        reflectors: &(impl Plottable + ?Sized),
        rays: impl IntoIterator<Item = &'a Ray<S>>,
    ) -> Result<Chart, RenderError>
    where
        S: Scalar + AsPrimitive<f64>,
    {
        let params = &self.params;
        let viewport = Viewport::new(params.xlim, params.ylim, params.invert_y)?;

        let mut list = List::new();
        reflectors.append_segments(&mut list);

        let mut segments: Vec<_> = list
            .into_inner()
            .into_iter()
            .enumerate()
            .map(|(i, [from, to])| {
                debug!(reflector = i, start = ?[from.x, from.y], end = ?[to.x, to.y]);
                Segment {
                    from,
                    to,
                    color: params.reflector_color,
                    kind: SegmentKind::Reflector(i),
                }
            })
            .collect();

        let mut markers = vec![];
        let mut legend = vec![];
        let mut drawn = 0;
        let mut path = vec![];

        for (i, ray) in rays.into_iter().enumerate() {
            let history = ray.position_history();

            if history.len() < 2 {
                debug!(ray = i, positions = history.len(), "nothing to connect, skipping ray");
                continue;
            }

            let color = ray
                .color()
                .unwrap_or_else(|| params.ray_coloring.color_for(drawn));
            drawn += 1;

            path.clear();
            path.extend(history.iter().map(to_point));

            segments.extend(path.windows(2).map(|window| {
                let [from, to] = window else { unreachable!() };
                Segment {
                    from: *from,
                    to: *to,
                    color,
                    kind: SegmentKind::Ray(i),
                }
            }));

            if let Some(shape) = params.marker {
                markers.extend(path.iter().map(|&at| Marker {
                    at,
                    color,
                    shape,
                    ray: i,
                }));
            }

            if params.legend {
                legend.push(LegendEntry {
                    label: ray
                        .label()
                        .map_or_else(|| format!("Ray {i}"), str::to_owned),
                    color,
                    marker: params.marker,
                });
            }
        }

        let clipped = segments
            .iter()
            .filter(|s| !viewport.contains(&s.from) || !viewport.contains(&s.to))
            .count();

        if clipped > 0 {
            debug!(clipped, "some segments leave the visible range");
        }

        Ok(Chart {
            viewport,
            background: params.background,
            stroke: Stroke {
                line_width: params.line_width,
                marker_size: params.marker_size,
            },
            segments,
            markers,
            legend,
        })
    }

    /// Draws `reflectors` and `rays` onto `canvas`, returning what was drawn.
    pub fn render<'a, S, C>(
        &self,
        reflectors: &(impl Plottable + ?Sized),
        rays: impl IntoIterator<Item = &'a Ray<S>>,
        canvas: &mut C,
    ) -> Result<Chart, RenderError>
    where
        S: Scalar + AsPrimitive<f64>,
        C: Canvas + ?Sized,
    {
        let chart = self.chart(reflectors, rays)?;
        chart.draw(canvas)?;
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const NO_REFLECTORS: &[Reflector] = &[];

    fn single_ray_scene() -> (Vec<Reflector>, Vec<Ray>) {
        (
            vec![Reflector::new([0., 0.], [10., 10.])],
            vec![Ray::new([[1., 1.], [2., 2.], [3., 3.]])],
        )
    }

    #[test]
    fn one_reflector_one_ray() {
        let (reflectors, rays) = single_ray_scene();
        let mut canvas = Recorder::new();

        let chart = Renderer::default()
            .render(&reflectors, &rays, &mut canvas)
            .unwrap();

        assert_eq!(chart.reflector_segments().count(), 1);
        assert_eq!(chart.ray_segments(0).count(), 2);
        assert_eq!(chart.viewport.xlim(), (0., 100.));
        assert_eq!(chart.viewport.ylim(), (0., 100.));
        assert!(chart.viewport.invert_y());

        let reflector = chart.reflector_segments().next().unwrap();
        assert_eq!(reflector.color, Color::RED);
        assert_eq!(reflector.from, Point::new(0., 0.));
        assert_eq!(reflector.to, Point::new(10., 10.));

        let ray_colors: Vec<_> = chart.ray_segments(0).map(|s| s.color).collect();
        assert_eq!(ray_colors, vec![Color::TAB10[0]; 2]);

        assert_eq!(canvas.segments().count(), 3);
        assert_eq!(canvas.markers().count(), 3);
        assert!(canvas.is_finished());
    }

    #[test]
    fn single_position_ray_draws_nothing() {
        let rays = [Ray::new([[4., 2.]]), Ray::default()];
        let mut canvas = Recorder::new();

        let chart = Renderer::default()
            .render(NO_REFLECTORS, &rays, &mut canvas)
            .unwrap();

        assert!(chart.segments.is_empty());
        assert!(chart.markers.is_empty());
        assert_eq!(
            canvas.ops(),
            [
                DrawOp::Begin {
                    viewport: chart.viewport,
                    background: Color::WHITE,
                },
                DrawOp::Finish,
            ]
        );
    }

    #[test]
    fn segment_counts_match_random_scenes() {
        let mut rng = StdRng::seed_from_u64(0x6d69726f6972);

        for _ in 0..64 {
            let reflectors: Vec<Reflector> = (0..rng.gen_range(0..8))
                .map(|_| Reflector::new(rng.gen::<[f64; 2]>(), rng.gen::<[f64; 2]>()))
                .collect();

            let rays: Vec<Ray> = (0..rng.gen_range(0..8))
                .map(|_| {
                    (0..rng.gen_range(0..6))
                        .map(|_| rng.gen::<[f64; 2]>().map(|c| c * 100.))
                        .collect()
                })
                .collect();

            let chart = Renderer::default().chart(&reflectors, &rays).unwrap();

            assert_eq!(chart.reflector_segments().count(), reflectors.len());

            for (i, ray) in rays.iter().enumerate() {
                let k = ray.position_history().len();
                let segments: Vec<_> = chart.ray_segments(i).collect();

                assert_eq!(segments.len(), k.saturating_sub(1));
                assert!(segments.iter().all(|s| s.color == segments[0].color));

                let markers = chart.markers.iter().filter(|m| m.ray == i).count();
                assert_eq!(markers, if k >= 2 { k } else { 0 });
            }
        }
    }

    #[test]
    fn segments_follow_traversal_order() {
        let rays = [Ray::new([[5., 5.], [50., 5.], [50., 80.]])];
        let chart = Renderer::default().chart(NO_REFLECTORS, &rays).unwrap();

        let ends: Vec<_> = chart.ray_segments(0).map(|s| (s.from, s.to)).collect();
        assert_eq!(
            ends,
            vec![
                (Point::new(5., 5.), Point::new(50., 5.)),
                (Point::new(50., 5.), Point::new(50., 80.)),
            ]
        );
    }

    #[test]
    fn skipped_rays_do_not_consume_colors() {
        let rays = [
            Ray::new([[0., 0.], [1., 1.]]),
            Ray::new([[3., 3.]]),
            Ray::new([[0., 0.], [1., 1.]]),
            Ray::new([[0., 0.], [1., 1.]]).with_color(Color::BLUE),
        ];

        let chart = Renderer::default().chart(NO_REFLECTORS, &rays).unwrap();

        let color_of = |i| chart.ray_segments(i).next().map(|s| s.color);

        assert_eq!(color_of(0), Some(Color::TAB10[0]));
        assert_eq!(color_of(1), None);
        assert_eq!(color_of(2), Some(Color::TAB10[1]));
        assert_eq!(color_of(3), Some(Color::BLUE));
    }

    #[test]
    fn uniform_coloring() {
        let rays = [
            Ray::new([[0., 0.], [1., 1.]]),
            Ray::new([[2., 0.], [1., 1.]]),
        ];
        let params = RenderParams::default().with_ray_coloring(RayColoring::Uniform(Color::BLUE));

        let chart = Renderer::new(params).chart(NO_REFLECTORS, &rays).unwrap();

        assert!(chart.segments.iter().all(|s| s.color == Color::BLUE));
    }

    #[test]
    fn cycle_wraps_around() {
        let coloring = RayColoring::Cycle(vec![Color::RED, Color::BLUE]);
        assert_eq!(coloring.color_for(0), Color::RED);
        assert_eq!(coloring.color_for(3), Color::BLUE);
        assert_eq!(RayColoring::Cycle(vec![]).color_for(1), Color::TAB10[1]);
    }

    #[test]
    fn legend_lists_drawn_rays() {
        let rays = [
            Ray::new([[0., 0.], [1., 1.]]),
            Ray::new([[9., 9.]]),
            Ray::new([[0., 0.], [1., 1.]]).with_label("bounce"),
        ];

        let mut canvas = Recorder::new();
        let chart = Renderer::new(RenderParams::default().with_legend(true))
            .render(NO_REFLECTORS, &rays, &mut canvas)
            .unwrap();

        let labels: Vec<_> = chart.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Ray 0", "bounce"]);
        assert_eq!(chart.legend[1].color, Color::TAB10[1]);

        let ops = canvas.ops();
        assert!(matches!(&ops[ops.len() - 2], DrawOp::Legend(entries) if entries.len() == 2));
    }

    #[test]
    fn no_legend_by_default() {
        let (reflectors, rays) = single_ray_scene();
        let mut canvas = Recorder::new();

        let chart = Renderer::default()
            .render(&reflectors, &rays, &mut canvas)
            .unwrap();

        assert!(chart.legend.is_empty());
        assert!(!canvas.ops().iter().any(|op| matches!(op, DrawOp::Legend(_))));
    }

    #[test]
    fn markers_can_be_disabled() {
        let (reflectors, rays) = single_ray_scene();
        let params = RenderParams::default().with_marker(None);

        let chart = Renderer::new(params).chart(&reflectors, &rays).unwrap();

        assert!(chart.markers.is_empty());
        assert_eq!(chart.segments.len(), 3);
    }

    #[test]
    fn ranges_are_per_call() {
        let (reflectors, rays) = single_ray_scene();

        let small = Renderer::new(RenderParams::default().with_xlim(0., 10.).with_ylim(0., 10.));
        let chart = small.chart(&reflectors, &rays).unwrap();
        assert_eq!(chart.viewport.xlim(), (0., 10.));

        let chart = Renderer::default().chart(&reflectors, &rays).unwrap();
        assert_eq!(chart.viewport.xlim(), (0., 100.));
    }

    #[test]
    fn empty_range_is_an_error() {
        let (reflectors, rays) = single_ray_scene();
        let renderer = Renderer::new(RenderParams::default().with_ylim(3., 3.));

        let err = renderer.chart(&reflectors, &rays).unwrap_err();

        assert!(matches!(
            err,
            RenderError::InvalidRange {
                axis: Axis::Y,
                min,
                max,
            } if min == 3. && max == 3.
        ));
        assert_eq!(
            err.to_string(),
            "invalid y range [3, 3]: bounds must be finite and distinct"
        );
    }

    #[derive(Debug, thiserror::Error)]
    #[error("out of ink")]
    struct OutOfInk;

    struct FailingCanvas;

    impl Canvas for FailingCanvas {
        type Error = OutOfInk;

        fn begin(&mut self, _: &Chart) -> Result<(), OutOfInk> {
            Ok(())
        }

        fn draw_segment(&mut self, _: &Segment) -> Result<(), OutOfInk> {
            Err(OutOfInk)
        }

        fn draw_marker(&mut self, _: &Marker) -> Result<(), OutOfInk> {
            Ok(())
        }

        fn draw_legend(&mut self, _: &[LegendEntry]) -> Result<(), OutOfInk> {
            Ok(())
        }

        fn finish(&mut self) -> Result<(), OutOfInk> {
            Ok(())
        }
    }

    #[test]
    fn surface_errors_are_kept_as_source() {
        let (reflectors, rays) = single_ray_scene();

        let err = Renderer::default()
            .render(&reflectors, &rays, &mut FailingCanvas)
            .unwrap_err();

        assert!(matches!(err, RenderError::Surface(_)));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "out of ink");
    }
}
