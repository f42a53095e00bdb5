use gl::{backend::glutin::DisplayCreationError, glutin};
use glutin::{dpi, event, event_loop, window};
use miroir_plot::{
    nalgebra::{Matrix4, Scalar},
    num_traits::AsPrimitive,
    Canvas, Chart, LegendEntry, Marker, Plottable, Ray, RenderError, Renderer, Segment,
    Viewport,
};
use tracing::{error, info};

mod gl_chart;
mod render_data;

pub use gl_chart::*;
use render_data::ChartRenderData;

pub use glium as gl;
pub use miroir_plot;

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Vertex2D {
    pub position: [f32; 2],
}

gl::implement_vertex!(Vertex2D, position);

impl From<&miroir_plot::Point> for Vertex2D {
    #[inline]
    fn from(p: &miroir_plot::Point) -> Self {
        Self {
            position: [p.x as f32, p.y as f32],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GlChartError {
    #[error("failed to upload chart vertices: {0}")]
    Buffer(#[from] gl::vertex::BufferCreationError),
    #[error("failed to build chart shaders: {0}")]
    Program(#[from] gl::ProgramCreationError),
    #[error("failed to draw chart: {0}")]
    Draw(#[from] gl::DrawError),
    #[error("failed to present chart: {0}")]
    Swap(#[from] gl::SwapBuffersError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A handle for the window used to look at charts.
pub struct ChartWindow {
    events_loop: event_loop::EventLoop<()>,
    display: gl::Display,
}

impl ChartWindow {
    /// Create a new window to show charts in from a `winit`
    /// [`WindowBuilder`](window::WindowBuilder) and a [`glutin::ContextBuilder`].
    #[inline]
    pub fn new<T: glutin::ContextCurrentState>(
        wb: window::WindowBuilder,
        cb: glutin::ContextBuilder<T>,
    ) -> Result<Self, DisplayCreationError> {
        let events_loop = event_loop::EventLoop::default();
        gl::Display::new(wb, cb, &events_loop).map(|display| Self {
            events_loop,
            display,
        })
    }

    /// A square, multisampled, window titled `title`.
    #[inline]
    pub fn open(title: &str) -> Result<Self, DisplayCreationError> {
        Self::new(
            window::WindowBuilder::new()
                .with_inner_size(dpi::LogicalSize::new(800, 800))
                .with_title(title),
            glutin::ContextBuilder::new()
                .with_vsync(true)
                .with_multisampling(1 << 3),
        )
    }

    /// Renders `reflectors` and `rays`, then shows them until the window is closed.
    pub fn display<'a, S>(
        self,
        renderer: &Renderer,
        reflectors: &(impl Plottable + ?Sized),
        rays: impl IntoIterator<Item = &'a Ray<S>>,
    ) -> Result<(), GlChartError>
    where
        S: Scalar + AsPrimitive<f64>,
    {
        let mut chart = GlChart::new();
        renderer.render(reflectors, rays, &mut chart)?;
        self.show(&chart)
    }

    /// Shows `chart` until the window is closed.
    ///
    /// Only returns if uploading `chart` to the GPU fails.
    pub fn show(self, chart: &GlChart) -> Result<(), GlChartError> {
        let Self {
            events_loop,
            display,
        } = self;

        let data = ChartRenderData::upload(chart, &display)?;
        info!(
            lines = chart.line_batches().len(),
            markers = chart.marker_batches().len(),
            "chart window open"
        );

        events_loop.run(move |ev, _, control_flow| {
            *control_flow = event_loop::ControlFlow::Wait;

            match ev {
                event::Event::WindowEvent { event, .. } => match event {
                    event::WindowEvent::CloseRequested => {
                        *control_flow = event_loop::ControlFlow::Exit;
                    }
                    event::WindowEvent::Resized(physical_size) => {
                        display.gl_window().resize(physical_size);
                        display.gl_window().window().request_redraw();
                    }
                    _ => {}
                },
                event::Event::RedrawRequested(_) => {
                    if let Err(err) = data.draw(&display) {
                        error!(%err, "closing chart window");
                        *control_flow = event_loop::ControlFlow::Exit;
                    }
                }
                _ => (),
            }
        })
    }
}
