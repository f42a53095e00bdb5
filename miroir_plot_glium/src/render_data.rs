use gl::{
    index::{NoIndices, PrimitiveType},
    Surface,
};

use super::*;

const LINES: NoIndices = NoIndices(PrimitiveType::LinesList);
const POINTS: NoIndices = NoIndices(PrimitiveType::Points);

const VERTEX_SHADER_SRC: &str = r"
    #version 140

    in vec2 position;
    uniform mat4 transform;

    void main() {
        gl_Position = transform * vec4(position, 0.0, 1.0);
    }
";

const FRAGMENT_SHADER_SRC: &str = r"
    #version 140

    uniform vec4 color_vec;

    out vec4 color;

    void main() {
        color = color_vec;
    }
";

/// Draws an "x" around every point, `half_size` is in normalized device coordinates.
const MARKER_GEOMETRY_SHADER_SRC: &str = r"
    #version 330

    layout (points) in;
    layout (line_strip, max_vertices = 4) out;

    uniform vec2 half_size;

    void main() {
        vec4 pos = gl_in[0].gl_Position;

        vec4 t1 = vec4(half_size, 0.0, 0.0);

        gl_Position = pos + t1;
        EmitVertex();

        gl_Position = pos - t1;
        EmitVertex();
        EndPrimitive();

        vec4 t2 = vec4(half_size.x, -half_size.y, 0.0, 0.0);

        gl_Position = pos + t2;
        EmitVertex();

        gl_Position = pos - t2;
        EmitVertex();
        EndPrimitive();
    }
";

/// A [`GlChart`], uploaded to the GPU.
pub(crate) struct ChartRenderData {
    transform: [[f32; 4]; 4],
    background: [f32; 4],
    line_width: f32,
    marker_size: f32,
    lines: Vec<(gl::VertexBuffer<Vertex2D>, [f32; 4])>,
    markers: Vec<(gl::VertexBuffer<Vertex2D>, [f32; 4])>,
    program: gl::Program,
    marker_program: gl::Program,
}

fn upload_batches(
    display: &gl::Display,
    batches: &[Batch],
) -> Result<Vec<(gl::VertexBuffer<Vertex2D>, [f32; 4])>, GlChartError> {
    batches
        .iter()
        .map(|batch| {
            gl::VertexBuffer::immutable(display, &batch.vertices)
                .map(|buffer| (buffer, batch.color))
                .map_err(Into::into)
        })
        .collect()
}

impl ChartRenderData {
    pub(crate) fn upload(chart: &GlChart, display: &gl::Display) -> Result<Self, GlChartError> {
        let program =
            gl::Program::from_source(display, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC, None)?;

        let marker_program = gl::Program::from_source(
            display,
            VERTEX_SHADER_SRC,
            FRAGMENT_SHADER_SRC,
            Some(MARKER_GEOMETRY_SHADER_SRC),
        )?;

        Ok(Self {
            transform: *chart.transform(),
            background: chart.background(),
            line_width: chart.line_width(),
            marker_size: chart.marker_size(),
            lines: upload_batches(display, chart.line_batches())?,
            markers: upload_batches(display, chart.marker_batches())?,
            program,
            marker_program,
        })
    }

    pub(crate) fn draw(&self, display: &gl::Display) -> Result<(), GlChartError> {
        let mut target = display.draw();

        let [r, g, b, a] = self.background;
        target.clear_color(r, g, b, a);

        // the frame must be finished even if drawing failed
        let drawn = self.draw_batches(&mut target);
        target.finish()?;
        drawn
    }

    fn draw_batches(&self, target: &mut gl::Frame) -> Result<(), GlChartError> {
        let (width, height) = target.get_dimensions();

        let params = gl::DrawParameters {
            blend: gl::Blend::alpha_blending(),
            line_width: Some(self.line_width),
            ..Default::default()
        };

        for (buffer, color) in &self.lines {
            target.draw(
                buffer,
                LINES,
                &self.program,
                &gl::uniform! {
                    transform: self.transform,
                    color_vec: *color,
                },
                &params,
            )?;
        }

        let half_size = [
            self.marker_size / width.max(1) as f32,
            self.marker_size / height.max(1) as f32,
        ];

        let marker_params = gl::DrawParameters {
            line_width: Some(1.),
            ..params
        };

        for (buffer, color) in &self.markers {
            target.draw(
                buffer,
                POINTS,
                &self.marker_program,
                &gl::uniform! {
                    transform: self.transform,
                    color_vec: *color,
                    half_size: half_size,
                },
                &marker_params,
            )?;
        }

        Ok(())
    }
}
