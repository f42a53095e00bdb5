use miroir_plot::{Ray, Reflector, RenderParams, Renderer};
use miroir_plot_glium::ChartWindow;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mirrors = [
        Reflector::new([1f32, 1.], [9., 1.]),
        Reflector::new([9., 1.], [9., 9.]),
        Reflector::new([2., 9.], [8., 6.]),
    ];

    let rays = [
        Ray::new([[5f32, 5.], [9., 3.], [6., 1.], [2., 4.]]),
        Ray::new([[3., 3.], [9., 7.], [5., 7.5]]),
    ];

    let renderer = Renderer::new(RenderParams::default().with_xlim(0., 10.).with_ylim(0., 10.));

    ChartWindow::open("miroir_plot")?.display(&renderer, &mirrors, &rays)?;

    Ok(())
}
