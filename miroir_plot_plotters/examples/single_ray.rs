use miroir_plot::{Ray, Reflector, Renderer};
use miroir_plot_plotters::{save_svg, DEFAULT_SIZE};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let reflectors = [Reflector::new([0., 0.], [10., 10.])];
    let rays = [Ray::new([[1., 1.], [2., 2.], [3., 3.]])];

    save_svg("single_ray.svg", &Renderer::default(), &reflectors, &rays, DEFAULT_SIZE)?;

    Ok(())
}
