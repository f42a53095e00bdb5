//! Rays bouncing around between the walls of a box, with random paths.

use miroir_plot::{MarkerShape, Ray, Reflector, RenderParams, Renderer};
use miroir_plot_plotters::{save_png, DEFAULT_SIZE};
use rand::Rng;
use tracing_subscriber::EnvFilter;

const NUM_RAYS: usize = 4;
const MAX_BOUNCES: usize = 6;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let walls = [
        Reflector::new([10., 10.], [90., 10.]),
        Reflector::new([90., 10.], [90., 90.]),
        Reflector::new([90., 90.], [10., 90.]),
        Reflector::new([10., 90.], [10., 10.]),
    ];

    let mut rng = rand::thread_rng();

    let rays: Vec<Ray> = (0..NUM_RAYS)
        .map(|i| {
            let mut ray = Ray::default().with_label(format!("path {}", i + 1));
            ray.push([50., 50.]);

            // every bounce lands on a random wall
            for _ in 0..rng.gen_range(1..=MAX_BOUNCES) {
                let t = rng.gen_range(10.0..90.0);
                ray.push(match rng.gen_range(0..4) {
                    0 => [t, 10.],
                    1 => [90., t],
                    2 => [t, 90.],
                    _ => [10., t],
                });
            }

            ray
        })
        .collect();

    let renderer = Renderer::new(
        RenderParams::default()
            .with_marker(Some(MarkerShape::Circle))
            .with_legend(true),
    );

    save_png("random_box.png", &renderer, &walls, &rays, DEFAULT_SIZE)?;

    Ok(())
}
