use dotmesh_rs::{DotsBuilder, Options, Point, Swarm};
use utils::SvgRenderer;
mod utils;

fn main() {
    let mut builder = DotsBuilder::default();
    for (x, y) in [(200., 200.), (600., 200.), (600., 600.), (200., 600.)] {
        builder.add_point(Point::new(x, y));
    }

    let mut options = Options::default()
        .with_surface(800., 800.)
        .with_max_neighbors(3);
    options.show_dots = true;
    options.show_own_connections = true;
    options.dot_size = 12.;

    let surface = options.surface;
    let mut swarm = Swarm::with_dots(options, builder.build()).unwrap();
    let mut renderer = SvgRenderer::new(surface);
    let stats = swarm.step(&mut renderer);

    println!(
        "visited {} dots, {} edges, {} triangles",
        stats.visited, stats.edges, stats.triangles
    );
    renderer.save("square.svg".into());
}
