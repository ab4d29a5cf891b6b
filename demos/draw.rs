/// This example renders a swarm frame by frame into an html flip book
use clap::Parser;
use dotmesh_rs::{
    loader::{Loader, PlainFileLoader},
    Context, DotId, EdgeKey, Observer, Options, Swarm, TriangleKey,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::fmt::SubscriberBuilder;
use utils::SvgRenderer;
mod utils;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Options file, `key value` per line
    #[arg(short, long)]
    path: Option<std::path::PathBuf>,

    /// Only save the last frame as svg
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,

    /// Override the dot count
    #[arg(long)]
    dots: Option<usize>,

    #[arg(long, default_value = "0")]
    seed: u64,

    /// Draw dots and own-connections on top of triangles
    #[arg(long, default_value = "false")]
    overlay: bool,

    #[arg(long, default_value = "false")]
    debug: bool,

    #[arg(long, default_value = "200")]
    frame_count: usize,
}

fn main() {
    let args = Args::parse();

    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(if args.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let mut options = match &args.path {
        Some(path) => PlainFileLoader::default()
            .load(path.as_os_str().to_str().unwrap())
            .unwrap(),
        None => Options::default(),
    };
    if let Some(dots) = args.dots {
        options.dot_count = dots;
    }
    if args.overlay {
        options.show_dots = true;
        options.show_own_connections = true;
    }

    let surface = options.surface;
    let mut swarm = Swarm::new(options, &mut StdRng::seed_from_u64(args.seed)).unwrap();
    let mut renderer = SvgRenderer::new(surface);
    let mut observer = DrawObserver::default();

    let start = std::time::Instant::now();
    for _ in 0..args.frame_count {
        swarm.step_with_observer(&mut renderer, &mut observer);
        if args.output.is_none() {
            observer.frames.push(renderer.document().to_string());
        }
    }
    let duration = start.elapsed() / args.frame_count.max(1) as u32;
    println!("{:?} per frame", duration);

    match args.output {
        Some(output_path) => renderer.save(output_path),
        None => observer.save(),
    }
}

#[derive(Default)]
struct DrawObserver {
    messages: Vec<String>,

    visited_count: u64,
    edge_count: u64,
    rejected_edge_count: u64,
    triangle_count: u64,
    rejected_triangle_count: u64,

    /// svgs
    frames: Vec<String>,
    frame_messages: Vec<Vec<String>>,
}

impl DrawObserver {
    fn save(&self) {
        use askama::Template;

        #[derive(Template)]
        #[template(path = "draw_template.html")]
        struct DrawTemplate<'a> {
            frames: &'a [String],
            frame_messages: &'a [Vec<String>],
            visited_count: u64,
            edge_count: u64,
            rejected_edge_count: u64,
            triangle_count: u64,
            rejected_triangle_count: u64,
        }

        let html_content = DrawTemplate {
            frames: self.frames.as_slice(),
            frame_messages: &self.frame_messages,
            visited_count: self.visited_count,
            edge_count: self.edge_count,
            rejected_edge_count: self.rejected_edge_count,
            triangle_count: self.triangle_count,
            rejected_triangle_count: self.rejected_triangle_count,
        }
        .render()
        .unwrap();

        std::fs::write("draw.html", html_content).unwrap();
    }
}

impl Observer for DrawObserver {
    fn enter_dot(&mut self, _dot_id: DotId, _context: &Context) {
        self.visited_count += 1;
    }

    fn edge_admitted(&mut self, _edge: EdgeKey, _context: &Context) {
        self.edge_count += 1;
    }

    fn edge_rejected(&mut self, from: DotId, to: DotId, _context: &Context) {
        self.rejected_edge_count += 1;
        self.messages.push(format!(
            "spoke rejected: {} -> {}",
            from.as_usize(),
            to.as_usize()
        ));
    }

    fn triangle_admitted(&mut self, _triangle: TriangleKey, _context: &Context) {
        self.triangle_count += 1;
    }

    fn triangle_rejected(&mut self, _dots: [DotId; 3], _context: &Context) {
        self.rejected_triangle_count += 1;
    }

    fn grouped(&mut self, context: &Context) {
        self.messages.push(format!(
            "grouped: {} of {} dots, {} edges, {} triangles",
            context.visited_count(),
            context.dots.len(),
            context.edges.len(),
            context.triangles.len(),
        ));
        self.frame_messages.push(std::mem::take(&mut self.messages));
    }
}
