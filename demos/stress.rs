use dotmesh_rs::{utils::segments_intersect, Context, DotId, Observer, Options, Swarm};
use rand::Rng;

/// Checks every traversal leaves no crossing edges behind
#[derive(Default)]
struct PlanarObserver {
    checked: usize,
}

impl Observer for PlanarObserver {
    fn grouped(&mut self, context: &Context) {
        let anchor = |id: DotId| (id, context.dots.get_point(id).unwrap());
        let edges = context.edges.iter().map(|e| e.members()).collect::<Vec<_>>();

        for (i, [a, b]) in edges.iter().enumerate() {
            for [c, d] in edges.iter().skip(i + 1) {
                assert!(
                    !segments_intersect(anchor(*a), anchor(*b), anchor(*c), anchor(*d)),
                    "crossing edges {a:?}-{b:?} {c:?}-{d:?}"
                );
            }
        }
        self.checked += edges.len();
    }
}

fn main() {
    let mut idx = 0;
    loop {
        idx += 1;
        println!("run {idx}");
        test_rand();
    }
}

fn test_rand() {
    let mut rng = rand::thread_rng();
    let options = Options::default()
        .with_dot_count(rng.gen_range(2..300))
        .with_max_neighbors(rng.gen_range(1..15));
    let mut swarm = Swarm::new(options, &mut rng).unwrap();

    let mut observer = PlanarObserver::default();
    for _ in 0..50 {
        swarm.step_with_observer(&mut (), &mut observer);
    }
    println!("checked {} edges", observer.checked);
}
