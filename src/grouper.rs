use crate::context::Context;
use crate::neighbors::Neighbor;
use crate::registry::{EdgeKey, TriangleKey};
use crate::utils::segments_intersect;
use crate::DotId;

/// Observer for grouper, used to monitor how the graph grows, quite useful
/// for visual debugging. Check demo's draw.
#[allow(unused_variables)]
pub trait Observer {
    /// A dot is visited, before any of its edges are tried
    fn enter_dot(&mut self, dot_id: DotId, context: &Context) {}

    /// All neighbors of the dot are visited
    fn exit_dot(&mut self, dot_id: DotId, context: &Context) {}

    /// An edge passed the crossing test and is in the registry
    #[inline]
    fn edge_admitted(&mut self, edge: EdgeKey, context: &Context) {}

    /// A spoke crossed an admitted edge
    #[inline]
    fn edge_rejected(&mut self, from: DotId, to: DotId, context: &Context) {}

    /// A fan triangle is in the registry
    #[inline]
    fn triangle_admitted(&mut self, triangle: TriangleKey, context: &Context) {}

    /// One of the fan triangle's edges crossed an admitted edge
    #[inline]
    fn triangle_rejected(&mut self, dots: [DotId; 3], context: &Context) {}

    /// Traversal done
    fn grouped(&mut self, context: &Context) {}
}

/// Default dummy observer, blank impl, so all calls should be optimized out by compiler.
impl Observer for () {}

/// Grows a graph of non-crossing edges and triangles over the dots reachable from a seed.
///
/// Every visited dot first tries the spokes to its neighbors in angular order, then
/// closes the fan between angularly consecutive neighbors. An edge is only admitted
/// when it crosses no edge admitted earlier during the traversal, so the result is
/// planar, but it depends on seed and visiting order.
pub struct Grouper;

impl Grouper {
    /// Run the traversal with dummy observer
    pub fn group(seed: DotId, context: &mut Context) {
        Self::group_with_observer(seed, context, &mut ())
    }

    /// Run the traversal with observer.
    ///
    /// Visits depth first, in the order a recursion over each dot's neighbor list
    /// (nearest first) would, with an explicit stack so large swarms can't overflow.
    /// Dots not reachable through the neighbor relation stay unvisited.
    pub fn group_with_observer(seed: DotId, context: &mut Context, observer: &mut impl Observer) {
        if context.dots.get(seed).is_none() || context.is_visited(seed) {
            return;
        }

        // reusable angular order buffer
        let mut order = Vec::<Neighbor>::with_capacity(16);
        // (dot, index of the next neighbor to try)
        let mut stack = Vec::<(DotId, usize)>::with_capacity(context.dots.len());

        Self::visit(seed, context, &mut order, observer);
        stack.push((seed, 0));

        let neighborhoods = context.neighborhoods;
        while let Some(frame) = stack.last_mut() {
            let (dot_id, cursor) = *frame;
            let neighbors = neighborhoods.of(dot_id);

            match neighbors
                .iter()
                .skip(cursor)
                .position(|n| !context.is_visited(n.dot))
            {
                Some(offset) => {
                    frame.1 = cursor + offset + 1;
                    let next = neighbors[cursor + offset].dot;
                    Self::visit(next, context, &mut order, observer);
                    stack.push((next, 0));
                }
                None => {
                    stack.pop();
                    observer.exit_dot(dot_id, context);
                }
            }
        }

        observer.grouped(context);
    }

    fn visit(
        dot_id: DotId,
        context: &mut Context,
        order: &mut Vec<Neighbor>,
        observer: &mut impl Observer,
    ) {
        context.mark_visited(dot_id);
        observer.enter_dot(dot_id, context);

        order.clear();
        order.extend_from_slice(context.neighborhoods.of(dot_id));
        order.sort_by(|a, b| b.angle.total_cmp(&a.angle));

        Self::admit_spokes(dot_id, order, context, observer);
        Self::admit_fan(dot_id, order, context, observer);

        tracing::trace!(
            dot = dot_id.as_u32(),
            connections = context.own_connections(dot_id).len(),
            "dot grouped"
        );
    }

    /// Edges from `center` to each neighbor. A rejected spoke is not retried this traversal.
    fn admit_spokes(
        center: DotId,
        order: &[Neighbor],
        context: &mut Context,
        observer: &mut impl Observer,
    ) {
        for neighbor in order {
            if Self::crosses_admitted(center, neighbor.dot, context) {
                observer.edge_rejected(center, neighbor.dot, context);
                continue;
            }

            let edge = context.edges.add([center, neighbor.dot]);
            context.connect(center, neighbor.dot);
            observer.edge_admitted(edge, context);
        }
    }

    /// Triangles between `center` and each pair of angularly consecutive neighbors,
    /// wrapping from the last neighbor back to the first.
    fn admit_fan(
        center: DotId,
        order: &[Neighbor],
        context: &mut Context,
        observer: &mut impl Observer,
    ) {
        // a single neighbor has no pair to close
        if order.len() < 2 {
            return;
        }

        for (idx, from) in order.iter().enumerate() {
            let to = &order[(idx + 1) % order.len()];

            let collide = Self::crosses_admitted(from.dot, to.dot, context)
                || Self::crosses_admitted(center, to.dot, context)
                || Self::crosses_admitted(center, from.dot, context);

            if collide {
                observer.triangle_rejected([center, to.dot, from.dot], context);
                continue;
            }

            let edge = context.edges.add([to.dot, from.dot]);
            observer.edge_admitted(edge, context);
            let triangle = context.triangles.add([center, to.dot, from.dot]);
            observer.triangle_admitted(triangle, context);
        }
    }

    /// whether segment a-b crosses any edge admitted so far
    fn crosses_admitted(a: DotId, b: DotId, context: &Context) -> bool {
        let dots = context.dots;
        let a = (a, a.get(dots));
        let b = (b, b.get(dots));

        context.edges.iter().any(|edge| {
            let [p, q] = edge.members();
            segments_intersect(a, b, (p, p.get(dots)), (q, q.get(dots)))
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{
        dots::{Dots, DotsBuilder},
        neighbors::Neighborhoods,
        registry::{EdgeRegistry, TriangleRegistry},
        shape::Point,
        Float,
    };

    #[derive(Default)]
    struct CountOb {
        entered: Vec<DotId>,
        exited: usize,
        edges_admitted: usize,
        edges_rejected: usize,
        triangles_admitted: usize,
        triangles_rejected: usize,
        grouped: bool,
    }

    impl Observer for CountOb {
        fn enter_dot(&mut self, dot_id: DotId, _context: &Context) {
            self.entered.push(dot_id);
        }

        fn exit_dot(&mut self, _dot_id: DotId, _context: &Context) {
            self.exited += 1;
        }

        fn edge_admitted(&mut self, _edge: EdgeKey, _context: &Context) {
            self.edges_admitted += 1;
        }

        fn edge_rejected(&mut self, _from: DotId, _to: DotId, _context: &Context) {
            self.edges_rejected += 1;
        }

        fn triangle_admitted(&mut self, _triangle: TriangleKey, _context: &Context) {
            self.triangles_admitted += 1;
        }

        fn triangle_rejected(&mut self, _dots: [DotId; 3], _context: &Context) {
            self.triangles_rejected += 1;
        }

        fn grouped(&mut self, _context: &Context) {
            self.grouped = true;
        }
    }

    fn dots_of(points: &[(Float, Float)]) -> Dots {
        let mut builder = DotsBuilder::with_capacity(points.len());
        for &(x, y) in points {
            builder.add_point(Point::new(x, y));
        }
        builder.build()
    }

    fn random_dots(count: usize, seed: u64) -> Dots {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut builder = DotsBuilder::with_capacity(count);
        for _ in 0..count {
            let x: Float = rng.gen_range(0.0..800.);
            let y: Float = rng.gen_range(0.0..800.);
            builder.add_point(Point::new(x, y));
        }
        builder.build()
    }

    fn assert_planar(dots: &Dots, edges: &EdgeRegistry) {
        let edges = edges.iter().map(|e| e.members()).collect::<Vec<_>>();
        for (i, [a, b]) in edges.iter().enumerate() {
            for [c, d] in edges.iter().skip(i + 1) {
                let crossing = segments_intersect(
                    (*a, a.get(dots)),
                    (*b, b.get(dots)),
                    (*c, c.get(dots)),
                    (*d, d.get(dots)),
                );
                assert!(!crossing, "edges {a:?}-{b:?} and {c:?}-{d:?} cross");
            }
        }
    }

    #[test]
    fn test_square() {
        let dots = dots_of(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)]);
        let ids = dots.ids().collect::<Vec<_>>();
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        let neighborhoods = Neighborhoods::compute(&dots, 3);

        let mut edges = EdgeRegistry::default();
        let mut triangles = TriangleRegistry::default();
        let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
        let mut observer = CountOb::default();
        Grouper::group_with_observer(a, &mut context, &mut observer);

        assert_eq!(context.visited_count(), 4);
        assert!(observer.grouped);
        assert_eq!(observer.exited, 4);
        assert!(observer.triangles_admitted >= 2);
        assert_eq!(observer.entered[0], a);
        let grouping = context.finish();
        assert!(ids.iter().all(|id| grouping.is_visited(*id)));

        for outer in [[a, b], [b, c], [c, d], [d, a]] {
            assert!(edges.contains(&EdgeKey::new(outer)), "missing {outer:?}");
        }
        let ac = edges.contains(&EdgeKey::new([a, c]));
        let bd = edges.contains(&EdgeKey::new([b, d]));
        assert!(ac || bd);
        assert!(!(ac && bd));

        assert!(!triangles.is_empty());
        for triangle in triangles.iter() {
            let [p, q, r] = triangle.members();
            for edge in [[p, q], [q, r], [r, p]] {
                assert!(edges.contains(&EdgeKey::new(edge)));
            }
        }
        assert_planar(&dots, &edges);
    }

    #[test]
    fn test_square_first_spokes_belong_to_seed() {
        let dots = dots_of(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)]);
        let ids = dots.ids().collect::<Vec<_>>();
        let neighborhoods = Neighborhoods::compute(&dots, 3);

        let mut edges = EdgeRegistry::default();
        let mut triangles = TriangleRegistry::default();
        let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
        Grouper::group(ids[0], &mut context);

        // nothing was admitted before the seed, all its spokes pass
        let mut spokes = context.own_connections(ids[0]).to_vec();
        spokes.sort();
        assert_eq!(spokes, vec![ids[1], ids[2], ids[3]]);

        // b's spoke to d would cross a-c
        assert!(!context.own_connections(ids[1]).contains(&ids[3]));
    }

    #[test]
    fn test_random_planar() {
        for (seed, k) in [(1, 3), (2, 6), (3, 10), (4, 10)] {
            let dots = random_dots(80, seed);
            let neighborhoods = Neighborhoods::compute(&dots, k);

            let mut edges = EdgeRegistry::default();
            let mut triangles = TriangleRegistry::default();
            let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
            Grouper::group(DotId(0), &mut context);
            let grouping = context.finish();

            assert!(grouping.visited_count() > 1);
            assert!(!edges.is_empty());
            assert_planar(&dots, &edges);

            for (dot, other) in grouping.iter_connections() {
                assert!(edges.contains(&EdgeKey::new([dot, other])));
            }
        }
    }

    #[test]
    fn test_unreachable_dots_stay_unvisited() {
        let dots = dots_of(&[
            (0., 0.),
            (10., 0.),
            (5., 8.),
            (1000., 1000.),
            (1010., 1000.),
            (1005., 1008.),
        ]);
        let ids = dots.ids().collect::<Vec<_>>();
        let neighborhoods = Neighborhoods::compute(&dots, 2);

        let mut edges = EdgeRegistry::default();
        let mut triangles = TriangleRegistry::default();
        let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
        Grouper::group(ids[0], &mut context);
        let grouping = context.finish();

        assert_eq!(grouping.visited_count(), 3);
        for far in &ids[3..] {
            assert!(!grouping.is_visited(*far));
            assert!(grouping.own_connections(*far).is_empty());
            assert!(edges.iter().all(|e| !e.contains(*far)));
        }
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_prior_edges_block_crossings() {
        let dots = dots_of(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)]);
        let ids = dots.ids().collect::<Vec<_>>();
        let neighborhoods = Neighborhoods::compute(&dots, 3);

        let mut edges = EdgeRegistry::default();
        edges.add([ids[1], ids[3]]);
        let mut triangles = TriangleRegistry::default();
        let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
        let mut observer = CountOb::default();
        Grouper::group_with_observer(ids[0], &mut context, &mut observer);

        assert!(!context.own_connections(ids[0]).contains(&ids[2]));
        assert!(observer.edges_rejected > 0);
        assert!(observer.triangles_rejected > 0);
        assert!(!edges.contains(&EdgeKey::new([ids[0], ids[2]])));
        assert_planar(&dots, &edges);
    }

    #[test]
    fn test_invalid_or_visited_seed() {
        let dots = dots_of(&[(0., 0.), (1., 0.)]);
        let neighborhoods = Neighborhoods::compute(&dots, 1);
        let mut edges = EdgeRegistry::default();
        let mut triangles = TriangleRegistry::default();

        let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
        let mut observer = CountOb::default();
        Grouper::group_with_observer(DotId(7), &mut context, &mut observer);
        assert_eq!(context.visited_count(), 0);
        assert!(!observer.grouped);

        Grouper::group(DotId(0), &mut context);
        assert_eq!(context.visited_count(), 2);
        let mut observer = CountOb::default();
        Grouper::group_with_observer(DotId(1), &mut context, &mut observer);
        assert!(observer.entered.is_empty());

        // a single neighbor closes no fan
        assert!(triangles.is_empty());
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_depth_first_order() {
        // a line of dots, each only sees its closest neighbors
        let dots = dots_of(&[(0., 0.), (10., 0.), (21., 0.), (33., 0.)]);
        let ids = dots.ids().collect::<Vec<_>>();
        let neighborhoods = Neighborhoods::compute(&dots, 1);

        let mut edges = EdgeRegistry::default();
        let mut triangles = TriangleRegistry::default();
        let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
        let mut observer = CountOb::default();
        Grouper::group_with_observer(ids[0], &mut context, &mut observer);

        // 0 -> 1 -> 0 (visited), 2 sees 1, 3 sees 2: only 0 and 1 reachable
        assert_eq!(observer.entered, vec![ids[0], ids[1]]);

        let neighborhoods = Neighborhoods::compute(&dots, 2);
        let mut edges = EdgeRegistry::default();
        let mut context = Context::new(&dots, &neighborhoods, &mut edges, &mut triangles);
        let mut observer = CountOb::default();
        Grouper::group_with_observer(ids[0], &mut context, &mut observer);
        assert_eq!(observer.entered, ids);
        assert!(observer.edges_admitted >= 3);
    }
}
