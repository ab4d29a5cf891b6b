use crate::{
    dots::{DotId, Dots},
    utils::{angle, distance},
    Float,
};

/// One of the nearest dots, as seen from the dot that computed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub distance: Float,
    pub dot: DotId,
    /// angle from the owner to this neighbor, in (-PI, PI]
    pub angle: Float,
}

/// The `k` closest other dots, ascending by distance.
///
/// Keeps a short sorted list and only inserts candidates closer than the current
/// farthest one, which is cheap as long as `k` is small compared to the dot count.
/// Fewer than `k` records are returned when there are not enough other dots.
pub fn find_neighbors(owner: DotId, dots: &Dots, k: usize) -> Vec<Neighbor> {
    let mut near = Vec::<Neighbor>::with_capacity(k + 1);
    if k == 0 {
        return near;
    }
    let Some(origin) = dots.get_point(owner) else {
        return near;
    };

    for (dot_id, dot) in dots.iter() {
        if dot_id == owner {
            continue;
        }
        let distance = distance(origin, dot.position);

        if let Some(farthest) = near.last() {
            if near.len() == k && distance >= farthest.distance {
                continue;
            }
        }

        let index = near.partition_point(|n| n.distance <= distance);
        near.insert(
            index,
            Neighbor {
                distance,
                dot: dot_id,
                angle: angle(origin, dot.position),
            },
        );
        near.truncate(k);
    }

    near
}

/// Neighbor lists of every dot for a single frame, indexed by `DotId`.
#[derive(Debug, Default, Clone)]
pub struct Neighborhoods {
    lists: Vec<Vec<Neighbor>>,
}

impl Neighborhoods {
    /// Compute fresh neighbor lists for all dots
    pub fn compute(dots: &Dots, k: usize) -> Self {
        Self {
            lists: dots.ids().map(|id| find_neighbors(id, dots, k)).collect(),
        }
    }

    /// neighbors of `dot_id`, nearest first
    pub fn of(&self, dot_id: DotId) -> &[Neighbor] {
        self.lists
            .get(dot_id.as_usize())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dots::DotsBuilder, shape::Point};

    #[test]
    fn test_k_closest_sorted() {
        let mut builder = DotsBuilder::default();
        let owner = builder.add_point(Point::new(0., 0.));
        // distances 9, 3, 7, 1, 10, 5, 2, 8, 4, 6
        let mut ids = vec![];
        for d in [9., 3., 7., 1., 10., 5., 2., 8., 4., 6.] {
            ids.push(builder.add_point(Point::new(d, 0.)));
        }
        let dots = builder.build();

        let neighbors = find_neighbors(owner, &dots, 3);
        assert_eq!(neighbors.len(), 3);
        assert_eq!(
            neighbors.iter().map(|n| n.dot).collect::<Vec<_>>(),
            vec![ids[3], ids[6], ids[1]]
        );
        assert_eq!(
            neighbors.iter().map(|n| n.distance).collect::<Vec<_>>(),
            vec![1., 2., 3.]
        );
    }

    #[test]
    fn test_excludes_self_and_keeps_angle() {
        let mut builder = DotsBuilder::default();
        let owner = builder.add_point(Point::new(5., 5.));
        let above = builder.add_point(Point::new(5., 7.));
        let left = builder.add_point(Point::new(2., 5.));
        let dots = builder.build();

        let neighbors = find_neighbors(owner, &dots, 10);
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.iter().all(|n| n.dot != owner));

        assert_eq!(neighbors[0].dot, above);
        assert!((neighbors[0].angle - std::f64::consts::FRAC_PI_2 as Float).abs() < 1e-6);
        assert_eq!(neighbors[1].dot, left);
        assert!((neighbors[1].angle - std::f64::consts::PI as Float).abs() < 1e-6);
    }

    #[test]
    fn test_zero_k_and_lonely_dot() {
        let mut builder = DotsBuilder::default();
        let owner = builder.add_point(Point::new(0., 0.));
        let dots = builder.build();
        assert!(find_neighbors(owner, &dots, 5).is_empty());

        let mut builder = DotsBuilder::default();
        let owner = builder.add_point(Point::new(0., 0.));
        builder.add_point(Point::new(1., 0.));
        let dots = builder.build();
        assert!(find_neighbors(owner, &dots, 0).is_empty());
    }

    #[test]
    fn test_neighborhoods() {
        let mut builder = DotsBuilder::default();
        let a = builder.add_point(Point::new(0., 0.));
        let b = builder.add_point(Point::new(1., 0.));
        let c = builder.add_point(Point::new(5., 0.));
        let dots = builder.build();

        let neighborhoods = Neighborhoods::compute(&dots, 1);
        assert_eq!(neighborhoods.len(), 3);
        assert_eq!(neighborhoods.of(a)[0].dot, b);
        assert_eq!(neighborhoods.of(b)[0].dot, a);
        assert_eq!(neighborhoods.of(c)[0].dot, b);
        assert!(neighborhoods.of(DotId(9)).is_empty());
    }
}
