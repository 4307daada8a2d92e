/// Relabeling a target triangle's corners to line up with a source triangle
use nalgebra::Point3;

/// Every ordering of three corners: the rotations first, then the reflections.
/// Ties between equally good orderings resolve to the earliest entry.
pub const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
    [1, 0, 2],
    [0, 2, 1],
];

/// The best relabeling of a target triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Target corners reordered so `points[k]` pairs with source corner `k`
    pub points: [Point3<f32>; 3],
    /// Which entry of [`PERMUTATIONS`] produced `points`
    pub permutation: [usize; 3],
    /// Sum of corner-to-corner distances for this ordering
    pub cost: f32,
}

/// Total distance between paired corners when `target` is read in `order`
pub fn permutation_cost(
    source: &[Point3<f32>; 3],
    target: &[Point3<f32>; 3],
    order: [usize; 3],
) -> f32 {
    (0..3)
        .map(|k| (source[k] - target[order[k]]).norm())
        .sum()
}

/// Pick the ordering of `target` that moves its corners the least to reach
/// `source`, covering both windings.
pub fn align(source: &[Point3<f32>; 3], target: &[Point3<f32>; 3]) -> Alignment {
    let mut best = Alignment {
        points: *target,
        permutation: PERMUTATIONS[0],
        cost: f32::INFINITY,
    };

    for order in PERMUTATIONS {
        let cost = permutation_cost(source, target, order);
        if cost < best.cost {
            best = Alignment {
                points: order.map(|i| target[i]),
                permutation: order,
                cost,
            };
        }
    }

    best
}

/// Align corner lists of any length.
///
/// Two triangles go through [`align`]. Anything else skips the search and
/// pads `target` with its last point, or truncates it, to exactly three
/// points. An empty `target` pads with the origin.
pub fn align_points(source: &[Point3<f32>], target: &[Point3<f32>]) -> [Point3<f32>; 3] {
    if let (Ok(source), Ok(target)) = (
        <&[Point3<f32>; 3]>::try_from(source),
        <&[Point3<f32>; 3]>::try_from(target),
    ) {
        return align(source, target).points;
    }

    let last = target.last().copied().unwrap_or_else(Point3::origin);
    [0usize, 1, 2].map(|k| target.get(k).copied().unwrap_or(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(points: [[f32; 3]; 3]) -> [Point3<f32>; 3] {
        points.map(|[x, y, z]| Point3::new(x, y, z))
    }

    #[test]
    fn test_identical_order_is_kept() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let result = align(&a, &a);
        assert_eq!(result.permutation, [0, 1, 2]);
        assert_eq!(result.points, a);
        assert_relative_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_rotated_start_is_undone() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = [a[1], a[2], a[0]];
        let result = align(&a, &b);
        assert_eq!(result.permutation, [2, 0, 1]);
        assert_eq!(result.points, a);
    }

    #[test]
    fn test_reversed_winding_is_undone() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = [a[2], a[1], a[0]];
        let result = align(&a, &b);
        assert_eq!(result.permutation, [2, 1, 0]);
        assert_eq!(result.points, a);
        assert_relative_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_chosen_cost_is_minimal() {
        let base = [[0.1, -0.3, 0.2], [0.9, 0.1, -0.4], [-0.2, 0.8, 0.5]];
        let pairs = [
            (base, [[0.7, 0.6, 0.1], [-0.5, 0.2, 0.3], [0.4, -0.6, -0.2]]),
            // Reversed winding with a small offset: the reflection [2, 1, 0] wins
            (base, [[-0.1, 0.8, 0.6], [0.9, 0.2, -0.4], [0.1, -0.2, 0.2]]),
            // Swap of the first two corners: the reflection [1, 0, 2] wins
            (base, [[0.9, 0.1, -0.3], [0.1, -0.3, 0.3], [-0.2, 0.7, 0.5]]),
            // Rotation of the corners
            (base, [[0.9, 0.0, -0.4], [-0.2, 0.8, 0.4], [0.2, -0.3, 0.2]]),
            (
                [[3.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, -1.0]],
                [[-1.0, 4.0, 2.0], [2.5, -0.5, 1.0], [0.3, 0.3, -3.0]],
            ),
        ];

        for (a, b) in pairs {
            let (a, b) = (tri(a), tri(b));
            let result = align(&a, &b);
            for order in PERMUTATIONS {
                assert!(result.cost <= permutation_cost(&a, &b, order));
            }
            assert_relative_eq!(result.cost, permutation_cost(&a, &b, result.permutation));
        }

        let (a, b) = (tri(pairs[1].0), tri(pairs[1].1));
        assert_eq!(align(&a, &b).permutation, [2, 1, 0]);
        let (a, b) = (tri(pairs[2].0), tri(pairs[2].1));
        assert_eq!(align(&a, &b).permutation, [1, 0, 2]);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        // Every corner of the target coincides, so all orderings cost the same
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = tri([[5.0, 5.0, 5.0]; 3]);
        assert_eq!(align(&a, &b).permutation, [0, 1, 2]);
    }

    #[test]
    fn test_short_target_is_padded_with_last_point() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = [Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)];
        assert_eq!(align_points(&a, &b), [b[0], b[1], b[1]]);
    }

    #[test]
    fn test_long_target_is_truncated_without_search() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = [a[2], a[1], a[0], Point3::new(9.0, 9.0, 9.0)];
        assert_eq!(align_points(&a, &b), [a[2], a[1], a[0]]);
    }

    #[test]
    fn test_three_and_three_points_are_searched() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let b = vec![a[1], a[0], a[2]];
        assert_eq!(align_points(&a, &b), a);
    }

    #[test]
    fn test_empty_target_pads_with_origin() {
        let a = tri([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(align_points(&a, &[]), [Point3::origin(); 3]);
    }
}
