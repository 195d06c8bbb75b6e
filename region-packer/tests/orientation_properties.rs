//! Property-based tests for the orientation generator

use proptest::prelude::*;
use region_packer::{Cell, Shape, ShapeId, generate_orientations};
use std::collections::HashSet;

/// Arbitrary non-empty cell sets inside a 4x4 box, shifted by an offset
fn cell_sets() -> impl Strategy<Value = Vec<Cell>> {
    (
        prop::collection::hash_set((0i32..4, 0i32..4), 1..=9),
        -5i32..5,
        -5i32..5,
    )
        .prop_map(|(cells, dr, dc)| {
            cells
                .into_iter()
                .map(|(r, c)| Cell::new(r + dr, c + dc))
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// **Property 1: Bounded count, preserved area**
    /// *For any* shape, between 1 and 8 orientations are produced and each
    /// has the same number of cells as the shape.
    #[test]
    fn prop_count_and_area(cells in cell_sets()) {
        let orientations = generate_orientations(&cells);

        prop_assert!((1..=8).contains(&orientations.len()));
        for orientation in &orientations {
            prop_assert_eq!(orientation.len(), cells.len());
        }
    }

    /// **Property 2: Distinct orientations**
    /// *For any* shape, no two orientations are equal as normalized cell sets.
    #[test]
    fn prop_distinct(cells in cell_sets()) {
        let orientations = generate_orientations(&cells);
        let keys: HashSet<String> = orientations.iter().map(|o| o.key()).collect();

        prop_assert_eq!(keys.len(), orientations.len());
    }

    /// **Property 3: Normalized and sorted**
    /// *For any* orientation, the minimum row and minimum column are zero and
    /// cells are sorted by (row, col).
    #[test]
    fn prop_normalized(cells in cell_sets()) {
        for orientation in generate_orientations(&cells) {
            let cells = orientation.cells();
            prop_assert_eq!(cells.iter().map(|c| c.row).min(), Some(0));
            prop_assert_eq!(cells.iter().map(|c| c.col).min(), Some(0));
            prop_assert!(cells.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(
                orientation.height(),
                cells.iter().map(|c| c.row as usize + 1).max().unwrap()
            );
        }
    }

    /// **Property 4: Deterministic**
    /// *For any* shape, generating twice yields the same list in the same order.
    #[test]
    fn prop_idempotent(cells in cell_sets()) {
        prop_assert_eq!(generate_orientations(&cells), generate_orientations(&cells));
    }

    /// **Property 5: Closed under the symmetry group**
    /// *For any* orientation of a shape, re-orienting it gives back the same
    /// orientation set.
    #[test]
    fn prop_closed(cells in cell_sets()) {
        let expected: HashSet<String> = generate_orientations(&cells).iter().map(|o| o.key()).collect();

        for orientation in generate_orientations(&cells) {
            let again: HashSet<String> = generate_orientations(orientation.cells())
                .iter()
                .map(|o| o.key())
                .collect();
            prop_assert_eq!(&again, &expected);
        }
    }

    /// **Property 6: Shape wrapper agrees with the free function**
    #[test]
    fn prop_shape_orientations(cells in cell_sets()) {
        let shape = Shape::new(ShapeId(0), cells.clone()).unwrap();
        prop_assert_eq!(shape.orientations(), generate_orientations(&cells));
        prop_assert_eq!(shape.area(), cells.len());
    }
}
