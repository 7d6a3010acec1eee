//! Property-based tests for partitioning, building, classification and
//! route enumeration.

mod common;

use cart_route::*;
use common::*;
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i32..10).prop_map(|n| Value::Number(n as f64)),
        prop::sample::select(vec!["Left", "Right", "Both"]).prop_map(Value::from),
    ]
}

/// Rows of `width` feature cells followed by an integer label.
fn rows(width: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (prop::collection::vec(cell(), width), 0i32..5).prop_map(|(mut features, label)| {
            features.push(Value::Number(label as f64));
            features
        }),
        1..40,
    )
}

proptest! {
    #[test]
    fn prop_divide_set_partitions_rows(rows in rows(3), column in 0usize..3, split in cell()) {
        let (set1, set2) = divide_set(&rows, column, &split);
        prop_assert_eq!(set1.len() + set2.len(), rows.len());

        let mut seen = vec![0usize; rows.len()];
        for row in set1.iter().chain(set2.iter()) {
            let position = rows.iter().position(|r| std::ptr::eq(r, *row)).unwrap();
            seen[position] += 1;
        }
        prop_assert!(seen.iter().all(|&n| n == 1));

        prop_assert!(set1.iter().all(|row| row[column].satisfies(&split)));
        prop_assert!(set2.iter().all(|row| !row[column].satisfies(&split)));
    }

    #[test]
    fn prop_constant_label_is_a_single_leaf(rows in rows(3), label in 0i32..100) {
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|mut row| {
                let last = row.len() - 1;
                row[last] = Value::Number(label as f64);
                row
            })
            .collect();
        let tree = build(&rows, ScoreFunction::Variance, 0.0, 0).unwrap();
        prop_assert_eq!(tree.num_nodes(), 1);
        prop_assert_eq!(max_depth(&tree).unwrap(), 0);
    }

    #[test]
    fn prop_classify_percentages_sum_to_100(
        rows in rows(3),
        observation in prop::collection::vec(cell(), 3),
        score in prop::sample::select(vec![
            ScoreFunction::Gini,
            ScoreFunction::Entropy,
            ScoreFunction::Variance,
        ]),
    ) {
        let tree = build(&rows, score, 0.0, 0).unwrap();
        let percentages = classify(&observation, &tree).unwrap();
        let sum = percentage_sum(&percentages);
        prop_assert!(sum <= 100.0);
        prop_assert!(sum >= 100.0 - percentages.len() as f64);
        prop_assert!(percentages.iter().all(|(_, pct)| !pct.starts_with('-')));
    }

    #[test]
    fn prop_missing_cells_match_exact_when_complete(
        rows in rows(3),
        observation in prop::collection::vec(cell(), 3),
    ) {
        let tree = build(&rows, ScoreFunction::Variance, 0.0, 0).unwrap();
        let complete: Vec<Option<Value>> = observation.iter().cloned().map(Some).collect();
        let blended = classify_with_missing(&complete, &tree).unwrap();
        let exact = prediction::classify_leaf(&observation, &tree).unwrap();
        prop_assert_eq!(&blended, exact);
    }

    #[test]
    fn prop_route_count_matches_free_splits(
        rows in rows(3),
        age in 0i32..10,
        height in 0i32..10,
    ) {
        let attributes: Vec<String> =
            ["Age", "Height(CM)", "Foot", "Wage"].iter().map(|s| s.to_string()).collect();
        let tree = build(&rows, ScoreFunction::Variance, 0.0, 0).unwrap();
        let anchors = Anchors::demographic(age as f64, height as f64, 0.0);

        let routes = find_routes(&tree, &anchors, &attributes).unwrap();
        prop_assert_eq!(routes.len(), count_free_splits(&tree, &anchors, &attributes) + 1);
        for route in &routes {
            prop_assert!(route.tokens.iter().all(|t| t.column == "Foot"));
        }
    }
}
