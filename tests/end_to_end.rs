//! End-to-end tests: CSV in, tree built, forward and backward queries out.

mod common;

use cart_route::*;
use common::*;
use tempfile::TempDir;

fn trained_tree() -> (Vec<String>, Vec<Row>, DecisionTree) {
    let attributes = player_attributes();
    let rows = create_player_rows(150);
    let config = TreeConfigBuilder::new()
        .min_gain(0.001)
        .min_samples(2)
        .build()
        .unwrap();
    let tree = TreeBuilder::from_config(&config).unwrap().build(&rows).unwrap();
    (attributes, rows, tree)
}

#[test]
fn test_csv_to_prediction_workflow() -> anyhow::Result<()> {
    let _ = init();
    let dir = TempDir::new()?;
    let path = dir.path().join("players.csv");
    write_player_csv(&path, &player_attributes(), &create_player_rows(200));

    let dataset = load_csv(&path)?;
    assert_eq!(dataset.attributes(), player_attributes().as_slice());
    assert_eq!(dataset.num_rows(), 200);

    let (train, test) =
        train_test_split(dataset.rows(), DEFAULT_TRAIN_FRACTION, DEFAULT_BOOTSTRAP_SEED)?;
    assert_eq!(train.len(), 140);
    assert!(!test.is_empty());

    let tree = build(&train, ScoreFunction::Variance, 0.001, 2)?;
    assert!(tree.num_leaves() > 1);
    assert!(max_depth(&tree)? >= 1);

    let max_wage = 75.0;
    for row in &test {
        let percentages = classify(observation(row), &tree)?;
        let sum = percentage_sum(&percentages);
        assert!(sum <= 100.0 && sum >= 100.0 - percentages.len() as f64);

        let value = calculate_value(&percentages)?;
        assert!(value > 0.0 && value <= max_wage, "value {}", value);
    }
    Ok(())
}

#[test]
fn test_training_rows_are_recovered() {
    let (_, rows, tree) = trained_tree();
    // A training row always reaches the leaf it was counted in.
    let mut hits = 0;
    for row in &rows {
        let leaf = prediction::classify_leaf(observation(row), &tree).unwrap();
        if leaf.get(&row[row.len() - 1]).is_some() {
            hits += 1;
        }
    }
    assert_eq!(hits, rows.len());
}

#[test]
fn test_routes_for_a_target_wage() {
    let (attributes, _, tree) = trained_tree();
    let anchors = Anchors::demographic(30.0, 185.0, 80.0);

    let routes = find_routes(&tree, &anchors, &attributes).unwrap();
    assert_eq!(routes.len(), count_free_splits(&tree, &anchors, &attributes) + 1);
    for route in &routes {
        assert!(route
            .tokens
            .iter()
            .all(|t| anchors.get(&t.column).is_none()));
    }

    let target = 45.0;
    let best = route::closest_route(target, &routes).unwrap();
    let brute = routes
        .iter()
        .map(|r| (r.estimate - target).abs())
        .fold(f64::INFINITY, f64::min);
    assert_eq!((best.estimate - target).abs(), brute);

    let text: Vec<String> = routes.iter().map(ToString::to_string).collect();
    let from_text = route::select_route_from_paths(target, &text);
    let direct = select_route(target, &routes);
    match (from_text, direct) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        // a categorical Foot split on the chosen route cannot become a range
        (
            Err(CartError::NonNumericThreshold { .. }),
            Err(CartError::NonNumericThreshold { .. }),
        ) => {}
        (a, b) => panic!("mismatched results: {:?} vs {:?}", a, b),
    }
}

#[test]
fn test_missing_cells_blend_leaves() {
    let (_, rows, tree) = trained_tree();
    let labels: Vec<&Value> = rows.iter().map(|r| &r[r.len() - 1]).collect();

    let full: Vec<Option<Value>> = observation(&rows[0]).iter().cloned().map(Some).collect();
    let exact = classify_with_missing(&full, &tree).unwrap();
    let leaf = prediction::classify_leaf(observation(&rows[0]), &tree).unwrap();
    assert_eq!(&exact, leaf);

    let mut partial = full.clone();
    partial[4] = None;
    let blended = classify_with_missing(&partial, &tree).unwrap();
    assert!(!blended.is_empty());
    assert!(blended.iter().all(|(label, mass)| labels.contains(&label) && mass > 0.0));
}

#[test]
fn test_render_lists_every_node() {
    let (attributes, _, tree) = trained_tree();
    let rendered = tree.render(Some(attributes.as_slice())).unwrap();
    assert_eq!(rendered.lines().count(), tree.num_nodes());
    assert!(rendered.lines().skip(1).all(|l| l.trim_start().starts_with("T->")
        || l.trim_start().starts_with("F->")));
}

#[test]
fn test_empty_training_set() {
    let rows: Vec<Row> = Vec::new();
    let tree = build(&rows, ScoreFunction::Variance, 0.0, 0).unwrap();
    assert!(tree.is_empty());
    assert!(matches!(classify(&[], &tree), Err(CartError::EmptyTreeNode)));
    assert!(matches!(
        find_routes(&tree, &Anchors::new(), &player_attributes()),
        Err(CartError::EmptyTreeNode)
    ));
    assert!(matches!(select_route(10.0, &[]), Err(CartError::NoRouteFound)));
}
