//! Common test utilities for cart-route integration tests.

#![allow(dead_code)]

use cart_route::*;
use rand::prelude::*;
use std::fs;
use std::path::Path;

/// Column names of the synthetic player table; `Wage` is the label.
pub fn player_attributes() -> Vec<String> {
    ["Age", "Height(CM)", "Weight(KG)", "Foot", "Skill", "Wage"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Wage a synthetic player earns: skill dominates, experience and a left
/// foot add a premium. Always an integer so label arithmetic stays exact.
pub fn player_wage(age: f64, skill: f64, foot: &str) -> f64 {
    let experience = if age >= 28.0 { 20.0 } else { 0.0 };
    let left_footed = if foot == "Left" { 5.0 } else { 0.0 };
    10.0 * skill + experience + left_footed
}

/// Create a deterministic synthetic player table
pub fn create_player_rows(num_players: usize) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(42);

    (0..num_players)
        .map(|_| {
            let age = rng.gen_range(17..38) as f64;
            let height = rng.gen_range(165..200) as f64;
            let weight = rng.gen_range(60..95) as f64;
            let foot = if rng.gen_bool(0.3) { "Left" } else { "Right" };
            let skill = rng.gen_range(1..6) as f64;
            vec![
                Value::Number(age),
                Value::Number(height),
                Value::Number(weight),
                Value::from(foot),
                Value::Number(skill),
                Value::Number(player_wage(age, skill, foot)),
            ]
        })
        .collect()
}

/// Write rows with a header line as CSV
pub fn write_player_csv(path: &Path, attributes: &[String], rows: &[Row]) {
    let mut content = attributes.join(",");
    content.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        content.push_str(&cells.join(","));
        content.push('\n');
    }
    fs::write(path, content).expect("Failed to write test CSV");
}

/// Observation part of a row (every cell but the label)
pub fn observation(row: &[Value]) -> &[Value] {
    &row[..row.len() - 1]
}

/// Counts the free splits reachable once anchored columns are pinned.
pub fn count_free_splits(tree: &DecisionTree, anchors: &Anchors, attributes: &[String]) -> usize {
    let mut free = 0;
    let mut stack = vec![0usize];
    while let Some(index) = stack.pop() {
        let node = &tree.nodes()[index];
        let (Some(column), Some(split), Some((t, f))) =
            (node.split_column(), node.split_value(), node.children())
        else {
            continue;
        };
        match anchors.resolve(&attributes[column], split) {
            Some(Branch::True) => stack.push(t),
            Some(Branch::False) => stack.push(f),
            None => {
                free += 1;
                stack.push(t);
                stack.push(f);
            }
        }
    }
    free
}

/// Sum of the integer percentages of a percentage map
pub fn percentage_sum(map: &PercentageMap) -> f64 {
    map.iter()
        .map(|(_, pct)| pct.trim_end_matches('%').parse::<f64>().unwrap())
        .sum()
}
