//! Target selection and range synthesis.
//!
//! [`select_route`] picks the route whose estimate is closest to a target
//! and folds its tokens into one human-readable range per column.

use crate::core::error::{CartError, Result};
use crate::core::types::Branch;
use crate::route::path::{PathToken, Route};
use std::fmt;

/// Accumulated bounds for one column.
///
/// A true-branch token is a lower bound (`col >= v`), a false-branch token
/// an upper bound (`col <= v`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Bound {
    fn new(branch: Branch, value: f64) -> Self {
        let mut bound = Bound {
            lower: None,
            upper: None,
        };
        bound.tighten(branch, value);
        bound
    }

    fn tighten(&mut self, branch: Branch, value: f64) {
        match branch {
            Branch::True => self.lower = Some(self.lower.map_or(value, |v| v.max(value))),
            Branch::False => self.upper = Some(self.upper.map_or(value, |v| v.min(value))),
        }
    }

    /// Lower bound from true-branch tokens.
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    /// Upper bound from false-branch tokens.
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Renders the bound for `column`.
    pub fn render(&self, column: &str) -> String {
        match (self.lower, self.upper) {
            (Some(a), Some(b)) => {
                let (low, high) = if a <= b { (a, b) } else { (b, a) };
                format!("{}<={}<={}", low, column, high)
            }
            (Some(low), None) => format!("{}>={}", column, low),
            (None, Some(high)) => format!("{}<={}", column, high),
            (None, None) => column.to_string(),
        }
    }
}

/// Per-column constraints, in the order columns first appear on the route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintMap {
    entries: Vec<(String, Bound)>,
}

impl ConstraintMap {
    /// Folds tokens in path order.
    ///
    /// Repeating a branch for a column keeps the tighter value (the larger
    /// for `T`, the smaller for `F`); the opposite branch adds the other
    /// side. Categorical split values cannot form a range.
    pub fn fold(tokens: &[PathToken]) -> Result<Self> {
        let mut map = ConstraintMap::default();
        for token in tokens {
            let value = token
                .split_value
                .as_f64()
                .ok_or_else(|| CartError::NonNumericThreshold {
                    column: token.column.clone(),
                    value: token.split_value.to_string(),
                })?;
            match map.entries.iter_mut().find(|(column, _)| *column == token.column) {
                Some((_, bound)) => bound.tighten(token.branch, value),
                None => map
                    .entries
                    .push((token.column.clone(), Bound::new(token.branch, value))),
            }
        }
        Ok(map)
    }

    /// Bound recorded for a column.
    pub fn bound(&self, column: &str) -> Option<&Bound> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, bound)| bound)
    }

    /// Rendered constraint for a column, e.g. `5<=Foot<=8`.
    pub fn get(&self, column: &str) -> Option<String> {
        self.bound(column).map(|bound| bound.render(column))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(column, rendered constraint)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.entries
            .iter()
            .map(|(column, bound)| (column.as_str(), bound.render(column)))
    }
}

impl fmt::Display for ConstraintMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (column, rendered)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", column, rendered)?;
        }
        write!(f, "}}")
    }
}

/// Route whose estimate is closest to `target`; ties keep the earliest.
/// Routes at a non-finite distance never qualify.
pub fn closest_route(target: f64, routes: &[Route]) -> Result<&Route> {
    let mut best: Option<(&Route, f64)> = None;
    for route in routes {
        let distance = (route.estimate - target).abs();
        if !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((route, distance)),
        }
    }
    best.map(|(route, _)| route).ok_or(CartError::NoRouteFound)
}

/// Picks the route closest to `target` and folds it into constraints.
pub fn select_route(target: f64, routes: &[Route]) -> Result<ConstraintMap> {
    let route = closest_route(target, routes)?;
    log::debug!("selected route {} for target {}", route, target);
    ConstraintMap::fold(&route.tokens)
}

/// [`select_route`] over textual paths as produced by [`Route`]'s `Display`.
pub fn select_route_from_paths<S: AsRef<str>>(
    target: f64,
    paths: &[S],
) -> Result<ConstraintMap> {
    let routes = paths
        .iter()
        .map(|path| path.as_ref().parse())
        .collect::<Result<Vec<Route>>>()?;
    select_route(target, &routes)
}
