//! Route paths: the branch decisions from the root to one leaf, plus that
//! leaf's point estimate.
//!
//! The textual form is `|<col> <value> <T|F>|...|<estimate>`, one token per
//! free split followed by the estimate, each segment preceded by `|`.
//!
//! The text form does not carry the value kind. Parsing reads any value that
//! looks like a number as [`Value::Number`], so a categorical split value such
//! as `"5"` comes back numeric. A value containing a space or `|` cannot be
//! recovered at all. Keep [`Route`] values rather than strings when the exact
//! split values matter.

use crate::core::constants::PATH_DELIMITER;
use crate::core::error::{CartError, Result};
use crate::core::types::{Branch, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One free branch decision along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathToken {
    pub column: String,
    pub split_value: Value,
    pub branch: Branch,
}

impl PathToken {
    pub fn new<S: Into<String>>(column: S, split_value: Value, branch: Branch) -> Self {
        PathToken {
            column: column.into(),
            split_value,
            branch,
        }
    }
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.split_value, self.branch)
    }
}

impl FromStr for PathToken {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self> {
        // Column names may contain spaces, so split from the right.
        let mut parts = s.trim().rsplitn(3, ' ');
        let (branch, value, column) = match (parts.next(), parts.next(), parts.next()) {
            (Some(b), Some(v), Some(c)) if !c.trim().is_empty() => (b, v, c),
            _ => {
                return Err(CartError::malformed_route(format!(
                    "expected \"<column> <value> <T|F>\", got {:?}",
                    s
                )))
            }
        };
        let branch = match branch {
            "T" => Branch::True,
            "F" => Branch::False,
            other => {
                return Err(CartError::malformed_route(format!(
                    "unknown branch tag {:?}",
                    other
                )))
            }
        };
        Ok(PathToken::new(column.trim(), Value::parse_cell(value), branch))
    }
}

/// A complete root-to-leaf route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub tokens: Vec<PathToken>,
    /// Point estimate of the leaf the route ends in
    pub estimate: f64,
}

impl Route {
    pub fn new(tokens: Vec<PathToken>, estimate: f64) -> Self {
        Route { tokens, estimate }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}{}", PATH_DELIMITER, token)?;
        }
        write!(f, "{}{}", PATH_DELIMITER, self.estimate)
    }
}

impl FromStr for Route {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self> {
        let body = s.trim();
        let body = body.strip_prefix(PATH_DELIMITER).unwrap_or(body);
        let mut segments: Vec<&str> = body.split(PATH_DELIMITER).collect();

        let raw_estimate = segments
            .pop()
            .filter(|seg| !seg.trim().is_empty())
            .ok_or_else(|| {
                CartError::malformed_route(format!("no trailing estimate in {:?}", s))
            })?;
        let estimate = raw_estimate.trim().parse::<f64>().map_err(|_| {
            CartError::malformed_route(format!(
                "trailing estimate {:?} is not a number",
                raw_estimate
            ))
        })?;

        let tokens = segments
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<PathToken>>>()?;
        Ok(Route::new(tokens, estimate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_display() {
        let route = Route::new(
            vec![
                PathToken::new("Foot", Value::Number(5.0), Branch::True),
                PathToken::new("Position", Value::from("ST"), Branch::False),
            ],
            12.5,
        );
        assert_eq!(route.to_string(), "|Foot 5 T|Position ST F|12.5");

        let bare = Route::new(Vec::new(), 40.0);
        assert_eq!(bare.to_string(), "|40");
    }

    #[test]
    fn test_route_parse() {
        let route: Route = "|Skill Moves 3 T|Foot 8 F|17.25".parse().unwrap();
        assert_eq!(route.tokens.len(), 2);
        assert_eq!(route.tokens[0].column, "Skill Moves");
        assert_eq!(route.tokens[0].split_value, Value::Number(3.0));
        assert_eq!(route.tokens[1].branch, Branch::False);
        assert_eq!(route.estimate, 17.25);

        let parsed: Route = route.to_string().parse().unwrap();
        assert_eq!(parsed, route);
    }

    #[test]
    fn test_route_parse_errors() {
        assert!(matches!(
            "|Foot 5 T|".parse::<Route>(),
            Err(CartError::MalformedRoute { .. })
        ));
        assert!(matches!(
            "|Foot 5 X|3".parse::<Route>(),
            Err(CartError::MalformedRoute { .. })
        ));
        assert!(matches!(
            "|Foot T|3".parse::<Route>(),
            Err(CartError::MalformedRoute { .. })
        ));
        assert!("|abc".parse::<Route>().is_err());
    }

    #[test]
    fn test_text_form_drops_value_kind() {
        let route = Route::new(
            vec![PathToken::new("Jersey", Value::from("5"), Branch::True)],
            3.0,
        );
        let parsed: Route = route.to_string().parse().unwrap();
        assert_eq!(parsed.tokens[0].split_value, Value::Number(5.0));

        let spaced = Route::new(
            vec![PathToken::new("Position", Value::from("Left Wing"), Branch::True)],
            3.0,
        );
        let parsed: Route = spaced.to_string().parse().unwrap();
        assert_eq!(parsed.tokens[0].column, "Position Left");
        assert_eq!(parsed.tokens[0].split_value, Value::from("Wing"));
    }
}
