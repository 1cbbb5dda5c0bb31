//! [`NodeKey`]: the canonical `"x,y"` identity of a board cell.
//!
//! Keys address cells across every boundary: presentation events, persisted
//! wall/weight sets and run records. Formatting and parsing are inverse
//! operations for every coordinate.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geom::Point;

/// Canonical `"x,y"` identity for a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(Point);

impl NodeKey {
    /// Key for the cell at `(x, y)`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self(Point::new(x, y))
    }

    /// The coordinate this key names.
    #[inline]
    pub const fn point(self) -> Point {
        self.0
    }
}

impl From<Point> for NodeKey {
    #[inline]
    fn from(p: Point) -> Self {
        Self(p)
    }
}

impl From<NodeKey> for Point {
    #[inline]
    fn from(k: NodeKey) -> Self {
        k.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0.x, self.0.y)
    }
}

/// Returned when a string is not of the form `"x,y"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node key {0:?}")]
pub struct ParseKeyError(pub String);

impl FromStr for NodeKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| ParseKeyError(s.to_owned()))?;
        let x = x.trim().parse().map_err(|_| ParseKeyError(s.to_owned()))?;
        let y = y.trim().parse().map_err(|_| ParseKeyError(s.to_owned()))?;
        Ok(Self::new(x, y))
    }
}

// Keys travel as their string form so persisted sets stay readable.
#[cfg(feature = "serde")]
impl serde::Serialize for NodeKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NodeKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn key_serializes_as_string() {
        let json = serde_json::to_string(&NodeKey::new(7, 2)).unwrap();
        assert_eq!(json, "\"7,2\"");
    }

    #[test]
    fn key_set_round_trip() {
        let set: BTreeSet<NodeKey> = [NodeKey::new(1, 1), NodeKey::new(0, 2)].into();
        let json = serde_json::to_string(&set).unwrap();
        let back: BTreeSet<NodeKey> = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }

    #[test]
    fn bad_key_fails_to_deserialize() {
        assert!(serde_json::from_str::<NodeKey>("\"x,1\"").is_err());
    }
}
