use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(i64),
    Sides(i64, i64, i64, i64),
}

/// A normalized property value.
///
/// Serialized untagged so JSON output reads like the literal it came from:
/// points and sizes become objects, four-sided padding becomes an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// `#RRGGBB`, uppercase.
    Color(String),
    Point { x: i64, y: i64 },
    Size { w: i64, h: i64 },
    Padding(Padding),
}

impl PropValue {
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }
}
