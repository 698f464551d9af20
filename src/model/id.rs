//! Resource identity.
//!
//! JSON:API leaves the JSON type of `id` open. Payloads in the wild carry
//! strings, integers and the occasional float, sometimes mixed within one
//! `included` array. [`ResourceId`] gives all of them one total order so the
//! related resource index can sort and binary-search a type group.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::cmp::Ordering;
use std::fmt;

/// The `id` member of a resource or resource identifier.
///
/// # Ordering
/// - Two numbers compare numerically.
/// - Two strings compare lexically (byte order).
/// - Every number sorts before every string.
///
/// `Number(2)` and `String("2")` are *different* ids: a reference
/// `{"type": "people", "id": "2"}` does not resolve to `{"type": "people", "id": 2}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(Number),
    String(String),
}

impl ResourceId {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResourceId::String(s) => Some(s),
            ResourceId::Number(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ResourceId::Number(n) => n.as_i64(),
            ResourceId::String(_) => None,
        }
    }
}

/// A JSON number in a form that compares exactly.
///
/// Integral floats below `INTEGER_BOUND` in magnitude are folded into
/// integers, so `3.0 == 3`, `-0.0 == 0`, and `2^53 + 1` stays distinct from
/// `2^53` as a float. What is left as `Float` is either fractional or too
/// large for `i128`.
enum Exact {
    Integer(i128),
    Float(f64),
}

const INTEGER_BOUND: f64 = 1.0e38;

fn exact(n: &Number) -> Exact {
    if let Some(i) = n.as_i64() {
        return Exact::Integer(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Exact::Integer(u.into());
    }
    // serde_json numbers are always finite.
    let f = n.as_f64().unwrap_or_default();
    if f.fract() == 0.0 && f.abs() < INTEGER_BOUND {
        Exact::Integer(f as i128)
    } else {
        Exact::Float(f)
    }
}

fn cmp_integer_float(i: i128, f: f64) -> Ordering {
    if f >= INTEGER_BOUND {
        return Ordering::Less;
    }
    if f <= -INTEGER_BOUND {
        return Ordering::Greater;
    }
    // `f` is fractional here, so it lies strictly between floor(f) and floor(f) + 1.
    if i <= f.floor() as i128 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn cmp_numbers(a: &Number, b: &Number) -> Ordering {
    match (exact(a), exact(b)) {
        (Exact::Integer(x), Exact::Integer(y)) => x.cmp(&y),
        (Exact::Float(x), Exact::Float(y)) => x.total_cmp(&y),
        (Exact::Integer(x), Exact::Float(y)) => cmp_integer_float(x, y),
        (Exact::Float(x), Exact::Integer(y)) => cmp_integer_float(y, x).reverse(),
    }
}

impl Ord for ResourceId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ResourceId::Number(a), ResourceId::Number(b)) => cmp_numbers(a, b),
            (ResourceId::String(a), ResourceId::String(b)) => a.cmp(b),
            (ResourceId::Number(_), ResourceId::String(_)) => Ordering::Less,
            (ResourceId::String(_), ResourceId::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for ResourceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ResourceId {}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::String(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        ResourceId::String(value)
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        ResourceId::Number(value.into())
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        ResourceId::Number(value.into())
    }
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        ResourceId::Number(value.into())
    }
}
