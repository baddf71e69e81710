use std::collections::BTreeSet;

use serde_json::Value;

/// A validation predicate gating writes to a single slot.
///
/// Rules are built once at schema construction and never mutated afterwards.
/// `validate` is total: any JSON value gets a verdict, nothing errors.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Exact membership in a precomputed allow-list. Membership is case
    /// sensitive; callers normalize (lower-case) before validating.
    InList(BTreeSet<String>),
    /// Any string, empty included.
    IsString,
    /// An integer, or a string that parses losslessly as one.
    IsInteger,
    AlwaysTrue,
    /// An integer within `min..=max`.
    Range { min: i64, max: i64 },
}

impl Rule {
    pub fn in_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::InList(values.into_iter().map(Into::into).collect())
    }

    pub fn validate(&self, value: &Value) -> bool {
        match self {
            Rule::InList(allowed) => value.as_str().is_some_and(|s| allowed.contains(s)),
            Rule::IsString => value.is_string(),
            Rule::IsInteger => as_integer(value).is_some(),
            Rule::AlwaysTrue => true,
            Rule::Range { min, max } => {
                as_integer(value).is_some_and(|v| (*min..=*max).contains(&v))
            }
        }
    }

    /// Fast path for per-element checks on already-normalized strings.
    pub fn validate_str(&self, value: &str) -> bool {
        match self {
            Rule::InList(allowed) => allowed.contains(value),
            Rule::IsString => true,
            Rule::IsInteger => value.trim().parse::<i64>().is_ok(),
            Rule::AlwaysTrue => true,
            Rule::Range { min, max } => value
                .trim()
                .parse::<i64>()
                .is_ok_and(|v| (*min..=*max).contains(&v)),
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
