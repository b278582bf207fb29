// Production state names
//
// Zenoss stores a device's production state as an integer. Filters may name
// the state instead; names are matched case-insensitively and replaced by
// their code before the request goes out.

use serde_json::Value;

use crate::error::Error;

/// The filter key whose values get normalized.
pub const PRODUCTION_STATE_FILTER: &str = "productionState";

/// Known production states and their numeric codes, in table order.
pub const PRODUCTION_STATES: [(&str, i64); 5] = [
    ("production", 1000),
    ("pre-Production", 500),
    ("test", 400),
    ("maintenance", 300),
    ("decommissioned", -1),
];

/// Look up a state code by name, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<i64> {
    PRODUCTION_STATES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}

/// The state name for a code, if it's one of the known states.
pub fn name_of(code: i64) -> Option<&'static str> {
    PRODUCTION_STATES
        .iter()
        .find(|&&(_, known)| known == code)
        .map(|&(name, _)| name)
}

/// Normalize a single filter value: integers pass through, names are
/// resolved through [`PRODUCTION_STATES`].
pub fn normalize_value(value: &Value) -> Result<i64, Error> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| unknown(value)),
        Value::String(name) => lookup(name).ok_or_else(|| unknown(value)),
        _ => Err(unknown(value)),
    }
}

/// Normalize a `productionState` filter value into a list of codes.
///
/// A list is normalized element by element; a bare scalar is treated as a
/// one-element list.
pub fn normalize(value: &Value) -> Result<Vec<i64>, Error> {
    match value {
        Value::Array(items) => items.iter().map(normalize_value).collect(),
        other => Ok(vec![normalize_value(other)?]),
    }
}

fn unknown(value: &Value) -> Error {
    Error::UnknownProductionState {
        value: match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}
