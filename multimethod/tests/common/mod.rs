#![allow(dead_code)]

use multimethod::{Value, value};

// ============================================================================
// Handlers
// ============================================================================

fn number(value: &Value) -> f64 {
    value.as_f64().unwrap_or_default()
}

pub fn plus1(args: &[Value]) -> Value {
    Value::from(number(&args[0]) + 1.0)
}

pub fn sum(args: &[Value]) -> Value {
    Value::from(number(&args[0]) + number(&args[1]))
}

pub fn product(args: &[Value]) -> Value {
    Value::from(number(&args[0]) * number(&args[1]))
}

/// Projection packing every argument into one list key.
pub fn pair(args: &[Value]) -> Value {
    Value::from(args.to_vec())
}

// ============================================================================
// Records
// ============================================================================

pub fn person(year_born: i64) -> Value {
    value!({ "type": "person", "yearBorn": year_born })
}

pub fn car(year_built: i64) -> Value {
    value!({ "type": "car", "yearBuilt": year_built })
}

pub fn field(name: &'static str) -> impl Fn(&[Value]) -> Value + Send + Sync + 'static {
    move |args: &[Value]| args[0].get(name).cloned().unwrap_or_default()
}
