// ABOUTME: Stringification rules for values spliced into rendered output
// ABOUTME: Strings splice verbatim, null is empty, compound values splice as compact JSON

use serde_json::Value;

/// Convert an evaluated expression result to the text spliced into the output
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        compound => compound.to_string(),
    }
}
