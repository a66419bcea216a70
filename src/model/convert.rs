//! Model conversion
//!
//! Renames recognised properties and turns array-of-array values into arrays
//! of labeled records. Unrecognised properties pass through unchanged.

use super::schema::{ConversionModel, ConversionRule};
use crate::parser::{Message, PropertyMap, Value};

/// Convert a message with `overrides` layered over the built-in model
///
/// An override rule replaces the built-in rule for the same raw name. The
/// input message is left untouched.
pub fn convert(message: &Message, overrides: &ConversionModel) -> Message {
    let Some(props) = &message.properties else {
        return message.clone();
    };

    let builtin = ConversionModel::builtin();
    let mut out = PropertyMap::new();
    let mut converted = Vec::new();

    for (raw_name, value) in props {
        match overrides.get(raw_name).or_else(|| builtin.get(raw_name)) {
            Some(rule) => converted.push(apply_rule(raw_name, value, rule)),
            None => {
                out.insert(raw_name.clone(), value.clone());
            }
        }
    }

    // Converted entries win over pass-through entries with the same name
    out.extend(converted);

    Message {
        operation: message.operation.clone(),
        object: message.object.clone(),
        sub_object: message.sub_object.clone(),
        sub_object_id: message.sub_object_id.clone(),
        properties: Some(out),
    }
}

fn apply_rule(raw_name: &str, value: &Value, rule: &ConversionRule) -> (String, Value) {
    let target = rule.target_name(raw_name).to_string();
    if target != raw_name {
        log::trace!("renaming {} -> {}", raw_name, target);
    }

    let value = match (&rule.field_names, value) {
        (Some(fields), Value::Array(rows)) => Value::Array(label_rows(rows, fields)),
        _ => value.clone(),
    };

    (target, value)
}

/// Replace every array row with a record keyed by `fields`
///
/// Columns beyond the labels are keyed `index<i>`; non-array rows are kept.
pub fn label_rows(rows: &[Value], fields: &[String]) -> Vec<Value> {
    rows.iter()
        .map(|row| match row {
            Value::Array(columns) => Value::Record(label_columns(columns, fields)),
            other => other.clone(),
        })
        .collect()
}

fn label_columns(columns: &[Value], fields: &[String]) -> PropertyMap {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let label = fields
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("index{}", i));
            (label, column.clone())
        })
        .collect()
}
