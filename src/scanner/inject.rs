//! Callback injection into parameter maps

use crate::request::{ParamMap, ParamValue};

/// URL written into targeted parameters
pub fn callback_url(callback_host: &str) -> String {
    format!("http://{callback_host}/")
}

/// Returns a copy of `params` with targeted values replaced by the callback URL.
///
/// Only single string values with non-whitespace content are replaced. With
/// no targets (or an empty list) every such value is replaced; otherwise only
/// keys in `targets`. Everything else is copied unchanged, so the key set is
/// always identical to the input.
pub fn inject_callback(params: &ParamMap, callback_host: &str, targets: Option<&[String]>) -> ParamMap {
    let payload = callback_url(callback_host);
    let targets = targets.filter(|t| !t.is_empty());

    params
        .iter()
        .map(|(key, value)| {
            let injectable = value.as_str().is_some_and(|v| !v.trim().is_empty());
            let targeted = targets.map_or(true, |names| names.iter().any(|n| n == key));
            let value = if injectable && targeted {
                ParamValue::Single(payload.clone())
            } else {
                value.clone()
            };
            (key.to_string(), value)
        })
        .collect()
}
