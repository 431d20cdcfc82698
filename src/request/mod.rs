//! Normalised request model and the parsers that build it
//!
//! A [`CapturedRequest`] is derived once per input record (a proxy transcript,
//! a URL given on the command line, or a line of a URL list) and is never
//! mutated afterwards; injection produces new parameter maps.

pub mod direct;
pub mod list;
pub mod transcript;

pub use direct::parse_url_request;
pub use list::{load_url_list, parse_url_list};
pub use transcript::{parse_transcript, parse_transcript_file};

use std::collections::HashMap;
use url::form_urlencoded;

/// Name under which a non-form body is reported
pub const RAW_DATA_KEY: &str = "raw_data";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decoded value of a query or form parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Key seen exactly once
    Single(String),
    /// Key repeated; values in order of appearance. Not injectable.
    Multi(Vec<String>),
}

impl ParamValue {
    /// Returns the value when it is a single string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Multi(_) => None,
        }
    }
}

/// Ordered parameter mapping, keys unique, first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap(Vec<(String, ParamValue)>);

impl ParamMap {
    /// Decodes an `application/x-www-form-urlencoded` string.
    ///
    /// Pairs with a blank value are dropped. A key seen once decodes to
    /// [`ParamValue::Single`]; a repeated key keeps all of its values as
    /// [`ParamValue::Multi`].
    pub fn decode(input: &str) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match index.get(&*key) {
                Some(&slot) => grouped[slot].1.push(value.into_owned()),
                None => {
                    let key = key.into_owned();
                    index.insert(key.clone(), grouped.len());
                    grouped.push((key, vec![value.into_owned()]));
                }
            }
        }

        let pairs = grouped
            .into_iter()
            .map(|(key, mut values)| {
                let value = if values.len() == 1 {
                    ParamValue::Single(values.remove(0))
                } else {
                    ParamValue::Multi(values)
                };
                (key, value)
            })
            .collect();
        Self(pairs)
    }

    /// Encodes the map back into `application/x-www-form-urlencoded` form.
    /// Multi-valued keys are written as repeated pairs.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            match value {
                ParamValue::Single(v) => {
                    serializer.append_pair(key, v);
                }
                ParamValue::Multi(values) => {
                    for v in values {
                        serializer.append_pair(key, v);
                    }
                }
            }
        }
        serializer.finish()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Later pairs replace earlier ones with the same key, keeping the first position
impl FromIterator<(String, ParamValue)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut pairs: Vec<(String, ParamValue)> = Vec::new();
        for (key, value) in iter {
            match index.get(&key) {
                Some(&slot) => pairs[slot].1 = value,
                None => {
                    index.insert(key.clone(), pairs.len());
                    pairs.push((key, value));
                }
            }
        }
        Self(pairs)
    }
}

/// Parameters carried in the request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyParams {
    /// No body
    Empty,
    /// Form-url-encoded body, decoded
    Form(ParamMap),
    /// Any other body, kept verbatim and never injected
    Raw(String),
}

impl BodyParams {
    /// Classifies a body using the request's Content-Type
    pub fn from_body(body: &str, content_type: Option<&str>) -> Self {
        if body.is_empty() {
            BodyParams::Empty
        } else if content_type.is_some_and(is_form_content_type) {
            BodyParams::Form(ParamMap::decode(body))
        } else {
            BodyParams::Raw(body.to_string())
        }
    }

    /// Injectable body parameter names (none for raw or empty bodies)
    pub fn names(&self) -> Vec<&str> {
        match self {
            BodyParams::Form(params) => params.keys().collect(),
            BodyParams::Empty | BodyParams::Raw(_) => Vec::new(),
        }
    }
}

/// True when a Content-Type value marks a form-url-encoded body
pub fn is_form_content_type(content_type: &str) -> bool {
    content_type.contains(FORM_CONTENT_TYPE)
}

/// Normalised HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// Uppercase HTTP method
    pub method: String,
    /// Absolute URL including the query string
    pub full_url: String,
    /// Headers as captured
    pub headers: HashMap<String, String>,
    /// Raw body, empty when absent
    pub body: String,
    /// Decoded query parameters
    pub url_params: ParamMap,
    /// Decoded body parameters
    pub body_params: BodyParams,
}

impl CapturedRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

pub(crate) fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Decodes the query component of an absolute URL
pub(crate) fn decode_query(url: &url::Url) -> ParamMap {
    url.query().map(ParamMap::decode).unwrap_or_default()
}
