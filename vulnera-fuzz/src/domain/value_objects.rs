//! Fuzzing value objects

use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Semantic kind of a declared parameter, selecting its value-catalog bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Text,
    Integer,
    Float,
}

impl ParameterKind {
    /// Derive a kind from a bare declared type name.
    ///
    /// Substring match on the lowercased name: "int" wins over "float",
    /// anything else is text. Only meant for descriptions that cannot
    /// supply an explicit kind.
    pub fn from_type_name(type_name: &str) -> Self {
        let lower = type_name.to_lowercase();
        if lower.contains("int") {
            ParameterKind::Integer
        } else if lower.contains("float") {
            ParameterKind::Float
        } else {
            ParameterKind::Text
        }
    }
}

/// HTTP verbs the fuzzer dispatches. HEAD and OPTIONS are never fuzzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Parse a verb name, returning `None` for HEAD, OPTIONS and unknown verbs
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "PUT" => Some(HttpMethod::Put),
            "POST" => Some(HttpMethod::Post),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// GET and DELETE carry out-of-band parameters in the query string;
    /// every other verb sends them as a JSON body.
    pub fn sends_query(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single adversarial payload.
///
/// Not tied to the parameter's declared kind: a bucket may hold a boolean
/// for an integer or an empty map for text.
#[derive(Debug, Clone, PartialEq)]
pub enum FuzzValue {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    Text(Cow<'static, str>),
    /// `fill` repeated `len` times, materialised only when rendered
    LongText { fill: char, len: usize },
    EmptyList,
    EmptyMap,
}

impl FuzzValue {
    pub const fn text(value: &'static str) -> Self {
        FuzzValue::Text(Cow::Borrowed(value))
    }

    /// Whether this value already belongs to the given parameter kind
    pub fn matches_kind(&self, kind: ParameterKind) -> bool {
        match kind {
            ParameterKind::Text => matches!(self, FuzzValue::Text(_) | FuzzValue::LongText { .. }),
            ParameterKind::Integer => matches!(self, FuzzValue::Integer(_)),
            ParameterKind::Float => matches!(self, FuzzValue::Float(_)),
        }
    }
}

/// Textual form used for path substitution and query strings
impl fmt::Display for FuzzValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuzzValue::Null => f.write_str("null"),
            FuzzValue::Bool(b) => write!(f, "{}", b),
            FuzzValue::Integer(i) => write!(f, "{}", i),
            // Debug keeps the shortest round-trip form: NaN, inf, -0.0, 1e308
            FuzzValue::Float(x) => write!(f, "{:?}", x),
            FuzzValue::Text(s) => f.write_str(s),
            FuzzValue::LongText { fill, len } => f.write_str(&fill.to_string().repeat(*len)),
            FuzzValue::EmptyList => f.write_str("[]"),
            FuzzValue::EmptyMap => f.write_str("{}"),
        }
    }
}

impl Serialize for FuzzValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FuzzValue::Null => serializer.serialize_unit(),
            FuzzValue::Bool(b) => serializer.serialize_bool(*b),
            FuzzValue::Integer(i) => serializer.serialize_i128(*i),
            FuzzValue::Float(x) => serializer.serialize_f64(*x),
            FuzzValue::Text(s) => serializer.serialize_str(s),
            FuzzValue::LongText { .. } => serializer.serialize_str(&self.to_string()),
            FuzzValue::EmptyList => serializer.serialize_seq(Some(0))?.end(),
            FuzzValue::EmptyMap => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for FuzzValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Null => Ok(FuzzValue::Null),
            serde_json::Value::Bool(b) => Ok(FuzzValue::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FuzzValue::Integer(i128::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(FuzzValue::Integer(i128::from(u)))
                } else {
                    Ok(FuzzValue::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Ok(FuzzValue::Text(Cow::Owned(s))),
            serde_json::Value::Array(items) if items.is_empty() => Ok(FuzzValue::EmptyList),
            serde_json::Value::Object(map) if map.is_empty() => Ok(FuzzValue::EmptyMap),
            other => Err(D::Error::custom(format!(
                "unsupported fuzz value: {}",
                other
            ))),
        }
    }
}

/// One concrete assignment of adversarial values to a subset of an
/// endpoint's parameters. The empty case is the baseline request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuzzCase(BTreeMap<String, FuzzValue>);

impl FuzzCase {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(name: impl Into<String>, value: FuzzValue) -> Self {
        let mut case = Self::empty();
        case.insert(name, value);
        case
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FuzzValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FuzzValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FuzzValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FuzzValue)> for FuzzCase {
    fn from_iter<I: IntoIterator<Item = (String, FuzzValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Declared parameter of a route handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A route as enumerated by a service description, before method filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path template with `{name}` placeholders
    pub path: String,
    /// Raw verb names as declared by the service (may include HEAD/OPTIONS)
    pub methods: Vec<String>,
    /// Parameters in declaration order
    pub params: Vec<Parameter>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, methods: &[&str], params: Vec<Parameter>) -> Self {
        Self {
            path: path.into(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            params,
        }
    }
}

/// One fuzzable (path template, method) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub params: Vec<Parameter>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod, params: Vec<Parameter>) -> Self {
        Self {
            path: path.into(),
            method,
            params,
        }
    }

    pub fn placeholder(name: &str) -> String {
        format!("{{{}}}", name)
    }

    /// Whether the path template binds `name` as a placeholder
    pub fn binds(&self, name: &str) -> bool {
        self.path.contains(&Self::placeholder(name))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
