//! # URL Construction
//!
//! [`UrlBuilder`] turns a resource's fixed base path plus per-call
//! [`RequestOptions`](crate::RequestOptions) into the request path handed to the transport.
//!
//! The output is deterministic: [`QueryParams`] is ordered by key, so the same
//! `(base, sub_endpoint, params)` triple always produces the same string no matter
//! in which order the caller inserted the parameters. Empty and absent values are
//! dropped instead of being encoded as `key=`.

use std::collections::BTreeMap;
use std::fmt;
use url::{form_urlencoded, Url};

/// A primitive query-parameter value. Every variant is stringified on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Str(s) if s.is_empty())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! int_param {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

int_param!(i32, i64, u8, u16, u32);

/// Query parameters in canonical (lexicographic key) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    values: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets `key` only when a value is present.
    pub fn insert_opt<V: Into<ParamValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.values.insert(key.into(), value.into());
        }
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// True when no parameter would make it into the query string.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(ParamValue::is_empty)
    }

    /// Encodes the non-empty parameters as `a=1&b=2`, keys in canonical order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.values.iter().filter(|(_, v)| !v.is_empty()) {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Composes request paths for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_path: String,
}

impl UrlBuilder {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// `base_path` + `sub_endpoint` (verbatim) + `?query` when any parameter is non-empty.
    pub fn build_url(&self, sub_endpoint: Option<&str>, params: Option<&QueryParams>) -> String {
        let mut url = self.base_path.clone();
        if let Some(sub) = sub_endpoint {
            url.push_str(sub);
        }
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            url.push('?');
            url.push_str(&params.to_query_string());
        }
        url
    }
}

/// Encodes `segment` as exactly one path segment, leading slash included.
///
/// `/`, `?`, `#`, `%` and spaces are percent-encoded. Returns `None` for values
/// a single segment cannot carry (`""`, `.` and `..`).
pub fn path_segment(segment: &str) -> Option<String> {
    if matches!(segment, "" | "." | "..") {
        return None;
    }
    let mut url = Url::parse("http://localhost/").ok()?;
    url.path_segments_mut().ok()?.clear().push(segment);
    Some(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_base_path() {
        let builder = UrlBuilder::new("/games");
        assert_eq!(builder.build_url(None, None), "/games");
    }

    #[test]
    fn sub_endpoint_is_appended_verbatim() {
        let builder = UrlBuilder::new("/users");
        assert_eq!(builder.build_url(Some("/login"), None), "/users/login");
        assert_eq!(
            builder.build_url(Some("/token/abc.def"), None),
            "/users/token/abc.def"
        );
    }

    #[test]
    fn query_is_independent_of_insertion_order() {
        let builder = UrlBuilder::new("/snippets");

        let mut first = QueryParams::new();
        first.insert("search", "shader").insert("page", 2u32).insert("engine", "godot");

        let mut second = QueryParams::new();
        second.insert("engine", "godot").insert("search", "shader").insert("page", 2u32);

        let a = builder.build_url(None, Some(&first));
        let b = builder.build_url(None, Some(&second));
        assert_eq!(a, b);
        assert_eq!(a, "/snippets?engine=godot&page=2&search=shader");
    }

    #[test]
    fn empty_values_are_omitted() {
        let builder = UrlBuilder::new("/games");
        let params = QueryParams::new()
            .with("search", "")
            .with("engine", "")
            .with("limit", 10u32);
        assert_eq!(builder.build_url(None, Some(&params)), "/games?limit=10");

        let all_empty = QueryParams::new().with("search", "");
        assert_eq!(builder.build_url(None, Some(&all_empty)), "/games");
    }

    #[test]
    fn absent_optional_values_are_skipped() {
        let mut params = QueryParams::new();
        params
            .insert_opt("category", None::<String>)
            .insert_opt("featured", Some(true));
        assert_eq!(params.to_query_string(), "featured=true");
    }

    #[test]
    fn values_are_stringified_and_encoded() {
        let params: QueryParams = [
            ("q", ParamValue::from("pixel art & tiles")),
            ("ratio", ParamValue::from(1.5)),
        ]
        .into_iter()
        .collect();
        assert_eq!(params.to_query_string(), "q=pixel+art+%26+tiles&ratio=1.5");
    }

    #[test]
    fn path_segment_keeps_one_segment() {
        assert_eq!(path_segment("g1").as_deref(), Some("/g1"));
        assert_eq!(path_segment("a/b?c").as_deref(), Some("/a%2Fb%3Fc"));
        assert_eq!(path_segment("file with spaces").as_deref(), Some("/file%20with%20spaces"));
        assert_eq!(path_segment("50%#off").as_deref(), Some("/50%25%23off"));
    }

    #[test]
    fn path_segment_rejects_dot_segments() {
        assert_eq!(path_segment(""), None);
        assert_eq!(path_segment("."), None);
        assert_eq!(path_segment(".."), None);
        assert_eq!(path_segment("../admin").as_deref(), Some("/..%2Fadmin"));
    }
}
