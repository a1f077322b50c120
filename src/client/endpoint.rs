//! Endpoint descriptions and request parameters

use crate::core::error::ConfigError;
use indexmap::IndexMap;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods used against the school backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// One backend endpoint
///
/// # Format
/// - `path`: template with `{name}` segments, e.g.
///   `/api/parent/my-child-attendance/{parentId}/{studentId}`
/// - `collection`: envelope field holding the records; dotted paths reach
///   into nested objects (`studentDetails.attendance`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub method: Method,

    pub path: String,

    #[serde(default)]
    pub collection: Option<String>,
}

impl Endpoint {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            collection: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Builder: set the envelope field holding the collection
    pub fn with_collection(mut self, field: impl Into<String>) -> Self {
        self.collection = Some(field.into());
        self
    }

    /// Names of the `{placeholder}` segments, in order
    pub fn placeholders(&self) -> Result<Vec<&str>, ConfigError> {
        self.path
            .split('/')
            .filter_map(|segment| placeholder(segment, &self.path).transpose())
            .collect()
    }

    /// Build the full request URL against `base_url`
    ///
    /// Fails when the path is empty, when a placeholder has no value or a
    /// blank value, or when the base URL is unusable.
    pub fn url(&self, base_url: &str, params: &RequestParams) -> Result<Url, ConfigError> {
        if self.path.trim().trim_matches('/').is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let invalid_base = |message: String| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            message,
        };
        let mut url = Url::parse(base_url).map_err(|e| invalid_base(e.to_string()))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid_base("cannot be a base".to_string()))?;
            segments.pop_if_empty();

            for segment in self.path.split('/').filter(|s| !s.is_empty()) {
                match placeholder(segment, &self.path)? {
                    Some(name) => {
                        segments.push(self.param(name, params)?);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        if !params.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&params.query);
        }

        Ok(url)
    }

    fn param<'p>(&self, name: &str, params: &'p RequestParams) -> Result<&'p str, ConfigError> {
        let value = params
            .path
            .get(name)
            .ok_or_else(|| ConfigError::MissingParam {
                endpoint: self.path.clone(),
                name: name.to_string(),
            })?;

        if value.trim().is_empty() {
            return Err(ConfigError::EmptyParam {
                endpoint: self.path.clone(),
                name: name.to_string(),
            });
        }
        Ok(value)
    }
}

/// Extract the name of a `{name}` segment
fn placeholder<'a>(segment: &'a str, template: &str) -> Result<Option<&'a str>, ConfigError> {
    match segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(name) if !name.is_empty() && !name.contains(['{', '}']) => Ok(Some(name)),
        Some(_) => Err(ConfigError::MalformedTemplate(template.to_string())),
        None if segment.contains(['{', '}']) => {
            Err(ConfigError::MalformedTemplate(template.to_string()))
        }
        None => Ok(None),
    }
}

/// Path parameters, query parameters and optional JSON body of one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    pub path: IndexMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a path parameter
    pub fn path(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Builder: append a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Builder: append several query parameters
    pub fn queries(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Builder: set the JSON body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}
