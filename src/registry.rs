//! Endpoint registry - the ordered list of endpoints a document is built from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::describe::{Describe, TypeDescriptor};

/// API metadata plus the registered endpoints, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Api {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub version: String,
    pub endpoints: Vec<Endpoint>,
}

impl Api {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Register `endpoint` for `method` on `url`.
    pub fn new_endpoint(
        &mut self,
        method: impl Into<String>,
        url: impl Into<String>,
        mut endpoint: Endpoint,
    ) {
        endpoint.method = method.into();
        endpoint.url = url.into();
        self.endpoints.push(endpoint);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    pub summary: String,
    pub description: String,
    pub url: String,
    pub method: String,
    pub tags: Vec<Tag>,
    pub request: Request,
    pub responses: Vec<Response>,
}

impl Endpoint {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn request(mut self, request: Request) -> Self {
        self.request = request;
        self
    }

    pub fn response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Request payload description. A request without a model has no body and
/// no parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    pub description: String,
    pub required: bool,
    /// Media types; empty means JSON.
    pub content_types: Vec<String>,
    pub model: TypeDescriptor,
    pub examples: Vec<Example>,
}

impl Request {
    pub fn new(model: TypeDescriptor) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Request whose model is `T`.
    pub fn of<T: Describe + ?Sized>() -> Self {
        Self::new(T::describe())
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_types.push(content_type.into());
        self
    }

    pub fn example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    pub code: u16,
    pub description: String,
    /// Media types; empty means JSON.
    pub content_types: Vec<String>,
    pub model: TypeDescriptor,
    pub examples: Vec<Example>,
}

impl Response {
    pub fn new(code: u16, model: TypeDescriptor) -> Self {
        Self {
            code,
            model,
            ..Self::default()
        }
    }

    /// Response with status `code` whose model is `T`.
    pub fn of<T: Describe + ?Sized>(code: u16) -> Self {
        Self::new(code, T::describe())
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_types.push(content_type.into());
        self
    }

    pub fn example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }
}

/// A sample payload shown alongside a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    pub summary: String,
    pub description: String,
    pub value: Value,
}

impl Example {
    pub fn new(summary: impl Into<String>, value: Value) -> Self {
        Self {
            summary: summary.into(),
            description: String::new(),
            value,
        }
    }

    /// Example built from any serializable sample.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `sample` cannot be represented as JSON.
    pub fn from_sample<T: Serialize>(
        summary: impl Into<String>,
        sample: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(summary, serde_json::to_value(sample)?))
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_endpoint_sets_method_and_url() {
        let mut api = Api::new("Users", "1.0.0");
        api.new_endpoint("POST", "/users", Endpoint::new("Create user"));
        api.new_endpoint("get", "/users", Endpoint::new("List users"));

        assert_eq!(api.endpoints.len(), 2);
        assert_eq!(api.endpoints[0].method, "POST");
        assert_eq!(api.endpoints[0].url, "/users");
        assert_eq!(api.endpoints[1].summary, "List users");
    }

    #[test]
    fn example_from_sample() {
        #[derive(Serialize)]
        struct User {
            name: &'static str,
        }

        let example = Example::from_sample("Alice", &User { name: "alice" }).unwrap();
        assert_eq!(example.value, json!({ "name": "alice" }));
        assert_eq!(example.summary, "Alice");
    }

    #[test]
    fn request_defaults_to_absent_model() {
        let request: Request = serde_json::from_value(json!({ "description": "none" })).unwrap();
        assert!(request.model.is_absent());
        assert!(request.content_types.is_empty());
    }

    #[test]
    fn response_builder() {
        let response = Response::of::<Vec<String>>(200)
            .description("Names")
            .content_type("application/xml");
        assert_eq!(response.code, 200);
        assert_eq!(response.content_types, ["application/xml"]);
        assert_eq!(response.model, TypeDescriptor::of::<Vec<String>>());
    }
}
