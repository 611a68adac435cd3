//! OpenAPI Schema Synthesis
//!
//! Builds an API description document from the model types a service already
//! uses for (de)serialization, so the types stay the single source of truth.
//!
//! Model types describe their own shape through [`Describe`]. The synthesizer
//! walks that description to produce schemas, fields bound to a query, header
//! or cookie location become parameters, and the assembler combines every
//! registered endpoint into a [`Document`].
//!
//! # Example
//!
//! ```
//! use oas_synth::{assemble, AnnotationKeys, Api, Endpoint, Field, Request, Response, TypeDescriptor};
//!
//! let create_user = TypeDescriptor::record(
//!     "CreateUser",
//!     vec![
//!         Field::of::<String>("Name"),
//!         Field::of::<i64>("Age"),
//!         Field::of::<String>("Filter").query("filter"),
//!     ],
//! );
//! let created = TypeDescriptor::record("Created", vec![Field::of::<i64>("Id")]);
//!
//! let mut api = Api::new("Users", "1.0.0");
//! api.new_endpoint(
//!     "POST",
//!     "/users",
//!     Endpoint::new("Create a user")
//!         .request(Request::new(create_user))
//!         .response(Response::new(201, created)),
//! );
//!
//! let document = assemble(&api, &AnnotationKeys::default()).unwrap();
//! let operation = document.operation("/users", "post").unwrap();
//!
//! // "Filter" is a query parameter, not part of the body
//! let body = &operation.request_body.as_ref().unwrap().content["application/json"];
//! assert!(body.schema.properties().unwrap().get("Filter").is_none());
//! assert_eq!(operation.parameters[0].name, "filter");
//! ```
//!
//! # Field Annotations
//!
//! | Default key | Effect |
//! |-------------|--------|
//! | `json` | Property name in the body schema |
//! | `query` / `header` / `cookie` | Move the field out of the body into a parameter |
//! | `description` | Description of the field's schema or parameter |
//!
//! Binding values of `""` or `"-"` leave the field in the body. The keys
//! themselves are configurable through [`AnnotationKeys`].

mod assembler;
mod describe;
mod document;
mod encoder;
mod error;
mod extractor;
mod loader;
mod registry;
mod schema;
mod synthesizer;
mod types;

pub use assembler::{assemble, assemble_operation};
pub use describe::{Describe, Field, ScalarKind, Tags, TypeDescriptor, UnsupportedKind};
pub use document::{
    Content, Document, ExampleObject, Header, HeaderSchema, Info, MediaType, Operation, Parameter,
    PathItem, RequestBody, ResponseObject, TagObject,
};
pub use encoder::{encode, Format};
pub use error::{EncodeError, LoadError, SynthesisError};
pub use extractor::{extract_parameters, extract_response_headers};
pub use loader::{load_keys, load_registry, load_registry_str};
pub use registry::{Api, Endpoint, Example, Request, Response, Tag};
pub use schema::{AdditionalProperties, PrimitiveType, Schema, SchemaKind};
pub use synthesizer::{scalar_type, synthesize, synthesize_type, Synthesized};
pub use types::{
    AnnotationKeys, Location, StructuralKind, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON,
    CONTENT_TYPE_TEXT, CONTENT_TYPE_XML, OPENAPI_VERSION, UNBOUND,
};
