//! Integration tests for document assembly.

use oas_synth::{
    assemble, encode, AnnotationKeys, Api, Describe, Endpoint, Example, Field, Format, Location,
    PrimitiveType, Request, Response, SchemaKind, SynthesisError, Tag, TypeDescriptor,
};
use serde_json::json;

struct CreateUser;

impl Describe for CreateUser {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            "CreateUser",
            vec![
                Field::of::<String>("Name"),
                Field::of::<i32>("Age"),
                Field::of::<String>("Filter").query("filter"),
            ],
        )
    }
}

struct UserCreated;

impl Describe for UserCreated {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record("UserCreated", vec![Field::of::<i64>("Id")])
    }
}

struct ListUsers;

impl Describe for ListUsers {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            "ListUsers",
            vec![
                Field::of::<u32>("Limit").query("limit").description("Page size"),
                Field::of::<String>("Name"),
            ],
        )
    }
}

struct UserPage;

impl Describe for UserPage {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            "UserPage",
            vec![
                Field::of::<Vec<UserCreated>>("Users"),
                Field::of::<u64>("Total").header("X-Total-Count").description("All users"),
            ],
        )
    }
}

fn keys() -> AnnotationKeys {
    AnnotationKeys::default()
}

fn users_api() -> Api {
    let mut api = Api::new("Users", "1.0.0").description("User management");
    api.new_endpoint(
        "POST",
        "/users",
        Endpoint::new("Create a user")
            .tag(Tag::new("Users", "A"))
            .request(Request::of::<CreateUser>())
            .response(Response::of::<UserCreated>(201).description("Created")),
    );
    api.new_endpoint(
        "GET",
        "/users",
        Endpoint::new("List users")
            .tag(Tag::new("Users", "B"))
            .tag(Tag::new("Paging", "Paged results"))
            .request(Request::of::<ListUsers>())
            .response(Response::of::<UserPage>(200).description("A page of users")),
    );
    api
}

// === End-to-End Tests ===

mod end_to_end {
    use super::*;

    #[test]
    fn create_user_scenario() {
        let document = assemble(&users_api(), &keys()).unwrap();
        let operation = document.operation("/users", "post").unwrap();

        let body = operation.request_body.as_ref().unwrap();
        let schema = &body.content["application/json"].schema;
        assert_eq!(
            serde_json::to_value(schema.properties().unwrap()).unwrap(),
            json!({
                "Name": { "type": "string" },
                "Age": { "type": "integer" }
            })
        );

        assert_eq!(operation.parameters.len(), 1);
        assert_eq!(operation.parameters[0].location, Location::Query);
        assert_eq!(operation.parameters[0].name, "filter");

        let created = &operation.responses[&201].content["application/json"].schema;
        assert_eq!(
            serde_json::to_value(created.properties().unwrap()).unwrap(),
            json!({ "Id": { "type": "integer" } })
        );
        assert_eq!(operation.responses[&201].description, "Created");
    }

    #[test]
    fn document_metadata() {
        let document = assemble(&users_api(), &keys()).unwrap();
        assert_eq!(document.openapi, "3.0.3");
        assert_eq!(document.info.title, "Users");
        assert_eq!(document.info.description, "User management");
        assert_eq!(document.info.version, "1.0.0");
    }

    #[test]
    fn shared_url_merges_methods() {
        let document = assemble(&users_api(), &keys()).unwrap();
        assert_eq!(document.paths.len(), 1);
        let methods: Vec<&str> = document.paths["/users"].keys().map(String::as_str).collect();
        assert_eq!(methods, ["post", "get"]);
    }

    #[test]
    fn response_headers_and_body() {
        let document = assemble(&users_api(), &keys()).unwrap();
        let response = &document.operation("/users", "GET").unwrap().responses[&200];

        let header = &response.headers["X-Total-Count"];
        assert_eq!(header.schema.primitive, PrimitiveType::Integer);
        assert_eq!(header.description, "All users");

        let schema = &response.content["application/json"].schema;
        let properties = schema.properties().unwrap();
        assert_eq!(properties.len(), 1);
        assert!(matches!(properties["Users"].kind, SchemaKind::Array { .. }));
    }

    #[test]
    fn yaml_encoding() {
        let document = assemble(&users_api(), &keys()).unwrap();
        let yaml = encode(&document, Format::Yaml).unwrap();
        assert!(yaml.contains("/users:"));
        assert!(yaml.contains("requestBody:"));
        assert!(yaml.contains("X-Total-Count:"));
    }
}

// === Request Body Tests ===

mod request_body {
    use super::*;

    #[test]
    fn get_suppresses_body_in_any_case() {
        for method in ["GET", "get", "gEt"] {
            let mut api = Api::new("t", "1");
            api.new_endpoint(method, "/users", Endpoint::new("s").request(Request::of::<CreateUser>()));
            let document = assemble(&api, &keys()).unwrap();
            let operation = document.operation("/users", method).unwrap();
            assert!(operation.request_body.is_none());
            // Parameters are still extracted
            assert_eq!(operation.parameters.len(), 1);
        }
    }

    #[test]
    fn empty_shape_is_suppressed() {
        let model = TypeDescriptor::record(
            "Auth",
            vec![Field::of::<String>("Token").header("Authorization")],
        );
        let mut api = Api::new("t", "1");
        api.new_endpoint("DELETE", "/session", Endpoint::new("Log out").request(Request::new(model)));

        let document = assemble(&api, &keys()).unwrap();
        let operation = document.operation("/session", "delete").unwrap();
        assert!(operation.request_body.is_none());
        assert_eq!(operation.parameters[0].location, Location::Header);
    }

    #[test]
    fn absent_request_has_no_body_or_parameters() {
        let mut api = Api::new("t", "1");
        api.new_endpoint("POST", "/ping", Endpoint::new("Ping"));

        let document = assemble(&api, &keys()).unwrap();
        let operation = document.operation("/ping", "post").unwrap();
        assert!(operation.request_body.is_none());
        assert!(operation.parameters.is_empty());
    }

    #[test]
    fn examples_are_numbered_in_order() {
        let request = Request::of::<CreateUser>()
            .description("New user")
            .required(true)
            .example(Example::new("first", json!({ "Name": "a" })))
            .example(Example::new("second", json!({ "Name": "b" })))
            .example(Example::new("third", json!({ "Name": "c" })).description("last"));
        let mut api = Api::new("t", "1");
        api.new_endpoint("POST", "/users", Endpoint::new("Create").request(request));

        let document = assemble(&api, &keys()).unwrap();
        let body = document
            .operation("/users", "post")
            .unwrap()
            .request_body
            .as_ref()
            .unwrap();
        assert!(body.required);
        assert_eq!(body.description, "New user");

        let examples = &body.content["application/json"].examples;
        let names: Vec<&str> = examples.keys().map(String::as_str).collect();
        assert_eq!(names, ["Sample 1", "Sample 2", "Sample 3"]);
        assert_eq!(examples["Sample 1"].summary, "first");
        assert_eq!(examples["Sample 3"].value, json!({ "Name": "c" }));
        assert_eq!(examples["Sample 3"].description, "last");
    }

    #[test]
    fn content_types_share_schema() {
        let request = Request::of::<CreateUser>()
            .content_type("application/json")
            .content_type("application/xml");
        let mut api = Api::new("t", "1");
        api.new_endpoint("PATCH", "/users", Endpoint::new("Update").request(request));

        let document = assemble(&api, &keys()).unwrap();
        let content = &document
            .operation("/users", "patch")
            .unwrap()
            .request_body
            .as_ref()
            .unwrap()
            .content;
        let types: Vec<&str> = content.keys().map(String::as_str).collect();
        assert_eq!(types, ["application/json", "application/xml"]);
        assert_eq!(content["application/json"], content["application/xml"]);
    }
}

// === Response Tests ===

mod responses {
    use super::*;

    #[test]
    fn duplicate_codes_keep_last() {
        let endpoint = Endpoint::new("Fetch")
            .response(Response::of::<UserCreated>(200).description("first"))
            .response(Response::of::<UserPage>(404).description("missing"))
            .response(Response::of::<UserCreated>(200).description("second"));
        let mut api = Api::new("t", "1");
        api.new_endpoint("GET", "/users/1", endpoint);

        let document = assemble(&api, &keys()).unwrap();
        let responses = &document.operation("/users/1", "get").unwrap().responses;
        let codes: Vec<u16> = responses.keys().copied().collect();
        assert_eq!(codes, [200, 404]);
        assert_eq!(responses[&200].description, "second");
    }

    #[test]
    fn non_scalar_response_header_fails() {
        let model = TypeDescriptor::record(
            "Bad",
            vec![Field::new("Meta", TypeDescriptor::of::<Vec<String>>()).header("X-Meta")],
        );
        let mut api = Api::new("t", "1");
        api.new_endpoint("GET", "/bad", Endpoint::new("Bad").response(Response::new(200, model)));

        let err = assemble(&api, &keys()).unwrap_err();
        assert!(matches!(err, SynthesisError::NonScalarHeader { .. }));
    }

    #[test]
    fn sequence_response_has_no_headers() {
        let mut api = Api::new("t", "1");
        api.new_endpoint(
            "GET",
            "/names",
            Endpoint::new("Names").response(Response::of::<Vec<String>>(200)),
        );

        let document = assemble(&api, &keys()).unwrap();
        let response = &document.operation("/names", "get").unwrap().responses[&200];
        assert!(response.headers.is_empty());
        assert_eq!(
            response.content["application/json"].schema.type_name(),
            "array"
        );
    }
}

// === Tag Tests ===

mod tags {
    use super::*;

    #[test]
    fn first_seen_description_wins() {
        let document = assemble(&users_api(), &keys()).unwrap();
        assert_eq!(document.tags.len(), 2);
        assert_eq!(document.tags[0].name, "Users");
        assert_eq!(document.tags[0].description, "A");
        assert_eq!(document.tags[1].name, "Paging");
    }

    #[test]
    fn operations_reference_tag_names() {
        let document = assemble(&users_api(), &keys()).unwrap();
        let operation = document.operation("/users", "get").unwrap();
        assert_eq!(operation.tags, ["Users", "Paging"]);
    }
}

// === Error Handling Tests ===

mod error_handling {
    use super::*;

    #[test]
    fn unsupported_request_field_aborts_assembly() {
        let model = TypeDescriptor::record(
            "Job",
            vec![Field::of::<std::sync::mpsc::Receiver<u8>>("Events")],
        );
        let mut api = Api::new("t", "1");
        api.new_endpoint("POST", "/jobs", Endpoint::new("Start").request(Request::new(model)));

        let err = assemble(&api, &keys()).unwrap_err();
        assert_eq!(err.to_string(), "unsupported type kind `chan` at #/Events");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn non_record_request_with_parameters_fails() {
        let mut api = Api::new("t", "1");
        api.new_endpoint(
            "POST",
            "/tags",
            Endpoint::new("Add").request(Request::of::<Vec<String>>()),
        );

        let err = assemble(&api, &keys()).unwrap_err();
        assert!(matches!(err, SynthesisError::NotARecord { .. }));
    }
}
