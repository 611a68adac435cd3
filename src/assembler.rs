//! Document assembly - turns a registry into a path/method/operation document.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::document::{
    Content, Document, ExampleObject, Info, MediaType, Operation, RequestBody, ResponseObject,
    TagObject,
};
use crate::error::SynthesisError;
use crate::extractor::{extract_parameters, extract_response_headers};
use crate::registry::{Api, Endpoint, Example, Request, Response};
use crate::schema::Schema;
use crate::synthesizer::synthesize;
use crate::types::{AnnotationKeys, StructuralKind, CONTENT_TYPE_JSON};

/// Assemble the document for every endpoint in `api`.
///
/// Endpoints sharing a URL share a path entry; a repeated method on the same
/// URL replaces the earlier operation. Tags are collected in first-seen order
/// and keep the first description given for each name.
///
/// # Errors
///
/// Returns the first `SynthesisError` raised by any request or response model.
pub fn assemble(api: &Api, keys: &AnnotationKeys) -> Result<Document, SynthesisError> {
    let mut document = Document::new(Info {
        title: api.title.clone(),
        description: api.description.clone(),
        version: api.version.clone(),
    });
    let mut tags: IndexMap<String, TagObject> = IndexMap::new();

    for endpoint in &api.endpoints {
        let operation = assemble_operation(endpoint, keys)?;

        for tag in &endpoint.tags {
            tags.entry(tag.name.clone()).or_insert_with(|| TagObject {
                name: tag.name.clone(),
                description: tag.description.clone(),
            });
        }

        let method = endpoint.method.to_lowercase();
        debug!(url = %endpoint.url, %method, "assembled operation");

        let path = document.paths.entry(endpoint.url.clone()).or_default();
        if path.insert(method, operation).is_some() {
            warn!(
                url = %endpoint.url,
                method = %endpoint.method,
                "endpoint registered twice, keeping the last one"
            );
        }
    }

    document.tags = tags.into_values().collect();
    Ok(document)
}

/// Build the operation record of a single endpoint.
///
/// # Errors
///
/// Returns any `SynthesisError` raised by the endpoint's models.
pub fn assemble_operation(
    endpoint: &Endpoint,
    keys: &AnnotationKeys,
) -> Result<Operation, SynthesisError> {
    let request_body = if endpoint.method.eq_ignore_ascii_case("get") {
        None
    } else {
        request_body(&endpoint.request, keys)?
    };

    let mut responses = BTreeMap::new();
    for response in &endpoint.responses {
        let object = response_object(response, keys)?;
        if responses.insert(response.code, object).is_some() {
            debug!(url = %endpoint.url, code = response.code, "response code declared twice");
        }
    }

    Ok(Operation {
        summary: endpoint.summary.clone(),
        description: endpoint.description.clone(),
        tags: endpoint.tags.iter().map(|tag| tag.name.clone()).collect(),
        parameters: extract_parameters(&endpoint.request.model, keys)?,
        request_body,
        responses,
    })
}

fn request_body(
    request: &Request,
    keys: &AnnotationKeys,
) -> Result<Option<RequestBody>, SynthesisError> {
    let Some(synthesized) = synthesize(&request.model, keys)? else {
        return Ok(None);
    };

    let empty_record = synthesized.kind == StructuralKind::Record
        && synthesized
            .schema
            .properties()
            .map_or(true, IndexMap::is_empty);
    if empty_record {
        debug!("request model has no body fields, omitting request body");
        return Ok(None);
    }

    Ok(Some(RequestBody {
        description: request.description.clone(),
        required: request.required,
        content: content(&request.content_types, &synthesized.schema, &request.examples),
    }))
}

fn response_object(
    response: &Response,
    keys: &AnnotationKeys,
) -> Result<ResponseObject, SynthesisError> {
    let mut object = ResponseObject {
        description: response.description.clone(),
        headers: IndexMap::new(),
        content: IndexMap::new(),
    };

    if let Some(synthesized) = synthesize(&response.model, keys)? {
        if synthesized.kind == StructuralKind::Record {
            object.headers = extract_response_headers(&response.model, keys)?;
        }
        object.content = content(&response.content_types, &synthesized.schema, &response.examples);
    }

    Ok(object)
}

/// Same schema and examples under every content type; JSON when none is given.
fn content(content_types: &[String], schema: &Schema, examples: &[Example]) -> Content {
    let media = MediaType {
        schema: schema.clone(),
        examples: sample_examples(examples),
    };

    if content_types.is_empty() {
        return IndexMap::from([(CONTENT_TYPE_JSON.to_string(), media)]);
    }

    content_types
        .iter()
        .map(|content_type| (content_type.clone(), media.clone()))
        .collect()
}

/// Examples named "Sample 1", "Sample 2", ... in declaration order.
fn sample_examples(examples: &[Example]) -> IndexMap<String, ExampleObject> {
    examples
        .iter()
        .enumerate()
        .map(|(index, example)| {
            (
                format!("Sample {}", index + 1),
                ExampleObject {
                    summary: example.summary.clone(),
                    description: example.description.clone(),
                    value: example.value.clone(),
                },
            )
        })
        .collect()
}
