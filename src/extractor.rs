//! Parameter and response header extraction from record fields.
//!
//! A field annotated with a query, header or cookie binding leaves the body
//! schema and is emitted here instead, once per populated location.

use indexmap::IndexMap;
use tracing::trace;

use crate::describe::{Field, TypeDescriptor};
use crate::document::{Header, HeaderSchema, MediaType, Parameter};
use crate::error::SynthesisError;
use crate::synthesizer::synthesize_field;
use crate::types::{AnnotationKeys, Location, CONTENT_TYPE_JSON};

/// Extract the out-of-body parameters of a request model.
///
/// An absent model has no parameters.
///
/// # Errors
///
/// Returns `SynthesisError::NotARecord` if the model is not a record, or any
/// error raised while synthesizing a bound field.
pub fn extract_parameters(
    descriptor: &TypeDescriptor,
    keys: &AnnotationKeys,
) -> Result<Vec<Parameter>, SynthesisError> {
    let fields = match descriptor {
        TypeDescriptor::Absent => return Ok(Vec::new()),
        TypeDescriptor::Record { fields, .. } => fields,
        other => {
            return Err(SynthesisError::NotARecord {
                path: "#".to_string(),
                actual: other.kind_name(),
            })
        }
    };

    let mut parameters = Vec::new();
    collect_parameters(fields, keys, "#", &mut parameters)?;
    Ok(parameters)
}

/// Extract the headers a response model declares.
///
/// Header values must be scalar, so only the primitive type of each field's
/// schema is kept.
///
/// # Errors
///
/// Returns `SynthesisError::NotARecord` if the model is not a record and
/// `SynthesisError::NonScalarHeader` if a header field is an object or array.
pub fn extract_response_headers(
    descriptor: &TypeDescriptor,
    keys: &AnnotationKeys,
) -> Result<IndexMap<String, Header>, SynthesisError> {
    let TypeDescriptor::Record { fields, .. } = descriptor else {
        return Err(SynthesisError::NotARecord {
            path: "#".to_string(),
            actual: descriptor.kind_name(),
        });
    };

    let mut headers = IndexMap::new();
    collect_headers(fields, keys, "#", &mut headers)?;
    Ok(headers)
}

fn collect_parameters(
    fields: &[Field],
    keys: &AnnotationKeys,
    path: &str,
    parameters: &mut Vec<Parameter>,
) -> Result<(), SynthesisError> {
    for field in fields {
        let field_path = format!("{}/{}", path, field.name);

        if let Some(inner) = embedded_fields(field, keys) {
            collect_parameters(inner, keys, &field_path, parameters)?;
            continue;
        }

        for location in Location::ALL {
            let Some(name) = field.binding(keys, location) else {
                continue;
            };

            let synthesized = synthesize_field(field, keys, &field_path)?;
            let description = field.description_text(keys).unwrap_or_default().to_string();
            trace!(path = %field_path, %location, name, "extracted parameter");

            let (schema, content) = if synthesized.kind.is_some_and(|kind| kind.is_structured()) {
                let media = MediaType {
                    schema: synthesized.schema,
                    examples: IndexMap::new(),
                };
                (None, Some(IndexMap::from([(CONTENT_TYPE_JSON.to_string(), media)])))
            } else {
                (Some(synthesized.schema), None)
            };

            parameters.push(Parameter {
                location,
                name: name.to_string(),
                description,
                required: false,
                schema,
                content,
            });
        }
    }

    Ok(())
}

fn collect_headers(
    fields: &[Field],
    keys: &AnnotationKeys,
    path: &str,
    headers: &mut IndexMap<String, Header>,
) -> Result<(), SynthesisError> {
    for field in fields {
        let field_path = format!("{}/{}", path, field.name);

        if let Some(inner) = embedded_fields(field, keys) {
            collect_headers(inner, keys, &field_path, headers)?;
            continue;
        }

        let Some(name) = field.binding(keys, Location::Header) else {
            continue;
        };

        let synthesized = synthesize_field(field, keys, &field_path)?;
        let Some(primitive) = synthesized.schema.primitive_type() else {
            return Err(SynthesisError::NonScalarHeader {
                name: name.to_string(),
                path: field_path,
                actual: synthesized.schema.type_name().to_string(),
            });
        };

        headers.insert(
            name.to_string(),
            Header {
                description: field.description_text(keys).unwrap_or_default().to_string(),
                schema: HeaderSchema { primitive },
            },
        );
    }

    Ok(())
}

/// Fields of an unbound embedded record, which are searched in place.
fn embedded_fields<'a>(field: &'a Field, keys: &AnnotationKeys) -> Option<&'a [Field]> {
    match &field.descriptor {
        TypeDescriptor::Record { fields, .. }
            if field.embedded && !field.is_parameter_bound(keys) =>
        {
            Some(fields.as_slice())
        }
        _ => None,
    }
}
