//! Schema synthesis - walks a type descriptor and builds its schema.
//!
//! Dispatch is on the structural kind of the descriptor:
//!
//! | Descriptor | Result |
//! |------------|--------|
//! | `Absent` | no schema |
//! | `Scalar` | primitive from the kind table |
//! | `Sequence` | `array` of the element schema |
//! | `Map` | `object` with `additionalProperties` = value schema |
//! | `Record` | `object` with one property per body field |
//! | `Unsupported` | error |
//!
//! Record fields bound to a query, header or cookie location never appear in
//! the body schema. Embedded records are flattened into their parent.

use indexmap::IndexMap;
use tracing::trace;

use crate::describe::{Describe, Field, ScalarKind, TypeDescriptor};
use crate::error::SynthesisError;
use crate::schema::{PrimitiveType, Schema};
use crate::types::{AnnotationKeys, StructuralKind};

/// A schema together with the structural kind it was synthesized from.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesized {
    pub schema: Schema,
    pub kind: StructuralKind,
}

/// Synthesize the schema of a type descriptor.
///
/// Returns `Ok(None)` when the descriptor carries no type information; callers
/// treat that as "no schema" rather than as a failure.
///
/// # Errors
///
/// Returns `SynthesisError::Unsupported` if the descriptor, or any type nested
/// in it, has no schema representation.
pub fn synthesize(
    descriptor: &TypeDescriptor,
    keys: &AnnotationKeys,
) -> Result<Option<Synthesized>, SynthesisError> {
    synthesize_at(descriptor, keys, "#")
}

/// Synthesize the schema of `T`.
pub fn synthesize_type<T: Describe + ?Sized>(
    keys: &AnnotationKeys,
) -> Result<Option<Synthesized>, SynthesisError> {
    synthesize(&T::describe(), keys)
}

/// Canonical primitive type of a scalar kind.
pub fn scalar_type(kind: ScalarKind) -> PrimitiveType {
    match kind {
        ScalarKind::Bool => PrimitiveType::Boolean,
        ScalarKind::String | ScalarKind::Char => PrimitiveType::String,
        ScalarKind::I8
        | ScalarKind::I16
        | ScalarKind::I32
        | ScalarKind::I64
        | ScalarKind::I128
        | ScalarKind::Isize
        | ScalarKind::U8
        | ScalarKind::U16
        | ScalarKind::U32
        | ScalarKind::U64
        | ScalarKind::U128
        | ScalarKind::Usize => PrimitiveType::Integer,
        ScalarKind::F32 | ScalarKind::F64 => PrimitiveType::Number,
    }
}

pub(crate) fn synthesize_at(
    descriptor: &TypeDescriptor,
    keys: &AnnotationKeys,
    path: &str,
) -> Result<Option<Synthesized>, SynthesisError> {
    let synthesized = match descriptor {
        TypeDescriptor::Absent => return Ok(None),
        TypeDescriptor::Scalar(kind) => Synthesized {
            schema: Schema::primitive(scalar_type(*kind)),
            kind: StructuralKind::Scalar,
        },
        TypeDescriptor::Sequence(element) => {
            let items = synthesize_at(element, keys, &format!("{}/items", path))?
                .map_or_else(Schema::open_object, |s| s.schema);
            Synthesized {
                schema: Schema::array(items),
                kind: StructuralKind::Sequence,
            }
        }
        TypeDescriptor::Map(value) => {
            let value = synthesize_at(value, keys, &format!("{}/additionalProperties", path))?
                .map_or_else(Schema::open_object, |s| s.schema);
            Synthesized {
                schema: Schema::map(value),
                kind: StructuralKind::Map,
            }
        }
        TypeDescriptor::Record { name, fields } => {
            let mut properties = IndexMap::new();
            collect_properties(fields, keys, path, &mut properties)?;
            Synthesized {
                schema: Schema::object(properties).with_description(format!("{} object", name)),
                kind: StructuralKind::Record,
            }
        }
        TypeDescriptor::Unsupported(kind) => {
            return Err(SynthesisError::Unsupported {
                kind: *kind,
                path: path.to_string(),
            })
        }
    };

    trace!(path, kind = ?synthesized.kind, "synthesized schema");
    Ok(Some(synthesized))
}

/// Schema of one record field. `kind` is `None` for a field without type
/// information.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldSchema {
    pub schema: Schema,
    pub kind: Option<StructuralKind>,
}

/// Synthesize one record field, attaching its description.
///
/// A field without type information becomes an open object instead of being
/// dropped.
pub(crate) fn synthesize_field(
    field: &Field,
    keys: &AnnotationKeys,
    path: &str,
) -> Result<FieldSchema, SynthesisError> {
    let mut synthesized = match synthesize_at(&field.descriptor, keys, path)? {
        Some(Synthesized { schema, kind }) => FieldSchema {
            schema,
            kind: Some(kind),
        },
        None => FieldSchema {
            schema: Schema::open_object(),
            kind: None,
        },
    };

    if let Some(description) = field.description_text(keys) {
        synthesized.schema.description = Some(description.to_string());
    }

    Ok(synthesized)
}

fn collect_properties(
    fields: &[Field],
    keys: &AnnotationKeys,
    path: &str,
    properties: &mut IndexMap<String, Schema>,
) -> Result<(), SynthesisError> {
    for field in fields {
        if field.is_parameter_bound(keys) {
            trace!(path, field = %field.name, "skipping parameter-bound field");
            continue;
        }

        let field_path = format!("{}/{}", path, field.name);

        // Flattened properties never replace a field of this level, wherever
        // it is declared.
        if let (true, TypeDescriptor::Record { fields: inner, .. }) =
            (field.embedded, &field.descriptor)
        {
            let mut flattened = IndexMap::new();
            collect_properties(inner, keys, &field_path, &mut flattened)?;
            for (name, schema) in flattened {
                properties.entry(name).or_insert(schema);
            }
            continue;
        }

        let synthesized = synthesize_field(field, keys, &field_path)?;
        properties.insert(field.serialized_name(keys).to_string(), synthesized.schema);
    }

    Ok(())
}
