//! Type descriptors - the explicit shape information the synthesizer walks.
//!
//! Model types implement [`Describe`] and return a [`TypeDescriptor`] that
//! spells out their structure. Record fields carry their annotations
//! (wire name, binding location, description) in a [`Tags`] set attached when
//! the model is defined.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{AnnotationKeys, Location, UNBOUND};

/// Concrete scalar kinds a model field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    String,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

/// Type kinds that have no schema representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedKind {
    Function,
    Channel,
    Pointer,
    Interface,
    UnsafePointer,
}

impl std::fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UnsupportedKind::Function => "func",
            UnsupportedKind::Channel => "chan",
            UnsupportedKind::Pointer => "ptr",
            UnsupportedKind::Interface => "interface",
            UnsupportedKind::UnsafePointer => "unsafe pointer",
        };
        f.write_str(name)
    }
}

/// Structural description of a type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// No type information (dynamic or placeholder values).
    #[default]
    Absent,
    Scalar(ScalarKind),
    /// List-like container of the element type.
    Sequence(Box<TypeDescriptor>),
    /// String-keyed associative container of the value type.
    Map(Box<TypeDescriptor>),
    /// Record with named fields in declaration order.
    Record { name: String, fields: Vec<Field> },
    Unsupported(UnsupportedKind),
}

impl TypeDescriptor {
    /// Descriptor of `T`.
    pub fn of<T: Describe + ?Sized>() -> Self {
        T::describe()
    }

    pub fn record(name: impl Into<String>, fields: Vec<Field>) -> Self {
        TypeDescriptor::Record {
            name: name.into(),
            fields,
        }
    }

    pub fn sequence(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(element))
    }

    pub fn map(value: TypeDescriptor) -> Self {
        TypeDescriptor::Map(Box::new(value))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TypeDescriptor::Absent)
    }

    /// Short kind name used in error messages.
    pub fn kind_name(&self) -> String {
        match self {
            TypeDescriptor::Absent => "absent".to_string(),
            TypeDescriptor::Scalar(kind) => format!("{:?}", kind).to_lowercase(),
            TypeDescriptor::Sequence(_) => "sequence".to_string(),
            TypeDescriptor::Map(_) => "map".to_string(),
            TypeDescriptor::Record { name, .. } => format!("record {}", name),
            TypeDescriptor::Unsupported(kind) => kind.to_string(),
        }
    }
}

/// Field annotations, keyed by annotation name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(IndexMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw annotation value, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One record field and its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Declared field name.
    pub name: String,
    #[serde(rename = "type")]
    pub descriptor: TypeDescriptor,
    /// Anonymous field whose record fields are flattened into the parent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub embedded: bool,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl Field {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            embedded: false,
            tags: Tags::new(),
        }
    }

    /// Field whose descriptor comes from `T`.
    pub fn of<T: Describe + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::describe())
    }

    /// Embedded field of type `T`; its record fields are flattened.
    pub fn embed<T: Describe + ?Sized>(name: impl Into<String>) -> Self {
        Self {
            embedded: true,
            ..Self::of::<T>(name)
        }
    }

    /// Attach an annotation.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    // Shorthands writing under the default annotation keys.

    /// Override the serialized name under the default `json` key.
    ///
    /// The shorthands below always use the default keys; with customised
    /// [`AnnotationKeys`] use [`Field::tag`] with the configured key instead.
    pub fn rename(self, name: impl Into<String>) -> Self {
        self.tag("json", name)
    }

    pub fn query(self, name: impl Into<String>) -> Self {
        self.tag("query", name)
    }

    pub fn header(self, name: impl Into<String>) -> Self {
        self.tag("header", name)
    }

    pub fn cookie(self, name: impl Into<String>) -> Self {
        self.tag("cookie", name)
    }

    pub fn description(self, text: impl Into<String>) -> Self {
        self.tag("description", text)
    }

    /// Name part of an annotation: the text before the first `,`, or `None`
    /// when it is empty.
    fn annotated_name(&self, key: &str) -> Option<&str> {
        let value = self.tags.get(key)?;
        let name = value.split(',').next().unwrap_or_default().trim();
        (!name.is_empty()).then_some(name)
    }

    /// Name the field is bound to at `location`, if any.
    ///
    /// Empty values and `-` mean the field is not bound there.
    pub fn binding(&self, keys: &AnnotationKeys, location: Location) -> Option<&str> {
        self.annotated_name(keys.location_key(location))
            .filter(|name| *name != UNBOUND)
    }

    /// Whether the field travels outside the body at any location.
    pub fn is_parameter_bound(&self, keys: &AnnotationKeys) -> bool {
        Location::ALL
            .iter()
            .any(|location| self.binding(keys, *location).is_some())
    }

    /// Externally visible name: the name annotation, else the declared name.
    pub fn serialized_name(&self, keys: &AnnotationKeys) -> &str {
        self.annotated_name(&keys.name).unwrap_or(self.name.as_str())
    }

    pub fn description_text(&self, keys: &AnnotationKeys) -> Option<&str> {
        self.tags
            .get(&keys.description)
            .filter(|text| !text.is_empty())
    }
}

/// Types that can describe their own structure.
///
/// Implemented for std scalars and containers. Model records implement it by
/// listing their fields:
///
/// ```
/// use oas_synth::{Describe, Field, TypeDescriptor};
///
/// struct Page {
///     size: u32,
///     cursor: Option<String>,
/// }
///
/// impl Describe for Page {
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::record(
///             "Page",
///             vec![
///                 Field::of::<u32>("size").query("size"),
///                 Field::of::<Option<String>>("cursor").description("Opaque cursor"),
///             ],
///         )
///     }
/// }
/// ```
pub trait Describe {
    fn describe() -> TypeDescriptor;
}

macro_rules! describe_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

describe_scalar! {
    bool => Bool,
    String => String,
    str => String,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<K, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}

impl<K, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}

impl<K, V: Describe, S> Describe for IndexMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(V::describe())
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl Describe for () {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Absent
    }
}

impl Describe for serde_json::Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Absent
    }
}

impl Describe for dyn std::any::Any {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported(UnsupportedKind::Interface)
    }
}

impl<T: ?Sized> Describe for std::ptr::NonNull<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported(UnsupportedKind::Pointer)
    }
}

impl<T: ?Sized> Describe for *const T {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported(UnsupportedKind::UnsafePointer)
    }
}

impl<T: ?Sized> Describe for *mut T {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported(UnsupportedKind::UnsafePointer)
    }
}

impl<T> Describe for std::sync::mpsc::Sender<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported(UnsupportedKind::Channel)
    }
}

impl<T> Describe for std::sync::mpsc::SyncSender<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported(UnsupportedKind::Channel)
    }
}

impl<T> Describe for std::sync::mpsc::Receiver<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported(UnsupportedKind::Channel)
    }
}

macro_rules! describe_fn {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> Describe for fn($($arg),*) -> R {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::Unsupported(UnsupportedKind::Function)
            }
        }
    };
}

describe_fn!();
describe_fn!(A);
describe_fn!(A, B);
describe_fn!(A, B, C);
