//! Serde models for the introspection query payload.

#[derive(Debug, serde::Deserialize)]
pub(crate) struct Envelope {
    pub data: Option<Data>,
    pub errors: Option<Vec<Error>>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct Error {
    pub message: String,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct Data {
    #[serde(rename = "__schema")]
    pub schema: Option<IntrospectionSchema>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: Option<NamedRef>,
    pub mutation_type: Option<NamedRef>,
    pub subscription_type: Option<NamedRef>,
    #[serde(default)]
    pub types: Vec<FullType>,
}

#[derive(Debug, serde::Deserialize)]
pub struct NamedRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub enum TypeKind {
    #[serde(rename = "SCALAR")]
    Scalar,
    #[serde(rename = "OBJECT")]
    Object,
    #[serde(rename = "INTERFACE")]
    Interface,
    #[serde(rename = "UNION")]
    Union,
    #[serde(rename = "ENUM")]
    Enum,
    #[serde(rename = "INPUT_OBJECT")]
    InputObject,
    #[serde(rename = "LIST")]
    List,
    #[serde(rename = "NON_NULL")]
    NonNull,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldValue>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
    #[serde(default)]
    pub interfaces: Option<Vec<TypeRef>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
    #[serde(default)]
    pub possible_types: Option<Vec<TypeRef>>,
}

#[derive(Debug, serde::Deserialize)]
pub struct FieldValue {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub args: Vec<InputValue>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct EnumValue {
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    pub name: Option<String>,
    pub of_type: Option<Box<TypeRef>>,
}
