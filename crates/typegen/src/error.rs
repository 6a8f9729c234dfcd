#[derive(thiserror::Error, Debug)]
pub enum CodegenError {
    #[error("operation has no name; anonymous operations cannot seed generated type names")]
    AnonymousOperation,
    #[error("duplicate operation name '{0}'")]
    DuplicateOperation(String),
    #[error("duplicate fragment name '{0}'")]
    DuplicateFragment(String),
    #[error("selection spreads unknown fragment '{0}'")]
    UnknownFragment(String),
    #[error("selection on field '{field}' of unknown type '{type_name}'")]
    UnknownType { type_name: String, field: String },
    #[error("type '{type_name}' has no field '{field}'")]
    UnknownField { type_name: String, field: String },
    #[error("no Rust binding for leaf type '{0}'; declare it under [scalars] in the config")]
    UnboundLeaf(String),
}

pub type CodegenResult<T> = Result<T, CodegenError>;
