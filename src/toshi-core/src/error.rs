/// Errors raised while building or decoding model objects.
///
/// These never come from the network: they are raised synchronously when a
/// query is constructed with conflicting arguments or when a server payload
/// cannot be mapped back onto the schema model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("field type '{0}' is not implemented by this client")]
    NotImplemented(String),

    #[error("unknown field type '{0}'")]
    UnknownFieldType(String),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
