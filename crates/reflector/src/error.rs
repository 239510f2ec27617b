//! Error taxonomy for introspection and deep copy
//!
//! Nothing here is retried: every failure is a metadata-correctness error,
//! not a transient fault, and is surfaced to the immediate caller. The only
//! suppression layer in the crate is the explicit opt-in [`crate::safe`]
//! adapter.

/// Errors raised by registry queries, member enumeration, and deep copy
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    /// A required argument was null/absent; checked before any work begins
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Type metadata was corrupt or unreachable while walking a hierarchy
    #[error("metadata access failed: {0}")]
    MetadataAccess(String),

    /// No usable zero-argument construction for a type encountered during copy
    #[error("cannot construct instance of `{type_name}`: {reason}")]
    CopyConstruction {
        /// Name of the type that could not be constructed
        type_name: String,
        /// Why construction is impossible
        reason: &'static str,
    },

    /// A field-level read/write failure during copy; fatal, aborts the copy
    #[error("deep copy of `{type_name}.{field}` failed")]
    CopyFailed {
        /// Type whose field was being copied
        type_name: String,
        /// Field being copied when the failure occurred
        field: String,
        /// The originating failure
        #[source]
        source: Box<ReflectError>,
    },

    /// A field slot could not be read or written on an instance
    #[error("cannot access field `{field}` of `{type_name}`: {reason}")]
    FieldAccess {
        /// Type of the instance being accessed
        type_name: String,
        /// Field whose slot was accessed
        field: String,
        /// Why the access was denied
        reason: String,
    },
}

/// Result alias used across the crate
pub type ReflectResult<T> = Result<T, ReflectError>;
