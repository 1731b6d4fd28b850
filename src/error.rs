//! Defines the unmarshaling error and its helpers.
use std::fmt;

/// Boxed error returned by registered decoders and [`crate::DecodeArg`] implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by [`crate::unmarshal`] and friends.
///
/// Faults detected while walking the destination are produced bare and wrapped exactly once by
/// the driver into [`Error::Argument`], which carries the offending `name=value` pair. Use
/// [`Error::innermost`] to inspect the underlying category.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The argument name does not match the name grammar.
    InvalidArgumentName {
        name: String,
    },
    /// The argument name is a UUID literal; an `id=` style field was most likely intended.
    UnknownArgumentName {
        name: String,
    },
    /// The argument name was already consumed earlier in the same call.
    DuplicateArgumentName {
        name: String,
    },
    /// The root destination is neither a record nor a mapping.
    DestinationNotPointerToStructOrMap {
        type_name: &'static str,
    },
    /// A sequence was reached but the path has no index segment left.
    MissingIndexOnSequence,
    /// The index segment is not a non-negative integer.
    InvalidIndex {
        index: String,
    },
    /// The index would leave a gap in the sequence.
    MissingIntermediateIndices {
        index: usize,
        len: usize,
    },
    /// A mapping was reached but the path has no key segment left.
    MissingMapKey,
    /// A record was reached but the path has no field segment left.
    MissingStructField,
    /// No direct or embedded field of the record matches the segment.
    UnknownField {
        name: String,
    },
    /// The path continues past a value that is decoded from a single string.
    CannotSetNestedFieldOnTerminal {
        type_name: &'static str,
        remaining: String,
    },
    /// A scalar conversion or extension decoder failed.
    CannotUnmarshalValue {
        value: String,
        type_name: &'static str,
        cause: BoxError,
    },
    /// The destination kind has no applicable strategy.
    UnmarshalableType {
        type_name: &'static str,
    },
    /// The argument name has more segments than [`crate::Options::max_path_depth`] allows.
    PathTooDeep {
        depth: usize,
        max: usize,
    },
    /// More arguments were supplied than [`crate::Options::max_arguments`] allows.
    TooManyArguments {
        count: usize,
        max: usize,
    },
    /// Driver wrapper attaching the `name=value` pair that triggered `cause`.
    Argument {
        name: String,
        value: String,
        cause: Box<Error>,
    },
}

impl Error {
    /// Wrap a resolver fault with the argument that produced it.
    pub(crate) fn for_argument(self, name: &str, value: &str) -> Self {
        Error::Argument {
            name: name.to_owned(),
            value: value.to_owned(),
            cause: Box::new(self),
        }
    }

    /// Construct a `CannotUnmarshalValue` error.
    ///
    /// Called by:
    /// - The resolver when a scalar conversion, registered decoder or self decoder fails.
    pub(crate) fn cannot_unmarshal(value: &str, type_name: &'static str, cause: BoxError) -> Self {
        Error::CannotUnmarshalValue {
            value: value.to_owned(),
            type_name,
            cause,
        }
    }

    /// The error with any [`Error::Argument`] wrapper removed.
    pub fn innermost(&self) -> &Error {
        match self {
            Error::Argument { cause, .. } => cause.innermost(),
            other => other,
        }
    }

    /// The `(name, value)` pair that triggered this error, if the driver attached one.
    pub fn argument(&self) -> Option<(&str, &str)> {
        match self {
            Error::Argument { name, value, .. } => Some((name, value)),
            _ => None,
        }
    }

    /// True for the fault that embedded-field lookup treats as "try the previous member".
    pub(crate) fn is_unknown_field(&self) -> bool {
        matches!(self, Error::UnknownField { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgumentName { name } => write!(f, "invalid argument name '{name}'"),
            Error::UnknownArgumentName { name } => write!(
                f,
                "unknown argument '{name}': it looks like an ID, did you mean 'id={name}'?"
            ),
            Error::DuplicateArgumentName { name } => write!(f, "duplicate argument '{name}'"),
            Error::DestinationNotPointerToStructOrMap { type_name } => {
                write!(f, "destination must be a record or a mapping, got {type_name}")
            }
            Error::MissingIndexOnSequence => write!(f, "missing index on sequence"),
            Error::InvalidIndex { index } => write!(f, "invalid index '{index}'"),
            Error::MissingIntermediateIndices { index, len } => write!(
                f,
                "missing indices, {index} is not a valid index, expected {len}"
            ),
            Error::MissingMapKey => write!(f, "missing map key"),
            Error::MissingStructField => write!(f, "missing field name"),
            Error::UnknownField { name } => write!(f, "unknown field '{name}'"),
            Error::CannotSetNestedFieldOnTerminal { type_name, remaining } => write!(
                f,
                "cannot set nested field '{remaining}' on {type_name}"
            ),
            Error::CannotUnmarshalValue { value, type_name, cause } => write!(
                f,
                "cannot unmarshal '{value}' into {type_name}: {cause}"
            ),
            Error::UnmarshalableType { type_name } => {
                write!(f, "{type_name} cannot be unmarshaled from arguments")
            }
            Error::PathTooDeep { depth, max } => {
                write!(f, "argument name has {depth} segments, at most {max} are allowed")
            }
            Error::TooManyArguments { count, max } => {
                write!(f, "{count} arguments given, at most {max} are allowed")
            }
            Error::Argument { name, value, cause } => {
                write!(f, "cannot unmarshal argument '{name}={value}': {cause}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CannotUnmarshalValue { cause, .. } => Some(cause.as_ref()),
            Error::Argument { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

/// Conversion failure reported by the scalar codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarError {
    msg: String,
}

impl ScalarError {
    pub(crate) fn msg<S: Into<String>>(s: S) -> Self {
        ScalarError { msg: s.into() }
    }
}

impl fmt::Display for ScalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for ScalarError {}
