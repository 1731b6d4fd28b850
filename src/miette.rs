//! `miette` integration.
//!
//! This module is feature-gated behind the `miette` feature. It gives every [`Error`] a stable
//! diagnostic code and, where a fix is obvious, a help line.
//!
//! ```rust
//! use miette::Diagnostic;
//!
//! #[derive(Debug, Default)]
//! struct Args {
//!     id: String,
//! }
//! argpath::record!(Args { id });
//!
//! let err = argpath::from_args::<Args, _>(&["11111111-1111-1111-1111-111111111111"]).unwrap_err();
//! assert_eq!(err.code().unwrap().to_string(), "argpath::unknown_argument_name");
//! assert!(err.help().is_some());
//! ```

use std::fmt;

use miette::Diagnostic;

use crate::Error;

fn code_name(err: &Error) -> &'static str {
    match err.innermost() {
        Error::InvalidArgumentName { .. } => "invalid_argument_name",
        Error::UnknownArgumentName { .. } => "unknown_argument_name",
        Error::DuplicateArgumentName { .. } => "duplicate_argument_name",
        Error::DestinationNotPointerToStructOrMap { .. } => "invalid_destination",
        Error::MissingIndexOnSequence => "missing_index",
        Error::InvalidIndex { .. } => "invalid_index",
        Error::MissingIntermediateIndices { .. } => "missing_intermediate_indices",
        Error::MissingMapKey => "missing_map_key",
        Error::MissingStructField => "missing_field",
        Error::UnknownField { .. } => "unknown_field",
        Error::CannotSetNestedFieldOnTerminal { .. } => "nested_field_on_terminal",
        Error::CannotUnmarshalValue { .. } => "cannot_unmarshal_value",
        Error::UnmarshalableType { .. } => "unmarshalable_type",
        Error::PathTooDeep { .. } => "path_too_deep",
        Error::TooManyArguments { .. } => "too_many_arguments",
        Error::Argument { .. } => "argument",
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("argpath::{}", code_name(self))))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.innermost() {
            Error::UnknownArgumentName { name } => {
                format!("pass the identifier through its field, for example `id={name}`")
            }
            Error::InvalidArgumentName { .. } => {
                "argument names are dot-separated words of letters, digits and hyphens".to_owned()
            }
            Error::DuplicateArgumentName { .. } => {
                "each argument may only be given once".to_owned()
            }
            Error::MissingIntermediateIndices { len, .. } => {
                format!("list indices must be contiguous, the next index is {len}")
            }
            Error::CannotSetNestedFieldOnTerminal { .. } => {
                "this value is set as a whole, drop the trailing path segments".to_owned()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}
