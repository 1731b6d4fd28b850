//! Top-level driver: validates argument names, rejects duplicates and resolves each argument.

use ahash::AHashSet;
use smallvec::SmallVec;

use crate::error::Error;
use crate::options::Options;
use crate::resolve::Resolver;
use crate::split::{is_valid_name, looks_like_uuid, split_arg};
use crate::target::{ArgTarget, Node};

/// Destination that captures the raw argument list verbatim, bypassing all parsing.
///
/// ```rust
/// let mut raw = argpath::RawArgs::default();
/// argpath::unmarshal(&["not a valid name", "x=1"], &mut raw).unwrap();
/// assert_eq!(raw.0, vec!["not a valid name", "x=1"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawArgs(pub Vec<String>);

crate::registered_target!(RawArgs);

/// Unmarshal `args` into `dest` with default [`Options`].
///
/// `dest` must be a record (see [`crate::record!`]), a string-keyed map, or [`RawArgs`].
/// Arguments are applied in order; the first failure aborts the call and is returned wrapped in
/// [`Error::Argument`] together with the offending `name=value` pair.
pub fn unmarshal<T, S>(args: &[S], dest: &mut T) -> Result<(), Error>
where
    T: ArgTarget,
    S: AsRef<str>,
{
    unmarshal_with_options(args, dest, Options::default())
}

/// Unmarshal `args` into `dest` with the given [`Options`].
pub fn unmarshal_with_options<T, S>(args: &[S], dest: &mut T, options: Options) -> Result<(), Error>
where
    T: ArgTarget,
    S: AsRef<str>,
{
    if let Some(raw) = dest.as_any_mut().downcast_mut::<RawArgs>() {
        raw.0 = args.iter().map(|arg| arg.as_ref().to_owned()).collect();
        return Ok(());
    }

    if !matches!(dest.node(), Node::Record(_) | Node::Mapping(_)) {
        return Err(Error::DestinationNotPointerToStructOrMap {
            type_name: dest.type_name(),
        });
    }

    if args.len() > options.max_arguments {
        return Err(Error::TooManyArguments {
            count: args.len(),
            max: options.max_arguments,
        });
    }

    let resolver = Resolver::new(options.registry());
    let mut processed: AHashSet<String> = AHashSet::with_capacity(args.len());

    for arg in args {
        let (name, value) = split_arg(arg.as_ref());
        tracing::debug!(name, value, "unmarshaling argument");

        if !is_valid_name(name) {
            let err = if looks_like_uuid(name) {
                Error::UnknownArgumentName {
                    name: name.to_owned(),
                }
            } else {
                Error::InvalidArgumentName {
                    name: name.to_owned(),
                }
            };
            return Err(err.for_argument(name, value));
        }

        // Field segments are matched without regard to case, so duplicates are too.
        if !processed.insert(name.to_ascii_lowercase()) {
            return Err(Error::DuplicateArgumentName {
                name: name.to_owned(),
            }
            .for_argument(name, value));
        }

        let path: SmallVec<[&str; 8]> = name.split('.').collect();
        if path.len() > options.max_path_depth {
            return Err(Error::PathTooDeep {
                depth: path.len(),
                max: options.max_path_depth,
            }
            .for_argument(name, value));
        }

        resolver.set(dest, &path, value).map_err(|err| {
            // Letter-leading UUIDs pass the grammar and only fail at field lookup.
            let err = if err.is_unknown_field() && looks_like_uuid(name) {
                Error::UnknownArgumentName {
                    name: name.to_owned(),
                }
            } else {
                err
            };
            err.for_argument(name, value)
        })?;
    }

    Ok(())
}

/// Build a default `T` and unmarshal `args` into it.
///
/// ```rust
/// use std::collections::HashMap;
///
/// let labels: HashMap<String, String> = argpath::from_args(&["env=prod", "team=infra"]).unwrap();
/// assert_eq!(labels["env"], "prod");
/// ```
pub fn from_args<T, S>(args: &[S]) -> Result<T, Error>
where
    T: ArgTarget + Default,
    S: AsRef<str>,
{
    from_args_with_options(args, Options::default())
}

/// Build a default `T` and unmarshal `args` into it with the given [`Options`].
pub fn from_args_with_options<T, S>(args: &[S], options: Options) -> Result<T, Error>
where
    T: ArgTarget + Default,
    S: AsRef<str>,
{
    let mut dest = T::default();
    unmarshal_with_options(args, &mut dest, options)?;
    Ok(dest)
}
