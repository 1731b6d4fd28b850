//! Unmarshal dotted `name=value` command line arguments into strongly typed structures.
//!
//! ```rust
//! use argpath::Size;
//!
//! #[derive(Debug, Default)]
//! struct Offer {
//!     size: Size,
//! }
//! argpath::record!(Offer { size });
//!
//! #[derive(Debug, Default)]
//! struct Create {
//!     name: String,
//!     tags: Vec<String>,
//!     offer: Offer,
//! }
//! argpath::record!(Create { name, tags, offer });
//!
//! let args = ["name=foo", "tags.0=prod", "tags.1=blue", "offer.size=10G"];
//! let create: Create = argpath::from_args(&args).unwrap();
//! assert_eq!(create.name, "foo");
//! assert_eq!(create.tags, ["prod", "blue"]);
//! assert_eq!(create.offer.size, Size::from_bytes(10_000_000_000));
//! ```

pub use error::{BoxError, Error, ScalarError};
pub use net::{IpNet, IpNetError};
pub use options::Options;
pub use payload::Payload;
pub use registry::{Registry, is_terminal, register_decoder};
pub use size::{Size, SizeError};
pub use split::{split_arg, split_args};
pub use target::{
    ArgTarget, DecodeArg, EntryUpdate, Field, IndirectNode, MappingNode, Node, RecordNode,
    Scalar, SequenceNode,
};
pub use unmarshal::{RawArgs, from_args, from_args_with_options, unmarshal, unmarshal_with_options};

mod error;
mod macros;
#[cfg(feature = "miette")]
pub mod miette;
mod net;
mod options;
mod parse_scalars;
mod payload;
mod registry;
mod resolve;
mod size;
mod split;
mod target;
mod unmarshal;

/// Decode a single string through `T`'s `serde::Deserialize` implementation.
///
/// Used by [`serde_target!`]; string-like types and unit-variant enums decode naturally.
pub fn decode_with_serde<T>(raw: &str) -> Result<T, serde::de::value::Error>
where
    T: serde::de::DeserializeOwned,
{
    use serde::de::IntoDeserializer;

    T::deserialize(raw.into_deserializer())
}
