//! Public macros that implement the destination schema and build options.
//!
//! Records are described explicitly: the macros expand into [`crate::ArgTarget`] and
//! [`crate::RecordNode`] implementations, so no runtime reflection is involved.

/// Implement the record schema for a struct.
///
/// Direct fields are listed first. Embedded fields, whose own fields are addressed as if they
/// belonged to the containing record, follow after `; embedded` in declaration order. When two
/// embedded fields expose the same name, the one listed last wins.
///
/// Every field type must implement [`crate::ArgTarget`].
///
/// ```rust
/// #[derive(Debug, Default)]
/// struct Volume {
///     size: argpath::Size,
/// }
/// argpath::record!(Volume { size });
///
/// #[derive(Debug, Default)]
/// struct Common {
///     zone: String,
/// }
/// argpath::record!(Common { zone });
///
/// #[derive(Debug, Default)]
/// struct CreateServer {
///     name: String,
///     volumes: Vec<Volume>,
///     common: Common,
/// }
/// argpath::record!(CreateServer { name, volumes; embedded common });
///
/// let req: CreateServer =
///     argpath::from_args(&["name=web", "volumes.0.size=20GB", "zone=fr-par-1"]).unwrap();
/// assert_eq!(req.common.zone, "fr-par-1");
/// assert_eq!(req.volumes[0].size.as_u64(), 20_000_000_000);
/// ```
#[macro_export]
macro_rules! record {
    ( $ty:ty { $( $field:ident ),* $(,)? $( ; embedded $( $embed:ident ),+ $(,)? )? } ) => {
        impl $crate::RecordNode for $ty {
            fn fields(&self) -> &'static [$crate::Field] {
                const FIELDS: &[$crate::Field] = &[
                    $( $crate::Field::direct(stringify!($field)), )*
                    $( $( $crate::Field::embedded(stringify!($embed)), )+ )?
                ];
                FIELDS
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field_mut(&mut self, index: usize) -> Option<&mut dyn $crate::ArgTarget> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return Some(&mut self.$field as &mut dyn $crate::ArgTarget);
                    }
                    position += 1;
                )*
                $( $(
                    if index == position {
                        return Some(&mut self.$embed as &mut dyn $crate::ArgTarget);
                    }
                    position += 1;
                )+ )?
                None
            }
        }

        impl $crate::ArgTarget for $ty {
            fn node(&mut self) -> $crate::Node<'_> {
                $crate::Node::Record(self)
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

/// Make types implementing [`crate::DecodeArg`] terminal destination nodes.
///
/// ```rust
/// #[derive(Debug, Default, PartialEq)]
/// struct Upper(String);
///
/// impl argpath::DecodeArg for Upper {
///     fn decode_arg(&mut self, raw: &str) -> Result<(), argpath::BoxError> {
///         self.0 = raw.to_uppercase();
///         Ok(())
///     }
/// }
/// argpath::decode_target!(Upper);
/// ```
#[macro_export]
macro_rules! decode_target {
    ( $( $ty:ty ),+ $(,)? ) => {
        $(
            impl $crate::ArgTarget for $ty {
                fn node(&mut self) -> $crate::Node<'_> {
                    $crate::Node::Opaque
                }

                fn self_decoder(&mut self) -> Option<&mut dyn $crate::DecodeArg> {
                    Some(self)
                }

                fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                    self
                }
            }
        )+
    };
}

/// Make types destination nodes that are decoded only through a registered decoder.
///
/// Without a registration for the type, unmarshaling into it fails with
/// [`crate::Error::UnmarshalableType`].
#[macro_export]
macro_rules! registered_target {
    ( $( $ty:ty ),+ $(,)? ) => {
        $(
            impl $crate::ArgTarget for $ty {
                fn node(&mut self) -> $crate::Node<'_> {
                    $crate::Node::Opaque
                }

                fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                    self
                }
            }
        )+
    };
}

/// Make `serde::Deserialize` types self-decoding from a single string.
///
/// Handy for unit-variant enums:
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize, PartialEq)]
/// #[serde(rename_all = "snake_case")]
/// enum VolumeType {
///     #[default]
///     LSsd,
///     BSsd,
/// }
/// argpath::serde_target!(VolumeType);
///
/// #[derive(Debug, Default)]
/// struct Volume {
///     volume_type: VolumeType,
/// }
/// argpath::record!(Volume { volume_type });
///
/// let v: Volume = argpath::from_args(&["volume-type=b_ssd"]).unwrap();
/// assert_eq!(v.volume_type, VolumeType::BSsd);
/// ```
#[macro_export]
macro_rules! serde_target {
    ( $( $ty:ty ),+ $(,)? ) => {
        $(
            impl $crate::DecodeArg for $ty {
                fn decode_arg(&mut self, raw: &str) -> Result<(), $crate::BoxError> {
                    *self = $crate::decode_with_serde::<$ty>(raw)?;
                    Ok(())
                }
            }

            $crate::decode_target!($ty);
        )+
    };
}

/// Construct [`crate::Options`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let options = argpath::options! {
///     max_path_depth: 8,
///     max_arguments: 64,
/// };
/// assert_eq!(options.max_path_depth, 8);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::Options::default();
        $(
            opt.$field = $value;
        )*
        opt
    }};
}
