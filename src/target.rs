//! Destination schema: how a value describes itself to the path resolver.
//!
//! Every type that can appear in a destination tree implements [`ArgTarget`]. The resolver never
//! inspects a type directly; it asks the node what kind it is ([`Node`]) and, for containers,
//! walks into children through the object-safe container traits below.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{BoxError, Error};

/// A value that can be the destination (or part of the destination) of [`crate::unmarshal`].
///
/// Records implement this through [`crate::record!`], self-decoding types through
/// [`crate::decode_target!`] and registry-decoded types through [`crate::registered_target!`].
pub trait ArgTarget: 'static {
    /// Describe what kind of node this value is.
    fn node(&mut self) -> Node<'_>;

    /// Return the self-decoding capability, if this type has one.
    ///
    /// Checked before the registry and before scalar handling.
    fn self_decoder(&mut self) -> Option<&mut dyn DecodeArg> {
        None
    }

    /// Upcast used to hand the value to a registered decoder.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Identity used to look up registered decoders.
    fn target_type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Self-decoding capability: decode one raw argument string into `self`.
pub trait DecodeArg {
    fn decode_arg(&mut self, raw: &str) -> Result<(), BoxError>;
}

/// The kind of a destination node, borrowed mutably from the value.
pub enum Node<'a> {
    /// A fixed scalar decoded by the scalar codec.
    Scalar(Scalar<'a>),
    /// Optional or boxed value; storage is allocated on first access.
    Indirect(&'a mut dyn IndirectNode),
    /// Ordered sequence addressed by contiguous indices.
    Sequence(&'a mut dyn SequenceNode),
    /// String-keyed mapping.
    Mapping(&'a mut dyn MappingNode),
    /// Record with named (and possibly embedded) fields.
    Record(&'a mut dyn RecordNode),
    /// A value that is only terminal through an extension point.
    Opaque,
}

/// Mutable slot of one of the fixed scalar kinds.
pub enum Scalar<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Text(&'a mut String),
}

/// Pointer-like node (`Option<T>`, `Box<T>`).
pub trait IndirectNode {
    /// Return the pointee, allocating a default value first if there is none.
    fn get_or_insert(&mut self) -> &mut dyn ArgTarget;
}

/// Ordered sequence node.
pub trait SequenceNode {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one default element.
    fn push_default(&mut self);

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn ArgTarget>;
}

/// Visitor applied to a map entry by [`MappingNode::update_entry`].
pub type EntryUpdate<'f> = dyn FnMut(&mut dyn ArgTarget) -> Result<(), Error> + 'f;

/// String-keyed mapping node.
pub trait MappingNode {
    /// Run `update` on a fresh default entry and store it under `key` once `update` succeeds,
    /// replacing any previous entry.
    fn update_entry(&mut self, key: &str, update: &mut EntryUpdate<'_>) -> Result<(), Error>;
}

/// One entry of a record's field table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    embedded: bool,
}

impl Field {
    /// A field addressed by its own name.
    pub const fn direct(name: &'static str) -> Self {
        Field { name, embedded: false }
    }

    /// A field whose own fields are exposed as if they belonged to the containing record.
    pub const fn embedded(name: &'static str) -> Self {
        Field { name, embedded: true }
    }

    /// Field name with any raw identifier prefix (`r#type`) removed.
    pub fn name(&self) -> &'static str {
        self.name.strip_prefix("r#").unwrap_or(self.name)
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}

/// Record node.
pub trait RecordNode {
    /// Field table in declaration order. Embedded fields keep their relative order.
    fn fields(&self) -> &'static [Field];

    /// Field at `index` in [`RecordNode::fields`].
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn ArgTarget>;
}

macro_rules! scalar_targets {
    ($( $ty:ty => $variant:ident ),* $(,)?) => {
        $(
            impl ArgTarget for $ty {
                fn node(&mut self) -> Node<'_> {
                    Node::Scalar(Scalar::$variant(self))
                }

                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }
            }
        )*
    };
}

scalar_targets! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Text,
}

crate::registered_target!(IpAddr, Ipv4Addr, Ipv6Addr);

impl<T: ArgTarget + Default> IndirectNode for Option<T> {
    fn get_or_insert(&mut self) -> &mut dyn ArgTarget {
        self.get_or_insert_with(T::default)
    }
}

impl<T: ArgTarget + Default> ArgTarget for Option<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Indirect(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: ArgTarget> IndirectNode for Box<T> {
    fn get_or_insert(&mut self) -> &mut dyn ArgTarget {
        &mut **self
    }
}

impl<T: ArgTarget> ArgTarget for Box<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Indirect(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: ArgTarget + Default> SequenceNode for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push_default(&mut self) {
        self.push(T::default());
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn ArgTarget> {
        self.get_mut(index).map(|e| e as &mut dyn ArgTarget)
    }
}

impl<T: ArgTarget + Default> ArgTarget for Vec<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Sequence(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<V, S> MappingNode for HashMap<String, V, S>
where
    V: ArgTarget + Default,
    S: BuildHasher + 'static,
{
    fn update_entry(&mut self, key: &str, update: &mut EntryUpdate<'_>) -> Result<(), Error> {
        let mut entry = V::default();
        update(&mut entry as &mut dyn ArgTarget)?;
        self.insert(key.to_owned(), entry);
        Ok(())
    }
}

impl<V, S> ArgTarget for HashMap<String, V, S>
where
    V: ArgTarget + Default,
    S: BuildHasher + 'static,
{
    fn node(&mut self) -> Node<'_> {
        Node::Mapping(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<V: ArgTarget + Default> MappingNode for BTreeMap<String, V> {
    fn update_entry(&mut self, key: &str, update: &mut EntryUpdate<'_>) -> Result<(), Error> {
        let mut entry = V::default();
        update(&mut entry as &mut dyn ArgTarget)?;
        self.insert(key.to_owned(), entry);
        Ok(())
    }
}

impl<V: ArgTarget + Default> ArgTarget for BTreeMap<String, V> {
    fn node(&mut self) -> Node<'_> {
        Node::Mapping(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
