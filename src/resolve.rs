//! Path resolver: walks a destination value along the segments of one argument name.
//!
//! At every node the extension points are consulted first (self decoder, then registry, then the
//! scalar codec). A terminal node must be the end of the path. Otherwise the node is a container
//! and the next segment selects a child: an index for sequences, a literal key for mappings and a
//! field name for records. Containers on the way are created as needed.

use heck::ToSnakeCase;
use smallvec::SmallVec;

use crate::error::Error;
use crate::parse_scalars::assign_scalar;
use crate::registry::Registry;
use crate::target::{ArgTarget, MappingNode, Node, RecordNode, SequenceNode};

pub(crate) struct Resolver<'r> {
    registry: &'r Registry,
}

/// Terminal values accept no further segments.
fn ensure_leaf(path: &[&str], type_name: &'static str) -> Result<(), Error> {
    if path.is_empty() {
        Ok(())
    } else {
        Err(Error::CannotSetNestedFieldOnTerminal {
            type_name,
            remaining: path.join("."),
        })
    }
}

impl<'r> Resolver<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Resolver { registry }
    }

    /// Assign `value` to the node of `target` addressed by `path`.
    pub(crate) fn set(
        &self,
        target: &mut dyn ArgTarget,
        path: &[&str],
        value: &str,
    ) -> Result<(), Error> {
        let type_name = target.type_name();

        if let Some(decoder) = target.self_decoder() {
            ensure_leaf(path, type_name)?;
            tracing::trace!(type_name, "self decoding");
            return decoder
                .decode_arg(value)
                .map_err(|cause| Error::cannot_unmarshal(value, type_name, cause));
        }

        if let Some(decode) = self.registry.lookup(target.target_type_id()) {
            ensure_leaf(path, type_name)?;
            tracing::trace!(type_name, "registered decoder");
            return decode(value, target)
                .map_err(|cause| Error::cannot_unmarshal(value, type_name, cause));
        }

        match target.node() {
            Node::Scalar(scalar) => {
                ensure_leaf(path, type_name)?;
                assign_scalar(value, scalar)
                    .map_err(|cause| Error::cannot_unmarshal(value, type_name, Box::new(cause)))
            }
            Node::Indirect(indirect) => self.set(indirect.get_or_insert(), path, value),
            Node::Sequence(sequence) => self.set_sequence(sequence, path, value),
            Node::Mapping(mapping) => self.set_mapping(mapping, path, value),
            Node::Record(record) => self.set_record(record, path, value),
            Node::Opaque => Err(Error::UnmarshalableType { type_name }),
        }
    }

    fn set_sequence(
        &self,
        sequence: &mut dyn SequenceNode,
        path: &[&str],
        value: &str,
    ) -> Result<(), Error> {
        let Some((segment, rest)) = path.split_first() else {
            return Err(Error::MissingIndexOnSequence);
        };
        let index: usize = segment.parse().map_err(|_| Error::InvalidIndex {
            index: (*segment).to_owned(),
        })?;

        // Sequences only grow by one element at a time.
        let len = sequence.len();
        if index > len {
            return Err(Error::MissingIntermediateIndices { index, len });
        }
        if index == len {
            tracing::trace!(index, "appending sequence element");
            sequence.push_default();
        }
        let element = sequence
            .element_mut(index)
            .ok_or(Error::MissingIntermediateIndices { index, len })?;
        self.set(element, rest, value)
    }

    fn set_mapping(
        &self,
        mapping: &mut dyn MappingNode,
        path: &[&str],
        value: &str,
    ) -> Result<(), Error> {
        let Some((key, rest)) = path.split_first() else {
            return Err(Error::MissingMapKey);
        };
        tracing::trace!(key, "updating map entry");
        mapping.update_entry(key, &mut |entry: &mut dyn ArgTarget| {
            self.set(entry, rest, value)
        })
    }

    fn set_record(
        &self,
        record: &mut dyn RecordNode,
        path: &[&str],
        value: &str,
    ) -> Result<(), Error> {
        let Some((segment, rest)) = path.split_first() else {
            return Err(Error::MissingStructField);
        };
        let fields = record.fields();
        let field_name = segment.to_snake_case();

        if let Some(index) = fields
            .iter()
            .position(|field| !field.is_embedded() && field.name() == field_name)
        {
            tracing::trace!(field = %field_name, "direct field");
            if let Some(field) = record.field_mut(index) {
                return self.set(field, rest, value);
            }
        }

        // Embedded fields are transparent: they see the whole path, last declared first.
        let embedded: SmallVec<[usize; 4]> = fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_embedded())
            .map(|(index, _)| index)
            .collect();
        for &index in embedded.iter().rev() {
            let Some(field) = record.field_mut(index) else {
                continue;
            };
            tracing::trace!(embedded = fields[index].name(), "trying embedded field");
            match self.set(field, path, value) {
                Err(err) if err.is_unknown_field() => continue,
                outcome => return outcome,
            }
        }

        Err(Error::UnknownField {
            name: (*segment).to_owned(),
        })
    }
}
