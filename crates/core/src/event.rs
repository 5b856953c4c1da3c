//! Synthesis of event descriptors, log decoders and response records

use crate::{
    abi::AbiEntry,
    error::Result,
    function::canonical_signature,
    ident::{self, EventNames, NameRegistry},
    native::{self, NativeType},
    resolver::{self, TypeDescriptor},
    utils,
};

/// Response record field reserved for the originating log
pub const LOG_FIELD: &str = "log";

/// Event name plus its field types in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescriptor {
    pub name: String,
    pub fields: Vec<(TypeDescriptor, bool)>,
}

/// One event field, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventField {
    pub name: String,
    pub wire: TypeDescriptor,
    pub indexed: bool,
    /// Type of the field in the response record
    pub native: NativeType,
}

/// Where a response field's value comes from in a decoded log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Indexed(usize),
    NonIndexed(usize),
}

/// A response record field with the position it is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseField<'a> {
    pub field: &'a EventField,
    pub source: ValueSource,
}

/// Everything needed to emit the wrappers of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWrapperSpec {
    pub name: String,
    pub names: EventNames,
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`
    pub signature: String,
    pub topic: [u8; 32],
    pub fields: Vec<EventField>,
}

impl EventWrapperSpec {
    pub fn descriptor(&self) -> EventDescriptor {
        EventDescriptor {
            name: self.name.clone(),
            fields: self.fields.iter().map(|f| (f.wire.clone(), f.indexed)).collect(),
        }
    }

    pub fn indexed_fields(&self) -> impl Iterator<Item = &EventField> {
        self.fields.iter().filter(|f| f.indexed)
    }

    pub fn non_indexed_fields(&self) -> impl Iterator<Item = &EventField> {
        self.fields.iter().filter(|f| !f.indexed)
    }

    /// Record fields after the log handle: indexed fields, then the rest,
    /// each group in declaration order
    pub fn response_fields(&self) -> Vec<ResponseField<'_>> {
        let indexed = self
            .indexed_fields()
            .enumerate()
            .map(|(i, field)| ResponseField { field, source: ValueSource::Indexed(i) });
        let non_indexed = self
            .non_indexed_fields()
            .enumerate()
            .map(|(i, field)| ResponseField { field, source: ValueSource::NonIndexed(i) });
        indexed.chain(non_indexed).collect()
    }

    pub fn topic_hex(&self) -> String {
        utils::to_hex(&self.topic)
    }
}

/// Builds the wrapper description of an ABI event
pub fn synthesize(entry: &AbiEntry) -> Result<EventWrapperSpec> {
    let mut names = NameRegistry::new();
    names.reserve(LOG_FIELD);

    let fields = entry
        .inputs
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let wire = resolver::resolve(&param.declared_type)?;
            let native = if param.indexed {
                native::project_for_event_field(&wire)?
            } else {
                native::project(&wire)?
            };
            Ok(EventField {
                name: names.unique(&ident::sanitize(&param.name, index)),
                wire,
                indexed: param.indexed,
                native,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let signature = canonical_signature(&entry.name, fields.iter().map(|f| &f.wire));
    tracing::debug!("Synthesized event {}", signature);

    Ok(EventWrapperSpec {
        name: entry.name.clone(),
        names: EventNames::new(&entry.name),
        topic: utils::keccak256(signature.as_bytes()),
        signature,
        fields,
    })
}
