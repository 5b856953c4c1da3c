//! Projection of wire types onto the types exposed to callers of generated wrappers

use crate::{
    error::{BindgenError, Result},
    resolver::{ArrayContainer, TypeDescriptor, WireKind},
};

/// Caller-facing type of a wrapper parameter, return value or event field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    Text,
    Bool,
    /// Arbitrary-precision integer
    Integer,
    Bytes,
    List(Box<NativeType>),
}

/// A node handed to the projector
///
/// Resolved descriptors always project. A bare array container, i.e. the
/// container head of a descriptor without its element, has no native form.
#[derive(Debug, Clone, Copy)]
pub enum TypeNode<'a> {
    Descriptor(&'a TypeDescriptor),
    Container(ArrayContainer),
}

impl<'a> From<&'a TypeDescriptor> for TypeNode<'a> {
    fn from(descriptor: &'a TypeDescriptor) -> Self {
        TypeNode::Descriptor(descriptor)
    }
}

impl From<ArrayContainer> for TypeNode<'_> {
    fn from(container: ArrayContainer) -> Self {
        TypeNode::Container(container)
    }
}

/// Projects a wire type onto its native type
pub fn project<'a>(node: impl Into<TypeNode<'a>>) -> Result<NativeType> {
    match node.into() {
        TypeNode::Descriptor(descriptor) => Ok(project_descriptor(descriptor)),
        TypeNode::Container(container) => {
            Err(BindgenError::UnsupportedWireType(container.wire_name()))
        }
    }
}

/// Projects an event field
///
/// Indexed dynamic fields reach consumers as a topic digest, so they
/// project to raw bytes instead of their logical value.
pub fn project_for_event_field<'a>(node: impl Into<TypeNode<'a>>) -> Result<NativeType> {
    match node.into() {
        TypeNode::Descriptor(descriptor) if descriptor.is_dynamic() => Ok(NativeType::Bytes),
        node => project(node),
    }
}

fn project_descriptor(descriptor: &TypeDescriptor) -> NativeType {
    match descriptor {
        TypeDescriptor::Primitive(kind) => project_kind(*kind),
        TypeDescriptor::FixedArray { element, .. } | TypeDescriptor::DynamicArray(element) => {
            NativeType::List(Box::new(project_descriptor(element)))
        }
    }
}

fn project_kind(kind: WireKind) -> NativeType {
    match kind {
        WireKind::Address | WireKind::String => NativeType::Text,
        WireKind::Uint(_) | WireKind::Int(_) => NativeType::Integer,
        WireKind::Bool => NativeType::Bool,
        WireKind::FixedBytes(_) | WireKind::Bytes => NativeType::Bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    fn native(declared: &str) -> NativeType {
        project(&resolve(declared).unwrap()).unwrap()
    }

    fn event_native(declared: &str) -> NativeType {
        project_for_event_field(&resolve(declared).unwrap()).unwrap()
    }

    #[test]
    fn test_project_primitives() {
        assert_eq!(native("address"), NativeType::Text);
        assert_eq!(native("uint256"), NativeType::Integer);
        assert_eq!(native("uint8"), NativeType::Integer);
        assert_eq!(native("int256"), NativeType::Integer);
        assert_eq!(native("string"), NativeType::Text);
        assert_eq!(native("bool"), NativeType::Bool);
        assert_eq!(native("bytes32"), NativeType::Bytes);
        assert_eq!(native("bytes"), NativeType::Bytes);
    }

    #[test]
    fn test_project_arrays() {
        assert_eq!(native("address[]"), NativeType::List(Box::new(NativeType::Text)));
        assert_eq!(
            native("uint8[2][]"),
            NativeType::List(Box::new(NativeType::List(Box::new(NativeType::Integer))))
        );
        assert_eq!(native("bool[40]"), NativeType::List(Box::new(NativeType::Bool)));
    }

    #[test]
    fn test_project_bare_container_is_unsupported() {
        let descriptor = resolve("address[]").unwrap();
        let container = descriptor.container().unwrap();

        let err = project(container).unwrap_err();
        assert!(matches!(err, BindgenError::UnsupportedWireType(ref name) if name == "DynamicArray"));
        assert!(project_for_event_field(container).is_err());
    }

    #[test]
    fn test_project_event_fields() {
        assert_eq!(event_native("string"), NativeType::Bytes);
        assert_eq!(event_native("bytes"), NativeType::Bytes);
        assert_eq!(event_native("address[]"), NativeType::Bytes);
        assert_eq!(event_native("address"), NativeType::Text);
        assert_eq!(event_native("uint256"), NativeType::Integer);
        assert_eq!(event_native("uint8[3]"), NativeType::List(Box::new(NativeType::Integer)));
    }
}
