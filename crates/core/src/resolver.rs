//! Resolution of ABI type grammar strings into structured descriptors

use crate::error::{BindgenError, Result};
use std::fmt;

/// Largest fixed array length that maps to a length-specific container
/// (`StaticArray1` ..= `StaticArray32`). Longer fixed arrays use the
/// generic `StaticArray` container and carry their length as a value.
///
/// Changing this alters the signatures of generated code.
pub const MAX_SMALL_STATIC_ARRAY: usize = 32;

/// Deepest array nesting accepted in a declared type
pub const MAX_ARRAY_DEPTH: usize = 64;

const STORAGE_QUALIFIERS: [&str; 3] = ["storage", "memory", "calldata"];

/// Elementary wire categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Uint(u16),
    Int(u16),
    Bool,
    Address,
    /// `bytes1` ..= `bytes32`
    FixedBytes(u8),
    /// Dynamic `bytes`
    Bytes,
    String,
}

impl WireKind {
    /// Name of the runtime wire type, e.g. `Uint256` or `Bytes32`
    pub fn wire_name(self) -> String {
        match self {
            WireKind::Uint(bits) => format!("Uint{bits}"),
            WireKind::Int(bits) => format!("Int{bits}"),
            WireKind::Bool => "Bool".to_string(),
            WireKind::Address => "Address".to_string(),
            WireKind::FixedBytes(len) => format!("Bytes{len}"),
            WireKind::Bytes => "DynamicBytes".to_string(),
            WireKind::String => "Utf8String".to_string(),
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireKind::Uint(bits) => write!(f, "uint{bits}"),
            WireKind::Int(bits) => write!(f, "int{bits}"),
            WireKind::Bool => f.write_str("bool"),
            WireKind::Address => f.write_str("address"),
            WireKind::FixedBytes(len) => write!(f, "bytes{len}"),
            WireKind::Bytes => f.write_str("bytes"),
            WireKind::String => f.write_str("string"),
        }
    }
}

/// Structured, possibly nested, ABI type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(WireKind),
    FixedArray {
        element: Box<TypeDescriptor>,
        length: usize,
    },
    DynamicArray(Box<TypeDescriptor>),
}

/// Runtime container a descriptor's outermost array maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayContainer {
    /// Length-specific container, `StaticArrayN<T>`
    Static(usize),
    /// Generic container, `StaticArray<T>`; the length lives at value level
    Bounded(usize),
    Dynamic,
}

impl ArrayContainer {
    /// Container of a fixed array of `length` elements
    pub fn fixed(length: usize) -> Self {
        if length <= MAX_SMALL_STATIC_ARRAY {
            ArrayContainer::Static(length)
        } else {
            ArrayContainer::Bounded(length)
        }
    }

    pub fn wire_name(self) -> String {
        match self {
            ArrayContainer::Static(length) => format!("StaticArray{length}"),
            ArrayContainer::Bounded(_) => "StaticArray".to_string(),
            ArrayContainer::Dynamic => "DynamicArray".to_string(),
        }
    }
}

impl TypeDescriptor {
    /// The outermost array container, if this is an array
    pub fn container(&self) -> Option<ArrayContainer> {
        match self {
            TypeDescriptor::Primitive(_) => None,
            TypeDescriptor::FixedArray { length, .. } => Some(ArrayContainer::fixed(*length)),
            TypeDescriptor::DynamicArray(_) => Some(ArrayContainer::Dynamic),
        }
    }

    /// Element type of an array descriptor
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::Primitive(_) => None,
            TypeDescriptor::FixedArray { element, .. } | TypeDescriptor::DynamicArray(element) => {
                Some(element)
            }
        }
    }

    pub fn is_array(&self) -> bool {
        !matches!(self, TypeDescriptor::Primitive(_))
    }

    /// Whether the encoded size depends on the value
    pub fn is_dynamic(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => matches!(kind, WireKind::Bytes | WireKind::String),
            TypeDescriptor::FixedArray { element, .. } => element.is_dynamic(),
            TypeDescriptor::DynamicArray(_) => true,
        }
    }

    /// Full runtime wire type name, e.g. `DynamicArray<StaticArray10<Uint256>>`
    pub fn wire_name(&self) -> String {
        match self {
            TypeDescriptor::Primitive(kind) => kind.wire_name(),
            TypeDescriptor::FixedArray { element, length } => format!(
                "{}<{}>",
                ArrayContainer::fixed(*length).wire_name(),
                element.wire_name()
            ),
            TypeDescriptor::DynamicArray(element) => {
                format!("{}<{}>", ArrayContainer::Dynamic.wire_name(), element.wire_name())
            }
        }
    }
}

/// Canonical ABI spelling, as used in selectors and topics
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => write!(f, "{kind}"),
            TypeDescriptor::FixedArray { element, length } => write!(f, "{element}[{length}]"),
            TypeDescriptor::DynamicArray(element) => write!(f, "{element}[]"),
        }
    }
}

/// Resolves a declared ABI type string into a descriptor
pub fn resolve(declared: &str) -> Result<TypeDescriptor> {
    let ty = strip_storage_qualifier(declared)?;
    resolve_type(declared, ty, 0)
}

fn strip_storage_qualifier(declared: &str) -> Result<&str> {
    let mut tokens = declared.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(ty), None, None) => Ok(ty),
        (Some(ty), Some(qualifier), None) if STORAGE_QUALIFIERS.contains(&qualifier) => Ok(ty),
        (None, _, _) => Err(BindgenError::grammar(declared, "empty type")),
        _ => Err(BindgenError::grammar(declared, "unexpected type qualifier")),
    }
}

fn resolve_type(declared: &str, ty: &str, depth: usize) -> Result<TypeDescriptor> {
    let Some(rest) = ty.strip_suffix(']') else {
        return resolve_primitive(declared, ty).map(TypeDescriptor::Primitive);
    };
    if depth == MAX_ARRAY_DEPTH {
        return Err(BindgenError::grammar(
            declared,
            format!("array nesting deeper than {MAX_ARRAY_DEPTH}"),
        ));
    }

    let open = rest
        .rfind('[')
        .ok_or_else(|| BindgenError::grammar(declared, "unbalanced `]`"))?;
    let (inner, dimension) = (&rest[..open], &rest[open + 1..]);
    let element = Box::new(resolve_type(declared, inner, depth + 1)?);

    if dimension.is_empty() {
        return Ok(TypeDescriptor::DynamicArray(element));
    }

    let length = parse_decimal(dimension)
        .filter(|length| *length > 0)
        .ok_or_else(|| {
            BindgenError::grammar(declared, format!("invalid array length `{dimension}`"))
        })?;

    Ok(TypeDescriptor::FixedArray { element, length })
}

fn resolve_primitive(declared: &str, base: &str) -> Result<WireKind> {
    match base {
        "bool" => return Ok(WireKind::Bool),
        "address" => return Ok(WireKind::Address),
        "string" => return Ok(WireKind::String),
        "bytes" => return Ok(WireKind::Bytes),
        "uint" => return Ok(WireKind::Uint(256)),
        "int" => return Ok(WireKind::Int(256)),
        _ => {}
    }

    if let Some(width) = base.strip_prefix("uint") {
        return integer_width(declared, width).map(WireKind::Uint);
    }
    if let Some(width) = base.strip_prefix("int") {
        return integer_width(declared, width).map(WireKind::Int);
    }
    if let Some(width) = base.strip_prefix("bytes") {
        return match parse_decimal(width) {
            Some(len @ 1..=32) => Ok(WireKind::FixedBytes(len as u8)),
            _ => Err(BindgenError::grammar(declared, "byte length must be in 1..=32")),
        };
    }

    Err(BindgenError::grammar(declared, format!("unknown type `{base}`")))
}

fn integer_width(declared: &str, width: &str) -> Result<u16> {
    match parse_decimal(width) {
        Some(bits @ 8..=256) if bits % 8 == 0 => Ok(bits as u16),
        _ => Err(BindgenError::grammar(
            declared,
            "bit width must be a multiple of 8 in 8..=256",
        )),
    }
}

/// Parses a canonical decimal number (no sign, no leading zeros)
fn parse_decimal(digits: &str) -> Option<usize> {
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if canonical {
        digits.parse().ok()
    } else {
        None
    }
}
