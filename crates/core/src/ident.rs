//! Identifier sanitizing and naming of generated items

use convert_case::{Case, Casing};
use std::collections::HashMap;

/// Turns a raw ABI parameter name into a legal Rust identifier
///
/// Blank names become `param<index>`. Names that are already legal are
/// returned unchanged. Uniqueness within a parameter list is the caller's
/// concern, see [`NameRegistry`].
pub fn sanitize(name: &str, positional_index: usize) -> String {
    let name = name.trim();
    if name.is_empty() {
        return format!("param{positional_index}");
    }
    if is_legal(name) {
        return name.to_string();
    }

    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert_str(0, "param_");
    }
    if ident.chars().all(|c| c == '_') {
        return format!("param{positional_index}");
    }
    if !is_legal(&ident) {
        // Only keywords are left at this point
        ident.push('_');
    }
    ident
}

/// Whether `name` parses as a plain, non-keyword identifier
///
/// Raw identifiers (`r#type`) are not plain and get repaired by [`sanitize`].
pub fn is_legal(name: &str) -> bool {
    !name.starts_with("r#") && syn::parse_str::<syn::Ident>(name).is_ok()
}

/// Hands out identifiers that are unique within one scope
///
/// The first request for a name returns it verbatim, later requests get a
/// `_1`, `_2`, ... suffix.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashMap<String, usize>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a name without renaming it
    pub fn reserve(&mut self, name: &str) {
        self.used.entry(name.to_string()).or_insert(0);
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.used.contains_key(name)
    }

    pub fn unique(&mut self, base: &str) -> String {
        let Some(count) = self.used.get(base).copied() else {
            self.reserve(base);
            return base.to_string();
        };

        let mut next = count + 1;
        let candidate = loop {
            let candidate = format!("{base}_{next}");
            if !self.used.contains_key(&candidate) {
                break candidate;
            }
            next += 1;
        };
        self.used.insert(base.to_string(), next);
        self.reserve(&candidate);
        candidate
    }
}

/// `FUNC_<NAME>` constant binding a function's literal name
pub fn function_constant(name: &str) -> String {
    sanitize(&format!("FUNC_{}", name.to_uppercase()), 0)
}

/// `<NAME>_EVENT` static holding an event descriptor
pub fn event_constant(name: &str) -> String {
    sanitize(&format!("{}_EVENT", name.to_uppercase()), 0)
}

/// snake_case method name for an ABI function
pub fn method_name(name: &str) -> String {
    sanitize(&name.to_case(Case::Snake), 0)
}

/// PascalCase type name, e.g. for the contract struct
pub fn type_name(name: &str) -> String {
    sanitize(&name.to_case(Case::Pascal), 0)
}

/// Names of the items generated for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventNames {
    pub constant: String,
    pub topic_constant: String,
    pub response: String,
    pub extract_method: String,
    pub stream_method: String,
    pub range_stream_method: String,
}

impl EventNames {
    pub fn new(event: &str) -> Self {
        let snake = sanitize(&event.to_case(Case::Snake), 0);
        let constant = event_constant(event);
        Self {
            topic_constant: format!("{constant}_TOPIC"),
            constant,
            response: sanitize(&format!("{}EventResponse", event.to_case(Case::Pascal)), 0),
            extract_method: format!("get_{snake}_events"),
            stream_method: format!("{snake}_event_stream"),
            range_stream_method: format!("{snake}_event_stream_in_range"),
        }
    }
}
