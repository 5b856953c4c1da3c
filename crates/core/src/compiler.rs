//! Single-pass translation of an ABI into binding descriptions

use crate::{
    abi::{AbiEntry, EntryKind},
    config::BindgenConfig,
    error::Result,
    event::{self, EventWrapperSpec},
    function::{FunctionSynthesizer, FunctionWrapperSpec},
    ident::{self, NameRegistry},
    reporter::Reporter,
};
use std::collections::HashMap;

/// Methods every generated contract type has
pub const RESERVED_METHODS: [&str; 2] = ["load", "contract_address"];

/// A `const` binding a function's literal ABI name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConstant {
    pub name: String,
    pub value: String,
}

/// Binding descriptions for a whole contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractBindings {
    /// Name of the generated contract type
    pub contract_name: String,
    pub name_constants: Vec<NameConstant>,
    pub functions: Vec<FunctionWrapperSpec>,
    pub events: Vec<EventWrapperSpec>,
}

/// Translates every function and event entry of an ABI
///
/// Entries are translated independently; only generated names are shared.
/// Overloaded functions share one name constant and get suffixed method
/// names. Distinct names that uppercase alike get suffixed constants.
pub fn compile(
    entries: &[AbiEntry],
    config: &BindgenConfig,
    reporter: &dyn Reporter,
) -> Result<ContractBindings> {
    let synthesizer = FunctionSynthesizer::new(reporter);

    let mut methods = NameRegistry::new();
    RESERVED_METHODS.iter().for_each(|name| methods.reserve(name));
    let mut items = NameRegistry::new();
    // Literal function name to its constant; overloads share one
    let mut constants: HashMap<String, String> = HashMap::new();

    let mut bindings = ContractBindings {
        contract_name: ident::type_name(&config.contract_name),
        name_constants: Vec::new(),
        functions: Vec::new(),
        events: Vec::new(),
    };
    items.reserve(&bindings.contract_name);

    for entry in entries {
        match entry.kind {
            EntryKind::Function => {
                let mut spec = synthesizer
                    .synthesize(entry)
                    .map_err(|e| e.in_entry(&entry.name))?;

                spec.method_name = methods.unique(&spec.method_name);
                spec.constant_name = match constants.get(&spec.name) {
                    Some(constant) => constant.clone(),
                    None => {
                        let constant = items.unique(&spec.constant_name);
                        constants.insert(spec.name.clone(), constant.clone());
                        bindings.name_constants.push(NameConstant {
                            name: constant.clone(),
                            value: spec.name.clone(),
                        });
                        constant
                    }
                };
                bindings.functions.push(spec);
            }
            EntryKind::Event if config.generate_events => {
                let mut spec = event::synthesize(entry).map_err(|e| e.in_entry(&entry.name))?;

                let names = &mut spec.names;
                names.constant = items.unique(&names.constant);
                names.topic_constant = items.unique(&names.topic_constant);
                names.response = items.unique(&names.response);
                names.extract_method = methods.unique(&names.extract_method);
                names.stream_method = methods.unique(&names.stream_method);
                names.range_stream_method = methods.unique(&names.range_stream_method);
                bindings.events.push(spec);
            }
            kind => {
                tracing::debug!("Skipping {:?} entry `{}`", kind, entry.name);
            }
        }
    }

    tracing::info!(
        "Compiled {}: {} functions, {} events",
        bindings.contract_name,
        bindings.functions.len(),
        bindings.events.len()
    );

    Ok(bindings)
}
