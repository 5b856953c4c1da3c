//! Synthesis of wrapper method descriptions for ABI functions

use crate::{
    abi::{AbiEntry, AbiParameter, StateMutability},
    error::{BindgenError, Result},
    ident::{self, NameRegistry},
    native::{self, NativeType},
    reporter::Reporter,
    resolver::{self, TypeDescriptor},
    utils,
};

/// Name of the implicit trailing parameter of payable wrappers
pub const VALUE_PARAM: &str = "wei_value";

/// Message carried by the error every void read-only wrapper returns
pub const NO_RETURN_VALUE_MESSAGE: &str = "cannot call constant function with void return type";

/// How a generated wrapper talks to the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// State-changing call returning a transaction receipt
    Transaction,
    /// Like `Transaction`, with a trailing value-transfer parameter
    TransactionPayable,
    /// Read-only call without outputs; always fails when invoked
    ConstantVoid,
    ConstantSingle,
    /// Read-only call with one array output, decoded into untyped values
    ConstantRawCollection,
    ConstantTuple(usize),
}

impl CallShape {
    pub fn select(mutability: StateMutability, outputs: &[TypeDescriptor]) -> Self {
        match outputs {
            _ if mutability == StateMutability::Payable => CallShape::TransactionPayable,
            _ if !mutability.is_read_only() => CallShape::Transaction,
            [] => CallShape::ConstantVoid,
            [single] if single.is_array() => CallShape::ConstantRawCollection,
            [_] => CallShape::ConstantSingle,
            many => CallShape::ConstantTuple(many.len()),
        }
    }

    pub fn is_transaction(self) -> bool {
        matches!(self, CallShape::Transaction | CallShape::TransactionPayable)
    }
}

/// Declared return of a wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    TransactionReceipt,
    /// Nothing is returned; invocation fails with `NoReturnValue`
    NoReturnValue,
    Native(NativeType),
    /// Ordered sequence of decoded but untyped values
    RawList,
    Tuple(Vec<NativeType>),
}

/// One declared input of a wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperParam {
    pub name: String,
    pub wire: TypeDescriptor,
    pub native: NativeType,
}

/// One declared output of a wrapped function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperOutput {
    pub wire: TypeDescriptor,
    pub native: NativeType,
}

/// Everything needed to emit one function wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionWrapperSpec {
    /// Function name as declared in the ABI
    pub name: String,
    pub method_name: String,
    /// Constant bound to the literal function name
    pub constant_name: String,
    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub signature: String,
    pub selector: [u8; 4],
    pub mutability: StateMutability,
    pub inputs: Vec<WrapperParam>,
    pub outputs: Vec<WrapperOutput>,
    pub shape: CallShape,
    /// Name of the trailing value-transfer parameter, payable wrappers only.
    /// Its native type is always [`NativeType::Integer`].
    pub value_param: Option<String>,
}

impl FunctionWrapperSpec {
    pub fn return_type(&self) -> Result<ReturnType> {
        Ok(match self.shape {
            CallShape::Transaction | CallShape::TransactionPayable => {
                ReturnType::TransactionReceipt
            }
            CallShape::ConstantVoid => ReturnType::NoReturnValue,
            CallShape::ConstantSingle => ReturnType::Native(self.single_output()?.native.clone()),
            CallShape::ConstantRawCollection => ReturnType::RawList,
            CallShape::ConstantTuple(_) => {
                ReturnType::Tuple(self.outputs.iter().map(|o| o.native.clone()).collect())
            }
        })
    }

    /// The only output of a single-value wrapper
    pub fn single_output(&self) -> Result<&WrapperOutput> {
        match self.outputs.as_slice() {
            [output] => Ok(output),
            outputs => Err(BindgenError::Render(format!(
                "`{}` has {} outputs but a single-value call shape",
                self.signature,
                outputs.len()
            ))),
        }
    }

    pub fn selector_hex(&self) -> String {
        utils::to_hex(&self.selector)
    }
}

/// Builds [`FunctionWrapperSpec`]s, reporting mutability/return mismatches
pub struct FunctionSynthesizer<'r> {
    reporter: &'r dyn Reporter,
}

impl<'r> FunctionSynthesizer<'r> {
    pub fn new(reporter: &'r dyn Reporter) -> Self {
        Self { reporter }
    }

    pub fn synthesize(&self, entry: &AbiEntry) -> Result<FunctionWrapperSpec> {
        let inputs = synthesize_params(&entry.inputs)?;
        let outputs = entry
            .outputs
            .iter()
            .map(|output| {
                let wire = resolver::resolve(&output.declared_type)?;
                let native = native::project(&wire)?;
                Ok(WrapperOutput { wire, native })
            })
            .collect::<Result<Vec<_>>>()?;

        if !outputs.is_empty() && !entry.state_mutability.is_read_only() {
            self.reporter.report(&format!(
                "Definition of the function {} returns a value but is not defined as a view function. \
                 Please ensure it contains the view modifier if you want to read the return value",
                entry.name
            ));
        }

        let output_types: Vec<TypeDescriptor> = outputs.iter().map(|o| o.wire.clone()).collect();
        let shape = CallShape::select(entry.state_mutability, &output_types);

        let value_param = (shape == CallShape::TransactionPayable).then(|| {
            let mut names = NameRegistry::new();
            inputs.iter().for_each(|input| names.reserve(&input.name));
            names.unique(VALUE_PARAM)
        });

        let signature = canonical_signature(&entry.name, inputs.iter().map(|input| &input.wire));

        tracing::debug!("Synthesized {} as {:?}", signature, shape);

        Ok(FunctionWrapperSpec {
            method_name: ident::method_name(&entry.name),
            constant_name: ident::function_constant(&entry.name),
            selector: utils::selector(&signature),
            signature,
            name: entry.name.clone(),
            mutability: entry.state_mutability,
            inputs,
            outputs,
            shape,
            value_param,
        })
    }
}

/// Resolves, projects and names a parameter list, keeping names distinct
fn synthesize_params(params: &[AbiParameter]) -> Result<Vec<WrapperParam>> {
    let mut names = NameRegistry::new();
    params
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let wire = resolver::resolve(&param.declared_type)?;
            let native = native::project(&wire)?;
            let name = names.unique(&ident::sanitize(&param.name, index));
            Ok(WrapperParam { name, wire, native })
        })
        .collect()
}

/// `name(type1,type2,...)` using canonical type spellings
pub fn canonical_signature<'a>(
    name: &str,
    types: impl IntoIterator<Item = &'a TypeDescriptor>,
) -> String {
    let types: Vec<String> = types.into_iter().map(ToString::to_string).collect();
    format!("{}({})", name, types.join(","))
}
