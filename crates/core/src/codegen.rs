//! Rust source generation from binding descriptions
//!
//! The generated module targets a runtime crate (see
//! [`BindgenConfig::runtime_path`]) that provides the contract handle,
//! wire types, transaction submission and log transport.

use crate::{
    compiler::{ContractBindings, NameConstant},
    config::BindgenConfig,
    error::{BindgenError, Result},
    event::{EventWrapperSpec, ValueSource, LOG_FIELD},
    function::{CallShape, FunctionWrapperSpec, NO_RETURN_VALUE_MESSAGE, VALUE_PARAM},
    native::NativeType,
    resolver::{ArrayContainer, TypeDescriptor, WireKind},
};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

/// Renders binding descriptions into Rust tokens
pub struct RustRenderer {
    rt: syn::Path,
    native_types: bool,
    emit_docs: bool,
}

impl RustRenderer {
    pub fn new(config: &BindgenConfig) -> Result<Self> {
        let rt = syn::parse_str::<syn::Path>(&config.runtime_path)
            .map_err(|_| BindgenError::InvalidRuntimePath(config.runtime_path.clone()))?;

        Ok(Self {
            rt,
            native_types: config.native_types,
            emit_docs: config.emit_docs,
        })
    }

    /// Renders a complete module
    pub fn render(&self, bindings: &ContractBindings) -> Result<TokenStream> {
        let rt = &self.rt;
        let contract = ident(&bindings.contract_name);
        let constants = bindings.name_constants.iter().map(render_name_constant);
        let event_items = bindings.events.iter().map(|e| self.render_event_items(e));
        let functions = bindings
            .functions
            .iter()
            .map(|f| self.render_function(f))
            .collect::<Result<Vec<_>>>()?;
        let event_methods = bindings.events.iter().map(|e| self.render_event_methods(e));
        let doc = self.doc(&format!("Typed bindings for the `{}` contract.", bindings.contract_name));

        Ok(quote! {
            #(#constants)*

            #(#event_items)*

            #doc
            #[derive(Debug, Clone)]
            pub struct #contract {
                contract: #rt::Contract,
            }

            #[allow(non_snake_case, clippy::too_many_arguments)]
            impl #contract {
                pub fn load(contract: #rt::Contract) -> Self {
                    Self { contract }
                }

                pub fn contract_address(&self) -> &str {
                    self.contract.address()
                }

                #(#functions)*

                #(#event_methods)*
            }
        })
    }

    /// Renders one wrapper method
    pub fn render_function(&self, spec: &FunctionWrapperSpec) -> Result<TokenStream> {
        let rt = &self.rt;
        let method = ident(&spec.method_name);
        let constant = ident(&spec.constant_name);

        let mut args: Vec<TokenStream> = spec
            .inputs
            .iter()
            .map(|input| {
                let name = ident(&input.name);
                let ty = self.caller_type(&input.wire, &input.native);
                quote!(#name: #ty)
            })
            .collect();
        if let Some(value) = &spec.value_param {
            let value = ident(value);
            args.push(quote!(#value: #rt::BigInt));
        }

        let doc = self.function_doc(spec);

        let inputs = spec.inputs.iter().map(|input| {
            let value = self.wire_value(&input.wire, &ident(&input.name));
            quote!(#rt::abi::Token::from(#value))
        });
        let outputs = spec.outputs.iter().map(|output| self.type_reference(&output.wire, false));

        let (ret, body) = match spec.shape {
            CallShape::ConstantVoid => {
                return Ok(quote! {
                    #doc
                    #[allow(unused_variables)]
                    pub fn #method(&self, #(#args),*) -> ::core::result::Result<(), #rt::ContractError> {
                        ::core::result::Result::Err(#rt::ContractError::NoReturnValue { function: #constant })
                    }
                });
            }
            CallShape::Transaction => (
                quote!(#rt::RemoteCall<#rt::TransactionReceipt>),
                quote!(self.contract.execute_remote_call_transaction(function)),
            ),
            CallShape::TransactionPayable => {
                let value = ident(spec.value_param.as_deref().unwrap_or(VALUE_PARAM));
                (
                    quote!(#rt::RemoteCall<#rt::TransactionReceipt>),
                    quote!(self.contract.execute_remote_call_transaction_with_value(function, #value)),
                )
            }
            CallShape::ConstantRawCollection => {
                let values = quote!(::std::vec::Vec<#rt::NativeValue>);
                (
                    quote!(#rt::RemoteCall<#values>),
                    quote!(self.contract.execute_remote_call_raw_list(function)),
                )
            }
            CallShape::ConstantSingle => {
                let output = spec.single_output()?;
                let wire = self.wire_type(&output.wire);
                let ty = self.caller_type(&output.wire, &output.native);
                (
                    quote!(#rt::RemoteCall<#ty>),
                    quote!(self.contract.execute_remote_call_single_value_return::<#wire, #ty>(function)),
                )
            }
            CallShape::ConstantTuple(_) => {
                let types: Vec<TokenStream> = spec
                    .outputs
                    .iter()
                    .map(|output| self.caller_type(&output.wire, &output.native))
                    .collect();
                let values = types.iter().enumerate().map(|(index, ty)| {
                    let index = Literal::usize_unsuffixed(index);
                    quote!(results.value::<#ty>(#index)?)
                });
                (
                    quote!(#rt::RemoteCall<(#(#types),*)>),
                    quote! {
                        self.contract.execute_remote_call_multiple_value_return(function, |results| {
                            ::core::result::Result::Ok((#(#values),*))
                        })
                    },
                )
            }
        };

        Ok(quote! {
            #doc
            pub fn #method(&self, #(#args),*) -> #ret {
                let function = #rt::abi::Function::new(#constant, vec![#(#inputs),*], vec![#(#outputs),*]);
                #body
            }
        })
    }

    /// Renders the module-level items of an event: its descriptor, topic and response record
    pub fn render_event_items(&self, spec: &EventWrapperSpec) -> TokenStream {
        let rt = &self.rt;
        let name = &spec.name;
        let constant = ident(&spec.names.constant);
        let topic_constant = ident(&spec.names.topic_constant);
        let topic = spec.topic_hex();
        let response = ident(&spec.names.response);
        let log = ident(LOG_FIELD);

        let references = spec.fields.iter().map(|f| self.type_reference(&f.wire, f.indexed));
        let record_fields = spec.response_fields().into_iter().map(|rf| {
            let field = ident(&rf.field.name);
            let ty = self.event_field_type(&rf.field.wire, rf.field.indexed, &rf.field.native);
            quote!(pub #field: #ty)
        });

        let descriptor_doc = self.doc(&format!("Descriptor of `{}`.", spec.signature));
        let topic_doc = self.doc(&format!("Topic of `{}`.", spec.signature));
        let response_doc = self.doc(&format!("Decoded `{}` log.", spec.name));

        quote! {
            #descriptor_doc
            pub static #constant: ::std::sync::LazyLock<#rt::abi::Event> = ::std::sync::LazyLock::new(|| {
                #rt::abi::Event::new(#name, vec![#(#references),*])
            });

            #topic_doc
            pub const #topic_constant: &str = #topic;

            #response_doc
            #[derive(Debug, Clone)]
            pub struct #response {
                pub #log: #rt::Log,
                #(#record_fields,)*
            }
        }
    }

    /// Renders the contract methods of an event: batch extraction and subscriptions
    pub fn render_event_methods(&self, spec: &EventWrapperSpec) -> TokenStream {
        let rt = &self.rt;
        let constant = ident(&spec.names.constant);
        let topic_constant = ident(&spec.names.topic_constant);
        let response = ident(&spec.names.response);
        let extract = ident(&spec.names.extract_method);
        let stream = ident(&spec.names.stream_method);
        let range_stream = ident(&spec.names.range_stream_method);
        let log = ident(LOG_FIELD);

        let values: Vec<TokenStream> = spec
            .response_fields()
            .into_iter()
            .map(|rf| {
                let field = ident(&rf.field.name);
                let ty = self.event_field_type(&rf.field.wire, rf.field.indexed, &rf.field.native);
                let (accessor, index) = match rf.source {
                    ValueSource::Indexed(index) => (format_ident!("indexed_value"), index),
                    ValueSource::NonIndexed(index) => (format_ident!("non_indexed_value"), index),
                };
                let index = Literal::usize_unsuffixed(index);
                quote!(#field: event_values.#accessor::<#ty>(#index)?)
            })
            .collect();

        let extract_doc = self.doc(&format!(
            "Decodes every `{}` log of an already fetched receipt, in log order.",
            spec.name
        ));
        let stream_doc = self.doc(&format!("Streams `{}` logs matching `filter`.", spec.name));
        let range_doc = self.doc(&format!(
            "Streams `{}` logs of this contract between two blocks.",
            spec.name
        ));

        quote! {
            #extract_doc
            pub fn #extract(
                &self,
                transaction_receipt: &#rt::TransactionReceipt,
            ) -> ::core::result::Result<::std::vec::Vec<#response>, #rt::ContractError> {
                let value_list = self.contract.extract_event_parameters_with_log(&#constant, transaction_receipt)?;
                let mut responses = ::std::vec::Vec::with_capacity(value_list.len());
                for event_values in value_list {
                    responses.push(#response {
                        #log: event_values.log().clone(),
                        #(#values,)*
                    });
                }
                ::core::result::Result::Ok(responses)
            }

            #stream_doc
            pub fn #stream(&self, filter: #rt::EthFilter) -> #rt::EventStream<#response> {
                self.contract.log_stream(filter, |#log: #rt::Log| {
                    let event_values = #rt::Contract::extract_event_parameters_from_log(&#constant, &#log)?;
                    ::core::result::Result::Ok(#response {
                        #(#values,)*
                        #log,
                    })
                })
            }

            #range_doc
            pub fn #range_stream(
                &self,
                start_block: #rt::BlockParameter,
                end_block: #rt::BlockParameter,
            ) -> #rt::EventStream<#response> {
                let mut filter = #rt::EthFilter::new(start_block, end_block, self.contract.address());
                filter.add_single_topic(#topic_constant);
                self.#stream(filter)
            }
        }
    }

    /// Runtime wire type, e.g. `rt::abi::DynamicArray<rt::abi::Uint256>`
    pub fn wire_type(&self, ty: &TypeDescriptor) -> TokenStream {
        let rt = &self.rt;
        match ty {
            TypeDescriptor::Primitive(kind) => {
                let name = ident(&kind.wire_name());
                quote!(#rt::abi::#name)
            }
            TypeDescriptor::FixedArray { element, length } => {
                let container = ident(&ArrayContainer::fixed(*length).wire_name());
                let element = self.wire_type(element);
                quote!(#rt::abi::#container<#element>)
            }
            TypeDescriptor::DynamicArray(element) => {
                let container = ident(&ArrayContainer::Dynamic.wire_name());
                let element = self.wire_type(element);
                quote!(#rt::abi::#container<#element>)
            }
        }
    }

    pub fn native_type(&self, ty: &NativeType) -> TokenStream {
        let rt = &self.rt;
        match ty {
            NativeType::Text => quote!(::std::string::String),
            NativeType::Bool => quote!(bool),
            NativeType::Integer => quote!(#rt::BigInt),
            NativeType::Bytes => quote!(::std::vec::Vec<u8>),
            NativeType::List(element) => {
                let element = self.native_type(element);
                quote!(::std::vec::Vec<#element>)
            }
        }
    }

    /// Type a caller passes or receives, depending on `native_types`
    fn caller_type(&self, wire: &TypeDescriptor, native: &NativeType) -> TokenStream {
        if self.native_types {
            self.native_type(native)
        } else {
            self.wire_type(wire)
        }
    }

    /// Indexed dynamic fields only carry the 32-byte topic digest
    fn event_field_type(&self, wire: &TypeDescriptor, indexed: bool, native: &NativeType) -> TokenStream {
        if !self.native_types && indexed && wire.is_dynamic() {
            self.wire_type(&TypeDescriptor::Primitive(WireKind::FixedBytes(32)))
        } else {
            self.caller_type(wire, native)
        }
    }

    /// Expression converting a caller's argument into its wire value
    fn wire_value(&self, ty: &TypeDescriptor, arg: &Ident) -> TokenStream {
        if !self.native_types {
            return quote!(#arg);
        }
        let wire = self.wire_type(ty);
        match ty.container() {
            Some(ArrayContainer::Bounded(length)) => {
                let length = Literal::usize_unsuffixed(length);
                quote!(<#wire>::bounded(#length, #arg))
            }
            _ => quote!(<#wire>::from(#arg)),
        }
    }

    fn type_reference(&self, ty: &TypeDescriptor, indexed: bool) -> TokenStream {
        let rt = &self.rt;
        let wire = self.wire_type(ty);
        match ty.container() {
            Some(ArrayContainer::Bounded(length)) => {
                let length = Literal::usize_unsuffixed(length);
                quote!(#rt::abi::TypeReference::bounded::<#wire>(#length, #indexed))
            }
            _ => quote!(#rt::abi::TypeReference::new::<#wire>(#indexed)),
        }
    }

    fn function_doc(&self, spec: &FunctionWrapperSpec) -> TokenStream {
        let action = match spec.shape {
            CallShape::Transaction | CallShape::TransactionPayable => "Submits a transaction calling",
            CallShape::ConstantVoid => {
                return self.doc(&format!(
                    "`{}` has no outputs; always fails ({}).",
                    spec.signature, NO_RETURN_VALUE_MESSAGE
                ));
            }
            CallShape::ConstantSingle
            | CallShape::ConstantRawCollection
            | CallShape::ConstantTuple(_) => "Calls",
        };
        self.doc(&format!(
            "{} `{}` (selector `{}`).",
            action,
            spec.signature,
            spec.selector_hex()
        ))
    }

    fn doc(&self, text: &str) -> TokenStream {
        if self.emit_docs {
            let text = format!(" {text}");
            quote!(#[doc = #text])
        } else {
            TokenStream::new()
        }
    }
}

fn render_name_constant(constant: &NameConstant) -> TokenStream {
    let name = ident(&constant.name);
    let value = &constant.value;
    quote!(pub const #name: &str = #value;)
}

fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

/// Renders bindings into formatted-for-parsing Rust source
///
/// The tokens are parsed back with `syn` so that a malformed module is
/// reported here rather than by the consumer's compiler.
pub fn render_source(bindings: &ContractBindings, config: &BindgenConfig) -> Result<String> {
    let tokens = RustRenderer::new(config)?.render(bindings)?;
    let file: syn::File = syn::parse2(tokens)
        .map_err(|e| BindgenError::Render(format!("generated code does not parse: {e}")))?;

    Ok(quote!(#file).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abi::{AbiEntry, AbiParameter, StateMutability},
        compiler::compile,
        event,
        function::FunctionSynthesizer,
        reporter::CollectingReporter,
    };

    fn renderer(native_types: bool) -> RustRenderer {
        let config = BindgenConfig::builder()
            .native_types(native_types)
            .emit_docs(false)
            .build()
            .unwrap();
        RustRenderer::new(&config).unwrap()
    }

    fn function_spec(
        mutability: StateMutability,
        inputs: &[(&str, &str)],
        outputs: &[(&str, &str)],
    ) -> FunctionWrapperSpec {
        let params = |list: &[(&str, &str)]| {
            list.iter().map(|(name, ty)| AbiParameter::new(*name, *ty)).collect()
        };
        let entry = AbiEntry::function("functionName", params(inputs), params(outputs), mutability);
        let reporter = CollectingReporter::new();
        FunctionSynthesizer::new(&reporter).synthesize(&entry).unwrap()
    }

    fn assert_tokens(actual: TokenStream, expected: TokenStream) {
        assert_eq!(actual.to_string(), expected.to_string());
    }

    #[test]
    fn test_wire_types() {
        let r = renderer(true);
        let ty = |s: &str| r.wire_type(&crate::resolver::resolve(s).unwrap());

        assert_tokens(ty("uint256"), quote!(::contract_runtime::abi::Uint256));
        assert_tokens(
            ty("uint256[10][3]"),
            quote!(::contract_runtime::abi::StaticArray3<::contract_runtime::abi::StaticArray10<::contract_runtime::abi::Uint256> >),
        );
        assert_tokens(
            ty("uint256[33]"),
            quote!(::contract_runtime::abi::StaticArray<::contract_runtime::abi::Uint256>),
        );
        assert_tokens(
            ty("address[]"),
            quote!(::contract_runtime::abi::DynamicArray<::contract_runtime::abi::Address>),
        );
    }

    #[test]
    fn test_native_types() {
        let r = renderer(true);
        assert_tokens(
            r.native_type(&NativeType::List(Box::new(NativeType::Text))),
            quote!(::std::vec::Vec<::std::string::String>),
        );
        assert_tokens(r.native_type(&NativeType::Integer), quote!(::contract_runtime::BigInt));
    }

    #[test]
    fn test_render_transaction() {
        let spec = function_spec(StateMutability::Normal, &[("param", "uint8")], &[]);
        assert_tokens(
            renderer(true).render_function(&spec).unwrap(),
            quote! {
                pub fn function_name(&self, param: ::contract_runtime::BigInt)
                    -> ::contract_runtime::RemoteCall<::contract_runtime::TransactionReceipt> {
                    let function = ::contract_runtime::abi::Function::new(
                        FUNC_FUNCTIONNAME,
                        vec![::contract_runtime::abi::Token::from(<::contract_runtime::abi::Uint8>::from(param))],
                        vec![]
                    );
                    self.contract.execute_remote_call_transaction(function)
                }
            },
        );
    }

    #[test]
    fn test_render_payable_transaction() {
        let spec = function_spec(StateMutability::Payable, &[("param", "uint8")], &[]);
        assert_tokens(
            renderer(true).render_function(&spec).unwrap(),
            quote! {
                pub fn function_name(&self, param: ::contract_runtime::BigInt, wei_value: ::contract_runtime::BigInt)
                    -> ::contract_runtime::RemoteCall<::contract_runtime::TransactionReceipt> {
                    let function = ::contract_runtime::abi::Function::new(
                        FUNC_FUNCTIONNAME,
                        vec![::contract_runtime::abi::Token::from(<::contract_runtime::abi::Uint8>::from(param))],
                        vec![]
                    );
                    self.contract.execute_remote_call_transaction_with_value(function, wei_value)
                }
            },
        );
    }

    #[test]
    fn test_render_constant_single() {
        let spec = function_spec(StateMutability::View, &[("param", "uint8")], &[("result", "int8")]);
        assert_tokens(
            renderer(true).render_function(&spec).unwrap(),
            quote! {
                pub fn function_name(&self, param: ::contract_runtime::BigInt)
                    -> ::contract_runtime::RemoteCall<::contract_runtime::BigInt> {
                    let function = ::contract_runtime::abi::Function::new(
                        FUNC_FUNCTIONNAME,
                        vec![::contract_runtime::abi::Token::from(<::contract_runtime::abi::Uint8>::from(param))],
                        vec![::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Int8>(false)]
                    );
                    self.contract.execute_remote_call_single_value_return::<::contract_runtime::abi::Int8, ::contract_runtime::BigInt>(function)
                }
            },
        );
    }

    #[test]
    fn test_render_constant_raw_collection() {
        let spec = function_spec(StateMutability::View, &[("param", "uint8[]")], &[("result", "address[]")]);
        assert_tokens(
            renderer(true).render_function(&spec).unwrap(),
            quote! {
                pub fn function_name(&self, param: ::std::vec::Vec<::contract_runtime::BigInt>)
                    -> ::contract_runtime::RemoteCall<::std::vec::Vec<::contract_runtime::NativeValue> > {
                    let function = ::contract_runtime::abi::Function::new(
                        FUNC_FUNCTIONNAME,
                        vec![::contract_runtime::abi::Token::from(
                            <::contract_runtime::abi::DynamicArray<::contract_runtime::abi::Uint8> >::from(param)
                        )],
                        vec![::contract_runtime::abi::TypeReference::new::<
                            ::contract_runtime::abi::DynamicArray<::contract_runtime::abi::Address>
                        >(false)]
                    );
                    self.contract.execute_remote_call_raw_list(function)
                }
            },
        );
    }

    #[test]
    fn test_render_constant_void_always_fails() {
        let spec = function_spec(StateMutability::View, &[("param", "uint8")], &[]);
        assert_tokens(
            renderer(true).render_function(&spec).unwrap(),
            quote! {
                #[allow(unused_variables)]
                pub fn function_name(&self, param: ::contract_runtime::BigInt)
                    -> ::core::result::Result<(), ::contract_runtime::ContractError> {
                    ::core::result::Result::Err(::contract_runtime::ContractError::NoReturnValue { function: FUNC_FUNCTIONNAME })
                }
            },
        );
    }

    #[test]
    fn test_render_constant_tuple() {
        let spec = function_spec(
            StateMutability::View,
            &[("param1", "uint8"), ("param2", "uint32")],
            &[("result1", "int8"), ("result2", "int32")],
        );
        assert_tokens(
            renderer(true).render_function(&spec).unwrap(),
            quote! {
                pub fn function_name(&self, param1: ::contract_runtime::BigInt, param2: ::contract_runtime::BigInt)
                    -> ::contract_runtime::RemoteCall<(::contract_runtime::BigInt, ::contract_runtime::BigInt)> {
                    let function = ::contract_runtime::abi::Function::new(
                        FUNC_FUNCTIONNAME,
                        vec![
                            ::contract_runtime::abi::Token::from(<::contract_runtime::abi::Uint8>::from(param1)),
                            ::contract_runtime::abi::Token::from(<::contract_runtime::abi::Uint32>::from(param2))
                        ],
                        vec![
                            ::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Int8>(false),
                            ::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Int32>(false)
                        ]
                    );
                    self.contract.execute_remote_call_multiple_value_return(function, |results| {
                        ::core::result::Result::Ok((
                            results.value::<::contract_runtime::BigInt>(0)?,
                            results.value::<::contract_runtime::BigInt>(1)?
                        ))
                    })
                }
            },
        );
    }

    #[test]
    fn test_render_bounded_array_argument() {
        let spec = function_spec(StateMutability::Normal, &[("values", "uint256[33]")], &[]);
        let rendered = renderer(true).render_function(&spec).unwrap().to_string();
        let expected = quote!(<::contract_runtime::abi::StaticArray<::contract_runtime::abi::Uint256> >::bounded(33, values));
        assert!(rendered.contains(&expected.to_string()), "{rendered}");
    }

    #[test]
    fn test_render_wire_types_mode() {
        let spec = function_spec(StateMutability::View, &[("param", "uint8")], &[("result", "address[]")]);
        assert_tokens(
            renderer(false).render_function(&spec).unwrap(),
            quote! {
                pub fn function_name(&self, param: ::contract_runtime::abi::Uint8)
                    -> ::contract_runtime::RemoteCall<::std::vec::Vec<::contract_runtime::NativeValue> > {
                    let function = ::contract_runtime::abi::Function::new(
                        FUNC_FUNCTIONNAME,
                        vec![::contract_runtime::abi::Token::from(param)],
                        vec![::contract_runtime::abi::TypeReference::new::<
                            ::contract_runtime::abi::DynamicArray<::contract_runtime::abi::Address>
                        >(false)]
                    );
                    self.contract.execute_remote_call_raw_list(function)
                }
            },
        );
    }

    #[test]
    fn test_render_wire_types_mode_single() {
        let spec = function_spec(StateMutability::View, &[], &[("result", "address")]);
        let rendered = renderer(false).render_function(&spec).unwrap().to_string();
        let expected = quote! {
            self.contract.execute_remote_call_single_value_return::<
                ::contract_runtime::abi::Address,
                ::contract_runtime::abi::Address
            >(function)
        };
        assert!(rendered.contains(&expected.to_string()), "{rendered}");
    }

    #[test]
    fn test_single_shape_without_output_is_an_error() {
        let mut spec = function_spec(StateMutability::View, &[], &[("result", "int8")]);
        spec.outputs.clear();
        assert!(matches!(
            renderer(true).render_function(&spec),
            Err(BindgenError::Render(_))
        ));
    }

    fn transfer_event() -> EventWrapperSpec {
        let entry = AbiEntry::event(
            "Transfer",
            vec![
                AbiParameter::indexed("id", "string"),
                AbiParameter::indexed("from", "address"),
                AbiParameter::indexed("to", "address"),
                AbiParameter::new("value", "uint256"),
                AbiParameter::new("message", "string"),
            ],
        );
        event::synthesize(&entry).unwrap()
    }

    #[test]
    fn test_render_event_items() {
        let spec = transfer_event();
        let topic = spec.topic_hex();
        assert_tokens(
            renderer(true).render_event_items(&spec),
            quote! {
                pub static TRANSFER_EVENT: ::std::sync::LazyLock<::contract_runtime::abi::Event> = ::std::sync::LazyLock::new(|| {
                    ::contract_runtime::abi::Event::new("Transfer", vec![
                        ::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Utf8String>(true),
                        ::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Address>(true),
                        ::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Address>(true),
                        ::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Uint256>(false),
                        ::contract_runtime::abi::TypeReference::new::<::contract_runtime::abi::Utf8String>(false)
                    ])
                });

                pub const TRANSFER_EVENT_TOPIC: &str = #topic;

                #[derive(Debug, Clone)]
                pub struct TransferEventResponse {
                    pub log: ::contract_runtime::Log,
                    pub id: ::std::vec::Vec<u8>,
                    pub from: ::std::string::String,
                    pub to: ::std::string::String,
                    pub value: ::contract_runtime::BigInt,
                    pub message: ::std::string::String,
                }
            },
        );
    }

    #[test]
    fn test_render_event_methods() {
        let spec = transfer_event();
        assert_tokens(
            renderer(true).render_event_methods(&spec),
            quote! {
                pub fn get_transfer_events(
                    &self,
                    transaction_receipt: &::contract_runtime::TransactionReceipt,
                ) -> ::core::result::Result<::std::vec::Vec<TransferEventResponse>, ::contract_runtime::ContractError> {
                    let value_list = self.contract.extract_event_parameters_with_log(&TRANSFER_EVENT, transaction_receipt)?;
                    let mut responses = ::std::vec::Vec::with_capacity(value_list.len());
                    for event_values in value_list {
                        responses.push(TransferEventResponse {
                            log: event_values.log().clone(),
                            id: event_values.indexed_value::<::std::vec::Vec<u8> >(0)?,
                            from: event_values.indexed_value::<::std::string::String>(1)?,
                            to: event_values.indexed_value::<::std::string::String>(2)?,
                            value: event_values.non_indexed_value::<::contract_runtime::BigInt>(0)?,
                            message: event_values.non_indexed_value::<::std::string::String>(1)?,
                        });
                    }
                    ::core::result::Result::Ok(responses)
                }

                pub fn transfer_event_stream(&self, filter: ::contract_runtime::EthFilter)
                    -> ::contract_runtime::EventStream<TransferEventResponse> {
                    self.contract.log_stream(filter, |log: ::contract_runtime::Log| {
                        let event_values = ::contract_runtime::Contract::extract_event_parameters_from_log(&TRANSFER_EVENT, &log)?;
                        ::core::result::Result::Ok(TransferEventResponse {
                            id: event_values.indexed_value::<::std::vec::Vec<u8> >(0)?,
                            from: event_values.indexed_value::<::std::string::String>(1)?,
                            to: event_values.indexed_value::<::std::string::String>(2)?,
                            value: event_values.non_indexed_value::<::contract_runtime::BigInt>(0)?,
                            message: event_values.non_indexed_value::<::std::string::String>(1)?,
                            log,
                        })
                    })
                }

                pub fn transfer_event_stream_in_range(
                    &self,
                    start_block: ::contract_runtime::BlockParameter,
                    end_block: ::contract_runtime::BlockParameter,
                ) -> ::contract_runtime::EventStream<TransferEventResponse> {
                    let mut filter = ::contract_runtime::EthFilter::new(start_block, end_block, self.contract.address());
                    filter.add_single_topic(TRANSFER_EVENT_TOPIC);
                    self.transfer_event_stream(filter)
                }
            },
        );
    }

    #[test]
    fn test_wire_mode_indexed_dynamic_field_is_topic_word() {
        let spec = transfer_event();
        let rendered = renderer(false).render_event_items(&spec).to_string();
        let expected = quote!(pub id: ::contract_runtime::abi::Bytes32);
        assert!(rendered.contains(&expected.to_string()), "{rendered}");
    }

    #[test]
    fn test_render_source_parses() {
        let entries = vec![
            AbiEntry::function(
                "transfer",
                vec![AbiParameter::new("to", "address"), AbiParameter::new("value", "uint256")],
                vec![AbiParameter::new("", "bool")],
                StateMutability::Normal,
            ),
            AbiEntry::function(
                "getReserves",
                vec![],
                vec![AbiParameter::new("", "uint112"), AbiParameter::new("", "uint112")],
                StateMutability::View,
            ),
            AbiEntry::event("Transfer", vec![AbiParameter::indexed("from", "address")]),
        ];
        let config = BindgenConfig::builder().contract_name("Token").build().unwrap();
        let reporter = CollectingReporter::new();
        let bindings = compile(&entries, &config, &reporter).unwrap();

        let source = render_source(&bindings, &config).unwrap();
        let file = syn::parse_file(&source).unwrap();

        let names: Vec<String> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Const(c) => Some(c.ident.to_string()),
                syn::Item::Static(s) => Some(s.ident.to_string()),
                syn::Item::Struct(s) => Some(s.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "FUNC_TRANSFER",
                "FUNC_GETRESERVES",
                "TRANSFER_EVENT",
                "TRANSFER_EVENT_TOPIC",
                "TransferEventResponse",
                "Token",
            ]
        );
        assert!(source.contains("0xa9059cbb"));
    }

    #[test]
    fn test_raw_identifier_names_are_repaired() {
        let entries = vec![AbiEntry::function(
            "r#type",
            vec![AbiParameter::new("r#type", "uint8"), AbiParameter::new("self", "bool")],
            vec![],
            StateMutability::Normal,
        )];
        let config = BindgenConfig::builder().contract_name("Token").build().unwrap();
        let reporter = CollectingReporter::new();
        let bindings = compile(&entries, &config, &reporter).unwrap();

        let source = render_source(&bindings, &config).unwrap();
        assert!(source.contains("r_type"), "{source}");
        assert!(!source.contains("r#type :"), "{source}");
    }

    #[test]
    fn test_invalid_runtime_path() {
        let config = BindgenConfig { runtime_path: "not a path".into(), ..Default::default() };
        assert!(matches!(
            RustRenderer::new(&config),
            Err(BindgenError::InvalidRuntimePath(_))
        ));
    }
}
