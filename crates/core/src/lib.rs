//! Typed Rust bindings from Ethereum contract ABIs
pub mod abi;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod event;
pub mod function;
pub mod ident;
pub mod native;
pub mod reporter;
pub mod resolver;
mod utils;
pub mod writer;

pub use abi::{parse_abi, AbiEntry, AbiParameter, EntryKind, StateMutability};
pub use compiler::{compile, ContractBindings, NameConstant};
pub use config::{BindgenConfig, BindgenConfigBuilder, OutputConfig};
pub use error::{BindgenError, Result};
pub use event::{EventDescriptor, EventWrapperSpec};
pub use function::{CallShape, FunctionSynthesizer, FunctionWrapperSpec, ReturnType};
pub use native::NativeType;
pub use reporter::{CollectingReporter, Reporter, TracingReporter};
pub use resolver::{resolve, TypeDescriptor, WireKind, MAX_ARRAY_DEPTH, MAX_SMALL_STATIC_ARRAY};
pub use writer::{generate, save_bindings, BindingsManifest, GeneratedBindings, SavedBindings};
