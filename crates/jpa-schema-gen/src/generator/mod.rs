//! Property assembly and scoped invocation of the external generator.

mod invoker;
mod process;
pub mod properties;

pub use invoker::{active_context, invoke, ContextGuard, GeneratorError, SchemaGenerator};
pub use process::ProcessGenerator;
pub use properties::{assemble, GenerationProperties};
