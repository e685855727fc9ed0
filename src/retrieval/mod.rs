//! Chunk selection and context assembly

pub mod context;

pub use context::ContextAssembler;
