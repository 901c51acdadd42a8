// shopfront/src/pipeline/mod.rs

//! Defines the `Pipeline<TData, Err>` struct, its handler hooks and its execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Pipeline;
