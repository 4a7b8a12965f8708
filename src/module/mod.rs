//! Module level bookkeeping shared by the emitter passes.

pub mod types;

pub use self::types::{StructType, TypeError, TypeRef, TypeRegistry};
