//! Storage for the fake order API

pub mod in_memory;

pub use in_memory::{InMemoryOrderStore, OrderDocument};
