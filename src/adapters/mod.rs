// Adapters layer: concrete implementations for external systems (documents, datasets).

pub mod dataset;
pub mod memory;
