// Adapters layer: concrete implementations of domain ports.

pub mod generator;

pub use generator::CommandGenerator;
