//! Trait seams between the gateway and its collaborators

pub mod engine;
pub mod loader;

pub use engine::Engine;
pub use loader::ArtifactLoader;
