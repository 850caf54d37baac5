//! Parameters for traditional (pre-quantum) schemes

pub mod ed25519;
