//! Top-level facade crate for expvarprom.
//!
//! Re-exports the translation core and the exporter library so users can depend on a single crate.

pub mod core {
    pub use expvarprom_core::*;
}

pub mod exporter {
    pub use expvarprom_exporter::*;
}
