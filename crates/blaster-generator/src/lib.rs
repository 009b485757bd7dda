//! Short code generators.
//!
//! [`HashGenerator`] derives a deterministic 8-character base58 code from a
//! long URL and the id of the user shortening it.

pub mod hash;

pub use blaster_core::Generator;
pub use hash::HashGenerator;
