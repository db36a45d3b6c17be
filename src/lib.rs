//! Field-level conversion between Discord's JSON wire format and typed
//! entities.
//!
//! The [`fields`] module is the framework: small `const` descriptors that
//! parse one field out of a wire map, put it back, or validate caller input
//! for it, plus a registry for references resolved at runtime. The
//! [`types`] module holds snowflake IDs, preinstanced enums, the shared
//! coercion helpers and, with the `models` feature, the entity models built
//! on the framework.
//!
//! Transport, gateway handling and caching are left to other crates.

pub mod fields;
pub mod types;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
