//! Built-in response catalogue.
//!
//! `builtin.rs` lists the two layers in registry order, `helpers.rs` holds the
//! small context-driven pieces shared by computed replies, and
//! `calculator.rs` is the arithmetic evaluator behind `calculate`.

pub mod builtin;
pub mod calculator;
pub mod helpers;

#[cfg(test)]
mod tests;

use crate::engine::{Layer, Registry, RegistryError};

/// Base layer + built-in supplemental layer.
pub fn registry() -> Result<Registry, RegistryError> {
    Ok(Registry::new(Layer::from_entries(builtin::base())?, Layer::from_entries(builtin::supplemental())?))
}
