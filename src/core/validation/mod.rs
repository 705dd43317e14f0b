//! Validation and filtering system
//!
//! This module provides a declarative approach to validating and filtering
//! entity payloads before they reach the handlers. It integrates with the
//! entity macro system.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{ValidatableEntity, Validated};
