//! Domain primitives and use cases.
//!
//! Purpose: describe request failures without any transport concerns. Business
//! outcomes are values ([`DomainError`]); unexpected failures are [`Fault`]s
//! that callers propagate unchanged.
//!
//! Public surface:
//! - DomainError / DomainErrorType — business failure and its category.
//! - Fault — closed set of fault categories handled by the HTTP interceptors.
//! - ThingMode / Thing / ThingQueryService — the simulated thing lookup.

pub mod error;
pub mod fault;
pub mod ports;
pub mod things;

pub use self::error::{AdditionalData, DomainError, DomainErrorType, DomainErrorValidationError};
pub use self::fault::Fault;
pub use self::things::{
    DEFAULT_WORK_DELAY, Thing, ThingMode, ThingQueryService, UNKNOWN_THING_NUMBER,
};
