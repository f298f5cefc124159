//! Domain-level error types.
//!
//! These errors are transport agnostic. They describe why a request failed for
//! a business reason; inbound adapters decide how that looks on the wire.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::Fault;

/// Request-specific diagnostic values attached to a [`DomainError`].
///
/// Keys keep their insertion order; values are expected to be JSON scalars.
pub type AdditionalData = Map<String, Value>;

/// Category of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorType {
    /// Should only ever occur due to a bug.
    Unexpected,
    /// The requested aggregate does not exist.
    NotFound,
    /// The request violates one or more invariants given the current state of
    /// the domain aggregates.
    Extrinsic,
    /// The request in itself violates one or more invariants, irrespective of
    /// the current state of the domain aggregates.
    Intrinsic,
}

impl DomainErrorType {
    /// Every variant, ordered by discriminant.
    pub const ALL: [Self; 4] = [
        Self::Unexpected,
        Self::NotFound,
        Self::Extrinsic,
        Self::Intrinsic,
    ];

    /// Type name reported when a raw discriminant is out of range.
    pub const TYPE_NAME: &'static str = "DomainErrorType";

    /// Numeric discriminant of the variant.
    #[must_use]
    pub const fn discriminant(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for DomainErrorType {
    type Error = Fault;

    /// Decode a raw discriminant, rejecting values outside the declared range.
    ///
    /// # Examples
    /// ```
    /// use problem_service::domain::{DomainErrorType, Fault};
    ///
    /// assert_eq!(DomainErrorType::try_from(1), Ok(DomainErrorType::NotFound));
    /// assert!(matches!(
    ///     DomainErrorType::try_from(7),
    ///     Err(Fault::InvalidEnumArgument { value: 7, .. })
    /// ));
    /// ```
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.discriminant() == value)
            .ok_or_else(|| Fault::invalid_enum_argument("domainErrorType", value, Self::TYPE_NAME))
    }
}

/// Business-rule failure returned by request logic as a value.
///
/// ## Invariants
/// - `title` must be non-empty once trimmed of whitespace.
/// - An absent `additional_data` is distinct from an empty one; the two only
///   collapse when the error is rendered.
///
/// # Examples
/// ```
/// use problem_service::domain::{DomainError, DomainErrorType};
///
/// let err = DomainError::not_found("Thing Missing", "No such thing.");
/// assert_eq!(err.kind(), DomainErrorType::NotFound);
/// assert!(err.additional_data().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    title: String,
    kind: DomainErrorType,
    description: String,
    additional_data: Option<AdditionalData>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainErrorValidationError {
    #[error("domain error title must not be empty")]
    EmptyTitle,
}

impl DomainError {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    /// Panics when `title` is blank. Use [`DomainError::try_new`] for titles
    /// that are not compile-time constants.
    pub fn new(
        kind: DomainErrorType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        match Self::try_new(kind, title, description) {
            Ok(value) => value,
            Err(err) => panic!("domain errors must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the title.
    pub fn try_new(
        kind: DomainErrorType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyTitle);
        }
        Ok(Self {
            title,
            kind,
            description: description.into(),
            additional_data: None,
        })
    }

    /// Short, stable title of the failure.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Failure category.
    pub fn kind(&self) -> DomainErrorType {
        self.kind
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Request-specific values, if any were attached.
    pub fn additional_data(&self) -> Option<&AdditionalData> {
        self.additional_data.as_ref()
    }

    /// Attach a single diagnostic value, creating the map on first use.
    ///
    /// # Examples
    /// ```
    /// use problem_service::domain::DomainError;
    ///
    /// let err = DomainError::intrinsic("Thing Unknown", "The specified thing is unknown.")
    ///     .with_additional_data("number", 12345);
    /// let data = err.additional_data().expect("data attached");
    /// assert_eq!(data.get("number"), Some(&serde_json::json!(12345)));
    /// ```
    #[must_use]
    pub fn with_additional_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_data
            .get_or_insert_with(AdditionalData::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the additional data wholesale.
    #[must_use]
    pub fn with_additional_data_map(mut self, data: AdditionalData) -> Self {
        self.additional_data = Some(data);
        self
    }

    /// Convenience constructor for [`DomainErrorType::Unexpected`].
    pub fn unexpected(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(DomainErrorType::Unexpected, title, description)
    }

    /// Convenience constructor for [`DomainErrorType::NotFound`].
    pub fn not_found(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(DomainErrorType::NotFound, title, description)
    }

    /// Convenience constructor for [`DomainErrorType::Extrinsic`].
    pub fn extrinsic(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(DomainErrorType::Extrinsic, title, description)
    }

    /// Convenience constructor for [`DomainErrorType::Intrinsic`].
    pub fn intrinsic(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(DomainErrorType::Intrinsic, title, description)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

impl std::error::Error for DomainError {}
