//! Faults: unexpected failures that escape request logic.
//!
//! Unlike [`crate::domain::DomainError`], a fault is not a business outcome.
//! Request logic propagates faults unmodified with `?`; the HTTP adapter's
//! interceptor chain turns every fault into a problem response. The set of
//! categories is closed so the chain can match on it exhaustively.

use thiserror::Error;

/// Closed set of fault categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// The transport rejected the request syntax (missing or unparsable
    /// parameters, malformed query string).
    #[error("{message}")]
    BadHttpRequest {
        /// Transport diagnostic.
        message: String,
    },
    /// An enum-valued input fell outside its declared range.
    #[error("The value of argument '{argument}' ({value}) is invalid for Enum type '{enum_name}'.")]
    InvalidEnumArgument {
        /// Name of the offending argument.
        argument: String,
        /// Raw discriminant that failed to decode.
        value: i64,
        /// Name of the enum the value was decoded against.
        enum_name: &'static str,
    },
    /// A storage update failed; the message carries the driver diagnostic.
    #[error("{message}")]
    StorageUpdate {
        /// Driver diagnostic.
        message: String,
    },
    /// Any other runtime failure, tagged with its type name.
    #[error("{message}")]
    Unclassified {
        /// Runtime type name reported to clients.
        type_name: &'static str,
        /// Diagnostic kept for logs only.
        message: String,
    },
}

impl Fault {
    /// Build a [`Fault::BadHttpRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadHttpRequest {
            message: message.into(),
        }
    }

    /// Build a [`Fault::InvalidEnumArgument`].
    pub fn invalid_enum_argument(
        argument: impl Into<String>,
        value: i64,
        enum_name: &'static str,
    ) -> Self {
        Self::InvalidEnumArgument {
            argument: argument.into(),
            value,
            enum_name,
        }
    }

    /// Build a [`Fault::StorageUpdate`].
    pub fn storage_update(message: impl Into<String>) -> Self {
        Self::StorageUpdate {
            message: message.into(),
        }
    }

    /// Build a [`Fault::Unclassified`].
    pub fn unclassified(type_name: &'static str, message: impl Into<String>) -> Self {
        Self::Unclassified {
            type_name,
            message: message.into(),
        }
    }

    /// Integer division by zero.
    pub fn divide_by_zero() -> Self {
        Self::unclassified("DivideByZero", "Attempted to divide by zero.")
    }

    /// Runtime type name of the fault, as echoed in problem details.
    ///
    /// # Examples
    /// ```
    /// use problem_service::domain::Fault;
    ///
    /// assert_eq!(Fault::divide_by_zero().type_name(), "DivideByZero");
    /// assert_eq!(Fault::storage_update("boom").type_name(), "StorageUpdate");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::BadHttpRequest { .. } => "BadHttpRequest",
            Self::InvalidEnumArgument { .. } => "InvalidEnumArgument",
            Self::StorageUpdate { .. } => "StorageUpdate",
            Self::Unclassified { type_name, .. } => type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Fault::bad_request("bad"), "BadHttpRequest")]
    #[case(Fault::invalid_enum_argument("mode", 9, "ThingMode"), "InvalidEnumArgument")]
    #[case(Fault::storage_update("Database timeout occurred."), "StorageUpdate")]
    #[case(Fault::unclassified("Overflow", "too big"), "Overflow")]
    fn type_name_reports_category(#[case] fault: Fault, #[case] expected: &str) {
        assert_eq!(fault.type_name(), expected);
    }

    #[rstest]
    fn display_uses_raw_message() {
        assert_eq!(
            Fault::storage_update("Database constraint violated.").to_string(),
            "Database constraint violated."
        );
        assert_eq!(
            Fault::divide_by_zero().to_string(),
            "Attempted to divide by zero."
        );
    }

    #[rstest]
    fn invalid_enum_argument_names_argument_value_and_type() {
        let fault = Fault::invalid_enum_argument("mode", -1, "ThingMode");
        assert_eq!(
            fault.to_string(),
            "The value of argument 'mode' (-1) is invalid for Enum type 'ThingMode'."
        );
    }
}
