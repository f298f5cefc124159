//! Thing lookups with simulated outcomes.
//!
//! The service stands in for real request logic: it waits for a configurable
//! delay, then either succeeds, returns a [`DomainError`] as a value, or
//! raises one of several [`Fault`]s so every translation path can be
//! exercised end to end.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{QueryOutcome, ThingQuery};
use crate::domain::{DomainError, Fault};

/// Simulated outcome requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThingMode {
    /// The thing exists.
    Known,
    /// The thing is unknown; reported as a domain error.
    Unknown,
    /// Storage update fails with a timeout.
    ThrowDbTimeout,
    /// Storage update fails with a constraint violation.
    ThrowDbUpdate,
    /// Arithmetic fault.
    ThrowDivideByZero,
}

impl ThingMode {
    /// Every variant, ordered by discriminant.
    pub const ALL: [Self; 5] = [
        Self::Known,
        Self::Unknown,
        Self::ThrowDbTimeout,
        Self::ThrowDbUpdate,
        Self::ThrowDivideByZero,
    ];

    /// Type name reported when a raw discriminant is out of range.
    pub const TYPE_NAME: &'static str = "ThingMode";

    /// Canonical variant name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Known => "Known",
            Self::Unknown => "Unknown",
            Self::ThrowDbTimeout => "ThrowDbTimeout",
            Self::ThrowDbUpdate => "ThrowDbUpdate",
            Self::ThrowDivideByZero => "ThrowDivideByZero",
        }
    }

    /// Look a variant up by name, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use problem_service::domain::ThingMode;
    ///
    /// assert_eq!(ThingMode::from_name("known"), Some(ThingMode::Known));
    /// assert_eq!(ThingMode::from_name("sideways"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
    }
}

impl TryFrom<i64> for ThingMode {
    type Error = Fault;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| Fault::invalid_enum_argument("mode", value, Self::TYPE_NAME))
    }
}

impl std::fmt::Display for ThingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thing {
    message: String,
}

impl Thing {
    /// Create a thing carrying a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Value attached to every unknown-thing error.
pub const UNKNOWN_THING_NUMBER: i64 = 12345;

/// Default simulated work delay.
pub const DEFAULT_WORK_DELAY: Duration = Duration::from_millis(500);

/// [`ThingQuery`] implementation that simulates work with a delay.
///
/// The delay is awaited with `tokio::time::sleep`, so dropping the returned
/// future (for example when the client disconnects) stops further work.
#[derive(Debug, Clone, Copy)]
pub struct ThingQueryService {
    work_delay: Duration,
}

impl Default for ThingQueryService {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_DELAY)
    }
}

impl ThingQueryService {
    /// Create a service that waits `work_delay` before answering.
    #[must_use]
    pub const fn new(work_delay: Duration) -> Self {
        Self { work_delay }
    }

    /// Configured delay.
    #[must_use]
    pub const fn work_delay(&self) -> Duration {
        self.work_delay
    }
}

fn unknown_thing(mode: ThingMode) -> DomainError {
    DomainError::intrinsic("Thing Unknown", "The specified thing is unknown.")
        .with_additional_data("thingMode", mode.as_str())
        .with_additional_data("number", UNKNOWN_THING_NUMBER)
}

#[async_trait]
impl ThingQuery for ThingQueryService {
    async fn get_thing(&self, mode: ThingMode) -> Result<QueryOutcome<Thing>, Fault> {
        tokio::time::sleep(self.work_delay).await;
        debug!(%mode, "resolving thing");

        match mode {
            ThingMode::Known => Ok(Ok(Thing::new("Thing is known!"))),
            ThingMode::ThrowDbTimeout => Err(Fault::storage_update("Database timeout occurred.")),
            ThingMode::ThrowDbUpdate => {
                Err(Fault::storage_update("Database constraint violated."))
            }
            ThingMode::ThrowDivideByZero => Err(Fault::divide_by_zero()),
            ThingMode::Unknown => Ok(Err(unknown_thing(mode))),
        }
    }
}
