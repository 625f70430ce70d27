use std::fmt;

use chrono::{DateTime, Utc};

/// Wall-clock source injected into time-dependent components.
///
/// Implementations must be cheap to call; ticking components query the clock
/// on every update.
pub trait ClockPort: fmt::Debug + Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}
