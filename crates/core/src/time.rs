use chrono::{DateTime, Utc};

/// Clock handle: real time in production, pinned time in tests.
///
/// The only production caller stamps `exportedAt` on export documents, but a
/// pinned clock keeps transfer tests and view smoke tests reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock(Option<DateTime<Utc>>);

impl Clock {
    /// A clock that reads the system time.
    #[must_use]
    pub fn system() -> Self {
        Self(None)
    }

    /// A clock pinned at the given instant.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self(Some(at))
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.0.unwrap_or_else(Utc::now)
    }
}

/// Deterministic test instant: 2025-06-15T08:00:00Z.
const FIXED_TEST_TIMESTAMP: i64 = 1_749_974_400;

/// A pinned `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented, which cannot happen
/// for this constant.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// A `Clock` pinned at [`fixed_now`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
