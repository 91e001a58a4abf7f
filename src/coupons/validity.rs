//! Coupon Validity Window & Usage Limit

use jiff::Timestamp;

/// Inclusive period during which a coupon may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    /// First instant the coupon is valid
    pub from: Timestamp,

    /// Last instant the coupon is valid
    pub until: Timestamp,
}

impl ValidityWindow {
    /// Create a validity window.
    #[must_use]
    pub const fn new(from: Timestamp, until: Timestamp) -> Self {
        Self { from, until }
    }

    /// Whether `now` falls within `[from, until]`.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.from <= now && now <= self.until
    }

    /// Whether the window has not opened yet.
    pub fn is_pending(&self, now: Timestamp) -> bool {
        now < self.from
    }

    /// Whether the window has closed.
    pub fn has_ended(&self, now: Timestamp) -> bool {
        now > self.until
    }
}

/// Redemption cap for a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageLimit {
    /// Maximum number of redemptions
    pub limit: u32,

    /// Redemptions so far
    pub used: u32,
}

impl UsageLimit {
    /// A fresh limit with no redemptions.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    /// Set the number of redemptions already made.
    #[must_use]
    pub const fn with_used(mut self, used: u32) -> Self {
        self.used = used;
        self
    }

    /// Whether no redemptions remain.
    pub const fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    /// Redemptions left before the limit is reached.
    pub const fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}
