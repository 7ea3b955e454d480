//! Detection rules as data.
//!
//! A rule is a declarative triple of grouping, predicate, and scoring.
//! Rules carry no code: the evaluator interprets the `Grouping` and
//! `Predicate` enums, so a test (or a future config loader) can substitute
//! synthetic rules without touching evaluation logic. Rules are defined
//! once at engine start and are immutable for the process lifetime.

use serde::Serialize;

use gatewatch_types::AlertType;

/// How a rule partitions the event batch into buckets before applying its
/// predicate. `None` means the predicate runs per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grouping {
    /// Row predicate, no grouping.
    None,
    /// `(card_id, calendar day)` in the configured local offset.
    CardByDay,
    /// `(card_id, hour)` in the configured local offset.
    CardByHour,
    /// `(card_id, aligned minute bucket)`.
    CardByBucket { minutes: i64 },
    /// `(channel, aligned minute bucket)`; the predicate then inspects the
    /// devices seen within the channel's bucket.
    ChannelByBucket { minutes: i64 },
    /// All events for one card, across the whole supplied set.
    Card,
    /// All events sharing one card display label.
    CardLabel,
    /// All events presenting one permission label.
    Permission,
    /// `(permission, door)` pairing.
    PermissionDoor,
    /// All records correlated to one transaction.
    Transaction,
}

/// Per-row predicate: applied to each event directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowCheck {
    /// Allowed, yet a reason was recorded.
    AllowedWithReason,
    /// Denied without any recorded reason.
    DeniedWithoutReason,
    /// Allowed without any permission label presented.
    AllowedWithoutPermission,
    /// Device or location missing from the record.
    MissingDeviceOrLocation,
}

/// Per-group predicate: applied to a bucket's events. When it holds, every
/// event in the bucket is implicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupCheck {
    /// More than `max` distinct devices in the bucket.
    DistinctDevicesOver { max: usize },
    /// More than `max` distinct locations in the bucket.
    DistinctLocationsOver { max: usize },
    /// More than `max` distinct user types in the bucket.
    DistinctUserTypesOver { max: usize },
    /// More than `max` distinct card identifiers in the bucket.
    DistinctCardsOver { max: usize },
    /// More than `max` allowed events in the bucket.
    AllowedCountOver { max: usize },
    /// Both allow and deny outcomes recorded in the bucket.
    ConflictingOutcomes,
    /// No event in the bucket was ever allowed.
    NeverAllowed,
    /// The bucket contains exactly one event, i.e. the grouping key pairing
    /// is never seen elsewhere in the set.
    SingletonGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Predicate {
    Row(RowCheck),
    Group(GroupCheck),
}

/// Cut points on the derived score. Strictly-greater-than comparisons:
/// a score exactly at a threshold falls to the lower severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub low: u64,
    pub medium: u64,
}

/// One detection rule: static configuration, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pub id: String,
    pub description: String,
    /// Alert type produced when findings from this rule are assembled.
    pub alert_type: AlertType,
    pub grouping: Grouping,
    pub predicate: Predicate,
    pub weight: u64,
    pub thresholds: Thresholds,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        alert_type: AlertType,
        grouping: Grouping,
        predicate: Predicate,
        weight: u64,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            alert_type,
            grouping,
            predicate,
            weight,
            thresholds,
        }
    }
}
