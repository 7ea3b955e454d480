//! The built-in rule catalog.
//!
//! Fourteen archetypes covering credential misuse, data-quality gaps, and
//! conflicting decisions. Weights come from the reference deployment;
//! thresholds default to `low = 2 x weight`, `medium = 6 x weight`, so a
//! rule turns medium above two implicated events and high above six.
//!
//! Rules are independent and may overlap: one event can trigger several
//! rules, each representing a different risk dimension. That overlap is
//! intentional and is not deduplicated.

use gatewatch_types::AlertType;

use crate::rule::{GroupCheck, Grouping, Predicate, Rule, RowCheck, Thresholds};

fn thresholds_for(weight: u64) -> Thresholds {
    Thresholds {
        low: weight * 2,
        medium: weight * 6,
    }
}

fn rule(
    id: &str,
    description: &str,
    alert_type: AlertType,
    grouping: Grouping,
    predicate: Predicate,
    weight: u64,
) -> Rule {
    Rule::new(
        id,
        description,
        alert_type,
        grouping,
        predicate,
        weight,
        thresholds_for(weight),
    )
}

/// Build the default catalog, in fixed order. Evaluation is
/// order-insensitive; the order here only fixes presentation.
pub fn default_catalog() -> Vec<Rule> {
    vec![
        rule(
            "multi_device",
            "card used on multiple devices within one day",
            AlertType::MultiDevice,
            Grouping::CardByDay,
            Predicate::Group(GroupCheck::DistinctDevicesOver { max: 1 }),
            5,
        ),
        rule(
            "multi_location",
            "card used at multiple locations within one hour",
            AlertType::MultiLocation,
            Grouping::CardByHour,
            Predicate::Group(GroupCheck::DistinctLocationsOver { max: 1 }),
            4,
        ),
        rule(
            "user_type_churn",
            "card presented under multiple user types within one day",
            AlertType::UserTypeChurn,
            Grouping::CardByDay,
            Predicate::Group(GroupCheck::DistinctUserTypesOver { max: 1 }),
            3,
        ),
        rule(
            "allow_with_reason",
            "access allowed despite a recorded denial reason",
            AlertType::AllowWithReason,
            Grouping::None,
            Predicate::Row(RowCheck::AllowedWithReason),
            2,
        ),
        rule(
            "deny_without_reason",
            "access denied without a recorded reason",
            AlertType::DenyWithoutReason,
            Grouping::None,
            Predicate::Row(RowCheck::DeniedWithoutReason),
            3,
        ),
        rule(
            "allow_without_permission",
            "access allowed without a permission label",
            AlertType::AllowWithoutPermission,
            Grouping::None,
            Predicate::Row(RowCheck::AllowedWithoutPermission),
            3,
        ),
        rule(
            "high_frequency",
            "more than five allowed swipes by one card in ten minutes",
            AlertType::HighFrequency,
            Grouping::CardByBucket { minutes: 10 },
            Predicate::Group(GroupCheck::AllowedCountOver { max: 5 }),
            6,
        ),
        rule(
            "shared_permission",
            "permission label shared across user types",
            AlertType::SharedPermission,
            Grouping::Permission,
            Predicate::Group(GroupCheck::DistinctUserTypesOver { max: 1 }),
            4,
        ),
        rule(
            "missing_device_or_location",
            "record missing device or location",
            AlertType::MissingDeviceOrLocation,
            Grouping::None,
            Predicate::Row(RowCheck::MissingDeviceOrLocation),
            1,
        ),
        rule(
            "never_allowed",
            "card with activity but no allowed access",
            AlertType::NeverAllowed,
            Grouping::Card,
            Predicate::Group(GroupCheck::NeverAllowed),
            7,
        ),
        rule(
            "transaction_conflict",
            "conflicting allow/deny outcomes for one transaction",
            AlertType::TransactionConflict,
            Grouping::Transaction,
            Predicate::Group(GroupCheck::ConflictingOutcomes),
            5,
        ),
        rule(
            "shared_card_label",
            "card name shared across multiple card identifiers",
            AlertType::SharedCardLabel,
            Grouping::CardLabel,
            Predicate::Group(GroupCheck::DistinctCardsOver { max: 1 }),
            4,
        ),
        rule(
            "permission_door_mismatch",
            "permission/door pairing never seen elsewhere in the set",
            AlertType::PermissionDoorMismatch,
            Grouping::PermissionDoor,
            Predicate::Group(GroupCheck::SingletonGroup),
            3,
        ),
        rule(
            "channel_device_mismatch",
            "multiple devices answering one channel within five minutes",
            AlertType::ChannelDeviceMismatch,
            Grouping::ChannelByBucket { minutes: 5 },
            Predicate::Group(GroupCheck::DistinctDevicesOver { max: 1 }),
            4,
        ),
    ]
}
