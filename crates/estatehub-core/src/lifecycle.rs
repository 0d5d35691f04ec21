// Rust guideline compliant 2026-10-12

//! Lifecycle controller for status transitions.
//!
//! Each record kind with a lifecycle owns a transition table mapping a
//! status to the set of statuses it may move to. The table is the only
//! source of truth: [`LifecycleController::allowed_targets`] and
//! [`LifecycleController::transition`] both read it, so a transition
//! succeeds exactly when its target is listed as allowed.
//!
//! Default policy:
//!
//! - Listing: available and under_offer move freely between each other and
//!   to sold, rented or off_market. off_market returns to available. sold
//!   and rented are terminal unless re-listing is allowed.
//! - Inquiry: new → contacted, qualified, closed or spam. contacted and
//!   qualified move between each other and to converted or closed.
//!   converted → closed. closed and spam are terminal.
//! - Account: active ↔ inactive.
//!
//! Amenities have no lifecycle.

use crate::error::{LifecycleError, ValidationError};
use crate::models::{
    Account, AccountStatus, Inquiry, InquiryStatus, Listing, ListingStatus, Record, RecordKind,
};
use crate::schema::Entity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One row of a transition table as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule<S> {
    /// Source status.
    pub from: S,
    /// Statuses reachable from `from`.
    #[serde(default = "Vec::new")]
    pub to: Vec<S>,
}

/// The allowed status changes for one record kind.
///
/// Statuses without an entry are terminal. Self-edges are never allowed,
/// since asking for the current status is a no-op rather than a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable<S: Ord> {
    edges: BTreeMap<S, BTreeSet<S>>,
}

impl<S> TransitionTable<S>
where
    S: Copy + Ord + fmt::Display,
{
    /// Builds a table from configuration rules. Rules sharing a source merge.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if a rule lists its own source as a target.
    pub fn from_rules(
        rules: impl IntoIterator<Item = TransitionRule<S>>,
    ) -> Result<Self, ValidationError> {
        let mut edges: BTreeMap<S, BTreeSet<S>> = BTreeMap::new();
        for rule in rules {
            if rule.to.contains(&rule.from) {
                return Err(ValidationError::InvalidValue {
                    field: "transitions".to_string(),
                    value: format!("{} -> {}", rule.from, rule.from),
                    reason: "a status cannot transition to itself".to_string(),
                });
            }
            edges.entry(rule.from).or_default().extend(rule.to);
        }
        Ok(Self { edges })
    }

    fn from_pairs(pairs: &[(S, &[S])]) -> Self {
        let edges = pairs
            .iter()
            .map(|(from, to)| (*from, to.iter().copied().collect()))
            .collect();
        Self { edges }
    }

    /// Returns the rules in source order.
    #[must_use]
    pub fn rules(&self) -> Vec<TransitionRule<S>> {
        self.edges
            .iter()
            .map(|(from, to)| TransitionRule {
                from: *from,
                to: to.iter().copied().collect(),
            })
            .collect()
    }

    /// Returns the statuses reachable from `from`. Empty for terminal statuses.
    #[must_use]
    pub fn allowed_targets(&self, from: S) -> BTreeSet<S> {
        self.edges.get(&from).cloned().unwrap_or_default()
    }

    /// Returns true if `from -> to` is in the table.
    #[must_use]
    pub fn allows(&self, from: S, to: S) -> bool {
        self.edges.get(&from).is_some_and(|targets| targets.contains(&to))
    }

    /// Adds `from -> to` unless it is a self-edge.
    pub fn allow(&mut self, from: S, to: S) {
        if from != to {
            self.edges.entry(from).or_default().insert(to);
        }
    }
}

impl<S> Serialize for TransitionTable<S>
where
    S: Copy + Ord + fmt::Display + Serialize,
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.rules().serialize(serializer)
    }
}

impl<'de, S> Deserialize<'de> for TransitionTable<S>
where
    S: Copy + Ord + fmt::Display + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rules = Vec::<TransitionRule<S>>::deserialize(deserializer)?;
        Self::from_rules(rules).map_err(serde::de::Error::custom)
    }
}

/// Transition tables for every kind with a lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionPolicy {
    /// Listing table.
    pub listing: TransitionTable<ListingStatus>,
    /// Inquiry table.
    pub inquiry: TransitionTable<InquiryStatus>,
    /// Account table.
    pub account: TransitionTable<AccountStatus>,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        use AccountStatus as A;
        use InquiryStatus as I;
        use ListingStatus as L;

        Self {
            listing: TransitionTable::from_pairs(&[
                (L::Available, &[L::UnderOffer, L::Sold, L::Rented, L::OffMarket]),
                (L::UnderOffer, &[L::Available, L::Sold, L::Rented, L::OffMarket]),
                (L::OffMarket, &[L::Available]),
            ]),
            inquiry: TransitionTable::from_pairs(&[
                (I::New, &[I::Contacted, I::Qualified, I::Closed, I::Spam]),
                (I::Contacted, &[I::Qualified, I::Converted, I::Closed]),
                (I::Qualified, &[I::Contacted, I::Converted, I::Closed]),
                (I::Converted, &[I::Closed]),
            ]),
            account: TransitionTable::from_pairs(&[
                (A::Active, &[A::Inactive]),
                (A::Inactive, &[A::Active]),
            ]),
        }
    }
}

impl TransitionPolicy {
    /// Returns the policy with sold and rented listings allowed back to available.
    #[must_use]
    pub fn with_relisting(mut self) -> Self {
        self.listing
            .allow(ListingStatus::Sold, ListingStatus::Available);
        self.listing
            .allow(ListingStatus::Rented, ListingStatus::Available);
        self
    }
}

/// A record kind whose status moves through a transition table.
pub trait Lifecycle: Entity + Clone {
    /// The kind's closed status enum.
    type Status: Copy + Ord + fmt::Debug + fmt::Display;

    /// Returns the current status.
    fn status(&self) -> Self::Status;

    /// Returns a copy with the status replaced and everything else unchanged.
    fn with_status(&self, status: Self::Status) -> Self;

    /// Selects this kind's table from a policy.
    fn table(policy: &TransitionPolicy) -> &TransitionTable<Self::Status>;
}

impl Lifecycle for Listing {
    type Status = ListingStatus;

    fn status(&self) -> ListingStatus {
        self.status
    }

    fn with_status(&self, status: ListingStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn table(policy: &TransitionPolicy) -> &TransitionTable<ListingStatus> {
        &policy.listing
    }
}

impl Lifecycle for Inquiry {
    type Status = InquiryStatus;

    fn status(&self) -> InquiryStatus {
        self.status
    }

    fn with_status(&self, status: InquiryStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    fn table(policy: &TransitionPolicy) -> &TransitionTable<InquiryStatus> {
        &policy.inquiry
    }
}

impl Lifecycle for Account {
    type Status = AccountStatus;

    fn status(&self) -> AccountStatus {
        Account::status(self)
    }

    fn with_status(&self, status: AccountStatus) -> Self {
        Self {
            active: status == AccountStatus::Active,
            ..self.clone()
        }
    }

    fn table(policy: &TransitionPolicy) -> &TransitionTable<AccountStatus> {
        &policy.account
    }
}

/// A status of any kind. Status spaces of different kinds are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Status {
    /// Listing status.
    Listing(ListingStatus),
    /// Inquiry status.
    Inquiry(InquiryStatus),
    /// Account status.
    Account(AccountStatus),
}

impl Status {
    /// Parses a status name in the status space of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStatus` if the name is not a status of `kind`, or if
    /// `kind` has no lifecycle.
    pub fn parse(kind: RecordKind, value: &str) -> Result<Self, ValidationError> {
        let parsed = match kind {
            RecordKind::Listing => ListingStatus::parse(value).map(Status::Listing),
            RecordKind::Inquiry => InquiryStatus::parse(value).map(Status::Inquiry),
            RecordKind::Account => AccountStatus::parse(value).map(Status::Account),
            RecordKind::Amenity => None,
        };
        parsed.ok_or_else(|| ValidationError::UnknownStatus {
            kind,
            value: value.to_string(),
        })
    }

    /// Returns the kind whose status space this status belongs to.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Status::Listing(_) => RecordKind::Listing,
            Status::Inquiry(_) => RecordKind::Inquiry,
            Status::Account(_) => RecordKind::Account,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Listing(status) => status.fmt(f),
            Status::Inquiry(status) => status.fmt(f),
            Status::Account(status) => status.fmt(f),
        }
    }
}

impl Record {
    /// Returns the lifecycle status, or `None` for amenities.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        match self {
            Record::Listing(listing) => Some(Status::Listing(listing.status)),
            Record::Inquiry(inquiry) => Some(Status::Inquiry(inquiry.status)),
            Record::Account(account) => Some(Status::Account(account.status())),
            Record::Amenity(_) => None,
        }
    }
}

/// Validates and applies status transitions under a policy.
#[derive(Debug, Clone, Default)]
pub struct LifecycleController {
    policy: TransitionPolicy,
}

impl LifecycleController {
    /// Creates a controller for the given policy.
    #[must_use]
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in effect.
    #[must_use]
    pub fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    /// Returns the statuses `record` may move to.
    #[must_use]
    pub fn allowed_targets<R: Lifecycle>(&self, record: &R) -> BTreeSet<R::Status> {
        R::table(&self.policy).allowed_targets(record.status())
    }

    /// Returns a copy of `record` with its status set to `target`.
    ///
    /// # Errors
    ///
    /// Returns `NoOpTransition` if `target` is the current status and
    /// `InvalidTransition` if the table does not allow the change.
    pub fn transition<R: Lifecycle>(
        &self,
        record: &R,
        target: R::Status,
    ) -> Result<R, LifecycleError> {
        let current = record.status();

        if current == target {
            tracing::debug!(kind = %record.kind(), id = record.id(), status = %current, "no-op transition rejected");
            return Err(LifecycleError::NoOpTransition {
                kind: record.kind(),
                status: current.to_string(),
            });
        }

        if !R::table(&self.policy).allows(current, target) {
            tracing::debug!(kind = %record.kind(), id = record.id(), from = %current, to = %target, "transition rejected");
            return Err(LifecycleError::InvalidTransition {
                kind: record.kind(),
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(kind = %record.kind(), id = record.id(), from = %current, to = %target, "transition applied");
        Ok(record.with_status(target))
    }

    /// Returns the statuses any record may move to, in table order.
    ///
    /// Empty for amenities and terminal statuses.
    #[must_use]
    pub fn allowed_record_targets(&self, record: &Record) -> Vec<Status> {
        match record {
            Record::Listing(listing) => self
                .allowed_targets(listing)
                .into_iter()
                .map(Status::Listing)
                .collect(),
            Record::Inquiry(inquiry) => self
                .allowed_targets(inquiry)
                .into_iter()
                .map(Status::Inquiry)
                .collect(),
            Record::Account(account) => self
                .allowed_targets(account)
                .into_iter()
                .map(Status::Account)
                .collect(),
            Record::Amenity(_) => Vec::new(),
        }
    }

    /// Applies a transition to any record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for amenities and for a target from
    /// another kind's status space, otherwise as [`Self::transition`].
    pub fn transition_record(
        &self,
        record: &Record,
        target: Status,
    ) -> Result<Record, LifecycleError> {
        match (record, target) {
            (Record::Listing(listing), Status::Listing(to)) => {
                self.transition(listing, to).map(Record::Listing)
            }
            (Record::Inquiry(inquiry), Status::Inquiry(to)) => {
                self.transition(inquiry, to).map(Record::Inquiry)
            }
            (Record::Account(account), Status::Account(to)) => {
                self.transition(account, to).map(Record::Account)
            }
            _ => {
                let from = record
                    .status()
                    .map_or_else(|| "none".to_string(), |status| status.to_string());
                tracing::debug!(kind = %record.kind(), id = record.id(), from = %from, to = %target, "transition rejected");
                Err(LifecycleError::InvalidTransition {
                    kind: record.kind(),
                    from,
                    to: target.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_has_no_self_edges() {
        let policy = TransitionPolicy::default();
        for status in ListingStatus::ALL {
            assert!(!policy.listing.allows(*status, *status));
        }
        for status in InquiryStatus::ALL {
            assert!(!policy.inquiry.allows(*status, *status));
        }
    }

    #[test]
    fn test_spam_only_reachable_from_new() {
        let policy = TransitionPolicy::default();
        for status in InquiryStatus::ALL {
            let reachable = policy.inquiry.allows(*status, InquiryStatus::Spam);
            assert_eq!(reachable, *status == InquiryStatus::New, "from {status}");
        }
    }

    #[test]
    fn test_from_rules_rejects_self_edge() {
        let result = TransitionTable::from_rules(vec![TransitionRule {
            from: ListingStatus::Sold,
            to: vec![ListingStatus::Sold],
        }]);
        assert!(matches!(result, Err(ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_rules_merges_sources() {
        let table = TransitionTable::from_rules(vec![
            TransitionRule {
                from: ListingStatus::Sold,
                to: vec![ListingStatus::Available],
            },
            TransitionRule {
                from: ListingStatus::Sold,
                to: vec![ListingStatus::OffMarket],
            },
        ])
        .unwrap();
        assert_eq!(table.allowed_targets(ListingStatus::Sold).len(), 2);
        assert!(table.allowed_targets(ListingStatus::Available).is_empty());
    }

    #[test]
    fn test_table_deserializes_rule_without_targets() {
        let json = r#"[{"from": "off_market", "to": ["available"]}, {"from": "sold"}]"#;
        let table: TransitionTable<ListingStatus> = serde_json::from_str(json).unwrap();
        assert!(table.allows(ListingStatus::OffMarket, ListingStatus::Available));
        assert!(table.allowed_targets(ListingStatus::Sold).is_empty());

        let back = serde_json::to_string(&table).unwrap();
        let again: TransitionTable<ListingStatus> = serde_json::from_str(&back).unwrap();
        assert_eq!(again, table);
    }

    #[test]
    fn test_relisting_opens_terminal_statuses() {
        let policy = TransitionPolicy::default().with_relisting();
        assert!(policy.listing.allows(ListingStatus::Sold, ListingStatus::Available));
        assert!(policy.listing.allows(ListingStatus::Rented, ListingStatus::Available));
        assert!(!policy.listing.allows(ListingStatus::Sold, ListingStatus::Rented));
    }

    #[test]
    fn test_status_parse_is_kind_scoped() {
        assert_eq!(
            Status::parse(RecordKind::Listing, "sold").unwrap(),
            Status::Listing(ListingStatus::Sold)
        );
        assert!(Status::parse(RecordKind::Inquiry, "sold").is_err());
        assert!(Status::parse(RecordKind::Amenity, "active").is_err());
    }
}
