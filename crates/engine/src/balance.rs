//! Derived balance types.
//!
//! Nothing in this module is persisted: a [`GroupBalance`] is recomputed
//! from the expense and settlement ledgers on every query.

use crate::{MoneyCents, Settlement};

/// Net position of one current member within a group.
///
/// `user_name`/`user_picture` are display snapshots taken at derivation
/// time, not authoritative identity data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserBalance {
    pub user_id: String,
    pub user_name: String,
    pub user_picture: Option<String>,
    /// Sum of expense totals this member paid for, minus completed
    /// settlements received.
    pub total_owed: MoneyCents,
    /// Sum of this member's item shares, minus completed settlements paid.
    pub total_owing: MoneyCents,
    /// `total_owed - total_owing`: positive means the group owes them.
    pub net_balance: MoneyCents,
}

/// Contributions referencing users with no current membership.
///
/// Historical expenses and settlements stay queryable after membership
/// changes; instead of silently dropping an ex-member's share (which would
/// break conservation), it accumulates here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormerMemberTotals {
    pub total_owed: MoneyCents,
    pub total_owing: MoneyCents,
    pub net_balance: MoneyCents,
}

impl FormerMemberTotals {
    pub fn is_zero(&self) -> bool {
        self.total_owed.is_zero() && self.total_owing.is_zero()
    }
}

/// The full balance view of a group.
///
/// `settlements` is the ledger as persisted, **unfiltered by status**:
/// only `completed` entries influenced `balances`, but pending and
/// cancelled ones are returned too so callers can render payment intents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupBalance {
    pub group_id: String,
    pub group_name: String,
    pub balances: Vec<UserBalance>,
    /// `None` when every ledger entry referenced a current member.
    pub former_members: Option<FormerMemberTotals>,
    pub settlements: Vec<Settlement>,
}
