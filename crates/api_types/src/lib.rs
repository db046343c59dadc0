//! Wire types shared by the server and its clients.
//!
//! Amounts travel as signed integer **minor units** (`amount_minor`, cents
//! for two-decimal currencies); timestamps are RFC3339 with an explicit
//! offset. Currencies are opaque uppercase tags.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Display profile of the authenticated caller.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub username: String,
        pub name: String,
        pub picture: Option<String>,
    }
}

pub mod group {
    use super::*;

    /// Role of a user in a group.
    ///
    /// The creator is `owner`; everyone added afterwards is `member`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MemberRole {
        Owner,
        Member,
    }

    /// Request body for creating a group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        pub description: Option<String>,
        /// Additional member ids; the caller is always added as owner.
        pub member_ids: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: String,
        pub name: String,
        pub description: Option<String>,
        pub created_by: String,
        pub created_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub user_id: String,
        pub user_name: String,
        pub user_picture: Option<String>,
        pub role: MemberRole,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupDetail {
        #[serde(flatten)]
        pub group: GroupView,
        pub members: Vec<MemberView>,
        pub member_count: usize,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupsResponse {
        pub groups: Vec<GroupView>,
    }
}

pub mod expense {
    use super::*;

    /// One member's share within an expense request/response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseItemView {
        pub user_id: String,
        pub amount_minor: i64,
    }

    /// Request body for creating an expense.
    ///
    /// When `items` is omitted the server splits `amount_minor` equally
    /// across all current members, residual cents going to the first
    /// member in membership order.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount_minor: i64,
        pub currency: String,
        pub description: String,
        pub category: Option<String>,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub date: DateTime<FixedOffset>,
        pub items: Option<Vec<ExpenseItemView>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub group_id: String,
        pub paid_by: String,
        pub amount_minor: i64,
        pub currency: String,
        pub description: String,
        pub category: Option<String>,
        pub date: DateTime<FixedOffset>,
        pub items: Vec<ExpenseItemView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SettlementStatus {
        Pending,
        Completed,
        Cancelled,
    }

    /// Request body for declaring a payment to another member.
    ///
    /// The payer is the authenticated caller; the settlement is created in
    /// `pending` status.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementNew {
        pub to_user_id: String,
        pub amount_minor: i64,
        pub currency: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub id: Uuid,
        pub group_id: String,
        pub from_user_id: String,
        pub to_user_id: String,
        pub amount_minor: i64,
        pub currency: String,
        pub status: SettlementStatus,
        pub created_at: DateTime<FixedOffset>,
        pub completed_at: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementsResponse {
        pub settlements: Vec<SettlementView>,
    }
}

pub mod balance {
    use super::*;
    use crate::settlement::SettlementView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserBalanceView {
        pub user_id: String,
        pub user_name: String,
        pub user_picture: Option<String>,
        pub total_owed_minor: i64,
        pub total_owing_minor: i64,
        pub net_balance_minor: i64,
    }

    /// Totals attributed to users who are no longer group members.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FormerMembersView {
        pub total_owed_minor: i64,
        pub total_owing_minor: i64,
        pub net_balance_minor: i64,
    }

    /// The derived balance view of a group.
    ///
    /// `settlements` is unfiltered by status: only `completed` entries
    /// influenced `balances`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupBalanceResponse {
        pub group_id: String,
        pub group_name: String,
        pub balances: Vec<UserBalanceView>,
        pub former_members: Option<FormerMembersView>,
        pub settlements: Vec<SettlementView>,
    }
}
