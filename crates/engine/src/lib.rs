pub use balance::{FormerMemberTotals, GroupBalance, UserBalance};
pub use currency::Currency;
pub use error::EngineError;
pub use expense_items::ExpenseItem;
pub use expenses::{Expense, ITEM_SUM_TOLERANCE};
pub use group_memberships::{GroupMember, MemberRole};
pub use groups::Group;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, ExpenseCmd};
pub use settlements::{Settlement, SettlementStatus};

mod balance;
mod currency;
mod error;
mod expense_items;
mod expenses;
mod group_memberships;
mod groups;
mod money;
mod ops;
mod settlements;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
