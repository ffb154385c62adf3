//! Types that represent the core data model, such as `Transaction` and `Category`.
mod amount;
mod category;
mod period;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{Catalog, Category};
pub use period::Period;
pub use transaction::{Direction, StoredAmount, Transaction};
