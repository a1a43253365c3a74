//! smartspend-core: transaction model and the dashboard aggregation engine.
//!
//! The engine is a pure function, [`aggregate`], from a transaction list, a
//! [`Timeframe`] and an explicit "now" to a [`Report`]. Nothing here touches
//! storage or reads the clock on its own.
//!
//! Note on the yearly timeframe: daily, weekly and monthly windows have a
//! fixed width (14, 8 and 12 buckets), while the yearly window holds every
//! year present in the data plus the current year. The width therefore grows
//! with the history. This is intended.

pub mod category;
pub mod entry;
pub mod period;
pub mod report;
pub mod summary;
pub mod time;
pub mod timeframe;
pub mod transaction;
pub mod window;

pub use category::{catalog, search as search_categories};
pub use entry::{EntryDraft, EntryError};
pub use period::PeriodKey;
pub use report::{Bucket, Report, aggregate};
pub use summary::Summary;
pub use timeframe::Timeframe;
pub use transaction::{
    MAX_AMOUNT, RawTransaction, Transaction, TransactionKind, collect_dated,
};
pub use window::seed_window;
