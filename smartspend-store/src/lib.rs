//! smartspend-store: per-user transaction documents and a file-backed store.

pub mod document;
pub mod ledger;
pub mod store;

pub use document::UserDocument;
pub use ledger::Ledger;
pub use store::{JsonFileStore, TransactionStore, validate_user_id};
