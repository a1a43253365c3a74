//! File-backed stand-in for the hosted transaction store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::document::UserDocument;

/// Source and sink of per-user documents.
pub trait TransactionStore {
    /// Fetch the user's document, creating an empty one on first access.
    fn load(&self, user: &str) -> Result<UserDocument>;

    /// Replace the user's document.
    fn save(&self, user: &str, doc: &UserDocument) -> Result<()>;
}

/// One pretty-printed JSON document per user under `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn document_path(&self, user: &str) -> Result<PathBuf> {
        validate_user_id(user)?;
        Ok(self.dir.join(format!("{user}.json")))
    }
}

impl TransactionStore for JsonFileStore {
    fn load(&self, user: &str) -> Result<UserDocument> {
        let p = self.document_path(user)?;
        if !p.exists() {
            tracing::info!(user, "creating empty transaction document");
            let doc = UserDocument::new();
            self.save(user, &doc)?;
            return Ok(doc);
        }

        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        let doc: UserDocument =
            serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
        tracing::debug!(user, records = doc.transactions.len(), "loaded document");
        Ok(doc)
    }

    fn save(&self, user: &str, doc: &UserDocument) -> Result<()> {
        let p = self.document_path(user)?;
        fs::create_dir_all(&self.dir).with_context(|| format!("create {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(doc).context("serialize document")?;
        fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
        tracing::debug!(user, records = doc.transactions.len(), "saved document");
        Ok(())
    }
}

/// User ids become file names: non-empty, ASCII alphanumerics, `-` and `_` only.
pub fn validate_user_id(user: &str) -> Result<()> {
    if user.is_empty() {
        bail!("user id must not be empty");
    }
    if !user
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        bail!("invalid user id '{user}' (use letters, digits, '-' or '_')");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::dec;
    use smartspend_core::{Transaction, TransactionKind};

    #[test]
    fn test_first_load_creates_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"));

        let doc = store.load("alice").unwrap();
        assert_eq!(doc, UserDocument::new());
        assert!(store.document_path("alice").unwrap().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut doc = UserDocument::new();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        doc.append(&Transaction::new(TransactionKind::Income, dec!(42), "Gifts", at));
        store.save("bob", &doc).unwrap();

        let loaded = store.load("bob").unwrap();
        assert_eq!(loaded.total_amount, dec!(42));
        assert_eq!(loaded.dated().len(), 1);
        assert_eq!(loaded.dated()[0].category, "Gifts");
    }

    #[test]
    fn test_reads_hand_written_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(
            dir.path().join("carol.json"),
            r#"{"totalAmount":70,"transactions":[
                {"type":"Income","amount":100,"category":"Gifts","date":"2024-01-01T00:00:00.000Z","createdAt":"2024-01-01T00:00:00.000Z"},
                {"type":"Expense","amount":30,"date":"2024-01-02T00:00:00.000Z"}
            ]}"#,
        )
        .unwrap();

        let doc = store.load("carol").unwrap();
        assert_eq!(doc.total_amount, dec!(70));
        assert_eq!(doc.totals(), (dec!(100), dec!(30)));
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(dir.path().join("dave.json"), "not json").unwrap();
        assert!(store.load("dave").is_err());
    }

    #[test]
    fn test_user_id_validation() {
        assert!(validate_user_id("user_01-a").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("../etc/passwd").is_err());
        assert!(validate_user_id("a b").is_err());
    }
}
