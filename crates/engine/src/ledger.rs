//! The cari ledger: append-only debit/credit entries grouped by account.
//!
//! A "cari" is a running account for a customer or supplier. Every movement
//! is one entry tagged with the stored transaction-type text; historic sheets
//! mix tag vocabularies (`"FATURA (Borç)"`, `"BORÇ"`, `"ÖDEME (Alacak)"`,
//! ...), so classification is a substring match against the tag families
//! rather than an exact compare.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CellValue, EngineError, Kurus, ResultEngine};

/// Tags counted as debit (amount owed by the account).
const DEBIT_TAGS: [&str; 2] = ["BORÇ", "FATURA"];
/// Tags counted as credit (amount paid / received).
const CREDIT_TAGS: [&str; 2] = ["ALACAK", "ÖDEME"];

/// Which side of the account an entry moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Debit,
    Credit,
}

impl EntryKind {
    /// Classifies a stored tag by case-sensitive substring match.
    ///
    /// Returns `None` for tags outside both families (e.g. `"AÇILIŞ"`);
    /// those entries are excluded from the sums, not errored. A tag somehow
    /// matching both families counts as debit.
    #[must_use]
    pub fn classify_tag(tag: &str) -> Option<EntryKind> {
        if DEBIT_TAGS.iter().any(|marker| tag.contains(marker)) {
            return Some(EntryKind::Debit);
        }
        if CREDIT_TAGS.iter().any(|marker| tag.contains(marker)) {
            return Some(EntryKind::Credit);
        }
        None
    }

    /// Canonical tag text for newly created entries.
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            EntryKind::Debit => "FATURA (Borç)",
            EntryKind::Credit => "ÖDEME (Alacak)",
        }
    }
}

/// One financial movement against an account.
///
/// Entries are created on submission and appended; the ledger never mutates
/// or deletes them. The amount stays a raw [`CellValue`] as stored — sign is
/// encoded by the tag, normalization happens at aggregation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub account: String,
    pub date: NaiveDate,
    pub kind_tag: String,
    pub note: String,
    pub amount: CellValue,
}

impl LedgerEntry {
    pub fn new(
        account: String,
        date: NaiveDate,
        kind: EntryKind,
        note: String,
        amount: CellValue,
    ) -> Self {
        Self {
            account,
            date,
            kind_tag: kind.as_tag().to_string(),
            note,
            amount,
        }
    }

    /// The entry's side, if its tag belongs to a known family.
    #[must_use]
    pub fn kind(&self) -> Option<EntryKind> {
        EntryKind::classify_tag(&self.kind_tag)
    }
}

/// Per-account totals.
///
/// `balance = total_credit - total_debit`: positive means the account has
/// paid more than it was invoiced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AccountStatement {
    pub total_debit: Kurus,
    pub total_credit: Kurus,
    pub balance: Kurus,
}

impl AccountStatement {
    fn add(&mut self, kind: EntryKind, amount: Kurus) {
        match kind {
            EntryKind::Debit => self.total_debit += amount,
            EntryKind::Credit => self.total_credit += amount,
        }
        self.balance = self.total_credit - self.total_debit;
    }
}

/// The single owner of all [`LedgerEntry`] records.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    #[must_use]
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    /// Appends one entry. The account name identifies the cari and must not
    /// be blank.
    pub fn append(&mut self, entry: LedgerEntry) -> ResultEngine<&LedgerEntry> {
        if entry.account.trim().is_empty() {
            return Err(EngineError::EmptyAccount);
        }
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Distinct account names, in first-seen order.
    #[must_use]
    pub fn accounts(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.account.as_str()) {
                seen.push(entry.account.as_str());
            }
        }
        seen
    }

    /// Entries for one account, in insertion order.
    #[must_use]
    pub fn entries_for(&self, account: &str) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.account == account)
            .collect()
    }

    /// Computes totals for one account.
    ///
    /// Amounts are normalized per entry (text via the lenient parser, numbers
    /// pass through); entries with unrecognized tags contribute to neither
    /// sum. An unknown account yields an all-zero statement.
    #[must_use]
    pub fn statement(&self, account: &str) -> AccountStatement {
        let mut statement = AccountStatement::default();
        for entry in self.entries.iter().filter(|e| e.account == account) {
            if let Some(kind) = entry.kind() {
                statement.add(kind, entry.amount.to_kurus());
            }
        }
        statement
    }

    /// Computes totals for every account seen in the ledger.
    #[must_use]
    pub fn statement_all(&self) -> HashMap<String, AccountStatement> {
        let mut statements: HashMap<String, AccountStatement> = HashMap::new();
        for entry in &self.entries {
            let statement = statements.entry(entry.account.clone()).or_default();
            if let Some(kind) = entry.kind() {
                statement.add(kind, entry.amount.to_kurus());
            }
        }
        statements
    }
}
