use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use teller_core::{AccountId, LedgerError, LedgerResult};

use crate::account::{Account, Direction, TxLog};
use crate::snapshot::{SNAPSHOT_VERSION, STORAGE_KIND, Snapshot, SnapshotAccount, SnapshotMeta};

/// In-memory authoritative store of accounts.
///
/// A single exclusive lock guards the whole account table and every account's
/// mutable fields. Every operation holds it for its full duration, which makes
/// the operations linearizable and lets [`Ledger::transfer`] touch two
/// accounts with no cross-account lock ordering to get wrong. Each critical
/// section is O(1) work (a map lookup, arithmetic, a history append), so the
/// serialization cost stays small.
///
/// Every value handed back to a caller is a detached copy; references into
/// the table never escape the lock.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Next account id, allocated with a relaxed fetch-add so allocation
    /// never contends with the table lock. Insertion itself still happens
    /// under `accounts`.
    next_id: AtomicI64,
    accounts: Mutex<HashMap<AccountId, Account>>,
}

impl Ledger {
    /// Empty ledger with the id sequence at its start.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<AccountId, Account>> {
        // A poisoned lock is recovered, not surfaced: the error contract is
        // the four domain kinds only.
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn alloc_id(&self) -> AccountId {
        AccountId::from_seq(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Create an account with `name` and a starting balance.
    ///
    /// The initial balance may be zero but not negative.
    pub fn create(&self, name: &str, balance: i64) -> LedgerResult<Account> {
        if balance < 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let mut accounts = self.guard();
        let id = self.alloc_id();
        let account = Account {
            id: id.clone(),
            name: name.to_string(),
            balance,
            logs: Vec::new(),
        };
        accounts.insert(id, account.clone());
        Ok(account)
    }

    /// Current state of one account.
    pub fn get(&self, id: &AccountId) -> LedgerResult<Account> {
        self.guard().get(id).cloned().ok_or(LedgerError::NotFound)
    }

    /// Current state of every account. Order is unspecified.
    pub fn list(&self) -> Vec<Account> {
        self.guard().values().cloned().collect()
    }

    /// Add `amount` to the account's balance.
    ///
    /// The balance change and its history entry are applied as one step; no
    /// observer can see one without the other.
    pub fn deposit(&self, id: &AccountId, amount: i64) -> LedgerResult<Account> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let mut accounts = self.guard();
        let account = accounts.get_mut(id).ok_or(LedgerError::NotFound)?;
        account.balance += amount;
        account.logs.push(TxLog {
            time: Utc::now(),
            amount,
            direction: Direction::In,
            counter_account: None,
            note: "deposit".to_string(),
        });
        Ok(account.clone())
    }

    /// Remove `amount` from the account's balance.
    ///
    /// Fails with [`LedgerError::InsufficientBalance`] if the balance would
    /// go negative; the account is left untouched in that case.
    pub fn withdraw(&self, id: &AccountId, amount: i64) -> LedgerResult<Account> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let mut accounts = self.guard();
        let account = accounts.get_mut(id).ok_or(LedgerError::NotFound)?;
        if account.balance < amount {
            return Err(LedgerError::InsufficientBalance);
        }
        account.balance -= amount;
        account.logs.push(TxLog {
            time: Utc::now(),
            amount,
            direction: Direction::Out,
            counter_account: None,
            note: "withdraw".to_string(),
        });
        Ok(account.clone())
    }

    /// Move `amount` from one account to another as a single atomic step.
    ///
    /// The existence checks, balance check, debit, credit and both history
    /// appends all happen under one critical section; a failure at any point
    /// leaves both accounts untouched. The paired history entries carry each
    /// other's account id as counterparty and share one timestamp.
    pub fn transfer(&self, from: &AccountId, to: &AccountId, amount: i64) -> LedgerResult<()> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if from == to {
            return Err(LedgerError::SameAccount);
        }
        let mut accounts = self.guard();
        // `from != to` was established above, so the disjoint lookup cannot
        // panic on overlapping keys.
        let [Some(src), Some(dst)] = accounts.get_disjoint_mut([from, to]) else {
            return Err(LedgerError::NotFound);
        };
        if src.balance < amount {
            return Err(LedgerError::InsufficientBalance);
        }

        src.balance -= amount;
        dst.balance += amount;

        let now = Utc::now();
        src.logs.push(TxLog {
            time: now,
            amount,
            direction: Direction::Out,
            counter_account: Some(to.clone()),
            note: "transfer".to_string(),
        });
        dst.logs.push(TxLog {
            time: now,
            amount,
            direction: Direction::In,
            counter_account: Some(from.clone()),
            note: "transfer".to_string(),
        });
        Ok(())
    }

    /// Full ordered history of one account.
    pub fn logs(&self, id: &AccountId) -> LedgerResult<Vec<TxLog>> {
        self.guard()
            .get(id)
            .map(|account| account.logs.clone())
            .ok_or(LedgerError::NotFound)
    }

    /// Export the whole ledger as one consistent snapshot.
    ///
    /// Taken in a single critical-section pass, so the result reflects one
    /// instant: the id counter, every account, and every history entry.
    pub fn snapshot(&self) -> Snapshot {
        let accounts = self.guard();
        Snapshot {
            meta: SnapshotMeta {
                storage: STORAGE_KIND.to_string(),
                version: SNAPSHOT_VERSION,
                timestamp: Utc::now(),
                note: "point-in-time ledger export".to_string(),
            },
            next_id: self.next_id.load(Ordering::Relaxed),
            accounts: accounts
                .values()
                .map(|account| SnapshotAccount {
                    id: account.id.clone(),
                    name: account.name.clone(),
                    balance: account.balance,
                    logs: account.logs.clone(),
                })
                .collect(),
        }
    }

    /// Replace the entire in-memory state with the snapshot's contents.
    ///
    /// Not incremental: any pre-existing accounts are discarded, and the id
    /// sequence resumes from the snapshot's counter. The snapshot is trusted
    /// as produced by [`Ledger::snapshot`]; no validation is performed.
    /// Intended as a startup step, though the shared lock makes it safe at
    /// any time.
    pub fn restore(&self, snapshot: Snapshot) {
        let mut accounts = self.guard();
        self.next_id.store(snapshot.next_id, Ordering::Relaxed);
        *accounts = snapshot
            .accounts
            .into_iter()
            .map(|sa| {
                let account = Account {
                    id: sa.id,
                    name: sa.name,
                    balance: sa.balance,
                    logs: sa.logs,
                };
                (account.id.clone(), account)
            })
            .collect();
    }
}
