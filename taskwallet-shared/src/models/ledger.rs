//! Balance ledger with hash chaining
//!
//! Every change to a wallet balance appends one [`LedgerEntry`]. Entries form
//! a tamper-evident chain:
//!
//! - `hash_prev`: hex SHA-256 of the previous entry (`None` for seq 0)
//! - `hash_curr`: hex SHA-256 of
//!   `(hash_prev || seq || user_id || wallet || delta || reason || reference)`
//!
//! Editing any entry, or any balance in the snapshot file without a matching
//! entry, is detectable with [`Ledger::verify_chain`] and
//! [`Ledger::net_for`].
//!
//! # Example
//!
//! ```
//! use taskwallet_shared::models::ledger::{Ledger, LedgerReason};
//! use taskwallet_shared::models::wallet::WalletKind;
//! use uuid::Uuid;
//!
//! let mut ledger = Ledger::default();
//! let user = Uuid::new_v4();
//! ledger.append(user, WalletKind::Free, 50, LedgerReason::ReferralBonus, Uuid::new_v4());
//! ledger.append(user, WalletKind::Free, -50, LedgerReason::WithdrawalHold, Uuid::new_v4());
//!
//! assert!(ledger.verify_chain());
//! assert_eq!(ledger.net_for(user, WalletKind::Free), 0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::wallet::WalletKind;

/// Why a balance moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerReason {
    ReferralBonus,
    PremiumReferralBonus,
    TaskReward,
    QuizReward,
    WithdrawalHold,
    WithdrawalRefund,
}

impl LedgerReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerReason::ReferralBonus => "REFERRAL_BONUS",
            LedgerReason::PremiumReferralBonus => "PREMIUM_REFERRAL_BONUS",
            LedgerReason::TaskReward => "TASK_REWARD",
            LedgerReason::QuizReward => "QUIZ_REWARD",
            LedgerReason::WithdrawalHold => "WITHDRAWAL_HOLD",
            LedgerReason::WithdrawalRefund => "WITHDRAWAL_REFUND",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Position in the chain, starting at 0
    pub seq: u64,

    pub ts: DateTime<Utc>,

    pub user_id: Uuid,

    pub wallet: WalletKind,

    /// Signed change in taka
    pub delta: i64,

    pub reason: LedgerReason,

    /// ID of the submission, withdrawal, user or quiz that caused the change
    pub reference: Uuid,

    pub hash_prev: Option<String>,

    pub hash_curr: String,
}

impl LedgerEntry {
    /// Computes the chained hash for an entry
    pub fn compute_hash(
        hash_prev: Option<&str>,
        seq: u64,
        user_id: Uuid,
        wallet: WalletKind,
        delta: i64,
        reason: LedgerReason,
        reference: Uuid,
    ) -> String {
        let mut hasher = Sha256::new();

        if let Some(prev) = hash_prev {
            hasher.update(prev.as_bytes());
        }
        hasher.update(seq.to_le_bytes());
        hasher.update(user_id.as_bytes());
        hasher.update(wallet.as_str().as_bytes());
        hasher.update(delta.to_le_bytes());
        hasher.update(reason.as_str().as_bytes());
        hasher.update(reference.as_bytes());

        hex::encode(hasher.finalize())
    }
}

/// Append-only list of ledger entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Appends an entry, computing its sequence number and hash
    pub fn append(
        &mut self,
        user_id: Uuid,
        wallet: WalletKind,
        delta: i64,
        reason: LedgerReason,
        reference: Uuid,
    ) -> &LedgerEntry {
        let seq = self.entries.len() as u64;
        let hash_prev = self.entries.last().map(|e| e.hash_curr.clone());
        let hash_curr = LedgerEntry::compute_hash(
            hash_prev.as_deref(),
            seq,
            user_id,
            wallet,
            delta,
            reason,
            reference,
        );

        self.entries.push(LedgerEntry {
            seq,
            ts: Utc::now(),
            user_id,
            wallet,
            delta,
            reason,
            reference,
            hash_prev,
            hash_curr,
        });

        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one member, newest first
    pub fn for_user(&self, user_id: Uuid) -> Vec<LedgerEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Sum of all deltas recorded for a member's wallet
    pub fn net_for(&self, user_id: Uuid, wallet: WalletKind) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.user_id == user_id && e.wallet == wallet)
            .map(|e| e.delta)
            .sum()
    }

    /// Recomputes every hash and checks the links between entries
    pub fn verify_chain(&self) -> bool {
        let mut prev_hash: Option<&str> = None;

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.seq != index as u64 {
                return false;
            }
            if entry.hash_prev.as_deref() != prev_hash {
                return false;
            }

            let computed = LedgerEntry::compute_hash(
                prev_hash,
                entry.seq,
                entry.user_id,
                entry.wallet,
                entry.delta,
                entry.reason,
                entry.reference,
            );
            if computed != entry.hash_curr {
                return false;
            }

            prev_hash = Some(&entry.hash_curr);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_hash_is_deterministic() {
        let user = Uuid::new_v4();
        let reference = Uuid::new_v4();

        let hash1 = LedgerEntry::compute_hash(None, 0, user, WalletKind::Free, 5, LedgerReason::TaskReward, reference);
        let hash2 = LedgerEntry::compute_hash(None, 0, user, WalletKind::Free, 5, LedgerReason::TaskReward, reference);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_compute_hash_includes_all_fields() {
        let user = Uuid::new_v4();
        let reference = Uuid::new_v4();
        let base = LedgerEntry::compute_hash(None, 0, user, WalletKind::Free, 5, LedgerReason::TaskReward, reference);

        assert_ne!(base, LedgerEntry::compute_hash(Some("ab"), 0, user, WalletKind::Free, 5, LedgerReason::TaskReward, reference));
        assert_ne!(base, LedgerEntry::compute_hash(None, 1, user, WalletKind::Free, 5, LedgerReason::TaskReward, reference));
        assert_ne!(base, LedgerEntry::compute_hash(None, 0, Uuid::new_v4(), WalletKind::Free, 5, LedgerReason::TaskReward, reference));
        assert_ne!(base, LedgerEntry::compute_hash(None, 0, user, WalletKind::Premium, 5, LedgerReason::TaskReward, reference));
        assert_ne!(base, LedgerEntry::compute_hash(None, 0, user, WalletKind::Free, 6, LedgerReason::TaskReward, reference));
        assert_ne!(base, LedgerEntry::compute_hash(None, 0, user, WalletKind::Free, 5, LedgerReason::QuizReward, reference));
        assert_ne!(base, LedgerEntry::compute_hash(None, 0, user, WalletKind::Free, 5, LedgerReason::TaskReward, Uuid::new_v4()));
    }

    #[test]
    fn test_append_links_entries() {
        let mut ledger = Ledger::default();
        let user = Uuid::new_v4();

        let first = ledger
            .append(user, WalletKind::Free, 50, LedgerReason::ReferralBonus, Uuid::new_v4())
            .clone();
        let second = ledger
            .append(user, WalletKind::Premium, 25, LedgerReason::TaskReward, Uuid::new_v4())
            .clone();

        assert_eq!(first.seq, 0);
        assert!(first.hash_prev.is_none());
        assert_eq!(second.seq, 1);
        assert_eq!(second.hash_prev.as_deref(), Some(first.hash_curr.as_str()));
        assert!(ledger.verify_chain());
    }

    #[test]
    fn test_tampering_breaks_chain() {
        let mut ledger = Ledger::default();
        let user = Uuid::new_v4();
        ledger.append(user, WalletKind::Free, 5, LedgerReason::TaskReward, Uuid::new_v4());
        ledger.append(user, WalletKind::Free, 3, LedgerReason::TaskReward, Uuid::new_v4());

        ledger.entries[0].delta = 500;
        assert!(!ledger.verify_chain());
    }

    #[test]
    fn test_for_user_newest_first_and_net() {
        let mut ledger = Ledger::default();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        ledger.append(alice, WalletKind::Free, 150, LedgerReason::TaskReward, Uuid::new_v4());
        ledger.append(bob, WalletKind::Free, 50, LedgerReason::ReferralBonus, Uuid::new_v4());
        ledger.append(alice, WalletKind::Free, -100, LedgerReason::WithdrawalHold, Uuid::new_v4());

        let history = ledger.for_user(alice);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].reason, LedgerReason::WithdrawalHold);
        assert_eq!(ledger.net_for(alice, WalletKind::Free), 50);
        assert_eq!(ledger.net_for(alice, WalletKind::Premium), 0);
    }
}
