//! Wallet identifiers
//!
//! Every member has two independent balance counters. Free tasks, quiz
//! rewards and signup referral bonuses land in the free wallet; premium task
//! rewards and premium referral bonuses land in the premium wallet.

use serde::{Deserialize, Serialize};

/// Which of a member's two balances an amount belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletKind {
    Free,
    Premium,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKind::Free => "FREE",
            WalletKind::Premium => "PREMIUM",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&WalletKind::Premium).unwrap(), "\"PREMIUM\"");
        let kind: WalletKind = serde_json::from_str("\"FREE\"").unwrap();
        assert_eq!(kind, WalletKind::Free);
        assert_eq!(kind.as_str(), "FREE");
    }
}
