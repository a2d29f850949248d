//! Member accounts
//!
//! Members log in by phone number. Each carries two wallets, a referral code
//! of their own, and the code of the member who referred them (their upline).
//!
//! The stored [`User`] includes the password hash and is only ever written
//! to the snapshot; anything sent to a client goes through [`UserProfile`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wallet::WalletKind;

/// Membership tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Free,
    Premium,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Free => "FREE",
            UserStatus::Premium => "PREMIUM",
        }
    }
}

/// Member account as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Phone number, unique, used to log in
    pub phone: String,

    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// This member's own referral code, unique
    pub ref_code: String,

    /// Referral code used at registration
    pub upline_code: String,

    pub status: UserStatus,

    /// Free wallet balance (taka)
    pub balance_free: u64,

    /// Premium wallet balance (taka)
    pub balance_premium: u64,

    /// Quiz questions this member may still answer for a reward
    pub quiz_balance: u32,

    pub join_date: NaiveDate,

    /// Blocked members cannot log in or act
    pub is_blocked: bool,

    /// Total signup referral bonus earned so far
    pub ref_bonus_received: u64,
}

impl User {
    pub fn is_premium(&self) -> bool {
        self.status == UserStatus::Premium
    }

    /// Balance of the given wallet
    pub fn balance(&self, wallet: WalletKind) -> u64 {
        match wallet {
            WalletKind::Free => self.balance_free,
            WalletKind::Premium => self.balance_premium,
        }
    }

    /// Mutable access to the given wallet's counter
    pub(crate) fn balance_mut(&mut self, wallet: WalletKind) -> &mut u64 {
        match wallet {
            WalletKind::Free => &mut self.balance_free,
            WalletKind::Premium => &mut self.balance_premium,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// Client-facing view of a member (no password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub ref_code: String,
    pub upline_code: String,
    pub status: UserStatus,
    pub balance_free: u64,
    pub balance_premium: u64,
    pub quiz_balance: u32,
    pub join_date: NaiveDate,
    pub is_blocked: bool,
    pub ref_bonus_received: u64,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            ref_code: user.ref_code.clone(),
            upline_code: user.upline_code.clone(),
            status: user.status,
            balance_free: user.balance_free,
            balance_premium: user.balance_premium,
            quiz_balance: user.quiz_balance,
            join_date: user.join_date,
            is_blocked: user.is_blocked,
            ref_bonus_received: user.ref_bonus_received,
        }
    }
}

/// Input for registering a member
///
/// `password_hash` is computed by the caller before the store lock is taken.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub ref_code: String,
}

/// A member's downline summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub total_members: usize,
    pub premium_members: usize,
    pub members: Vec<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Md. User".to_string(),
            phone: "01700000000".to_string(),
            email: "user@gmail.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            ref_code: "USER01".to_string(),
            upline_code: "ADMIN01".to_string(),
            status: UserStatus::Free,
            balance_free: 120,
            balance_premium: 0,
            quiz_balance: 10,
            join_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            is_blocked: false,
            ref_bonus_received: 0,
        }
    }

    #[test]
    fn test_balance_by_wallet() {
        let mut user = sample();
        *user.balance_mut(WalletKind::Premium) += 25;

        assert_eq!(user.balance(WalletKind::Free), 120);
        assert_eq!(user.balance(WalletKind::Premium), 25);
    }

    #[test]
    fn test_profile_hides_password_hash() {
        let profile = sample().profile();
        let json = serde_json::to_value(&profile).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["status"], "FREE");
        assert_eq!(json["join_date"], "2023-10-01");
    }
}
