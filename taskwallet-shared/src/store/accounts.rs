//! Registration, referral bonuses, premium activation and account admin

use rand::Rng;
use tracing::info;
use uuid::Uuid;

use super::state::{require, today, State};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    ledger::LedgerReason,
    user::{NewUser, Team, User, UserProfile, UserStatus},
    wallet::WalletKind,
};

/// Random four-digit attempts before falling back to a longer code
const REF_CODE_ATTEMPTS: usize = 64;

impl State {
    /// Registers a member
    ///
    /// The referral code must be one of the open codes or another member's
    /// code. In the latter case that member (the upline) is credited the
    /// signup bonus once, here.
    pub fn register(&mut self, data: NewUser) -> StoreResult<User> {
        let phone = data.phone.trim();
        require("phone", phone, "Phone is required")?;
        require("name", &data.name, "Name is required")?;

        if self.user_by_phone(phone).is_some() {
            return Err(StoreError::conflict("Phone already registered"));
        }

        let code = data.ref_code.trim();
        let upline_id = match self.user_by_ref_code(code) {
            Some(upline) if !code.is_empty() => Some(upline.id),
            _ if self.settings.is_open_referral_code(code) => None,
            _ => {
                return Err(StoreError::validation(
                    "ref_code",
                    "Invalid referral code",
                ))
            }
        };

        let user = User {
            id: Uuid::new_v4(),
            name: data.name.trim().to_string(),
            phone: phone.to_string(),
            email: data.email.trim().to_string(),
            password_hash: data.password_hash,
            ref_code: self.generate_ref_code(),
            upline_code: code.to_string(),
            status: UserStatus::Free,
            balance_free: 0,
            balance_premium: 0,
            quiz_balance: self.settings.quiz_allowance,
            join_date: today(),
            is_blocked: false,
            ref_bonus_received: 0,
        };
        let user_id = user.id;

        // Nothing may fail once the new member is stored
        if let Some(upline_id) = upline_id {
            let bonus = self.settings.ref_bonus;
            self.credit(upline_id, WalletKind::Free, bonus, LedgerReason::ReferralBonus, user_id)?;
            let upline = self.user_mut(upline_id)?;
            upline.ref_bonus_received = upline.ref_bonus_received.saturating_add(bonus);
            info!(user_id = %user_id, upline_id = %upline_id, bonus, "Referral bonus credited");
        }
        self.users.push(user);

        info!(user_id = %user_id, "User registered");
        self.user(user_id).cloned()
    }

    /// `"REF"` followed by four random digits, unique among members
    fn generate_ref_code(&self) -> String {
        let mut rng = rand::thread_rng();
        for _ in 0..REF_CODE_ATTEMPTS {
            let code = format!("REF{}", rng.gen_range(1000..10000));
            if self.user_by_ref_code(&code).is_none() {
                return code;
            }
        }
        loop {
            let code = format!("REF{}", rng.gen_range(100_000..1_000_000));
            if self.user_by_ref_code(&code).is_none() {
                return code;
            }
        }
    }

    /// Replaces a member's password hash
    pub fn set_password_hash(&mut self, user_id: Uuid, password_hash: String) -> StoreResult<()> {
        self.user_mut(user_id)?.password_hash = password_hash;
        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Blocks or unblocks a member
    pub fn set_blocked(&mut self, user_id: Uuid, blocked: bool) -> StoreResult<UserProfile> {
        let user = self.user_mut(user_id)?;
        user.is_blocked = blocked;
        info!(user_id = %user_id, blocked, "User block state changed");
        Ok(user.profile())
    }

    /// Upgrades a member to premium
    ///
    /// The upline, if any, earns the premium referral bonus in their premium
    /// wallet. Upgrading twice is a conflict, so the bonus is paid once.
    pub fn activate_premium(&mut self, user_id: Uuid) -> StoreResult<UserProfile> {
        let user = self.user(user_id)?;
        if user.is_premium() {
            return Err(StoreError::conflict("User is already premium"));
        }

        let upline_id = self
            .user_by_ref_code(&user.upline_code)
            .filter(|upline| upline.id != user_id)
            .map(|upline| upline.id);

        if let Some(upline_id) = upline_id {
            let bonus = self.settings.premium_ref_bonus;
            self.credit(
                upline_id,
                WalletKind::Premium,
                bonus,
                LedgerReason::PremiumReferralBonus,
                user_id,
            )?;
            info!(user_id = %user_id, upline_id = %upline_id, bonus, "Premium referral bonus credited");
        }

        let user = self.user_mut(user_id)?;
        user.status = UserStatus::Premium;
        info!(user_id = %user_id, "Premium activated");
        Ok(user.profile())
    }

    /// Members who registered with this member's referral code
    pub fn team(&self, user_id: Uuid) -> StoreResult<Team> {
        let code = &self.user(user_id)?.ref_code;

        let members: Vec<UserProfile> = self
            .users
            .iter()
            .filter(|u| &u.upline_code == code)
            .map(User::profile)
            .collect();
        let premium_members = members
            .iter()
            .filter(|m| m.status == UserStatus::Premium)
            .count();

        Ok(Team {
            total_members: members.len(),
            premium_members,
            members,
        })
    }
}
