//! Platform-wide settings
//!
//! Text shown on the landing and home screens plus the economics that drive
//! every balance rule. The admin replaces the whole record at once.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Largest amount a single ledger entry can record
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub company_name: String,
    pub notice: String,
    pub landing_text: String,
    pub youtube_link: String,
    pub facebook_link: String,
    pub telegram_link: String,
    pub whatsapp_link: String,

    /// Number members send the premium fee to
    pub contact_number: String,

    /// Premium membership fee
    pub premium_cost: u64,

    /// Credited to the upline's free wallet on signup
    pub ref_bonus: u64,

    /// Credited to the upline's premium wallet when a downline goes premium
    pub premium_ref_bonus: u64,

    /// Credited per correct quiz answer
    pub quiz_reward: u64,

    /// Quiz answers granted to a new member
    pub quiz_allowance: u32,

    /// Smallest withdrawal accepted
    pub min_withdraw: u64,

    /// Taka per job point
    pub job_point_rate: u64,

    /// Codes that always pass referral validation and credit nobody
    pub open_referral_codes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_name: "udyanit.com".to_string(),
            notice: "আমাদের অ্যাপে স্বাগতম! রেফার করে এবং টাস্ক কমপ্লিট করে আনলিমিটেড ইনকাম করুন।"
                .to_string(),
            landing_text: "বিশ্বস্ত ইনকাম সোর্স, ১০০% পেমেন্ট গ্যারান্টি।".to_string(),
            youtube_link: "https://youtube.com".to_string(),
            facebook_link: "https://facebook.com".to_string(),
            telegram_link: "https://t.me".to_string(),
            whatsapp_link: "https://wa.me/01700000000".to_string(),
            contact_number: "01700000000".to_string(),
            premium_cost: 500,
            ref_bonus: 50,
            premium_ref_bonus: 100,
            quiz_reward: 1,
            quiz_allowance: 10,
            min_withdraw: 100,
            job_point_rate: 1,
            open_referral_codes: (1..=6).map(|n| n.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn is_open_referral_code(&self, code: &str) -> bool {
        self.open_referral_codes.iter().any(|c| c == code)
    }

    /// Rejects settings that would make the balance rules meaningless
    pub fn validate(&self) -> StoreResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(StoreError::validation("company_name", "Company name is required"));
        }
        if self.premium_cost == 0 {
            return Err(StoreError::validation("premium_cost", "Premium cost must be positive"));
        }
        if self.min_withdraw == 0 {
            return Err(StoreError::validation("min_withdraw", "Minimum withdraw must be positive"));
        }
        if self.job_point_rate == 0 {
            return Err(StoreError::validation("job_point_rate", "Job point rate must be positive"));
        }
        let amounts = [
            ("premium_cost", self.premium_cost),
            ("ref_bonus", self.ref_bonus),
            ("premium_ref_bonus", self.premium_ref_bonus),
            ("quiz_reward", self.quiz_reward),
            ("min_withdraw", self.min_withdraw),
            ("job_point_rate", self.job_point_rate),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, v)| *v > MAX_AMOUNT) {
            return Err(StoreError::validation(*field, "Amount is too large"));
        }
        if self.open_referral_codes.iter().any(|c| c.trim().is_empty()) {
            return Err(StoreError::validation(
                "open_referral_codes",
                "Referral codes cannot be blank",
            ));
        }
        Ok(())
    }
}
