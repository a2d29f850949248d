//! Demo data loaded when no snapshot exists

use chrono::NaiveDate;
use uuid::Uuid;

use super::state::State;
use crate::auth::password::hash_password;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    settings::Settings,
    task::{Task, TaskCategory, TaskType},
    user::{User, UserStatus},
};

/// Password shared by the demo members
pub const SEED_PASSWORD: &str = "123456";

fn date(y: i32, m: u32, d: u32) -> StoreResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| StoreError::Internal(format!("invalid seed date {}-{}-{}", y, m, d)))
}

/// Builds the initial state: two demo members, three tasks and default
/// settings
///
/// Seeded balances are opening balances and have no ledger entries.
pub fn seed_state() -> StoreResult<State> {
    let settings = Settings::default();
    let password_hash = hash_password(SEED_PASSWORD)?;

    let users = vec![
        User {
            id: Uuid::new_v4(),
            name: "Md. User".to_string(),
            phone: "01700000000".to_string(),
            email: "user@gmail.com".to_string(),
            password_hash: password_hash.clone(),
            ref_code: "USER01".to_string(),
            upline_code: "ADMIN01".to_string(),
            status: UserStatus::Free,
            balance_free: 120,
            balance_premium: 0,
            quiz_balance: settings.quiz_allowance,
            join_date: date(2023, 10, 1)?,
            is_blocked: false,
            ref_bonus_received: 0,
        },
        User {
            id: Uuid::new_v4(),
            name: "Pro Earner".to_string(),
            phone: "01800000000".to_string(),
            email: "pro@gmail.com".to_string(),
            password_hash,
            ref_code: "PRO99".to_string(),
            upline_code: "USER01".to_string(),
            status: UserStatus::Premium,
            balance_free: 500,
            balance_premium: 2500,
            quiz_balance: settings.quiz_allowance,
            join_date: date(2023, 11, 15)?,
            is_blocked: false,
            ref_bonus_received: 500,
        },
    ];

    let tasks = vec![
        Task {
            id: Uuid::new_v4(),
            title: "Youtube Watch & Sub".to_string(),
            description: "Watch the video for 2 minutes and subscribe.".to_string(),
            amount: 5,
            image: "https://cdn-icons-png.flaticon.com/512/1384/1384060.png".to_string(),
            link: "https://youtube.com".to_string(),
            task_type: TaskType::Free,
            category: TaskCategory::Youtube,
            limit_per_day: None,
        },
        Task {
            id: Uuid::new_v4(),
            title: "Facebook Page Like".to_string(),
            description: "Like and Follow the page.".to_string(),
            amount: 3,
            image: "https://cdn-icons-png.flaticon.com/512/124/124010.png".to_string(),
            link: "https://facebook.com".to_string(),
            task_type: TaskType::Free,
            category: TaskCategory::Facebook,
            limit_per_day: None,
        },
        Task {
            id: Uuid::new_v4(),
            title: "Premium Gmail Create".to_string(),
            description: "Create a USA verified Gmail.".to_string(),
            amount: 25,
            image: "https://cdn-icons-png.flaticon.com/512/732/732200.png".to_string(),
            link: "#".to_string(),
            task_type: TaskType::Premium,
            category: TaskCategory::Gmail,
            limit_per_day: None,
        },
    ];

    Ok(State {
        users,
        tasks,
        settings,
        ..State::default()
    })
}
