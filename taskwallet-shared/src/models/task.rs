//! Earning tasks
//!
//! A task is an off-platform action (watch a video, like a page, create an
//! account) with a fixed reward. FREE tasks are open to everyone; PREMIUM
//! tasks are only offered to premium members and pay into the premium wallet.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wallet::WalletKind;

/// Task tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Free,
    Premium,
}

impl TaskType {
    /// Wallet credited when a submission for this task is approved
    pub fn wallet(&self) -> WalletKind {
        match self {
            TaskType::Free => WalletKind::Free,
            TaskType::Premium => WalletKind::Premium,
        }
    }
}

/// Platform the task is performed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    Youtube,
    Facebook,
    Tiktok,
    Gmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,

    /// Reward in taka
    pub amount: u64,

    /// Icon URL
    pub image: String,

    /// Where the member performs the task
    pub link: String,

    #[serde(rename = "type")]
    pub task_type: TaskType,

    pub category: TaskCategory,

    /// Max non-rejected submissions per member per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_per_day: Option<u32>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub amount: u64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub category: TaskCategory,
    #[serde(default)]
    pub limit_per_day: Option<u32>,
}

impl Task {
    pub fn from_new(data: NewTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            amount: data.amount,
            image: data.image,
            link: data.link,
            task_type: data.task_type,
            category: data.category,
            limit_per_day: data.limit_per_day,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.task_type == TaskType::Premium
    }
}
