//! Arithmetic quiz
//!
//! Each member has at most one open question. Questions live only in memory;
//! after a restart a member simply gets a fresh one.

use rand::Rng;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::state::State;
use crate::error::{StoreError, StoreResult};
use crate::models::{ledger::LedgerReason, wallet::WalletKind};

/// An `a + b` question, operands 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuizQuestion {
    pub a: u8,
    pub b: u8,
}

impl QuizQuestion {
    fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            a: rng.gen_range(0..10),
            b: rng.gen_range(0..10),
        }
    }

    fn answer(&self) -> u32 {
        u32::from(self.a) + u32::from(self.b)
    }
}

/// The open question as shown to a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub a: u8,
    pub b: u8,
    /// Correct answers the member may still give
    pub remaining: u32,
}

/// Result of a correct answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub reward: u64,
    pub balance_free: u64,
    pub next: QuizView,
}

impl State {
    /// The member's open question, creating one if needed
    pub fn next_quiz(&mut self, user_id: Uuid) -> StoreResult<QuizView> {
        let remaining = self.user(user_id)?.quiz_balance;
        let question = *self
            .quizzes
            .entry(user_id)
            .or_insert_with(QuizQuestion::random);

        Ok(QuizView {
            a: question.a,
            b: question.b,
            remaining,
        })
    }

    /// Checks an answer; a correct one pays `quiz_reward` into the free wallet
    pub fn answer_quiz(&mut self, user_id: Uuid, answer: u32) -> StoreResult<QuizOutcome> {
        if self.user(user_id)?.quiz_balance == 0 {
            return Err(StoreError::validation("answer", "No quiz balance remaining"));
        }
        let question = self
            .quizzes
            .get(&user_id)
            .copied()
            .ok_or_else(|| StoreError::not_found("Quiz question not found"))?;
        if question.answer() != answer {
            return Err(StoreError::validation("answer", "Wrong answer"));
        }

        let reward = self.settings.quiz_reward;
        self.credit(user_id, WalletKind::Free, reward, LedgerReason::QuizReward, Uuid::new_v4())?;
        self.user_mut(user_id)?.quiz_balance -= 1;
        self.quizzes.remove(&user_id);
        info!(user_id = %user_id, reward, "Quiz answered");

        let next = self.next_quiz(user_id)?;
        let balance_free = self.user(user_id)?.balance_free;
        Ok(QuizOutcome {
            reward,
            balance_free,
            next,
        })
    }
}
