//! Random question selection for quiz rounds.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::QuestionRef;

/// Which questions a quiz round draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl From<i64> for QuizScope {
    /// `0` selects every category.
    fn from(category: i64) -> Self {
        match category {
            0 => QuizScope::All,
            id => QuizScope::Category(id),
        }
    }
}

impl QuizScope {
    pub fn contains(&self, question: &QuestionRef) -> bool {
        match self {
            QuizScope::All => true,
            QuizScope::Category(id) => question.category == *id,
        }
    }

    pub fn label(&self) -> String {
        match self {
            QuizScope::All => "all".to_owned(),
            QuizScope::Category(id) => id.to_string(),
        }
    }
}

/// Picks the next question id uniformly from the questions in `scope` that are
/// not in `previous`. `None` means the round is complete.
pub fn select_next<R: Rng + ?Sized>(
    pool: &[QuestionRef],
    scope: QuizScope,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Option<i64> {
    let eligible: Vec<i64> = pool
        .iter()
        .filter(|q| scope.contains(q) && !previous.contains(&q.id))
        .map(|q| q.id)
        .collect();
    eligible.choose(rng).copied()
}
