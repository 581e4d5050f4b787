use serde::{Deserialize, Serialize};

/// The problem family a card belongs to, this also determines how it is graded.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Linear,
    ProductOfPowers,
}

/// A single generated question and its answer. Immutable once created.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Flashcard {
    kind: CardKind,
    expr: String,
    answer: String,
    eval_expr: String,
}

impl Flashcard {
    pub fn new(kind: CardKind, expr: &str, answer: &str, eval_expr: &str) -> Self {
        Flashcard {
            kind,
            expr: expr.to_owned(),
            answer: answer.to_owned(),
            eval_expr: eval_expr.to_owned(),
        }
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// The expression shown on the card.
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// The correct answer, formatted for display.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The correct answer with explicit operators, used for symbolic comparison.
    pub fn eval_expr(&self) -> &str {
        &self.eval_expr
    }
}

/// Something that produces flashcards from a source of randomness.
pub trait CardGenerator: std::fmt::Debug {
    /// Create a new card, this cannot fail.
    fn generate(&self, rng: &mut dyn rand::RngCore) -> Flashcard;
}
