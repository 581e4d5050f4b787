//! Comparing typed answers with the expected answer of a card.

use crate::error::Result;
use crate::expression::{parse_expr, Bindings};
use crate::traits::{CardKind, Flashcard};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Maximum absolute difference for two evaluations to count as equal.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Values substituted for variables during symbolic comparison. Zero and one are left out, they
/// make too many wrong answers look right.
pub const SUBSTITUTION_RANGE: RangeInclusive<i64> = 2..=9;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingStrategy {
    /// Evaluate both sides at a random point.
    Symbolic,
    /// Compare the text with whitespace removed.
    Literal,
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whitespace removed and lowercased.
pub fn normalize(input: &str) -> String {
    strip_whitespace(input).to_lowercase()
}

pub fn literal_equivalent(input: &str, expected: &str) -> bool {
    strip_whitespace(input) == strip_whitespace(expected)
}

/// True if both expressions evaluate to the same value at one random substitution. Anything that
/// fails to parse or evaluate is not equivalent.
pub fn symbolic_equivalent(
    input: &str,
    expected: &str,
    tolerance: f64,
    rng: &mut dyn RngCore,
) -> bool {
    match evaluate_pair(input, expected, rng) {
        Ok((given, truth)) => (given - truth).abs() < tolerance,
        Err(e) => {
            log::debug!("answer {input:?} for {expected:?} graded incorrect: {e}");
            false
        }
    }
}

fn evaluate_pair(input: &str, expected: &str, rng: &mut dyn RngCore) -> Result<(f64, f64)> {
    let given = parse_expr(&normalize(input))?;
    let truth = parse_expr(expected)?;
    let bindings = truth
        .variables()
        .into_iter()
        .map(|v| (v, rng.gen_range(SUBSTITUTION_RANGE) as f64))
        .collect::<Bindings>();
    Ok((given.eval(&bindings)?, truth.eval(&bindings)?))
}

/// Picks the comparison to use for each kind of card.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Grader {
    pub linear: GradingStrategy,
    pub product_of_powers: GradingStrategy,
    pub tolerance: f64,
}

impl Default for Grader {
    fn default() -> Self {
        Grader {
            linear: GradingStrategy::Symbolic,
            product_of_powers: GradingStrategy::Literal,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Grader {
    pub fn strategy(&self, kind: CardKind) -> GradingStrategy {
        match kind {
            CardKind::Linear => self.linear,
            CardKind::ProductOfPowers => self.product_of_powers,
        }
    }

    pub fn grade(&self, card: &Flashcard, input: &str, rng: &mut dyn RngCore) -> bool {
        match self.strategy(card.kind()) {
            GradingStrategy::Literal => literal_equivalent(input, card.answer()),
            GradingStrategy::Symbolic => {
                symbolic_equivalent(input, card.eval_expr(), self.tolerance, rng)
            }
        }
    }
}
