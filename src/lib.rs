//! Algebra flashcards.

// Two families of problems; linear binomials like 4(x - 2) + 3 and products of powers like
// (3x^2)(2x^3). Answers are typed as text and graded either by evaluation or by comparing the
// text.

/// Error type.
pub mod error;

/// Card types and the generator trait.
pub mod traits;

/// Terms, monomials and their formatting.
pub mod term;

/// Parser and evaluator for answers.
pub mod expression;

/// Problem generators.
pub mod generator;

/// Answer comparison.
pub mod grading;

// / Settings.
pub mod config;

// / A practice set of cards.
pub mod session;

// / Storing generated sets.
pub mod deck;

pub use error::{QuizError, Result};
