//! Random problem construction for both card families.

use crate::term::{Monomial, Term, Variable};
use crate::traits::{CardGenerator, CardKind, Flashcard};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::ops::RangeInclusive;

const POWERS_COEFFICIENTS: RangeInclusive<i64> = -6..=6;

fn nonzero_in(rng: &mut dyn RngCore, range: RangeInclusive<i64>) -> i64 {
    loop {
        let v = rng.gen_range(range.clone());
        if v != 0 {
            return v;
        }
    }
}

fn choose_variable(rng: &mut dyn RngCore) -> Variable {
    *Variable::ALL.choose(rng).unwrap_or(&Variable::X)
}

/// `a(x ± b) ± c`, which simplifies to `ax + b'`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LinearProblem {
    coefficient: i64,
    inner: i64,
    constant: i64,
}

impl LinearProblem {
    /// Values are expected within the generator's ranges.
    pub(crate) fn new(coefficient: i64, inner: i64, constant: i64) -> Self {
        LinearProblem {
            coefficient,
            inner,
            constant,
        }
    }

    pub fn generate(rng: &mut dyn RngCore) -> Self {
        LinearProblem {
            coefficient: rng.gen_range(1..=5),
            inner: nonzero_in(rng, -4..=4),
            constant: rng.gen_range(-5..=4),
        }
    }

    /// Coefficient and constant of the simplified `ax + b'`.
    pub fn simplified(&self) -> (i64, i64) {
        (
            self.coefficient,
            self.coefficient * self.inner + self.constant,
        )
    }

    pub fn expression(&self) -> String {
        let inner = match self.inner {
            b if b > 0 => format!("x + {b}"),
            b if b < 0 => format!("x - {}", b.unsigned_abs()),
            _ => String::from("x"),
        };
        let mut res = match self.coefficient {
            1 => format!("({inner})"),
            -1 => format!("-({inner})"),
            a => format!("{a}({inner})"),
        };
        res.push_str(&signed_suffix(self.constant));
        res
    }

    pub fn answer(&self) -> String {
        let (a, b) = self.simplified();
        let mut res = match a {
            1 => String::from("x"),
            -1 => String::from("-x"),
            a => format!("{a}x"),
        };
        res.push_str(&signed_suffix(b));
        res
    }

    pub fn eval_expr(&self) -> String {
        let (a, b) = self.simplified();
        format!("{a}*x{}", signed_suffix(b))
    }

    pub fn to_flashcard(&self) -> Flashcard {
        Flashcard::new(
            CardKind::Linear,
            &self.expression(),
            &self.answer(),
            &self.eval_expr(),
        )
    }
}

/// ` + c`, ` - |c|`, or nothing for zero.
fn signed_suffix(value: i64) -> String {
    match value {
        v if v > 0 => format!(" + {v}"),
        v if v < 0 => format!(" - {}", v.unsigned_abs()),
        _ => String::new(),
    }
}

/// The four shapes of a product of powers problem.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PowersProblem {
    /// One variable, both exponents positive.
    PositiveExponents { left: Term, right: Term },
    /// One variable, the right exponent is negative.
    NegativeExponents { left: Term, right: Term },
    /// One variable, the right exponent is zero.
    ZeroExponent { left: Term, right: Term },
    /// Each factor is `a * v1^m * v2^n` with non-negative exponents, not both zero.
    TwoVariables { left: [Term; 2], right: [Term; 2] },
}

impl PowersProblem {
    pub fn generate(rng: &mut dyn RngCore) -> Self {
        let a = nonzero_in(rng, POWERS_COEFFICIENTS);
        let b = nonzero_in(rng, POWERS_COEFFICIENTS);
        let v1 = choose_variable(rng);
        match rng.gen_range(0..4) {
            0 => PowersProblem::PositiveExponents {
                left: Term::new(a, v1, rng.gen_range(1..=4)),
                right: Term::new(b, v1, rng.gen_range(1..=4)),
            },
            1 => PowersProblem::NegativeExponents {
                left: Term::new(a, v1, rng.gen_range(1..=4)),
                right: Term::new(b, v1, rng.gen_range(-4..=-1)),
            },
            2 => PowersProblem::ZeroExponent {
                left: Term::new(a, v1, rng.gen_range(1..=4)),
                right: Term::new(b, v1, 0),
            },
            _ => {
                let others = Variable::ALL
                    .iter()
                    .copied()
                    .filter(|v| *v != v1)
                    .collect::<Vec<Variable>>();
                let v2 = *others.choose(rng).unwrap_or(&Variable::Y);
                let (m, n) = two_variable_exponents(rng);
                let (p, q) = two_variable_exponents(rng);
                PowersProblem::TwoVariables {
                    left: [Term::new(a, v1, m), Term::new(1, v2, n)],
                    right: [Term::new(b, v1, p), Term::new(1, v2, q)],
                }
            }
        }
    }

    /// All factors of the product, left to right.
    pub fn terms(&self) -> Vec<Term> {
        match *self {
            PowersProblem::PositiveExponents { left, right }
            | PowersProblem::NegativeExponents { left, right }
            | PowersProblem::ZeroExponent { left, right } => vec![left, right],
            PowersProblem::TwoVariables { left, right } => {
                left.iter().chain(right.iter()).copied().collect()
            }
        }
    }

    /// The simplified product.
    pub fn product(&self) -> Monomial {
        Monomial::product(&self.terms())
    }

    pub fn expression(&self) -> String {
        match self {
            PowersProblem::PositiveExponents { left, right }
            | PowersProblem::NegativeExponents { left, right } => format!("({left})({right})"),
            PowersProblem::ZeroExponent { left, right } => {
                format!("({left})({})", right.explicit_text())
            }
            PowersProblem::TwoVariables { left, right } => format!(
                "({})({})",
                Monomial::product(left),
                Monomial::product(right)
            ),
        }
    }

    pub fn to_flashcard(&self) -> Flashcard {
        let product = self.product();
        Flashcard::new(
            CardKind::ProductOfPowers,
            &self.expression(),
            &product.to_string(),
            &product.eval_text(),
        )
    }
}

/// Exponents for one factor of a two variable product, at least one of them nonzero.
fn two_variable_exponents(rng: &mut dyn RngCore) -> (i32, i32) {
    loop {
        let m = rng.gen_range(0..=4);
        let n = rng.gen_range(0..=4);
        if m != 0 || n != 0 {
            return (m, n);
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct LinearGenerator;

impl CardGenerator for LinearGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Flashcard {
        let problem = LinearProblem::generate(rng);
        log::debug!("generated linear problem {problem:?}");
        problem.to_flashcard()
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct PowersGenerator;

impl CardGenerator for PowersGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Flashcard {
        let problem = PowersProblem::generate(rng);
        log::debug!("generated powers problem {problem:?}");
        problem.to_flashcard()
    }
}

/// Picks either family with equal probability for every card.
#[derive(Debug, Default, Copy, Clone)]
pub struct MixedGenerator;

impl CardGenerator for MixedGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Flashcard {
        if rng.gen_bool(0.5) {
            LinearGenerator.generate(rng)
        } else {
            PowersGenerator.generate(rng)
        }
    }
}
