//! Monomial building blocks and their canonical text form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The symbols a generated problem may use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Variable {
    X,
    Y,
    Z,
    A,
    B,
    C,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Variable::X,
        Variable::Y,
        Variable::Z,
        Variable::A,
        Variable::B,
        Variable::C,
    ];

    pub fn symbol(&self) -> char {
        match *self {
            Variable::X => 'x',
            Variable::Y => 'y',
            Variable::Z => 'z',
            Variable::A => 'a',
            Variable::B => 'b',
            Variable::C => 'c',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Variable> {
        Variable::ALL.iter().copied().find(|v| v.symbol() == symbol)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Coefficient 1 disappears, -1 leaves only its sign.
fn coefficient_prefix(coefficient: i64) -> String {
    match coefficient {
        1 => String::new(),
        -1 => String::from("-"),
        c => c.to_string(),
    }
}

fn power_text(variable: Variable, exponent: i32) -> String {
    if exponent == 1 {
        variable.to_string()
    } else {
        format!("{variable}^{exponent}")
    }
}

/// A single `coefficient * variable^exponent`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Term {
    pub coefficient: i64,
    pub variable: Variable,
    pub exponent: i32,
}

impl Term {
    pub fn new(coefficient: i64, variable: Variable, exponent: i32) -> Self {
        Term {
            coefficient,
            variable,
            exponent,
        }
    }

    /// Multiply two terms, combining powers of the same variable.
    pub fn multiply(&self, other: &Term) -> Monomial {
        Monomial::product(&[*self, *other])
    }

    /// Like the display form, but a zero exponent stays visible as `x^0`.
    pub fn explicit_text(&self) -> String {
        if self.exponent == 0 {
            format!("{}{}^0", coefficient_prefix(self.coefficient), self.variable)
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 0 {
            return write!(f, "{}", self.coefficient);
        }
        write!(
            f,
            "{}{}",
            coefficient_prefix(self.coefficient),
            power_text(self.variable, self.exponent)
        )
    }
}

/// A coefficient with powers of one or more variables, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial {
    coefficient: i64,
    powers: Vec<(Variable, i32)>,
}

impl Monomial {
    pub fn new(coefficient: i64) -> Self {
        Monomial {
            coefficient,
            powers: vec![],
        }
    }

    /// The product of all terms: coefficients multiply, exponents of a shared variable add.
    pub fn product(terms: &[Term]) -> Self {
        let mut res = Monomial::new(1);
        for term in terms.iter() {
            res.coefficient *= term.coefficient;
            res.add_power(term.variable, term.exponent);
        }
        res
    }

    fn add_power(&mut self, variable: Variable, exponent: i32) {
        if let Some(entry) = self.powers.iter_mut().find(|(v, _)| *v == variable) {
            entry.1 += exponent;
        } else {
            self.powers.push((variable, exponent));
        }
    }

    pub fn coefficient(&self) -> i64 {
        self.coefficient
    }

    /// Exponent of this variable, zero if it does not occur.
    pub fn exponent_of(&self, variable: Variable) -> i32 {
        self.powers
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, e)| *e)
            .unwrap_or(0)
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.powers.iter().map(|(v, _)| *v).collect()
    }

    /// Explicit operator form, `6*x^5` or `-1*x^-2`, for the evaluator.
    pub fn eval_text(&self) -> String {
        let mut res = self.coefficient.to_string();
        for (variable, exponent) in self.powers.iter().filter(|(_, e)| *e != 0) {
            res.push('*');
            res.push_str(&power_text(*variable, *exponent));
        }
        res
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numerator = self
            .powers
            .iter()
            .filter(|(_, e)| *e > 0)
            .map(|(v, e)| power_text(*v, *e))
            .collect::<String>();
        let denominator = self
            .powers
            .iter()
            .filter(|(_, e)| *e < 0)
            .map(|(v, e)| power_text(*v, -e))
            .collect::<Vec<String>>();

        if numerator.is_empty() {
            write!(f, "{}", self.coefficient)?;
        } else {
            write!(f, "{}{}", coefficient_prefix(self.coefficient), numerator)?;
        }

        match denominator.len() {
            0 => Ok(()),
            1 => write!(f, "/{}", denominator[0]),
            _ => write!(f, "/({})", denominator.concat()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_display() {
        assert_eq!(Term::new(3, Variable::X, 2).to_string(), "3x^2");
        assert_eq!(Term::new(1, Variable::Y, 2).to_string(), "y^2");
        assert_eq!(Term::new(-1, Variable::Z, 3).to_string(), "-z^3");
        assert_eq!(Term::new(5, Variable::A, 1).to_string(), "5a");
        assert_eq!(Term::new(-1, Variable::B, 1).to_string(), "-b");
        assert_eq!(Term::new(2, Variable::X, -3).to_string(), "2x^-3");
        assert_eq!(Term::new(4, Variable::X, 0).to_string(), "4");
        assert_eq!(Term::new(1, Variable::X, 0).to_string(), "1");
        assert_eq!(Term::new(-1, Variable::X, 0).to_string(), "-1");
    }

    #[test]
    fn test_term_explicit_zero() {
        assert_eq!(Term::new(4, Variable::X, 0).explicit_text(), "4x^0");
        assert_eq!(Term::new(-1, Variable::C, 0).explicit_text(), "-c^0");
        assert_eq!(Term::new(2, Variable::X, 3).explicit_text(), "2x^3");
    }

    #[test]
    fn test_multiply() {
        let p = Term::new(3, Variable::X, 2).multiply(&Term::new(2, Variable::X, 3));
        assert_eq!(p.coefficient(), 6);
        assert_eq!(p.exponent_of(Variable::X), 5);
        assert_eq!(p.to_string(), "6x^5");
        assert_eq!(p.eval_text(), "6*x^5");

        let p = Term::new(-2, Variable::Y, 1).multiply(&Term::new(3, Variable::Y, -3));
        assert_eq!(p.to_string(), "-6/y^2");
        assert_eq!(p.eval_text(), "-6*y^-2");

        let p = Term::new(1, Variable::Y, 1).multiply(&Term::new(-1, Variable::Y, -2));
        assert_eq!(p.to_string(), "-1/y");

        let p = Term::new(5, Variable::A, 2).multiply(&Term::new(-1, Variable::A, -2));
        assert_eq!(p.to_string(), "-5");
        assert_eq!(p.eval_text(), "-5");
    }

    #[test]
    fn test_monomial_display() {
        let m = Monomial::product(&[
            Term::new(2, Variable::X, 1),
            Term::new(1, Variable::Y, 3),
            Term::new(-3, Variable::X, 2),
            Term::new(1, Variable::Y, 0),
        ]);
        assert_eq!(m.variables(), vec![Variable::X, Variable::Y]);
        assert_eq!(m.to_string(), "-6x^3y^3");
        assert_eq!(m.eval_text(), "-6*x^3*y^3");

        let m = Monomial::product(&[Term::new(6, Variable::X, 1), Term::new(1, Variable::Y, -2)]);
        assert_eq!(m.to_string(), "6x/y^2");

        let m = Monomial::product(&[Term::new(1, Variable::X, -1), Term::new(1, Variable::Y, -2)]);
        assert_eq!(m.to_string(), "1/(xy^2)");

        let m = Monomial::product(&[Term::new(1, Variable::X, 0), Term::new(1, Variable::Y, 0)]);
        assert_eq!(m.to_string(), "1");
    }

    #[test]
    fn test_variable_symbols() {
        for v in Variable::ALL.iter() {
            assert_eq!(Variable::from_symbol(v.symbol()), Some(*v));
        }
        assert_eq!(Variable::from_symbol('q'), None);
    }
}
