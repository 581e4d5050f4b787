//! Parser and evaluator for typed answers.
//!
//! Accepts sums and products of numbers, single letter variables and parenthesized groups.
//! Multiplication may be written implicitly (`2x`, `4(x - 2)`, `(3x)(2x)`, `xy`) and exponents
//! may carry a sign (`x^-2`).

use crate::error::{QuizError, Result};
use nom::branch::alt;
use nom::character::complete::{char, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_res, opt, peek, recognize};
use nom::error::{ErrorKind, ParseError, VerboseError};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;
use std::collections::{BTreeMap, BTreeSet};

/// Values for the variables in an expression.
pub type Bindings = BTreeMap<char, f64>;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(char),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }

    /// All variable symbols used in this expression.
    pub fn variables(&self) -> BTreeSet<char> {
        let mut res = BTreeSet::new();
        self.collect_variables(&mut res);
        res
    }

    fn collect_variables(&self, res: &mut BTreeSet<char>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(v) => {
                res.insert(*v);
            }
            Expr::Neg(e) => e.collect_variables(res),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => {
                l.collect_variables(res);
                r.collect_variables(res);
            }
        }
    }

    /// Evaluate with the given variable values. Every variable must be bound and the result
    /// must be finite.
    pub fn eval(&self, bindings: &Bindings) -> Result<f64> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Variable(v) => *bindings.get(v).ok_or(QuizError::UnboundVariable(*v))?,
            Expr::Neg(e) => -e.eval(bindings)?,
            Expr::Add(l, r) => l.eval(bindings)? + r.eval(bindings)?,
            Expr::Sub(l, r) => l.eval(bindings)? - r.eval(bindings)?,
            Expr::Mul(l, r) => l.eval(bindings)? * r.eval(bindings)?,
            Expr::Div(l, r) => {
                let numerator = l.eval(bindings)?;
                let denominator = r.eval(bindings)?;
                if denominator == 0.0 {
                    return Err(QuizError::DivisionByZero);
                }
                numerator / denominator
            }
            Expr::Pow(l, r) => l.eval(bindings)?.powf(r.eval(bindings)?),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(QuizError::NonFinite)
        }
    }
}

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Deepest nesting of groups, signs and exponents accepted.
pub const MAX_DEPTH: usize = 64;

/// Longest accepted input, longer chains of terms are rejected before parsing.
pub const MAX_INPUT_LEN: usize = 512;

pub fn parse_expr(input: &str) -> Result<Expr> {
    if input.len() > MAX_INPUT_LEN {
        return Err(QuizError::Parse(format!(
            "input of {} bytes exceeds {MAX_INPUT_LEN}",
            input.len()
        )));
    }
    match all_consuming(ws(|i| parse_add_sub(i, 0)))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(e) => Err(QuizError::Parse(format!("{e:?}"))),
    }
}

/// Hard failure, so alternatives are not tried on the same deep input.
fn too_deep(input: &str) -> nom::Err<VerboseError<&str>> {
    nom::Err::Failure(VerboseError::from_error_kind(input, ErrorKind::TooLarge))
}

fn parse_add_sub<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    if depth > MAX_DEPTH {
        return Err(too_deep(input));
    }
    let (rest, init) = parse_mul_div(input, depth)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), |i: &'a str| {
            parse_mul_div(i, depth)
        }),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            '-' => Expr::Sub(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

fn parse_mul_div<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    let (rest, init) = parse_unary(input, depth)?;
    fold_many0(
        alt((
            pair(ws(alt((char('*'), char('/')))), |i: &'a str| {
                parse_unary(i, depth)
            }),
            map(
                preceded(peek(ws(implicit_start)), |i: &'a str| parse_pow(i, depth)),
                |rhs| ('*', rhs),
            ),
        )),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            '/' => Expr::Div(acc.boxed(), rhs.boxed()),
            _ => unreachable!(),
        },
    )(rest)
}

/// Juxtaposition only multiplies by a group or a variable, never by a bare number.
fn implicit_start(input: &str) -> ParseResult<'_, char> {
    satisfy(|c| c == '(' || c.is_ascii_alphabetic())(input)
}

fn parse_unary<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    if depth > MAX_DEPTH {
        return Err(too_deep(input));
    }
    alt((
        map(
            preceded(ws(char('-')), |i: &'a str| parse_unary(i, depth + 1)),
            |e| Expr::Neg(e.boxed()),
        ),
        preceded(ws(char('+')), |i: &'a str| parse_unary(i, depth + 1)),
        |i: &'a str| parse_pow(i, depth),
    ))(input)
}

fn parse_pow<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    let (rest, base) = parse_primary(input, depth)?;
    match preceded(ws(char('^')), |i: &'a str| parse_unary(i, depth + 1))(rest) {
        Ok((next, exp)) => Ok((next, Expr::Pow(base.boxed(), exp.boxed()))),
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(e)),
        Err(_) => Ok((rest, base)),
    }
}

fn parse_primary<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    alt((
        |i: &'a str| parse_parens(i, depth),
        parse_number,
        parse_variable,
    ))(input)
}

fn parse_parens<'a>(input: &'a str, depth: usize) -> ParseResult<'a, Expr> {
    delimited(
        ws(char('(')),
        |i: &'a str| parse_add_sub(i, depth + 1),
        ws(char(')')),
    )(input)
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map_res(
        ws(recognize(pair(digit1, opt(pair(char('.'), digit1))))),
        |s: &str| s.parse::<f64>().map(Expr::Number),
    )(input)
}

fn parse_variable(input: &str) -> ParseResult<'_, Expr> {
    map(ws(satisfy(|c| c.is_ascii_alphabetic())), Expr::Variable)(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_at(input: &str, values: &[(char, f64)]) -> f64 {
        let bindings = values.iter().copied().collect::<Bindings>();
        parse_expr(input)
            .expect("should parse")
            .eval(&bindings)
            .expect("should evaluate")
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval_at("1 + 2 * 3", &[]), 7.0);
        assert_eq!(eval_at("(1 + 2) * 3", &[]), 9.0);
        assert_eq!(eval_at("2^3^2", &[]), 512.0);
        assert_eq!(eval_at("-2^2", &[]), -4.0);
        assert_eq!(eval_at("10 - 4 - 3", &[]), 3.0);
        assert_eq!(eval_at("12 / 3 / 2", &[]), 2.0);
        assert_eq!(eval_at("1.5 + 0.25", &[]), 1.75);
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(eval_at("4(x - 2) + 3", &[('x', 5.0)]), 15.0);
        assert_eq!(eval_at("4x - 5", &[('x', 5.0)]), 15.0);
        assert_eq!(eval_at("(3x^2)(2x^3)", &[('x', 2.0)]), 192.0);
        assert_eq!(eval_at("6x^2y^3", &[('x', 2.0), ('y', 3.0)]), 648.0);
        assert_eq!(eval_at("xy", &[('x', 2.0), ('y', 3.0)]), 6.0);
        assert_eq!(eval_at("-x", &[('x', 2.0)]), -2.0);
        assert_eq!(eval_at("2 x", &[('x', 4.0)]), 8.0);
    }

    #[test]
    fn test_negative_exponents_and_fractions() {
        assert_eq!(eval_at("x^-2", &[('x', 2.0)]), 0.25);
        assert_eq!(eval_at("6/x^2", &[('x', 2.0)]), 1.5);
        assert_eq!(eval_at("6x/y^2", &[('x', 2.0), ('y', 2.0)]), 3.0);
        assert_eq!(eval_at("1/(xy^2)", &[('x', 2.0), ('y', 2.0)]), 0.125);
        assert_eq!(eval_at("-1*x^-2", &[('x', 2.0)]), -0.25);
    }

    #[test]
    fn test_variables() {
        let e = parse_expr("3x^2 + y/(z - x)").expect("should parse");
        assert_eq!(e.variables().into_iter().collect::<String>(), "xyz");
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "   ", "2+", "x^", "(x", "x)", "2..5", "4x = 5", "3 $ 4", "x2"] {
            assert!(parse_expr(input).is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |d: usize| format!("{}x{}", "(".repeat(d), ")".repeat(d));
        assert!(parse_expr(&nested(MAX_DEPTH)).is_ok());
        assert!(matches!(
            parse_expr(&nested(MAX_DEPTH + 1)),
            Err(QuizError::Parse(_))
        ));

        let signs = |d: usize| format!("{}x", "-".repeat(d));
        assert!(parse_expr(&signs(MAX_DEPTH)).is_ok());
        assert!(parse_expr(&signs(MAX_DEPTH + 1)).is_err());

        let exponents = format!("x{}", "^x".repeat(MAX_DEPTH + 1));
        assert!(parse_expr(&exponents).is_err());
    }

    #[test]
    fn test_input_length_limit() {
        let sum = vec!["x"; 300].join("+");
        assert!(sum.len() > MAX_INPUT_LEN);
        assert!(matches!(parse_expr(&sum), Err(QuizError::Parse(_))));
        let sum = vec!["x"; 200].join("+");
        assert_eq!(eval_at(&sum, &[('x', 1.0)]), 200.0);
    }

    #[test]
    fn test_eval_errors() {
        let empty = Bindings::new();
        let e = parse_expr("x + 1").expect("should parse");
        assert!(matches!(e.eval(&empty), Err(QuizError::UnboundVariable('x'))));

        let e = parse_expr("1 / (2 - 2)").expect("should parse");
        assert!(matches!(e.eval(&empty), Err(QuizError::DivisionByZero)));

        let e = parse_expr("0^-1").expect("should parse");
        assert!(matches!(e.eval(&empty), Err(QuizError::NonFinite)));
    }
}
