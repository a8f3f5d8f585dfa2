//! Linear restrictions on named coefficients, written as text.
//!
//! A restriction is `lhs = rhs` where each side is a sum of terms. A term is a
//! coefficient name, a number, or a number times a name:
//!
//! ```rust
//! use linear_lab::inference::Restriction;
//!
//! let r: Restriction = "2*x + const = 0.5".parse().unwrap();
//! assert_eq!(r.weight("x"), 2.0);
//! assert_eq!(r.weight("const"), 1.0);
//! assert_eq!(r.rhs(), 0.5);
//! ```
//!
//! Terms can appear on either side; the restriction is normalised to
//! `Σ wᵢ βᵢ = q`. Text without `=` means `= 0`.

use crate::error::{LinearLabError, Result};
use nalgebra::DVector;
use std::fmt;
use std::str::FromStr;

/// One linear constraint `Σ wᵢ βᵢ = q`.
#[derive(Clone, Debug, PartialEq)]
pub struct Restriction {
    input: String,
    terms: Vec<(String, f64)>,
    rhs: f64,
}

impl Restriction {
    /// Parses a comma-separated list such as `"z = 0, const = 0"`.
    pub fn parse_list(input: &str) -> Result<Vec<Restriction>> {
        input.split(',').map(str::parse).collect()
    }

    /// The text the restriction was parsed from.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Weight on coefficient `name`; zero when it does not appear.
    pub fn weight(&self, name: &str) -> f64 {
        self.terms
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0.0, |(_, w)| *w)
    }

    /// Coefficient names with nonzero weight.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(n, _)| n.as_str())
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Row of the restriction matrix for coefficients ordered as `names`.
    ///
    /// # Errors
    /// [`LinearLabError::InvalidRestriction`] if a term names a coefficient
    /// that is not in `names`.
    pub fn row(&self, names: &[String]) -> Result<DVector<f64>> {
        let mut row = DVector::zeros(names.len());
        for (name, weight) in &self.terms {
            let idx = names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| self.invalid(format!("unknown coefficient `{}`", name)))?;
            row[idx] = *weight;
        }
        Ok(row)
    }

    fn invalid(&self, reason: String) -> LinearLabError {
        LinearLabError::InvalidRestriction {
            input: self.input.clone(),
            reason,
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, w)) in self.terms.iter().enumerate() {
            let sign = if *w < 0.0 { "-" } else { "+" };
            match (i, w.abs() == 1.0) {
                (0, true) if *w > 0.0 => write!(f, "{}", name)?,
                (0, true) => write!(f, "-{}", name)?,
                (0, false) => write!(f, "{}*{}", w, name)?,
                (_, true) => write!(f, " {} {}", sign, name)?,
                (_, false) => write!(f, " {} {}*{}", sign, w.abs(), name)?,
            }
        }
        write!(f, " = {}", self.rhs)
    }
}

impl FromStr for Restriction {
    type Err = LinearLabError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim().to_string();
        let fail = |reason: &str| LinearLabError::InvalidRestriction {
            input: input.clone(),
            reason: reason.to_string(),
        };

        let mut sides = input.split('=');
        let lhs = sides.next().unwrap_or_default();
        let rhs = sides.next();
        if sides.next().is_some() {
            return Err(fail("more than one `=`"));
        }

        let mut terms: Vec<(String, f64)> = Vec::new();
        let mut constant = 0.0;

        let mut absorb = |side: &str, sign: f64| -> Result<()> {
            for term in parse_side(side).map_err(|reason| fail(&reason))? {
                match term.name {
                    Some(name) => match terms.iter_mut().find(|(n, _)| *n == name) {
                        Some((_, w)) => *w += sign * term.value,
                        None => terms.push((name, sign * term.value)),
                    },
                    // Constants move to the right-hand side.
                    None => constant -= sign * term.value,
                }
            }
            Ok(())
        };
        absorb(lhs, 1.0)?;
        if let Some(rhs) = rhs {
            absorb(rhs, -1.0)?;
        }

        terms.retain(|(_, w)| *w != 0.0);
        if terms.is_empty() {
            return Err(fail("restriction involves no coefficient"));
        }

        Ok(Self {
            input,
            terms,
            rhs: constant,
        })
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Plus,
    Minus,
    Star,
}

struct Term {
    name: Option<String>,
    value: f64,
}

fn tokenize(side: &str) -> std::result::Result<Vec<Token>, String> {
    let chars: Vec<char> = side.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() {
                    let d = chars[i];
                    let exp_sign = (d == '+' || d == '-')
                        && matches!(chars.get(i.wrapping_sub(1)), Some('e') | Some('E'));
                    if d.is_ascii_alphanumeric() || d == '.' || exp_sign {
                        i += 1;
                    } else {
                        break;
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| format!("malformed number `{}`", text))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Name(chars[start..i].iter().collect()));
            }
            other => return Err(format!("unexpected character `{}`", other)),
        }
    }
    Ok(tokens)
}

fn parse_side(side: &str) -> std::result::Result<Vec<Term>, String> {
    let tokens = tokenize(side)?;
    if tokens.is_empty() {
        return Err("empty side".to_string());
    }

    let mut terms = Vec::new();
    let mut iter = tokens.into_iter().peekable();
    let mut first = true;
    while iter.peek().is_some() {
        let mut sign = 1.0;
        match iter.peek() {
            Some(Token::Plus) => {
                iter.next();
            }
            Some(Token::Minus) => {
                iter.next();
                sign = -1.0;
            }
            _ if !first => return Err("expected `+` or `-` between terms".to_string()),
            _ => {}
        }
        first = false;

        let mut value = sign;
        let mut name: Option<String> = None;
        let mut expect_factor = true;
        while let Some(token) = iter.peek() {
            match token {
                Token::Plus | Token::Minus => break,
                Token::Star if !expect_factor => {
                    iter.next();
                    expect_factor = true;
                }
                Token::Star => return Err("misplaced `*`".to_string()),
                Token::Number(_) | Token::Name(_) if !expect_factor => {
                    return Err("expected `+` or `-` between terms".to_string())
                }
                Token::Number(n) => {
                    value *= n;
                    iter.next();
                    expect_factor = false;
                }
                Token::Name(_) => {
                    if name.is_some() {
                        return Err("a term may hold only one coefficient".to_string());
                    }
                    if let Some(Token::Name(n)) = iter.next() {
                        name = Some(n);
                    }
                    expect_factor = false;
                }
            }
        }
        if expect_factor {
            return Err("missing term".to_string());
        }
        terms.push(Term { name, value });
    }
    Ok(terms)
}
