//! Constrained arithmetic evaluation for the `calculate` reply.
//!
//! Only numeric literals, `+ - * /`, unary signs and parentheses are accepted:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('+' | '-') unary | atom
//! atom   := number | '(' expr ')'
//! number := digits ['.' digits] | '.' digits
//! ```
//!
//! Anything else (identifiers, `**`, `%`, quotes, ...) is rejected during
//! tokenization, so no input can do more than arithmetic.

use thiserror::Error;

/// Parenthesis/sign nesting limit.
const MAX_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("expression is empty")]
    Empty,
    #[error("unexpected character '{0}' at byte {1}")]
    UnexpectedChar(char, usize),
    #[error("malformed number '{0}'")]
    BadNumber(String),
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expression nests too deeply")]
    TooDeep,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NotFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

impl std::fmt::Display for Tok {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tok::Num(n) => write!(f, "{n}"),
            Tok::Plus => f.write_str("+"),
            Tok::Minus => f.write_str("-"),
            Tok::Star => f.write_str("*"),
            Tok::Slash => f.write_str("/"),
            Tok::Open => f.write_str("("),
            Tok::Close => f.write_str(")"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Tok>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        let tok = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Tok::Num(parse_number(&literal)?));
                continue;
            }
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '(' => Tok::Open,
            ')' => Tok::Close,
            other => return Err(CalcError::UnexpectedChar(other, pos)),
        };
        chars.next();
        tokens.push(tok);
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<f64, CalcError> {
    // At most one dot, and it must be followed by a digit.
    let dots = literal.matches('.').count();
    if dots > 1 || literal.ends_with('.') {
        return Err(CalcError::BadNumber(literal.to_string()));
    }
    literal.parse::<f64>().map_err(|_| CalcError::BadNumber(literal.to_string()))
}

struct Parser {
    tokens: Vec<Tok>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Tok> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Tok> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    fn descend(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH { Err(CalcError::TooDeep) } else { Ok(()) }
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ (Tok::Plus | Tok::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Tok::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        while let Some(op @ (Tok::Star | Tok::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Tok::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(Tok::Plus) | Some(Tok::Minus) => {
                let negate = self.bump() == Some(Tok::Minus);
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(if negate { -value } else { value })
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.bump() {
            Some(Tok::Num(n)) => Ok(n),
            Some(Tok::Open) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.bump() {
                    Some(Tok::Close) => Ok(value),
                    Some(other) => Err(CalcError::UnexpectedToken(other.to_string())),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(other) => Err(CalcError::UnexpectedToken(other.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression.
///
/// ```
/// use replybot::evaluate;
///
/// assert_eq!(evaluate("5 + 3 * 2"), Ok(11.0));
/// assert!(evaluate("alert(1)").is_err());
/// ```
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let value = parser.expr()?;
    if let Some(extra) = parser.peek() {
        return Err(CalcError::UnexpectedToken(extra.to_string()));
    }
    if !value.is_finite() {
        return Err(CalcError::NotFinite);
    }
    Ok(value)
}

/// Render a result the way a person would write it: `11`, `2.5`, `-0.25`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        // whole number: print without decimal point
        let whole = value as i64;
        format!("{}", whole)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_with_precedence() {
        let cases: Vec<(&str, f64)> = vec![
            ("5 + 3 * 2", 11.0),
            ("(5 + 3) * 2", 16.0),
            ("12 / 4", 3.0),
            ("10 - 4 - 3", 3.0),
            ("100 / 10 / 5", 2.0),
            ("2 * (3 + (4 - 1)) / 3", 4.0),
            ("-3 + 5", 2.0),
            ("- (2 + 3)", -5.0),
            ("--4", 4.0),
            ("+7", 7.0),
            ("2 * -3", -6.0),
            ("1.5 + .5", 2.0),
            ("7/2", 3.5),
            ("  42  ", 42.0),
        ];
        for (input, expected) in cases {
            assert_eq!(evaluate(input), Ok(expected), "{input}");
        }
    }

    #[test]
    fn rejects_anything_but_arithmetic() {
        assert_eq!(evaluate("alert(1)"), Err(CalcError::UnexpectedChar('a', 0)));
        assert_eq!(evaluate("2 ** 3"), Err(CalcError::UnexpectedToken("*".to_string())));
        assert_eq!(evaluate("10 % 3"), Err(CalcError::UnexpectedChar('%', 3)));
        assert!(matches!(evaluate("process.exit()"), Err(CalcError::UnexpectedChar('p', 0))));
        assert!(matches!(evaluate("2; 3"), Err(CalcError::UnexpectedChar(';', 1))));
    }

    #[test]
    fn reports_malformed_expressions() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("   "), Err(CalcError::Empty));
        assert_eq!(evaluate("1 +"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("1 + 2)"), Err(CalcError::UnexpectedToken(")".to_string())));
        assert_eq!(evaluate("1 2"), Err(CalcError::UnexpectedToken("2".to_string())));
        assert_eq!(evaluate("1..2"), Err(CalcError::BadNumber("1..2".to_string())));
        assert_eq!(evaluate("."), Err(CalcError::BadNumber(".".to_string())));
        assert_eq!(evaluate("5."), Err(CalcError::BadNumber("5.".to_string())));
        assert_eq!(evaluate("1. + 2"), Err(CalcError::BadNumber("1.".to_string())));
        assert_eq!(evaluate("()"), Err(CalcError::UnexpectedToken(")".to_string())));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(evaluate("1 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("1 / (2 - 2)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(evaluate(&deep), Err(CalcError::TooDeep));

        let ok = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(evaluate(&ok), Ok(1.0));

        assert_eq!(evaluate(&"-".repeat(MAX_DEPTH + 1)), Err(CalcError::TooDeep));
    }

    #[test]
    fn overflow_is_not_finite() {
        let huge = format!("{}0 * {}0", "9".repeat(300), "9".repeat(300));
        assert_eq!(evaluate(&huge), Err(CalcError::NotFinite));
    }

    #[test]
    fn formats_whole_and_fractional_results() {
        assert_eq!(format_number(11.0), "11");
        assert_eq!(format_number(-6.0), "-6");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }
}
