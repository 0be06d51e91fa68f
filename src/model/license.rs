//! SPDX license expressions.
//!
//! Expressions are parsed into a small AST that keeps the user's grouping:
//! operands of a flat `A AND B AND C` chain share one node, while an
//! explicitly parenthesized group stays a nested node. Printing adds only
//! the parentheses precedence requires (`+` binds tighter than `WITH`,
//! which binds tighter than `AND`, which binds tighter than `OR`).

use crate::model::ThreeValued;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix of document-local license identifiers.
pub const LICENSE_REF_PREFIX: &str = "LicenseRef-";
/// Prefix of identifiers declared in another SPDX document.
pub const DOCUMENT_REF_PREFIX: &str = "DocumentRef-";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseExpression {
    /// An identifier expected on the SPDX license list, e.g. `MIT`.
    Listed(String),
    /// `LicenseRef-…`, optionally qualified as `DocumentRef-…:LicenseRef-…`.
    Custom(String),
    /// `license+`
    OrLater(Box<LicenseExpression>),
    /// `license WITH exception`
    WithException {
        license: Box<LicenseExpression>,
        exception: String,
    },
    /// Conjunctive set, `A AND B`.
    And(Vec<LicenseExpression>),
    /// Disjunctive set, `A OR B`.
    Or(Vec<LicenseExpression>),
}

impl LicenseExpression {
    /// Creates a leaf, classifying the identifier as listed or custom.
    pub fn symbol(id: impl Into<String>) -> Self {
        let id = id.into();
        if is_custom_license_id(&id) {
            Self::Custom(id)
        } else {
            Self::Listed(id)
        }
    }

    /// All license identifiers in the expression, in order of appearance.
    #[must_use]
    pub fn license_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Listed(id) | Self::Custom(id) => out.push(id),
            Self::OrLater(inner) => inner.collect_ids(out),
            Self::WithException { license, .. } => license.collect_ids(out),
            Self::And(items) | Self::Or(items) => {
                for item in items {
                    item.collect_ids(out);
                }
            }
        }
    }

    /// All exception identifiers in the expression.
    #[must_use]
    pub fn exception_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_exceptions(&mut ids);
        ids
    }

    fn collect_exceptions<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Listed(_) | Self::Custom(_) => {}
            Self::OrLater(inner) => inner.collect_exceptions(out),
            Self::WithException { license, exception } => {
                license.collect_exceptions(out);
                out.push(exception);
            }
            Self::And(items) | Self::Or(items) => {
                for item in items {
                    item.collect_exceptions(out);
                }
            }
        }
    }

    const fn precedence(&self) -> u8 {
        match self {
            Self::Or(_) => 0,
            Self::And(_) => 1,
            Self::WithException { .. } => 2,
            Self::OrLater(_) => 3,
            Self::Listed(_) | Self::Custom(_) => 4,
        }
    }

    fn fmt_operand(&self, parent_precedence: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Equal precedence is parenthesized too: a nested set of the same
        // kind was an explicit group in the input.
        if self.precedence() <= parent_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// True for `LicenseRef-x` and `DocumentRef-y:LicenseRef-x`.
#[must_use]
pub fn is_custom_license_id(id: &str) -> bool {
    id.starts_with(LICENSE_REF_PREFIX) || id.starts_with(DOCUMENT_REF_PREFIX)
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed(id) | Self::Custom(id) => f.write_str(id),
            Self::OrLater(inner) => {
                inner.fmt_operand(self.precedence(), f)?;
                f.write_str("+")
            }
            Self::WithException { license, exception } => {
                license.fmt_operand(self.precedence(), f)?;
                write!(f, " WITH {exception}")
            }
            Self::And(items) | Self::Or(items) => {
                let separator = if matches!(self, Self::And(_)) {
                    " AND "
                } else {
                    " OR "
                };
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    item.fmt_operand(self.precedence(), f)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for LicenseExpression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        if tokens.is_empty() {
            return Err("license expression must not be empty".to_string());
        }
        let mut parser = ExpressionParser {
            tokens: &tokens,
            pos: 0,
            source: s,
        };
        let expression = parser.parse_or()?;
        if let Some(token) = parser.peek() {
            return Err(format!(
                "Unexpected token {token} in license expression: {s}"
            ));
        }
        Ok(expression)
    }
}

/// Parses a license field value, mapping `NOASSERTION` / `NONE` to the singletons.
pub fn parse_license_field(raw: &str) -> Result<ThreeValued<LicenseExpression>, String> {
    ThreeValued::parse_with(raw, str::parse)
}

// ============================================================================
// Tokenizer and recursive descent parser
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Plus,
    And,
    Or,
    With,
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("'('"),
            Self::Close => f.write_str("')'"),
            Self::Plus => f.write_str("'+'"),
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
            Self::With => f.write_str("WITH"),
            Self::Word(w) => write!(f, "'{w}'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    let flush = |word: &mut String, tokens: &mut Vec<Token>| {
        if word.is_empty() {
            return;
        }
        let taken = std::mem::take(word);
        let plus = taken.len() > 1 && taken.ends_with('+');
        let base = if plus {
            taken[..taken.len() - 1].to_string()
        } else {
            taken
        };
        let token = match base.to_uppercase().as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "WITH" => Token::With,
            "+" => Token::Plus,
            _ => Token::Word(base),
        };
        tokens.push(token);
        if plus {
            tokens.push(Token::Plus);
        }
    };

    for c in input.chars() {
        match c {
            '(' | ')' => {
                flush(&mut word, &mut tokens);
                tokens.push(if c == '(' { Token::Open } else { Token::Close });
            }
            c if c.is_whitespace() => flush(&mut word, &mut tokens),
            c if c.is_control() => {
                return Err(format!("Invalid character in license expression: {input}"))
            }
            c => word.push(c),
        }
    }
    flush(&mut word, &mut tokens);
    Ok(tokens)
}

struct ExpressionParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
}

impl<'a> ExpressionParser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, reason: &str) -> String {
        format!("{reason} in license expression: {}", self.source)
    }

    fn parse_or(&mut self) -> Result<LicenseExpression, String> {
        let mut operands = vec![self.parse_and()?];
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            operands.push(self.parse_and()?);
        }
        Ok(if operands.len() == 1 {
            operands.remove(0)
        } else {
            LicenseExpression::Or(operands)
        })
    }

    fn parse_and(&mut self) -> Result<LicenseExpression, String> {
        let mut operands = vec![self.parse_with()?];
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            operands.push(self.parse_with()?);
        }
        Ok(if operands.len() == 1 {
            operands.remove(0)
        } else {
            LicenseExpression::And(operands)
        })
    }

    fn parse_with(&mut self) -> Result<LicenseExpression, String> {
        let license = self.parse_primary()?;
        if self.peek() != Some(&Token::With) {
            return Ok(license);
        }
        self.pos += 1;
        let exception = match self.next() {
            Some(Token::Word(w)) => w.clone(),
            _ => return Err(self.error("Missing exception after WITH")),
        };
        if matches!(license, LicenseExpression::And(_) | LicenseExpression::Or(_)) {
            return Err(self.error("WITH must follow a single license"));
        }
        Ok(LicenseExpression::WithException {
            license: Box::new(license),
            exception,
        })
    }

    fn parse_primary(&mut self) -> Result<LicenseExpression, String> {
        let mut expression = match self.next() {
            Some(Token::Open) => {
                let inner = self.parse_or()?;
                if self.next() != Some(&Token::Close) {
                    return Err(self.error("Unbalanced parentheses"));
                }
                inner
            }
            Some(Token::Word(w)) => LicenseExpression::symbol(w.clone()),
            Some(token) => {
                let reason = format!("Unexpected token {token}");
                return Err(self.error(&reason));
            }
            None => return Err(self.error("Unexpected end")),
        };
        if self.peek() == Some(&Token::Plus) {
            self.pos += 1;
            expression = LicenseExpression::OrLater(Box::new(expression));
        }
        Ok(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> LicenseExpression {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_symbols() {
        assert_eq!(parse("MIT"), LicenseExpression::Listed("MIT".to_string()));
        assert_eq!(
            parse("LicenseRef-1"),
            LicenseExpression::Custom("LicenseRef-1".to_string())
        );
        assert_eq!(
            parse("DocumentRef-ext:LicenseRef-2"),
            LicenseExpression::Custom("DocumentRef-ext:LicenseRef-2".to_string())
        );
    }

    #[test]
    fn test_precedence() {
        let expr = parse("MIT OR Apache-2.0 AND BSD-3-Clause");
        assert_eq!(
            expr,
            LicenseExpression::Or(vec![
                LicenseExpression::symbol("MIT"),
                LicenseExpression::And(vec![
                    LicenseExpression::symbol("Apache-2.0"),
                    LicenseExpression::symbol("BSD-3-Clause"),
                ]),
            ])
        );
        assert_eq!(expr.to_string(), "MIT OR Apache-2.0 AND BSD-3-Clause");
    }

    #[test]
    fn test_or_later_and_exception() {
        let expr = parse("GPL-2.0+ WITH Classpath-exception-2.0");
        assert_eq!(
            expr,
            LicenseExpression::WithException {
                license: Box::new(LicenseExpression::OrLater(Box::new(
                    LicenseExpression::symbol("GPL-2.0")
                ))),
                exception: "Classpath-exception-2.0".to_string(),
            }
        );
        assert_eq!(expr.to_string(), "GPL-2.0+ WITH Classpath-exception-2.0");
        assert_eq!(expr.exception_ids(), vec!["Classpath-exception-2.0"]);
    }

    #[test]
    fn test_explicit_group_is_kept() {
        let expr = parse("MIT AND (Apache-2.0 AND BSD-2-Clause)");
        assert_eq!(expr.to_string(), "MIT AND (Apache-2.0 AND BSD-2-Clause)");
        let expr = parse("(MIT OR Apache-2.0) AND BSD-2-Clause");
        assert_eq!(expr.to_string(), "(MIT OR Apache-2.0) AND BSD-2-Clause");
    }

    #[test]
    fn test_redundant_parentheses_dropped() {
        let expr = parse("(MIT)");
        assert_eq!(expr.to_string(), "MIT");
        let expr = parse("MIT OR (Apache-2.0 AND BSD-2-Clause)");
        assert_eq!(expr.to_string(), "MIT OR Apache-2.0 AND BSD-2-Clause");
        assert_eq!(parse(&expr.to_string()), expr);
    }

    #[test]
    fn test_lowercase_operators() {
        assert_eq!(parse("MIT and Zlib"), parse("MIT AND Zlib"));
    }

    #[test]
    fn test_license_ids_in_order() {
        let expr = parse("LicenseRef-a OR (MIT AND GPL-3.0-only WITH GCC-exception-3.1)");
        assert_eq!(expr.license_ids(), vec!["LicenseRef-a", "MIT", "GPL-3.0-only"]);
    }

    #[test]
    fn test_invalid_expressions() {
        for bad in ["", "MIT AND", "(MIT", "MIT)", "AND MIT", "MIT WITH", "MIT Apache-2.0"] {
            assert!(bad.parse::<LicenseExpression>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_license_field_singletons() {
        assert_eq!(parse_license_field("NOASSERTION"), Ok(ThreeValued::NoAssertion));
        assert_eq!(parse_license_field("NONE"), Ok(ThreeValued::None));
        assert_eq!(
            parse_license_field("MIT"),
            Ok(ThreeValued::Value(LicenseExpression::symbol("MIT")))
        );
    }
}
