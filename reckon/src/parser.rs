//! Recursive-descent expression parser
//!
//! Grammar, loosest to tightest binding:
//!
//! ```text
//! expr           := additive
//! additive       := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := unary (('*' | '/') unary)*
//! unary          := '-' unary | power
//! power          := primary ('^' unary)?
//! primary        := number | string | ident ('(' args ')')? | '(' expr ')'
//! ```
//!
//! `^` is right-associative and its exponent re-enters `unary`, so
//! `2 ^ 3 ^ 2` is `2^(3^2)` and `2 ^ -3` parses. Unary minus binds
//! looser than `^`: `-2^2` is `-(2^2)`.

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::lexer::{tokenize, Spanned, Token};
use reckon_core::CalcError;

/// Parse an expression string into an AST
pub fn parse_expression(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::parse_error("empty expression").with_expression(input));
    }
    let mut parser = Parser { input, tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    if let Some(spanned) = parser.peek() {
        return Err(parser.error(format!("unexpected {}", spanned.token.describe()), spanned.pos));
    }
    Ok(expr)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn error(&self, message: String, position: usize) -> CalcError {
        CalcError::parse_error(message)
            .with_expression(self.input)
            .at_position(position)
    }

    fn unexpected_end(&self) -> CalcError {
        CalcError::parse_error("unexpected end of expression").with_expression(self.input)
    }

    fn expect(&mut self, expected: &Token) -> Result<(), CalcError> {
        match self.advance() {
            Some(spanned) if spanned.token == *expected => Ok(()),
            Some(spanned) => Err(self.error(
                format!("expected {}, found {}", expected.describe(), spanned.token.describe()),
                spanned.pos,
            )),
            None => Err(self.unexpected_end()),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, CalcError> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(spanned) = self.peek() {
            let op = match spanned.token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.parse_unary()?;
        while let Some(spanned) = self.peek() {
            let op = match spanned.token {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, CalcError> {
        if matches!(self.peek(), Some(s) if s.token == Token::Minus) {
            self.pos += 1;
            let inner = self.parse_unary()?;
            return Ok(Expr::UnaryOp(UnaryOp::Neg, Box::new(inner)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, CalcError> {
        let base = self.parse_primary()?;
        if matches!(self.peek(), Some(s) if s.token == Token::Caret) {
            self.pos += 1;
            // Right-associative, exponent may carry its own sign
            let exponent = self.parse_unary()?;
            return Ok(Expr::BinaryOp(Box::new(base), BinOp::Pow, Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, CalcError> {
        let spanned = match self.advance() {
            Some(s) => s,
            None => return Err(self.unexpected_end()),
        };

        match spanned.token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Str(s) => Ok(Expr::StringLiteral(s)),
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => {
                if matches!(self.peek(), Some(s) if s.token == Token::LParen) {
                    self.pos += 1;
                    let args = self.parse_args()?;
                    Ok(Expr::FunctionCall(name, args))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            other => Err(self.error(format!("unexpected {}", other.describe()), spanned.pos)),
        }
    }

    /// Parse a comma-separated argument list, consuming the closing paren
    fn parse_args(&mut self) -> Result<Vec<Expr>, CalcError> {
        if matches!(self.peek(), Some(s) if s.token == Token::RParen) {
            self.pos += 1;
            return Ok(Vec::new());
        }
        let mut args = vec![self.parse_expr()?];
        loop {
            match self.advance() {
                Some(s) if s.token == Token::Comma => args.push(self.parse_expr()?),
                Some(s) if s.token == Token::RParen => return Ok(args),
                Some(s) => {
                    return Err(self.error(
                        format!("expected ',' or ')', found {}", s.token.describe()),
                        s.pos,
                    ))
                }
                None => return Err(self.unexpected_end()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_mul_over_add() {
        let expr = parse_expression("2 + 3 * 4").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::Number(2.0)),
                BinOp::Add,
                Box::new(Expr::BinaryOp(
                    Box::new(Expr::Number(3.0)),
                    BinOp::Mul,
                    Box::new(Expr::Number(4.0)),
                )),
            )
        );
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse_expression("2 ^ 3 ^ 2").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::Number(2.0)),
                BinOp::Pow,
                Box::new(Expr::BinaryOp(
                    Box::new(Expr::Number(3.0)),
                    BinOp::Pow,
                    Box::new(Expr::Number(2.0)),
                )),
            )
        );
    }

    #[test]
    fn test_unary_minus_binds_below_power() {
        // -2^2 parses as -(2^2)
        let expr = parse_expression("-2^2").unwrap();
        assert_eq!(
            expr,
            Expr::UnaryOp(
                UnaryOp::Neg,
                Box::new(Expr::BinaryOp(
                    Box::new(Expr::Number(2.0)),
                    BinOp::Pow,
                    Box::new(Expr::Number(2.0)),
                )),
            )
        );
    }

    #[test]
    fn test_negative_exponent() {
        let expr = parse_expression("2 ^ -3").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::Number(2.0)),
                BinOp::Pow,
                Box::new(Expr::UnaryOp(UnaryOp::Neg, Box::new(Expr::Number(3.0)))),
            )
        );
    }

    #[test]
    fn test_parentheses_override() {
        let expr = parse_expression("(2 + 3) * 4").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::BinaryOp(
                    Box::new(Expr::Number(2.0)),
                    BinOp::Add,
                    Box::new(Expr::Number(3.0)),
                )),
                BinOp::Mul,
                Box::new(Expr::Number(4.0)),
            )
        );
    }

    #[test]
    fn test_function_call_with_args() {
        let expr = parse_expression("pow(2, 10)").unwrap();
        assert_eq!(
            expr,
            Expr::FunctionCall(
                "pow".to_string(),
                vec![Expr::Number(2.0), Expr::Number(10.0)],
            )
        );
    }

    #[test]
    fn test_nested_call() {
        let expr = parse_expression("sin(x ^ 2)").unwrap();
        assert_eq!(
            expr,
            Expr::FunctionCall(
                "sin".to_string(),
                vec![Expr::BinaryOp(
                    Box::new(Expr::Variable("x".to_string())),
                    BinOp::Pow,
                    Box::new(Expr::Number(2.0)),
                )],
            )
        );
    }

    #[test]
    fn test_string_arguments() {
        let expr = parse_expression("convert(100, \"km\", \"mi\")").unwrap();
        assert_eq!(
            expr,
            Expr::FunctionCall(
                "convert".to_string(),
                vec![
                    Expr::Number(100.0),
                    Expr::StringLiteral("km".to_string()),
                    Expr::StringLiteral("mi".to_string()),
                ],
            )
        );
    }

    #[test]
    fn test_bare_variable() {
        assert_eq!(parse_expression("pi").unwrap(), Expr::Variable("pi".to_string()));
    }

    #[test]
    fn test_empty_expression_rejected() {
        let err = parse_expression("   ").unwrap_err();
        assert_eq!(err.code, reckon_core::codes::PARSE_ERROR);
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_expression("2 + 3 4").unwrap_err();
        assert_eq!(err.code, reckon_core::codes::PARSE_ERROR);
    }

    #[test]
    fn test_unbalanced_paren_rejected() {
        assert!(parse_expression("(2 + 3").is_err());
        assert!(parse_expression("2 + 3)").is_err());
    }

    #[test]
    fn test_dangling_operator_rejected() {
        assert!(parse_expression("2 +").is_err());
        assert!(parse_expression("* 2").is_err());
    }
}
