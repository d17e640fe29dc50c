//! Recursive-descent parser from the token stream to an expression tree.
//!
//! Precedence, loosest first: addition, multiplication, unary sign,
//! exponentiation (right-associative, so `2**3**2 == 2**9` and
//! `-2**2 == -(2**2)`).

use crate::ast::{BinOp, Expr, Primitive};
use crate::error::CompileError;
use crate::token::{Spanned, Token};

/// Parse a full token stream into an expression tree.
pub fn parse(tokens: &[Spanned]) -> Result<Expr, CompileError> {
    let mut cursor = Cursor { tokens, pos: 0 };
    let expr = cursor.expression()?;
    if let Some(spanned) = cursor.peek() {
        return Err(CompileError::syntax(
            spanned.column,
            format!("unexpected '{}' after expression", spanned.token),
        ));
    }
    Ok(expr)
}

struct Cursor<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'a Spanned> {
        let spanned = self.tokens.get(self.pos);
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    /// Column just past the last token, for end-of-input errors.
    fn end_column(&self) -> usize {
        self.tokens
            .last()
            .map_or(1, |s| s.column + s.token.to_string().len())
    }

    fn expression(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.term()?;
        while let Some(spanned) = self.peek() {
            let op = match spanned.token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.unary()?;
        while let Some(spanned) = self.peek() {
            let op = match spanned.token {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, CompileError> {
        match self.peek().map(|s| &s.token) {
            Some(Token::Minus) => {
                self.bump();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.bump();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, CompileError> {
        let base = self.atom()?;
        if let Some(Token::Power) = self.peek().map(|s| &s.token) {
            self.bump();
            // Exponent may carry its own sign: 2**-3
            let exponent = self.unary()?;
            return Ok(Expr::Binary {
                op: BinOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, CompileError> {
        let Some(spanned) = self.bump() else {
            return Err(CompileError::syntax(self.end_column(), "expected a value"));
        };
        match &spanned.token {
            Token::Number(text) => {
                let value: f64 = text.parse().map_err(|_| {
                    CompileError::syntax(spanned.column, format!("invalid number '{}'", text))
                })?;
                Ok(Expr::Number(value))
            }
            Token::Pi => Ok(Expr::Pi),
            Token::Var(_) => Ok(Expr::Var),
            Token::Func(primitive) => self.call(*primitive, spanned.column),
            Token::LParen => {
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            other => Err(CompileError::syntax(
                spanned.column,
                format!("unexpected '{}'", other),
            )),
        }
    }

    fn call(&mut self, primitive: Primitive, column: usize) -> Result<Expr, CompileError> {
        match self.bump().map(|s| &s.token) {
            Some(Token::LParen) => {}
            _ => {
                return Err(CompileError::syntax(
                    column,
                    format!("expected '(' after function '{}'", primitive.name()),
                ));
            }
        }
        let arg = self.expression()?;
        self.expect_rparen()?;
        Ok(Expr::Call {
            func: primitive,
            arg: Box::new(arg),
        })
    }

    fn expect_rparen(&mut self) -> Result<(), CompileError> {
        match self.peek() {
            Some(spanned) if spanned.token == Token::RParen => {
                self.bump();
                Ok(())
            }
            Some(spanned) => Err(CompileError::syntax(
                spanned.column,
                format!("expected ')' before '{}'", spanned.token),
            )),
            None => Err(CompileError::syntax(self.end_column(), "missing ')'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{insert_implicit_mul, tokenize};

    fn parse_str(source: &str) -> Result<Expr, CompileError> {
        let tokens = insert_implicit_mul(tokenize(source, 't')?);
        parse(&tokens)
    }

    fn eval_str(source: &str, x: f64) -> f64 {
        parse_str(source).unwrap().eval(x, None).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert!((eval_str("2+3*4", 0.0) - 14.0).abs() < 1e-12);
        assert!((eval_str("2*3**2", 0.0) - 18.0).abs() < 1e-12);
        assert!((eval_str("(2+3)*4", 0.0) - 20.0).abs() < 1e-12);
        assert!((eval_str("8/2/2", 0.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert!((eval_str("2**3**2", 0.0) - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_unary_binds_looser_than_power() {
        assert!((eval_str("-2**2", 0.0) - -4.0).abs() < 1e-12);
        assert!((eval_str("2**-1", 0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_caret_means_power() {
        assert!((eval_str("t^2", 3.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_function_call_needs_parens() {
        assert!(matches!(
            parse_str("sin t"),
            Err(CompileError::Syntax { .. })
        ));
        assert!(matches!(parse_str("u"), Err(CompileError::Syntax { .. })));
    }

    #[test]
    fn test_unbalanced_parens_rejected() {
        assert!(matches!(
            parse_str("sin(t"),
            Err(CompileError::Syntax { .. })
        ));
        assert!(matches!(
            parse_str("(t+1))"),
            Err(CompileError::Syntax { .. })
        ));
    }

    #[test]
    fn test_number_adjacent_paren_is_not_a_call() {
        // Not one of the shorthand contexts, so this stays malformed.
        assert!(matches!(
            parse_str("2(t+1)"),
            Err(CompileError::Syntax { .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(parse_str(""), Err(CompileError::Syntax { .. })));
    }
}
