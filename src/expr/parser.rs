use std::fmt;

use super::ExprError;
use super::token::{Spanned, Token, tokenize};

// ---------------------------------------------------------------------------
// AST
// ---------------------------------------------------------------------------

/// Whitelisted elementary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
    Abs,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "exp" => Func::Exp,
            "log" => Func::Log,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            _ => return None,
        })
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Func::Sin => v.sin(),
            Func::Cos => v.cos(),
            Func::Tan => v.tan(),
            Func::Exp => v.exp(),
            Func::Log => v.ln(),
            Func::Sqrt => v.sqrt(),
            Func::Abs => v.abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed expression in the single variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var,
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Func,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Parse `src`; see the module docs for the accepted grammar.
    pub fn parse(src: &str) -> Result<Self, ExprError> {
        let tokens = tokenize(src)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.sum()?;
        match parser.tokens.get(parser.pos) {
            None => Ok(expr),
            Some((tok, pos)) => Err(ExprError::UnexpectedToken {
                found: tok.to_string(),
                pos: *pos,
            }),
        }
    }

    /// Evaluate at `x` with IEEE semantics: `log(-1)` is NaN, `1/0` is inf.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Number(v) => *v,
            Expr::Var => x,
            Expr::Neg(inner) => -inner.eval(x),
            Expr::Binary { op, lhs, rhs } => {
                let (a, b) = (lhs.eval(x), rhs.eval(x));
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    BinOp::Pow => a.powf(b),
                }
            }
            Expr::Call { func, arg } => func.apply(arg.eval(x)),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{v}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive descent
// ---------------------------------------------------------------------------

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Result<Spanned, ExprError> {
        let tok = self.tokens.get(self.pos).cloned().ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, want: Token) -> Result<(), ExprError> {
        let (tok, pos) = self.next()?;
        if tok == want {
            Ok(())
        } else {
            Err(ExprError::UnexpectedToken {
                found: tok.to_string(),
                pos,
            })
        }
    }

    fn sum(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.product()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.product()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn product(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    // Right-associative, and tighter than unary minus: -x^2 == -(x^2).
    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExprError> {
        let (tok, pos) = self.next()?;
        match tok {
            Token::Number(v) => Ok(Expr::Number(v)),
            Token::LParen => {
                let inner = self.sum()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => match name.as_str() {
                "x" => Ok(Expr::Var),
                "pi" => Ok(Expr::Number(std::f64::consts::PI)),
                "e" => Ok(Expr::Number(std::f64::consts::E)),
                other => {
                    let func = Func::from_name(other).ok_or_else(|| ExprError::UnknownIdentifier {
                        name: other.to_string(),
                        pos,
                    })?;
                    self.expect(Token::LParen)?;
                    let arg = self.sum()?;
                    self.expect(Token::RParen)?;
                    Ok(Expr::Call {
                        func,
                        arg: Box::new(arg),
                    })
                }
            },
            other => Err(ExprError::UnexpectedToken {
                found: other.to_string(),
                pos,
            }),
        }
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
