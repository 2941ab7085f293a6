use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Span, Token},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses one left-associative precedence level.
///
/// `accepts` picks the operators of this level, `next` parses the operands
/// at the next tighter level.
fn parse_level<'a, I>(tokens: &mut Peekable<I>,
                      accepts: fn(BinaryOperator) -> bool,
                      next: fn(&mut Peekable<I>) -> ParseResult<Expr>)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut left = next(tokens)?;
    loop {
        if let Some((token, span)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && accepts(op)
        {
            let line = span.line;
            tokens.next();
            let right = next(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// Handles the `OU` operator with left associativity.
///
/// The rule is: `logical_or := logical_and ("OU" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::BinaryOp` tree of `OU` operations.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_level(tokens, |op| op == BinaryOperator::Or, parse_logical_and)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := comparison ("ET" comparison)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_level(tokens, |op| op == BinaryOperator::And, parse_comparison)
}

/// Parses comparison expressions.
///
/// Handles `=`, `<>`, `<`, `>`, `<=` and `>=`.
///
/// The rule is: `comparison := additive (comp_op additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_level(tokens,
                |op| {
                    matches!(op,
                             BinaryOperator::Equal
                             | BinaryOperator::NotEqual
                             | BinaryOperator::Less
                             | BinaryOperator::Greater
                             | BinaryOperator::LessEqual
                             | BinaryOperator::GreaterEqual)
                },
                parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_level(tokens,
                |op| matches!(op, BinaryOperator::Add | BinaryOperator::Sub),
                parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/`, `DIV` and `MOD`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "DIV" | "MOD") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_level(tokens,
                |op| {
                    matches!(op,
                             BinaryOperator::Mul
                             | BinaryOperator::Div
                             | BinaryOperator::IntDiv
                             | BinaryOperator::Mod)
                },
                parse_unary)
}

/// Maps a token to the binary operator it spells, if any.
///
/// # Example
/// ```
/// use algorithmique::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Mod), Some(BinaryOperator::Mod));
/// assert_eq!(token_to_binary_operator(&Token::Assign), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::IntDiv => Some(BinaryOperator::IntDiv),
        Token::Mod => Some(BinaryOperator::Mod),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}
