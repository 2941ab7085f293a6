use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::{Span, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect, parse_comma_separated, unexpected},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses unary expressions.
///
/// Handles prefix `-` (arithmetic negation) and `NON` (logical not). Both
/// bind tighter than every binary operator, so `NON a = b` compares `NON a`
/// with `b`.
///
/// Grammar: `unary := ("-" | "NON") unary | primary`
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// An `Expr::UnaryOp` or the primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Not, _)) => UnaryOperator::Not,
        _ => return parse_primary(tokens),
    };
    let line = tokens.next().map_or(0, |(_, span)| span.line);

    let expr = parse_unary(tokens)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       line })
}

/// Parses a primary expression.
///
/// A primary expression is one of:
/// - a literal (`42`, `3.5`, `"texte"`, `'c'`, `VRAI`),
/// - a variable or constant name,
/// - a function call `NAME(args)`,
/// - a parenthesized expression.
///
/// # Errors
/// `UnexpectedToken` naming "an expression" when none of these start here.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let Some((token, span)) = tokens.next() else {
        return Err(end_of_input("an expression"));
    };
    let line = span.line;

    let value = match token {
        Token::Integer(n) => LiteralValue::Integer(*n),
        Token::Real(r) => LiteralValue::Real(*r),
        Token::Str(s) => LiteralValue::String(s.clone()),
        Token::Char(c) => LiteralValue::Character(*c),
        Token::Bool(b) => LiteralValue::Boolean(*b),
        Token::Identifier(name) => return parse_identifier_or_call(tokens, name, line),
        Token::LParen => {
            let expr = ensure_sufficient_stack(|| parse_expression(tokens))?;
            expect(tokens, &Token::RParen)?;
            return Ok(expr);
        },
        other => return Err(unexpected("an expression", other, *span)),
    };

    Ok(Expr::Literal { value, line })
}

/// Parses either a plain variable reference or, when `(` follows, a call.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   name: &str,
                                   line: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        return Ok(Expr::Call { name: name.to_string(),
                               arguments,
                               line });
    }

    Ok(Expr::Variable { name: name.to_string(),
                        line })
}
