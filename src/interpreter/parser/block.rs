use std::iter::Peekable;

use crate::{
    ast::{RoutineKind, Statement},
    interpreter::{
        lexer::{Span, Token},
        parser::{core::ParseResult, statement::parse_statement, utils::skip_separators},
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses statements until one of the `terminators`, or the end of input.
///
/// Newlines and `;` separators between statements are skipped. The
/// terminator itself is left in the stream so the caller can check that the
/// construct was closed by the keyword it expects.
///
/// Grammar: `block := (statement (NEWLINE | ";")*)*`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first statement.
/// - `terminators`: Keywords that close the block, such as `FINSI`.
/// - `routine`: The kind of routine whose body is being parsed, if any; it
///   decides which forms of `RETOURNER` are allowed.
///
/// # Returns
/// The statements of the block, in source order.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                          terminators: &[Token],
                          routine: Option<RoutineKind>)
                          -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_separators(tokens);

        match tokens.peek() {
            None => break,
            Some((token, _)) if terminators.contains(token) => break,
            Some(_) => {
                statements.push(ensure_sufficient_stack(|| parse_statement(tokens, routine))?);
            },
        }
    }

    Ok(statements)
}
