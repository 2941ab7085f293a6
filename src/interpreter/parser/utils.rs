use std::iter::Peekable;

use crate::{
    ast::DataType,
    error::ParseError,
    interpreter::{
        evaluator::function::core::is_builtin,
        lexer::{Span, Token},
        parser::core::ParseResult,
    },
};

/// Deepest nesting of parentheses, blocks and prefix operators a program may
/// use.
pub const MAX_NESTING: usize = 100;

/// Most operators allowed on a single line.
pub const MAX_LINE_OPERATORS: usize = 1_000;

/// Rejects a token stream nested deeper than [`MAX_NESTING`] levels, or with
/// more than [`MAX_LINE_OPERATORS`] operators on one line.
///
/// Runs before parsing, so that the recursive descent and the tree it builds
/// stay shallow. Parentheses, `SI`/`POUR`/`TANT QUE`/`REPETER` blocks and runs
/// of prefix `-`/`NON` each add a level.
///
/// # Errors
/// `NestingTooDeep` or `TooManyOperators`, on the line of the first token past
/// the limit.
pub(in crate::interpreter::parser) fn check_nesting(tokens: &[(Token, Span)]) -> ParseResult<()> {
    let mut blocks = 0_usize;
    let mut parens = 0_usize;
    let mut prefixes = 0_usize;
    let mut operators = 0_usize;
    let mut for_header = false;

    for (token, span) in tokens {
        match token {
            Token::LParen => parens += 1,
            Token::RParen => parens = parens.saturating_sub(1),
            Token::If | Token::While | Token::Repeat => blocks += 1,
            Token::For => {
                blocks += 1;
                for_header = true;
            },
            // `JUSQU'A` also spells the bound of a `POUR` header.
            Token::Until if for_header => {},
            Token::EndIf | Token::EndFor | Token::EndWhile | Token::Until => {
                blocks = blocks.saturating_sub(1);
            },
            Token::Do => for_header = false,
            Token::NewLine | Token::Semicolon => {
                operators = 0;
                for_header = false;
            },
            _ => {},
        }

        if matches!(token, Token::Minus | Token::Not) {
            prefixes += 1;
        } else {
            prefixes = 0;
        }
        if token.is_operator() {
            operators += 1;
        }

        if blocks + parens + prefixes > MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                    line:  span.line, });
        }
        if operators > MAX_LINE_OPERATORS {
            return Err(ParseError::TooManyOperators { limit: MAX_LINE_OPERATORS,
                                                      line:  span.line, });
        }
    }

    Ok(())
}

/// Builds the error for input that ended while `expected` was still needed.
///
/// The line is left at zero and filled in by
/// [`crate::interpreter::parser::core::parse`], which knows where the input
/// ends.
pub(in crate::interpreter::parser) fn end_of_input(expected: impl Into<String>) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: expected.into(),
                                       line:     0, }
}

/// Builds the error for `found` appearing where `expected` was required.
pub(in crate::interpreter::parser) fn unexpected(expected: impl Into<String>,
                                                 found: &Token,
                                                 span: Span)
                                                 -> ParseError {
    ParseError::UnexpectedToken { expected: expected.into(),
                                  found:    found.to_string(),
                                  line:     span.line, }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The span of the consumed token.
///
/// # Errors
/// `UnexpectedToken` naming `expected` when another token is found, and
/// `UnexpectedEndOfInput` when the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Span>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((token, span)) if token == expected => Ok(*span),
        Some((token, span)) => Err(unexpected(expected.to_string(), token, *span)),
        None => Err(end_of_input(expected.to_string())),
    }
}

/// Skips newlines and `;` separators.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Span)>
{
    while let Some((Token::NewLine | Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Whether `token` can begin an expression.
pub(in crate::interpreter::parser) const fn starts_expression(token: &Token) -> bool {
    matches!(token,
             Token::Identifier(_)
             | Token::Integer(_)
             | Token::Real(_)
             | Token::Str(_)
             | Token::Char(_)
             | Token::Bool(_)
             | Token::LParen
             | Token::Minus
             | Token::Not)
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by argument lists, parameter lists and the
/// parenthesized forms of `LIRE` and `ECRIRE`. It repeatedly calls
/// `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list, usually `)`.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, span)) => return Err(unexpected(format!("',' or {closing}"), tok, *span)),
            None => return Err(end_of_input(closing.to_string())),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`.
/// This function does not check for reserved identifiers; see
/// [`parse_declared_name`] for names being introduced.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the input
/// ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Span)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, span)) => Err(unexpected("an identifier", tok, *span)),
        None => Err(end_of_input("an identifier")),
    }
}

/// Parses the name of something being declared: a variable, constant,
/// parameter or routine.
///
/// # Errors
/// `IdentifierReserved` when the name is a built-in function, in addition to
/// the errors of [`parse_identifier`].
pub(in crate::interpreter::parser) fn parse_declared_name<'a, I>(tokens: &mut Peekable<I>)
                                                                 -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Span)>
{
    let line = tokens.peek().map_or(0, |(_, span)| span.line);
    let name = parse_identifier(tokens)?;
    if is_builtin(&name) {
        return Err(ParseError::IdentifierReserved { name, line });
    }
    Ok(name)
}

/// Parses a type keyword.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<DataType>
    where I: Iterator<Item = &'a (Token, Span)>
{
    const EXPECTED: &str = "a type (ENTIER, REEL, CHAINE, BOOLEEN or CARACTERE)";

    match tokens.next() {
        Some((Token::Type(data_type), _)) => Ok(*data_type),
        Some((tok, span)) => Err(unexpected(EXPECTED, tok, *span)),
        None => Err(end_of_input(EXPECTED)),
    }
}
