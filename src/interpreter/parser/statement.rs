use std::iter::Peekable;

use crate::{
    ast::{ForLoop, RoutineKind, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{
                end_of_input, expect, parse_comma_separated, parse_identifier, starts_expression,
                unexpected,
            },
        },
    },
};

/// Parses a single statement.
///
/// The statement kind is chosen by its first token:
/// - an identifier starts an assignment or a procedure call,
/// - `LIRE`, `ECRIRE`, `SI`, `POUR`, `TANT QUE`, `REPETER` and `RETOURNER`
///   start their own construct.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, Span)` pairs.
/// - `routine`: The kind of the enclosing routine, or `None` in the main
///   block.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// `UnexpectedToken` when the next token starts no statement, plus any error
/// from the construct's own parser.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              routine: Option<RoutineKind>)
                              -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let Some((token, span)) = tokens.peek() else {
        return Err(end_of_input("a statement"));
    };
    let line = span.line;

    match token {
        Token::Identifier(_) => parse_assignment_or_call(tokens),
        Token::Read => parse_read(tokens, line),
        Token::Write => parse_write(tokens, line),
        Token::If => parse_if(tokens, line, routine),
        Token::For => parse_for(tokens, line, routine),
        Token::While => parse_while(tokens, line, routine),
        Token::Repeat => parse_repeat(tokens, line, routine),
        Token::Return => parse_return(tokens, line, routine),
        other => Err(unexpected("a statement", other, *span)),
    }
}

/// Parses `name <- expr`, `name = expr` or `name(args)`.
fn parse_assignment_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, span)| span.line);
    let name = parse_identifier(tokens)?;

    match tokens.next() {
        Some((Token::Assign | Token::Equal, _)) => {
            let value = parse_expression(tokens)?;
            Ok(Statement::Assignment { target: name,
                                       value,
                                       line })
        },
        Some((Token::LParen, _)) => {
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            Ok(Statement::Call { name,
                                 arguments,
                                 line })
        },
        Some((tok, span)) => Err(unexpected(format!("'<-' or '(' after '{name}'"), tok, *span)),
        None => Err(end_of_input(format!("'<-' or '(' after '{name}'"))),
    }
}

/// Parses `LIRE(a, b)`, or `LIRE a, b` without parentheses.
fn parse_read<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next();

    let targets = if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let targets = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
        if targets.is_empty() {
            return Err(ParseError::UnexpectedToken { expected: "an identifier".to_string(),
                                                     found: Token::RParen.to_string(),
                                                     line });
        }
        targets
    } else {
        let mut targets = vec![parse_identifier(tokens)?];
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            targets.push(parse_identifier(tokens)?);
        }
        targets
    };

    Ok(Statement::Read { targets, line })
}

/// Parses `ECRIRE(e1, e2)`, or `ECRIRE e1, e2` without parentheses.
///
/// `ECRIRE()` writes an empty line.
fn parse_write<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next();

    let values = if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        parse_comma_separated(tokens, parse_expression, &Token::RParen)?
    } else {
        let mut values = vec![parse_expression(tokens)?];
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            values.push(parse_expression(tokens)?);
        }
        values
    };

    Ok(Statement::Write { values, line })
}

/// Parses `SI cond ALORS block [SINON block] FINSI`.
///
/// A `SINON SI` chain is an `SI` nested in the `SINON` branch and closes with
/// its own `FINSI`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                   line: usize,
                   routine: Option<RoutineKind>)
                   -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next();

    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::Then)?;

    let then_branch = parse_block(tokens, &[Token::Else, Token::EndIf], routine)?;

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(parse_block(tokens, &[Token::EndIf], routine)?)
    } else {
        None
    };

    expect(tokens, &Token::EndIf)?;

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses `POUR var DE start A end [PAS step] FAIRE block FINPOUR`.
///
/// `var <- start` may stand in for `var DE start`, `JUSQU'A` for `A`, and
/// `FAIRE` may be omitted.
fn parse_for<'a, I>(tokens: &mut Peekable<I>,
                    line: usize,
                    routine: Option<RoutineKind>)
                    -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next();

    let var = parse_identifier(tokens)?;

    match tokens.next() {
        Some((Token::From | Token::Assign, _)) => {},
        Some((tok, span)) => return Err(unexpected(Token::From.to_string(), tok, *span)),
        None => return Err(end_of_input(Token::From.to_string())),
    }
    let start = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::To | Token::Until, _)) => {},
        Some((tok, span)) => return Err(unexpected(Token::To.to_string(), tok, *span)),
        None => return Err(end_of_input(Token::To.to_string())),
    }
    let end = parse_expression(tokens)?;

    let step = if let Some((Token::Step, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    if let Some((Token::Do, _)) = tokens.peek() {
        tokens.next();
    }

    let body = parse_block(tokens, &[Token::EndFor], routine)?;
    expect(tokens, &Token::EndFor)?;

    Ok(Statement::For(ForLoop { var,
                                start,
                                end,
                                step,
                                body,
                                line }))
}

/// Parses `TANT QUE cond FAIRE block FINTANTQUE`; `FAIRE` is optional.
fn parse_while<'a, I>(tokens: &mut Peekable<I>,
                      line: usize,
                      routine: Option<RoutineKind>)
                      -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next();

    let condition = parse_expression(tokens)?;
    if let Some((Token::Do, _)) = tokens.peek() {
        tokens.next();
    }

    let body = parse_block(tokens, &[Token::EndWhile], routine)?;
    expect(tokens, &Token::EndWhile)?;

    Ok(Statement::While { condition,
                          body,
                          line })
}

/// Parses `REPETER block JUSQU'A cond`.
fn parse_repeat<'a, I>(tokens: &mut Peekable<I>,
                       line: usize,
                       routine: Option<RoutineKind>)
                       -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next();

    let body = parse_block(tokens, &[Token::Until], routine)?;
    expect(tokens, &Token::Until)?;
    let condition = parse_expression(tokens)?;

    Ok(Statement::Repeat { body,
                           condition,
                           line })
}

/// Parses `RETOURNER [expr]`.
///
/// # Errors
/// `InvalidReturn` when `RETOURNER` appears outside a routine, without a
/// value in a `FONCTION`, or with a value in a `PROCEDURE`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>,
                       line: usize,
                       routine: Option<RoutineKind>)
                       -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    tokens.next();

    let has_value = tokens.peek().is_some_and(|(token, _)| starts_expression(token));

    let details = match (routine, has_value) {
        (Some(RoutineKind::Function), true) => {
            return Ok(Statement::Return { value: Some(parse_expression(tokens)?),
                                          line });
        },
        (Some(RoutineKind::Procedure), false) => {
            return Ok(Statement::Return { value: None,
                                          line });
        },
        (None, _) => "RETOURNER can only be used inside a FONCTION or a PROCEDURE",
        (Some(RoutineKind::Function), false) => "RETOURNER inside a FONCTION needs a value",
        (Some(RoutineKind::Procedure), true) => "A PROCEDURE cannot return a value",
    };

    Err(ParseError::InvalidReturn { details: details.to_string(),
                                    line })
}
