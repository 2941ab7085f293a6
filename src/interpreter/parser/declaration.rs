use std::iter::Peekable;

use crate::{
    ast::{ConstDecl, Param, RoutineDef, RoutineKind, VarDecl},
    interpreter::{
        lexer::{Span, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{
                end_of_input, expect, parse_comma_separated, parse_declared_name, parse_type,
                skip_separators, unexpected,
            },
        },
    },
};

/// Whether the upcoming tokens form a variable declaration line.
///
/// Either `TYPE name...` or `name ,` / `name :`; no statement starts with an
/// identifier followed by a comma or a colon.
pub(in crate::interpreter::parser) fn looks_like_var_decl<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut lookahead = tokens.clone();
    match lookahead.next() {
        Some((Token::Type(_), _)) => true,
        Some((Token::Identifier(_), _)) => {
            matches!(lookahead.next(), Some((Token::Comma | Token::Colon, _)))
        },
        _ => false,
    }
}

/// Whether the upcoming tokens form a constant declaration line:
/// `NAME =`, `NAME <-` or `NAME : TYPE =`.
fn looks_like_const_decl<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut lookahead = tokens.clone();
    if !matches!(lookahead.next(), Some((Token::Identifier(_), _))) {
        return false;
    }
    match lookahead.next() {
        Some((Token::Equal | Token::Assign, _)) => true,
        Some((Token::Colon, _)) => {
            matches!((lookahead.next(), lookahead.next()),
                     (Some((Token::Type(_), _)), Some((Token::Equal | Token::Assign, _))))
        },
        _ => false,
    }
}

/// Parses one declaration line.
///
/// Grammar:
/// ```text
/// vardecl := ident ("," ident)* ":" TYPE
///          | TYPE ident ("," ident)*
/// ```
///
/// # Errors
/// `IdentifierReserved` if a name is a built-in, `UnexpectedToken` for a
/// missing `:` or type.
pub(in crate::interpreter::parser) fn parse_var_decl<'a, I>(tokens: &mut Peekable<I>)
                                                            -> ParseResult<VarDecl>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, span)| span.line);

    if let Some((Token::Type(data_type), _)) = tokens.peek() {
        let data_type = *data_type;
        tokens.next();
        if let Some((Token::Colon, _)) = tokens.peek() {
            tokens.next();
        }
        let names = parse_name_list(tokens)?;
        return Ok(VarDecl { names,
                            data_type,
                            line });
    }

    let names = parse_name_list(tokens)?;
    expect(tokens, &Token::Colon)?;
    let data_type = parse_type(tokens)?;

    Ok(VarDecl { names,
                 data_type,
                 line })
}

/// Parses `name ("," name)*`, rejecting built-in names.
fn parse_name_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let mut names = vec![parse_declared_name(tokens)?];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        names.push(parse_declared_name(tokens)?);
    }
    Ok(names)
}

/// Parses a `VARIABLES` section: the keyword, an optional `:`, then every
/// following declaration line.
///
/// The section ends at the first line that is not a declaration.
pub(in crate::interpreter::parser) fn parse_var_section<'a, I>(tokens: &mut Peekable<I>)
                                                               -> ParseResult<Vec<VarDecl>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    expect(tokens, &Token::Variables)?;
    if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
    }

    let mut declarations = Vec::new();
    loop {
        skip_separators(tokens);
        if !looks_like_var_decl(tokens) {
            break;
        }
        declarations.push(parse_var_decl(tokens)?);
    }

    Ok(declarations)
}

/// Parses a `CONSTANTES` section.
///
/// Grammar: `constdecl := ident [":" TYPE] ("=" | "<-") expression`
pub(in crate::interpreter::parser) fn parse_const_section<'a, I>(tokens: &mut Peekable<I>)
                                                                 -> ParseResult<Vec<ConstDecl>>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    expect(tokens, &Token::Constants)?;
    if let Some((Token::Colon, _)) = tokens.peek() {
        tokens.next();
    }

    let mut constants = Vec::new();
    loop {
        skip_separators(tokens);
        if !looks_like_const_decl(tokens) {
            break;
        }

        let line = tokens.peek().map_or(0, |(_, span)| span.line);
        let name = parse_declared_name(tokens)?;
        let data_type = if let Some((Token::Colon, _)) = tokens.peek() {
            tokens.next();
            Some(parse_type(tokens)?)
        } else {
            None
        };

        match tokens.next() {
            Some((Token::Equal | Token::Assign, _)) => {},
            Some((tok, span)) => return Err(unexpected(Token::Equal.to_string(), tok, *span)),
            None => return Err(end_of_input(Token::Equal.to_string())),
        }

        let value = parse_expression(tokens)?;
        constants.push(ConstDecl { name,
                                   data_type,
                                   value,
                                   line });
    }

    Ok(constants)
}

/// Parses a `FONCTION` or `PROCEDURE` definition.
///
/// Grammar:
/// ```text
/// routine := FONCTION ident "(" params ")" ":" TYPE locals [DEBUT] block FIN
///          | PROCEDURE ident "(" params ")" locals [DEBUT] block FIN
/// params  := (ident ":" TYPE ("," ident ":" TYPE)*)?
/// locals  := (VARIABLES vardecl* | vardecl)*
/// ```
///
/// # Errors
/// `IdentifierReserved` if the routine or a parameter is named after a
/// built-in; `InvalidReturn` from the body when `RETOURNER` does not fit the
/// routine kind.
pub(in crate::interpreter::parser) fn parse_routine<'a, I>(tokens: &mut Peekable<I>)
                                                           -> ParseResult<RoutineDef>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let (kind, line) = match tokens.next() {
        Some((Token::Function, span)) => (RoutineKind::Function, span.line),
        Some((Token::Procedure, span)) => (RoutineKind::Procedure, span.line),
        Some((tok, span)) => return Err(unexpected("'FONCTION' or 'PROCEDURE'", tok, *span)),
        None => return Err(end_of_input("'FONCTION' or 'PROCEDURE'")),
    };

    let name = parse_declared_name(tokens)?;
    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_param, &Token::RParen)?;

    let return_type = match kind {
        RoutineKind::Function => {
            expect(tokens, &Token::Colon)?;
            Some(parse_type(tokens)?)
        },
        RoutineKind::Procedure => None,
    };

    let mut locals = Vec::new();
    loop {
        skip_separators(tokens);
        if let Some((Token::Variables, _)) = tokens.peek() {
            locals.extend(parse_var_section(tokens)?);
        } else if looks_like_var_decl(tokens) {
            locals.push(parse_var_decl(tokens)?);
        } else {
            break;
        }
    }

    if let Some((Token::Begin, _)) = tokens.peek() {
        tokens.next();
    }

    let body = parse_block(tokens, &[Token::End], Some(kind))?;
    expect(tokens, &Token::End)?;

    Ok(RoutineDef { kind,
                    name,
                    params,
                    return_type,
                    locals,
                    body,
                    line })
}

/// Parses one `name : TYPE` parameter.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    let name = parse_declared_name(tokens)?;
    expect(tokens, &Token::Colon)?;
    let data_type = parse_type(tokens)?;

    Ok(Param { name, data_type })
}
