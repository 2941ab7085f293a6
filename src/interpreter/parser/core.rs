use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Span, Token},
        parser::{
            binary::parse_logical_or,
            block::parse_block,
            declaration::{
                looks_like_var_decl, parse_const_section, parse_routine, parse_var_decl,
                parse_var_section,
            },
            statement::parse_statement,
            utils::{check_nesting, expect, parse_identifier, skip_separators},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete token stream into a [`Program`].
///
/// A stream holding nothing but newlines and `;` separators is rejected with
/// [`ParseError::EmptyProgram`], and one nested too deeply with
/// [`ParseError::NestingTooDeep`]. When the input ends in the middle of a
/// construct, the reported line is the line of the last token.
///
/// # Parameters
/// - `tokens`: The output of [`crate::interpreter::lexer::tokenize`].
///
/// # Returns
/// The parsed program.
///
/// ## Example
/// ```
/// use algorithmique::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("VARIABLES\n  x : ENTIER\nDEBUT\n  x <- 2\nFIN").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.declarations[0].names, vec!["x".to_string()]);
/// assert_eq!(program.statements.len(), 1);
/// ```
pub fn parse(tokens: &[(Token, Span)]) -> ParseResult<Program> {
    let Some((_, last)) = tokens.iter()
                                .rev()
                                .find(|(token, _)| !matches!(token, Token::NewLine | Token::Semicolon))
    else {
        return Err(ParseError::EmptyProgram);
    };
    check_nesting(tokens)?;

    let mut iter = tokens.iter().peekable();

    parse_program(&mut iter).map_err(|error| match error {
                                 ParseError::UnexpectedEndOfInput { expected, line: 0 } => {
                                     ParseError::UnexpectedEndOfInput { expected,
                                                                        line: last.line }
                                 },
                                 other => other,
                             })
}

/// Parses the program layout.
///
/// Grammar:
/// ```text
/// program := [ALGORITHME ident] section* (DEBUT block FIN routine* | script)
/// section := CONSTANTES constdecl* | VARIABLES vardecl* | routine
/// script  := (section | vardecl | statement)*
/// ```
///
/// Without `DEBUT`, the remaining input is read as a script. Its
/// declarations must all come before its first statement; routines may
/// appear anywhere.
fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    skip_separators(tokens);

    let name = if let Some((Token::Algorithm, _)) = tokens.peek() {
        tokens.next();
        if let Some((Token::Colon, _)) = tokens.peek() {
            tokens.next();
        }
        Some(parse_identifier(tokens)?)
    } else {
        None
    };

    let mut program = Program { name,
                                ..Program::default() };

    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::Function | Token::Procedure, _)) => {
                program.routines.push(parse_routine(tokens)?);
            },
            Some((Token::Constants, _)) => program.constants.extend(parse_const_section(tokens)?),
            Some((Token::Variables, _)) => {
                program.declarations.extend(parse_var_section(tokens)?);
            },
            _ => break,
        }
    }

    if let Some((Token::Begin, _)) = tokens.peek() {
        tokens.next();
        program.statements = parse_block(tokens, &[Token::End], None)?;
        expect(tokens, &Token::End)?;

        loop {
            skip_separators(tokens);
            match tokens.peek() {
                Some((Token::Function | Token::Procedure, _)) => {
                    program.routines.push(parse_routine(tokens)?);
                },
                Some((token, span)) => {
                    return Err(ParseError::UnexpectedTrailingTokens { token: token.to_string(),
                                                                      line:  span.line, });
                },
                None => break,
            }
        }
    } else {
        parse_script(tokens, &mut program)?;
    }

    Ok(program)
}

/// Reads the rest of the input as a script without `DEBUT`/`FIN`.
///
/// # Errors
/// `LateDeclaration` for a declaration or section after the first statement.
fn parse_script<'a, I>(tokens: &mut Peekable<I>, program: &mut Program) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    loop {
        skip_separators(tokens);
        let Some((token, span)) = tokens.peek().copied() else {
            return Ok(());
        };

        let declaration =
            matches!(token, Token::Constants | Token::Variables) || looks_like_var_decl(tokens);
        if declaration && !program.statements.is_empty() {
            return Err(ParseError::LateDeclaration { line: span.line });
        }

        match token {
            Token::Function | Token::Procedure => program.routines.push(parse_routine(tokens)?),
            Token::Constants => program.constants.extend(parse_const_section(tokens)?),
            Token::Variables => program.declarations.extend(parse_var_section(tokens)?),
            _ if declaration => program.declarations.push(parse_var_decl(tokens)?),
            _ => program.statements.push(parse_statement(tokens, None)?),
        }
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, `OU`, and recursively descends
/// through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Span)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Span)> + Clone
{
    parse_logical_or(tokens)
}
