use logos::Logos;

use crate::{ast::DataType, error::LexError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Keywords match in any letter case, except the one-letter `A` of
/// `POUR ... A ...`, which is upper-case only so that `a` stays an identifier.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Real literal tokens, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted string literal, with `\"` and `\\` escapes.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    Str(String),
    /// Single-quoted character literal, such as `'x'`.
    #[regex(r"'([^'\\\n]|\\.)'", parse_character)]
    Char(char),
    /// `VRAI` or `FAUX`.
    #[token("VRAI", |_| true, ignore(case))]
    #[token("FAUX", |_| false, ignore(case))]
    Bool(bool),
    /// One of the five type keywords.
    #[token("ENTIER", |_| DataType::Integer, ignore(case))]
    #[token("REEL", |_| DataType::Real, ignore(case))]
    #[token("RÉEL", |_| DataType::Real, ignore(case))]
    #[token("CHAINE", |_| DataType::String, ignore(case))]
    #[token("CHAÎNE", |_| DataType::String, ignore(case))]
    #[token("BOOLEEN", |_| DataType::Boolean, ignore(case))]
    #[token("BOOLÉEN", |_| DataType::Boolean, ignore(case))]
    #[token("CARACTERE", |_| DataType::Character, ignore(case))]
    #[token("CARACTÈRE", |_| DataType::Character, ignore(case))]
    Type(DataType),

    /// `ALGORITHME`
    #[token("ALGORITHME", ignore(case))]
    #[token("PROGRAMME", ignore(case))]
    Algorithm,
    /// `CONSTANTES`
    #[token("CONSTANTES", ignore(case))]
    Constants,
    /// `VARIABLES`
    #[token("VARIABLES", ignore(case))]
    Variables,
    /// `DEBUT`
    #[token("DEBUT", ignore(case))]
    #[token("DÉBUT", ignore(case))]
    Begin,
    /// `FIN`
    #[token("FIN", ignore(case))]
    End,

    /// `SI`
    #[token("SI", ignore(case))]
    If,
    /// `ALORS`
    #[token("ALORS", ignore(case))]
    Then,
    /// `SINON`
    #[token("SINON", ignore(case))]
    Else,
    /// `FINSI`
    #[token("FINSI", ignore(case))]
    EndIf,
    /// `POUR`
    #[token("POUR", ignore(case))]
    For,
    /// `DE`
    #[token("DE", ignore(case))]
    From,
    /// `A`
    #[token("A", priority = 3)]
    #[token("À", priority = 3)]
    #[token("à", priority = 3)]
    To,
    /// `PAS`
    #[token("PAS", ignore(case))]
    Step,
    /// `FAIRE`
    #[token("FAIRE", ignore(case))]
    Do,
    /// `FINPOUR`
    #[token("FINPOUR", ignore(case))]
    EndFor,
    /// `TANT QUE`, joined from two words by [`tokenize`].
    #[token("TANTQUE", ignore(case))]
    While,
    /// `FINTANTQUE`
    #[token("FINTANTQUE", ignore(case))]
    #[token("FINTQ", ignore(case))]
    EndWhile,
    /// `REPETER`
    #[token("REPETER", ignore(case))]
    #[token("RÉPÉTER", ignore(case))]
    Repeat,
    /// `JUSQU'A`
    #[token("JUSQU'A", ignore(case))]
    #[token("JUSQU'À", ignore(case))]
    #[token("JUSQU’A", ignore(case))]
    #[token("JUSQUA", ignore(case))]
    Until,
    /// `FONCTION`
    #[token("FONCTION", ignore(case))]
    Function,
    /// `PROCEDURE`
    #[token("PROCEDURE", ignore(case))]
    #[token("PROCÉDURE", ignore(case))]
    Procedure,
    /// `RETOURNER`
    #[token("RETOURNER", ignore(case))]
    Return,

    /// `LIRE`
    #[token("LIRE", ignore(case))]
    Read,
    /// `ECRIRE`, or its alias `AFFICHER`.
    #[token("ECRIRE", ignore(case))]
    #[token("ÉCRIRE", ignore(case))]
    #[token("AFFICHER", ignore(case))]
    Write,

    /// `<-`, also spelled `←` or `:=`.
    #[token("<-")]
    #[token("←")]
    #[token(":=")]
    Assign,
    /// `=`
    #[token("=")]
    #[token("==")]
    Equal,
    /// `<>`
    #[token("<>")]
    #[token("!=")]
    NotEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `MOD`
    #[token("MOD", ignore(case))]
    Mod,
    /// `DIV`
    #[token("DIV", ignore(case))]
    IntDiv,
    /// `ET`
    #[token("ET", ignore(case))]
    And,
    /// `OU`
    #[token("OU", ignore(case))]
    Or,
    /// `NON`
    #[token("NON", ignore(case))]
    Not,

    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`, an optional statement separator.
    #[token(";")]
    Semicolon,

    /// Identifier tokens; variable, constant or routine names such as `somme`.
    #[regex(r"[A-Za-zÀ-ÖØ-öø-ÿ][A-Za-zÀ-ÖØ-öø-ÿ0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `// Comments.` and `# comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let comment = lex.slice();
        if let Some(last) = comment.rfind('\n') {
            lex.extras.line += comment.matches('\n').count();
            lex.extras.line_start = lex.span().start + last + 1;
        }
        logos::Skip
    })]
    MultiLineComment,

    /// Line break. Statements are separated by newlines or `;`.
    #[token("\n")]
    NewLine,
    /// Spaces, tabs, feeds and carriage returns.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Position of a token in the source text. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// The source line.
    pub line:   usize,
    /// The column, counted in characters.
    pub column: usize,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset at which it starts, so
/// that token columns can be computed for diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl LexerExtras {
    /// Computes the 1-based position of the byte `offset` on the current line.
    fn position(&self, source: &str, offset: usize) -> Span {
        let column = source.get(self.line_start..offset)
                           .map_or(1, |prefix| prefix.chars().count() + 1);
        Span { line: self.line,
               column }
    }
}

/// Converts source text into a token stream.
///
/// Every token is paired with its [`Span`]. Lexing stops at the first
/// character that starts no token.
///
/// # Errors
/// Returns a [`LexError`] carrying the line and column of the first
/// unrecognized character, unterminated literal, or integer literal too large
/// for `ENTIER`.
///
/// # Example
/// ```
/// use algorithmique::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("somme <- a + 1").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("somme".into()),
///                 Token::Assign,
///                 Token::Identifier("a".into()),
///                 Token::Plus,
///                 Token::Integer(1)]);
///
/// let error = tokenize("x <- 1\ny <- 2 @ 3").unwrap_err();
/// assert_eq!((error.line, error.column), (2, 8));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source,
                                             LexerExtras { line:       1,
                                                           line_start: 0, });

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let position = lexer.extras.position(source, span.start);

        match token {
            Ok(Token::NewLine) => {
                tokens.push((Token::NewLine, position));
                lexer.extras.line += 1;
                lexer.extras.line_start = span.end;
            },
            Ok(tok) => push_token(&mut tokens, tok, position),
            Err(()) => {
                return Err(LexError { message: describe_lex_failure(lexer.slice()),
                                      line:    position.line,
                                      column:  position.column, });
            },
        }
    }

    Ok(tokens)
}

/// Appends a token, joining `TANT QUE`, `FIN SI`, `FIN POUR` and
/// `FIN TANT QUE` into a single token. Both words must be complete, so
/// `FIN SIGNE` stays `FIN` followed by an identifier.
fn push_token(tokens: &mut Vec<(Token, Span)>, token: Token, span: Span) {
    let joined = match (tokens.last(), &token) {
        (Some((Token::End, _)), Token::If) => Some(Token::EndIf),
        (Some((Token::End, _)), Token::For) => Some(Token::EndFor),
        (Some((Token::End, _)), Token::While) => Some(Token::EndWhile),
        (Some((Token::Identifier(first), _)), Token::Identifier(second))
            if first.eq_ignore_ascii_case("TANT") && second.eq_ignore_ascii_case("QUE") =>
        {
            Some(Token::While)
        },
        _ => None,
    };

    if let Some(joined) = joined
       && let Some((_, first)) = tokens.pop()
    {
        push_token(tokens, joined, first);
    } else {
        tokens.push((token, span));
    }
}

/// Builds the message for a slice the lexer could not turn into a token.
fn describe_lex_failure(slice: &str) -> String {
    match slice.chars().next() {
        Some('"') => "Unterminated string literal".to_string(),
        Some('\'') => "Malformed character literal".to_string(),
        Some(c) if c.is_ascii_digit() && slice.chars().all(|c| c.is_ascii_digit()) => {
            format!("Integer literal {slice} is too large")
        },
        Some(c) => format!("Unrecognized character '{c}'"),
        None => "Unexpected end of input".to_string(),
    }
}

/// Parses a real literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None`, and thereby a lexing error, when the literal does not fit
/// in 64 bits.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the quotes of a string literal and resolves its escapes.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Extracts the character of a character literal.
fn parse_character(lex: &logos::Lexer<Token>) -> Option<char> {
    let slice = lex.slice();
    let mut chars = unescape(&slice[1..slice.len() - 1]).chars().collect::<Vec<_>>();
    if chars.len() == 1 { chars.pop() } else { None }
}

/// Resolves `\"`, `\'`, `\\`, `\n` and `\t`; any other escaped character
/// stands for itself.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

impl Token {
    /// Returns the canonical source spelling of a keyword, operator or
    /// punctuation token, or `None` for tokens carrying a payload.
    #[must_use]
    pub const fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            Self::Algorithm => "ALGORITHME",
            Self::Constants => "CONSTANTES",
            Self::Variables => "VARIABLES",
            Self::Begin => "DEBUT",
            Self::End => "FIN",
            Self::If => "SI",
            Self::Then => "ALORS",
            Self::Else => "SINON",
            Self::EndIf => "FINSI",
            Self::For => "POUR",
            Self::From => "DE",
            Self::To => "A",
            Self::Step => "PAS",
            Self::Do => "FAIRE",
            Self::EndFor => "FINPOUR",
            Self::While => "TANT QUE",
            Self::EndWhile => "FINTANTQUE",
            Self::Repeat => "REPETER",
            Self::Until => "JUSQU'A",
            Self::Function => "FONCTION",
            Self::Procedure => "PROCEDURE",
            Self::Return => "RETOURNER",
            Self::Read => "LIRE",
            Self::Write => "ECRIRE",
            Self::Assign => "<-",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Mod => "MOD",
            Self::IntDiv => "DIV",
            Self::And => "ET",
            Self::Or => "OU",
            Self::Not => "NON",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Type(data_type) => data_type.keyword(),
            Self::Bool(true) => "VRAI",
            Self::Bool(false) => "FAUX",
            Self::Real(_)
            | Self::Integer(_)
            | Self::Str(_)
            | Self::Char(_)
            | Self::Identifier(_)
            | Self::Comment
            | Self::MultiLineComment
            | Self::NewLine
            | Self::Ignored => return None,
        };
        Some(text)
    }

    /// Whether the token is an arithmetic, comparison or logical operator.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self,
                 Self::Plus
                 | Self::Minus
                 | Self::Star
                 | Self::Slash
                 | Self::Mod
                 | Self::IntDiv
                 | Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::And
                 | Self::Or
                 | Self::Not)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(text) = self.spelling() {
            return write!(f, "'{text}'");
        }
        match self {
            Self::Real(r) => write!(f, "real literal {r}"),
            Self::Integer(n) => write!(f, "integer literal {n}"),
            Self::Str(s) => write!(f, "string literal \"{s}\""),
            Self::Char(c) => write!(f, "character literal '{c}'"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            _ => write!(f, "end of line"),
        }
    }
}

/// Every keyword, operator and separator, in the order the syntax reference
/// lists them. [`Token::spelling`] gives the canonical form of each.
pub static KEYWORDS: &[Token] = &[Token::Algorithm,
                                  Token::Constants,
                                  Token::Variables,
                                  Token::Begin,
                                  Token::End,
                                  Token::If,
                                  Token::Then,
                                  Token::Else,
                                  Token::EndIf,
                                  Token::For,
                                  Token::From,
                                  Token::To,
                                  Token::Step,
                                  Token::Do,
                                  Token::EndFor,
                                  Token::While,
                                  Token::EndWhile,
                                  Token::Repeat,
                                  Token::Until,
                                  Token::Function,
                                  Token::Procedure,
                                  Token::Return,
                                  Token::Read,
                                  Token::Write,
                                  Token::Bool(true),
                                  Token::Bool(false)];

/// Operators and separators, in the order the syntax reference lists them.
pub static OPERATORS: &[Token] = &[Token::Assign,
                                   Token::Plus,
                                   Token::Minus,
                                   Token::Star,
                                   Token::Slash,
                                   Token::IntDiv,
                                   Token::Mod,
                                   Token::Equal,
                                   Token::NotEqual,
                                   Token::Less,
                                   Token::Greater,
                                   Token::LessEqual,
                                   Token::GreaterEqual,
                                   Token::And,
                                   Token::Or,
                                   Token::Not,
                                   Token::LParen,
                                   Token::RParen,
                                   Token::Comma,
                                   Token::Colon,
                                   Token::Semicolon];

/// Alternative spellings accepted for keywords and operators.
pub static ALIASES: &[(&str, Token)] = &[("PROGRAMME", Token::Algorithm),
                                         ("DÉBUT", Token::Begin),
                                         ("FIN SI", Token::EndIf),
                                         ("À", Token::To),
                                         ("FIN POUR", Token::EndFor),
                                         ("TANTQUE", Token::While),
                                         ("FIN TANT QUE", Token::EndWhile),
                                         ("FINTQ", Token::EndWhile),
                                         ("RÉPÉTER", Token::Repeat),
                                         ("JUSQU'À", Token::Until),
                                         ("JUSQUA", Token::Until),
                                         ("PROCÉDURE", Token::Procedure),
                                         ("ÉCRIRE", Token::Write),
                                         ("AFFICHER", Token::Write),
                                         ("←", Token::Assign),
                                         (":=", Token::Assign),
                                         ("==", Token::Equal),
                                         ("!=", Token::NotEqual),
                                         ("RÉEL", Token::Type(DataType::Real)),
                                         ("CHAÎNE", Token::Type(DataType::String)),
                                         ("BOOLÉEN", Token::Type(DataType::Boolean)),
                                         ("CARACTÈRE", Token::Type(DataType::Character))];

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn every_listed_spelling_lexes_to_its_token() {
        for token in KEYWORDS.iter().chain(OPERATORS) {
            let spelling = token.spelling().unwrap();
            assert_eq!(kinds(spelling), vec![token.clone()], "spelling {spelling}");
        }
        for data_type in DataType::ALL {
            assert_eq!(kinds(data_type.keyword()), vec![Token::Type(data_type)]);
        }
        for (alias, token) in ALIASES {
            assert_eq!(kinds(alias), vec![token.clone()], "alias {alias}");
        }
    }

    #[test]
    fn keywords_ignore_letter_case() {
        assert_eq!(kinds("si Si SI"), vec![Token::If, Token::If, Token::If]);
        assert_eq!(kinds("Ecrire écrire Lire"), vec![Token::Write, Token::Write, Token::Read]);
        assert_eq!(kinds("Debut Réel vrai"),
                   vec![Token::Begin, Token::Type(DataType::Real), Token::Bool(true)]);
    }

    #[test]
    fn only_upper_case_a_is_the_bound_keyword() {
        assert_eq!(kinds("a A à"), vec![Token::Identifier("a".into()), Token::To, Token::To]);
    }

    #[test]
    fn two_word_keywords() {
        assert_eq!(kinds("Fin Si"), vec![Token::EndIf]);
        assert_eq!(kinds("fin  pour"), vec![Token::EndFor]);
        assert_eq!(kinds("Tant que"), vec![Token::While]);
        assert_eq!(kinds("FIN TANT QUE"), vec![Token::EndWhile]);
        assert_eq!(kinds("FIN\nSI"), vec![Token::End, Token::NewLine, Token::If]);
    }

    #[test]
    fn keyword_prefixes_are_identifiers() {
        assert_eq!(kinds("FINAL SIGNE"),
                   vec![Token::Identifier("FINAL".into()), Token::Identifier("SIGNE".into())]);
        assert_eq!(kinds("FIN SIGNE"), vec![Token::End, Token::Identifier("SIGNE".into())]);
        assert_eq!(kinds("FIN POURCENT"), vec![Token::End, Token::Identifier("POURCENT".into())]);
        assert_eq!(kinds("TANT QUEUE"),
                   vec![Token::Identifier("TANT".into()), Token::Identifier("QUEUE".into())]);
        assert_eq!(kinds("Sinus"), vec![Token::Identifier("Sinus".into())]);
    }

    #[test]
    fn literals() {
        assert_eq!(kinds(r#"3.50 42 "a \"b\"" 'c' VRAI"#),
                   vec![Token::Real(3.5),
                        Token::Integer(42),
                        Token::Str("a \"b\"".into()),
                        Token::Char('c'),
                        Token::Bool(true)]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let tokens = tokenize("x // note\n/* a\nb */ y # fin").unwrap();

        assert_eq!(tokens,
                   vec![(Token::Identifier("x".into()), Span { line: 1, column: 1 }),
                        (Token::NewLine, Span { line: 1, column: 10 }),
                        (Token::Identifier("y".into()), Span { line: 3, column: 6 })]);
    }

    #[test]
    fn accented_identifiers_count_columns_in_characters() {
        let tokens = tokenize("côté <- é").unwrap();

        assert_eq!(tokens[2], (Token::Identifier("é".into()), Span { line: 1, column: 9 }));
    }

    #[test]
    fn errors_report_position() {
        let error = tokenize("x <- \"abc").unwrap_err();
        assert_eq!((error.line, error.column), (1, 6));
        assert_eq!(error.message, "Unterminated string literal");

        let error = tokenize("x <- 99999999999999999999").unwrap_err();
        assert_eq!(error.message, "Integer literal 99999999999999999999 is too large");
    }
}
