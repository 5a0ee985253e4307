use logos::Logos;

use crate::{
    error::ReadError,
    expression::{
        registry::{builtin_function, builtin_operator},
        token::{Function, Token},
    },
};

/// A lexical element of postfix text.
///
/// Postfix text is a whitespace separated list of numbers, names and operator
/// symbols, for example `x 2 ^ 3 x * +`. Unary minus and plus are spelled
/// `neg` and `pos` so that they cannot be confused with their binary forms.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Lexeme<'s> {
    /// Numeric literals such as `3`, `-2.5`, `.5` or `1e-10`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    #[regex(r"-?\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    #[token("inf", |lex| lex.slice())]
    #[token("-inf", |lex| lex.slice())]
    #[token("NaN", |lex| lex.slice())]
    Number(&'s str),
    /// `neg`
    #[token("neg")]
    Neg,
    /// `pos`
    #[token("pos")]
    Pos,
    /// Variable or function names such as `x`, `sin` or `π`.
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*", |lex| lex.slice())]
    Name(&'s str),
    /// One of `+ - * / ^ %`.
    #[regex(r"[-+*/^%]", |lex| lex.slice().chars().next())]
    Symbol(char),
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Reads postfix text into a token sequence.
///
/// Names are resolved in order against `custom` functions, then builtin
/// functions; any other name becomes a variable.
///
/// # Errors
/// Returns [`ReadError::UnexpectedToken`] for characters that do not form a
/// lexeme.
///
/// # Example
/// ```
/// use rpnexpr::expression::{reader::read_postfix, token::Token};
///
/// let tokens = read_postfix("3 x +", &[]).unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1], Token::variable("x"));
/// ```
pub fn read_postfix(source: &str, custom: &[Function]) -> Result<Vec<Token>, ReadError> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let position = lexer.span().start;
        let Ok(lexeme) = lexeme else {
            return Err(ReadError::UnexpectedToken { token: lexer.slice().to_string(),
                                                    position });
        };

        let token = match lexeme {
            Lexeme::Number(text) => Token::Number(parse_number(text)),
            Lexeme::Name(name) => resolve_name(name, custom),
            Lexeme::Neg => operator('-', 1, position, lexer.slice())?,
            Lexeme::Pos => operator('+', 1, position, lexer.slice())?,
            Lexeme::Symbol(symbol) => operator(symbol, 2, position, lexer.slice())?,
            Lexeme::Ignored => continue,
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// Every slice matched by [`Lexeme::Number`] is valid `f64` syntax.
fn parse_number(text: &str) -> f64 {
    text.parse().unwrap_or(f64::NAN)
}

fn resolve_name(name: &str, custom: &[Function]) -> Token {
    custom.iter()
          .find(|f| f.name() == name)
          .cloned()
          .or_else(|| builtin_function(name))
          .map_or_else(|| Token::variable(name), Token::Function)
}

fn operator(symbol: char, arity: usize, position: usize, slice: &str) -> Result<Token, ReadError> {
    builtin_operator(symbol, arity).map(Token::Operator)
                                   .ok_or_else(|| ReadError::UnexpectedToken { token:
                                                                                   slice.to_string(),
                                                                               position })
}
