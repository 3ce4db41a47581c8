//! Token extraction from effect value strings

use crate::models::Warning;

/// A lexical token of a value string.
///
/// Words are whitespace-delimited runs such as `1500`, `.9,70` or `Linear`.
/// Bracket groups keep their inner text (trimmed) so `[0.7 0.9]` becomes
/// `Group("0.7 0.9")`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    Word(&'a str),
    Group(&'a str),
    /// Unclosed, nested or stray bracket text
    Malformed(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_word(&self) -> Option<&'a str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }
}

/// Splits a value string into words and bracket groups.
///
/// Brackets always delimit tokens, so `0[1 2]` yields a word and a group.
/// Malformed bracket text generates a warning and a [`Token::Malformed`].
///
/// # Examples
///
/// ```
/// use popfx::tokenizer::{tokenize, Token};
///
/// let (tokens, warnings) = tokenize("[-720 720] 0,39.999996");
/// assert_eq!(tokens, vec![Token::Group("-720 720"), Token::Word("0,39.999996")]);
/// assert!(warnings.is_empty());
///
/// let (tokens, warnings) = tokenize("[1 2");
/// assert_eq!(tokens, vec![Token::Malformed("[1 2")]);
/// assert_eq!(warnings.len(), 1);
/// ```
pub fn tokenize(input: &str) -> (Vec<Token<'_>>, Vec<Warning>) {
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if let Some(after) = rest.strip_prefix('[') {
            match after.find(']') {
                Some(end) => {
                    let inner = &after[..end];
                    if inner.contains('[') {
                        let text = &rest[..end + 2];
                        warnings.push(Warning::new(format!("Nested bracket group '{}'", text)));
                        tokens.push(Token::Malformed(text));
                    } else {
                        tokens.push(Token::Group(inner.trim()));
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    warnings.push(Warning::new(format!("Unclosed bracket group '{}'", rest)));
                    tokens.push(Token::Malformed(rest));
                    break;
                }
            }
        } else if let Some(after) = rest.strip_prefix(']') {
            warnings.push(Warning::new("Unexpected ']' outside a bracket group"));
            tokens.push(Token::Malformed(&rest[..1]));
            rest = after;
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '[' || c == ']')
                .unwrap_or(rest.len());
            tokens.push(Token::Word(&rest[..end]));
            rest = &rest[end..];
        }
    }

    (tokens, warnings)
}
