//! Tokenizer for the JSON-like source text accepted by this crate.
//!
//! The token vocabulary intentionally stays close to plain JSON: the structural
//! punctuation, quoted strings, bare numbers and the two boolean literals. Anything else
//! falls out as a [`TokenKind::Symbol`] and is left for the parser to reject, so an
//! unsupported literal (like JSON's `null` spelled with different case, or a stray
//! identifier) surfaces as a parse error rather than a lexer one.
use std::sync::Arc;

use crate::string_stream::StringStream;
use crate::value::SourcePosition;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Integer(i64),
    Float(f64),
    String(String),
    Symbol(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) position: SourcePosition,
}

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character {character:?} at {position}")]
    UnexpectedCharacter {
        character: char,
        position: SourcePosition,
    },
    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: SourcePosition },
    #[error("invalid escape sequence '\\{escape}' at {position}")]
    InvalidEscape { escape: char, position: SourcePosition },
    #[error("invalid unicode escape at {position}")]
    InvalidUnicodeEscape { position: SourcePosition },
    #[error("lone surrogate in unicode escape at {position}")]
    LoneSurrogate { position: SourcePosition },
    #[error("malformed number at {position}")]
    MalformedNumber { position: SourcePosition },
}

impl LexError {
    pub(crate) fn position(&self) -> SourcePosition {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. }
            | LexError::InvalidUnicodeEscape { position }
            | LexError::LoneSurrogate { position }
            | LexError::MalformedNumber { position } => position.clone(),
        }
    }
}

const STRUCTURAL: &[char] = &['{', '}', '[', ']', ',', ':'];

pub(crate) struct Lexer {
    stream: StringStream,
    allow_line_comments: bool,
}

impl Lexer {
    pub(crate) fn new(source: Arc<str>, allow_line_comments: bool) -> Self {
        Lexer {
            stream: StringStream::new(source),
            allow_line_comments,
        }
    }

    pub(crate) fn tokenize(source: &str, allow_line_comments: bool) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(Arc::from(source), allow_line_comments);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn skip_trivia(&mut self) {
        loop {
            self.stream.eat_whitespace();
            if self.allow_line_comments && self.stream.current() == Some(';') {
                while let Some(c) = self.stream.current() {
                    self.stream.advance();
                    if c == '\n' {
                        break;
                    }
                }
                continue;
            }
            break;
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_trivia();
        let position = self.stream.position();
        let Some(current) = self.stream.current() else {
            return Ok(None);
        };
        let kind = match current {
            '{' => {
                self.stream.advance();
                TokenKind::LeftBrace
            }
            '}' => {
                self.stream.advance();
                TokenKind::RightBrace
            }
            '[' => {
                self.stream.advance();
                TokenKind::LeftBracket
            }
            ']' => {
                self.stream.advance();
                TokenKind::RightBracket
            }
            ',' => {
                self.stream.advance();
                TokenKind::Comma
            }
            ':' => {
                self.stream.advance();
                TokenKind::Colon
            }
            '"' => self.lex_string(&position)?,
            c if c == '-' || c.is_ascii_digit() => self.lex_number(&position)?,
            _ => self.lex_symbol(),
        };
        Ok(Some(Token { kind, position }))
    }

    fn lex_number(&mut self, position: &SourcePosition) -> Result<TokenKind, LexError> {
        let mut text = String::new();
        if self.stream.current() == Some('-') {
            text.push('-');
            self.stream.advance();
        }
        let mut saw_digit = false;
        let mut saw_dot = false;
        while let Some(c) = self.stream.current() {
            if c.is_ascii_digit() {
                saw_digit = true;
                text.push(c);
                self.stream.advance();
            } else if c == '.' && !saw_dot {
                saw_dot = true;
                text.push(c);
                self.stream.advance();
            } else {
                break;
            }
        }
        if !saw_digit {
            return Err(LexError::MalformedNumber {
                position: position.clone(),
            });
        }
        if saw_dot {
            text.parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| LexError::MalformedNumber {
                    position: position.clone(),
                })
        } else {
            text.parse::<i64>()
                .map(TokenKind::Integer)
                .map_err(|_| LexError::MalformedNumber {
                    position: position.clone(),
                })
        }
    }

    fn lex_string(&mut self, position: &SourcePosition) -> Result<TokenKind, LexError> {
        self.stream.advance(); // opening quote
        let mut out = String::new();
        loop {
            match self.stream.current() {
                None => {
                    return Err(LexError::UnterminatedString {
                        position: position.clone(),
                    })
                }
                Some('"') => {
                    self.stream.advance();
                    break;
                }
                Some('\\') => {
                    let escape_position = self.stream.position();
                    self.stream.advance();
                    let escaped = self.stream.current().ok_or(LexError::UnterminatedString {
                        position: position.clone(),
                    })?;
                    match escaped {
                        '"' => {
                            out.push('"');
                            self.stream.advance();
                        }
                        '\\' => {
                            out.push('\\');
                            self.stream.advance();
                        }
                        '/' => {
                            out.push('/');
                            self.stream.advance();
                        }
                        'n' => {
                            out.push('\n');
                            self.stream.advance();
                        }
                        't' => {
                            out.push('\t');
                            self.stream.advance();
                        }
                        'r' => {
                            out.push('\r');
                            self.stream.advance();
                        }
                        'b' => {
                            out.push('\u{8}');
                            self.stream.advance();
                        }
                        'f' => {
                            out.push('\u{c}');
                            self.stream.advance();
                        }
                        'x' => {
                            self.stream.advance();
                            let byte = self.read_hex_digits(2, &escape_position)?;
                            out.push(byte as u8 as char);
                        }
                        'u' => {
                            self.stream.advance();
                            let unit = self.read_hex_digits(4, &escape_position)? as u32;
                            out.push(self.resolve_unicode_unit(unit, &escape_position)?);
                        }
                        other => {
                            return Err(LexError::InvalidEscape {
                                escape: other,
                                position: escape_position,
                            })
                        }
                    }
                }
                Some(c) => {
                    out.push(c);
                    self.stream.advance();
                }
            }
        }
        Ok(TokenKind::String(out))
    }

    fn read_hex_digits(&mut self, count: usize, position: &SourcePosition) -> Result<u32, LexError> {
        let mut value: u32 = 0;
        for _ in 0..count {
            let c = self.stream.current().ok_or(LexError::InvalidUnicodeEscape {
                position: position.clone(),
            })?;
            let digit = c.to_digit(16).ok_or(LexError::InvalidUnicodeEscape {
                position: position.clone(),
            })?;
            value = value * 16 + digit;
            self.stream.advance();
        }
        Ok(value)
    }

    fn resolve_unicode_unit(&mut self, unit: u32, position: &SourcePosition) -> Result<char, LexError> {
        let is_high_surrogate = (0xD800..=0xDBFF).contains(&unit);
        let is_low_surrogate = (0xDC00..=0xDFFF).contains(&unit);
        if is_low_surrogate {
            return Err(LexError::LoneSurrogate {
                position: position.clone(),
            });
        }
        if is_high_surrogate {
            if self.stream.current() == Some('\\') && self.stream.peek_next() == Some('u') {
                self.stream.advance();
                self.stream.advance();
                let low = self.read_hex_digits(4, position)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(LexError::LoneSurrogate {
                        position: position.clone(),
                    });
                }
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined).ok_or(LexError::LoneSurrogate {
                    position: position.clone(),
                });
            }
            return Err(LexError::LoneSurrogate {
                position: position.clone(),
            });
        }
        char::from_u32(unit).ok_or(LexError::InvalidUnicodeEscape {
            position: position.clone(),
        })
    }

    fn lex_symbol(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.stream.current() {
            if c.is_whitespace() || STRUCTURAL.contains(&c) || c == '"' {
                break;
            }
            text.push(c);
            self.stream.advance();
        }
        if text.is_empty() {
            // A structural-looking character that isn't actually structural (shouldn't
            // happen given the dispatch above, but keep the lexer total).
            if let Some(c) = self.stream.current() {
                self.stream.advance();
                text.push(c);
            }
        }
        TokenKind::Symbol(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source, false)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_structural_punctuation() {
        assert_eq!(
            kinds("{}[],:"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn tokenizes_integer_and_float() {
        assert_eq!(
            kinds("-12 3.5"),
            vec![TokenKind::Integer(-12), TokenKind::Float(3.5)]
        );
    }

    #[test]
    fn tokenizes_true_and_false_as_symbols() {
        assert_eq!(
            kinds("true false"),
            vec![
                TokenKind::Symbol("true".into()),
                TokenKind::Symbol("false".into())
            ]
        );
    }

    #[test]
    fn decodes_basic_escapes() {
        assert_eq!(
            kinds(r#""a\nb\tc""#),
            vec![TokenKind::String("a\nb\tc".into())]
        );
    }

    #[test]
    fn decodes_unicode_escape() {
        assert_eq!(kinds(r#""A""#), vec![TokenKind::String("A".into())]);
    }

    #[test]
    fn decodes_surrogate_pair() {
        assert_eq!(
            kinds(r#""😀""#),
            vec![TokenKind::String("\u{1F600}".into())]
        );
    }

    #[test]
    fn lone_surrogate_is_an_error() {
        assert!(matches!(
            Lexer::tokenize(r#""\ud83d""#, false),
            Err(LexError::LoneSurrogate { .. })
        ));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(
            Lexer::tokenize("\"abc", false),
            Err(LexError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn line_comments_require_opt_in() {
        assert!(Lexer::tokenize("; comment\n1", false).is_ok());
        // Without the flag ';' becomes part of a bogus symbol, not a comment.
        assert_eq!(
            kinds("; comment\n1"),
            vec![
                TokenKind::Symbol(";".into()),
                TokenKind::Symbol("comment".into()),
                TokenKind::Integer(1)
            ]
        );
        assert_eq!(kinds("1"), kinds("1"));
        assert_eq!(
            Lexer::tokenize("; comment\n1", true)
                .unwrap()
                .into_iter()
                .map(|t| t.kind)
                .collect::<Vec<_>>(),
            vec![TokenKind::Integer(1)]
        );
    }
}
