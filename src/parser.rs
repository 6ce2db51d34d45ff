//! Recursive-descent parser turning a token stream into a [`JsonValue`] tree.
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::{JsonObject, JsonValue, SourcePosition};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected token at {position}")]
    UnexpectedToken { position: SourcePosition },
    #[error("expected a string key at {position}")]
    ExpectedKeyString { position: SourcePosition },
    #[error("expected ':' at {position}")]
    ExpectedColon { position: SourcePosition },
    #[error("trailing comma at {position}")]
    TrailingComma { position: SourcePosition },
    #[error("trailing content after the top-level value at {position}")]
    TrailingContent { position: SourcePosition },
}

impl ParseError {
    pub(crate) fn position(&self) -> SourcePosition {
        match self {
            ParseError::UnexpectedEof => SourcePosition::unknown(),
            ParseError::UnexpectedToken { position }
            | ParseError::ExpectedKeyString { position }
            | ParseError::ExpectedColon { position }
            | ParseError::TrailingComma { position }
            | ParseError::TrailingContent { position } => position.clone(),
        }
    }
}

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    /// Lexes and parses a complete document, rejecting any trailing content.
    pub(crate) fn parse_document(
        source: &str,
        allow_line_comments: bool,
    ) -> Result<JsonValue, ParseDocumentError> {
        let tokens = Lexer::tokenize(source, allow_line_comments).map_err(ParseDocumentError::Lex)?;
        let mut parser = Parser { tokens: &tokens, pos: 0 };
        let value = parser.parse_value().map_err(ParseDocumentError::Parse)?;
        if let Some(token) = parser.peek() {
            return Err(ParseDocumentError::Parse(ParseError::TrailingContent {
                position: token.position.clone(),
            }));
        }
        Ok(value)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_value(&mut self) -> Result<JsonValue, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEof)?.clone();
        match token.kind {
            TokenKind::LeftBrace => self.parse_object(token.position),
            TokenKind::LeftBracket => self.parse_array(token.position),
            TokenKind::String(s) => Ok(JsonValue::String(s, token.position)),
            TokenKind::Integer(i) => Ok(JsonValue::Integer(i, token.position)),
            TokenKind::Float(f) => Ok(JsonValue::Float(f, token.position)),
            TokenKind::Symbol(ref s) if s == "true" => Ok(JsonValue::Boolean(true, token.position)),
            TokenKind::Symbol(ref s) if s == "false" => Ok(JsonValue::Boolean(false, token.position)),
            TokenKind::Symbol(ref s) if s == "null" => Ok(JsonValue::Null(token.position)),
            _ => Err(ParseError::UnexpectedToken {
                position: token.position,
            }),
        }
    }

    fn parse_object(&mut self, position: SourcePosition) -> Result<JsonValue, ParseError> {
        let mut map = JsonObject::new();
        if self.peek_is(&TokenKind::RightBrace) {
            self.advance();
            return Ok(JsonValue::Object(map, position));
        }
        loop {
            let key_token = self.advance().ok_or(ParseError::UnexpectedEof)?.clone();
            let key = match key_token.kind {
                TokenKind::String(s) => JsonValue::String(s, key_token.position.clone()),
                _ => {
                    return Err(ParseError::ExpectedKeyString {
                        position: key_token.position,
                    })
                }
            };
            match self.advance() {
                Some(Token {
                    kind: TokenKind::Colon,
                    ..
                }) => {}
                Some(other) => {
                    return Err(ParseError::ExpectedColon {
                        position: other.position.clone(),
                    })
                }
                None => return Err(ParseError::UnexpectedEof),
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            match self.advance() {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => {
                    if self.peek_is(&TokenKind::RightBrace) {
                        let position = self.peek().unwrap().position.clone();
                        return Err(ParseError::TrailingComma { position });
                    }
                }
                Some(Token {
                    kind: TokenKind::RightBrace,
                    ..
                }) => break,
                Some(other) => {
                    return Err(ParseError::UnexpectedToken {
                        position: other.position.clone(),
                    })
                }
                None => return Err(ParseError::UnexpectedEof),
            }
        }
        Ok(JsonValue::Object(map, position))
    }

    fn parse_array(&mut self, position: SourcePosition) -> Result<JsonValue, ParseError> {
        let mut items = Vec::new();
        if self.peek_is(&TokenKind::RightBracket) {
            self.advance();
            return Ok(JsonValue::Array(items, position));
        }
        loop {
            items.push(self.parse_value()?);
            match self.advance() {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => {
                    if self.peek_is(&TokenKind::RightBracket) {
                        let position = self.peek().unwrap().position.clone();
                        return Err(ParseError::TrailingComma { position });
                    }
                }
                Some(Token {
                    kind: TokenKind::RightBracket,
                    ..
                }) => break,
                Some(other) => {
                    return Err(ParseError::UnexpectedToken {
                        position: other.position.clone(),
                    })
                }
                None => return Err(ParseError::UnexpectedEof),
            }
        }
        Ok(JsonValue::Array(items, position))
    }

    fn peek_is(&self, kind: &TokenKind) -> bool {
        self.peek().map(|t| &t.kind) == Some(kind)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseDocumentError {
    #[error(transparent)]
    Lex(#[from] crate::lexer::LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ParseDocumentError {
    pub(crate) fn position(&self) -> SourcePosition {
        match self {
            ParseDocumentError::Lex(e) => e.position(),
            ParseDocumentError::Parse(e) => e.position(),
        }
    }
}
