//! Recursive descent CSS parser.
//!
//! Parses CSS text into a [`StyleSheet`] (a vector of [`RuleSet`]s). Uses the
//! logos-based tokenizer from [`crate::css::tokenizer`].

use logos::Logos;

use crate::css::model::*;
use crate::css::tokenizer::Token;

/// Errors from CSS parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Strip CSS block comments (`/* ... */`), replacing each with a single space.
///
/// An unterminated comment swallows the rest of the input.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return result,
        }
    }
    result.push_str(rest);
    result
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .enumerate()
        .map(|(pos, (token, span))| PToken {
            text: input[span.clone()].to_string(),
            token,
            pos,
            byte_start: span.start,
            byte_end: span.end,
        })
        .collect()
}

/// Parse a CSS string into a [`StyleSheet`].
pub fn parse_css(input: &str) -> Result<StyleSheet, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser { tokens, cursor: 0 };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.push(parser.parse_rule()?);
    }

    Ok(StyleSheet { rules })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|t| &t.token == token)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok),
            Some(tok) => Err(unexpected(
                &tok,
                format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            )),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Consume an identifier naming a class or id after `.` / `#`.
    fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(tok.text),
            Some(tok) => Err(unexpected(
                &tok,
                format!("expected {what} name, got {:?} '{}'", tok.token, tok.text),
            )),
            None => Err(ParseError::UnexpectedEof(format!("expected {what} name"))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token immediately follows the previous one
    /// with no whitespace in between.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.byte_start == prev.byte_end)
    }

    /// Parse a single CSS rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<RuleSet, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(RuleSet {
            selectors,
            declarations,
        })
    }

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];
        while self.peek_is(&Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }
        Ok(selectors)
    }

    /// Parse a single selector: compound selectors joined by combinators.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            match self.peek().map(|t| &t.token) {
                Some(Token::GreaterThan) => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token that the compound parser did not
                // consume was separated by whitespace: descendant combinator.
                Some(
                    Token::Ident
                    | Token::Hash
                    | Token::HexColor
                    | Token::Dot
                    | Token::Star
                    | Token::PseudoClass,
                ) => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector such as `Button.primary:focus`.
    ///
    /// Components after the first are only appended while they are adjacent to
    /// the previous token.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut compound = CompoundSelector::new();

        match self.peek().map(|t| &t.token) {
            Some(Token::Ident) => {
                let name = self.advance().map(|t| t.text).unwrap_or_default();
                compound.push(SelectorComponent::Type(name));
            }
            Some(Token::Star) => {
                self.advance();
                compound.push(SelectorComponent::Universal);
            }
            Some(Token::Dot | Token::Hash | Token::HexColor | Token::PseudoClass) => {
                compound.push(self.parse_simple_selector()?);
            }
            _ => {
                return Err(ParseError::UnexpectedToken {
                    position: self.current_pos(),
                    message: "expected selector part".into(),
                });
            }
        }

        while self.is_adjacent()
            && matches!(
                self.peek().map(|t| &t.token),
                Some(Token::Dot | Token::Hash | Token::HexColor | Token::PseudoClass)
            )
        {
            compound.push(self.parse_simple_selector()?);
        }

        Ok(compound)
    }

    /// Parse one `.class`, `#id` or `:pseudo` component.
    fn parse_simple_selector(&mut self) -> Result<SelectorComponent, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected selector part".into()))?;
        match tok.token {
            Token::Dot => Ok(SelectorComponent::Class(self.expect_name("class")?)),
            Token::Hash => Ok(SelectorComponent::Id(self.expect_name("id")?)),
            // An id made of leading hex digits (`#dec`, `#decrement`) lexes as a
            // color, possibly followed by an adjacent identifier tail.
            Token::HexColor => {
                let mut id = tok.text[1..].to_string();
                if self.is_adjacent() && self.peek_is(&Token::Ident) {
                    if let Some(tail) = self.advance() {
                        id.push_str(&tail.text);
                    }
                }
                Ok(SelectorComponent::Id(id))
            }
            Token::PseudoClass => Ok(SelectorComponent::PseudoClass(tok.text[1..].to_string())),
            _ => Err(unexpected(
                &tok,
                format!("expected selector part, got {:?} '{}'", tok.token, tok.text),
            )),
        }
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();
        while self.peek().is_some_and(|t| t.token != Token::BraceClose) {
            declarations.push(self.parse_declaration()?);
        }
        Ok(declarations)
    }

    /// Parse a single declaration: `property: value1 value2 [!important];`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let property = self.expect_name("property")?;

        let mut values = Vec::new();

        // `all:initial` without a space lexes as a pseudo-class.
        match self.advance() {
            Some(tok) if tok.token == Token::Colon => {}
            Some(tok) if tok.token == Token::PseudoClass => {
                values.push(DeclarationValue::Ident(tok.text[1..].to_string()));
            }
            Some(tok) => {
                return Err(unexpected(
                    &tok,
                    format!("expected Colon, got {:?} '{}'", tok.token, tok.text),
                ));
            }
            None => return Err(ParseError::UnexpectedEof("expected Colon".into())),
        }

        let mut important = false;
        loop {
            match self.peek().map(|t| &t.token) {
                None | Some(Token::Semicolon) | Some(Token::BraceClose) => break,
                Some(Token::Important) => {
                    self.advance();
                    important = true;
                    break;
                }
                Some(_) => values.push(self.parse_declaration_value()?),
            }
        }

        if self.peek_is(&Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration {
            property,
            values,
            important,
        })
    }

    /// Parse a single declaration value token into a [`DeclarationValue`].
    fn parse_declaration_value(&mut self) -> Result<DeclarationValue, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected declaration value".into()))?;

        match tok.token {
            Token::Number => tok
                .text
                .parse()
                .map(DeclarationValue::Number)
                .map_err(|_| unexpected(&tok, format!("invalid number: {}", tok.text))),
            Token::Ident => Ok(DeclarationValue::Ident(tok.text)),
            Token::HexColor => Ok(DeclarationValue::Color(tok.text[1..].to_string())),
            Token::StringLiteral | Token::StringLiteralSingle => Ok(DeclarationValue::String(
                tok.text[1..tok.text.len() - 1].to_string(),
            )),
            ref other => Err(unexpected(
                &tok,
                format!(
                    "unexpected token in declaration value: {:?} '{}'",
                    other, tok.text
                ),
            )),
        }
    }
}

fn unexpected(tok: &PToken, message: String) -> ParseError {
    ParseError::UnexpectedToken {
        position: tok.pos,
        message,
    }
}
