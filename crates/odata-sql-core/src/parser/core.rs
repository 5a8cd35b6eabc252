//! Parser implementation.

use super::config::{infix_binding_power, is_binary_function, is_unary_function};
use super::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::tree::{NodeId, NodeKind, SyntaxTree, TreeBuilder};

/// OData filter parser.
pub struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    tree: TreeBuilder,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given filter string.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            source,
            lexer,
            current,
            tree: TreeBuilder::new(),
        }
    }

    /// Parses the input as a single filter expression.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the input is not a well-formed filter
    /// expression or if input remains after a complete expression.
    pub fn parse(mut self) -> Result<SyntaxTree, ParseError> {
        let root = self.parse_expression(0)?;
        if !self.current.is_eof() {
            return Err(self.typo_here());
        }
        Ok(self.tree.finish(root))
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Consumes the current token if it matches, otherwise returns `err`.
    fn expect(&mut self, kind: &TokenKind, err: ParseError) -> Result<(), ParseError> {
        if self.current.kind == *kind {
            self.advance();
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Builds a typo error from the source text starting at the current
    /// token. Falls back to the whole input when the failure is at EOF so
    /// the diagnostic never points at an empty fragment.
    fn typo_here(&self) -> ParseError {
        let fragment = self.source[self.current.span.start..].trim();
        if fragment.is_empty() {
            ParseError::PossibleTypo(String::from(self.source.trim()))
        } else {
            ParseError::PossibleTypo(String::from(fragment))
        }
    }

    fn parse_expression(&mut self, min_bp: u8) -> Result<NodeId, ParseError> {
        let mut lhs = self.parse_term()?;

        loop {
            let word = match &self.current.kind {
                TokenKind::Word(w) => w.clone(),
                TokenKind::Eof | TokenKind::RightParen | TokenKind::Comma => break,
                _ => return Err(self.typo_here()),
            };
            let Some((left_bp, right_bp)) = infix_binding_power(&word) else {
                return Err(self.typo_here());
            };
            if left_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_expression(right_bp)?;
            lhs = self.tree.add_binary(word, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<NodeId, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Word(word) if is_unary_function(&word) => {
                self.advance();
                self.parse_unary_call(word)
            }
            TokenKind::Word(word) if is_binary_function(&word) => {
                self.advance();
                self.parse_binary_call(word)
            }
            TokenKind::Word(word) => {
                self.advance();
                Ok(self.tree.add_operand(NodeKind::LeftOperand, word))
            }
            TokenKind::Str(text) => {
                self.advance();
                Ok(self.tree.add_operand(NodeKind::RightOperand, text))
            }
            TokenKind::Integer(text) => {
                self.advance();
                Ok(self.tree.add_operand(NodeKind::RightOperand, text))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression(0)?;
                self.expect(&TokenKind::RightParen, ParseError::MissingClosingBracket)?;
                Ok(inner)
            }
            _ => Err(self.typo_here()),
        }
    }

    /// Parses `name(arg)` after the function name. `now` may be called with
    /// an empty argument list.
    fn parse_unary_call(&mut self, name: String) -> Result<NodeId, ParseError> {
        self.expect(&TokenKind::LeftParen, ParseError::MissingOpeningBracket)?;
        if self.current.kind == TokenKind::RightParen {
            self.advance();
            return Ok(self.tree.add_unary(name, None));
        }
        let arg = self.parse_expression(0)?;
        self.expect(&TokenKind::RightParen, ParseError::MissingClosingBracket)?;
        Ok(self.tree.add_unary(name, Some(arg)))
    }

    /// Parses `name(arg1,arg2)` after the function name.
    fn parse_binary_call(&mut self, name: String) -> Result<NodeId, ParseError> {
        self.expect(&TokenKind::LeftParen, ParseError::MissingOpeningBracket)?;
        let first = self.parse_expression(0)?;
        let comma_err = self.typo_here();
        self.expect(&TokenKind::Comma, comma_err)?;
        let second = self.parse_expression(0)?;
        self.expect(&TokenKind::RightParen, ParseError::MissingClosingBracket)?;
        Ok(self.tree.add_binary(name, first, second))
    }
}
