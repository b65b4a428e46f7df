//! Parser for the command script.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::circuit::GateType;
use crate::error::{BoardError, Result};

/// Parser for command scripts.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire script.
    pub fn parse(&mut self) -> Result<Script> {
        let mut script = Script::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match self.current.kind {
                TokenKind::Directive => {
                    if !script.commands.is_empty() {
                        return Err(BoardError::parse(
                            self.current.line,
                            format!("{} must come before any command", self.current.text),
                        ));
                    }
                    self.parse_directive(&mut script)?;
                }
                TokenKind::Identifier => {
                    let command = self.parse_command()?;
                    script.commands.push(command);
                }
                _ => {
                    return Err(BoardError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // One statement per line
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(BoardError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(script)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(BoardError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn name(&mut self) -> Result<String> {
        Ok(self.expect(TokenKind::Identifier)?.text)
    }

    fn count(&mut self) -> Result<usize> {
        let tok = self.expect(TokenKind::Number)?;
        tok.text.parse::<usize>().map_err(|_| {
            BoardError::parse(
                tok.line,
                format!("expected a non-negative integer, got {}", tok.text),
            )
        })
    }

    fn coordinate(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        tok.text
            .parse::<f64>()
            .map_err(|_| BoardError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    fn level(&mut self) -> Result<bool> {
        let tok = self.current.clone();
        let value = match (tok.kind, tok.text.to_lowercase().as_str()) {
            (TokenKind::Number, "1") => true,
            (TokenKind::Number, "0") => false,
            (TokenKind::Identifier, "true" | "on" | "high") => true,
            (TokenKind::Identifier, "false" | "off" | "low") => false,
            _ => {
                return Err(BoardError::parse(
                    tok.line,
                    format!("expected 0 or 1, got {:?}", tok.text),
                ))
            }
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_directive(&mut self, script: &mut Script) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".rounds" => script.rounds = Some(self.count()?),
            ".passes" => {
                let passes = self.count()?;
                if passes == 0 {
                    return Err(BoardError::parse(line, ".passes must be at least 1"));
                }
                script.passes = Some(passes);
            }
            _ => {
                return Err(BoardError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_command(&mut self) -> Result<Command> {
        let keyword = self.current.text.to_lowercase();
        let line = self.current.line;
        self.advance()?;

        let kind = match keyword.as_str() {
            "source" => CommandKind::Source { name: self.name()? },
            "gate" => {
                let name = self.name()?;
                let type_tok = self.expect(TokenKind::Identifier)?;
                let gate_type = GateType::from_keyword(&type_tok.text).ok_or_else(|| {
                    BoardError::UnknownGateType {
                        name: type_tok.text.clone(),
                        line,
                    }
                })?;
                CommandKind::Gate { name, gate_type }
            }
            "toggle" => CommandKind::Toggle { name: self.name()? },
            "connect" => CommandKind::Connect {
                from: self.name()?,
                gate: self.name()?,
                terminal: self.count()?,
            },
            "disconnect" => CommandKind::Disconnect {
                gate: self.name()?,
                terminal: self.count()?,
            },
            "move" => CommandKind::Move {
                name: self.name()?,
                x: self.coordinate()?,
                y: self.coordinate()?,
            },
            "delete" => CommandKind::Delete { name: self.name()? },
            "expect" => CommandKind::Expect {
                name: self.name()?,
                value: self.level()?,
            },
            "show" => CommandKind::Show,
            _ => {
                return Err(BoardError::parse(
                    line,
                    format!("unknown command: {}", keyword),
                ));
            }
        };

        Ok(Command { kind, line })
    }
}
