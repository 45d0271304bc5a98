//! Layout Encoder - the canonical code string of a room grid.
//!
//! Every slot of the grid, in traversal order, becomes one token:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `?` | slot not observed |
//! | `_` `#` `$` `S` `F` | empty, start, end, scavengers, farming |
//! | `C` + boss letter | combat room, e.g. `Ct` for Tekton or `C?` for an unknown boss |
//! | `P` + puzzle letter | puzzle room, e.g. `Pc` for crabs |
//!
//! No token is a prefix of another, so a code parses back into exactly one grid.

use raid_rules::{Boss, Puzzle, Room, RoomKind, RoomPosition, RoomType, MAX_ROOMS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbol of a slot that was not observed.
pub const UNKNOWN_SYMBOL: char = '?';

/// Errors raised while parsing a code string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Unexpected symbol '{symbol}' at offset {offset}")]
    UnexpectedSymbol { symbol: char, offset: usize },

    #[error("Missing {expected} letter after '{room}' at end of code")]
    MissingVariant { room: char, expected: &'static str },

    #[error("Code has {found} slots, expected {MAX_ROOMS}")]
    WrongLength { found: usize },
}

/// One slot of a layout code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Token {
    #[default]
    Unknown,
    Room(RoomKind),
}

impl Token {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Token::Unknown)
    }

    pub fn kind(&self) -> Option<RoomKind> {
        match self {
            Token::Unknown => None,
            Token::Room(kind) => Some(*kind),
        }
    }

    pub fn room_type(&self) -> Option<RoomType> {
        self.kind().map(|kind| kind.room_type())
    }
}

impl From<Option<&Room>> for Token {
    fn from(room: Option<&Room>) -> Self {
        room.map_or(Token::Unknown, |room| Token::Room(room.kind))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Token::Room(kind) = self else {
            return write!(f, "{UNKNOWN_SYMBOL}");
        };

        write!(f, "{}", kind.room_type().symbol())?;
        match kind {
            RoomKind::Combat(boss) => write!(f, "{}", boss.symbol()),
            RoomKind::Puzzle(puzzle) => write!(f, "{}", puzzle.symbol()),
            _ => Ok(()),
        }
    }
}

/// Canonical encoding of a full room grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LayoutCode {
    tokens: [Token; MAX_ROOMS],
}

impl LayoutCode {
    /// Encode a grid indexed by [`RoomPosition::index`]. Missing entries encode as unknown.
    pub fn encode(rooms: &[Option<Room>]) -> Self {
        let mut tokens = [Token::Unknown; MAX_ROOMS];
        for (token, room) in tokens.iter_mut().zip(rooms) {
            *token = Token::from(room.as_ref());
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token; MAX_ROOMS] {
        &self.tokens
    }

    pub fn token(&self, position: RoomPosition) -> Token {
        self.tokens[position.index()]
    }

    /// Number of observed slots.
    pub fn known_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_unknown()).count()
    }
}

impl Default for LayoutCode {
    fn default() -> Self {
        Self {
            tokens: [Token::Unknown; MAX_ROOMS],
        }
    }
}

impl fmt::Display for LayoutCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|token| write!(f, "{token}"))
    }
}

impl FromStr for LayoutCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parsed = Vec::with_capacity(MAX_ROOMS);
        let mut chars = s.char_indices();

        while let Some((offset, symbol)) = chars.next() {
            if symbol == UNKNOWN_SYMBOL {
                parsed.push(Token::Unknown);
                continue;
            }

            let room_type =
                RoomType::from_symbol(symbol).ok_or(CodeError::UnexpectedSymbol { symbol, offset })?;

            let kind = match room_type {
                RoomType::Combat => {
                    let (offset, letter) = chars.next().ok_or(CodeError::MissingVariant {
                        room: symbol,
                        expected: "boss",
                    })?;
                    let boss = Boss::from_symbol(letter).ok_or(CodeError::UnexpectedSymbol {
                        symbol: letter,
                        offset,
                    })?;
                    RoomKind::Combat(boss)
                }
                RoomType::Puzzle => {
                    let (offset, letter) = chars.next().ok_or(CodeError::MissingVariant {
                        room: symbol,
                        expected: "puzzle",
                    })?;
                    let puzzle = Puzzle::from_symbol(letter).ok_or(CodeError::UnexpectedSymbol {
                        symbol: letter,
                        offset,
                    })?;
                    RoomKind::Puzzle(puzzle)
                }
                other => RoomKind::unresolved(other),
            };
            parsed.push(Token::Room(kind));
        }

        let tokens: [Token; MAX_ROOMS] = parsed
            .try_into()
            .map_err(|rest: Vec<Token>| CodeError::WrongLength { found: rest.len() })?;
        Ok(Self { tokens })
    }
}

impl TryFrom<String> for LayoutCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LayoutCode> for String {
    fn from(code: LayoutCode) -> Self {
        code.to_string()
    }
}
