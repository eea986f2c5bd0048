//! Backtrackable cursor over a token slice.
//!
//! A [`TokenStream`] is a `Copy` value: a parser receives one, and on success
//! returns its result together with the advanced cursor. Backtracking is
//! simply dropping the returned cursor and reusing the one that was passed
//! in, so a parser that returns `None` can never have consumed anything.

use crate::token::{Category, Token, EMPTY_TOKEN};

/// Result of a parser: the value plus the cursor after it, or `None`.
pub type Parsed<'a, T> = Option<(T, TokenStream<'a>)>;

/// A parser that can be listed in [`TokenStream::first_some`] and
/// [`TokenStream::first_which_uses_most_tokens`].
pub type ParseFn<'p, 'a, T> = &'p dyn Fn(TokenStream<'a>) -> Parsed<'a, T>;

#[derive(Debug, Clone, Copy)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// The token `offset` places away from the cursor. Negative offsets reach
    /// already consumed tokens; anything out of range is an empty token with
    /// no categories.
    pub fn at(&self, offset: isize) -> &'a Token {
        self.position
            .checked_add_signed(offset)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&EMPTY_TOKEN)
    }

    /// Shorthand for `self.at(offset).has(category)`.
    pub fn has(&self, offset: isize, category: Category) -> bool {
        self.at(offset).has(category)
    }

    /// Moves forward by `n` tokens, stopping at the end.
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        Self {
            tokens: self.tokens,
            position: self.position.saturating_add(n).min(self.tokens.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn with_position(self, position: usize) -> Self {
        Self {
            tokens: self.tokens,
            position: position.min(self.tokens.len()),
        }
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn finished(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Offset of the first token at or after `from` that does not have
    /// `category`.
    pub fn index_of_without_category(&self, category: Category, from: usize) -> usize {
        let mut index = from;
        while self.at(index as isize).has(category) {
            index += 1;
        }
        index
    }

    /// Runs `parse`, first skipping tokens of `category` when `should_skip`.
    ///
    /// If `parse` fails nothing is consumed, including the skipped tokens.
    pub fn try_or_skip<T>(
        self,
        category: Category,
        should_skip: bool,
        parse: impl FnOnce(Self) -> Parsed<'a, T>,
    ) -> Parsed<'a, T> {
        let start = if should_skip {
            self.advance(self.index_of_without_category(category, 0))
        } else {
            self
        };
        parse(start)
    }

    /// Runs every parser from this position and keeps the one that ends
    /// furthest. Ties go to the parser listed first.
    pub fn first_which_uses_most_tokens<T>(self, parsers: &[ParseFn<'_, 'a, T>]) -> Parsed<'a, T> {
        let mut best: Parsed<'a, T> = None;
        for parser in parsers {
            if let Some((value, end)) = parser(self) {
                if best
                    .as_ref()
                    .is_none_or(|(_, best_end)| end.position > best_end.position)
                {
                    best = Some((value, end));
                }
            }
        }
        best
    }

    /// The first parser, in order, that succeeds from this position.
    pub fn first_some<T>(self, parsers: &[ParseFn<'_, 'a, T>]) -> Parsed<'a, T> {
        parsers.iter().find_map(|parser| parser(self))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
