//! Knuth-Morris-Pratt substring search.
//!
//! The matcher walks UTF-8 code units, so every reported index is a byte
//! offset into the haystack, the same unit [`str::find`] uses. A valid UTF-8
//! target can only match at a char boundary.

use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use trove_core::error::{CoreError, ensure_at_least};

use crate::error::TextResult;

/// Read size used when the caller has no preference.
pub const DEFAULT_BUFFER_SIZE: usize = trove_core::config::DEFAULT_BUFFER_SIZE;

/// ## Summary
/// A compiled search target with its failure table.
///
/// The table is built once and never changes, so a matcher can be shared
/// across threads and searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmpMatcher {
    target: String,
    table: Vec<usize>,
}

impl KmpMatcher {
    /// ## Summary
    /// Compiles `target` for searching.
    ///
    /// ## Errors
    /// Returns [`CoreError::InvalidArgument`] if `target` is empty.
    pub fn new(target: impl Into<String>) -> TextResult<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(CoreError::invalid_argument("target", "search target must not be empty").into());
        }

        let table = failure_table(target.as_bytes());
        tracing::debug!(pattern = %target, len = target.len(), "Compiled KMP matcher");
        Ok(Self { target, table })
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the failure table: entry `i` is the length of the longest
    /// proper prefix of `target[..=i]` that is also its suffix.
    #[must_use]
    pub fn table(&self) -> &[usize] {
        &self.table
    }

    /// Returns the byte offset of every occurrence of the target in `text`,
    /// ascending, overlapping occurrences included.
    #[must_use]
    pub fn search_in<'a>(&'a self, text: &'a str) -> Matches<'a> {
        self.search_in_bytes(text.as_bytes())
    }

    /// Like [`KmpMatcher::search_in`], for haystacks that need not be UTF-8.
    #[must_use]
    pub fn search_in_bytes<'a>(&'a self, haystack: &'a [u8]) -> Matches<'a> {
        Matches {
            automaton: self.automaton(),
            haystack,
            position: 0,
        }
    }

    /// ## Summary
    /// Searches a byte stream read `buffer_size` bytes at a time.
    ///
    /// Automaton state carries over between reads, so matches that straddle
    /// two buffers are found. Indices count bytes from the start of the
    /// stream. A read error ends the sequence after being yielded once.
    ///
    /// ## Errors
    /// Returns an out-of-range error if `buffer_size` is 0.
    pub fn search_in_reader<R: Read>(&self, reader: R, buffer_size: usize) -> TextResult<ReaderMatches<'_, R>> {
        ensure_at_least("buffer_size", i64::try_from(buffer_size).unwrap_or(i64::MAX), 1)?;

        Ok(ReaderMatches {
            automaton: self.automaton(),
            reader,
            buffer: vec![0; buffer_size],
            filled: 0,
            position: 0,
            consumed: 0,
            done: false,
        })
    }

    fn automaton(&self) -> Automaton<'_> {
        Automaton {
            target: self.target.as_bytes(),
            table: &self.table,
            matched: 0,
        }
    }
}

fn failure_table(pattern: &[u8]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    let mut candidate = 0;
    let mut i = 1;
    while i < pattern.len() {
        if pattern[i] == pattern[candidate] {
            candidate += 1;
            table[i] = candidate;
            i += 1;
        } else if candidate != 0 {
            candidate = table[candidate - 1];
        } else {
            table[i] = 0;
            i += 1;
        }
    }
    table
}

/// Matched-prefix state shared by the in-memory and streamed searches.
#[derive(Debug, Clone)]
struct Automaton<'a> {
    target: &'a [u8],
    table: &'a [usize],
    matched: usize,
}

impl Automaton<'_> {
    /// Consumes one byte. Returns true when it completes an occurrence.
    fn feed(&mut self, byte: u8) -> bool {
        while self.matched > 0 && self.target[self.matched] != byte {
            self.matched = self.table[self.matched - 1];
        }
        if self.target[self.matched] == byte {
            self.matched += 1;
        }
        if self.matched == self.target.len() {
            self.matched = self.table[self.matched - 1];
            return true;
        }
        false
    }
}

/// Occurrences of a target in an in-memory haystack.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    automaton: Automaton<'a>,
    haystack: &'a [u8],
    position: usize,
}

impl Iterator for Matches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(&byte) = self.haystack.get(self.position) {
            self.position += 1;
            if self.automaton.feed(byte) {
                return Some(self.position - self.automaton.target.len());
            }
        }
        None
    }
}

impl FusedIterator for Matches<'_> {}

/// Occurrences of a target in a byte stream.
#[derive(Debug)]
pub struct ReaderMatches<'a, R> {
    automaton: Automaton<'a>,
    reader: R,
    buffer: Vec<u8>,
    filled: usize,
    position: usize,
    /// Bytes read before the current buffer.
    consumed: usize,
    done: bool,
}

impl<R: Read> Iterator for ReaderMatches<'_, R> {
    type Item = TextResult<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            while let Some(&byte) = self.buffer[..self.filled].get(self.position) {
                self.position += 1;
                if self.automaton.feed(byte) {
                    let end = self.consumed + self.position;
                    return Some(Ok(end - self.automaton.target.len()));
                }
            }

            self.consumed += self.filled;
            self.filled = 0;
            self.position = 0;
            match self.reader.read(&mut self.buffer) {
                Ok(0) => self.done = true,
                Ok(read) => {
                    self.filled = read;
                    tracing::trace!(read, offset = self.consumed, "Refilled search buffer");
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }
        None
    }
}

impl<R: Read> FusedIterator for ReaderMatches<'_, R> {}
