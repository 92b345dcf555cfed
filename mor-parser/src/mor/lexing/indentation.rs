//! Indentation mapper for morcomb token streams
//!
//!     Long morcomb tiers continue on indented rows:
//!
//!         %mor:	pro|I v|see det|a
//!         	n|dog^v|dog
//!         %comb:	I see a dog
//!
//!     This pass turns the leading blanks of each line into structure. It keeps a stack of
//!     open indentation widths (starting at 0) and, at the start of every non-blank line:
//!
//!         - wider than the top: push the width and emit Indent
//!         - narrower than the top: pop and emit one Dedent per closed level; the width must
//!           then equal the new top, otherwise the line closes no block and lexing fails
//!         - equal: emit nothing
//!
//!     Leading blanks are consumed. Blank lines pass through untouched and never change the
//!     level. Every block still open at the end of input is closed. Synthetic tokens get an
//!     empty span at the start of the line that caused them.

use std::ops::Range as ByteRange;

use crate::mor::ast::range::SourceLocation;
use crate::mor::error::LexError;
use crate::mor::lexing::tier_tokens::TierToken;

pub struct IndentationMapper<'a> {
    locator: SourceLocation<'a>,
    levels: Vec<usize>,
}

impl<'a> IndentationMapper<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            locator: SourceLocation::new(source),
            levels: vec![0],
        }
    }

    fn current(&self) -> usize {
        self.levels.last().copied().unwrap_or(0)
    }

    pub fn map(
        &mut self,
        tokens: Vec<(TierToken, ByteRange<usize>)>,
    ) -> Result<Vec<(TierToken, ByteRange<usize>)>, LexError> {
        let mut result = Vec::with_capacity(tokens.len());
        let mut tokens = tokens.into_iter();

        while let Some((token, span)) = tokens.next() {
            // Every iteration of this loop starts a line
            let (width, first) = match token {
                TierToken::Spaces(width) => match tokens.next() {
                    Some(next) => (width, next),
                    None => break,
                },
                other => (0, (other, span)),
            };

            if first.0 == TierToken::Newline {
                result.push(first);
                continue;
            }

            let line_start = first.1.start;
            self.open_or_close(width, line_start, &mut result)?;

            let mut current = Some(first);
            while let Some((token, span)) = current.take() {
                let ends_line = token == TierToken::Newline;
                result.push((token, span));
                if ends_line {
                    break;
                }
                current = tokens.next();
            }
        }

        let end = result.last().map_or(0, |(_, span)| span.end);
        while self.levels.len() > 1 {
            self.levels.pop();
            result.push((TierToken::Dedent, end..end));
        }

        Ok(result)
    }

    fn open_or_close(
        &mut self,
        width: usize,
        line_start: usize,
        result: &mut Vec<(TierToken, ByteRange<usize>)>,
    ) -> Result<(), LexError> {
        if width > self.current() {
            self.levels.push(width);
            result.push((TierToken::Indent, line_start..line_start));
            return Ok(());
        }

        while width < self.current() {
            self.levels.pop();
            result.push((TierToken::Dedent, line_start..line_start));
        }

        if width != self.current() {
            return Err(LexError::Indentation {
                position: self.locator.byte_to_position(line_start),
                width,
            });
        }
        Ok(())
    }
}
