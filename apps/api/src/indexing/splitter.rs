//! Text splitter — cuts a job description into bounded, overlapping chunks.
//!
//! Paragraphs (`"\n\n"`-separated) are the preferred boundaries. Paragraphs
//! longer than `chunk_size` fall back to fixed character windows. Pieces are
//! then merged greedily; every chunk is an exact substring of the source.

use std::collections::VecDeque;
use std::ops::Range;

use thiserror::Error;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
const PARAGRAPH_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error, PartialEq)]
pub enum SplitterError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,

    #[error("chunk_overlap ({overlap}) must be smaller than chunk_size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },
}

/// A bounded substring of the source text. `start`/`end` are character offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChunk {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, SplitterError> {
        if chunk_size == 0 {
            return Err(SplitterError::ZeroChunkSize);
        }
        if chunk_overlap >= chunk_size {
            return Err(SplitterError::OverlapTooLarge {
                size: chunk_size,
                overlap: chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits `text` into ordered chunks. Whitespace-only input yields no chunks.
    pub fn split(&self, text: &str) -> Vec<DocumentChunk> {
        let text = CharText::new(text);
        let pieces = self.pieces(&text);
        self.merge(&text, pieces)
    }

    /// Paragraph spans, with oversized paragraphs cut into character windows.
    /// Ranges are character offsets.
    fn pieces(&self, text: &CharText) -> Vec<Range<usize>> {
        let mut pieces = Vec::new();
        let mut cursor = 0;

        let source = text.source;
        let mut paragraphs: Vec<Range<usize>> = source
            .match_indices(PARAGRAPH_SEPARATOR)
            .map(|(byte_idx, _)| {
                let range = cursor..byte_idx;
                cursor = byte_idx + PARAGRAPH_SEPARATOR.len();
                range
            })
            .collect();
        paragraphs.push(cursor..source.len());

        for bytes in paragraphs {
            if source[bytes.clone()].trim().is_empty() {
                continue;
            }
            let start = text.char_offset(bytes.start);
            let end = text.char_offset(bytes.end);

            if end - start <= self.chunk_size {
                pieces.push(start..end);
                continue;
            }

            let stride = self.chunk_size - self.chunk_overlap;
            let mut window_start = start;
            loop {
                let window_end = (window_start + self.chunk_size).min(end);
                pieces.push(window_start..window_end);
                if window_end == end {
                    break;
                }
                window_start += stride;
            }
        }

        pieces
    }

    fn merge(&self, text: &CharText, pieces: Vec<Range<usize>>) -> Vec<DocumentChunk> {
        let mut chunks = Vec::new();
        let mut current: VecDeque<Range<usize>> = VecDeque::new();

        for piece in pieces {
            if let Some(front) = current.front() {
                if piece.end - front.start > self.chunk_size {
                    chunks.push(text.chunk(chunks.len(), &current));

                    // Keep a tail no longer than the overlap that still leaves room for `piece`.
                    while let (Some(front), Some(back)) = (current.front(), current.back()) {
                        let held = back.end - front.start;
                        if held > self.chunk_overlap || piece.end - front.start > self.chunk_size {
                            current.pop_front();
                        } else {
                            break;
                        }
                    }
                }
            }
            current.push_back(piece);
        }

        if !current.is_empty() {
            chunks.push(text.chunk(chunks.len(), &current));
        }

        chunks
    }
}

/// Source text with a byte→char offset table so spans can be counted in characters.
struct CharText<'a> {
    source: &'a str,
    /// Byte offset of every char boundary, plus `source.len()`.
    boundaries: Vec<usize>,
}

impl<'a> CharText<'a> {
    fn new(source: &'a str) -> Self {
        let mut boundaries: Vec<usize> = source.char_indices().map(|(i, _)| i).collect();
        boundaries.push(source.len());
        Self { source, boundaries }
    }

    fn char_offset(&self, byte_idx: usize) -> usize {
        // Separator matches always land on char boundaries.
        self.boundaries.partition_point(|&b| b < byte_idx)
    }

    fn slice(&self, chars: Range<usize>) -> &'a str {
        &self.source[self.boundaries[chars.start]..self.boundaries[chars.end]]
    }

    fn chunk(&self, index: usize, spans: &VecDeque<Range<usize>>) -> DocumentChunk {
        let start = spans.front().map(|r| r.start).unwrap_or(0);
        let end = spans.back().map(|r| r.end).unwrap_or(start);
        DocumentChunk {
            index,
            start,
            end,
            text: self.slice(start..end).to_string(),
        }
    }
}
