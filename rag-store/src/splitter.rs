//! Recursive character splitter.
//!
//! Splits on the coarsest separator present (paragraphs, then lines, then
//! words, then single chars), merges small pieces back up to `chunk_size`,
//! and carries up to `chunk_overlap` chars of trailing pieces into the next
//! chunk. All lengths are counted in chars, not bytes.

use std::collections::VecDeque;

use tracing::warn;

use crate::errors::RagError;

const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

#[derive(Clone, Debug)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    /// # Errors
    /// `RagError::Config` when `chunk_size` is zero or not larger than `chunk_overlap`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, RagError> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "invalid splitter sizes: chunk_size={chunk_size}, chunk_overlap={chunk_overlap}"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Splits `text` into trimmed, non-empty chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let mut separator = separators.last().map(String::as_str).unwrap_or("");
        let mut finer: &[String] = &[];
        for (i, s) in separators.iter().enumerate() {
            if s.is_empty() {
                separator = "";
                break;
            }
            if text.contains(s.as_str()) {
                separator = s.as_str();
                finer = &separators[i + 1..];
                break;
            }
        }

        let splits: Vec<&str> = if separator.is_empty() {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        } else {
            text.split(separator).filter(|s| !s.is_empty()).collect()
        };

        let mut out = Vec::new();
        let mut small: Vec<&str> = Vec::new();
        for piece in splits {
            if char_len(piece) < self.chunk_size {
                small.push(piece);
                continue;
            }
            if !small.is_empty() {
                out.extend(self.merge_splits(&small, separator));
                small.clear();
            }
            if finer.is_empty() {
                out.push(piece.to_string());
            } else {
                out.extend(self.split_recursive(piece, finer));
            }
        }
        if !small.is_empty() {
            out.extend(self.merge_splits(&small, separator));
        }
        out
    }

    fn merge_splits(&self, splits: &[&str], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut docs = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for &piece in splits {
            let len = char_len(piece);
            let joiner = |cur: &VecDeque<&str>| if cur.is_empty() { 0 } else { sep_len };

            if total + len + joiner(&current) > self.chunk_size {
                if total > self.chunk_size {
                    warn!(
                        total,
                        chunk_size = self.chunk_size,
                        "created a chunk longer than the configured size"
                    );
                }
                if !current.is_empty() {
                    if let Some(doc) = join_trimmed(&current, separator) {
                        docs.push(doc);
                    }
                    // Drop leading pieces until what is left fits as overlap.
                    while !current.is_empty()
                        && (total > self.chunk_overlap
                            || (total + len + joiner(&current) > self.chunk_size && total > 0))
                    {
                        let dropped = if current.len() > 1 { sep_len } else { 0 };
                        if let Some(first) = current.pop_front() {
                            total = total.saturating_sub(char_len(first) + dropped);
                        }
                    }
                }
            }

            current.push_back(piece);
            total += len + if current.len() > 1 { sep_len } else { 0 };
        }

        if let Some(doc) = join_trimmed(&current, separator) {
            docs.push(doc);
        }
        docs
    }
}

fn join_trimmed(pieces: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = pieces.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
