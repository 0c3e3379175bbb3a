/// Incremental UTF-8 decoder for byte chunks.
///
/// A multi-byte scalar split across a chunk boundary is held back until its
/// remaining bytes arrive; invalid sequences decode to U+FFFD instead of
/// failing the stream.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Create a decoder with no pending bytes
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning every complete scalar value.
    pub fn push(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();

        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    rest = &[];
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Incomplete trailing sequence, wait for the
                            // next chunk.
                            self.pending = after.to_vec();
                            rest = &[];
                        }
                    }
                }
            }
        }

        out
    }
}

/// Reassembles newline-delimited lines from arbitrarily split text chunks.
///
/// Holds a single buffer; each push appends, drains every line the chunk
/// closed, and retains the trailing (possibly incomplete) segment.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: String,
}

impl LineAssembler {
    /// Create an assembler with an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every complete line it closes, in order.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);

        let mut lines = Vec::new();
        while let Some(line_end) = self.buffer.find('\n') {
            let line = self.buffer[..line_end].to_string();
            self.buffer = self.buffer[line_end + 1..].to_string();
            lines.push(line);
        }
        lines
    }

    /// Consume the assembler, yielding the trailing segment if any.
    ///
    /// A final frame is still a frame even when the server's last write
    /// lacks a terminating newline.
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `text` split at the given byte offsets and collect all lines.
    fn assemble(text: &str, splits: &[usize]) -> (Vec<String>, Option<String>) {
        let bytes = text.as_bytes();
        let mut utf8 = Utf8StreamDecoder::new();
        let mut assembler = LineAssembler::new();
        let mut lines = Vec::new();

        let mut start = 0;
        for &end in splits.iter().chain(std::iter::once(&bytes.len())) {
            let decoded = utf8.push(&bytes[start..end]);
            lines.extend(assembler.push(&decoded));
            start = end;
        }
        (lines, assembler.finish())
    }

    #[test]
    fn test_lines_are_invariant_under_chunk_boundaries() {
        let text = "first line\nsecond line\nthird\n";
        let expected = vec!["first line", "second line", "third"];

        for splits in [
            vec![],
            vec![1],
            vec![5, 11],
            vec![10, 11, 12],
            vec![3, 6, 9, 20, 25],
        ] {
            let (lines, trailing) = assemble(text, &splits);
            assert_eq!(lines, expected, "splits: {:?}", splits);
            assert_eq!(trailing, None);
        }
    }

    #[test]
    fn test_multibyte_scalar_split_across_chunks() {
        // 'é' is two bytes; split in the middle of it
        let text = "caf\u{e9} ouvert\n";
        let split = text.find('\u{e9}').unwrap() + 1;
        let (lines, _) = assemble(text, &[split]);
        assert_eq!(lines, vec!["caf\u{e9} ouvert"]);
    }

    #[test]
    fn test_four_byte_scalar_split_three_ways() {
        let text = "ok \u{1F50D}\n";
        let start = text.find('\u{1F50D}').unwrap();
        let (lines, _) = assemble(text, &[start + 1, start + 2, start + 3]);
        assert_eq!(lines, vec!["ok \u{1F50D}"]);
    }

    #[test]
    fn test_invalid_bytes_are_replaced_not_fatal() {
        let mut utf8 = Utf8StreamDecoder::new();
        let decoded = utf8.push(b"a\xffb");
        assert_eq!(decoded, "a\u{FFFD}b");
    }

    #[test]
    fn test_trailing_segment_is_flushed_at_finish() {
        let mut assembler = LineAssembler::new();
        assert_eq!(assembler.push("complete\npart"), vec!["complete"]);
        assert_eq!(assembler.finish(), Some("part".to_string()));
    }

    #[test]
    fn test_empty_lines_are_preserved() {
        let mut assembler = LineAssembler::new();
        assert_eq!(assembler.push("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(assembler.finish(), None);
    }
}
