//! crates/logging-sink/src/line_buffer.rs
//! Fixed-capacity, NUL-terminated line storage.

use std::fmt;

/// Capacity of the line buffer used by the dispatcher, including the NUL terminator.
pub const LINE_CAPACITY: usize = 4096;

/// Stack-allocated buffer that renders exactly one diagnostic line.
///
/// The buffer never grows. Text that does not fit is cut at the last UTF-8
/// character boundary that leaves room for the NUL terminator, and the
/// truncation is remembered so callers can stop formatting early. After
/// [`finish_line`](Self::finish_line) the contents end in a newline and the
/// byte following the contents is always `0`.
///
/// # Examples
///
/// ```
/// use logging_sink::LineBuffer;
///
/// let mut line = LineBuffer::<16>::new();
/// line.push_str("0123456789abcdefghij");
/// line.finish_line();
///
/// assert!(line.is_truncated());
/// assert_eq!(line.as_str(), "0123456789abcd\n");
/// assert_eq!(line.as_bytes_with_nul().last(), Some(&0));
/// ```
#[derive(Clone)]
pub struct LineBuffer<const N: usize = LINE_CAPACITY> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> LineBuffer<N> {
    const LIMIT: usize = {
        assert!(N >= 2, "a line buffer needs room for a newline and a NUL");
        N - 1
    };

    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        let _ = Self::LIMIT;
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Total capacity in bytes, including the NUL terminator.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of content bytes, excluding the NUL terminator.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once any write did not fit.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Appends as much of `text` as fits, returning `false` if anything was dropped.
    pub fn push_str(&mut self, text: &str) -> bool {
        let available = Self::LIMIT - self.len;
        let mut take = text.len().min(available);
        while !text.is_char_boundary(take) {
            take -= 1;
        }

        self.bytes[self.len..self.len + take].copy_from_slice(&text.as_bytes()[..take]);
        self.len += take;
        self.bytes[self.len] = 0;

        if take < text.len() {
            self.truncated = true;
        }
        !self.truncated
    }

    /// Guarantees the contents end in a newline without exceeding capacity.
    ///
    /// When there is no room left, the final character is replaced by the
    /// newline instead.
    pub fn finish_line(&mut self) {
        if self.bytes[..self.len].last() == Some(&b'\n') {
            return;
        }

        if self.len == Self::LIMIT {
            let mut start = self.len - 1;
            while start > 0 && (self.bytes[start] & 0b1100_0000) == 0b1000_0000 {
                start -= 1;
            }
            self.len = start;
        }

        self.bytes[self.len] = b'\n';
        self.len += 1;
        self.bytes[self.len] = 0;
    }

    /// Discards the contents and the truncation flag.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
        self.bytes[0] = 0;
    }

    /// The rendered bytes, excluding the NUL terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The rendered bytes followed by the NUL terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    /// The rendered text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match std::str::from_utf8(self.as_bytes()) {
            Ok(text) => text,
            Err(error) => {
                std::str::from_utf8(&self.bytes[..error.valid_up_to()]).unwrap_or_default()
            }
        }
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for LineBuffer<N> {
    /// Fails once the buffer is full so `write!` stops formatting early.
    fn write_str(&mut self, text: &str) -> fmt::Result {
        if self.push_str(text) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

impl<const N: usize> fmt::Debug for LineBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuffer")
            .field("capacity", &N)
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn new_buffer_is_empty_and_nul_terminated() {
        let line = LineBuffer::<8>::new();
        assert!(line.is_empty());
        assert!(!line.is_truncated());
        assert_eq!(line.as_bytes_with_nul(), b"\0");
        assert_eq!(line.capacity(), 8);
    }

    #[test]
    fn finish_line_appends_missing_newline() {
        let mut line = LineBuffer::<32>::new();
        line.push_str("hello");
        line.finish_line();
        assert_eq!(line.as_str(), "hello\n");
        assert_eq!(line.as_bytes_with_nul(), b"hello\n\0");
    }

    #[test]
    fn finish_line_keeps_existing_newline() {
        let mut line = LineBuffer::<32>::new();
        line.push_str("hello\n");
        line.finish_line();
        assert_eq!(line.as_str(), "hello\n");
    }

    #[test]
    fn finish_line_is_idempotent() {
        let mut line = LineBuffer::<32>::new();
        line.push_str("once");
        line.finish_line();
        line.finish_line();
        assert_eq!(line.as_str(), "once\n");
    }

    #[test]
    fn overflow_truncates_and_reports() {
        let mut line = LineBuffer::<8>::new();
        assert!(line.push_str("abc"));
        assert!(!line.push_str("defghijk"));
        assert!(line.is_truncated());
        assert_eq!(line.as_str(), "abcdefg");
        assert_eq!(line.len(), 7);
    }

    #[test]
    fn full_buffer_overwrites_final_byte_with_newline() {
        let mut line = LineBuffer::<8>::new();
        line.push_str("abcdefghij");
        line.finish_line();
        assert_eq!(line.as_str(), "abcdef\n");
        assert_eq!(line.as_bytes_with_nul().len(), 8);
        assert_eq!(line.as_bytes_with_nul()[7], 0);
    }

    #[test]
    fn exactly_full_with_newline_is_untouched() {
        let mut line = LineBuffer::<8>::new();
        line.push_str("abcdef\n");
        line.finish_line();
        assert!(!line.is_truncated());
        assert_eq!(line.as_str(), "abcdef\n");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut line = LineBuffer::<6>::new();
        line.push_str("aé€");
        assert!(line.is_truncated());
        assert_eq!(line.as_str(), "aé");

        line.finish_line();
        assert_eq!(line.as_str(), "aé\n");
    }

    #[test]
    fn full_multibyte_tail_is_replaced_as_a_whole() {
        let mut line = LineBuffer::<5>::new();
        line.push_str("ab€");
        assert_eq!(line.len(), 2);
        line.push_str("cd");
        assert_eq!(line.as_str(), "abcd");

        let mut line = LineBuffer::<6>::new();
        line.push_str("ab€");
        assert_eq!(line.as_str(), "ab€");
        line.finish_line();
        assert_eq!(line.as_str(), "ab\n");
    }

    #[test]
    fn fmt_write_stops_on_overflow() {
        let mut line = LineBuffer::<10>::new();
        let result = write!(line, "{}-{}", "worker", 123_456);
        assert!(result.is_err());
        assert!(line.is_truncated());
        assert_eq!(line.as_str(), "worker-12");
    }

    #[test]
    fn clear_resets_state() {
        let mut line = LineBuffer::<4>::new();
        line.push_str("overflowing");
        line.clear();
        assert!(line.is_empty());
        assert!(!line.is_truncated());
        assert_eq!(line.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn default_capacity_matches_constant() {
        let line: LineBuffer = LineBuffer::default();
        assert_eq!(line.capacity(), LINE_CAPACITY);
    }

    #[test]
    fn debug_shows_text() {
        let mut line = LineBuffer::<16>::new();
        line.push_str("dbg");
        let rendered = format!("{line:?}");
        assert!(rendered.contains("LineBuffer"));
        assert!(rendered.contains("dbg"));
    }
}
