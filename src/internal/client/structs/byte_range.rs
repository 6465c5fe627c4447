//! 字节区间与区间生成器。

use std::fmt;

/// 闭区间 `[start, end]`，与 Range 请求头 `bytes=start-end` 的约定一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    /// 最后一个字节的下标（含）
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// 区间包含的字节数。
    pub fn byte_count(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// 按固定分片大小惰性生成区间，偏移递增、首尾相接，恰好覆盖 `[0, length)`。
///
/// 最后一段可能短于 `chunk_size`，并以 `length - 1` 结尾。
#[derive(Debug, Clone)]
pub struct ByteRanges {
    next_start: u64,
    length: u64,
    chunk_size: u64,
}

impl ByteRanges {
    /// `chunk_size` 为 0 时按 1 处理。
    pub fn new(length: u64, chunk_size: u64) -> Self {
        Self {
            next_start: 0,
            length,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Iterator for ByteRanges {
    type Item = ByteRange;

    fn next(&mut self) -> Option<ByteRange> {
        if self.next_start >= self.length {
            return None;
        }
        let end_exclusive = self
            .next_start
            .saturating_add(self.chunk_size)
            .min(self.length);
        let range = ByteRange::new(self.next_start, end_exclusive - 1);
        self.next_start = end_exclusive;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.length.saturating_sub(self.next_start);
        let count = usize::try_from(remaining.div_ceil(self.chunk_size)).unwrap_or(usize::MAX);
        (count, Some(count))
    }
}

impl ExactSizeIterator for ByteRanges {}
