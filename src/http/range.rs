//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing for partial responses (RFC 7233).

/// Byte range requested by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRange {
    /// Start byte position
    pub start: usize,
    /// Inclusive end position; `None` means until end of file
    pub end: Option<usize>,
}

impl ByteRange {
    /// The inclusive end position for a file of `file_size` bytes.
    #[inline]
    #[must_use]
    pub fn end_position(&self, file_size: usize) -> usize {
        self.end.unwrap_or_else(|| file_size.saturating_sub(1))
    }
}

/// Outcome of parsing a Range header against a file size.
#[derive(Debug)]
pub enum RangeOutcome {
    /// Range can be served with 206
    Satisfiable(ByteRange),
    /// Range lies outside the file; respond 416
    Unsatisfiable,
    /// No Range header, non-bytes unit, multi-range or malformed;
    /// serve the full content
    Ignored,
}

/// Parse a Range header value.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
/// Multi-range requests are not supported and fall back to full content.
///
/// # Examples
/// ```
/// use menuserve::http::range::{parse, RangeOutcome};
///
/// assert!(matches!(parse(Some("bytes=0-99"), 1000), RangeOutcome::Satisfiable(_)));
/// assert!(matches!(parse(None, 1000), RangeOutcome::Ignored));
/// ```
#[must_use]
pub fn parse(header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(ranges) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Ignored;
    };

    // Only single ranges are supported
    if ranges.contains(',') {
        return RangeOutcome::Ignored;
    }
    let Some((start_str, end_str)) = ranges.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // Suffix range: "-500" means the last 500 bytes
    if start_str.is_empty() {
        return parse_suffix(end_str, file_size);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    // Open-ended range: "start-"
    if end_str.is_empty() {
        return RangeOutcome::Satisfiable(ByteRange { start, end: None });
    }

    let Ok(end) = end_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if start > end {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Satisfiable(ByteRange {
        start,
        // Clamp to the last byte of the file
        end: Some(end.min(file_size - 1)),
    })
}

fn parse_suffix(suffix_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if suffix == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    // A suffix larger than the file is valid and covers the whole file
    RangeOutcome::Satisfiable(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: Some(file_size.saturating_sub(1)),
    })
}
