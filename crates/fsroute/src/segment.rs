//! Directory-name classification
//!
//! Pure parsing of one filesystem segment into a typed descriptor.
//! Every input classifies: anything that is not a recognised bracket or
//! group form falls back to a static segment.

/// Kind of a route segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Literal text: `about`
    Static,
    /// One dynamic segment: `[id]`
    Param,
    /// Zero-or-more remaining segments: `[...slug]` or `[[...slug]]`
    Wildcard,
    /// Grouping directory that adds nothing to the URL: `(marketing)`
    Exclude,
}

/// Parsed form of a single directory name
///
/// # Examples
///
/// ```
/// use fsroute::segment::{parse_segment, SegmentKind};
///
/// let seg = parse_segment("[[...slug]]");
/// assert_eq!(seg.kind, SegmentKind::Wildcard);
/// assert_eq!(seg.name, "slug");
/// assert!(seg.optional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Parameter name, group name, or literal text depending on `kind`
    pub name: String,
    /// Only meaningful for wildcards
    pub optional: bool,
}

impl Segment {
    fn new(kind: SegmentKind, name: &str, optional: bool) -> Self {
        Self {
            kind,
            name: name.to_string(),
            optional,
        }
    }
}

/// Classifies a directory name (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional wildcard**: `[[...name]]`
/// 2. **Wildcard**: `[...name]`
/// 3. **Param**: `[name]`
/// 4. **Exclude group**: `(name)`
/// 5. **Static**: any other text
pub fn parse_segment(raw: &str) -> Segment {
    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        if let Some(name) = inner.strip_prefix("...") {
            return Segment::new(SegmentKind::Wildcard, name, false);
        }

        // `[[...x]]`: the inner text is itself a bracketed wildcard
        if let Some(name) = inner
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .and_then(|s| s.strip_prefix("..."))
        {
            return Segment::new(SegmentKind::Wildcard, name, true);
        }

        return Segment::new(SegmentKind::Param, inner, false);
    }

    if let Some(inner) = raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return Segment::new(SegmentKind::Exclude, inner, false);
    }

    Segment::new(SegmentKind::Static, raw, false)
}
