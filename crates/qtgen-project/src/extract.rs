use thiserror::Error;

/// A delimiter expected in the project file text was not present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("marker {marker:?} not found")]
pub struct MarkerNotFound {
    pub marker: String,
}

/// Pair of literal strings bounding a region of project file text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: &'static str,
    pub end: &'static str,
}

impl Markers {
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }

    pub fn extract<'a>(&self, text: &'a str) -> Result<&'a str, MarkerNotFound> {
        extract_between(text, self.start, self.end)
    }
}

/// Return the text strictly between the last occurrence of `start` and the
/// first occurrence of `end` that follows it.
///
/// Generated project files repeat the same property once per build
/// configuration, so the region is taken from the last configuration block.
pub fn extract_between<'a>(text: &'a str, start: &str, end: &str) -> Result<&'a str, MarkerNotFound> {
    let begin = text
        .rfind(start)
        .map(|idx| idx + start.len())
        .ok_or_else(|| MarkerNotFound {
            marker: start.to_string(),
        })?;

    let rest = &text[begin..];
    let len = rest.find(end).ok_or_else(|| MarkerNotFound {
        marker: end.to_string(),
    })?;

    Ok(&rest[..len])
}
