//! The extracted work: a renderable body plus its metadata record.

/// Placeholder publish date used when the stats block has no
/// `Published` line.
pub const DEFAULT_DATE: &str = "2019-01-31";

/// Author recorded for works whose byline never names anyone.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Category every extracted work is filed under.
pub const CATEGORY: &str = "Fic";

/// One archived work, ready for a site generator's page pipeline.
///
/// `body` is a re-serialized HTML fragment (the chapters content with
/// the surrounding site chrome stripped); `metadata` is the record the
/// host passes through its own metadata post-processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Work {
    pub body: String,
    pub metadata: WorkMetadata,
}

/// Metadata scraped from the work's header block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkMetadata {
    pub title: String,
    /// Authors in document order. Never empty after a full parse: works
    /// with no byline get [`DEFAULT_AUTHOR`].
    pub authors: Vec<String>,
    /// Tags in document order, each prefixed with its group label,
    /// e.g. `"Fandoms:Star Trek"`.
    pub tags: Vec<String>,
    pub summary: String,
    /// Publish date as it appeared in the stats block, or
    /// [`DEFAULT_DATE`].
    pub date: String,
    pub category: String,
}

impl Default for WorkMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            authors: Vec::new(),
            tags: Vec::new(),
            summary: String::new(),
            date: DEFAULT_DATE.to_string(),
            category: CATEGORY.to_string(),
        }
    }
}

impl WorkMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}
