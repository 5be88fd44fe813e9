use thiserror::Error;

/// Failures surfaced by list validation, the store boundary, and import.
///
/// None of these are fatal: every variant means "the operation did not
/// happen" and the in-memory collection is left as it was.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("list name must not be empty")]
    EmptyName,

    #[error("list name is {len} characters; the limit is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("description is {len} characters; the limit is {max}")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("list has no words")]
    NoWords,

    #[error("list has {count} words; the limit is {max}")]
    TooManyWords { count: usize, max: usize },

    #[error("word {word:?} is {len} characters; the limit is {max}")]
    WordTooLong { word: String, len: usize, max: usize },

    #[error("list has {count} tags; the limit is {max}")]
    TooManyTags { count: usize, max: usize },

    #[error("tag {tag:?} is {len} characters; the limit is {max}")]
    TagTooLong { tag: String, len: usize, max: usize },

    #[error("no list with id {0:?}")]
    NotFound(String),

    #[error("stored list has an empty id")]
    MissingId,

    #[error("stored fields are not in normalized form")]
    NotNormalized,

    #[error("stored list {id:?} is invalid")]
    InvalidRecord {
        id: String,
        #[source]
        source: Box<ListError>,
    },

    #[error("duplicate list id {0:?} in stored collection")]
    DuplicateId(String),

    #[error("unsupported store version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("malformed list document")]
    Malformed(#[from] serde_json::Error),

    #[error("persisting lists failed: {0:#}")]
    Persistence(anyhow::Error),
}
