/// Upstream record (bulk quote or daily bar), passed through unmodified
pub type Record = serde_json::Value;

/// Sort order for history series, using the upstream's `a` / `d` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Query parameter value understood by the upstream provider
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "a",
            Self::Descending => "d",
        }
    }
}
