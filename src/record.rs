//! Result records and outcome classification for category lookups.

/// Category text recorded when the lookup page shows no matching rows.
pub const NO_CATEGORIES_FOUND: &str = "No Categories Found";

/// Sub-category text recorded when the lookup page shows no matching rows.
pub const NO_SUBCATEGORIES_FOUND: &str = "No Sub Categories Found";

/// Text recorded in both category columns when the page rejects the query
/// outright with a native dialog.
pub const NO_APPLICATION_FOUND: &str = "No Application Found";

/// Terminal outcome of one query against the lookup page.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Both category lists were populated on the results page.
    Found {
        categories: Vec<String>,
        subcategories: Vec<String>,
    },
    /// No matching rows, or the page could not be scraped at all.
    NotFound,
    /// The page rejected the query with an invalid-value dialog.
    InvalidInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Found,
    NotFound,
    InvalidInput,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeKind::Found => write!(f, "found"),
            OutcomeKind::NotFound => write!(f, "not found"),
            OutcomeKind::InvalidInput => write!(f, "invalid input"),
        }
    }
}

impl LookupOutcome {
    /// Classify extracted label lists. A result only counts as found when
    /// BOTH lists are non-empty; a category without a sub-category (or the
    /// reverse) is treated as no result.
    pub fn classify(categories: Vec<String>, subcategories: Vec<String>) -> Self {
        if categories.is_empty() || subcategories.is_empty() {
            LookupOutcome::NotFound
        } else {
            LookupOutcome::Found {
                categories,
                subcategories,
            }
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            LookupOutcome::Found { .. } => OutcomeKind::Found,
            LookupOutcome::NotFound => OutcomeKind::NotFound,
            LookupOutcome::InvalidInput => OutcomeKind::InvalidInput,
        }
    }

    /// Category column text: extracted labels joined by newline in page
    /// order, or the sentinel for this outcome.
    pub fn category_text(&self) -> String {
        match self {
            LookupOutcome::Found { categories, .. } => categories.join("\n"),
            LookupOutcome::NotFound => NO_CATEGORIES_FOUND.to_string(),
            LookupOutcome::InvalidInput => NO_APPLICATION_FOUND.to_string(),
        }
    }

    /// Sub-category column text, same join rules as [`category_text`].
    ///
    /// [`category_text`]: LookupOutcome::category_text
    pub fn subcategory_text(&self) -> String {
        match self {
            LookupOutcome::Found { subcategories, .. } => subcategories.join("\n"),
            LookupOutcome::NotFound => NO_SUBCATEGORIES_FOUND.to_string(),
            LookupOutcome::InvalidInput => NO_APPLICATION_FOUND.to_string(),
        }
    }
}

/// One output row: a query, its position in the input, and the classified
/// category columns. Immutable once created.
#[derive(Debug, Clone)]
pub struct LookupRecord {
    pub sequence_number: u32,
    pub query: String,
    pub category: String,
    pub subcategory: String,
    pub outcome: OutcomeKind,
}

impl LookupRecord {
    pub fn new(sequence_number: u32, query: impl Into<String>, outcome: &LookupOutcome) -> Self {
        LookupRecord {
            sequence_number,
            query: query.into(),
            category: outcome.category_text(),
            subcategory: outcome.subcategory_text(),
            outcome: outcome.kind(),
        }
    }
}
