//! Tuning constants for tokenizing, scoring and paging.
//!
//! Boost magnitudes and their order are part of the scoring contract: changing
//! any of them changes result ordering, so bump [`SCORING_VERSION`] with them.

/// Version of the scoring constants below.
pub const SCORING_VERSION: u32 = 1;

/// BM25 term frequency saturation.
pub const BM25_K1: f64 = 1.5;

/// BM25 document length normalization. 0.0 disables it, 1.0 is full normalization.
pub const BM25_B: f64 = 0.75;

/// Added when the whole query equals the title (case- and punctuation-insensitive).
pub const TITLE_EXACT_BOOST: f64 = 50.0;

/// Added per distinct query term found inside the title, when the title is not an exact match.
pub const TITLE_TERM_BOOST: f64 = 10.0;

/// Multiplier applied last to documents that contain a code block.
pub const CODE_BOOST: f64 = 1.2;

/// Terms shorter than this many characters are dropped by the tokenizer.
pub const MIN_TERM_CHARS: usize = 2;

/// Maximum snippet length in characters, excluding ellipses.
pub const SNIPPET_CHARS: usize = 500;

/// Characters of context kept before the snippet anchor.
pub const SNIPPET_LEAD_CHARS: usize = 80;

/// Maximum number of title suggestions returned on a failed lookup.
pub const MAX_TITLE_SUGGESTIONS: usize = 5;

/// Smallest edit distance budget for fuzzy title suggestions.
pub const MIN_SUGGESTION_DISTANCE: usize = 2;

/// Default result count for search and code example lookups.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default page size for catalog listing.
pub const DEFAULT_PAGE_LIMIT: usize = 30;
