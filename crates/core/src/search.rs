//! Search and pagination constants and helpers for item discovery.
//!
//! Lives in `core` (zero internal deps) so the repository layer and the API
//! layer agree on tsquery construction and pagination arithmetic.

// ---------------------------------------------------------------------------
// Relevance weights
// ---------------------------------------------------------------------------

/// PostgreSQL tsvector weight for the item title (highest priority).
pub const WEIGHT_TITLE: char = 'A';

/// PostgreSQL tsvector weight for the item description.
pub const WEIGHT_DESCRIPTION: char = 'B';

/// PostgreSQL tsvector weight for derived tags.
pub const WEIGHT_TAGS: char = 'C';

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 50;

/// Clamp a caller-supplied page size to [1, [`MAX_PAGE_SIZE`]].
pub fn clamp_page_size(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1).min(MAX_PAGE_SIZE)
}

/// Clamp a caller-supplied page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for an offset-paginated query: `(page - 1) * limit`.
pub fn offset_for_page(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1) * limit
}

/// Total page count for a result set: `ceil(total / limit)`.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// Query builder helpers
// ---------------------------------------------------------------------------

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// - Splits on every non-alphanumeric character (except `_`), so embedded
///   quotes and tsquery operators (`&`, `|`, `!`, `:`, `'`) can never reach
///   the database as syntax.
/// - Drops empty terms.
///
/// Returns `None` if the input yields no usable terms.
fn sanitize_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Sanitize and convert user input into a PostgreSQL `tsquery` string.
///
/// - Terms are joined with `&` (AND).
/// - Empty or whitespace-only input returns `None`.
/// - Any special character splits the surrounding text into separate terms,
///   so nothing that could break tsquery parsing survives (`don't` queries
///   as `don & t`, `cat|dog` as `cat & dog`).
///
/// # Examples
///
/// ```
/// use lendly_core::search::build_tsquery;
/// assert_eq!(build_tsquery("power drill"), Some("power & drill".to_string()));
/// assert_eq!(build_tsquery("don't"), Some("don & t".to_string()));
/// assert_eq!(build_tsquery("  "), None);
/// assert_eq!(build_tsquery("ladder"), Some("ladder".to_string()));
/// ```
pub fn build_tsquery(query: &str) -> Option<String> {
    sanitize_terms(query).map(|terms| terms.join(" & "))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- build_tsquery -------------------------------------------------------

    #[test]
    fn tsquery_single_term() {
        assert_eq!(build_tsquery("ladder"), Some("ladder".to_string()));
    }

    #[test]
    fn tsquery_multiple_terms_joined_with_and() {
        assert_eq!(
            build_tsquery("power drill"),
            Some("power & drill".to_string())
        );
    }

    #[test]
    fn tsquery_trims_special_characters() {
        assert_eq!(
            build_tsquery("drill! (cordless)"),
            Some("drill & cordless".to_string())
        );
    }

    #[test]
    fn tsquery_empty_returns_none() {
        assert_eq!(build_tsquery(""), None);
        assert_eq!(build_tsquery("   "), None);
    }

    #[test]
    fn tsquery_punctuation_only_returns_none() {
        assert_eq!(build_tsquery("!!! ???"), None);
    }

    #[test]
    fn tsquery_splits_embedded_apostrophes() {
        // An unbalanced quote inside a bind would be a tsquery syntax error.
        assert_eq!(build_tsquery("don't"), Some("don & t".to_string()));
        assert_eq!(build_tsquery("o'brien's ladder"), Some("o & brien & s & ladder".to_string()));
    }

    #[test]
    fn tsquery_splits_embedded_operators() {
        // Embedded operators must become AND-joined terms, never pass through.
        assert_eq!(build_tsquery("cat|dog"), Some("cat & dog".to_string()));
        assert_eq!(build_tsquery("fast&loud"), Some("fast & loud".to_string()));
        assert_eq!(build_tsquery("drill:*"), Some("drill".to_string()));
        assert_eq!(build_tsquery("!ladder"), Some("ladder".to_string()));
    }

    // -- pagination ----------------------------------------------------------

    #[test]
    fn page_size_uses_default_when_none() {
        assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_respects_max() {
        assert_eq!(clamp_page_size(Some(200)), MAX_PAGE_SIZE);
    }

    #[test]
    fn page_size_floors_at_one() {
        assert_eq!(clamp_page_size(Some(0)), 1);
        assert_eq!(clamp_page_size(Some(-5)), 1);
    }

    #[test]
    fn page_floors_at_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(3)), 3);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(offset_for_page(1, 20), 0);
        assert_eq!(offset_for_page(2, 20), 20);
        assert_eq!(offset_for_page(5, 10), 40);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(100, 20), 5);
    }
}
