//! Substring-search predicate construction shared by the business and task
//! queries. One helper builds the OR-joined clause so the two entity searches
//! cannot drift apart in matching semantics.

/// Escape LIKE metacharacters (% _ \)
pub(crate) fn escape_like(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' | '_' | '\\' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// `%query%` pattern for a case-insensitive LIKE, with metacharacters escaped.
pub(crate) fn like_pattern(query: &str) -> String {
    format!("%{}%", escape_like(&query.trim().to_lowercase()))
}

/// OR-joined `LOWER(col) LIKE ?n ESCAPE '\'` clause over the given columns,
/// all bound to the same positional parameter. NULL columns simply never match.
pub(crate) fn like_clause(columns: &[&str], param: usize) -> String {
    let parts: Vec<String> = columns
        .iter()
        .map(|col| format!("LOWER({}) LIKE ?{} ESCAPE '\\'", col, param))
        .collect();
    format!("({})", parts.join(" OR "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_like_pattern_lowercases_and_trims() {
        assert_eq!(like_pattern("  Fjell  "), "%fjell%");
        assert_eq!(like_pattern("A_B"), "%a\\_b%");
    }

    #[test]
    fn test_like_clause() {
        let clause = like_clause(&["b.name", "b.email"], 3);
        assert_eq!(
            clause,
            "(LOWER(b.name) LIKE ?3 ESCAPE '\\' OR LOWER(b.email) LIKE ?3 ESCAPE '\\')"
        );
    }
}
