use super::SelectError;

pub const SCORE_EXACT: u8 = 100;
pub const SCORE_PREFIX: u8 = 80;
pub const SCORE_SUBSTRING: u8 = 50;

/// One surviving candidate: its position in the input slice, the original
/// (non-lowercased) text, and the tier it matched at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub index: usize,
    pub text: String,
    pub score: u8,
}

/// Rank `items` against `query` with case-insensitive tiered matching:
/// exact (100), prefix (80), substring (50); anything else is dropped.
///
/// Survivors keep input order. Scores are metadata only and never reorder
/// the result: callers auto-resolve on a single survivor by count, not rank.
pub fn filter_by_query(items: &[String], query: &str) -> Result<Vec<Match>, SelectError> {
    if query.is_empty() {
        return Ok(items
            .iter()
            .enumerate()
            .map(|(index, text)| Match {
                index,
                text: text.clone(),
                score: 0,
            })
            .collect());
    }

    let query_lower = query.to_lowercase();
    let matches: Vec<Match> = items
        .iter()
        .enumerate()
        .filter_map(|(index, text)| {
            let lower = text.to_lowercase();
            let score = if lower == query_lower {
                SCORE_EXACT
            } else if lower.starts_with(&query_lower) {
                SCORE_PREFIX
            } else if lower.contains(&query_lower) {
                SCORE_SUBSTRING
            } else {
                return None;
            };
            Some(Match {
                index,
                text: text.clone(),
                score,
            })
        })
        .collect();

    if matches.is_empty() {
        return Err(SelectError::NoMatches {
            query: query.to_string(),
        });
    }
    Ok(matches)
}
