//! Route matching by keyword.

use crate::domain::Route;

/// Find the route whose keywords include `search_term`.
///
/// Matching is case-insensitive and exact against each keyword; partial
/// words do not match. If several routes share a keyword, the first in
/// timetable order wins.
pub fn match_route<'a>(routes: &'a [Route], search_term: &str) -> Option<&'a Route> {
    let term = search_term.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }
    routes.iter().find(|route| route.has_keyword(&term))
}
