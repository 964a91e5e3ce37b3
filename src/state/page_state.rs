/// Page state definitions for tracking crawl progress
///
/// A candidate moves `Queued -> <terminal>`; the terminal states mirror the
/// branches of the traversal loop.
use serde::Serialize;
use std::fmt;

/// Represents the state of a candidate URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    // ===== Active States =====
    /// URL is waiting in the work queue
    Queued,

    // ===== Terminal Skip States =====
    /// URL matched a skip pattern (admin, assets, cart, feeds, pagination)
    SkipFiltered,

    /// URL was already visited earlier in this crawl
    VisitedDuplicate,

    // ===== Terminal Error States =====
    /// URL resolved to a private or internal address
    FetchBlockedPrivate,

    /// Fetch timed out, failed in transport, or returned a non-2xx status
    FetchFailed,

    // ===== Discarded States =====
    /// Response was not HTML; dropped without an error
    NotHtml,

    /// Page looked like a soft 404 or placeholder and was dropped
    ErrorPageDiscarded,

    // ===== Terminal Success States =====
    /// Page was fetched, extracted, and added to the results
    Accepted,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns true if the URL was dropped before any fetch
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::SkipFiltered | Self::VisitedDuplicate)
    }

    /// Returns true if this state produces an entry in the crawl's error list
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchBlockedPrivate | Self::FetchFailed)
    }

    /// Returns true if a fetch was attempted for this URL
    pub fn was_fetched(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed | Self::NotHtml | Self::ErrorPageDiscarded | Self::Accepted
        )
    }

    /// Stable snake_case name, used in logs and statistics output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::SkipFiltered => "skip_filtered",
            Self::VisitedDuplicate => "visited_duplicate",
            Self::FetchBlockedPrivate => "fetch_blocked_private",
            Self::FetchFailed => "fetch_failed",
            Self::NotHtml => "not_html",
            Self::ErrorPageDiscarded => "error_page_discarded",
            Self::Accepted => "accepted",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Queued,
            Self::SkipFiltered,
            Self::VisitedDuplicate,
            Self::FetchBlockedPrivate,
            Self::FetchFailed,
            Self::NotHtml,
            Self::ErrorPageDiscarded,
            Self::Accepted,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Queued => "Queued",
            Self::SkipFiltered => "Skipped (filtered)",
            Self::VisitedDuplicate => "Skipped (duplicate)",
            Self::FetchBlockedPrivate => "Blocked (private address)",
            Self::FetchFailed => "Fetch failed",
            Self::NotHtml => "Not HTML",
            Self::ErrorPageDiscarded => "Error page discarded",
            Self::Accepted => "Accepted",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!PageState::Queued.is_terminal());
        for state in PageState::all_states().into_iter().skip(1) {
            assert!(state.is_terminal(), "{:?} should be terminal", state);
        }
    }

    #[test]
    fn test_categories_are_disjoint() {
        for state in PageState::all_states() {
            let categories = [state.is_success(), state.is_skipped(), state.is_error()]
                .iter()
                .filter(|c| **c)
                .count();
            assert!(categories <= 1, "{:?} is in {} categories", state, categories);
        }
    }

    #[test]
    fn test_error_states() {
        assert!(PageState::FetchFailed.is_error());
        assert!(PageState::FetchBlockedPrivate.is_error());
        assert!(!PageState::NotHtml.is_error());
        assert!(!PageState::ErrorPageDiscarded.is_error());
        assert!(!PageState::SkipFiltered.is_error());
    }

    #[test]
    fn test_was_fetched() {
        assert!(PageState::Accepted.was_fetched());
        assert!(PageState::NotHtml.was_fetched());
        assert!(!PageState::FetchBlockedPrivate.was_fetched());
        assert!(!PageState::VisitedDuplicate.was_fetched());
    }

    #[test]
    fn test_serializes_as_snake_case() {
        let json = serde_json::to_string(&PageState::ErrorPageDiscarded).unwrap();
        assert_eq!(json, "\"error_page_discarded\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(PageState::Accepted.to_string(), "Accepted");
        assert_eq!(
            PageState::FetchBlockedPrivate.to_string(),
            "Blocked (private address)"
        );
    }
}
