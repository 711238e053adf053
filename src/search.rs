//! Web search placeholder.
//!
//! No search backend exists; the tool is registered so the model has a
//! fallback to pick, and it always reports that nothing was found.

/// Canned search answer for `query`. Performs no I/O.
pub fn simulated_search(query: &str) -> String {
    format!(
        "Simulated Web Search for '{}': Information not found in local documents.",
        query
    )
}
