//! Fetch failure classification.
//!
//! Failures reaching the stores are classified by matching substrings of the
//! error message, not by a typed taxonomy; that mirrors how the messages have
//! always been produced and keeps the user-facing strings stable. The
//! structured [`FetchErrorKind`] rides along for callers that want more than
//! the text.

/// Coarse category of a failed content fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    NotFound,
    Network,
    Timeout,
    Unauthorized,
    ServerError,
    Generic,
}

/// Which repository operation failed; shapes the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchContext<'a> {
    AllJourneys,
    Persona(&'a str),
    Slug(&'a str),
}

/// Classify an error message by substring. "network" and "timeout" match
/// case-insensitively; the HTTP status codes are matched literally.
#[must_use]
pub fn classify_message(message: &str) -> FetchErrorKind {
    let lower = message.to_ascii_lowercase();
    if lower.contains("network") {
        FetchErrorKind::Network
    } else if lower.contains("timeout") {
        FetchErrorKind::Timeout
    } else if message.contains("404") {
        FetchErrorKind::NotFound
    } else if message.contains("401") || message.contains("403") {
        FetchErrorKind::Unauthorized
    } else if message.contains("500") {
        FetchErrorKind::ServerError
    } else {
        FetchErrorKind::Generic
    }
}

/// Human-readable string for a classified failure. `raw` is the original
/// error text, surfaced only for the generic bucket.
#[must_use]
pub fn user_message(kind: FetchErrorKind, context: FetchContext<'_>, raw: &str) -> String {
    match kind {
        FetchErrorKind::Network => {
            "Network connection error. Check your internet connection and try again.".to_string()
        }
        FetchErrorKind::Timeout => {
            "Request timed out. The server is taking too long to respond.".to_string()
        }
        FetchErrorKind::NotFound => match context {
            FetchContext::AllJourneys => "Journey data not found on the server.".to_string(),
            FetchContext::Persona(persona) => {
                format!("The profile \"{persona}\" was not found on the server.")
            }
            FetchContext::Slug(slug) => {
                format!("The journey \"{slug}\" was not found on the server.")
            }
        },
        FetchErrorKind::Unauthorized => "Unauthorized access. Please log in again.".to_string(),
        FetchErrorKind::ServerError => "Server error. Please try again later.".to_string(),
        FetchErrorKind::Generic => format!("Error: {raw}"),
    }
}

/// Message shown when a fetch succeeds but yields nothing.
#[must_use]
pub fn empty_result_message(context: FetchContext<'_>) -> String {
    match context {
        FetchContext::AllJourneys => "No journeys found. Please try again later.".to_string(),
        FetchContext::Persona(persona) => {
            format!("No journey found for the profile \"{persona}\". Try another profile.")
        }
        FetchContext::Slug(slug) => {
            format!("The journey \"{slug}\" was not found. Check the URL and try again.")
        }
    }
}

/// Classify and render in one step.
#[must_use]
pub fn describe_failure(context: FetchContext<'_>, raw: &str) -> String {
    user_message(classify_message(raw), context, raw)
}
