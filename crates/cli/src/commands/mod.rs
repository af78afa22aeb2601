//! One handler per verb.
//!
//! Handlers check required arguments before talking to the service, so a
//! missing or malformed argument never causes a request.

pub mod create;
pub mod delete;
pub mod inspect;
pub mod list;
pub mod toggle;
pub mod toxic;

#[cfg(test)]
pub(crate) mod fake;

use toxictl_core::{Error, Result};

/// A required argument, trimmed, or `MissingArgument` naming it.
pub(crate) fn require<'a>(value: &'a Option<String>, argument: &str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing(argument))
}
