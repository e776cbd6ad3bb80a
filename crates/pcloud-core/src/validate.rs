//! Required-parameter checks.
//!
//! Some routes need one of several alternative parameters, e.g. a folder
//! is addressed either by `path` or by `folderid`. The table below maps each
//! such route to its alternatives; [`check_route`] runs before any request
//! is sent.

use crate::error::Error;
use crate::params::Params;
use crate::routes;

const PATH_OR_FOLDER_ID: &[&str] = &["path", "folderid"];
const PATH_OR_FILE_ID: &[&str] = &["path", "fileid"];

const REQUIRED: &[(&str, &[&str])] = &[
    (routes::LIST_FOLDER, PATH_OR_FOLDER_ID),
    (routes::GET_FILE_LINK, PATH_OR_FILE_ID),
    (routes::UPLOAD_FILE, PATH_OR_FOLDER_ID),
];

/// Returns the accepted parameter alternatives for a route, if it has any.
pub fn required_for(route: &str) -> Option<&'static [&'static str]> {
    REQUIRED
        .iter()
        .find(|(name, _)| *name == route)
        .map(|(_, alternatives)| *alternatives)
}

/// Check that at least one alternative is present in any of `sources`.
///
/// Callers pass every parameter set that ends up in the request (caller
/// params and extra params), so a parameter counts wherever it was given.
pub fn require_any(route: &str, alternatives: &[&str], sources: &[&Params]) -> Result<(), Error> {
    let satisfied = alternatives
        .iter()
        .any(|key| sources.iter().any(|params| params.contains_key(key)));

    if satisfied {
        Ok(())
    } else {
        Err(Error::MissingRequiredParameter {
            route: route.to_string(),
            alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Run the table-driven check for `route`. Routes without requirements pass.
pub fn check_route(route: &str, sources: &[&Params]) -> Result<(), Error> {
    match required_for(route) {
        Some(alternatives) => require_any(route, alternatives, sources),
        None => Ok(()),
    }
}
