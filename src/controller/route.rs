use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// One declared route of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub method: HttpMethod,
    /// Normalized: empty, or starting with `/`.
    pub path: String,
    pub handler_name: String,
}

/// Prefix and routes declared for one controller type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerMetadata {
    pub prefix: String,
    pub routes: Vec<RouteDefinition>,
}

/// Prepend `/` to a non-empty path that lacks one.
///
/// Nothing else is rewritten: trailing and doubled slashes are kept as given.
///
/// ```
/// use ferrule::controller::normalize_path;
///
/// assert_eq!(normalize_path(""), "");
/// assert_eq!(normalize_path("foo"), "/foo");
/// assert_eq!(normalize_path("/foo"), "/foo");
/// ```
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Concatenate an already normalized prefix and path, falling back to `/`.
pub fn join_paths(prefix: &str, path: &str) -> String {
    let full = format!("{prefix}{path}");
    if full.is_empty() { "/".to_string() } else { full }
}
