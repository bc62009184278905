pub const DEFAULT_PORT: u16 = 8080;

/// Prefix of a named parameter segment, e.g. `:user` in `/path/:user`.
pub const PARAM_MARKER: char = ':';

pub const PATH_SEPARATOR: char = '/';

/// A trailing path segment matching the rest of the path, e.g. `/docs/*`.
pub const WILDCARD: &str = "*";
