//! Navigation targets and URL parsing

use smallvec::SmallVec;
use std::fmt;

/// Captured route parameters, in pattern order
pub type Params = SmallVec<[(String, String); 4]>;

/// Where a navigation wants to go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A raw URL: path with optional `?query` and `#hash`
    Path(String),
    /// A registered route by name, with values for its parameters
    Named { name: String, params: Params },
}

impl Location {
    /// Target a route by name
    pub fn named(name: impl Into<String>) -> Self {
        Location::Named {
            name: name.into(),
            params: Params::new(),
        }
    }

    /// Add a parameter to a named location. No-op on raw paths.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Location::Named { ref mut params, .. } = self {
            params.push((key.into(), value.into()));
        }
        self
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Location::Path(path.to_string())
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Location::Path(path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => f.write_str(path),
            Location::Named { name, params } => {
                write!(f, "{{name: {}", name)?;
                for (k, v) in params {
                    write!(f, ", {}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A URL split into its routing-relevant parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPath {
    /// Path component, always starting with `/`
    pub path: String,
    /// Raw query string (without leading `?`)
    pub raw_query: Option<String>,
    /// Decoded query pairs; a key without `=` maps to an empty value
    pub query: Vec<(String, String)>,
    /// Fragment (without leading `#`)
    pub hash: Option<String>,
}

impl ParsedPath {
    /// Parse `path?query#hash`
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (url, None),
        };
        let (path, raw_query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        let query = raw_query
            .as_deref()
            .map(parse_query)
            .unwrap_or_default();

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            path,
            raw_query,
            query,
            hash,
        }
    }

    /// Path plus query and hash, as it should appear in the address bar
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if let Some(query) = self.raw_query.as_deref().filter(|q| !q.is_empty()) {
            full.push('?');
            full.push_str(query);
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_query(key), decode_query(value)),
            None => (decode_query(pair), String::new()),
        })
        .collect()
}

fn decode_query(s: &str) -> String {
    percent_decode(&s.replace('+', " "))
}

/// Decode `%XX` escapes. Invalid escapes are kept verbatim and invalid
/// UTF-8 is replaced rather than rejected.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Escape a value for use as a single path segment
pub fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'@' | b':' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let parsed = ParsedPath::parse("/users");
        assert_eq!(parsed.path, "/users");
        assert!(parsed.query.is_empty());
        assert_eq!(parsed.hash, None);
        assert_eq!(parsed.full_path(), "/users");
    }

    #[test]
    fn test_parse_query_and_hash() {
        let parsed = ParsedPath::parse("/musician/42?tab=gigs&city=New+York&verified#top");
        assert_eq!(parsed.path, "/musician/42");
        assert_eq!(
            parsed.query,
            vec![
                ("tab".to_string(), "gigs".to_string()),
                ("city".to_string(), "New York".to_string()),
                ("verified".to_string(), String::new()),
            ]
        );
        assert_eq!(parsed.hash.as_deref(), Some("top"));
        assert_eq!(parsed.full_path(), "/musician/42?tab=gigs&city=New+York&verified#top");
    }

    #[test]
    fn test_parse_adds_leading_slash() {
        assert_eq!(ParsedPath::parse("users").path, "/users");
        assert_eq!(ParsedPath::parse("").path, "/");
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("a%20b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("42"), "42");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("42"), "42");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(percent_decode(&encode_segment("café")), "café");
    }

    #[test]
    fn test_named_location_display() {
        let loc = Location::named("MusicianProfile").param("userId", "42");
        assert_eq!(loc.to_string(), "{name: MusicianProfile, userId: 42}");
        assert_eq!(Location::from("/users").to_string(), "/users");
    }
}
