//! Launch URL parser
//!
//! The client can be started with a URL whose fragment carries a query
//! string, for example:
//! ```text
//! modchat://open#/?uuid=63e24a7a85a67d86c88cd59f
//! https://example.com/chat#/?uuid=alice
//! ```
//!
//! Only the fragment matters. Everything after the first `?` in the fragment
//! is read as `name=value` pairs; the `uuid` parameter selects the identity.

use std::fmt;

use modchat_common::UserId;

use crate::constants::ENV_LAUNCH_URL;

/// Query parameter naming the identity to act as
pub const IDENTITY_PARAM: &str = "uuid";

/// Parsed launch URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchUrl {
    /// Scheme without the `://` separator
    pub scheme: String,
    /// Fragment path before its query string
    pub fragment_path: Option<String>,
    /// Decoded fragment query parameters in order of appearance
    pub params: Vec<(String, String)>,
}

impl LaunchUrl {
    /// First value of a fragment query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Identity requested by the URL, if any
    pub fn identity(&self) -> Option<UserId> {
        self.param(IDENTITY_PARAM)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(UserId::new)
    }
}

/// Error type for launch URL parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No `scheme://` prefix
    MissingScheme,
    /// Scheme contains characters outside `[A-Za-z0-9+.-]`
    InvalidScheme(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingScheme => write!(f, "URL must start with a scheme://"),
            ParseError::InvalidScheme(scheme) => write!(f, "Invalid URL scheme: {}", scheme),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a launch URL
pub fn parse(url: &str) -> Result<LaunchUrl, ParseError> {
    let (scheme, rest) = url.trim().split_once("://").ok_or(ParseError::MissingScheme)?;

    if scheme.is_empty()
        || !scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
    {
        return Err(ParseError::InvalidScheme(scheme.to_string()));
    }

    let (fragment_path, params) = match rest.split_once('#') {
        Some((_, fragment)) => match fragment.split_once('?') {
            Some((path, query)) => (Some(path.to_string()), parse_query(query)),
            None => (Some(fragment.to_string()), Vec::new()),
        },
        None => (None, Vec::new()),
    };

    Ok(LaunchUrl {
        scheme: scheme.to_lowercase(),
        fragment_path,
        params,
    })
}

/// Split a query string into decoded `name=value` pairs
fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (url_decode(name), url_decode(value)),
            None => (url_decode(pair), String::new()),
        })
        .collect()
}

/// Decode percent-encoding, treating `+` as a space
fn url_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let hex: String = chars.by_ref().take(2).collect();
                if hex.len() == 2
                    && let Ok(byte) = u8::from_str_radix(&hex, 16)
                {
                    bytes.push(byte);
                    continue;
                }
                // Failed to decode, keep the raw bytes
                bytes.push(b'%');
                bytes.extend(hex.as_bytes());
            }
            '+' => bytes.push(b' '),
            _ => {
                let mut buf = [0u8; 4];
                bytes.extend(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Find the launch URL among command-line arguments, then in the environment
///
/// `args` should not include the program name.
pub fn find_launch_url<I>(args: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| arg.trim().to_string())
        // Desktop files may pass the placeholder through unsubstituted
        .filter(|arg| arg != "%u")
        .find(|arg| arg.contains("://"))
        .or_else(|| {
            std::env::var(ENV_LAUNCH_URL)
                .ok()
                .filter(|url| !url.trim().is_empty())
        })
}
