//! The parsed form of a DID or DID URL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parser::{parse, DidParseError};
use crate::config::DID_SCHEME;

/// A `;name=value` DID parameter. An empty value prints as the bare name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            return Ok(());
        }
        if self.value.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}={}", self.name, self.value)
        }
    }
}

/// A DID split into its syntactic components.
///
/// ```
/// use idcore::Did;
///
/// let did: Did = "did:example:123;service=agent/a/b?x#frag".parse().unwrap();
/// assert_eq!(did.method, "example");
/// assert_eq!(did.id(), "123");
/// assert_eq!(did.path(), "a/b");
/// assert!(did.is_url());
/// assert_eq!(did.to_string(), "did:example:123;service=agent/a/b?x#frag");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Did {
    pub method: String,
    /// Colon-separated components after the method.
    pub id_strings: Vec<String>,
    pub params: Vec<Param>,
    pub path_segments: Vec<String>,
    pub query: String,
    pub fragment: String,
}

impl Did {
    /// A bare DID from a method and its id components.
    pub fn new<I, S>(method: impl Into<String>, id_strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: method.into(),
            id_strings: id_strings.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn parse(input: &str) -> Result<Self, DidParseError> {
        parse(input)
    }

    /// The id components joined with `:`.
    pub fn id(&self) -> String {
        self.id_strings.join(":")
    }

    /// The path segments joined with `/`, without the leading slash.
    pub fn path(&self) -> String {
        self.path_segments.join("/")
    }

    /// Whether this is a DID URL rather than a bare DID.
    pub fn is_url(&self) -> bool {
        !self.params.is_empty()
            || !self.path_segments.is_empty()
            || !self.query.is_empty()
            || !self.fragment.is_empty()
    }

    /// The canonical string form. Empty if the method or id is missing, or
    /// if any param has no name.
    pub fn to_did_string(&self) -> String {
        let id = self.id();
        if self.method.is_empty() || id.is_empty() {
            return String::new();
        }

        let mut out = format!("{DID_SCHEME}:{}:{id}", self.method);
        for param in &self.params {
            if param.name.is_empty() {
                return String::new();
            }
            out.push(';');
            out.push_str(&param.to_string());
        }
        if !self.path_segments.is_empty() {
            out.push('/');
            out.push_str(&self.path());
        }
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_did_string())
    }
}

impl FromStr for Did {
    type Err = DidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
