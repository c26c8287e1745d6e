//! # DID Parser
//!
//! An explicit finite-state machine over the input bytes. Each state scans
//! one component, records it, and names the state that the terminating
//! delimiter selects:
//!
//! ```text
//! Scheme -> Method -> IdString --':'--> IdString
//!                              --';'--> ParamName --'='--> ParamValue
//!                              --'/'--> Path      --'/'--> Path
//!                              --'?'--> Query     --'#'--> Fragment
//!                              --'#'--> Fragment  (terminal)
//! ```
//!
//! End of input from any component state finishes the parse.

use thiserror::Error;
use tracing::trace;

use super::chars::{
    is_hex_digit, is_id_char, is_method_char, is_param_char, is_path_char,
    is_query_or_fragment_char,
};
use super::uri::{Did, Param};
use crate::config::{DID_SCHEME, MIN_DID_LENGTH};

/// Grammar violations. `index` is the byte offset of the offending
/// character (or the input length when the input ended too early).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DidParseError {
    #[error("input length is less than 7")]
    InputTooShort { index: usize },

    #[error("input does not begin with 'did:' prefix")]
    MissingDidPrefix { index: usize },

    #[error("input does not have a second `:` marking end of method name")]
    MissingMethodTerminator { index: usize },

    #[error("method is empty, {index}")]
    EmptyMethod { index: usize },

    #[error("character is not a-z OR 0-9, {index}: {character:?}")]
    InvalidMethodChar { index: usize, character: char },

    #[error("idstring must not be empty, {index}")]
    EmptyIdString { index: usize },

    #[error("byte is not ALPHA OR DIGIT OR '.' OR '-', {index}: {character:?}")]
    InvalidIdChar { index: usize, character: char },

    #[error("param name must not be empty, {index}")]
    EmptyParamName { index: usize },

    #[error("character is not allowed in param, {index}: {character:?}")]
    InvalidParamChar { index: usize, character: char },

    #[error("% is not followed by 2 hex digits, {index}")]
    BadPercentEncoding { index: usize },

    #[error("first path segment must not be empty, {index}")]
    EmptyPathSegment { index: usize },

    #[error("character is not allowed in path, {index}: {character:?}")]
    InvalidPathChar { index: usize, character: char },

    #[error("character is not allowed in query, {index}: {character:?}")]
    InvalidQueryChar { index: usize, character: char },

    #[error("character is not allowed in fragment, {index}: {character:?}")]
    InvalidFragmentChar { index: usize, character: char },
}

impl DidParseError {
    /// Byte offset the error refers to.
    pub fn index(&self) -> usize {
        match self {
            DidParseError::InputTooShort { index }
            | DidParseError::MissingDidPrefix { index }
            | DidParseError::MissingMethodTerminator { index }
            | DidParseError::EmptyMethod { index }
            | DidParseError::InvalidMethodChar { index, .. }
            | DidParseError::EmptyIdString { index }
            | DidParseError::InvalidIdChar { index, .. }
            | DidParseError::EmptyParamName { index }
            | DidParseError::InvalidParamChar { index, .. }
            | DidParseError::BadPercentEncoding { index }
            | DidParseError::EmptyPathSegment { index }
            | DidParseError::InvalidPathChar { index, .. }
            | DidParseError::InvalidQueryChar { index, .. }
            | DidParseError::InvalidFragmentChar { index, .. } => *index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scheme,
    Method,
    IdString,
    ParamName,
    ParamValue,
    Path,
    Query,
    Fragment,
    Done,
}

/// How a component scan treats each byte.
struct Rules {
    accept: fn(u8) -> bool,
    terminator: fn(u8) -> Option<State>,
    percent: bool,
    invalid: fn(usize, char) -> DidParseError,
}

const ID_RULES: Rules = Rules {
    accept: is_id_char,
    terminator: |c| match c {
        b':' => Some(State::IdString),
        b';' => Some(State::ParamName),
        b'/' => Some(State::Path),
        b'?' => Some(State::Query),
        b'#' => Some(State::Fragment),
        _ => None,
    },
    percent: false,
    invalid: |index, character| DidParseError::InvalidIdChar { index, character },
};

const METHOD_RULES: Rules = Rules {
    accept: is_method_char,
    terminator: |c| (c == b':').then_some(State::IdString),
    percent: false,
    invalid: |index, character| DidParseError::InvalidMethodChar { index, character },
};

const PARAM_RULES: Rules = Rules {
    accept: is_param_char,
    terminator: |c| match c {
        b';' => Some(State::ParamName),
        b'=' => Some(State::ParamValue),
        b'/' => Some(State::Path),
        b'?' => Some(State::Query),
        b'#' => Some(State::Fragment),
        _ => None,
    },
    percent: true,
    invalid: |index, character| DidParseError::InvalidParamChar { index, character },
};

const PATH_RULES: Rules = Rules {
    accept: is_path_char,
    terminator: |c| match c {
        b'/' => Some(State::Path),
        b'?' => Some(State::Query),
        b'#' => Some(State::Fragment),
        _ => None,
    },
    percent: true,
    invalid: |index, character| DidParseError::InvalidPathChar { index, character },
};

const QUERY_RULES: Rules = Rules {
    accept: is_query_or_fragment_char,
    terminator: |c| (c == b'#').then_some(State::Fragment),
    percent: true,
    invalid: |index, character| DidParseError::InvalidQueryChar { index, character },
};

const FRAGMENT_RULES: Rules = Rules {
    accept: is_query_or_fragment_char,
    terminator: |_| None,
    percent: true,
    invalid: |index, character| DidParseError::InvalidFragmentChar { index, character },
};

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Offset of the delimiter that ended the previous component.
    pos: usize,
    did: Did,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            did: Did::default(),
        }
    }

    fn transition(&mut self, state: State) -> Result<State, DidParseError> {
        match state {
            State::Scheme => self.scheme(),
            State::Method => self.method(),
            State::IdString => self.id_string(),
            State::ParamName => self.param_name(),
            State::ParamValue => self.param_value(),
            State::Path => self.path(),
            State::Query => self.query(),
            State::Fragment => self.fragment(),
            State::Done => Ok(State::Done),
        }
    }

    fn scheme(&mut self) -> Result<State, DidParseError> {
        let scheme_end = DID_SCHEME.len();
        if !self.input.starts_with(DID_SCHEME) || self.bytes.get(scheme_end) != Some(&b':') {
            return Err(DidParseError::MissingDidPrefix { index: 0 });
        }
        self.pos = scheme_end;
        Ok(State::Method)
    }

    fn method(&mut self) -> Result<State, DidParseError> {
        let (start, end, next) = self.scan(&METHOD_RULES)?;
        if next == State::Done {
            return Err(DidParseError::MissingMethodTerminator { index: end });
        }
        if start == end {
            return Err(DidParseError::EmptyMethod { index: end });
        }
        self.did.method = self.input[start..end].to_string();
        Ok(next)
    }

    fn id_string(&mut self) -> Result<State, DidParseError> {
        let (start, end, next) = self.scan(&ID_RULES)?;
        if start == end {
            return Err(DidParseError::EmptyIdString { index: end });
        }
        self.did.id_strings.push(self.input[start..end].to_string());
        Ok(next)
    }

    fn param_name(&mut self) -> Result<State, DidParseError> {
        let (start, end, next) = self.scan(&PARAM_RULES)?;
        if start == end {
            return Err(DidParseError::EmptyParamName { index: end });
        }
        self.did.params.push(Param::new(&self.input[start..end], ""));
        Ok(next)
    }

    // Each '=' restarts the value of the current param, so `a==b` yields
    // the value `b`.
    fn param_value(&mut self) -> Result<State, DidParseError> {
        let (start, end, next) = self.scan(&PARAM_RULES)?;
        if let Some(param) = self.did.params.last_mut() {
            param.value = self.input[start..end].to_string();
        }
        Ok(next)
    }

    fn path(&mut self) -> Result<State, DidParseError> {
        let (start, end, next) = self.scan(&PATH_RULES)?;
        if start == end && self.did.path_segments.is_empty() {
            return Err(DidParseError::EmptyPathSegment { index: end });
        }
        self.did.path_segments.push(self.input[start..end].to_string());
        Ok(next)
    }

    fn query(&mut self) -> Result<State, DidParseError> {
        let (start, end, next) = self.scan(&QUERY_RULES)?;
        self.did.query = self.input[start..end].to_string();
        Ok(next)
    }

    fn fragment(&mut self) -> Result<State, DidParseError> {
        let (start, end, next) = self.scan(&FRAGMENT_RULES)?;
        self.did.fragment = self.input[start..end].to_string();
        Ok(next)
    }

    /// Scan one component starting after the current delimiter. Returns
    /// the component bounds and the next state, and leaves `pos` on the
    /// terminating delimiter (or at the end of input).
    fn scan(&mut self, rules: &Rules) -> Result<(usize, usize, State), DidParseError> {
        let start = self.pos + 1;
        let mut i = start;
        let next = loop {
            let Some(&c) = self.bytes.get(i) else {
                break State::Done;
            };
            if let Some(next) = (rules.terminator)(c) {
                break next;
            }
            if rules.percent && c == b'%' {
                self.check_percent(i)?;
                i += 3;
                continue;
            }
            if !(rules.accept)(c) {
                return Err((rules.invalid)(i, self.char_at(i)));
            }
            i += 1;
        };
        self.pos = i;
        Ok((start, i, next))
    }

    fn check_percent(&self, i: usize) -> Result<(), DidParseError> {
        match (self.bytes.get(i + 1), self.bytes.get(i + 2)) {
            (Some(&a), Some(&b)) if is_hex_digit(a) && is_hex_digit(b) => Ok(()),
            _ => Err(DidParseError::BadPercentEncoding { index: i }),
        }
    }

    // Everything before `i` is ASCII, so `i` is a char boundary.
    fn char_at(&self, i: usize) -> char {
        self.input[i..].chars().next().unwrap_or('\u{FFFD}')
    }
}

/// Parse a DID or DID URL.
pub fn parse(input: &str) -> Result<Did, DidParseError> {
    if input.len() < MIN_DID_LENGTH {
        return Err(DidParseError::InputTooShort { index: input.len() });
    }

    let mut parser = Parser::new(input);
    let mut state = State::Scheme;
    while state != State::Done {
        let next = parser.transition(state)?;
        trace!(from = ?state, to = ?next, pos = parser.pos, "did parser transition");
        state = next;
    }
    Ok(parser.did)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
