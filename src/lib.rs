/*!
This crate provides a small regular expression matcher over bytes.

A pattern is compiled into a Thompson NFA, and matching simulates that NFA
by tracking the set of states it could be in. Since no alternative is ever
retried, matching runs in time linear in the length of the input for every
pattern. There is no catastrophic backtracking.

Matching is always against the *whole* input: `ab` matches `"ab"` but not
`"xaby"`. There are no anchors, captures or searches.

# Example

```
use grape::Regex;

let re = Regex::new(r"\d+(px|em)")?;
assert!(re.is_match(b"12px"));
assert!(!re.is_match(b"12pt"));
# Ok::<(), grape::Error>(())
```

# Syntax

<pre class="rust">
x        a literal byte x
\x       x, for any byte other than d and w
\d       an ASCII digit, [0123456789]
\w       an ASCII word byte, digits, letters and _
.        any byte except \n
[xyz]    any of the listed bytes (no ranges, no escapes)
[^xyz]   any byte except the listed ones
xy       x followed by y
x|y      x or y
x*       zero or more x
x+       one or more x
x?       zero or one x
(x)      grouping
</pre>

Malformed patterns are handled leniently where possible. A trailing `\` is
a literal backslash and a `[` with no closing `]` is read as plain
literals. Patterns that still do not form a single expression (such as
`*a`, `a|` or the empty pattern) fail to compile.

# Crate features

* **logging** (enabled by default) - Emits `log` messages from the
compiler and matcher. The `grape` binary sends them to `env_logger`.
*/

#![deny(missing_docs)]

use std::fmt;

pub use grape_nfa::{CompileError, Operator, NFA};

/// An error that occurred while compiling a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pattern: String,
    kind: CompileError,
}

impl Error {
    /// The pattern that failed to compile.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// What went wrong.
    pub fn kind(&self) -> &CompileError {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to compile '{}': {}", self.pattern, self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// A compiled regular expression.
///
/// A `Regex` is immutable once built, so it can be shared freely between
/// threads.
#[derive(Clone, Debug)]
pub struct Regex {
    pattern: String,
    nfa: NFA,
}

impl Regex {
    /// Compile a pattern with the default configuration.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        RegexBuilder::new(pattern).build()
    }

    /// Returns true if and only if the entire haystack matches.
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.nfa.run(haystack)
    }

    /// The pattern this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The underlying automaton.
    pub fn nfa(&self) -> &NFA {
        &self.nfa
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl std::str::FromStr for Regex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Regex, Error> {
        Regex::new(s)
    }
}

/// A configurable builder for a [`Regex`].
#[derive(Clone, Debug)]
pub struct RegexBuilder {
    pattern: String,
    config: grape_nfa::Config,
}

impl RegexBuilder {
    /// Create a new builder for the given pattern.
    pub fn new(pattern: &str) -> RegexBuilder {
        RegexBuilder {
            pattern: pattern.to_string(),
            config: grape_nfa::Config::new(),
        }
    }

    /// Limit how many NFA states the pattern may compile to. `None`, the
    /// default, means no limit.
    pub fn state_limit(&mut self, limit: Option<usize>) -> &mut RegexBuilder {
        self.config = self.config.clone().state_limit(limit);
        self
    }

    /// Compile the pattern.
    pub fn build(&self) -> Result<Regex, Error> {
        let postfix = grape_nfa::parse(self.pattern.as_bytes());
        let nfa = grape_nfa::Compiler::new()
            .configure(self.config.clone())
            .compile(&postfix)
            .map_err(|kind| Error { pattern: self.pattern.clone(), kind })?;
        Ok(Regex { pattern: self.pattern.clone(), nfa })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_limit() {
        let err = RegexBuilder::new("abc").state_limit(Some(5)).build().unwrap_err();
        assert_eq!(err.kind(), &CompileError::TooComplex { limit: 5 });
        assert_eq!(err.pattern(), "abc");
        assert!(RegexBuilder::new("abc").state_limit(Some(6)).build().is_ok());
    }

    #[test]
    fn error_display() {
        let err = Regex::new("a|").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to compile 'a|': malformed pattern: alternation (|) is missing an operand"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn from_str() {
        let re: Regex = "a+b".parse().unwrap();
        assert_eq!(re.as_str(), "a+b");
        assert_eq!(re.to_string(), "a+b");
        assert!(re.is_match(b"aab"));
    }
}
