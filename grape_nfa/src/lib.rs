//! Thompson NFA pipeline for byte oriented patterns.
//!
//! A pattern goes through three stages:
//!
//! ```text
//! pattern ──parse──> postfix tokens ──compile──> NFA ──run──> bool
//! ```
//!
//! [`parse`] tokenizes the pattern, makes concatenation explicit and
//! reorders everything into postfix with the shunting-yard algorithm.
//! [`compile`] applies Thompson's construction to the postfix stream.
//! [`NFA::run`] decides whether an input matches the whole pattern by
//! stepping the set of active states over the input, one byte at a time.
//!
//! Supported syntax: literals, concatenation, `|`, `*`, `+`, `?`, grouping
//! with `(` `)`, `.` (any byte but `\n`), `[abc]`, `[^abc]`, `\d` and `\w`.
//! Any other escaped byte stands for itself.
//!
//! ```
//! let nfa = grape_nfa::compile(&grape_nfa::parse(br"ab*c")).unwrap();
//! assert!(nfa.run(b"abbbc"));
//! assert!(!nfa.run(b"ab"));
//! ```

#[macro_use]
mod macros;

pub mod compiler;
pub mod matcher;
pub mod nfa;
pub mod parser;
pub mod token;

pub use compiler::{Compiler, Config};
pub use matcher::Matcher;
pub use nfa::{Fragment, State, StateId, Transition, NFA};
pub use parser::parse;
pub use token::{ByteClass, Operator, Token};

/// The result of compiling postfix tokens to a Thompson NFA
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur during compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// An operator was reached with too few fragments on the operand stack
    InsufficientOperands(Operator),
    /// The operand stack did not reduce to exactly one fragment
    UnterminatedExpression {
        /// How many fragments were left over
        fragments: usize,
    },
    /// The NFA would need more states than the configured limit
    TooComplex {
        limit: usize,
    },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::InsufficientOperands(op) => {
                write!(f, "malformed pattern: {} is missing an operand", op)
            }
            CompileError::UnterminatedExpression { fragments: 0 } => {
                write!(f, "malformed pattern: nothing to match")
            }
            CompileError::UnterminatedExpression { fragments } => write!(
                f,
                "malformed pattern: expected one expression, found {}",
                fragments
            ),
            CompileError::TooComplex { limit } => {
                write!(f, "pattern needs more than {} NFA states", limit)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Compile postfix tokens into an NFA with the default configuration.
pub fn compile(tokens: &[Token]) -> CompileResult<NFA> {
    Compiler::new().compile(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_match(pattern: &str, input: &str) -> bool {
        compile(&parse(pattern.as_bytes())).unwrap().run(input.as_bytes())
    }

    #[test]
    fn test_pipeline() {
        assert!(is_match("a", "a"));
        assert!(!is_match("a", "b"));
        assert!(!is_match("a", ""));
        assert!(is_match("ab*c", "ac"));
        assert!(is_match("ab*c", "abbbc"));
        assert!(!is_match("ab*c", "ab"));
    }

    #[test]
    fn test_error_display() {
        let err = CompileError::InsufficientOperands(Operator::Star);
        assert_eq!(err.to_string(), "malformed pattern: star (*) is missing an operand");
        let err = CompileError::UnterminatedExpression { fragments: 0 };
        assert_eq!(err.to_string(), "malformed pattern: nothing to match");
        let err = CompileError::UnterminatedExpression { fragments: 3 };
        assert_eq!(err.to_string(), "malformed pattern: expected one expression, found 3");
        let err = CompileError::TooComplex { limit: 10 };
        assert_eq!(err.to_string(), "pattern needs more than 10 NFA states");
    }

    #[test]
    fn test_nfa_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NFA>();
    }
}
