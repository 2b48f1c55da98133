//! Compiles regular expressions, in a plain dialect and in a "parallel"
//! one with an interleave operator `&`, into finite automata.
//!
//! A pattern is parsed once into a [`ParseTree`] whose literals carry
//! their left-to-right position; the tree then feeds either Thompson's
//! construction ([`to_thompson_automaton`]) or the direct, position-based
//! construction of a deterministic automaton ([`to_direct_dfa`]).
//!
//! ```
//! use automata::{compile, to_direct_dfa, to_thompson_automaton, Automaton, Dialect};
//!
//! let tree = compile("a*b", Dialect::Plain).unwrap();
//! assert!(to_thompson_automaton(&tree).accepts("aab"));
//! assert!(!to_direct_dfa(&tree).accepts("ba"));
//! ```

pub mod automaton;
pub mod regexp;
pub mod direct;
pub mod thompson;
pub mod shuffle;

mod error;
mod options;

pub use automaton::{Automaton, Dfa, Nfa};
pub use direct::to_direct_dfa;
pub use error::{SyntaxError, SyntaxErrorKind};
pub use options::{Options, DEFAULT_MAX_DEPTH};
pub use regexp::{Dialect, ParseTree, Parser};
pub use thompson::to_thompson_automaton;

pub fn compile(pattern: &str, dialect: Dialect) -> Result<ParseTree, SyntaxError> {
    compile_with(pattern, Options::new(dialect))
}

pub fn compile_with(pattern: &str, options: Options) -> Result<ParseTree, SyntaxError> {
    Parser::new(options).parse(pattern)
}
