
use crate::regexp::Dialect;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/*
 * Everything that parameterizes a compilation.
 * `max_depth` bounds the nesting of groups, which is the
 * only thing the parser recurses on.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub dialect: Dialect,
    pub max_depth: usize,
}

impl Options {
    pub fn new(dialect: Dialect) -> Self {
        Options {
            dialect,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new(Dialect::Plain)
    }
}
