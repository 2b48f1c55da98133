
/*
 * The punctuation that may appear as a literal.
 * '(', ')', '|' and '*' are always operators.
 */
pub const PUNCTUATION: &str = "!\"#$%&'+,-./:;<=>?@[\\]^_`{}~";

/*
 * The two dialects share their grammar; the parallel one adds
 * the interleave layer and reserves '&' for it.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Plain,
    Parallel,
}

impl Dialect {
    pub fn has_interleave(self) -> bool {
        self == Dialect::Parallel
    }

    pub fn is_literal(self, c: char) -> bool {
        match c {
            '&' => !self.has_interleave(),
            c => c.is_ascii_alphanumeric() || PUNCTUATION.contains(c),
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Plain
    }
}
