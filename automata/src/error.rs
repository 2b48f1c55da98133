
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    // A character outside of the dialect's alphabet.
    InvalidCharacter(char),
    // A ')' without a matching '('.
    UnmatchedClose,
    // The pattern ended inside a group.
    UnclosedGroup,
    // Groups are nested deeper than the configured limit.
    TooDeep(usize),
}

/*
 * The parser stops at the first error, so there is only ever one
 * error to report; `errors` is the value of the parser's error
 * counter when it halted.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    // Offset (in characters) of the offending token.
    pub offset: usize,
    pub errors: usize,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::InvalidCharacter(c) => write!(f, "invalid character {:?}", c),
            SyntaxErrorKind::UnmatchedClose => write!(f, "unmatched ')'"),
            SyntaxErrorKind::UnclosedGroup => write!(f, "missing ')'"),
            SyntaxErrorKind::TooDeep(limit) => {
                write!(f, "groups nested deeper than {} levels", limit)
            },
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax error at offset {}: {}.", self.offset, self.kind)
    }
}

impl std::error::Error for SyntaxError {}

impl From<SyntaxError> for String {
    fn from(error: SyntaxError) -> Self {
        error.to_string()
    }
}
