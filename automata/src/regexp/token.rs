
use super::dialect::Dialect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Char(char),
    Open,
    Close,
    Bar,
    Star,
    Amp,
    Invalid(char),
    Eof,
}

impl Token {
    pub fn classify(c: char, dialect: Dialect) -> Token {
        match c {
            '(' => Token::Open,
            ')' => Token::Close,
            '|' => Token::Bar,
            '*' => Token::Star,
            '&' if dialect.has_interleave() => Token::Amp,
            c if dialect.is_literal(c) => Token::Char(c),
            c => Token::Invalid(c),
        }
    }

    /*
     * Concatenation has no operator: another factor follows
     * exactly when the lookahead can start one.
     */
    pub fn starts_factor(self) -> bool {
        match self {
            Token::Char(_) | Token::Open => true,
            _ => false,
        }
    }
}
