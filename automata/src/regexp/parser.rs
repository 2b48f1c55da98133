
use log::{debug, trace};

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::options::Options;
use super::token::Token;
use super::tree::*;

/*
 * A recursive-descent parser for
 *
 *   R  -> P                   (parallel dialect; R -> O otherwise)
 *   P  -> O P'                P' -> '&' O P' | ε
 *   O  -> C O'                O' -> '|' C O' | ε
 *   C  -> S C'                C' -> S C' | ε
 *   S  -> L S'                S' -> '*' S' | ε
 *   L  -> literal | '(' R ')' | ε
 *
 * The tail rules are loops, so the only recursion is through
 * groups; the current group depth is threaded through the rules.
 *
 * Parsing stops for good at the first error: `done` is set and
 * every rule returns right away from then on.
 *
 * A parser can be reused for several patterns, one at a time.
 */
pub struct Parser {
    options: Options,
    pattern: String,
    chars: Vec<char>,
    // Index of the lookahead in `chars`.
    cursor: usize,
    lookahead: Token,
    errors: usize,
    done: bool,
    error: Option<SyntaxError>,
    nodes: Vec<Node>,
    symbols: Vec<char>,
    positions: Vec<PosSymbol>,
}

impl Parser {
    pub fn new(options: Options) -> Self {
        Parser {
            options,
            pattern: String::new(),
            chars: Vec::new(),
            cursor: 0,
            lookahead: Token::Eof,
            errors: 0,
            done: false,
            error: None,
            nodes: Vec::new(),
            symbols: Vec::new(),
            positions: Vec::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /*
     * The distinct literals met so far, in order of first occurrence.
     */
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /*
     * Forgets everything about the previous pattern.
     */
    pub fn set_pattern(&mut self, pattern: &str) {
        self.pattern = pattern.to_string();
        self.chars = pattern.chars().collect();
        self.cursor = 0;
        self.errors = 0;
        self.done = false;
        self.error = None;
        self.nodes = Vec::new();
        self.symbols = Vec::new();
        self.positions = Vec::new();
        self.lookahead = self.token_at(0);
    }

    pub fn parse(&mut self, pattern: &str) -> Result<ParseTree, SyntaxError> {
        self.set_pattern(pattern);

        let body = self.regexp(0);
        if !self.done {
            match self.lookahead {
                Token::Eof => (),
                Token::Close => self.fail(SyntaxErrorKind::UnmatchedClose),
                _ => self.mismatch(),
            }
        }

        let end = self.end_marker();
        self.push(Node::Concat(body, end));

        if let Some(error) = self.error.clone() {
            return Err(error)
        }

        Ok(ParseTree::new(
            self.pattern.clone(),
            self.options.dialect,
            std::mem::take(&mut self.nodes),
            self.symbols.clone(),
            std::mem::take(&mut self.positions),
        ))
    }

    fn token_at(&self, i: usize) -> Token {
        match self.chars.get(i) {
            Some(c) => Token::classify(*c, self.options.dialect),
            None => Token::Eof,
        }
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.lookahead = self.token_at(self.cursor);
    }

    fn fail(&mut self, kind: SyntaxErrorKind) {
        self.errors += 1;
        self.done = true;
        debug!(
            "syntax error in {:?} at offset {}: {} ({} error(s))",
            self.pattern, self.cursor, kind, self.errors
        );

        if self.error.is_none() {
            self.error = Some(SyntaxError {
                kind,
                offset: self.cursor,
                errors: self.errors,
            });
        }
    }

    /*
     * Reports the lookahead as not belonging here. The rule loops
     * consume every operator and every token that starts a factor,
     * so only the end of input or an invalid character can be left.
     */
    fn mismatch(&mut self) {
        let kind = match self.lookahead {
            Token::Eof => SyntaxErrorKind::UnclosedGroup,
            Token::Invalid(c) => SyntaxErrorKind::InvalidCharacter(c),
            token => unreachable!("Token {:?} left unconsumed, this is a bug !", token),
        };
        self.fail(kind)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn literal(&mut self, c: char) -> NodeId {
        self.positions.push(PosSymbol::Char(c));
        let p = self.positions.len();
        if !self.symbols.contains(&c) {
            self.symbols.push(c);
        }
        trace!("position {} is {:?}", p, c);
        self.push(Node::Char(c, p))
    }

    fn end_marker(&mut self) -> NodeId {
        self.positions.push(PosSymbol::End);
        let p = self.positions.len();
        self.push(Node::End(p))
    }

    fn regexp(&mut self, depth: usize) -> NodeId {
        if self.options.dialect.has_interleave() {
            self.interleave(depth)
        } else {
            self.alternation(depth)
        }
    }

    fn interleave(&mut self, depth: usize) -> NodeId {
        let mut left = self.alternation(depth);

        while !self.done && self.lookahead == Token::Amp {
            self.advance();
            let right = self.alternation(depth);
            left = self.push(Node::Shuffle(left, right));
        }

        left
    }

    fn alternation(&mut self, depth: usize) -> NodeId {
        let mut left = self.concatenation(depth);

        while !self.done && self.lookahead == Token::Bar {
            self.advance();
            let right = self.concatenation(depth);
            left = self.push(Node::Union(left, right));
        }

        left
    }

    fn concatenation(&mut self, depth: usize) -> NodeId {
        let mut left = self.repetition(depth);

        while !self.done && self.lookahead.starts_factor() {
            let right = self.repetition(depth);
            left = self.push(Node::Concat(left, right));
        }

        left
    }

    fn repetition(&mut self, depth: usize) -> NodeId {
        let mut node = self.atom(depth);

        while !self.done && self.lookahead == Token::Star {
            self.advance();
            node = self.push(Node::Star(node));
        }

        node
    }

    fn atom(&mut self, depth: usize) -> NodeId {
        if self.done {
            return self.push(Node::Epsilon)
        }

        match self.lookahead {
            Token::Char(c) => {
                self.advance();
                self.literal(c)
            },
            Token::Open if depth >= self.options.max_depth => {
                self.fail(SyntaxErrorKind::TooDeep(self.options.max_depth));
                self.push(Node::Epsilon)
            },
            Token::Open => {
                self.advance();
                let inner = self.regexp(depth + 1);
                if !self.done {
                    if self.lookahead == Token::Close {
                        self.advance();
                    } else {
                        self.mismatch();
                    }
                }
                inner
            },
            _ => self.push(Node::Epsilon),
        }
    }
}
