
use std::fmt;

pub type StateId = usize;

/*
 * What a transition of a nondeterministic automaton reads.
 * Deterministic automata only ever read plain characters.
 */
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Label {
    Epsilon,
    Char(char),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Char(c) => write!(f, "{}", c),
        }
    }
}

/// The operand of an interleave that did not move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

/*
 * Records that `to` was reached from `from` by advancing
 * only one operand of an interleave: both pair states
 * share the state of the `held` operand.
 */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tie {
    pub from: StateId,
    pub to: StateId,
    pub held: Side,
}

impl Tie {
    pub(crate) fn shifted(self, offset: StateId) -> Tie {
        Tie {
            from: self.from + offset,
            to: self.to + offset,
            held: self.held,
        }
    }
}
