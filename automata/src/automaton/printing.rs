
use std::fmt;

use super::{Automaton, Nfa, Dfa};

fn labels<A: Automaton>(a: &A, ids: impl Iterator<Item = usize>) -> String {
    ids.map(|s| a.label(s).to_string()).collect::<Vec<String>>().join(" ")
}

fn describe<A: Automaton>(a: &A, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "states: {}", labels(a, 0..a.state_count()))?;
    match a.start() {
        Some(s) => writeln!(f, "start: {}", a.label(s))?,
        None => writeln!(f, "start:")?,
    }
    writeln!(f, "finals: {}", labels(a, a.finals().iter().copied()))?;
    writeln!(
        f,
        "alphabet: {}",
        a.alphabet().iter().map(|c| c.to_string()).collect::<Vec<String>>().join(" ")
    )?;
    writeln!(f, "transitions:")?;

    for (from, sym, to) in a.transitions() {
        writeln!(f, "    {} -{}-> {}", a.label(from), sym, a.label(to))?;
    }

    Ok(())
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(self, f)
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(self, f)
    }
}
