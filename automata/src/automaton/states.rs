
use std::collections::{BTreeMap, BTreeSet};

use super::types::StateId;

/*
 * The bookkeeping every automaton shares: unique state labels,
 * the start state, the final states and the alphabet.
 * Transitions are left to the automaton itself, since their
 * arity depends on determinism.
 */
#[derive(Clone, Debug, Default)]
pub struct StateTable {
    labels: Vec<String>,
    index: BTreeMap<String, StateId>,
    start: Option<StateId>,
    finals: BTreeSet<StateId>,
    alphabet: BTreeSet<char>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /*
     * Returns the id of the state with this label, and whether
     * it had to be created.
     */
    pub fn add(&mut self, label: &str) -> (StateId, bool) {
        if let Some(id) = self.index.get(label) {
            return (*id, false)
        }

        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        (id, true)
    }

    pub fn find(&self, label: &str) -> Option<StateId> {
        self.index.get(label).copied()
    }

    pub fn label(&self, s: StateId) -> &str {
        &self.labels[s]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn set_start(&mut self, s: StateId) {
        assert!(s < self.len(), "Unknown start state {}.", s);
        self.start = Some(s);
    }

    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    pub fn add_final(&mut self, s: StateId) {
        assert!(s < self.len(), "Unknown final state {}.", s);
        self.finals.insert(s);
    }

    pub fn remove_final(&mut self, s: StateId) -> bool {
        self.finals.remove(&s)
    }

    pub fn take_finals(&mut self) -> BTreeSet<StateId> {
        std::mem::take(&mut self.finals)
    }

    pub fn is_final(&self, s: StateId) -> bool {
        self.finals.contains(&s)
    }

    pub fn finals(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    pub fn add_symbol(&mut self, c: char) {
        self.alphabet.insert(c);
    }

    pub fn has_symbol(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /*
     * Appends the states of `other` after ours and returns
     * the offset their ids were shifted by. The alphabets are
     * merged; the start and final states of `other` are not,
     * the caller decides what they become.
     */
    pub fn absorb(&mut self, other: StateTable) -> StateId {
        let offset = self.len();

        for label in other.labels {
            let (_, fresh) = self.add(&label);
            if !fresh {
                panic!("State label \"{}\" is used twice, this is a bug !", label)
            }
        }
        self.alphabet.extend(other.alphabet);

        offset
    }
}
