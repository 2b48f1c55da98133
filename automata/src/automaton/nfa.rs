
use std::collections::{BTreeMap, BTreeSet};

use super::types::*;
use super::states::StateTable;
use super::Automaton;

/*
 * A nondeterministic automaton: each (state, label) pair leads
 * to a set of states, and epsilon is a legal label.
 */
#[derive(Clone, Debug, Default)]
pub struct Nfa {
    table: StateTable,
    trans: Vec<BTreeMap<Label, BTreeSet<StateId>>>,
    ties: Vec<Tie>,
}

impl Nfa {
    /*
     * All the outgoing transitions of `s`.
     */
    pub fn moves(&self, s: StateId) -> impl Iterator<Item = (Label, StateId)> + '_ {
        self.trans[s].iter()
            .flat_map(|(label, targets)| targets.iter().map(move |t| (*label, *t)))
    }

    pub fn ties(&self) -> &[Tie] {
        &self.ties
    }

    pub fn record_tie(&mut self, tie: Tie) {
        self.ties.push(tie);
    }

    pub(crate) fn take_finals(&mut self) -> BTreeSet<StateId> {
        self.table.take_finals()
    }

    /*
     * Moves every state of `other` into this automaton and returns
     * the offset their ids were shifted by. Only the states,
     * transitions, alphabet and ties are merged: `other`'s
     * start and final states are up to the caller.
     */
    pub fn absorb(&mut self, other: Nfa) -> StateId {
        let offset = self.table.absorb(other.table);

        self.trans.extend(other.trans.into_iter().map(|map| {
            map.into_iter()
                .map(|(label, targets)| {
                    (label, targets.into_iter().map(|t| t + offset).collect::<BTreeSet<_>>())
                })
                .collect::<BTreeMap<_, _>>()
        }));
        self.ties.extend(other.ties.into_iter().map(|tie| tie.shifted(offset)));

        offset
    }

    pub fn epsilon_closure(&self, set: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = set.clone();
        let mut stack: Vec<StateId> = set.iter().copied().collect();

        while let Some(s) = stack.pop() {
            if let Some(targets) = self.trans[s].get(&Label::Epsilon) {
                for t in targets {
                    if closure.insert(*t) {
                        stack.push(*t);
                    }
                }
            }
        }

        closure
    }

    /*
     * The states reachable from `set` by reading `c`,
     * closed under epsilon moves.
     */
    pub fn step(&self, set: &BTreeSet<StateId>, c: char) -> BTreeSet<StateId> {
        let moved: BTreeSet<StateId> = set.iter()
            .filter_map(|s| self.trans[*s].get(&Label::Char(c)))
            .flat_map(|targets| targets.iter().copied())
            .collect();
        self.epsilon_closure(&moved)
    }

    pub fn initial_set(&self) -> BTreeSet<StateId> {
        match self.start() {
            Some(s) => self.epsilon_closure(&std::iter::once(s).collect()),
            None => BTreeSet::new(),
        }
    }
}

impl Automaton for Nfa {
    type Symbol = Label;

    fn new_empty() -> Self {
        Self::default()
    }

    fn table(&self) -> &StateTable {
        &self.table
    }

    fn table_mut(&mut self) -> &mut StateTable {
        &mut self.table
    }

    fn add_state(&mut self, label: &str) -> StateId {
        let (id, fresh) = self.table.add(label);
        if fresh {
            self.trans.push(BTreeMap::new());
        }
        id
    }

    fn add_transition(&mut self, from: StateId, sym: Label, to: StateId) {
        assert!(to < self.trans.len(), "Unknown target state {}.", to);
        if let Label::Char(c) = sym {
            self.table.add_symbol(c);
        }
        self.trans[from].entry(sym).or_insert_with(BTreeSet::new).insert(to);
    }

    fn delete_transition(&mut self, from: StateId, sym: Label, to: StateId) -> bool {
        let map = &mut self.trans[from];
        let removed = match map.get_mut(&sym) {
            Some(targets) => targets.remove(&to),
            None => false,
        };
        if map.get(&sym).map_or(false, |targets| targets.is_empty()) {
            map.remove(&sym);
        }
        removed
    }

    fn targets(&self, from: StateId, sym: Label) -> Vec<StateId> {
        self.trans[from].get(&sym)
            .map(|targets| targets.iter().copied().collect())
            .unwrap_or_default()
    }

    fn transitions(&self) -> Vec<(StateId, Label, StateId)> {
        (0..self.trans.len())
            .flat_map(|s| self.moves(s).map(move |(label, t)| (s, label, t)))
            .collect()
    }

    fn accepts(&self, word: &str) -> bool {
        let mut current = self.initial_set();

        for c in word.chars() {
            if current.is_empty() {
                return false
            }
            current = self.step(&current, c);
        }

        current.iter().any(|s| self.is_final(*s))
    }
}
