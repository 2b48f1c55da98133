
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::debug;

use super::types::*;
use super::states::StateTable;
use super::nfa::Nfa;
use super::Automaton;

/*
 * A deterministic automaton: each (state, character) pair
 * leads to at most one state, and there is no epsilon.
 */
#[derive(Clone, Debug, Default)]
pub struct Dfa {
    table: StateTable,
    trans: Vec<BTreeMap<char, StateId>>,
}

impl Dfa {
    pub fn next(&self, s: StateId, c: char) -> Option<StateId> {
        self.trans[s].get(&c).copied()
    }

    /*
     * Subset construction: each state of the result stands for the
     * epsilon-closed set of states the automaton can be in.
     */
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        struct Ctx<'a> {
            nfa: &'a Nfa,
            dfa: Dfa,
            ids: BTreeMap<BTreeSet<StateId>, StateId>,
            unmarked: VecDeque<BTreeSet<StateId>>,
        }

        impl Ctx<'_> {
            fn state(&mut self, set: BTreeSet<StateId>) -> StateId {
                if let Some(id) = self.ids.get(&set) {
                    return *id
                }

                let label = format!(
                    "{{{}}}",
                    set.iter().map(|s| self.nfa.label(*s)).collect::<Vec<_>>().join(",")
                );
                let id = self.dfa.add_state(&label);
                if set.iter().any(|s| self.nfa.is_final(*s)) {
                    self.dfa.add_final(id);
                }
                self.ids.insert(set.clone(), id);
                self.unmarked.push_back(set);
                id
            }
        }

        let mut ctx = Ctx {
            nfa,
            dfa: Dfa::new_empty(),
            ids: BTreeMap::new(),
            unmarked: VecDeque::new(),
        };
        nfa.alphabet().iter().for_each(|c| ctx.dfa.add_symbol(*c));

        if nfa.start().is_none() {
            return ctx.dfa
        }

        let start = ctx.state(nfa.initial_set());
        ctx.dfa.set_start(start);

        while let Some(set) = ctx.unmarked.pop_front() {
            let from = ctx.ids[&set];
            for c in nfa.alphabet() {
                let next = nfa.step(&set, *c);
                if !next.is_empty() {
                    let to = ctx.state(next);
                    ctx.dfa.add_transition(from, *c, to);
                }
            }
        }

        debug!(
            "determinized {} nfa states into {} dfa states",
            nfa.state_count(), ctx.dfa.state_count()
        );

        ctx.dfa
    }

    /*
     * Tests whether both automata recognize the same language, by walking
     * their product from the pair of start states. A missing transition
     * leads to an implicit dead state (None), which is never final.
     */
    pub fn equivalent(&self, other: &Dfa) -> bool {
        let alphabet: BTreeSet<char> = self.alphabet().union(other.alphabet()).copied().collect();
        let is_final = |dfa: &Dfa, s: Option<StateId>| s.map_or(false, |s| dfa.is_final(s));
        let next = |dfa: &Dfa, s: Option<StateId>, c: char| s.and_then(|s| dfa.next(s, c));

        let start = (self.start(), other.start());
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);

        while let Some((p, q)) = queue.pop_front() {
            if is_final(self, p) != is_final(other, q) {
                return false
            }

            for c in alphabet.iter() {
                let pair = (next(self, p, *c), next(other, q, *c));
                if seen.insert(pair) {
                    queue.push_back(pair);
                }
            }
        }

        true
    }
}

impl Automaton for Dfa {
    type Symbol = char;

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

    /*
     * Replaces any previous transition on `sym` from `from`.
     */
    fn add_transition(&mut self, from: StateId, sym: char, to: StateId) {
        assert!(to < self.trans.len(), "Unknown target state {}.", to);
        self.table.add_symbol(sym);
        self.trans[from].insert(sym, to);
    }

    fn delete_transition(&mut self, from: StateId, sym: char, to: StateId) -> bool {
        if self.trans[from].get(&sym) == Some(&to) {
            self.trans[from].remove(&sym);
            true
        } else {
            false
        }
    }

    fn targets(&self, from: StateId, sym: char) -> Vec<StateId> {
        self.next(from, sym).into_iter().collect()
    }

    fn transitions(&self) -> Vec<(StateId, char, StateId)> {
        self.trans.iter().enumerate()
            .flat_map(|(s, map)| map.iter().map(move |(c, t)| (s, *c, *t)))
            .collect()
    }

    fn accepts(&self, word: &str) -> bool {
        let mut state = self.start();

        for c in word.chars() {
            state = state.and_then(|s| self.next(s, c));
        }

        state.map_or(false, |s| self.is_final(s))
    }
}
