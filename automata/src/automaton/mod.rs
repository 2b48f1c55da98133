
mod types;
mod states;
mod nfa;
mod dfa;
mod printing;

pub use types::{StateId, Label, Side, Tie};
pub use states::StateTable;
pub use nfa::Nfa;
pub use dfa::Dfa;

use std::collections::BTreeSet;

/*
 * The capabilities every automaton representation provides.
 * Both constructions only go through this surface, so
 * `Symbol` is the one thing that differs: nondeterministic
 * automata read `Label`s (epsilon included), deterministic
 * ones read plain characters.
 */
pub trait Automaton {
    type Symbol: Copy + Ord + std::fmt::Display;

    fn new_empty() -> Self where Self: Sized;

    fn table(&self) -> &StateTable;
    fn table_mut(&mut self) -> &mut StateTable;

    /*
     * Adds a state with the given label, or returns the
     * existing one if the label is already taken.
     */
    fn add_state(&mut self, label: &str) -> StateId;

    fn add_transition(&mut self, from: StateId, sym: Self::Symbol, to: StateId);

    /*
     * Returns false if there was no such transition.
     */
    fn delete_transition(&mut self, from: StateId, sym: Self::Symbol, to: StateId) -> bool;

    fn targets(&self, from: StateId, sym: Self::Symbol) -> Vec<StateId>;

    /*
     * Every transition, ordered by source state then symbol.
     */
    fn transitions(&self) -> Vec<(StateId, Self::Symbol, StateId)>;

    fn accepts(&self, word: &str) -> bool;

    fn has_transition_on(&self, from: StateId, sym: Self::Symbol) -> bool {
        !self.targets(from, sym).is_empty()
    }

    fn state(&self, label: &str) -> Option<StateId> {
        self.table().find(label)
    }

    fn is_state(&self, label: &str) -> bool {
        self.state(label).is_some()
    }

    fn label(&self, s: StateId) -> &str {
        self.table().label(s)
    }

    fn state_count(&self) -> usize {
        self.table().len()
    }

    fn set_start(&mut self, s: StateId) {
        self.table_mut().set_start(s)
    }

    fn start(&self) -> Option<StateId> {
        self.table().start()
    }

    fn add_final(&mut self, s: StateId) {
        self.table_mut().add_final(s)
    }

    fn remove_final(&mut self, s: StateId) -> bool {
        self.table_mut().remove_final(s)
    }

    fn is_final(&self, s: StateId) -> bool {
        self.table().is_final(s)
    }

    fn finals(&self) -> &BTreeSet<StateId> {
        self.table().finals()
    }

    fn add_symbol(&mut self, c: char) {
        self.table_mut().add_symbol(c)
    }

    fn has_symbol(&self, c: char) -> bool {
        self.table().has_symbol(c)
    }

    fn alphabet(&self) -> &BTreeSet<char> {
        self.table().alphabet()
    }
}
