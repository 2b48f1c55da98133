
use log::debug;

use crate::automaton::{Automaton, Label, Nfa, StateId};
use crate::regexp::{Node, NodeId, ParseTree};
use crate::shuffle::interleave;

/*
 * Hands out state labels (q0, q1, ...) that are unique across
 * every fragment of one construction, so fragments can be merged
 * without renaming.
 */
struct Builder {
    next: usize,
}

fn start_of(nfa: &Nfa) -> StateId {
    nfa.start().unwrap_or_else(|| panic!("Fragment without a start state, this is a bug !"))
}

impl Builder {
    fn fresh(&mut self, nfa: &mut Nfa) -> StateId {
        let label = format!("q{}", self.next);
        self.next += 1;
        nfa.add_state(&label)
    }

    /*
     * s -label-> f
     */
    fn atom(&mut self, label: Label) -> Nfa {
        let mut nfa = Nfa::new_empty();
        let s = self.fresh(&mut nfa);
        let f = self.fresh(&mut nfa);
        nfa.add_transition(s, label, f);
        nfa.set_start(s);
        nfa.add_final(f);
        nfa
    }

    /*
     * Wraps the fragment between a new start and a new final state,
     * with epsilon moves to skip it and to run it again.
     */
    fn star(&mut self, mut nfa: Nfa) -> Nfa {
        let inner = start_of(&nfa);
        let s = self.fresh(&mut nfa);
        let f = self.fresh(&mut nfa);

        for old in nfa.take_finals() {
            nfa.add_transition(old, Label::Epsilon, inner);
            nfa.add_transition(old, Label::Epsilon, f);
        }
        nfa.add_transition(s, Label::Epsilon, inner);
        nfa.add_transition(s, Label::Epsilon, f);
        nfa.set_start(s);
        nfa.add_final(f);
        nfa
    }

    fn concat(&mut self, mut left: Nfa, right: Nfa) -> Nfa {
        let r_start = start_of(&right);
        let r_finals = right.finals().clone();
        let offset = left.absorb(right);

        for old in left.take_finals() {
            left.add_transition(old, Label::Epsilon, r_start + offset);
        }
        for f in r_finals {
            left.add_final(f + offset);
        }
        left
    }

    fn union(&mut self, mut left: Nfa, right: Nfa) -> Nfa {
        let l_start = start_of(&left);
        let r_start = start_of(&right);
        let r_finals = right.finals().clone();
        let offset = left.absorb(right);
        let s = self.fresh(&mut left);
        let f = self.fresh(&mut left);

        let finals = left.take_finals().into_iter()
            .chain(r_finals.into_iter().map(|old| old + offset))
            .collect::<Vec<_>>();
        for old in finals {
            left.add_transition(old, Label::Epsilon, f);
        }
        left.add_transition(s, Label::Epsilon, l_start);
        left.add_transition(s, Label::Epsilon, r_start + offset);
        left.set_start(s);
        left.add_final(f);
        left
    }
}

fn take(built: &mut [Option<Nfa>], parent: NodeId, child: NodeId) -> Nfa {
    built.get_mut(child)
        .and_then(Option::take)
        .unwrap_or_else(|| panic!("Node {} lost its child {}, this is a bug !", parent, child))
}

/*
 * Thompson's construction. The arena is walked in order, which is a
 * post-order walk of the tree; each node consumes the fragments of
 * its children. The end marker reads nothing, so it becomes an
 * epsilon fragment.
 */
pub fn to_thompson_automaton(tree: &ParseTree) -> Nfa {
    let mut builder = Builder {next: 0};
    let mut built: Vec<Option<Nfa>> = Vec::with_capacity(tree.len());

    for (id, node) in tree.nodes().iter().enumerate() {
        let nfa = match *node {
            Node::Char(c, _) => builder.atom(Label::Char(c)),
            Node::Epsilon | Node::End(_) => builder.atom(Label::Epsilon),
            Node::Star(e) => {
                let inner = take(&mut built, id, e);
                builder.star(inner)
            },
            Node::Concat(l, r) => {
                let (l, r) = (take(&mut built, id, l), take(&mut built, id, r));
                builder.concat(l, r)
            },
            Node::Union(l, r) => {
                let (l, r) = (take(&mut built, id, l), take(&mut built, id, r));
                builder.union(l, r)
            },
            Node::Shuffle(l, r) => {
                let (l, r) = (take(&mut built, id, l), take(&mut built, id, r));
                interleave(l, r)
            },
        };
        built.push(Some(nfa));
    }

    let root = tree.root();
    let nfa = take(&mut built, root, root);
    debug!(
        "{:?}: {} thompson states, {} transitions",
        tree.pattern(), nfa.state_count(), nfa.transitions().len()
    );
    nfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, Dialect};

    fn nfa(pattern: &str) -> Nfa {
        to_thompson_automaton(&compile(pattern, Dialect::Plain).unwrap())
    }

    #[test]
    fn single_literal() {
        let nfa = nfa("a");
        // One fragment for the literal, one for the end marker.
        assert_eq!(nfa.state_count(), 4);
        assert_eq!(nfa.finals().len(), 1);
        assert_eq!(nfa.alphabet().len(), 1);
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("aa"));
    }

    #[test]
    fn linear_size() {
        // Each literal and each operator adds at most two states.
        let pattern = "(ab|c)*d(e|f)*";
        let tree = compile(pattern, Dialect::Plain).unwrap();
        let nfa = to_thompson_automaton(&tree);
        assert!(nfa.state_count() <= 2 * tree.len());
    }

    #[test]
    fn epsilon_transitions_are_present() {
        let nfa = nfa("a*");
        assert!(nfa.transitions().iter().any(|(_, label, _)| *label == Label::Epsilon));
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("aaaa"));
        assert!(!nfa.accepts("b"));
    }

    #[test]
    fn operators() {
        let nfa = nfa("ab|c*");
        for word in &["ab", "", "c", "ccc"] {
            assert!(nfa.accepts(word), "{}", word);
        }
        for word in &["a", "abc", "cab", "b"] {
            assert!(!nfa.accepts(word), "{}", word);
        }
    }

    #[test]
    fn empty_pattern() {
        let nfa = nfa("");
        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("a"));
        assert!(nfa.alphabet().is_empty());
    }

    #[test]
    fn nested_stars() {
        let nfa = nfa("(a*b*)*c");
        for word in &["c", "abc", "bac", "bbbaac"] {
            assert!(nfa.accepts(word), "{}", word);
        }
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn ties_survive_later_combinators() {
        let tree = compile("(a&b)*c", Dialect::Parallel).unwrap();
        let nfa = to_thompson_automaton(&tree);

        assert_eq!(nfa.ties().len(), 4);
        for tie in nfa.ties() {
            assert!(nfa.moves(tie.from).any(|(_, to)| to == tie.to));
        }
        assert!(nfa.accepts("abbac"));
        assert!(!nfa.accepts("aabc"));
    }
}
