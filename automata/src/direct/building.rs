
use std::collections::{BTreeMap, VecDeque};

use log::debug;

use crate::automaton::{Automaton, Dfa, StateId};
use crate::regexp::{ParseTree, PosSymbol};
use crate::thompson::to_thompson_automaton;
use super::sets::*;

/*
 * The canonical label of a position-set state, e.g. `{1,2,3}`.
 */
pub fn pos_set_label(set: &PosSet) -> String {
    format!(
        "{{{}}}",
        set.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",")
    )
}

/*
 * Builds a deterministic automaton straight from the positions of
 * the tree: states are sets of positions, starting from FIRST(root),
 * and a state is final iff it holds the end marker's position.
 *
 * Interleaving has no FOLLOW rule, so trees that use it are
 * determinized from their Thompson automaton instead.
 */
pub fn to_direct_dfa(tree: &ParseTree) -> Dfa {
    if tree.has_shuffle() {
        debug!("{:?} interleaves, determinizing its Thompson automaton", tree.pattern());
        return Dfa::from_nfa(&to_thompson_automaton(tree))
    }

    let annotations = Annotations::new(tree);
    let follow = FollowTable::new(tree, &annotations);
    build_states(tree, &annotations, &follow)
}

fn build_states(tree: &ParseTree, annotations: &Annotations, follow: &FollowTable) -> Dfa {
    struct Ctx<'a> {
        tree: &'a ParseTree,
        follow: &'a FollowTable,
        dfa: Dfa,
        ids: BTreeMap<PosSet, StateId>,
        unmarked: VecDeque<PosSet>,
    }

    impl Ctx<'_> {
        fn state(&mut self, set: PosSet) -> StateId {
            if let Some(id) = self.ids.get(&set) {
                return *id
            }

            let id = self.dfa.add_state(&pos_set_label(&set));
            if set.contains(&self.tree.end_position()) {
                self.dfa.add_final(id);
            }
            self.ids.insert(set.clone(), id);
            self.unmarked.push_back(set);
            id
        }

        /*
         * The union of FOLLOW(p) for every p of `set` that reads `c`.
         */
        fn next_set(&self, set: &PosSet, c: char) -> PosSet {
            set.iter()
                .filter(|p| self.tree.symbol_at(**p) == PosSymbol::Char(c))
                .flat_map(|p| self.follow.get(*p).iter().copied())
                .collect()
        }
    }

    let mut ctx = Ctx {
        tree,
        follow,
        dfa: Dfa::new_empty(),
        ids: BTreeMap::new(),
        unmarked: VecDeque::new(),
    };
    tree.symbols().iter().for_each(|c| ctx.dfa.add_symbol(*c));

    let start = ctx.state(annotations.first(tree.root()).clone());
    ctx.dfa.set_start(start);

    while let Some(set) = ctx.unmarked.pop_front() {
        let from = ctx.ids[&set];
        for c in tree.symbols() {
            let next = ctx.next_set(&set, *c);
            if !next.is_empty() {
                let to = ctx.state(next);
                ctx.dfa.add_transition(from, *c, to);
            }
        }
    }

    debug!(
        "{:?}: {} positions, {} dfa states",
        tree.pattern(), tree.end_position(), ctx.dfa.state_count()
    );

    ctx.dfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, Dialect};

    fn dfa(pattern: &str) -> Dfa {
        to_direct_dfa(&compile(pattern, Dialect::Plain).unwrap())
    }

    #[test]
    fn single_literal() {
        let dfa = dfa("a");
        assert_eq!(dfa.state_count(), 2);
        assert_eq!(dfa.transitions().len(), 1);

        let start = dfa.start().unwrap();
        assert!(!dfa.is_final(start));
        let next = dfa.next(start, 'a').unwrap();
        assert!(dfa.is_final(next));
        assert_eq!(dfa.label(start), "{1}");
        assert_eq!(dfa.label(next), "{2}");
    }

    #[test]
    fn alternation() {
        let dfa = dfa("a|b");
        let start = dfa.start().unwrap();
        assert_eq!(dfa.label(start), "{1,2}");
        assert!(!dfa.is_final(start));

        let on_a = dfa.next(start, 'a').unwrap();
        let on_b = dfa.next(start, 'b').unwrap();
        assert!(dfa.is_final(on_a));
        assert!(dfa.is_final(on_b));
        // Both successors are the position set {3}.
        assert_eq!(on_a, on_b);
        assert_eq!(dfa.label(on_a), "{3}");
    }

    #[test]
    fn star_then_literal() {
        let dfa = dfa("a*b");
        for word in &["b", "ab", "aab", "aaab"] {
            assert!(dfa.accepts(word), "{}", word);
        }
        for word in &["", "ba", "a", "abb"] {
            assert!(!dfa.accepts(word), "{}", word);
        }
    }

    #[test]
    fn starred_alternation() {
        let dfa = dfa("(a|b)*");
        assert!(dfa.is_final(dfa.start().unwrap()));
        for word in &["", "a", "b", "abba", "bbbbab"] {
            assert!(dfa.accepts(word), "{}", word);
        }
        assert!(!dfa.accepts("abc"));
    }

    #[test]
    fn textbook_example() {
        let dfa = dfa("(a|b)*abb");
        assert_eq!(dfa.state_count(), 4);
        for label in &["{1,2,3}", "{1,2,3,4}", "{1,2,3,5}", "{1,2,3,6}"] {
            assert!(dfa.is_state(label), "{}", label);
        }
        assert_eq!(dfa.finals().len(), 1);
        assert!(dfa.is_final(dfa.state("{1,2,3,6}").unwrap()));
        assert!(dfa.accepts("babb"));
        assert!(!dfa.accepts("abab"));
    }

    #[test]
    fn start_label_is_first_of_root() {
        for pattern in &["(a|(b|c))d", "((a*b)*c)*", "a(b|)", ""] {
            let tree = compile(pattern, Dialect::Plain).unwrap();
            let annotations = Annotations::new(&tree);
            let dfa = to_direct_dfa(&tree);
            let start = dfa.start().unwrap();

            let first = annotations.first(tree.root());
            assert_eq!(dfa.label(start), pos_set_label(first));
            assert_eq!(dfa.is_final(start), first.contains(&tree.end_position()));
        }
    }

    #[test]
    fn finals_hold_the_end_marker() {
        for pattern in &["(a|(b|c))d", "((a*b)*c)*"] {
            let tree = compile(pattern, Dialect::Plain).unwrap();
            let dfa = to_direct_dfa(&tree);
            let end = tree.end_position().to_string();

            for s in 0..dfa.state_count() {
                let label = dfa.label(s);
                let holds_end = label.trim_matches(|c| c == '{' || c == '}')
                    .split(',')
                    .any(|p| p == end);
                assert_eq!(dfa.is_final(s), holds_end, "{}", label);
            }
        }
    }

    #[test]
    fn interleave_is_determinized() {
        let tree = compile("a&b", Dialect::Parallel).unwrap();
        let dfa = to_direct_dfa(&tree);
        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("ba"));
        assert!(!dfa.accepts("aa"));
        assert!(!dfa.accepts("a"));
    }
}
