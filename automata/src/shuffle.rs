
use std::collections::{BTreeMap, VecDeque};

use log::debug;

use crate::automaton::{Automaton, Label, Nfa, Side, StateId, Tie};

/*
 * The shuffle product of two automata. Its states are pairs (l, r),
 * labelled `(l,r)`; from (l, r) a move of either operand alone leads
 * to (l', r) or (l, r'), and the operands never move together.
 * A pair is final iff both of its members are.
 *
 * Each move is recorded as a tie on the operand that stayed put.
 * Only reachable pairs are built.
 */
pub fn interleave(left: Nfa, right: Nfa) -> Nfa {
    struct Ctx<'a> {
        left: &'a Nfa,
        right: &'a Nfa,
        product: Nfa,
        ids: BTreeMap<(StateId, StateId), StateId>,
        unvisited: VecDeque<(StateId, StateId)>,
    }

    impl Ctx<'_> {
        fn state(&mut self, pair: (StateId, StateId)) -> StateId {
            if let Some(id) = self.ids.get(&pair) {
                return *id
            }

            let (l, r) = pair;
            let label = format!("({},{})", self.left.label(l), self.right.label(r));
            let id = self.product.add_state(&label);
            if self.left.is_final(l) && self.right.is_final(r) {
                self.product.add_final(id);
            }
            self.ids.insert(pair, id);
            self.unvisited.push_back(pair);
            id
        }

        fn link(&mut self, from: StateId, label: Label, to: (StateId, StateId), held: Side) {
            let to = self.state(to);
            self.product.add_transition(from, label, to);
            self.product.record_tie(Tie {from, to, held});
        }
    }

    let (l0, r0) = match (left.start(), right.start()) {
        (Some(l0), Some(r0)) => (l0, r0),
        _ => panic!("Interleaving a fragment without a start state, this is a bug !"),
    };

    let mut ctx = Ctx {
        left: &left,
        right: &right,
        product: Nfa::new_empty(),
        ids: BTreeMap::new(),
        unvisited: VecDeque::new(),
    };
    left.alphabet().iter()
        .chain(right.alphabet().iter())
        .for_each(|c| ctx.product.add_symbol(*c));

    let start = ctx.state((l0, r0));
    ctx.product.set_start(start);

    while let Some((l, r)) = ctx.unvisited.pop_front() {
        let from = ctx.ids[&(l, r)];

        for (label, next) in left.moves(l) {
            ctx.link(from, label, (next, r), Side::Right);
        }
        for (label, next) in right.moves(r) {
            ctx.link(from, label, (l, next), Side::Left);
        }
    }

    debug!(
        "interleaved {} and {} states into {} pairs",
        left.state_count(), right.state_count(), ctx.product.state_count()
    );

    ctx.product
}
