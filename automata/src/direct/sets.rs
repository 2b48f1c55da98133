
use std::collections::BTreeSet;

use crate::regexp::{Node, NodeId, ParseTree, Position};

pub type PosSet = BTreeSet<Position>;

fn union(a: &PosSet, b: &PosSet) -> PosSet {
    a.union(b).copied().collect()
}

fn singleton(p: Position) -> PosSet {
    std::iter::once(p).collect()
}

/*
 * Per-node results of the two annotation passes.
 * Both passes compute nullability on their own; they
 * always agree.
 */
#[derive(Clone, Debug)]
pub struct Annotations {
    nullable_first: Vec<bool>,
    first: Vec<PosSet>,
    nullable_last: Vec<bool>,
    last: Vec<PosSet>,
}

impl Annotations {
    pub fn new(tree: &ParseTree) -> Self {
        let (nullable_first, first) = first_pass(tree);
        let (nullable_last, last) = last_pass(tree);
        debug_assert_eq!(nullable_first, nullable_last);

        Annotations {nullable_first, first, nullable_last, last}
    }

    pub fn nullable(&self, id: NodeId) -> bool {
        self.nullable_first[id]
    }

    pub fn nullable_last(&self, id: NodeId) -> bool {
        self.nullable_last[id]
    }

    pub fn first(&self, id: NodeId) -> &PosSet {
        &self.first[id]
    }

    pub fn last(&self, id: NodeId) -> &PosSet {
        &self.last[id]
    }
}

/*
 * Computes the FIRST sets. The arena is in post-order,
 * so children are always done when their parent is reached.
 */
fn first_pass(tree: &ParseTree) -> (Vec<bool>, Vec<PosSet>) {
    let mut nullable: Vec<bool> = Vec::with_capacity(tree.len());
    let mut first: Vec<PosSet> = Vec::with_capacity(tree.len());

    for node in tree.nodes() {
        let (n, f) = match *node {
            Node::Epsilon => (true, PosSet::new()),
            Node::Char(_, p) | Node::End(p) => (false, singleton(p)),
            Node::Union(l, r) => (nullable[l] || nullable[r], union(&first[l], &first[r])),
            Node::Shuffle(l, r) => (nullable[l] && nullable[r], union(&first[l], &first[r])),
            Node::Concat(l, r) => {
                if nullable[l] {
                    (nullable[r], union(&first[l], &first[r]))
                } else {
                    (false, first[l].clone())
                }
            },
            Node::Star(e) => (true, first[e].clone()),
        };
        nullable.push(n);
        first.push(f);
    }

    (nullable, first)
}

/*
 * Computes the LAST sets, symmetric to the FIRST sets.
 */
fn last_pass(tree: &ParseTree) -> (Vec<bool>, Vec<PosSet>) {
    let mut nullable: Vec<bool> = Vec::with_capacity(tree.len());
    let mut last: Vec<PosSet> = Vec::with_capacity(tree.len());

    for node in tree.nodes() {
        let (n, f) = match *node {
            Node::Epsilon => (true, PosSet::new()),
            Node::Char(_, p) | Node::End(p) => (false, singleton(p)),
            Node::Union(l, r) => (nullable[l] || nullable[r], union(&last[l], &last[r])),
            Node::Shuffle(l, r) => (nullable[l] && nullable[r], union(&last[l], &last[r])),
            Node::Concat(l, r) => {
                if nullable[r] {
                    (nullable[l], union(&last[l], &last[r]))
                } else {
                    (false, last[r].clone())
                }
            },
            Node::Star(e) => (true, last[e].clone()),
        };
        nullable.push(n);
        last.push(f);
    }

    (nullable, last)
}

/*
 * Maps each position to the positions that may come right after it.
 */
#[derive(Clone, Debug)]
pub struct FollowTable {
    // follow[p - 1] is the FOLLOW set of position p.
    follow: Vec<PosSet>,
}

impl FollowTable {
    /*
     * Interleaving has no FOLLOW rule: there is no single
     * "next position" once both operands run at the same time.
     * Panics on trees containing one.
     */
    pub fn new(tree: &ParseTree, annotations: &Annotations) -> Self {
        let mut follow = vec![PosSet::new(); tree.end_position()];

        for (id, node) in tree.nodes().iter().enumerate() {
            match *node {
                Node::Concat(l, r) => {
                    for p in annotations.last(l) {
                        follow[p - 1].extend(annotations.first(r).iter().copied());
                    }
                },
                Node::Star(_) => {
                    for p in annotations.last(id) {
                        follow[p - 1].extend(annotations.first(id).iter().copied());
                    }
                },
                Node::Shuffle(_, _) => {
                    panic!("FOLLOW sets are undefined for interleaved expressions.")
                },
                _ => (),
            }
        }

        FollowTable {follow}
    }

    pub fn get(&self, p: Position) -> &PosSet {
        &self.follow[p - 1]
    }

    pub fn len(&self) -> usize {
        self.follow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.follow.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, Dialect};

    fn set(ps: &[Position]) -> PosSet {
        ps.iter().copied().collect()
    }

    #[test]
    fn textbook_example() {
        // Positions: (a1 | b2)* a3 b4 b5 #6
        let tree = compile("(a|b)*abb", Dialect::Plain).unwrap();
        let annotations = Annotations::new(&tree);
        let follow = FollowTable::new(&tree, &annotations);

        assert_eq!(annotations.first(tree.root()), &set(&[1, 2, 3]));
        assert_eq!(annotations.last(tree.root()), &set(&[6]));
        assert!(!annotations.nullable(tree.root()));

        assert_eq!(follow.get(1), &set(&[1, 2, 3]));
        assert_eq!(follow.get(2), &set(&[1, 2, 3]));
        assert_eq!(follow.get(3), &set(&[4]));
        assert_eq!(follow.get(4), &set(&[5]));
        assert_eq!(follow.get(5), &set(&[6]));
        assert!(follow.get(6).is_empty());
    }

    #[test]
    fn nested_alternation() {
        // ((a1 | b2) | (c3 d4 | ε)) e5 #6
        let tree = compile("((a|b)|(cd|))e", Dialect::Plain).unwrap();
        let annotations = Annotations::new(&tree);

        let body = match tree.node(tree.root()) {
            Node::Concat(body, _) => *body,
            _ => unreachable!(),
        };
        let alternative = match tree.node(body) {
            Node::Concat(l, _) => *l,
            _ => unreachable!(),
        };
        assert!(annotations.nullable(alternative));
        assert_eq!(annotations.first(alternative), &set(&[1, 2, 3]));
        assert_eq!(annotations.last(alternative), &set(&[1, 2, 4]));
        assert_eq!(annotations.first(tree.root()), &set(&[1, 2, 3, 5]));
    }

    #[test]
    fn nullability_agrees() {
        let tree = compile("(a*|b)(c|)d*", Dialect::Plain).unwrap();
        let annotations = Annotations::new(&tree);

        for id in 0..tree.len() {
            assert_eq!(annotations.nullable(id), annotations.nullable_last(id));
        }
    }

    #[test]
    fn kleene_self_loop() {
        let tree = compile("a(b(cd)*|e*)*f", Dialect::Plain).unwrap();
        let annotations = Annotations::new(&tree);
        let follow = FollowTable::new(&tree, &annotations);

        let stars = tree.nodes().iter().enumerate()
            .filter(|(_, node)| matches!(node, Node::Star(_)))
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        assert_eq!(stars.len(), 3);

        for id in stars {
            for p in annotations.last(id) {
                assert!(follow.get(*p).is_superset(annotations.first(id)));
            }
        }
    }

    #[test]
    fn interleave_annotations() {
        let tree = compile("a*&b", Dialect::Parallel).unwrap();
        let annotations = Annotations::new(&tree);

        let shuffle = tree.root() - 2;
        assert!(matches!(tree.node(shuffle), Node::Shuffle(_, _)));
        assert!(!annotations.nullable(shuffle));
        assert_eq!(annotations.first(shuffle), &set(&[1, 2]));
        assert_eq!(annotations.last(shuffle), &set(&[1, 2]));
    }

    #[test]
    #[should_panic]
    fn no_follow_sets_across_interleave() {
        let tree = compile("a&b", Dialect::Parallel).unwrap();
        FollowTable::new(&tree, &Annotations::new(&tree));
    }
}
