
use std::fmt;

use super::dialect::Dialect;

pub type NodeId = usize;
pub type Position = usize;

/*
 * A node of the parse tree. Literals and the end marker carry
 * their position; epsilon leaves have none. Children are
 * indices into the tree's arena.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    Char(char, Position),
    Epsilon,
    End(Position),
    Concat(NodeId, NodeId),
    Union(NodeId, NodeId),
    Star(NodeId),
    Shuffle(NodeId, NodeId),
}

impl Node {
    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Char(_, p) | Node::End(p) => Some(*p),
            _ => None,
        }
    }

    pub fn children(&self) -> (Option<NodeId>, Option<NodeId>) {
        match self {
            Node::Concat(l, r) | Node::Union(l, r) | Node::Shuffle(l, r) => (Some(*l), Some(*r)),
            Node::Star(e) => (Some(*e), None),
            _ => (None, None),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children().0.is_none()
    }
}

/*
 * What a position reads: a character, or the end of the input.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PosSymbol {
    Char(char),
    End,
}

/*
 * `#` is an ordinary literal, so the end marker prints as `⊣`.
 */
impl fmt::Display for PosSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosSymbol::Char(c) => write!(f, "{}", c),
            PosSymbol::End => write!(f, "⊣"),
        }
    }
}

/*
 * The result of a successful parse. Nodes live in an arena where
 * children always come before their parent, so walking the arena
 * in order is a post-order walk of the tree and the root is the
 * last node.
 */
#[derive(Clone, Debug)]
pub struct ParseTree {
    pattern: String,
    dialect: Dialect,
    nodes: Vec<Node>,
    // Distinct literals, in order of first occurrence.
    symbols: Vec<char>,
    // positions[p - 1] is what position p reads.
    positions: Vec<PosSymbol>,
}

impl ParseTree {
    pub(crate) fn new(
        pattern: String,
        dialect: Dialect,
        nodes: Vec<Node>,
        symbols: Vec<char>,
        positions: Vec<PosSymbol>,
    ) -> Self {
        let tree = ParseTree {pattern, dialect, nodes, symbols, positions};
        tree.check();
        tree
    }

    /*
     * Panics if the arena is not a well-formed tree: every node but the
     * root has exactly one parent that comes after it, positions are
     * exactly 1..=n in arena order, and the root is the concatenation
     * with the end marker.
     */
    fn check(&self) {
        let mut parents = vec![0usize; self.nodes.len()];
        let mut next_position = 1;

        for (id, node) in self.nodes.iter().enumerate() {
            let (l, r) = node.children();
            for child in l.into_iter().chain(r) {
                if child >= id {
                    panic!("Node {} points forward to {}, this is a bug !", id, child)
                }
                parents[child] += 1;
            }
            if let Some(p) = node.position() {
                if p != next_position {
                    panic!("Node {} has position {} instead of {}, this is a bug !", id, p, next_position)
                }
                next_position += 1;
            }
        }

        let root = self.root();
        if parents[..root].iter().any(|count| *count != 1) || parents[root] != 0 {
            panic!("The parse tree is not a tree, this is a bug !")
        }
        if next_position != self.positions.len() + 1 {
            panic!("Position table out of sync, this is a bug !")
        }
        match self.nodes[root] {
            Node::Concat(_, end) if self.nodes[end] == Node::End(self.end_position()) => (),
            _ => panic!("The parse tree does not end with the end marker, this is a bug !"),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn root(&self) -> NodeId {
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn symbol_at(&self, p: Position) -> PosSymbol {
        self.positions[p - 1]
    }

    /*
     * The end marker always holds the last position.
     */
    pub fn end_position(&self) -> Position {
        self.positions.len()
    }

    pub fn has_shuffle(&self) -> bool {
        self.nodes.iter().any(|node| match node {
            Node::Shuffle(_, _) => true,
            _ => false,
        })
    }
}

/*
 * Prefix notation, e.g. `.(*(|(a:1, b:2)), ⊣:3)`.
 * Built bottom-up along the arena rather than recursively.
 */
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut built: Vec<Option<String>> = Vec::with_capacity(self.nodes.len());

        for node in self.nodes.iter() {
            let mut take = |id: NodeId| built[id].take().unwrap_or_default();
            let s = match *node {
                Node::Char(c, p) => format!("{}:{}", c, p),
                Node::Epsilon => "ε".to_string(),
                Node::End(p) => format!("{}:{}", PosSymbol::End, p),
                Node::Concat(l, r) => format!(".({}, {})", take(l), take(r)),
                Node::Union(l, r) => format!("|({}, {})", take(l), take(r)),
                Node::Shuffle(l, r) => format!("&({}, {})", take(l), take(r)),
                Node::Star(e) => format!("*({})", take(e)),
            };
            built.push(Some(s));
        }

        match built.pop() {
            Some(Some(s)) => write!(f, "{}", s),
            _ => Ok(()),
        }
    }
}
