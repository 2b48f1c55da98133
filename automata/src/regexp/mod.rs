
mod dialect;
mod token;
mod tree;
mod parser;

pub use dialect::{Dialect, PUNCTUATION};
pub use token::Token;
pub use tree::{Node, NodeId, Position, PosSymbol, ParseTree};
pub use parser::Parser;
