
mod sets;
mod building;

pub use sets::{PosSet, Annotations, FollowTable};
pub use building::{to_direct_dfa, pos_set_label};
