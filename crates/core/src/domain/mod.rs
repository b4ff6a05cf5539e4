pub mod conversation;
pub mod item;
pub mod recommendation;
