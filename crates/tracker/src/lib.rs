pub mod compose;
pub mod tracker;
