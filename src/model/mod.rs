pub mod listing;
pub mod post;
pub mod tag;
