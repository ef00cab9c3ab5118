pub mod listing_service;
pub mod post_service;
pub mod tag_service;
