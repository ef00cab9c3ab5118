pub mod date;
pub mod env;
pub mod extractor;
