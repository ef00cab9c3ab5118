pub mod post_page;
