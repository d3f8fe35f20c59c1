pub mod footer;
pub mod header;
pub mod review_form;
pub mod reviews_list;
pub mod search_bar;
