pub mod breadcrumb;
pub mod file_list;
pub mod help;
pub mod preview;
pub mod search_bar;
pub mod status_bar;
