pub mod api;
pub mod compare;
