pub mod filter;
pub mod info;
pub mod list;
pub mod passwd;
pub mod store;
pub mod tag;
