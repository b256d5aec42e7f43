pub mod constants;
pub mod mode;
