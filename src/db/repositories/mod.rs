pub mod bug;
pub mod user;
