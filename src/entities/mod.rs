pub mod prelude;

pub mod bugs;
pub mod users;
