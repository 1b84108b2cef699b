pub mod bug;
pub mod user;

pub use bug::{Bug, BugId, NewBug};
pub use user::{User, UserId};
