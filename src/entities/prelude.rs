pub use super::bugs::Entity as Bugs;
pub use super::users::Entity as Users;
