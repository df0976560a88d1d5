pub mod plant;
pub mod user;

pub use plant::{NewPlant, Plant};
pub use user::{NewUser, User};
