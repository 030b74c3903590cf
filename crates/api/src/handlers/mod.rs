pub mod contacts;
pub mod users;
