pub mod contact;
pub mod roof;
