pub mod health;
pub mod profile;
pub mod submissions;
