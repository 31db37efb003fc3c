pub mod availability;
pub mod booking;
pub mod invitation;
pub mod user;
