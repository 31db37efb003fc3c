pub mod availability;
pub mod health;
pub mod interviews;
pub mod reference;
