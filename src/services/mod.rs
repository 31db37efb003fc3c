pub mod availability_service;
pub mod booking_service;
pub mod invitation_service;
pub mod reference_service;
pub mod slot_service;
