pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    availability_service::AvailabilityService, booking_service::BookingService,
    invitation_service::InvitationService, slot_service::SlotService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub availability_service: AvailabilityService,
    pub slot_service: SlotService,
    pub booking_service: BookingService,
    pub invitation_service: InvitationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let availability_service = AvailabilityService::new(pool.clone());
        let slot_service = SlotService::new(pool.clone());
        let booking_service = BookingService::new(pool.clone());
        let invitation_service = InvitationService::new(pool.clone());

        Self {
            pool,
            availability_service,
            slot_service,
            booking_service,
            invitation_service,
        }
    }
}
