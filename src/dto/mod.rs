pub mod availability_dto;
pub mod interview_dto;
