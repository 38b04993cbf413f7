pub mod admin;
pub mod auth;
pub mod news;
pub mod registrations;
pub mod telemetry;
