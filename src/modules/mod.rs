pub mod auth;
pub mod ekyc;
pub mod notification;
pub mod otp;
pub mod payment;
pub mod plan;
pub mod service_listing;
pub mod subscription;
pub mod transaction;
pub mod upload;
pub mod user;
pub mod vendor;

mod router;
pub use router::get_router;
