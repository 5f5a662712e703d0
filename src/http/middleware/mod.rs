//! Request middleware.

pub mod secure_origin;

pub use secure_origin::secure_origin_middleware;
