pub mod dto;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;
pub mod workflow;

pub use error::ApplicationResult;
