pub mod dispatcher;
pub mod registry;
pub mod server;

pub use crate::domain::model::{Domain, VerificationRequest, VerificationResponse};
pub use crate::domain::ports::{ConfigProvider, Verifier};
pub use crate::utils::error::Result;
