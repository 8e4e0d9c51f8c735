use crate::domain::model::{Domain, VerificationRequest, VerificationResponse};
use crate::utils::error::VerificationError;
use async_trait::async_trait;
use std::time::Duration;

/// 評估單一類別的聲明；期限由 dispatcher 控制
#[async_trait]
pub trait Verifier: Send + Sync {
    fn domain(&self) -> Domain;

    async fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationResponse, VerificationError>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn port(&self) -> u16;
    fn read_timeout(&self) -> Duration;
    fn write_timeout(&self) -> Duration;
    fn upstream_endpoint(&self, domain: Domain) -> Option<&str>;
    fn upstream_timeout(&self) -> Duration;
}
