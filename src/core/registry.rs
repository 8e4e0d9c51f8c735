use crate::adapters::{ActivityVerifier, ExistenceVerifier, OwnershipVerifier, UpstreamVerifier};
use crate::core::ConfigProvider;
use crate::domain::model::Domain;
use crate::domain::ports::Verifier;
use crate::utils::error::{Result, VerificationError};
use std::collections::HashMap;
use std::sync::Arc;

/// 類別對應 verifier；啟動後唯讀，查詢不需加鎖
#[derive(Clone, Default)]
pub struct VerifierRegistry {
    verifiers: HashMap<Domain, Arc<dyn Verifier>>,
}

impl VerifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 三個類別都註冊靜態 verifier
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Domain::Existence, Arc::new(ExistenceVerifier::default()));
        registry.register(Domain::Ownership, Arc::new(OwnershipVerifier::default()));
        registry.register(Domain::Activity, Arc::new(ActivityVerifier::default()));
        registry
    }

    /// 預設 verifier，設定了上游端點的類別改用 UpstreamVerifier
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut registry = Self::with_defaults();

        for domain in Domain::ALL {
            if let Some(endpoint) = config.upstream_endpoint(domain) {
                let verifier = UpstreamVerifier::new(domain, endpoint, config.upstream_timeout())?;
                tracing::info!("Using upstream oracle for {}: {}", domain, endpoint);
                registry.register(domain, Arc::new(verifier));
            }
        }

        Ok(registry)
    }

    /// 新增或取代，回傳原本的 verifier
    pub fn register(
        &mut self,
        domain: Domain,
        verifier: Arc<dyn Verifier>,
    ) -> Option<Arc<dyn Verifier>> {
        if verifier.domain() != domain {
            tracing::warn!(
                "Registering a {} verifier under the {} domain",
                verifier.domain(),
                domain
            );
        }
        self.verifiers.insert(domain, verifier)
    }

    pub fn resolve(&self, domain: Domain) -> std::result::Result<Arc<dyn Verifier>, VerificationError> {
        self.verifiers
            .get(&domain)
            .cloned()
            .ok_or_else(|| VerificationError::UnsupportedDomain(domain.to_string()))
    }

    pub fn domains(&self) -> Vec<Domain> {
        let mut domains: Vec<Domain> = self.verifiers.keys().copied().collect();
        domains.sort();
        domains
    }

    pub fn len(&self) -> usize {
        self.verifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verifiers.is_empty()
    }
}
