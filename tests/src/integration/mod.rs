//! Integration flows.

pub mod attacks;
pub mod flows;

#[cfg(test)]
pub(crate) mod harness {
    use dao_authorization::fixtures::params;
    use dao_authorization::{GroupAuthorizationService, InMemoryStateStore};

    pub type Service = GroupAuthorizationService<InMemoryStateStore>;

    /// Service over an empty store, with log output captured by the test
    /// harness.
    pub fn service() -> anyhow::Result<Service> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        Ok(GroupAuthorizationService::new(params(), InMemoryStateStore::new())?)
    }
}
