use crate::config::ServerConfig;
use crate::error::ServerResult;
use dashmap::DashMap;
use directory::{DirectoryConfig, UserDirectory};
use matcher::{Icebreaker, IcebreakerPolicy, MatchConfig, Matcher};
use metrics_exporter_prometheus::PrometheusHandle;
use profile::Catalog;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: API key -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, std::time::Instant)>>,

    /// Profile storage; mentors listed here form the candidate pool
    pub directory: Arc<dyn UserDirectory>,

    pub matcher: Arc<Matcher>,

    /// Icebreaker for requests that do not name a policy
    pub icebreaker: Arc<dyn Icebreaker>,

    pub catalog: Arc<Catalog>,

    /// Present once the Prometheus recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create state with a directory built from `config.seed_path`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let directory = DirectoryConfig {
            seed_path: config.seed_path.clone(),
        }
        .build()?;
        Self::with_directory(config, Arc::new(directory))
    }

    /// Create state around an existing directory.
    pub fn with_directory(
        config: ServerConfig,
        directory: Arc<dyn UserDirectory>,
    ) -> ServerResult<Self> {
        let matcher = Matcher::new(MatchConfig::default().with_max_results(config.default_match_limit))?;
        let icebreaker = config.icebreaker_policy.build();
        let catalog = Arc::new(config.catalog.clone());

        Ok(Self {
            config: Arc::new(config),
            rate_limiter: Arc::new(DashMap::new()),
            directory,
            matcher: Arc::new(matcher),
            icebreaker,
            catalog,
            prometheus: None,
        })
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Icebreaker for `policy`, falling back to the configured one.
    pub fn icebreaker_for(&self, policy: Option<IcebreakerPolicy>) -> Arc<dyn Icebreaker> {
        match policy {
            Some(policy) if policy != self.config.icebreaker_policy => policy.build(),
            _ => self.icebreaker.clone(),
        }
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    /// Check rate limit for API key
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = std::time::Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_window_caps_requests() {
        let config = ServerConfig {
            rate_limit_per_minute: 2,
            ..ServerConfig::default()
        };
        let state = ServerState::new(config).unwrap();
        assert!(state.check_rate_limit("k"));
        assert!(state.check_rate_limit("k"));
        assert!(!state.check_rate_limit("k"));
        assert!(state.check_rate_limit("other"));
    }

    #[test]
    fn icebreaker_policy_override() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        assert_eq!(state.icebreaker_for(None).name(), "table");
        assert_eq!(
            state
                .icebreaker_for(Some(IcebreakerPolicy::RandomTemplate))
                .name(),
            "random_template"
        );
    }

    #[test]
    fn missing_seed_file_fails_startup() {
        let config = ServerConfig {
            seed_path: Some("/no/such/seed.json".into()),
            ..ServerConfig::default()
        };
        assert!(ServerState::new(config).is_err());
    }
}
