//! Fabricated transport behaviour: random latency and a coin-flip failure.
//!
//! There is no retry or backoff here and no distinction between transient
//! and permanent failures. A failed call surfaces as `AppError::Network`.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkProfile {
    pub min_latency: Duration,
    pub max_latency: Duration,
    /// Probability in `0.0..=1.0` that a call fails after its delay.
    pub failure_rate: f64,
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Self {
            min_latency: Duration::from_millis(200),
            max_latency: Duration::from_millis(700),
            failure_rate: 0.05,
        }
    }
}

impl NetworkProfile {
    /// No delay and no failures.
    pub const fn instant() -> Self {
        Self {
            min_latency: Duration::ZERO,
            max_latency: Duration::ZERO,
            failure_rate: 0.0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            min_latency: Duration::from_millis(config.mock_latency_min_ms),
            max_latency: Duration::from_millis(config.mock_latency_max_ms),
            failure_rate: config.mock_failure_rate.clamp(0.0, 1.0),
        }
    }
}

/// Response shape echoed by [`NetworkSimulator`]-backed calls.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

pub struct NetworkSimulator {
    profile: NetworkProfile,
    rng: Mutex<StdRng>,
}

impl NetworkSimulator {
    pub fn new(profile: NetworkProfile) -> Self {
        Self {
            profile,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Same profile, reproducible sequence of delays and failures.
    pub fn seeded(profile: NetworkProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draws the delay and the failure outcome for one call.
    /// The lock is released before the caller sleeps.
    fn roll(&self) -> (Duration, bool) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let lo = self.profile.min_latency.min(self.profile.max_latency);
        let hi = self.profile.min_latency.max(self.profile.max_latency);
        let delay = if lo == hi {
            lo
        } else {
            let millis = rng.gen_range(lo.as_millis() as u64..=hi.as_millis() as u64);
            Duration::from_millis(millis)
        };
        let failed = rng.gen_bool(self.profile.failure_rate.clamp(0.0, 1.0));
        (delay, failed)
    }

    /// Waits out the simulated latency, then succeeds or fails.
    pub async fn simulate(&self, endpoint: &str) -> Result<(), AppError> {
        let (delay, failed) = self.roll();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if failed {
            warn!("Simulated network failure: {endpoint} after {}ms", delay.as_millis());
            return Err(AppError::Network(endpoint.to_string()));
        }
        debug!("{endpoint} answered after {}ms", delay.as_millis());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_delay_stays_within_profile() {
        let sim = NetworkSimulator::seeded(
            NetworkProfile {
                failure_rate: 0.0,
                ..NetworkProfile::default()
            },
            7,
        );
        for _ in 0..20 {
            let start = tokio::time::Instant::now();
            sim.simulate("GET /users/1").await.unwrap();
            let elapsed = start.elapsed();
            assert!(elapsed >= Duration::from_millis(200), "elapsed {elapsed:?}");
            assert!(elapsed <= Duration::from_millis(701), "elapsed {elapsed:?}");
        }
    }

    #[tokio::test]
    async fn test_certain_failure_is_network_error() {
        let sim = NetworkSimulator::new(NetworkProfile {
            failure_rate: 1.0,
            ..NetworkProfile::instant()
        });
        let err = sim.simulate("GET /achievements").await.unwrap_err();
        assert!(matches!(err, AppError::Network(ref e) if e == "GET /achievements"));
    }

    #[tokio::test]
    async fn test_instant_profile_never_fails() {
        let sim = NetworkSimulator::new(NetworkProfile::instant());
        for _ in 0..100 {
            assert!(sim.simulate("GET /documents").await.is_ok());
        }
    }

    #[test]
    fn test_seeded_simulators_agree() {
        let a = NetworkSimulator::seeded(NetworkProfile::default(), 42);
        let b = NetworkSimulator::seeded(NetworkProfile::default(), 42);
        for _ in 0..10 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_failure_rate_roughly_honoured() {
        let sim = NetworkSimulator::seeded(NetworkProfile::default(), 1234);
        let failures = (0..10_000).filter(|_| sim.roll().1).count();
        // 5% of 10k, generous band
        assert!((300..=700).contains(&failures), "failures = {failures}");
    }
}
