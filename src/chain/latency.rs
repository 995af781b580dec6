//! Artificial latency for mock chain calls

use tokio::time::Duration;

/// Per-operation delays applied before each mock chain call resolves
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyProfile {
    pub connect_wallet: Duration,
    pub is_admin: Duration,
    pub voter_status: Duration,
    pub cast_vote: Duration,
    pub results: Duration,
    pub voter_list: Duration,
    pub create_election: Duration,
    pub end_election: Duration,
    pub election_status: Duration,
    pub registration: Duration,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            connect_wallet: Duration::from_millis(1000),
            is_admin: Duration::from_millis(500),
            voter_status: Duration::from_millis(500),
            cast_vote: Duration::from_millis(2000),
            results: Duration::from_millis(1000),
            voter_list: Duration::from_millis(1000),
            create_election: Duration::from_millis(1500),
            end_election: Duration::from_millis(1500),
            election_status: Duration::from_millis(500),
            registration: Duration::from_millis(2000),
        }
    }
}

impl LatencyProfile {
    /// No delays at all
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// Same delay for every operation
    pub fn uniform(delay: Duration) -> Self {
        Self {
            connect_wallet: delay,
            is_admin: delay,
            voter_status: delay,
            cast_vote: delay,
            results: delay,
            voter_list: delay,
            create_election: delay,
            end_election: delay,
            election_status: delay,
            registration: delay,
        }
    }

    /// Multiply every delay by `factor`
    ///
    /// Zero, negative and non-finite factors yield `none()`. Factors are
    /// capped at 100.
    pub fn scaled(&self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::none();
        }
        let factor = factor.min(100.0);

        Self {
            connect_wallet: self.connect_wallet.mul_f64(factor),
            is_admin: self.is_admin.mul_f64(factor),
            voter_status: self.voter_status.mul_f64(factor),
            cast_vote: self.cast_vote.mul_f64(factor),
            results: self.results.mul_f64(factor),
            voter_list: self.voter_list.mul_f64(factor),
            create_election: self.create_election.mul_f64(factor),
            end_election: self.end_election.mul_f64(factor),
            election_status: self.election_status.mul_f64(factor),
            registration: self.registration.mul_f64(factor),
        }
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let profile = LatencyProfile::default();
        assert_eq!(profile.connect_wallet, Duration::from_millis(1000));
        assert_eq!(profile.cast_vote, Duration::from_secs(2));
        assert_eq!(profile.election_status, Duration::from_millis(500));
    }

    #[test]
    fn test_scaled() {
        let half = LatencyProfile::default().scaled(0.5);
        assert_eq!(half.cast_vote, Duration::from_millis(1000));
        assert_eq!(half.is_admin, Duration::from_millis(250));

        assert_eq!(LatencyProfile::default().scaled(0.0), LatencyProfile::none());
        assert_eq!(LatencyProfile::default().scaled(-1.0), LatencyProfile::none());
        assert_eq!(
            LatencyProfile::default().scaled(f64::NAN),
            LatencyProfile::none()
        );
    }

    #[tokio::test]
    async fn test_simulate_waits() {
        let start = std::time::Instant::now();
        simulate(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
