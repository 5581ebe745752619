//! Jeffreys interval for a binomial proportion via `statrs`.
//!
//! Posterior under the Beta(0.5, 0.5) prior: Beta(x + 0.5, n - x + 0.5).
//! Equal-tailed interval via inverse CDF, with the standard boundary
//! convention: lower bound 0 when x = 0, upper bound 1 when x = n.

use statrs::distribution::{Beta, ContinuousCDF};

use sero_core::errors::StatsError;

/// Compute the Jeffreys interval for `successes` out of `trials`.
///
/// `level` is the two-sided coverage (e.g. 0.95). Inputs outside the binomial
/// domain (`trials ≤ 0` or `successes ∉ [0, trials]`) indicate a malformed
/// upstream record and are surfaced as `StatsError::InvalidProportion`.
pub fn jeffreys_interval(
    successes: f64,
    trials: f64,
    level: f64,
) -> Result<(f64, f64), StatsError> {
    if !trials.is_finite()
        || !successes.is_finite()
        || trials <= 0.0
        || successes < 0.0
        || successes > trials
    {
        return Err(StatsError::InvalidProportion {
            numerator: successes,
            denominator: trials,
        });
    }

    let alpha = successes + 0.5;
    let beta = trials - successes + 0.5;
    let tail = (1.0 - level) / 2.0;

    let dist = Beta::new(alpha, beta).map_err(|_| StatsError::InvalidProportion {
        numerator: successes,
        denominator: trials,
    })?;

    let mut low = dist.inverse_cdf(tail);
    let mut high = dist.inverse_cdf(1.0 - tail);

    // Guard against NaN/Inf from numerical issues
    if !low.is_finite() {
        low = 0.0;
    }
    if !high.is_finite() {
        high = 1.0;
    }

    if successes == 0.0 {
        low = 0.0;
    }
    if successes == trials {
        high = 1.0;
    }

    Ok((low.clamp(0.0, 1.0), high.clamp(0.0, 1.0)))
}
