use serde::Serialize;
use std::fmt;

const MB: f64 = 1_000_000.0;

/// Qualitative speed bracket for a byte rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Slow,
    Moderate,
    Good,
    Excellent,
}

/// Map a rate in bytes per second to a tier, using decimal megabytes.
///
/// Total over every `f64`: negative and NaN rates land in [`SpeedTier::Slow`].
pub fn classify(rate_bytes_per_second: f64) -> SpeedTier {
    let rate = rate_bytes_per_second;
    if rate >= 10.0 * MB {
        SpeedTier::Excellent
    } else if rate >= 5.0 * MB {
        SpeedTier::Good
    } else if rate >= MB {
        SpeedTier::Moderate
    } else {
        SpeedTier::Slow
    }
}

impl SpeedTier {
    pub fn range(self) -> &'static str {
        match self {
            SpeedTier::Excellent => ">= 10 MB/s",
            SpeedTier::Good => "5-10 MB/s",
            SpeedTier::Moderate => "1-5 MB/s",
            SpeedTier::Slow => "< 1 MB/s",
        }
    }

    /// One-line human verdict, e.g. `🚀 Excellent speed! (>= 10 MB/s)`.
    pub fn verdict(self) -> String {
        let (icon, text) = match self {
            SpeedTier::Excellent => ("🚀", "Excellent speed!"),
            SpeedTier::Good => ("✅", "Good speed"),
            SpeedTier::Moderate => ("⚠️ ", "Moderate speed"),
            SpeedTier::Slow => ("🐌", "Slow speed"),
        };
        format!("{icon} {text} ({})", self.range())
    }
}

impl fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedTier::Excellent => write!(f, "Excellent"),
            SpeedTier::Good => write!(f, "Good"),
            SpeedTier::Moderate => write!(f, "Moderate"),
            SpeedTier::Slow => write!(f, "Slow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let cases = [
            (999_999.0, SpeedTier::Slow),
            (1_000_000.0, SpeedTier::Moderate),
            (4_999_999.0, SpeedTier::Moderate),
            (5_000_000.0, SpeedTier::Good),
            (9_999_999.0, SpeedTier::Good),
            (10_000_000.0, SpeedTier::Excellent),
        ];
        for (rate, expected) in cases {
            assert_eq!(classify(rate), expected, "rate {rate}");
        }
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(0.0), SpeedTier::Slow);
        assert_eq!(classify(-5.0), SpeedTier::Slow);
        assert_eq!(classify(f64::NAN), SpeedTier::Slow);
        assert_eq!(classify(f64::INFINITY), SpeedTier::Excellent);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let mut previous = classify(0.0);
        for step in 0..=200 {
            let tier = classify(step as f64 * 75_000.0);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn test_tier_display_and_verdict() {
        assert_eq!(SpeedTier::Good.to_string(), "Good");
        assert_eq!(SpeedTier::Slow.verdict(), "🐌 Slow speed (< 1 MB/s)");
    }
}
