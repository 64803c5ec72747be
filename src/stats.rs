use serde::Serialize;

pub const DEFAULT_OUTLIER_M: f64 = 2.0;

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    let mu = mean(samples)?;
    let var = samples.iter().map(|x| (x - mu) * (x - mu)).sum::<f64>() / samples.len() as f64;
    Some(var.sqrt())
}

/// Keeps samples within `m` standard deviations of the mean.
///
/// Mean and deviation are computed once on the input; the filter is not repeated on
/// what survives.
pub fn reject_outliers(samples: &[f64], m: f64) -> Vec<f64> {
    let (mu, sigma) = match (mean(samples), std_dev(samples)) {
        (Some(mu), Some(sigma)) => (mu, sigma),
        _ => return Vec::new(),
    };

    if sigma == 0.0 {
        return samples.to_vec();
    }

    let limit = m * sigma;
    samples
        .iter()
        .copied()
        .filter(|x| (x - mu).abs() <= limit)
        .collect()
}

/// One metric's samples after outlier rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub raw: Vec<f64>,
    pub kept: Vec<f64>,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

impl Distribution {
    pub fn from_samples(raw: Vec<f64>, m: f64) -> Self {
        let kept = reject_outliers(&raw, m);
        Self {
            mean: mean(&kept),
            std_dev: std_dev(&kept),
            raw,
            kept,
        }
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.raw.len() - self.kept.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_population_std() {
        let s = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&s), Some(5.0));
        assert_eq!(std_dev(&s), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_single_pass_drops_far_sample() {
        let mut s = vec![10.0; 9];
        s.push(100.0);
        let kept = reject_outliers(&s, 2.0);
        assert_eq!(kept.len(), 9);
        assert!(kept.iter().all(|&x| x == 10.0));
    }

    #[test]
    fn test_distribution_stats_use_kept_samples() {
        let mut s = vec![10.0; 9];
        s.push(100.0);
        let d = Distribution::from_samples(s, 2.0);
        assert_eq!(d.dropped(), 1);
        assert_eq!(d.mean, Some(10.0));
        assert_eq!(d.std_dev, Some(0.0));
    }
}
