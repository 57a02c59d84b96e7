//! Peak hour detection over the hourly profile

use super::aggregations::HourStat;

/// Hours above this percentile of hourly totals count as peak hours
pub const PEAK_PERCENTILE: f64 = 0.75;

/// Hourly total at `PEAK_PERCENTILE` of ascending `totals`, interpolated
/// linearly between the two neighbouring ranks
fn peak_threshold(totals: &[f64]) -> Option<f64> {
    let last = totals.len().checked_sub(1)?;
    let rank = PEAK_PERCENTILE * last as f64;
    let below = rank.floor() as usize;
    let low = totals[below];
    let high = totals.get(below + 1).copied().unwrap_or(low);
    Some(low + (high - low) * (rank - below as f64))
}

/// Hours whose total is strictly above the `PEAK_PERCENTILE` of all totals
pub fn peak_hours(profile: &[HourStat]) -> Vec<u8> {
    let mut totals: Vec<f64> = profile.iter().map(|h| h.total).collect();
    totals.sort_by(|a, b| a.total_cmp(b));

    let Some(threshold) = peak_threshold(&totals) else {
        return Vec::new();
    };

    profile
        .iter()
        .filter(|h| h.total > threshold)
        .map(|h| h.hour)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(hour: u8, total: f64) -> HourStat {
        HourStat {
            hour,
            casual_mean: 0.0,
            registered_mean: total,
            total,
            samples: 1,
        }
    }

    #[test]
    fn test_threshold_interpolates() {
        assert_eq!(peak_threshold(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(4.0));
        assert_eq!(peak_threshold(&[10.0, 20.0]), Some(17.5));
        assert_eq!(peak_threshold(&[7.0]), Some(7.0));
        assert_eq!(peak_threshold(&[]), None);
    }

    #[test]
    fn test_peak_hours_above_q3() {
        // Commute-shaped day: 8 and 17 stand out
        let profile: Vec<HourStat> = (0..24)
            .map(|h| {
                let total = match h {
                    8 => 360.0,
                    17 => 460.0,
                    18 => 420.0,
                    7..=19 => 150.0,
                    _ => 20.0,
                };
                stat(h, total)
            })
            .collect();

        assert_eq!(peak_hours(&profile), vec![8, 17, 18]);
    }

    #[test]
    fn test_flat_profile_has_no_peaks() {
        let profile: Vec<HourStat> = (0..24).map(|h| stat(h, 10.0)).collect();
        assert!(peak_hours(&profile).is_empty());
        assert!(peak_hours(&[]).is_empty());
    }
}
