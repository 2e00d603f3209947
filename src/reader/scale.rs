// Conversion of decimal tallies into exact integers.

use log::{debug, warn};
use snafu::prelude::*;

use crate::*;

/// The largest multiplier applied to the tallies.
pub const MAX_SCALE: f64 = 1_000_000.0;

/// Integer tallies, and the multiplier that produced them from the decimal ones.
#[derive(PartialEq, Debug, Clone)]
pub struct ScaledTally {
    pub scale: f64,
    pub tallies: Vec<Vec<u64>>,
}

impl ScaledTally {
    /// Rescales an integer tally back to the decimal precision of the input.
    pub fn unscaled(&self, value: u64) -> f64 {
        value as f64 / self.scale
    }
}

fn is_integer(x: f64) -> bool {
    x.round() == x
}

/// Finds the smallest power of ten that turns every tally into an integer.
///
/// Gives up at [`MAX_SCALE`]: the tallies are then truncated by [`apply_scale`].
pub fn find_scale(tallies: &[Vec<f64>]) -> f64 {
    let mut scale = 1.0;
    // A cell that was an integer at a smaller scale is checked again at the larger one.
    loop {
        let previous = scale;
        'cells: for tally in tallies {
            for &t in tally {
                while !is_integer(t * scale) && scale < MAX_SCALE {
                    scale *= 10.0;
                }
                if scale >= MAX_SCALE {
                    if !is_integer(t * scale) {
                        warn!(
                            "find_scale: `{}` needs more than {} decimals, the tallies will be truncated",
                            t,
                            MAX_SCALE.log10()
                        );
                    }
                    break 'cells;
                }
            }
        }
        if scale == previous || scale >= MAX_SCALE {
            break;
        }
    }
    debug!("find_scale: {}", scale);
    scale
}

/// Multiplies the tallies by `scale`, truncating what is left of the decimals.
///
/// Fails when a scaled tally, the judgments of a proposal or the judgments of a grade
/// do not fit in a `u64`.
pub fn apply_scale(tallies: &[Vec<f64>], scale: f64) -> TallyResult<Vec<Vec<u64>>> {
    let mut scaled_tallies = Vec::with_capacity(tallies.len());
    let mut grade_totals: Vec<u64> = Vec::new();
    for (proposal_index, tally) in tallies.iter().enumerate() {
        let mut scaled_tally = Vec::with_capacity(tally.len());
        let mut judgments = 0u64;
        for (grade_index, &t) in tally.iter().enumerate() {
            let scaled = t * scale;
            // u64::MAX rounds up to 2^64 as a float.
            ensure!(
                scaled.is_finite() && scaled < u64::MAX as f64,
                TallyOverflowSnafu {
                    proposal: proposal_index + 1,
                    grade: grade_index + 1,
                    value: t,
                }
            );
            let scaled = scaled as u64;
            judgments = judgments.checked_add(scaled).context(JudgmentsOverflowSnafu {
                proposal: proposal_index + 1,
            })?;
            if grade_totals.len() <= grade_index {
                grade_totals.resize(grade_index + 1, 0);
            }
            grade_totals[grade_index] = grade_totals[grade_index]
                .checked_add(scaled)
                .context(GradeTotalOverflowSnafu {
                    grade: grade_index + 1,
                })?;
            scaled_tally.push(scaled);
        }
        scaled_tallies.push(scaled_tally);
    }
    Ok(scaled_tallies)
}

pub fn scale_tallies(tallies: &[Vec<f64>]) -> TallyResult<ScaledTally> {
    let scale = find_scale(tallies);
    Ok(ScaledTally {
        scale,
        tallies: apply_scale(tallies, scale)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn integers_need_no_scale() {
        let res = scale_tallies(&[vec![3.0, 2.0, 1.0, 4.0], vec![2.0, 3.0, 0.0, 4.0]]).unwrap();
        assert_eq!(res.scale, 1.0);
        assert_eq!(res.tallies, vec![vec![3, 2, 1, 4], vec![2, 3, 0, 4]]);
    }

    #[test]
    fn one_decimal_everywhere() {
        let res = scale_tallies(&[vec![0.5, 2.0], vec![1.5, 0.25]]).unwrap();
        assert_eq!(res.scale, 100.0);
        assert_eq!(res.tallies, vec![vec![50, 200], vec![150, 25]]);
        assert_eq!(res.unscaled(25), 0.25);
    }

    #[test]
    fn a_thousandth_forces_a_thousand() {
        let scale = find_scale(&[vec![1.0, 2.0], vec![3.0, 0.001]]);
        assert!(scale >= 1000.0);
        let res = scale_tallies(&[vec![0.001]]).unwrap();
        assert_eq!(res.scale, 1000.0);
        assert_eq!(res.tallies, vec![vec![1]]);
    }

    #[test]
    fn capped_scale_truncates() {
        let res = scale_tallies(&[vec![0.000_000_5, 3.0], vec![2.5]]).unwrap();
        assert_eq!(res.scale, MAX_SCALE);
        assert_eq!(res.tallies, vec![vec![0, 3_000_000], vec![2_500_000]]);
    }

    #[test]
    fn empty_tallies() {
        let res = scale_tallies(&[]).unwrap();
        assert_eq!(res.scale, 1.0);
        assert!(res.tallies.is_empty());
    }

    #[test]
    fn tallies_too_large_once_scaled() {
        let res = scale_tallies(&[vec![1.0, 2.0], vec![0.000_000_1, 2e13]]);
        assert!(matches!(
            res,
            Err(TallyError::TallyOverflow {
                proposal: 2,
                grade: 2,
                ..
            })
        ));
        assert!(matches!(
            apply_scale(&[vec![f64::INFINITY]], 1.0),
            Err(TallyError::TallyOverflow { .. })
        ));
    }

    #[test]
    fn judgments_too_many_to_count() {
        let res = scale_tallies(&[vec![1.0, 1.0], vec![1e19, 1e19]]);
        assert!(matches!(
            res,
            Err(TallyError::JudgmentsOverflow { proposal: 2 })
        ));
        let res = scale_tallies(&[vec![1e19, 0.0], vec![1e19, 0.0]]);
        assert!(matches!(
            res,
            Err(TallyError::GradeTotalOverflow { grade: 1 })
        ));
    }

    fn decimal_tallies() -> impl Strategy<Value = Vec<Vec<f64>>> {
        prop::collection::vec(
            prop::collection::vec(
                (0u32..100_000, 0i32..=4).prop_map(|(n, d)| n as f64 / 10f64.powi(d)),
                1..6,
            ),
            1..5,
        )
    }

    proptest! {
        #[test]
        fn scale_makes_exact_integers(tallies in decimal_tallies()) {
            let scale = find_scale(&tallies);
            prop_assert!(scale >= 1.0);
            if scale < MAX_SCALE {
                for t in tallies.iter().flatten() {
                    prop_assert!(is_integer(t * scale), "{} * {} is not an integer", t, scale);
                }
            }
        }

        #[test]
        fn integers_rescale_to_the_input(tallies in decimal_tallies()) {
            let res = scale_tallies(&tallies).unwrap();
            if res.scale < MAX_SCALE {
                for (row, ints) in tallies.iter().zip(res.tallies.iter()) {
                    for (t, i) in row.iter().zip(ints.iter()) {
                        let back = res.unscaled(*i);
                        prop_assert!((back - t).abs() <= t.abs() * 1e-12, "{} -> {} -> {}", t, i, back);
                    }
                }
            }
        }
    }
}
