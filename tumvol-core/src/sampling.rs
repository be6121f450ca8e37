//! Choosing which frames of a sweep to annotate.

use crate::error::{CoreError, CoreResult};

/// Fraction of the selected frame range offered for annotation.
pub const SAMPLE_FRACTION: f64 = 0.1;

/// Fewest frames ever sampled; the volume integral needs two.
pub const MIN_SAMPLES: usize = 2;

/// Evenly spaced frame indices from `start` to `end`, both included.
///
/// Picks `max(2, floor(0.1 * (end - start + 1)))` positions on a linear grid
/// and truncates each toward zero. The range must span at least two frames.
pub fn sample_frame_indices(start: u32, end: u32) -> CoreResult<Vec<u32>> {
    if end <= start {
        return Err(CoreError::InvalidInput(format!(
            "end frame {end} must come after start frame {start}"
        )));
    }

    let total = f64::from(end - start) + 1.0;
    let count = ((total * SAMPLE_FRACTION) as usize).max(MIN_SAMPLES);
    let span = f64::from(end - start);
    let step = span / (count - 1) as f64;

    Ok((0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                (f64::from(start) + step * i as f64) as u32
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hundred_frames_gives_ten_samples() {
        let samples = sample_frame_indices(0, 99).unwrap();
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0], 0);
        assert_eq!(samples[1], 11);
        assert_eq!(samples[9], 99);
    }

    #[test]
    fn test_short_range_gives_two_samples() {
        assert_eq!(sample_frame_indices(10, 14).unwrap(), vec![10, 14]);
        assert_eq!(sample_frame_indices(3, 4).unwrap(), vec![3, 4]);
    }

    #[test]
    fn test_single_frame_range_fails() {
        assert!(matches!(sample_frame_indices(3, 3), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_offset_range_truncates() {
        // 30 frames -> 3 samples on 5.0, 19.5, 34.0
        assert_eq!(sample_frame_indices(5, 34).unwrap(), vec![5, 19, 34]);
    }

    #[test]
    fn test_reversed_range_fails() {
        assert!(matches!(sample_frame_indices(9, 2), Err(CoreError::InvalidInput(_))));
    }
}
