use thiserror::Error;

pub const FULL_TURN_DEG: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("empty selection: the wheel has no segments")]
    Empty,
    #[error("rotation is not a finite number")]
    NonFinite,
}

/// Width in degrees of each of `segment_count` equal slices.
pub fn segment_angle(segment_count: usize) -> Result<f64, SelectError> {
    if segment_count == 0 {
        return Err(SelectError::Empty);
    }
    Ok(FULL_TURN_DEG / segment_count as f64)
}

/// Angle on the wheel that sits under the fixed top pointer after the wheel
/// has turned `rotation_deg` clockwise. Always in `[0, 360)`.
pub fn pointer_angle(rotation_deg: f64) -> f64 {
    let turned = rotation_deg.rem_euclid(FULL_TURN_DEG);
    (FULL_TURN_DEG - turned).rem_euclid(FULL_TURN_DEG)
}

/// Index of the segment the pointer lands on once the wheel stops at
/// `final_rotation_deg`. Segments are laid out clockwise from 0° in list order.
pub fn select_winner(final_rotation_deg: f64, segment_count: usize) -> Result<usize, SelectError> {
    let slice = segment_angle(segment_count)?;
    if !final_rotation_deg.is_finite() {
        return Err(SelectError::NonFinite);
    }
    let effective = pointer_angle(final_rotation_deg);
    let index = (effective / slice).floor() as usize;
    Ok(index % segment_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_wheel_boundary() {
        // effective = 90, slice = 90 -> second segment
        assert_eq!(select_winner(270.0, 4), Ok(1));
    }

    #[test]
    fn zero_rotation_is_first_segment() {
        for n in 1..=64 {
            assert_eq!(select_winner(0.0, n), Ok(0), "n = {n}");
        }
    }

    #[test]
    fn full_turns_do_not_change_outcome() {
        for n in 1..=32 {
            for k in 0..50u32 {
                assert_eq!(select_winner(f64::from(k) * 360.0, n), Ok(0), "n = {n}, k = {k}");
            }
        }
    }

    #[test]
    fn negative_rotation_uses_true_modulo() {
        // -90 is the same wheel position as 270
        assert_eq!(select_winner(-90.0, 4), select_winner(270.0, 4));
        assert_eq!(select_winner(-360.0, 3), Ok(0));
        assert_eq!(pointer_angle(-10.0), 10.0);
    }

    #[test]
    fn index_stays_in_range() {
        let mut rotation = 0.0;
        while rotation < 7200.0 {
            for n in 1..=20 {
                let idx = select_winner(rotation, n).unwrap();
                assert!(idx < n);
            }
            rotation += 7.3;
        }
    }

    #[test]
    fn empty_and_non_finite_are_rejected() {
        assert_eq!(select_winner(10.0, 0), Err(SelectError::Empty));
        assert_eq!(select_winner(f64::NAN, 3), Err(SelectError::NonFinite));
        assert_eq!(select_winner(f64::INFINITY, 3), Err(SelectError::NonFinite));
    }

    #[test]
    fn small_turn_moves_pointer_to_last_segment() {
        // wheel turned 1° clockwise: pointer now reads 359°, inside the last slice
        assert_eq!(select_winner(1.0, 4), Ok(3));
    }
}
