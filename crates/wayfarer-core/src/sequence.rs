//! Dense 1-based ordering of a trip's stops.
//!
//! A trip with `N` stops always holds exactly the positions `1..=N`. The
//! functions here decide where a stop lands and which block of neighbours has
//! to slide to make (or close) room; [`crate::db`] applies the result inside a
//! single transaction.
//!
//! Out-of-range requests are clamped, never rejected. The only validation
//! failure is a position that is not an integer at all.

use serde_json::Value;

use crate::error::{Result, TravelError};

/// A contiguous block of positions that slides by one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// Every position in `from..=to` moves one slot later (+1).
    Later { from: u32, to: u32 },
    /// Every position in `from..=to` moves one slot earlier (-1).
    Earlier { from: u32, to: u32 },
}

impl Shift {
    /// Inclusive bounds of the affected block.
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            Shift::Later { from, to } | Shift::Earlier { from, to } => (from, to),
        }
    }

    /// Signed offset applied to every position in the block.
    pub fn delta(&self) -> i64 {
        match self {
            Shift::Later { .. } => 1,
            Shift::Earlier { .. } => -1,
        }
    }

    /// Where `position` ends up after the shift.
    pub fn apply(&self, position: u32) -> u32 {
        let (from, to) = self.bounds();
        if position < from || position > to {
            return position;
        }
        match self {
            Shift::Later { .. } => position + 1,
            Shift::Earlier { .. } => position - 1,
        }
    }
}

/// Final position of a stop plus the neighbour shift that must precede it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: u32,
    pub shift: Option<Shift>,
}

/// Placement for a new stop entering a trip that holds `count` stops.
///
/// `None` appends. Anything else is clamped to `1..=count + 1` and the stops
/// at or after the slot move one later.
pub fn place_new(requested: Option<i64>, count: u32) -> Placement {
    let last = i64::from(count) + 1;
    let position = match requested {
        Some(p) => clamp(p, 1, last),
        None => count + 1,
    };
    let shift = (position <= count).then_some(Shift::Later {
        from: position,
        to: count,
    });
    Placement { position, shift }
}

/// Placement for an existing stop at `current` that should move to
/// `requested` in a trip holding `count` stops.
///
/// The shifted block never contains `current`, so the moved row is only
/// written once, after the shift.
pub fn place_existing(current: u32, requested: i64, count: u32) -> Placement {
    let target = clamp(requested, 1, i64::from(count.max(1)));
    let shift = if target < current {
        Some(Shift::Later {
            from: target,
            to: current - 1,
        })
    } else if target > current {
        Some(Shift::Earlier {
            from: current + 1,
            to: target,
        })
    } else {
        None
    };
    Placement {
        position: target,
        shift,
    }
}

/// Shift that closes the hole left by removing the stop at `removed` from a
/// trip that held `count` stops (including the removed one).
pub fn close_gap(removed: u32, count: u32) -> Option<Shift> {
    (removed < count).then_some(Shift::Earlier {
        from: removed + 1,
        to: count,
    })
}

/// Reads a requested position from loosely typed JSON input.
///
/// Accepts integers, integral floats and strings holding an integer. `null`
/// means "no position requested".
pub fn parse_position(field: &str, value: &Value) -> Result<Option<i64>> {
    let invalid = || TravelError::invalid_input(field).with_reason("must be an integer");
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else if n.as_u64().is_some() {
                Ok(Some(i64::MAX))
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
                    _ => Err(invalid()),
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map(Some).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Checks that `positions` is exactly `1..=positions.len()` in some order.
pub fn is_dense(positions: &[u32]) -> bool {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(i, &p)| p as usize == i + 1)
}

fn clamp(value: i64, low: i64, high: i64) -> u32 {
    value.clamp(low, high) as u32
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_place_new_defaults_to_append() {
        let placement = place_new(None, 3);
        assert_eq!(placement.position, 4);
        assert_eq!(placement.shift, None);
    }

    #[test]
    fn test_place_new_in_middle_shifts_tail() {
        let placement = place_new(Some(2), 3);
        assert_eq!(placement.position, 2);
        assert_eq!(placement.shift, Some(Shift::Later { from: 2, to: 3 }));
    }

    #[test]
    fn test_place_new_clamps_out_of_range() {
        assert_eq!(place_new(Some(0), 3).position, 1);
        assert_eq!(place_new(Some(-40), 3).position, 1);
        let far = place_new(Some(99), 3);
        assert_eq!(far.position, 4);
        assert_eq!(far.shift, None);
    }

    #[test]
    fn test_place_new_into_empty_trip() {
        let placement = place_new(Some(5), 0);
        assert_eq!(placement.position, 1);
        assert_eq!(placement.shift, None);
    }

    #[test]
    fn test_place_existing_earlier() {
        // D at 4 moves to 2: B and C slide later.
        let placement = place_existing(4, 2, 4);
        assert_eq!(placement.position, 2);
        assert_eq!(placement.shift, Some(Shift::Later { from: 2, to: 3 }));
    }

    #[test]
    fn test_place_existing_later() {
        let placement = place_existing(1, 3, 4);
        assert_eq!(placement.position, 3);
        assert_eq!(placement.shift, Some(Shift::Earlier { from: 2, to: 3 }));
    }

    #[test]
    fn test_place_existing_same_slot_is_noop() {
        let placement = place_existing(2, 2, 4);
        assert_eq!(placement.position, 2);
        assert_eq!(placement.shift, None);
    }

    #[test]
    fn test_place_existing_clamps_to_last() {
        let placement = place_existing(2, 50, 4);
        assert_eq!(placement.position, 4);
        assert_eq!(placement.shift, Some(Shift::Earlier { from: 3, to: 4 }));
    }

    #[test]
    fn test_close_gap() {
        assert_eq!(close_gap(2, 4), Some(Shift::Earlier { from: 3, to: 4 }));
        assert_eq!(close_gap(4, 4), None);
    }

    #[test]
    fn test_shift_apply_leaves_outside_untouched() {
        let shift = Shift::Later { from: 2, to: 3 };
        assert_eq!(shift.apply(1), 1);
        assert_eq!(shift.apply(2), 3);
        assert_eq!(shift.apply(3), 4);
        assert_eq!(shift.apply(4), 4);
    }

    #[test]
    fn test_parse_position_accepts_integer_forms() {
        assert_eq!(parse_position("order_index", &json!(3)).unwrap(), Some(3));
        assert_eq!(parse_position("order_index", &json!("7")).unwrap(), Some(7));
        assert_eq!(parse_position("order_index", &json!(" 2 ")).unwrap(), Some(2));
        assert_eq!(parse_position("order_index", &json!(2.0)).unwrap(), Some(2));
        assert_eq!(parse_position("order_index", &json!(null)).unwrap(), None);
    }

    #[test]
    fn test_parse_position_rejects_non_integers() {
        for bad in [json!("second"), json!(1.5), json!(true), json!([1]), json!({})] {
            let err = parse_position("order_index", &bad).unwrap_err();
            assert!(
                matches!(err, TravelError::InvalidInput { ref field, .. } if field == "order_index"),
                "unexpected error for {bad}: {err}"
            );
        }
    }

    #[test]
    fn test_is_dense() {
        assert!(is_dense(&[]));
        assert!(is_dense(&[2, 1, 3]));
        assert!(!is_dense(&[1, 3]));
        assert!(!is_dense(&[1, 1, 2]));
    }
}
