//! Slot positions along the bar
//!
//! The bar width is cut into `2 * item_count` equal slices and every item is
//! centred on an odd slice boundary, so slot `i` sits at `step * (2i + 1)`.
//! Centres are symmetric within the bar and spaced `width / item_count` apart.

/// Width of one half-slot, or `0.0` when the inputs cannot describe a bar
fn half_slot(item_count: usize, width_px: f32) -> f32 {
    if item_count == 0 || !width_px.is_finite() || width_px <= 0.0 {
        return 0.0;
    }
    width_px / (2 * item_count) as f32
}

/// Horizontal centre of the selected slot
///
/// Pure function of its inputs; call again whenever the width or item count
/// changes. A zero item count, or a zero, negative or non-finite width, yields
/// `0.0` (a degenerate notch) rather than faulting. An out-of-range index is
/// clamped to the last slot.
pub fn compute_target_offset(selected_index: usize, item_count: usize, width_px: f32) -> f32 {
    let step = half_slot(item_count, width_px);
    if step == 0.0 {
        return 0.0;
    }
    let index = selected_index.min(item_count - 1);
    step * (2 * index + 1) as f32
}

/// Centres of every slot, in slot order
pub fn slot_centers(item_count: usize, width_px: f32) -> Vec<f32> {
    (0..item_count)
        .map(|index| compute_target_offset(index, item_count, width_px))
        .collect()
}

/// Slot under the horizontal position `x`
///
/// Returns `None` outside `[0, width_px)` or for a degenerate bar.
pub fn slot_at(x: f32, item_count: usize, width_px: f32) -> Option<usize> {
    let step = half_slot(item_count, width_px);
    if step == 0.0 || !(0.0..width_px).contains(&x) {
        return None;
    }
    let slot = (x / (2.0 * step)) as usize;
    Some(slot.min(item_count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_items_on_400px() {
        assert_eq!(slot_centers(4, 400.0), vec![50.0, 150.0, 250.0, 350.0]);
        assert_eq!(compute_target_offset(2, 4, 400.0), 250.0);
    }

    #[test]
    fn test_closed_form_and_equal_spacing() {
        for item_count in 1..=7 {
            for &width in &[1.0_f32, 320.0, 411.43, 1080.0] {
                let centers = slot_centers(item_count, width);
                for (i, center) in centers.iter().enumerate() {
                    let expected = width * (2 * i + 1) as f32 / (2 * item_count) as f32;
                    assert!((center - expected).abs() < 1e-3);
                }
                for pair in centers.windows(2) {
                    let spacing = pair[1] - pair[0];
                    assert!((spacing - width / item_count as f32).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_end_slots_strictly_inside() {
        for item_count in 1..=10 {
            let width = 360.0;
            let first = compute_target_offset(0, item_count, width);
            let last = compute_target_offset(item_count - 1, item_count, width);
            assert!(first > 0.0 && first < width);
            assert!(last > 0.0 && last < width);
        }
    }

    #[test]
    fn test_single_item_is_centred() {
        assert_eq!(compute_target_offset(0, 1, 300.0), 150.0);
    }

    #[test]
    fn test_degenerate_inputs_yield_zero() {
        assert_eq!(compute_target_offset(0, 0, 400.0), 0.0);
        assert_eq!(compute_target_offset(1, 4, 0.0), 0.0);
        assert_eq!(compute_target_offset(1, 4, -20.0), 0.0);
        assert_eq!(compute_target_offset(1, 4, f32::NAN), 0.0);
        assert!(slot_centers(0, 400.0).is_empty());
    }

    #[test]
    fn test_out_of_range_index_clamped() {
        assert_eq!(compute_target_offset(10, 4, 400.0), 350.0);
    }

    #[test]
    fn test_slot_at() {
        assert_eq!(slot_at(0.0, 4, 400.0), Some(0));
        assert_eq!(slot_at(99.9, 4, 400.0), Some(0));
        assert_eq!(slot_at(100.0, 4, 400.0), Some(1));
        assert_eq!(slot_at(399.9, 4, 400.0), Some(3));
        assert_eq!(slot_at(400.0, 4, 400.0), None);
        assert_eq!(slot_at(-1.0, 4, 400.0), None);
        assert_eq!(slot_at(10.0, 4, 0.0), None);
    }
}
