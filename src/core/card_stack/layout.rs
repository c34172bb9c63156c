//! Per-card visual transforms derived from the stack's scroll offset.
//!
//! Everything here is a pure function of `(scroll_offset, index, config)`,
//! recomputed every frame the offset moves.

use std::cmp::Ordering;

use super::StackConfig;

const SCALE_STOPS: [f64; 3] = [0.0, 1.0, 2.0];
const SCALE_VALUES: [f64; 3] = [1.0, 0.95, 0.9];

// Cards after the active one stay more visible than cards before it.
const OPACITY_STOPS: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];
const OPACITY_VALUES: [f64; 5] = [0.0, 0.3, 1.0, 0.6, 0.3];

/// Highest stack order, held by the card sitting exactly at the active slot.
pub const TOP_STACK_ORDER: i32 = 100;

/// How a single card should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisualTransform {
    pub index: usize,
    /// Offset of the card's top edge from the stack origin, in offset units.
    pub vertical_offset: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Higher draws on top.
    pub stack_order: i32,
}

/// Piecewise-linear interpolation over ascending `stops`, clamped at both ends.
pub fn interpolate(x: f64, stops: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(stops.len(), values.len());
    let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    if x <= first {
        return values[0];
    }
    if x >= last {
        return values[values.len() - 1];
    }

    for i in 1..stops.len() {
        if x <= stops[i] {
            let span = stops[i] - stops[i - 1];
            let t = if span > 0.0 { (x - stops[i - 1]) / span } else { 1.0 };
            return values[i - 1] + (values[i] - values[i - 1]) * t;
        }
    }
    values[values.len() - 1]
}

/// Signed distance of card `index` from the continuous active position.
pub fn distance(scroll_offset: f64, index: usize, step: f64) -> f64 {
    index as f64 - scroll_offset / step
}

/// Project one card.
pub fn project(scroll_offset: f64, index: usize, config: &StackConfig) -> CardVisualTransform {
    let distance = distance(scroll_offset, index, config.step);
    let magnitude = distance.abs();

    CardVisualTransform {
        index,
        vertical_offset: config.top_padding + distance * config.step,
        scale: interpolate(magnitude, &SCALE_STOPS, &SCALE_VALUES),
        opacity: interpolate(distance, &OPACITY_STOPS, &OPACITY_VALUES),
        stack_order: TOP_STACK_ORDER - (magnitude * 10.0).round() as i32,
    }
}

/// Project every card, in index order.  Empty for an empty stack.
pub fn project_all(scroll_offset: f64, config: &StackConfig) -> Vec<CardVisualTransform> {
    (0..config.card_count)
        .map(|index| project(scroll_offset, index, config))
        .collect()
}

/// Sort transforms into paint order: lowest stack order first, ties by index.
pub fn sort_for_drawing(transforms: &mut [CardVisualTransform]) {
    transforms.sort_by(|a, b| match a.stack_order.cmp(&b.stack_order) {
        Ordering::Equal => a.index.cmp(&b.index),
        other => other,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(card_count: usize) -> StackConfig {
        StackConfig {
            card_count,
            ..StackConfig::default()
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn interpolate_hits_stops_and_midpoints() {
        assert!(approx(interpolate(0.0, &SCALE_STOPS, &SCALE_VALUES), 1.0));
        assert!(approx(interpolate(0.5, &SCALE_STOPS, &SCALE_VALUES), 0.975));
        assert!(approx(interpolate(1.0, &SCALE_STOPS, &SCALE_VALUES), 0.95));
        assert!(approx(interpolate(1.5, &SCALE_STOPS, &SCALE_VALUES), 0.925));
    }

    #[test]
    fn interpolate_clamps_outside_range() {
        assert!(approx(interpolate(-3.0, &SCALE_STOPS, &SCALE_VALUES), 1.0));
        assert!(approx(interpolate(7.0, &SCALE_STOPS, &SCALE_VALUES), 0.9));
        assert!(approx(interpolate(-9.0, &OPACITY_STOPS, &OPACITY_VALUES), 0.0));
        assert!(approx(interpolate(9.0, &OPACITY_STOPS, &OPACITY_VALUES), 0.3));
    }

    #[test]
    fn active_card_is_full_size_opaque_and_on_top() {
        let cfg = config(5);
        for active in 0..cfg.card_count {
            let offset = active as f64 * cfg.step;
            let transforms = project_all(offset, &cfg);
            let card = transforms[active];

            assert!(approx(card.scale, 1.0));
            assert!(approx(card.opacity, 1.0));
            assert!(approx(card.vertical_offset, cfg.top_padding));
            let max = transforms.iter().map(|t| t.stack_order).max();
            assert_eq!(Some(card.stack_order), max);
            assert_eq!(card.stack_order, TOP_STACK_ORDER);
        }
    }

    #[test]
    fn opacity_curve_is_asymmetric() {
        let cfg = config(5);
        let offset = 2.0 * cfg.step;

        let before = project(offset, 1, &cfg);
        let after = project(offset, 3, &cfg);

        assert!(approx(before.opacity, 0.3));
        assert!(approx(after.opacity, 0.6));
        assert!(approx(project(offset, 0, &cfg).opacity, 0.0));
        assert!(approx(project(offset, 4, &cfg).opacity, 0.3));
    }

    #[test]
    fn cards_below_are_spaced_by_step() {
        let cfg = config(5);
        let t = project_all(0.0, &cfg);

        for (i, card) in t.iter().enumerate() {
            assert!(approx(card.vertical_offset, cfg.top_padding + i as f64 * cfg.step));
        }
        assert_eq!(t[1].stack_order, 90);
        assert_eq!(t[2].stack_order, 80);
    }

    #[test]
    fn scale_and_opacity_stay_in_range_across_offsets() {
        let cfg = config(6);
        let min = -cfg.overscroll;
        let max = (cfg.card_count - 1) as f64 * cfg.step + cfg.overscroll;

        let mut offset = min;
        while offset <= max {
            for card in project_all(offset, &cfg) {
                assert!((0.9..=1.0).contains(&card.scale), "scale {} at {offset}", card.scale);
                assert!((0.0..=1.0).contains(&card.opacity), "opacity {} at {offset}", card.opacity);
            }
            offset += 0.75;
        }
    }

    #[test]
    fn empty_stack_projects_nothing() {
        assert!(project_all(0.0, &config(0)).is_empty());
    }

    #[test]
    fn ties_draw_in_index_order() {
        let cfg = config(2);
        // Halfway between card 0 and card 1: both sit at distance 0.5.
        let mut t = project_all(cfg.step / 2.0, &cfg);
        assert_eq!(t[0].stack_order, t[1].stack_order);

        t.reverse();
        sort_for_drawing(&mut t);
        assert_eq!(t.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn drawing_order_puts_active_card_last() {
        let cfg = config(5);
        let mut t = project_all(2.0 * cfg.step, &cfg);
        sort_for_drawing(&mut t);

        assert_eq!(t.last().map(|c| c.index), Some(2));
        assert!(t.windows(2).all(|w| w[0].stack_order <= w[1].stack_order));
    }
}
