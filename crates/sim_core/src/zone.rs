//! Affected zones and their time windows (C4 Time Window Registry lives here
//! alongside the data it operates on, since the registry has no state of its
//! own beyond the zones themselves).

use std::collections::HashMap;

/// `remaining < 0.25 * duration` is the "critical band" boundary used by both
/// `criticality` and `urgency_factor`.
const CRITICAL_BAND_FRACTION: f64 = 0.25;

#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub start_hours: f64,
    pub duration_hours: f64,
    pub priority: u8,
}

impl TimeWindow {
    pub fn new(start_hours: f64, duration_hours: f64, priority: u8) -> Self {
        Self {
            start_hours,
            duration_hours,
            priority,
        }
    }

    fn end_hours(&self) -> f64 {
        self.start_hours + self.duration_hours
    }

    /// `now <= end` is accessible, inclusive of the boundary.
    pub fn accessible(&self, now_hours: f64) -> bool {
        now_hours <= self.end_hours()
    }

    pub fn remaining(&self, now_hours: f64) -> f64 {
        (self.end_hours() - now_hours).max(0.0)
    }

    fn opened_fraction(&self, now_hours: f64) -> f64 {
        if self.duration_hours <= 0.0 {
            return 0.0;
        }
        self.remaining(now_hours) / self.duration_hours
    }

    /// `min(1, (1 - openedFraction) * priority)`, non-linear in the critical band.
    pub fn criticality(&self, now_hours: f64) -> f64 {
        let opened_fraction = self.opened_fraction(now_hours);
        if opened_fraction < CRITICAL_BAND_FRACTION {
            (2.0 * (1.0 - opened_fraction)).min(1.0)
        } else {
            ((1.0 - opened_fraction) * self.priority as f64).min(1.0)
        }
    }

    pub fn is_critical(&self, now_hours: f64) -> bool {
        self.remaining(now_hours) < CRITICAL_BAND_FRACTION * self.duration_hours
    }

    pub fn urgency_factor(&self, now_hours: f64) -> f64 {
        if !self.accessible(now_hours) {
            return 0.0;
        }
        if self.is_critical(now_hours) {
            let critical_span = CRITICAL_BAND_FRACTION * self.duration_hours;
            if critical_span <= 0.0 {
                2.0
            } else {
                2.0 + (1.0 - self.remaining(now_hours) / critical_span)
            }
        } else {
            1.0
        }
    }
}

/// One per Delivery node. Mutated only by the Dispatch & Delivery Executor
/// (`supplied` flips to `true` on a successful terminal leg).
#[derive(Debug, Clone)]
pub struct AffectedZone {
    pub node_key: String,
    pub needs: HashMap<String, u32>,
    pub population: u32,
    pub priority: u8,
    pub supplied: bool,
    pub window: TimeWindow,
}

impl AffectedZone {
    pub fn new(
        node_key: impl Into<String>,
        needs: HashMap<String, u32>,
        population: u32,
        priority: u8,
        window: TimeWindow,
    ) -> Self {
        Self {
            node_key: node_key.into(),
            needs,
            population,
            priority,
            supplied: false,
            window,
        }
    }

    pub fn total_needs(&self) -> f64 {
        self.needs.values().map(|q| *q as f64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_accessible_is_inclusive_at_boundary() {
        let w = TimeWindow::new(0.0, 8.0, 5);
        assert!(w.accessible(8.0));
        assert!(!w.accessible(8.0001));
    }

    #[test]
    fn criticality_uses_nonlinear_urgency_under_quarter_remaining() {
        let w = TimeWindow::new(0.0, 8.0, 5);
        // 1.9h remaining out of 8h => opened_fraction ~0.2375 < 0.25
        let c = w.criticality(6.1);
        assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn urgency_factor_zero_when_inaccessible() {
        let w = TimeWindow::new(0.0, 1.0, 3);
        assert_eq!(w.urgency_factor(2.0), 0.0);
    }
}
