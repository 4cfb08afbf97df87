use serde::{Deserialize, Serialize};

/// Generation tuning. Defaults reproduce the shipped game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Probability of pushing the carved cell below its parent on the
    /// carving stack, so the parent is popped and branched from first.
    pub branch_probability: f64,
    pub shortcuts: ShortcutConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            branch_probability: 0.3,
            shortcuts: ShortcutConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Spanning tree only, no loops.
    pub fn without_shortcuts() -> Self {
        Self {
            shortcuts: ShortcutConfig {
                enabled: false,
                ..ShortcutConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Loop-injection tuning.
///
/// A standing wall between two cells qualifies when neither cell already has
/// a shortcut and `min_hall_gap < |Δhall| < max_hall / hall_span_divisor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub enabled: bool,
    pub min_hall_gap: u32,
    pub hall_span_divisor: u32,
    pub base_probability: f64,
    /// Added to the probability after every successful shortcut.
    pub probability_step: f64,
    pub ramp_reset: RampReset,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_hall_gap: 6,
            hall_span_divisor: 5,
            base_probability: 0.2,
            probability_step: 0.05,
            ramp_reset: RampReset::default(),
        }
    }
}

impl ShortcutConfig {
    /// Whether two hall ids are far enough apart, but not too far, to link.
    pub fn hall_gap_qualifies(&self, a: u32, b: u32, max_hall_id: u32) -> bool {
        let gap = a.abs_diff(b);
        let upper = f64::from(max_hall_id) / f64::from(self.hall_span_divisor.max(1));
        gap > self.min_hall_gap && f64::from(gap) < upper
    }
}

/// When the ramped shortcut probability goes back to its base value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RampReset {
    /// Keep ramping for the whole pass.
    Never,
    /// Restart at the base value for every grid column.
    EachColumn,
    /// Restart once the ramped value exceeds `cap`.
    AboveCap { cap: f64 },
}

impl Default for RampReset {
    fn default() -> Self {
        Self::AboveCap { cap: 0.5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let config = GeneratorConfig::default();
        assert_eq!(config.branch_probability, 0.3);
        assert_eq!(config.shortcuts.min_hall_gap, 6);
        assert_eq!(config.shortcuts.hall_span_divisor, 5);
        assert_eq!(config.shortcuts.base_probability, 0.2);
        assert_eq!(config.shortcuts.probability_step, 0.05);
        assert_eq!(config.shortcuts.ramp_reset, RampReset::AboveCap { cap: 0.5 });
        assert!(!GeneratorConfig::without_shortcuts().shortcuts.enabled);
    }

    #[test]
    fn hall_gap_lower_bound_is_exclusive() {
        let config = ShortcutConfig::default();
        assert!(!config.hall_gap_qualifies(0, 6, 100));
        assert!(config.hall_gap_qualifies(0, 7, 100));
        assert!(config.hall_gap_qualifies(7, 0, 100));
    }

    #[test]
    fn hall_gap_upper_bound_is_exclusive() {
        let config = ShortcutConfig::default();
        // 35 / 5 = 7, and 7 < 7 does not hold.
        assert!(!config.hall_gap_qualifies(0, 7, 35));
        assert!(config.hall_gap_qualifies(0, 7, 36));
    }
}
