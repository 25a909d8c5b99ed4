//! Tick sets: pixel offset along the axis mapped to the label drawn there.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{GraphError, Result};

/// Pixel offset along an axis mapped to a tick label. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u32, String>", into = "BTreeMap<u32, String>")]
pub struct TickSet {
    ticks: BTreeMap<u32, String>,
}

impl TickSet {
    /// Use an explicit offset/label mapping.
    pub fn from_map(ticks: BTreeMap<u32, String>) -> Result<Self> {
        if ticks.is_empty() {
            return Err(GraphError::invalid("an axis needs at least one tick"));
        }
        Ok(Self { ticks })
    }

    /// One tick per value at `round(value * scale)`, labelled with the value.
    ///
    /// Values mapping to the same offset keep the last label.
    pub fn numeric(values: &[f64], scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GraphError::invalid(format!(
                "tick scale must be positive, got {scale}"
            )));
        }
        let mut ticks = BTreeMap::new();
        for &value in values {
            let offset = (value * scale).round();
            if !offset.is_finite() || offset < 0.0 || offset > f64::from(u32::MAX) {
                return Err(GraphError::invalid(format!(
                    "tick {value} maps to offset {offset}, outside the axis"
                )));
            }
            ticks.insert(offset as u32, value.to_string());
        }
        Self::from_map(ticks)
    }

    /// Ticks at `start, start + step, ...` below `end`, `gap` pixels apart.
    ///
    /// `step` must divide `gap` so every tick lands on a whole pixel.
    pub fn range(end: i64, start: i64, step: i64, gap: i64) -> Result<Self> {
        if step <= 0 {
            return Err(GraphError::invalid(format!(
                "range step must be positive, got {step}"
            )));
        }
        if gap <= 0 || gap % step != 0 {
            return Err(GraphError::invalid(format!(
                "range gap {gap} is not a positive multiple of step {step}"
            )));
        }
        let values: Vec<f64> = (start..end)
            .step_by(step as usize)
            .map(|v| v as f64)
            .collect();
        Self::numeric(&values, (gap / step) as f64)
    }

    /// Labels evenly spaced `gap` pixels apart from offset 0.
    ///
    /// When `centered`, labels sit in the middle of their `gap`-wide cell and
    /// an empty tick closes the last cell.
    pub fn text<S: AsRef<str>>(labels: &[S], gap: u32, centered: bool) -> Result<Self> {
        if labels.is_empty() {
            return Err(GraphError::invalid("a text axis needs at least one label"));
        }
        if gap == 0 {
            return Err(GraphError::invalid("text axis gap must be positive"));
        }
        let half = gap / 2;
        let mut ticks = BTreeMap::new();
        let mut pos: u32 = if centered { half } else { 0 };
        for label in labels {
            ticks.insert(pos, label.as_ref().to_string());
            pos = pos
                .checked_add(gap)
                .ok_or_else(|| GraphError::invalid("text axis is longer than u32 pixels"))?;
        }
        if centered {
            ticks.insert(pos - half, String::new());
        }
        Self::from_map(ticks)
    }

    /// `(offset, label)` pairs in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.ticks.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn get(&self, offset: u32) -> Option<&str> {
        self.ticks.get(&offset).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// The furthest offset, which sets the axis length.
    pub fn max_offset(&self) -> u32 {
        self.ticks.keys().next_back().copied().unwrap_or(0)
    }
}

impl TryFrom<BTreeMap<u32, String>> for TickSet {
    type Error = GraphError;

    fn try_from(value: BTreeMap<u32, String>) -> Result<Self> {
        Self::from_map(value)
    }
}

impl From<TickSet> for BTreeMap<u32, String> {
    fn from(value: TickSet) -> Self {
        value.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(t: &TickSet) -> Vec<(u32, String)> {
        t.iter().map(|(k, v)| (k, v.to_string())).collect()
    }

    #[test]
    fn numeric_offsets_are_scaled_and_rounded() {
        let t = TickSet::numeric(&[0.0, 1.0, 2.0], 20.0).unwrap();
        assert_eq!(
            pairs(&t),
            vec![(0, "0".into()), (20, "1".into()), (40, "2".into())]
        );
        let t = TickSet::numeric(&[0.5, 1.26], 10.0).unwrap();
        assert_eq!(pairs(&t), vec![(5, "0.5".into()), (13, "1.26".into())]);
    }

    #[test]
    fn numeric_rejects_bad_input() {
        assert!(TickSet::numeric(&[], 20.0).is_err());
        assert!(TickSet::numeric(&[1.0], 0.0).is_err());
        assert!(TickSet::numeric(&[1.0], f64::NAN).is_err());
        assert!(TickSet::numeric(&[-1.0], 20.0).is_err());
        assert!(TickSet::numeric(&[f64::INFINITY], 1.0).is_err());
    }

    #[test]
    fn colliding_offsets_keep_last_label() {
        let t = TickSet::numeric(&[1.0, 1.01], 10.0).unwrap();
        assert_eq!(pairs(&t), vec![(10, "1.01".into())]);
    }

    #[test]
    fn range_delegates_with_integer_scale() {
        let t = TickSet::range(6, 0, 1, 100).unwrap();
        assert_eq!(t.len(), 6);
        assert_eq!(t.get(500), Some("5"));
        assert_eq!(t.max_offset(), 500);

        let t = TickSet::range(10, 2, 4, 40).unwrap();
        assert_eq!(pairs(&t), vec![(20, "2".into()), (60, "6".into())]);
    }

    #[test]
    fn range_rejects_incompatible_step() {
        assert!(TickSet::range(5, 0, 0, 20).is_err());
        assert!(TickSet::range(5, 0, 3, 20).is_err());
        assert!(TickSet::range(5, 0, -1, 20).is_err());
        assert!(TickSet::range(0, 0, 1, 20).is_err());
    }

    #[test]
    fn text_ticks_plain_and_centered() {
        let t = TickSet::text(&["a", "b", "c"], 30, false).unwrap();
        assert_eq!(
            pairs(&t),
            vec![(0, "a".into()), (30, "b".into()), (60, "c".into())]
        );

        let t = TickSet::text(&["a", "b"], 100, true).unwrap();
        assert_eq!(
            pairs(&t),
            vec![(50, "a".into()), (150, "b".into()), (200, String::new())]
        );
    }

    #[test]
    fn text_rejects_empty_and_zero_gap() {
        let none: [&str; 0] = [];
        assert!(TickSet::text(&none, 10, false).is_err());
        assert!(TickSet::text(&["a"], 0, true).is_err());
    }

    #[test]
    fn deserializes_from_object_and_rejects_empty() {
        let t: TickSet = serde_json::from_str(r#"{"0": "low", "90": "high"}"#).unwrap();
        assert_eq!(t.get(90), Some("high"));
        assert!(serde_json::from_str::<TickSet>("{}").is_err());
    }
}
