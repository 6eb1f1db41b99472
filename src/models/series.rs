// Derived series: one (x, y) point per window.

use serde::{Deserialize, Serialize};

/// `x[i]` is window i's midpoint, `y[i]` the statistic computed over it. Both always have one
/// element per window, empty windows included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DerivedSeries {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// A derived series with the label a renderer shows in the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSeries {
    pub label: String,
    #[serde(flatten)]
    pub series: DerivedSeries,
}

impl NamedSeries {
    pub fn new(label: impl Into<String>, series: DerivedSeries) -> Self {
        Self {
            label: label.into(),
            series,
        }
    }
}
