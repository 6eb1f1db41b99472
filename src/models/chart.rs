// Chart documents: what a renderer needs to draw one artifact.

use serde::{Deserialize, Serialize};

use super::{DerivedSeries, NamedSeries};

/// Main panel (one or more series) over a requests-per-window companion panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    /// Artifact name, e.g. "Latency Plots"; the file name is derived from it.
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Epoch seconds the x axis is measured from.
    pub start_time: f64,
    pub window_secs: f64,
    pub series: Vec<NamedSeries>,
    pub requests: DerivedSeries,
}

impl Chart {
    /// File stem for the artifact: lowercase, spaces replaced with underscores.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
