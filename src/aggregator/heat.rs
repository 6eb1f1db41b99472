// Occupancy heat: distinct identifiers active per window, one series per entity.

use std::collections::{BTreeMap, HashSet};

use super::WindowedAggregator;
use crate::models::DerivedSeries;

/// Entity id -> per-window distinct count, ordered by id.
pub type HeatMap = BTreeMap<String, DerivedSeries>;

impl WindowedAggregator {
    /// Running containers per host.
    ///
    /// A container counts for a window when the window's midpoint lies inside
    /// `[executionStartTime, executionEndTime]` of some record placing it on that host. The
    /// window the record itself was bucketed into plays no part. Records missing the
    /// execution interval or the container id are left out; a host seen only on such
    /// records still gets an all-zero series.
    pub fn host_heat(&self) -> HeatMap {
        let mids = self.midpoints();
        let start = self.config.start_time;
        let mut active: BTreeMap<&str, Vec<HashSet<&str>>> = BTreeMap::new();

        for record in self.windows.iter().flat_map(|w| w.records()) {
            let Some(host) = record.host_id() else {
                continue;
            };
            let slots = active
                .entry(host)
                .or_insert_with(|| vec![HashSet::new(); mids.len()]);
            let (Some((exec_start, exec_end)), Some(container)) =
                (record.execution_interval(), record.container_id())
            else {
                continue;
            };
            let (exec_start, exec_end) = (exec_start - start, exec_end - start);
            for (slot, &mid) in slots.iter_mut().zip(&mids) {
                if mid >= exec_start && mid <= exec_end {
                    slot.insert(container);
                }
            }
        }

        to_heat_map(active, &mids)
    }

    /// Distinct requests served per container, by window membership of the request records.
    /// Records without a request id still register the container.
    pub fn container_heat(&self) -> HeatMap {
        let mids = self.midpoints();
        let mut served: BTreeMap<&str, Vec<HashSet<&str>>> = BTreeMap::new();

        for (i, window) in self.windows.iter().enumerate() {
            for record in window.records() {
                let Some(container) = record.container_id() else {
                    continue;
                };
                let slots = served
                    .entry(container)
                    .or_insert_with(|| vec![HashSet::new(); mids.len()]);
                if let Some(request) = record.request_id() {
                    slots[i].insert(request);
                }
            }
        }

        to_heat_map(served, &mids)
    }
}

fn to_heat_map(sets: BTreeMap<&str, Vec<HashSet<&str>>>, mids: &[f64]) -> HeatMap {
    sets.into_iter()
        .map(|(id, slots)| {
            let series = DerivedSeries {
                x: mids.to_vec(),
                y: slots.iter().map(|s| s.len() as f64).collect(),
            };
            (id.to_string(), series)
        })
        .collect()
}
