// Column discovery: turn a column catalogue into the list of series to average.
// Per-node metric columns are named "<node><Family>", e.g. "n1CpuUsage".

use crate::units::UnitFamily;

/// One series to compute with `WindowedAggregator::target_average`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesTarget {
    /// Legend label.
    pub name: String,
    /// Record field holding the raw quantity.
    pub field: String,
    pub unit: UnitFamily,
}

impl SeriesTarget {
    pub fn single(field: impl Into<String>, unit: UnitFamily) -> Self {
        let field = field.into();
        Self {
            name: field.clone(),
            field,
            unit,
        }
    }
}

/// Every column ending in the family's suffix, in catalogue order. Families without a column
/// suffix yield nothing.
pub fn discover<'a, I>(columns: I, unit: UnitFamily) -> Vec<SeriesTarget>
where
    I: IntoIterator<Item = &'a str>,
{
    let Some(suffix) = unit.column_suffix() else {
        return Vec::new();
    };
    columns
        .into_iter()
        .filter(|c| c.ends_with(suffix))
        .map(|c| SeriesTarget::single(c, unit))
        .collect()
}
