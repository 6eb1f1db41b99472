// Domain models: event records, windows, derived series and chart documents

mod chart;
mod record;
mod series;
mod window;

pub use chart::{Chart, slugify};
pub use record::{EventRecord, STATUS_OK, fields};
pub use series::{DerivedSeries, NamedSeries};
pub use window::Window;
