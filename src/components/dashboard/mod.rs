mod charts;
mod component;
mod context;
mod detail;
mod highlight;
mod lazy;
mod payload;
mod types;

pub use component::Dashboard;
pub use context::{ChartKind, DashboardContext};
pub use highlight::HighlightCoordinator;
pub use lazy::LazyChartLoader;
