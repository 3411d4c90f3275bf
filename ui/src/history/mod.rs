mod series;
pub use series::{to_chart_series, ChartPoint};

mod csv;
pub use csv::build_history_csv;
