pub mod axis;
pub mod series;

pub use axis::{chart_lower_limit, chart_upper_limit, has_enough_data_for_weekly, AxisRange};
pub use series::{step_goal_met, ChartPoint, Granularity, Metric};
