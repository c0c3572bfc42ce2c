pub mod chart;
pub mod live;
pub mod report;
