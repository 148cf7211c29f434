//! Rental aggregation core.
//!
//! Everything here is a pure function of the filtered datasets: grouping and
//! summing by date, season, weather and hour, labeling category codes,
//! binning hours into day segments, and picking the row to highlight.

pub mod aggregate;
pub mod bins;
pub mod dashboard;
pub mod highlight;
pub mod labels;
pub mod types;
pub mod utility;
