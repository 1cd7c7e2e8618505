//! synbench-report: CSV and HTML output surfaces.

pub mod tables;
pub mod html;
