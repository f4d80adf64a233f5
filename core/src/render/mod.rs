pub mod canvas;
pub mod chart;
pub mod pdf;
pub mod report;
pub mod svg;

pub use chart::{Bar, BarChart, Chart, GridChart, LineChart};
pub use report::{
    chart_set, document_pages, export_pdf, page_count, report_file_name, write_chart_images,
    NamedChart,
};
