//! TLS/SSL 扫描汇总表（CSV）导出为 xlsx，并按单元格内容标注底色：
//! 安全为浅绿，不安全为浅红，其余不着色。

pub mod annotate;
pub mod config;
pub mod export;
pub mod highlight;
pub mod table;

pub use annotate::{Category, annotate_table, categorize};
pub use config::HighlightConfig;
pub use highlight::{HighlightSummary, highlight, run};
pub use table::Table;
