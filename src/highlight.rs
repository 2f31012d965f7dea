use std::ffi::OsString;

use anyhow::Result;
use tracing::info;

use crate::annotate::{Category, annotate_table};
use crate::config::HighlightConfig;
use crate::export;
use crate::table::Table;

/// 各类别的单元格数量。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightSummary {
    pub secure: usize,
    pub insecure: usize,
    pub neutral: usize,
}

impl HighlightSummary {
    fn tally(categories: &[Vec<Category>]) -> Self {
        let mut summary = Self::default();
        for category in categories.iter().flatten() {
            match category {
                Category::Secure => summary.secure += 1,
                Category::Insecure => summary.insecure += 1,
                Category::Neutral => summary.neutral += 1,
            }
        }
        summary
    }
}

/// 读取 CSV → 判定类别 → 写出带底色的 xlsx。
pub fn highlight(config: &HighlightConfig) -> Result<HighlightSummary> {
    let table = Table::from_csv_path(&config.input)?;
    let categories = annotate_table(&table, &config.secure_columns);
    let book = export::render(&table, &categories)?;
    export::save(&book, &config.output)?;

    let summary = HighlightSummary::tally(&categories);
    info!(
        secure = summary.secure,
        insecure = summary.insecure,
        neutral = summary.neutral,
        output = %config.output.display(),
        "highlighted report"
    );
    Ok(summary)
}

pub fn run(args: impl IntoIterator<Item = OsString>) -> Result<HighlightSummary> {
    let config = HighlightConfig::from_args(args)?;
    let summary = highlight(&config)?;
    println!("[+] Excel created with highlights: {}", config.output.display());
    Ok(summary)
}
