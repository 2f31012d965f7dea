use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

pub const DEFAULT_INPUT: &str = "ssl_output/summary.csv";
pub const DEFAULT_OUTPUT: &str = "ssl_output/summary_highlighted.xlsx";
pub const SECURE_COLUMNS_FILE: &str = "secure_columns.txt";

/// 默认认为"支持即安全"的协议版本列。
pub const DEFAULT_SECURE_COLUMNS: [&str; 2] = ["TLS1.2", "TLS1.3"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// 值为 "oui" 时视为安全的列名，精确匹配。
    pub secure_columns: BTreeSet<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            secure_columns: DEFAULT_SECURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl HighlightConfig {
    /// `sslhighlight [INPUT [OUTPUT]]`。
    ///
    /// 安全列从工作目录下的 secure_columns.txt 读取（若存在）。
    pub fn from_args(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        Self::from_args_with_columns_file(args, Path::new(SECURE_COLUMNS_FILE))
    }

    pub fn from_args_with_columns_file(
        args: impl IntoIterator<Item = OsString>,
        columns_file: &Path,
    ) -> Result<Self> {
        let mut config = Self::default();

        let mut args = args.into_iter();
        let _exe = args.next();
        if let Some(input) = args.next() {
            config.input = PathBuf::from(input);
        }
        if let Some(output) = args.next() {
            config.output = PathBuf::from(output);
        }
        if let Some(extra) = args.next() {
            bail!(
                "多余的参数: {}，用法: sslhighlight [输入CSV [输出xlsx]]",
                extra.to_string_lossy()
            );
        }

        if let Some(columns) = load_secure_columns(columns_file)? {
            config.secure_columns = columns;
        }

        debug!(?config, "highlight config");
        Ok(config)
    }
}

/// 读取安全列配置文件：每行一个列名，忽略空行和 `#` 开头的行。
/// 文件不存在时返回 `None`。
pub fn load_secure_columns(path: &Path) -> Result<Option<BTreeSet<String>>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
    Ok(Some(parse_secure_columns(&content)))
}

fn parse_secure_columns(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
