use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// 内存中的报告表格：表头 + 数据行，每行与表头等长，缺失值为 `None`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    #[cfg(test)]
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                bail!("第 {} 行有 {} 列，表头有 {} 列", i + 1, row.len(), columns.len());
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("无法打开文件: {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("无法读取CSV: {}", path.display()))
    }

    /// 读取逗号分隔、带表头的 UTF-8 文本。
    ///
    /// 空字段记为缺失；比表头短的行补齐缺失值，比表头长的行报错。
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()
            .context("无法读取表头")?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.context("无法读取数据行")?;
            if record.len() > columns.len() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                bail!(
                    "第 {line} 行有 {} 个字段，多于表头的 {} 列",
                    record.len(),
                    columns.len()
                );
            }

            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect();
            row.resize(columns.len(), None);
            rows.push(row);
        }

        debug!(columns = ?columns, rows = rows.len(), "loaded table");
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// 按 (行号, 列名) 取值，行号从 0 开始且不含表头。
    #[cfg(test)]
    pub(crate) fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let csv = "Host,TLS1.0,TLS1.2\nexample.com,Oui,Non\nexample.org,Non,Oui\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.columns(), ["Host", "TLS1.0", "TLS1.2"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.cell(0, "TLS1.0"), Some("Oui"));
        assert_eq!(table.cell(1, "Host"), Some("example.org"));
        assert_eq!(table.cell(1, "SSLv3"), None);
        assert_eq!(table.cell(2, "Host"), None);
    }

    #[test]
    fn empty_fields_and_short_rows_are_missing() {
        let csv = "a,b,c\n1,,3\n4\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            table.rows(),
            [
                vec![Some("1".to_string()), None, Some("3".to_string())],
                vec![Some("4".to_string()), None, None],
            ]
        );
    }

    #[test]
    fn whitespace_is_kept_verbatim() {
        let csv = "a,b\n\" Oui \",x\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.cell(0, "a"), Some(" Oui "));
    }

    #[test]
    fn long_rows_are_rejected() {
        let csv = "a,b\n1,2,3\n";
        let err = Table::from_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("多于表头"));
    }

    #[test]
    fn header_only_is_empty_table() {
        let table = Table::from_reader("Host,TLS1.2\n".as_bytes()).unwrap();
        assert_eq!(table.columns().len(), 2);
        assert!(table.rows().is_empty());
    }

    #[test]
    fn missing_file_names_path() {
        let err = Table::from_csv_path(Path::new("no/such/summary.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("no/such/summary.csv"));
    }

    #[test]
    fn new_checks_row_width() {
        assert!(Table::new(vec!["a".into()], vec![vec![None, None]]).is_err());
        assert!(Table::new(vec!["a".into()], vec![vec![None]]).is_ok());
    }
}
