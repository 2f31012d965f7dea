use std::collections::BTreeSet;

use crate::table::Table;

/// 单元格的显示类别，只用于决定填充颜色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Secure,
    Insecure,
    Neutral,
}

const AFFIRMATIVE: &str = "oui";
const NEGATIVE: &str = "non";

/// 按列名和单元格内容判定类别。
///
/// 比较前去掉首尾空白并忽略大小写；列名按原样精确匹配。
/// 缺失值（`None`）永远不会等于 "oui"/"non"，因此落入 `Neutral`。
pub fn categorize(
    value: Option<&str>,
    column: &str,
    secure_columns: &BTreeSet<String>,
) -> Category {
    let Some(value) = value else {
        return Category::Neutral;
    };
    let value = value.trim();

    if value.eq_ignore_ascii_case(AFFIRMATIVE) {
        if secure_columns.contains(column) {
            Category::Secure
        } else {
            Category::Insecure
        }
    } else if value.eq_ignore_ascii_case(NEGATIVE) {
        Category::Secure
    } else {
        Category::Neutral
    }
}

/// 对表格每个数据单元格（不含表头）判定类别。
///
/// 结果按行优先排列，形状与 `table.rows()` 一致。
pub fn annotate_table(table: &Table, secure_columns: &BTreeSet<String>) -> Vec<Vec<Category>> {
    table
        .rows()
        .iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .zip(row)
                .map(|(column, value)| categorize(value.as_deref(), column, secure_columns))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tls_good() -> BTreeSet<String> {
        ["TLS1.2", "TLS1.3"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn affirmative_in_secure_column_is_secure() {
        let good = tls_good();
        for v in ["oui", "Oui", "OUI", "  oui\t"] {
            assert_eq!(categorize(Some(v), "TLS1.2", &good), Category::Secure);
            assert_eq!(categorize(Some(v), "TLS1.3", &good), Category::Secure);
        }
    }

    #[test]
    fn affirmative_elsewhere_is_insecure() {
        let good = tls_good();
        assert_eq!(categorize(Some("Oui"), "TLS1.0", &good), Category::Insecure);
        assert_eq!(categorize(Some(" OUI "), "SSLv3", &good), Category::Insecure);
        assert_eq!(categorize(Some("oui"), "Heartbleed", &good), Category::Insecure);
    }

    #[test]
    fn negative_is_secure_in_any_column() {
        let good = tls_good();
        for column in ["TLS1.0", "TLS1.2", "Host", ""] {
            assert_eq!(categorize(Some("Non"), column, &good), Category::Secure);
            assert_eq!(categorize(Some(" NON "), column, &good), Category::Secure);
        }
    }

    #[test]
    fn other_values_are_neutral() {
        let good = tls_good();
        for v in ["", "   ", "yes", "no", "443", "0.5", "none", "oui non", "o ui"] {
            assert_eq!(categorize(Some(v), "TLS1.2", &good), Category::Neutral, "{v:?}");
            assert_eq!(categorize(Some(v), "TLS1.0", &good), Category::Neutral, "{v:?}");
        }
        assert_eq!(categorize(None, "TLS1.2", &good), Category::Neutral);
    }

    #[test]
    fn column_names_match_exactly() {
        let good = tls_good();
        assert_eq!(categorize(Some("oui"), "tls1.2", &good), Category::Insecure);
        assert_eq!(categorize(Some("oui"), " TLS1.2", &good), Category::Insecure);
    }

    #[test]
    fn empty_secure_set_makes_every_oui_insecure() {
        let none = BTreeSet::new();
        assert_eq!(categorize(Some("oui"), "TLS1.3", &none), Category::Insecure);
        assert_eq!(categorize(Some("non"), "TLS1.3", &none), Category::Secure);
    }

    #[test]
    fn annotates_example_report() {
        let csv = "Host,TLS1.0,TLS1.2,TLS1.3\nexample.com,Oui,Non,Oui\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        let grid = annotate_table(&table, &tls_good());
        assert_eq!(
            grid,
            vec![vec![
                Category::Neutral,
                Category::Insecure,
                Category::Secure,
                Category::Secure,
            ]]
        );

        // 纯函数：重复判定结果一致
        assert_eq!(annotate_table(&table, &tls_good()), grid);
    }

    #[test]
    fn missing_cells_are_neutral() {
        let csv = "Host,TLS1.0,TLS1.2\na.example,,\nb.example\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        let grid = annotate_table(&table, &tls_good());
        assert_eq!(grid.len(), 2);
        for row in grid {
            assert_eq!(row, vec![Category::Neutral; 3]);
        }
    }
}
