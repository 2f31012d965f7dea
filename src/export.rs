use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;
use umya_spreadsheet::Spreadsheet;
use umya_spreadsheet::structs::{Border, PatternValues, Style};

use crate::annotate::Category;
use crate::table::Table;

// umya-spreadsheet 的 Color::set_argb() 若传入值等于内置 INDEXED_COLORS，
// 会改写成 indexed="n"；用小写 hex 保证写出 rgb="..."。
const GREEN_ARGB: &str = "ffc6efce";
const RED_ARGB: &str = "ffffc7ce";

pub(crate) fn cell_ref(col_1_based: usize, row_1_based: usize) -> String {
    let mut col = col_1_based;
    let mut name = String::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        name.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    let name: String = name.chars().rev().collect();
    format!("{name}{row_1_based}")
}

/// 类别对应的填充色（ARGB），`Neutral` 不填充。
pub fn fill_argb(category: Category) -> Option<&'static str> {
    match category {
        Category::Secure => Some(GREEN_ARGB),
        Category::Insecure => Some(RED_ARGB),
        Category::Neutral => None,
    }
}

fn solid_fill(argb: &str) -> Style {
    let mut style = Style::default();
    let pattern = style.get_fill_mut().get_pattern_fill_mut();
    pattern.set_pattern_type(PatternValues::Solid);
    pattern.get_foreground_color_mut().set_argb(argb);
    pattern.get_background_color_mut().set_argb(argb);
    style
}

fn header_style() -> Style {
    let mut style = Style::default();
    style.get_font_mut().set_bold(true);
    let borders = style.get_borders_mut();
    borders.get_left_mut().set_border_style(Border::BORDER_THIN);
    borders.get_right_mut().set_border_style(Border::BORDER_THIN);
    borders.get_top_mut().set_border_style(Border::BORDER_THIN);
    borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
    style
}

fn as_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 逐列判断是否按数字写入：该列所有非缺失值都能解析为数字，且至少有一个值。
fn numeric_columns(table: &Table) -> Vec<bool> {
    (0..table.columns().len())
        .map(|col| {
            let mut present = table
                .rows()
                .iter()
                .filter_map(|row| row[col].as_deref())
                .peekable();
            present.peek().is_some() && present.all(|v| as_number(v).is_some())
        })
        .collect()
}

/// 把表格和每个数据单元格的类别写进一个新工作簿（工作表 Sheet1）。
///
/// 第 1 行为加粗表头，数据从第 2 行开始。
/// 整列都能解析为数字时按数字写入，否则整列保留原文。
pub fn render(table: &Table, categories: &[Vec<Category>]) -> Result<Spreadsheet> {
    if categories.len() != table.rows().len() {
        bail!(
            "类别行数 {} 与表格行数 {} 不一致",
            categories.len(),
            table.rows().len()
        );
    }

    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();

    let header_style = header_style();
    for (i, column) in table.columns().iter().enumerate() {
        let addr = cell_ref(i + 1, 1);
        let cell = sheet.get_cell_mut(addr.as_str());
        cell.set_value(column.as_str());
        cell.set_style(header_style.clone());
    }

    let secure_style = fill_argb(Category::Secure).map(solid_fill);
    let insecure_style = fill_argb(Category::Insecure).map(solid_fill);
    let numeric = numeric_columns(table);

    for (row_idx, (row, row_categories)) in table.rows().iter().zip(categories).enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let category = row_categories
                .get(col_idx)
                .copied()
                .unwrap_or(Category::Neutral);
            let style = match category {
                Category::Secure => secure_style.as_ref(),
                Category::Insecure => insecure_style.as_ref(),
                Category::Neutral => None,
            };

            if value.is_none() && style.is_none() {
                continue;
            }

            let addr = cell_ref(col_idx + 1, row_idx + 2);
            let cell = sheet.get_cell_mut(addr.as_str());
            if let Some(v) = value.as_deref() {
                match as_number(v).filter(|_| numeric[col_idx]) {
                    Some(n) => {
                        cell.set_value_number(n);
                    }
                    None => {
                        cell.set_value(v);
                    }
                }
            }
            if let Some(style) = style {
                cell.set_style(style.clone());
            }
        }
    }

    debug!(
        columns = table.columns().len(),
        rows = table.rows().len(),
        "rendered workbook"
    );
    Ok(book)
}

/// 保存工作簿，输出目录不存在时先创建。
pub fn save(book: &Spreadsheet, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("无法创建输出目录: {}", parent.display()))?;
    }

    umya_spreadsheet::writer::xlsx::write(book, output_path)
        .with_context(|| format!("无法保存文件: {}", output_path.display()))?;
    Ok(())
}
