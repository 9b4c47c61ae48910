use std::collections::BTreeMap;

use super::reader::Dataset;
use crate::error::{Error, Result};

/// 同一类别值的所有行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub category: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 按类别列的取值分组，分组按类别值排序，组内保持输入顺序
pub fn partition(
    dataset: Dataset,
    category_col: &str,
    keep_column: bool,
) -> Result<Vec<Partition>> {
    let index = dataset
        .header
        .iter()
        .position(|name| name == category_col)
        .ok_or_else(|| {
            Error::Schema(format!(
                "category column {category_col:?} not found in header ({})",
                dataset.header.join(",")
            ))
        })?;

    if !keep_column && dataset.header.len() == 1 {
        return Err(Error::Schema(format!(
            "dropping category column {category_col:?} leaves no columns to write"
        )));
    }

    let mut header = dataset.header;
    if !keep_column {
        header.remove(index);
    }

    let mut groups: BTreeMap<String, Vec<Vec<String>>> = BTreeMap::new();
    for mut row in dataset.rows {
        let category = if keep_column {
            row[index].clone()
        } else {
            row.remove(index)
        };
        groups.entry(category).or_default().push(row);
    }

    Ok(groups
        .into_iter()
        .map(|(category, rows)| Partition {
            category,
            header: header.clone(),
            rows,
        })
        .collect())
}

/// 由类别值生成安全的文件名主干
pub fn category_file_stem(category: &str) -> String {
    match category {
        "" => return "_empty".to_string(),
        // 按目录布局输出时不能成为 `.` 或 `..` 路径分量
        "." | ".." => return category.replace('.', "_"),
        _ => {}
    }
    category
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}
