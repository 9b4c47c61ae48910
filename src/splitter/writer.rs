use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use csv::WriterBuilder;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use super::OutputFormat;
use super::partition::Partition;
use crate::error::{Error, Result};

/// 按输出格式写出一个分组
pub fn write_partition(
    partition: &Partition,
    path: &Path,
    format: OutputFormat,
    output_separator: u8,
) -> Result<()> {
    match format {
        OutputFormat::Csv | OutputFormat::Txt => write_delimited(partition, path, output_separator),
        OutputFormat::Parquet => write_parquet(partition, path),
        OutputFormat::Xlsx => write_xlsx(partition, path),
    }
}

fn write_delimited(partition: &Partition, path: &Path, separator: u8) -> Result<()> {
    let csv_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .delimiter(separator)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(&partition.header).map_err(csv_err)?;
    for row in &partition.rows {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|err| Error::io(path, err))
}

fn write_parquet(partition: &Partition, path: &Path) -> Result<()> {
    let fields: Vec<Field> = partition
        .header
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, false))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let columns: Vec<ArrayRef> = (0..partition.header.len())
        .map(|col| {
            let values = partition.rows.iter().map(|row| row[col].as_str());
            Arc::new(StringArray::from_iter_values(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(path).map_err(|err| Error::io(path, err))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn write_xlsx(partition: &Partition, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in partition.header.iter().enumerate() {
        worksheet.write_string(0, column_index(col)?, name)?;
    }
    for (row_idx, row) in partition.rows.iter().enumerate() {
        let row_num = u32::try_from(row_idx + 1)
            .map_err(|_| Error::Schema(format!("too many rows for xlsx: {}", row_idx + 1)))?;
        for (col, value) in row.iter().enumerate() {
            worksheet.write_string(row_num, column_index(col)?, value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Schema(format!("too many columns for xlsx: {col}")))
}
