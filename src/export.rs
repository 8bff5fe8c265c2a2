//! Excel出力
//!
//! 集計結果を1シートのExcelへ書き出す。

use crate::error::{RankingError, Result};
use crate::types::TallyTable;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

const PLAIN_HEADERS: &[&str] = &["順位", "将軍名", "武功"];
const ENRICHED_HEADERS: &[&str] = &["順位", "登録名", "盟員コード", "将軍名", "武功"];

/// 集計結果をExcelバッファへ生成
pub fn generate_excel_buffer(table: &TallyTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Sheet1")
        .map_err(|e| RankingError::ExcelGeneration(format!("シート名設定エラー: {}", e)))?;

    match table {
        TallyTable::Plain(rows) => {
            write_headers(worksheet, PLAIN_HEADERS, &header_format)?;
            for (i, row) in rows.iter().enumerate() {
                let r = (i + 1) as u32;
                write_opt_u32(worksheet, r, 0, row.rank)?;
                write_string(worksheet, r, 1, &row.name)?;
                write_opt_i64(worksheet, r, 2, row.score)?;
            }
        }
        TallyTable::Enriched(rows) => {
            write_headers(worksheet, ENRICHED_HEADERS, &header_format)?;
            for (i, row) in rows.iter().enumerate() {
                let r = (i + 1) as u32;
                write_opt_u32(worksheet, r, 0, row.rank)?;
                write_string(worksheet, r, 1, &row.matched_name)?;
                write_string(worksheet, r, 2, &row.code)?;
                write_string(worksheet, r, 3, &row.name)?;
                write_opt_i64(worksheet, r, 4, row.score)?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| RankingError::ExcelGeneration(format!("Excel保存エラー: {}", e)))
}

/// 集計結果をExcelファイルへ書き出す
pub fn export_to_file(table: &TallyTable, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(table)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, format)
            .map_err(|e| RankingError::ExcelGeneration(format!("ヘッダー書き込みエラー: {}", e)))?;
    }
    Ok(())
}

fn write_string(worksheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<()> {
    worksheet
        .write_string(row, col, value)
        .map_err(|e| RankingError::ExcelGeneration(format!("セル書き込みエラー: {}", e)))?;
    Ok(())
}

fn write_opt_u32(worksheet: &mut Worksheet, row: u32, col: u16, value: Option<u32>) -> Result<()> {
    if let Some(v) = value {
        worksheet
            .write_number(row, col, v as f64)
            .map_err(|e| RankingError::ExcelGeneration(format!("セル書き込みエラー: {}", e)))?;
    }
    Ok(())
}

fn write_opt_i64(worksheet: &mut Worksheet, row: u32, col: u16, value: Option<i64>) -> Result<()> {
    if let Some(v) = value {
        worksheet
            .write_number(row, col, v as f64)
            .map_err(|e| RankingError::ExcelGeneration(format!("セル書き込みエラー: {}", e)))?;
    }
    Ok(())
}
