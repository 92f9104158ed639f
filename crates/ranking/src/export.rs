use thiserror::Error;

use crate::table::{RankingRow, RankingTable};

/// The download always carries the four fixed column headers, no matter how
/// many round columns the table has. Data rows still cover every column.
const HEADER_COLUMNS: usize = 4;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn csv_filename(program_name: &str) -> String {
    format!("Ranking-{}.csv", program_name)
}

pub fn to_csv(table: &RankingTable) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let headers: Vec<&str> = table
        .columns
        .iter()
        .take(HEADER_COLUMNS)
        .map(|column| column.title.as_str())
        .collect();
    writer.write_record(&headers)?;

    for row in &table.rows {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|column| cell_value(row, &column.key))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn cell_value(row: &RankingRow, key: &str) -> String {
    match key {
        "realName" => row.real_name.clone(),
        "github" => row.github.clone(),
        "mentor" => row.mentor.clone(),
        "score" => row.score.to_string(),
        round => row
            .cells
            .get(round)
            .map(|cell| cell.label.clone())
            .unwrap_or_else(|| "N/A".to_string()),
    }
}
