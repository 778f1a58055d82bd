use crate::domain::model::{InputTable, ScoredRow};
use crate::utils::error::{Result, ScoringError};

pub const PROBABILITY_COLUMN: &str = "churn_probability";
pub const PREDICTION_COLUMN: &str = "churn_prediction";

/// 讀取含表頭的 CSV；欄位不足的列以空字串補齊（視為缺值），欄位過多則為格式錯誤
pub fn read_table(data: &[u8]) -> Result<InputTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(ScoringError::TableError {
                line: record.position().map_or(0, |p| p.line()),
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    Ok(InputTable { headers, rows })
}

/// 原始欄位 + 兩個預測欄位；沒有成功列時仍寫出表頭
pub fn write_table(headers: &[String], rows: &[ScoredRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header_row: Vec<&str> = headers.iter().map(String::as_str).collect();
    header_row.push(PROBABILITY_COLUMN);
    header_row.push(PREDICTION_COLUMN);
    writer.write_record(&header_row)?;

    for row in rows {
        let mut record: Vec<String> = row.cells.clone();
        record.push(row.prediction.churn_probability.to_string());
        record.push(row.prediction.churn_prediction.to_string());
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ScoringError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PredictionResult;

    #[test]
    fn test_read_table() {
        let data = b"customerID,tenure,TotalCharges\n0001-A,12,\"1,024.50\"\n0002-B,,88.1\n";
        let table = read_table(data).unwrap();

        assert_eq!(table.headers, vec!["customerID", "tenure", "TotalCharges"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][2], "1,024.50");
        assert_eq!(table.rows[1][1], "");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let data = b"customerID,tenure,Contract\n0001-A,12,One year\n0002-B,5\n0003-C,60,Two year\n";
        let table = read_table(data).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[1], vec!["0002-B", "5", ""]);
        assert_eq!(table.rows[2], vec!["0003-C", "60", "Two year"]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = read_table(b"a,b\n1,2\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ScoringError::TableError { line: 3, .. }));
    }

    #[test]
    fn test_write_table() {
        let headers = vec!["customerID".to_string(), "tenure".to_string()];
        let rows = vec![ScoredRow {
            cells: vec!["0001-A".to_string(), "12".to_string()],
            prediction: PredictionResult::from_probability(0.734),
        }];

        let output = String::from_utf8(write_table(&headers, &rows).unwrap()).unwrap();
        assert_eq!(
            output,
            "customerID,tenure,churn_probability,churn_prediction\n0001-A,12,0.73,Yes\n"
        );
    }

    #[test]
    fn test_write_empty_table_keeps_header() {
        let headers = vec!["customerID".to_string()];
        let output = String::from_utf8(write_table(&headers, &[]).unwrap()).unwrap();
        assert_eq!(output, "customerID,churn_probability,churn_prediction\n");
    }
}
