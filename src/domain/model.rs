use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 二元判定門檻：機率 >= 門檻即判定為流失
pub const CHURN_THRESHOLD: f64 = 0.5;

/// 客戶欄位值；缺值不以 null 表示，而是直接省略欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// 由 CSV 儲存格推斷型別；空值與常見 NA 標記回傳 None
    pub fn infer(cell: &str) -> Option<Self> {
        if is_missing(cell) {
            return None;
        }

        match cell {
            "true" | "True" | "TRUE" => return Some(Self::Bool(true)),
            "false" | "False" | "FALSE" => return Some(Self::Bool(false)),
            _ => {}
        }

        match cell.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(Self::Number(n)),
            _ => Some(Self::Text(cell.to_string())),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            // 整數值不帶小數點，類別比對時 "1" 與 1.0 視為相同
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// 與 pandas `read_csv` 預設的缺值標記一致；僅含空白的儲存格不算缺值
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    NA_MARKERS.contains(&cell)
}

/// 單一客戶記錄：欄位名稱到純量值的開放映射
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomerRecord {
    pub fields: BTreeMap<String, FieldValue>,
}

impl CustomerRecord {
    /// 由表頭與一列儲存格建立記錄，略過缺值
    pub fn from_row(headers: &[String], cells: &[String]) -> Self {
        let fields = headers
            .iter()
            .zip(cells.iter())
            .filter_map(|(name, cell)| FieldValue::infer(cell).map(|v| (name.clone(), v)))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for CustomerRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // 明確的 null 等同於未提供
        let raw = BTreeMap::<String, Option<FieldValue>>::deserialize(deserializer)?;
        let fields = raw
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();
        Ok(Self { fields })
    }
}

/// 請求外層：`{"customer": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub customer: CustomerRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnLabel {
    Yes,
    No,
}

impl ChurnLabel {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= CHURN_THRESHOLD {
            Self::Yes
        } else {
            Self::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub churn_probability: f64,
    pub churn_prediction: ChurnLabel,
}

impl PredictionResult {
    /// 以未四捨五入的機率判定標籤，再將機率取到小數兩位
    pub fn from_probability(probability: f64) -> Self {
        Self {
            churn_probability: round_to_cents(probability),
            churn_prediction: ChurnLabel::from_probability(probability),
        }
    }
}

/// 依實際十進位值取到小數兩位，恰好一半時取偶數（0.125 -> 0.12）
fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 讀入記憶體的輸入表格
#[derive(Debug, Clone, Default)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl InputTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ScoredRow {
    pub cells: Vec<String>,
    pub prediction: PredictionResult,
}

/// 單次批次執行的統計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub failures: usize,
    probability_sum: f64,
}

impl BatchSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self, probability: f64) {
        self.probability_sum += probability;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn successes(&self) -> usize {
        self.total - self.failures
    }

    pub fn average_probability(&self) -> f64 {
        match self.successes() {
            0 => 0.0,
            n => self.probability_sum / n as f64,
        }
    }
}

/// transform 階段的產出：成功列（保持輸入順序）與統計
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    pub headers: Vec<String>,
    pub scored_rows: Vec<ScoredRow>,
    pub summary: BatchSummary,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub output_path: String,
}
