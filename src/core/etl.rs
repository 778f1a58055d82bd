use crate::core::Pipeline;
use crate::domain::model::BatchReport;
use crate::utils::error::Result;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 讀取 → 逐列評分 → 寫出結果並記錄摘要。單列失敗不會讓流程中止。
    pub async fn run(&self) -> Result<BatchReport> {
        tracing::debug!("Extracting input rows...");
        let table = self.pipeline.extract().await?;
        tracing::debug!("Extracted {} rows", table.len());

        let outcome = self.pipeline.transform(table).await?;
        let output_path = self.pipeline.load(&outcome).await?;

        let summary = outcome.summary;
        tracing::info!(
            "Total: {}, Success: {}, Failures: {}, Avg Probability: {:.4}",
            summary.total,
            summary.successes(),
            summary.failures,
            summary.average_probability()
        );

        Ok(BatchReport {
            summary,
            output_path,
        })
    }
}

impl BatchReport {
    /// 終端機顯示的一行摘要
    pub fn console_line(&self) -> String {
        format!(
            "Scored {}/{} customers. Results saved to '{}'.",
            self.summary.successes(),
            self.summary.total,
            self.output_path
        )
    }
}
