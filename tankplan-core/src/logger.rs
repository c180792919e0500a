use crate::{analysis::CompatibilityResult, error::TankPlanError};
use csv::{Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use tankplan_schemas::environment::{TankParameters, TankReading};

/// One row of the evaluation log. List-valued fields are stored as JSON strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationLogEntry {
    pub evaluated_at: String,
    pub plan_id: String,
    pub tank_volume: Option<f64>,
    pub temperature: Option<String>,
    pub ph: Option<String>,
    pub tank_usage_percent: u32,
    pub is_compatible: bool,
    pub errors_json: String,
    pub warnings_json: String,
    pub omissions_json: String,
}

/// Appends one CSV row per evaluation, writing the header only when the file is new.
pub struct EvaluationLogger {
    writer: Writer<fs::File>,
}

impl EvaluationLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let is_new = !Path::new(path).exists() || fs::metadata(path)?.len() == 0;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = WriterBuilder::new().has_headers(is_new).from_writer(file);
        Ok(Self { writer })
    }

    pub fn log_evaluation(
        &mut self,
        plan_id: &str,
        tank: Option<&TankParameters>,
        result: &CompatibilityResult,
    ) -> Result<(), anyhow::Error> {
        let entry = EvaluationLogEntry {
            evaluated_at: chrono::Utc::now().to_rfc3339(),
            plan_id: plan_id.to_string(),
            tank_volume: tank.map(|t| t.volume),
            temperature: tank.and_then(|t| t.temperature).map(|r| format_reading(&r)),
            ph: tank.and_then(|t| t.ph).map(|r| format_reading(&r)),
            tank_usage_percent: result.tank_usage_percent,
            is_compatible: result.is_compatible,
            errors_json: serde_json::to_string(&result.errors)?,
            warnings_json: serde_json::to_string(&result.warnings)?,
            omissions_json: serde_json::to_string(&result.omissions)?,
        };

        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn format_reading(reading: &TankReading) -> String {
    match reading {
        TankReading::Value(v) => v.to_string(),
        TankReading::Range(r) => format!("{}-{}", r.min, r.max),
    }
}

/// Totals over an evaluation log.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogSummary {
    pub evaluations: usize,
    pub compatible: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub peak_usage_percent: u32,
}

pub fn read_log(log_path: &str) -> Result<Vec<EvaluationLogEntry>, TankPlanError> {
    let mut reader = csv::Reader::from_path(log_path)
        .map_err(|e| TankPlanError::CsvError(log_path.to_string(), e))?;
    reader
        .deserialize()
        .map(|row| row.map_err(|e| TankPlanError::CsvError(log_path.to_string(), e)))
        .collect()
}

pub fn summarize_log(log_path: &str) -> Result<LogSummary, TankPlanError> {
    let mut summary = LogSummary::default();
    for entry in read_log(log_path)? {
        let errors: Vec<String> = serde_json::from_str(&entry.errors_json)?;
        let warnings: Vec<String> = serde_json::from_str(&entry.warnings_json)?;
        summary.evaluations += 1;
        if entry.is_compatible {
            summary.compatible += 1;
        }
        summary.total_errors += errors.len();
        summary.total_warnings += warnings.len();
        summary.peak_usage_percent = summary.peak_usage_percent.max(entry.tank_usage_percent);
    }
    Ok(summary)
}
