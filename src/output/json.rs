//! JSON output for trip statistics

use crate::analytics::StatsReport;
use crate::Result;
use serde_json::json;

/// JSON formatter for statistics reports
pub struct JsonFormatter {
    pretty: bool,
    tool_version: Option<String>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            pretty: true,
            tool_version: None,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Attach a `metadata` object naming the tool version
    pub fn with_metadata(mut self, tool_version: &str) -> Self {
        self.tool_version = Some(tool_version.to_string());
        self
    }

    /// Format a report. A report over zero trips carries `"no_data": true`;
    /// its statistic sections serialize as `null`.
    pub fn format_report(&self, report: &StatsReport) -> Result<String> {
        let mut value = serde_json::to_value(report)?;

        if let Some(object) = value.as_object_mut() {
            object.insert("no_data".to_string(), json!(report.is_empty()));
        }

        if let (Some(version), Some(object)) = (&self.tool_version, value.as_object_mut()) {
            object.insert(
                "metadata".to_string(),
                json!({
                    "tool_version": version,
                    "generated_at": chrono::Local::now().to_rfc3339(),
                }),
            );
        }

        let output = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(output)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
