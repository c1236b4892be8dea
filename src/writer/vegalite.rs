//! Vega-Lite JSON writer implementation
//!
//! Emits a bar chart with inline data, where each bar's fill comes from the
//! color assignment through an explicit `scale.domain` / `scale.range`.

use serde_json::{json, Value};
use tracing::debug;

use super::{BarChart, Writer};
use crate::{RankhueError, Result};

const LABEL_FIELD: &str = "label";
const VALUE_FIELD: &str = "value";

/// Vega-Lite JSON writer
///
/// Generates Vega-Lite v6 specifications.
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
    pretty: bool,
}

impl VegaLiteWriter {
    /// Create a new Vega-Lite writer with default settings
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v6.json".to_string(),
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Build the spec as a JSON value
    pub fn to_value(&self, chart: &BarChart) -> Value {
        let entries = chart.colors.entries();
        let values: Vec<Value> = entries
            .iter()
            .map(|e| json!({ LABEL_FIELD: e.label, VALUE_FIELD: e.value }))
            .collect();
        let domain = chart.colors.domain();

        let mut x = json!({
            "field": LABEL_FIELD,
            "type": "nominal",
            "sort": chart.bar_order(),
            "axis": { "labelAngle": 0 }
        });
        if let Some(title) = &chart.x_title {
            x["title"] = json!(title);
        }

        let mut y = json!({ "field": VALUE_FIELD, "type": "quantitative" });
        if let Some(title) = &chart.y_title {
            y["title"] = json!(title);
        }

        let bars = json!({
            "mark": { "type": "bar" },
            "encoding": {
                "color": {
                    "field": LABEL_FIELD,
                    "type": "nominal",
                    "scale": { "domain": domain, "range": chart.colors.range(chart.format) },
                    "legend": null
                }
            }
        });

        let mut layers = vec![bars];
        if chart.show_values {
            layers.push(json!({
                "mark": { "type": "text", "baseline": "bottom", "dy": -2 },
                "encoding": { "text": { "field": VALUE_FIELD, "type": "quantitative" } }
            }));
        }

        let mut spec = json!({
            "$schema": self.schema,
            "width": "container",
            "height": "container",
            "data": { "values": values },
            "encoding": { "x": x, "y": y },
            "layer": layers
        });
        if let Some(title) = &chart.title {
            spec["title"] = json!(title);
        }
        spec
    }
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for VegaLiteWriter {
    type Output = String;

    fn write(&self, chart: &BarChart) -> Result<String> {
        if chart.colors.is_empty() {
            return Err(RankhueError::WriterError(
                "Cannot render a chart without bars".to_string(),
            ));
        }

        let spec = self.to_value(chart);
        debug!(bars = chart.colors.len(), "rendered Vega-Lite bar chart");

        let out = if self.pretty {
            serde_json::to_string_pretty(&spec)
        } else {
            serde_json::to_string(&spec)
        };
        out.map_err(|e| RankhueError::WriterError(format!("Failed to serialize spec: {}", e)))
    }
}
