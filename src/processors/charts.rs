//! Chart-ready series shared by several processors

use serde::Serialize;

/// Line colour pairs used by the dashboard charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Red,
    Green,
    Amber,
}

impl Palette {
    pub fn border(self) -> &'static str {
        match self {
            Palette::Red => "#ef4444",
            Palette::Green => "#10b981",
            Palette::Amber => "#f59e0b",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Palette::Red => "rgba(239, 68, 68, 0.1)",
            Palette::Green => "rgba(16, 185, 129, 0.1)",
            Palette::Amber => "rgba(245, 158, 11, 0.1)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<&'static str>,
}

impl Dataset {
    /// Border colour only
    pub fn outline(label: impl Into<String>, data: Vec<f64>, palette: Palette) -> Self {
        Self {
            label: label.into(),
            data,
            border_color: Some(palette.border()),
            background_color: None,
        }
    }

    /// Border plus translucent fill
    pub fn filled(label: impl Into<String>, data: Vec<f64>, palette: Palette) -> Self {
        Self {
            background_color: Some(palette.background()),
            ..Self::outline(label, data, palette)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn single(labels: &[&str], dataset: Dataset) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            datasets: vec![dataset],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_serializes_for_dashboard() {
        let chart = ChartData::single(
            &["Jan", "Feb"],
            Dataset::filled("Anomaly Score", vec![0.1, 0.2], Palette::Amber),
        );
        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            json!({
                "labels": ["Jan", "Feb"],
                "datasets": [{
                    "label": "Anomaly Score",
                    "data": [0.1, 0.2],
                    "borderColor": "#f59e0b",
                    "backgroundColor": "rgba(245, 158, 11, 0.1)"
                }]
            })
        );
    }

    #[test]
    fn test_outline_has_no_fill() {
        let value = serde_json::to_value(Dataset::outline("x", vec![], Palette::Red)).unwrap();
        assert!(value.get("backgroundColor").is_none());
    }
}
