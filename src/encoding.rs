//! Encoding for standard x/y charts (bar, line, area, point, boxplot, heatmap).

use crate::core::Encoding;
use crate::request::ChartRequest;

/// `x`, `y`, optional `color`, and a tooltip mirroring them. No binning or
/// aggregation.
pub fn standard(request: &ChartRequest) -> Encoding {
    Encoding::cartesian(
        request.x_field().channel(),
        request.y_field().channel(),
        request.color_field().map(|color| color.channel()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;
    use serde_json::json;

    #[test]
    fn test_without_color() {
        let encoding = standard(&ChartRequest::new("line"));
        assert_eq!(
            serde_json::to_value(&encoding).unwrap(),
            json!({
                "x": {"field": "x", "type": "quantitative"},
                "y": {"field": "y", "type": "quantitative"},
                "tooltip": [
                    {"field": "x", "type": "quantitative"},
                    {"field": "y", "type": "quantitative"}
                ]
            })
        );
    }

    #[test]
    fn test_with_color() {
        let request = ChartRequest::new("bar")
            .x("date", DataType::Temporal)
            .y("value", DataType::Quantitative)
            .color("category", DataType::Nominal);
        let encoding = standard(&request);

        let color = encoding.color().unwrap();
        assert_eq!(color.field.as_deref(), Some("category"));
        assert_eq!(encoding.tooltip().len(), 3);
        assert_eq!(encoding.tooltip()[0].field.as_deref(), Some("date"));
        assert_eq!(encoding.tooltip()[2], *color);
    }

    #[test]
    fn test_no_transforms() {
        let request = ChartRequest::new("point").color("c", DataType::Ordinal);
        let encoding = standard(&request);
        assert!(encoding.tooltip().iter().all(|c| c.transform.is_none()));
        assert!(encoding.theta().is_none());
    }

    #[test]
    fn test_tooltip_uses_requested_fields() {
        let request = ChartRequest::new("area")
            .x("when", DataType::Temporal)
            .y("how_many", DataType::Quantitative);
        let value = serde_json::to_value(standard(&request)).unwrap();
        assert_eq!(value["tooltip"][0]["field"], "when");
        assert_eq!(value["tooltip"][1]["field"], "how_many");
    }
}
