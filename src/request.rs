//! Chart requests and the flat parameter boundary.
//!
//! A [`ChartRequest`] is built once per call, either from a flat
//! `name -> value` parameter map ([`ChartRequest::from_params`]) or through the
//! fluent builder methods. Optional strings are normalized here so the
//! builders downstream never have to tell "absent" from "empty".

use std::collections::HashMap;

use error_stack::Report;
use tracing::debug;

use crate::SpecError;
use crate::catalog::Catalog;
use crate::core::{AggregateFn, DataType, EncodingChannel, HandlerKind};

pub const DEFAULT_CHART_TYPE: &str = "line";
pub const DEFAULT_BIN_STEP: f64 = 10.0;

/// Recognized parameter keys. Where two keys are listed the first one wins.
pub mod keys {
    pub const TYPE: &[&str] = &["type"];
    pub const X: &[&str] = &["x", "x_field"];
    pub const X_TYPE: &[&str] = &["xType", "x_type"];
    pub const Y: &[&str] = &["y", "y_field"];
    pub const Y_TYPE: &[&str] = &["yType", "y_type"];
    pub const COLOR: &[&str] = &["color", "color_field"];
    pub const COLOR_TYPE: &[&str] = &["colorType", "color_type"];
    pub const SLICE: &[&str] = &["slice_field"];
    pub const SLICE_TYPE: &[&str] = &["slice_type"];
    pub const VALUE: &[&str] = &["value_field"];
    pub const VALUE_TYPE: &[&str] = &["value_type"];
    pub const AGGREGATE: &[&str] = &["aggregate_function"];
    pub const BIN_STEP: &[&str] = &["bin_step"];
    pub const TITLE: &[&str] = &["title"];
}

/// A field name paired with its measurement type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRef {
    pub name: String,
    pub data_type: DataType,
}

impl FieldRef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    /// Plain `{field, type}` channel for this field.
    pub fn channel(&self) -> EncodingChannel {
        EncodingChannel::field(self.name.clone(), self.data_type.clone())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartRequest {
    chart_type: String,
    x: FieldRef,
    y: FieldRef,
    color: Option<FieldRef>,
    slice: FieldRef,
    value: FieldRef,
    title: Option<String>,
    aggregate: AggregateFn,
    bin_step: f64,
    data_url: Option<String>,
}

impl ChartRequest {
    /// A request for `chart_type` with every other parameter at its default.
    pub fn new(chart_type: impl Into<String>) -> Self {
        Self {
            chart_type: chart_type.into(),
            x: FieldRef::new("x", DataType::Quantitative),
            y: FieldRef::new("y", DataType::Quantitative),
            color: None,
            slice: FieldRef::new("category", DataType::Nominal),
            value: FieldRef::new("value", DataType::Quantitative),
            title: None,
            aggregate: AggregateFn::Count,
            bin_step: DEFAULT_BIN_STEP,
            data_url: None,
        }
    }

    /// Build a request from untrusted boundary parameters. Never fails:
    /// anything missing or malformed falls back to its default.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let get = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| params.get(*name).map(String::as_str))
        };
        // Blank enumerated tokens count as missing, not as a passthrough value.
        let token = |names: &[&str]| get(names).filter(|value| !value.trim().is_empty());
        let data_type = |names: &[&str], default: DataType| {
            token(names).map(DataType::from_token).unwrap_or(default)
        };

        let color_type = data_type(keys::COLOR_TYPE, DataType::Nominal);
        let mut request = Self::new(get(keys::TYPE).unwrap_or(DEFAULT_CHART_TYPE))
            .x(
                get(keys::X).unwrap_or("x"),
                data_type(keys::X_TYPE, DataType::Quantitative),
            )
            .y(
                get(keys::Y).unwrap_or("y"),
                data_type(keys::Y_TYPE, DataType::Quantitative),
            )
            .slice(
                get(keys::SLICE).unwrap_or("category"),
                data_type(keys::SLICE_TYPE, DataType::Nominal),
            )
            .value(
                get(keys::VALUE).unwrap_or("value"),
                data_type(keys::VALUE_TYPE, DataType::Quantitative),
            )
            .bin_step(parse_bin_step(get(keys::BIN_STEP)));

        if let Some(color) = get(keys::COLOR) {
            request = request.color(color, color_type);
        }
        if let Some(function) = token(keys::AGGREGATE) {
            request = request.aggregate(AggregateFn::from_token(function));
        }
        if let Some(title) = get(keys::TITLE) {
            request = request.title(title);
        }
        request
    }

    pub fn x(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.x = FieldRef::new(name, data_type);
        self
    }

    pub fn y(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.y = FieldRef::new(name, data_type);
        self
    }

    /// Set the color field. A blank name clears it.
    pub fn color(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.color = non_blank(name.into()).map(|name| FieldRef::new(name, data_type));
        self
    }

    pub fn slice(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.slice = FieldRef::new(name, data_type);
        self
    }

    pub fn value(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.value = FieldRef::new(name, data_type);
        self
    }

    /// Set the title. A blank title clears it.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = non_blank(title.into());
        self
    }

    pub fn aggregate(mut self, function: AggregateFn) -> Self {
        self.aggregate = function;
        self
    }

    /// Non-finite steps are replaced with [`DEFAULT_BIN_STEP`].
    pub fn bin_step(mut self, step: f64) -> Self {
        self.bin_step = if step.is_finite() {
            step
        } else {
            DEFAULT_BIN_STEP
        };
        self
    }

    /// URL the renderer loads rows from, emitted as `data.url`.
    pub fn data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = non_blank(url.into());
        self
    }

    pub fn chart_type(&self) -> &str {
        &self.chart_type
    }

    pub fn x_field(&self) -> &FieldRef {
        &self.x
    }

    pub fn y_field(&self) -> &FieldRef {
        &self.y
    }

    pub fn color_field(&self) -> Option<&FieldRef> {
        self.color.as_ref()
    }

    pub fn slice_field(&self) -> &FieldRef {
        &self.slice
    }

    pub fn value_field(&self) -> &FieldRef {
        &self.value
    }

    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn aggregate_fn(&self) -> &AggregateFn {
        &self.aggregate
    }

    pub fn bin_step_value(&self) -> f64 {
        self.bin_step
    }

    pub fn data_url_value(&self) -> Option<&str> {
        self.data_url.as_deref()
    }

    /// Strict check that the chart type, the data types of the fields the
    /// chart actually uses, and (for aggregating charts) the aggregate
    /// function are all in the catalog. The builder never calls this; it is
    /// for callers that want to fail closed instead of passing tokens through.
    pub fn validate(&self, catalog: &Catalog) -> crate::Result<()> {
        let kind = catalog.lookup(&self.chart_type).ok_or_else(|| {
            Report::new(SpecError::UnsupportedChartType)
                .attach(format!("type: {:?}", self.chart_type))
        })?;

        let (fields, aggregates): (Vec<(&str, &FieldRef)>, bool) = match kind.handler {
            HandlerKind::Standard => {
                let mut fields = vec![("x", &self.x), ("y", &self.y)];
                fields.extend(self.color.as_ref().map(|color| ("color", color)));
                (fields, false)
            }
            HandlerKind::Histogram => {
                let mut fields = vec![("x", &self.x)];
                fields.extend(self.color.as_ref().map(|color| ("color", color)));
                (fields, true)
            }
            HandlerKind::Pie => (vec![("slice", &self.slice), ("value", &self.value)], true),
        };

        for (channel, field) in fields {
            if !catalog.supports_data_type(&field.data_type) {
                return Err(Report::new(SpecError::InvalidDataType).attach(format!(
                    "{channel} type: {:?}",
                    field.data_type.as_str()
                )));
            }
        }

        if aggregates && !catalog.supports_aggregate(&self.aggregate) {
            return Err(Report::new(SpecError::InvalidAggregate)
                .attach(format!("aggregate_function: {:?}", self.aggregate.as_str())));
        }

        Ok(())
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parse a `bin_step` parameter. Missing, unparsable, and non-finite values
/// all become [`DEFAULT_BIN_STEP`]; the sign is kept so the histogram builder
/// can switch to `maxbins` for non-positive steps.
pub fn parse_bin_step(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return DEFAULT_BIN_STEP;
    };
    match raw.trim().parse::<f64>() {
        Ok(step) if step.is_finite() => step,
        _ => {
            debug!(bin_step = raw, "unparsable bin_step, using default");
            DEFAULT_BIN_STEP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_from_empty_params() {
        let request = ChartRequest::from_params(&HashMap::new());
        assert_eq!(request.chart_type(), "line");
        assert_eq!(request.x_field(), &FieldRef::new("x", DataType::Quantitative));
        assert_eq!(request.y_field(), &FieldRef::new("y", DataType::Quantitative));
        assert!(request.color_field().is_none());
        assert!(request.title_text().is_none());
        assert_eq!(request.aggregate_fn(), &AggregateFn::Count);
        assert_eq!(request.bin_step_value(), 10.0);
    }

    #[test]
    fn test_aliases() {
        let request = ChartRequest::from_params(&params(&[
            ("x_field", "date"),
            ("x_type", "temporal"),
            ("yType", "ordinal"),
            ("color_field", "category"),
        ]));
        assert_eq!(request.x_field(), &FieldRef::new("date", DataType::Temporal));
        assert_eq!(request.y_field().data_type, DataType::Ordinal);
        assert_eq!(
            request.color_field(),
            Some(&FieldRef::new("category", DataType::Nominal))
        );
    }

    #[test]
    fn test_primary_key_wins_over_alias() {
        let request = ChartRequest::from_params(&params(&[("x", "a"), ("x_field", "b")]));
        assert_eq!(request.x_field().name, "a");
    }

    #[test]
    fn test_blank_optionals_are_absent() {
        let request = ChartRequest::from_params(&params(&[("color", ""), ("title", "   ")]));
        assert!(request.color_field().is_none());
        assert!(request.title_text().is_none());

        let request = ChartRequest::new("bar")
            .color("c", DataType::Nominal)
            .color("", DataType::Nominal);
        assert!(request.color_field().is_none());
    }

    #[test]
    fn test_parse_bin_step() {
        assert_eq!(parse_bin_step(None), 10.0);
        assert_eq!(parse_bin_step(Some("5")), 5.0);
        assert_eq!(parse_bin_step(Some(" 2.5 ")), 2.5);
        assert_eq!(parse_bin_step(Some("abc")), 10.0);
        assert_eq!(parse_bin_step(Some("")), 10.0);
        assert_eq!(parse_bin_step(Some("NaN")), 10.0);
        assert_eq!(parse_bin_step(Some("inf")), 10.0);
        assert_eq!(parse_bin_step(Some("0")), 0.0);
        assert_eq!(parse_bin_step(Some("-3")), -3.0);
    }

    #[test]
    fn test_builder_bin_step_rejects_non_finite() {
        let request = ChartRequest::new("histogram").bin_step(f64::NAN);
        assert_eq!(request.bin_step_value(), 10.0);
        let request = ChartRequest::new("histogram").bin_step(-1.0);
        assert_eq!(request.bin_step_value(), -1.0);
    }

    #[test]
    fn test_blank_tokens_use_defaults() {
        let request = ChartRequest::from_params(&params(&[
            ("aggregate_function", ""),
            ("xType", ""),
            ("yType", "  "),
            ("color", "category"),
            ("colorType", ""),
            ("slice_type", ""),
            ("value_type", " "),
        ]));
        assert_eq!(request.aggregate_fn(), &AggregateFn::Count);
        assert_eq!(request.x_field().data_type, DataType::Quantitative);
        assert_eq!(request.y_field().data_type, DataType::Quantitative);
        assert_eq!(request.color_field().unwrap().data_type, DataType::Nominal);
        assert_eq!(request.slice_field().data_type, DataType::Nominal);
        assert_eq!(request.value_field().data_type, DataType::Quantitative);
    }

    #[test]
    fn test_blank_alias_does_not_shadow_default() {
        let request = ChartRequest::from_params(&params(&[("x_type", "")]));
        assert_eq!(request.x_field().data_type, DataType::Quantitative);
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let request = ChartRequest::from_params(&params(&[
            ("xType", "geojson"),
            ("aggregate_function", "stdev"),
        ]));
        assert_eq!(request.x_field().data_type, DataType::Other("geojson".into()));
        assert_eq!(request.aggregate_fn(), &AggregateFn::Other("stdev".into()));
    }

    #[test]
    fn test_validate_accepts_known_tokens() {
        let catalog = Catalog::new();
        let request = ChartRequest::from_params(&params(&[
            ("type", "histogram"),
            ("aggregate_function", "mean"),
            ("color", "category"),
        ]));
        assert!(request.validate(&catalog).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_chart_type() {
        let err = ChartRequest::new("bogus").validate(&Catalog::new()).unwrap_err();
        assert_eq!(err.current_context(), &SpecError::UnsupportedChartType);
    }

    #[test]
    fn test_validate_rejects_bad_data_type() {
        let request = ChartRequest::new("bar").y("y", DataType::Other("numberish".into()));
        let err = request.validate(&Catalog::new()).unwrap_err();
        assert_eq!(err.current_context(), &SpecError::InvalidDataType);
    }

    #[test]
    fn test_validate_only_checks_active_fields() {
        // Pie charts ignore x/y, so a bad x type is not an error there.
        let request = ChartRequest::new("pie").x("x", DataType::Other("junk".into()));
        assert!(request.validate(&Catalog::new()).is_ok());

        let request = ChartRequest::new("line").aggregate(AggregateFn::Other("junk".into()));
        assert!(request.validate(&Catalog::new()).is_ok());

        let request = ChartRequest::new("pie").aggregate(AggregateFn::Other("junk".into()));
        let err = request.validate(&Catalog::new()).unwrap_err();
        assert_eq!(err.current_context(), &SpecError::InvalidAggregate);
    }
}
