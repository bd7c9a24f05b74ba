//! Chart specification data model.
//!
//! Everything here serializes straight into the Vega-Lite JSON shape, so a
//! [`ChartSpec`] can be handed to `vega-embed` without post-processing.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Measurement type of a field, as understood by the renderer.
///
/// Tokens outside the four known types are carried verbatim in
/// [`DataType::Other`] and written to the output untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Quantitative,
    Nominal,
    Ordinal,
    Temporal,
    Other(String),
}

impl DataType {
    pub const KNOWN: [DataType; 4] = [
        DataType::Quantitative,
        DataType::Nominal,
        DataType::Ordinal,
        DataType::Temporal,
    ];

    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "quantitative" => Self::Quantitative,
            "nominal" => Self::Nominal,
            "ordinal" => Self::Ordinal,
            "temporal" => Self::Temporal,
            _ => Self::Other(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Quantitative => "quantitative",
            Self::Nominal => "nominal",
            Self::Ordinal => "ordinal",
            Self::Temporal => "temporal",
            Self::Other(token) => token,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reduction applied to grouped rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AggregateFn {
    #[default]
    Count,
    Sum,
    Mean,
    Median,
    Min,
    Max,
    Other(String),
}

impl AggregateFn {
    pub const KNOWN: [AggregateFn; 6] = [
        AggregateFn::Count,
        AggregateFn::Sum,
        AggregateFn::Mean,
        AggregateFn::Median,
        AggregateFn::Min,
        AggregateFn::Max,
    ];

    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "count" => Self::Count,
            "sum" => Self::Sum,
            "mean" => Self::Mean,
            "median" => Self::Median,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => Self::Other(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
            Self::Other(token) => token,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Name with the first letter upper-cased and the rest lower-cased,
    /// e.g. `"Mean"`. Used for axis titles.
    pub fn display_name(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

impl Serialize for AggregateFn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Geometric primitive drawn for each datum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bar,
    Area,
    Line,
    Point,
    Circle,
    Boxplot,
    Rect,
    Arc,
}

/// Which encoding builder handles a chart kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    Standard,
    Histogram,
    Pie,
}

/// Bin parameters for a binned position channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinSpec {
    Step(f64),
    MaxBins(u32),
}

// Largest integer an f64 holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl Serialize for BinSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match *self {
            // Whole steps are written as integers so `5` stays `5`, not `5.0`.
            BinSpec::Step(step) if step.fract() == 0.0 && step.abs() <= MAX_EXACT_INT => {
                map.serialize_entry("step", &(step as i64))?;
            }
            BinSpec::Step(step) => map.serialize_entry("step", &step)?,
            BinSpec::MaxBins(bins) => map.serialize_entry("maxbins", &bins)?,
        }
        map.end()
    }
}

/// Per-channel data transform. A channel is either binned or aggregated,
/// never both.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelTransform {
    Aggregate(AggregateFn),
    Bin(BinSpec),
}

/// A single encoding channel, e.g. `{"field": "x", "type": "quantitative"}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EncodingChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(flatten)]
    pub transform: Option<ChannelTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl EncodingChannel {
    /// Channel bound to a raw field.
    pub fn field(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field: Some(name.into()),
            data_type: Some(data_type),
            transform: None,
            title: None,
        }
    }

    /// Field-less channel that only carries a reduction (e.g. `count`).
    pub fn aggregate(function: AggregateFn) -> Self {
        Self {
            field: None,
            data_type: None,
            transform: Some(ChannelTransform::Aggregate(function)),
            title: None,
        }
    }

    pub fn with_bin(mut self, bin: BinSpec) -> Self {
        self.transform = Some(ChannelTransform::Bin(bin));
        self
    }

    pub fn with_aggregate(mut self, function: AggregateFn) -> Self {
        self.transform = Some(ChannelTransform::Aggregate(function));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn bin(&self) -> Option<&BinSpec> {
        match &self.transform {
            Some(ChannelTransform::Bin(bin)) => Some(bin),
            _ => None,
        }
    }

    pub fn aggregate_fn(&self) -> Option<&AggregateFn> {
        match &self.transform {
            Some(ChannelTransform::Aggregate(function)) => Some(function),
            _ => None,
        }
    }
}

/// Channel map of a chart.
///
/// Only constructible through [`Encoding::cartesian`] and [`Encoding::radial`],
/// which derive `tooltip` from the active channels so it can never drift.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<EncodingChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<EncodingChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theta: Option<EncodingChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<EncodingChannel>,
    tooltip: Vec<EncodingChannel>,
}

impl Encoding {
    /// x/y encoding; tooltip is `[x, y, color?]`.
    pub fn cartesian(
        x: EncodingChannel,
        y: EncodingChannel,
        color: Option<EncodingChannel>,
    ) -> Self {
        let mut tooltip = vec![x.clone(), y.clone()];
        tooltip.extend(color.clone());
        Self {
            x: Some(x),
            y: Some(y),
            theta: None,
            color,
            tooltip,
        }
    }

    /// theta/color encoding; tooltip is `[slice, theta]`.
    pub fn radial(theta: EncodingChannel, slice: EncodingChannel) -> Self {
        let tooltip = vec![slice.clone(), theta.clone()];
        Self {
            x: None,
            y: None,
            theta: Some(theta),
            color: Some(slice),
            tooltip,
        }
    }

    pub fn x(&self) -> Option<&EncodingChannel> {
        self.x.as_ref()
    }

    pub fn y(&self) -> Option<&EncodingChannel> {
        self.y.as_ref()
    }

    pub fn theta(&self) -> Option<&EncodingChannel> {
        self.theta.as_ref()
    }

    pub fn color(&self) -> Option<&EncodingChannel> {
        self.color.as_ref()
    }

    pub fn tooltip(&self) -> &[EncodingChannel] {
        &self.tooltip
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub stroke_width: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisConfig {
    pub grid: bool,
}

/// Top-level `config` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Config {
    pub view: ViewConfig,
    /// Absent for charts without positional axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisConfig>,
}

/// Width or height of the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    /// Fill the embedding element (`"container"`).
    Container,
    Pixels(u32),
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Size::Container => serializer.serialize_str("container"),
            Size::Pixels(px) => serializer.serialize_u32(*px),
        }
    }
}

/// Sizing and title, flattened into the top level of the spec.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Properties {
    pub width: Size,
    pub height: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataSource {
    pub url: String,
}

/// A complete, immutable Vega-Lite specification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<DataSource>,
    mark: Mark,
    encoding: Encoding,
    config: Config,
    #[serde(flatten)]
    properties: Properties,
}

impl ChartSpec {
    pub(crate) fn new(
        schema: String,
        data: Option<DataSource>,
        mark: Mark,
        encoding: Encoding,
        config: Config,
        properties: Properties,
    ) -> Self {
        Self {
            schema,
            data,
            mark,
            encoding,
            config,
            properties,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn data(&self) -> Option<&DataSource> {
        self.data.as_ref()
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn to_value(&self) -> crate::Result<serde_json::Value> {
        use error_stack::ResultExt;

        serde_json::to_value(self).change_context(crate::SpecError::Serialization)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        use error_stack::ResultExt;

        serde_json::to_string(self)
            .change_context(crate::SpecError::Serialization)
            .attach(format!("mark: {:?}", self.mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_type_tokens() {
        assert_eq!(DataType::from_token("Temporal"), DataType::Temporal);
        assert_eq!(
            DataType::from_token("banana"),
            DataType::Other("banana".into())
        );
        assert_eq!(DataType::Other("banana".into()).as_str(), "banana");
        assert!(DataType::KNOWN.iter().all(DataType::is_known));
    }

    #[test]
    fn test_aggregate_display_name() {
        assert_eq!(AggregateFn::Mean.display_name(), "Mean");
        assert_eq!(AggregateFn::Count.display_name(), "Count");
        assert_eq!(AggregateFn::from_token("sUM").display_name(), "Sum");
        assert_eq!(AggregateFn::Other("stdev".into()).display_name(), "Stdev");
        assert_eq!(AggregateFn::Other(String::new()).display_name(), "");
    }

    #[test]
    fn test_bin_serialization() {
        assert_eq!(
            serde_json::to_value(BinSpec::Step(5.0)).unwrap(),
            json!({"step": 5})
        );
        assert_eq!(
            serde_json::to_value(BinSpec::Step(2.5)).unwrap(),
            json!({"step": 2.5})
        );
        assert_eq!(
            serde_json::to_value(BinSpec::MaxBins(20)).unwrap(),
            json!({"maxbins": 20})
        );
    }

    #[test]
    fn test_channel_serialization() {
        let plain = EncodingChannel::field("x", DataType::Quantitative);
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"field": "x", "type": "quantitative"})
        );

        let binned = plain.with_bin(BinSpec::Step(10.0));
        assert_eq!(
            serde_json::to_value(&binned).unwrap(),
            json!({"field": "x", "type": "quantitative", "bin": {"step": 10}})
        );

        let counted = EncodingChannel::aggregate(AggregateFn::Count).with_title("Count of Records");
        assert_eq!(
            serde_json::to_value(&counted).unwrap(),
            json!({"aggregate": "count", "title": "Count of Records"})
        );
    }

    #[test]
    fn test_transform_replaces_previous() {
        let channel = EncodingChannel::field("v", DataType::Quantitative)
            .with_bin(BinSpec::MaxBins(20))
            .with_aggregate(AggregateFn::Sum);
        assert!(channel.bin().is_none());
        assert_eq!(channel.aggregate_fn(), Some(&AggregateFn::Sum));
    }

    #[test]
    fn test_cartesian_tooltip_mirrors_channels() {
        let x = EncodingChannel::field("a", DataType::Nominal);
        let y = EncodingChannel::field("b", DataType::Quantitative);
        let color = EncodingChannel::field("c", DataType::Nominal);

        let encoding = Encoding::cartesian(x.clone(), y.clone(), Some(color.clone()));
        assert_eq!(encoding.tooltip(), &[x.clone(), y.clone(), color][..]);

        let encoding = Encoding::cartesian(x.clone(), y.clone(), None);
        assert_eq!(encoding.tooltip(), &[x, y][..]);
        assert!(encoding.color().is_none());
    }

    #[test]
    fn test_size_serialization() {
        assert_eq!(serde_json::to_value(Size::Container).unwrap(), json!("container"));
        assert_eq!(serde_json::to_value(Size::Pixels(300)).unwrap(), json!(300));
    }
}
