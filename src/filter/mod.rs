use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::query::QueryMap;

pub const LOCATION: &str = "location";
pub const PROPERTY_TYPE: &str = "propertyType";
pub const MIN_PRICE: &str = "minPrice";
pub const MAX_PRICE: &str = "maxPrice";
pub const MIN_AREA: &str = "minArea";
pub const MAX_AREA: &str = "maxArea";
pub const FLOOR: &str = "floor";
pub const BUILDER: &str = "builder";
pub const POSSESSION_DATE: &str = "possessionDate";
pub const BEDROOMS: &str = "bedrooms";
pub const KEYWORDS: &str = "keywords";
pub const PINCODE: &str = "pincode";
pub const PROPERTY_STATUS: &str = "propertyStatus";

/// Search query over property listings.
///
/// Every field is optional; the default value matches all listings.
/// List fields keep the order values were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub location: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_type: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    /// Sq. ft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<i64>,
    /// Sq. ft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub builder: Vec<String>,
    /// Opaque label such as `"2026 Q3"`
    #[serde(skip_serializing_if = "is_blank")]
    pub possession_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bedrooms: Vec<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_status: Vec<String>,
}

/// Input value dropped while building a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterWarning {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignoring malformed {} value {:?}", self.field, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("{min_field} ({min}) is greater than {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: i64,
        max: i64,
    },
}

impl PropertyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from decoded query parameters or form fields.
    ///
    /// Unknown keys are dropped. Numbers that fail to parse are left out of
    /// the filter and reported in the returned warnings.
    pub fn from_query(query: &QueryMap) -> (Self, Vec<FilterWarning>) {
        let mut filter = Self::default();
        let mut warnings = Vec::new();

        for (key, value) in query.iter() {
            let values = value.values();
            match key {
                LOCATION => filter.location.extend_from_slice(values),
                PROPERTY_TYPE => filter.property_type.extend_from_slice(values),
                BUILDER => filter.builder.extend_from_slice(values),
                BEDROOMS => filter.bedrooms.extend_from_slice(values),
                PROPERTY_STATUS => filter.property_status.extend_from_slice(values),
                MIN_PRICE => filter.min_price = parse_number(MIN_PRICE, values, &mut warnings),
                MAX_PRICE => filter.max_price = parse_number(MAX_PRICE, values, &mut warnings),
                MIN_AREA => filter.min_area = parse_number(MIN_AREA, values, &mut warnings),
                MAX_AREA => filter.max_area = parse_number(MAX_AREA, values, &mut warnings),
                FLOOR => filter.floor = parse_number(FLOOR, values, &mut warnings),
                POSSESSION_DATE => filter.possession_date = first_text(values),
                KEYWORDS => filter.keywords = first_text(values),
                PINCODE => filter.pincode = first_text(values),
                other => debug!("Dropping unrecognized filter key {:?}", other),
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        (filter, warnings)
    }

    /// Shorthand for [`PropertyFilter::from_query`] over a raw query string
    pub fn from_query_string(input: &str) -> (Self, Vec<FilterWarning>) {
        Self::from_query(&QueryMap::parse(input))
    }

    /// Query parameters for this filter, absent fields omitted
    pub fn to_query(&self) -> QueryMap {
        let mut query = QueryMap::new();
        query.append_all(LOCATION, self.location.iter().cloned());
        query.append_all(PROPERTY_TYPE, self.property_type.iter().cloned());
        query.append_opt(MIN_PRICE, self.min_price);
        query.append_opt(MAX_PRICE, self.max_price);
        query.append_opt(MIN_AREA, self.min_area);
        query.append_opt(MAX_AREA, self.max_area);
        query.append_opt(FLOOR, self.floor);
        query.append_all(BUILDER, self.builder.iter().cloned());
        query.append_opt(POSSESSION_DATE, non_blank(&self.possession_date));
        query.append_all(BEDROOMS, self.bedrooms.iter().cloned());
        query.append_opt(KEYWORDS, non_blank(&self.keywords));
        query.append_opt(PINCODE, non_blank(&self.pincode));
        query.append_all(PROPERTY_STATUS, self.property_status.iter().cloned());
        query
    }

    pub fn to_query_string(&self) -> String {
        self.to_query().encode()
    }

    /// Check the price and area bounds are not inverted
    pub fn validate(&self) -> Result<(), FilterError> {
        check_range(MIN_PRICE, self.min_price, MAX_PRICE, self.max_price)?;
        check_range(MIN_AREA, self.min_area, MAX_AREA, self.max_area)
    }

    /// Whether this filter matches every listing
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location.push(location.into());
        self
    }

    pub fn property_type(mut self, code: impl Into<String>) -> Self {
        self.property_type.push(code.into());
        self
    }

    pub fn builder(mut self, builder: impl Into<String>) -> Self {
        self.builder.push(builder.into());
        self
    }

    pub fn bedrooms(mut self, code: impl Into<String>) -> Self {
        self.bedrooms.push(code.into());
        self
    }

    pub fn property_status(mut self, status: impl Into<String>) -> Self {
        self.property_status.push(status.into());
        self
    }

    pub fn price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn area_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    pub fn floor(mut self, floor: i64) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn possession_date(mut self, label: impl Into<String>) -> Self {
        self.possession_date = text(label.into());
        self
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = text(keywords.into());
        self
    }

    pub fn pincode(mut self, pincode: impl Into<String>) -> Self {
        self.pincode = text(pincode.into());
        self
    }
}

// Scalar keys take their first value.
fn parse_number(
    field: &'static str,
    values: &[String],
    warnings: &mut Vec<FilterWarning>,
) -> Option<i64> {
    let raw = values.first()?;
    match raw.trim().parse() {
        Ok(number) => Some(number),
        Err(_) => {
            warnings.push(FilterWarning {
                field,
                value: raw.clone(),
            });
            None
        }
    }
}

// Empty text means "not set" in every encoding of a filter.
fn first_text(values: &[String]) -> Option<String> {
    values.first().cloned().and_then(text)
}

fn text(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    non_blank(value).is_none()
}

fn check_range(
    min_field: &'static str,
    min: Option<i64>,
    max_field: &'static str,
    max: Option<i64>,
) -> Result<(), FilterError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(FilterError::InvertedRange {
            min_field,
            max_field,
            min,
            max,
        }),
        _ => Ok(()),
    }
}
