//! Gazetteer place records.

use serde::{Deserialize, Serialize};

use super::{GeoNameId, ParseError};

/// Number of tab-separated fields in a source row.
pub const FIELD_COUNT: usize = 19;

/// A single gazetteer row.
///
/// Records are created once when the dataset is loaded and never change
/// afterwards. Several records may share a `name`.
///
/// On the wire fields are camelCase (`geoNameId`, `asciiName`, ...);
/// deserialization also accepts the snake_case names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    #[serde(alias = "geo_name_id")]
    pub geo_name_id: GeoNameId,
    pub name: String,
    #[serde(alias = "ascii_name")]
    pub ascii_name: String,
    #[serde(alias = "alternate_names")]
    pub alternate_names: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(alias = "feature_class")]
    pub feature_class: String,
    #[serde(alias = "feature_code")]
    pub feature_code: String,
    #[serde(alias = "country_code")]
    pub country_code: String,
    #[serde(alias = "alt_country_code", alias = "altCc", alias = "alt_cc")]
    pub alt_country_code: String,
    #[serde(alias = "admin1_code")]
    pub admin1_code: String,
    #[serde(alias = "admin2_code")]
    pub admin2_code: String,
    #[serde(alias = "admin3_code")]
    pub admin3_code: String,
    #[serde(alias = "admin4_code")]
    pub admin4_code: String,
    pub population: i64,
    pub elevation: String,
    #[serde(alias = "digital_elevation_model", alias = "dem")]
    pub digital_elevation_model: String,
    /// IANA time-zone name, e.g. `Europe/Moscow`.
    pub timezone: String,
    #[serde(alias = "modification_date")]
    pub modification_date: String,
}

impl PlaceRecord {
    /// Create a record with the fields the query layer cares about.
    ///
    /// Administrative and descriptive fields are left empty.
    pub fn new(
        geo_name_id: i64,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        population: i64,
        timezone: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            geo_name_id: GeoNameId::new(geo_name_id),
            ascii_name: name.clone(),
            name,
            alternate_names: String::new(),
            latitude,
            longitude,
            feature_class: String::new(),
            feature_code: String::new(),
            country_code: String::new(),
            alt_country_code: String::new(),
            admin1_code: String::new(),
            admin2_code: String::new(),
            admin3_code: String::new(),
            admin4_code: String::new(),
            population,
            elevation: String::new(),
            digital_elevation_model: String::new(),
            timezone: timezone.into(),
            modification_date: String::new(),
        }
    }

    /// Parse one tab-separated source row.
    ///
    /// Fields are positional, in declaration order. `line` is the 1-based
    /// line number used in error messages. An empty population reads as 0.
    pub fn from_tsv_line(row: &str, line: usize) -> Result<Self, ParseError> {
        let row = row.strip_suffix('\r').unwrap_or(row);
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                line,
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        let invalid = |field: &'static str, value: &str| ParseError::InvalidField {
            line,
            field,
            value: value.to_string(),
        };

        let geo_name_id =
            GeoNameId::parse(fields[0]).map_err(|_| invalid("geoNameId", fields[0]))?;
        let latitude = fields[4]
            .parse::<f64>()
            .map_err(|_| invalid("latitude", fields[4]))?;
        let longitude = fields[5]
            .parse::<f64>()
            .map_err(|_| invalid("longitude", fields[5]))?;
        let population = match fields[14] {
            "" => 0,
            raw => raw
                .parse::<i64>()
                .map_err(|_| invalid("population", raw))?,
        };

        Ok(Self {
            geo_name_id,
            name: fields[1].to_string(),
            ascii_name: fields[2].to_string(),
            alternate_names: fields[3].to_string(),
            latitude,
            longitude,
            feature_class: fields[6].to_string(),
            feature_code: fields[7].to_string(),
            country_code: fields[8].to_string(),
            alt_country_code: fields[9].to_string(),
            admin1_code: fields[10].to_string(),
            admin2_code: fields[11].to_string(),
            admin3_code: fields[12].to_string(),
            admin4_code: fields[13].to_string(),
            population,
            elevation: fields[15].to_string(),
            digital_elevation_model: fields[16].to_string(),
            timezone: fields[17].to_string(),
            modification_date: fields[18].to_string(),
        })
    }
}
