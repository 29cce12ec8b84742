use std::fmt;

use crate::geodesy::{Coordinate, Located};

use super::fuel_type::{FuelAvailability, FuelType};
use super::parse_number;
use super::planner_error::PlannerError;

/// Represents an airport with its ICAO code, position, radio frequency and the fuel it sells.
///
/// Two airports are the same airport when their ICAO codes match, ignoring case.
#[derive(Clone, Debug)]
pub struct Airport {
    pub airport_id: String,
    pub name: String,
    pub icao: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_ft: f64,
    pub radio_frequency: f64,
    pub region_state: String,
    pub region_abbr: String,
    pub city: String,
    pub iata_code: String,
    pub fuel_types: FuelAvailability,
}

impl Airport {
    pub fn new(
        name: String,
        icao: String,
        latitude: f64,
        longitude: f64,
        radio_frequency: f64,
        fuel_types: FuelAvailability,
    ) -> Self {
        Airport {
            name,
            icao,
            latitude,
            longitude,
            radio_frequency,
            fuel_types,
            ..Airport::default()
        }
    }

    /// Updates one field from its textual value. The airport is left untouched on error.
    ///
    /// Accepted fields: `name`, `icao`, `latitude`, `longitude`, `elevation`, `frequency`,
    /// `state`, `region`, `city`, `iata`, `fuel`.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), PlannerError> {
        let text = value.trim().to_string();
        match field.trim().to_lowercase().as_str() {
            "name" => self.name = text,
            "icao" => {
                if text.is_empty() {
                    return Err(PlannerError::InvalidInput(
                        "ICAO code cannot be empty".to_string(),
                    ));
                }
                self.icao = text;
            }
            "latitude" | "lat" => {
                let latitude = parse_number(field, value)?;
                if !(-90.0..=90.0).contains(&latitude) {
                    return Err(PlannerError::InvalidInput(format!(
                        "latitude {} is out of range",
                        latitude
                    )));
                }
                self.latitude = latitude;
            }
            "longitude" | "lon" => {
                let longitude = parse_number(field, value)?;
                if !(-180.0..=180.0).contains(&longitude) {
                    return Err(PlannerError::InvalidInput(format!(
                        "longitude {} is out of range",
                        longitude
                    )));
                }
                self.longitude = longitude;
            }
            "elevation" => self.elevation_ft = parse_number(field, value)?,
            "frequency" | "freq" => self.radio_frequency = parse_number(field, value)?,
            "state" => self.region_state = text,
            "region" => self.region_abbr = text,
            "city" => self.city = text,
            "iata" => self.iata_code = text,
            "fuel" => self.fuel_types = value.parse()?,
            other => {
                return Err(PlannerError::InvalidInput(format!(
                    "unknown airport field '{}'",
                    other
                )))
            }
        }
        Ok(())
    }

    pub fn has_icao(&self, icao: &str) -> bool {
        self.icao.trim().eq_ignore_ascii_case(icao.trim())
    }

    pub fn sells(&self, fuel: FuelType) -> bool {
        self.fuel_types.contains(fuel)
    }
}

impl Located for Airport {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl PartialEq for Airport {
    fn eq(&self, other: &Self) -> bool {
        self.has_icao(&other.icao)
    }
}

impl Default for Airport {
    fn default() -> Self {
        Airport {
            airport_id: String::new(),
            name: "Default Airport".to_string(),
            icao: "XXXX".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            elevation_ft: 0.0,
            radio_frequency: 0.0,
            region_state: String::new(),
            region_abbr: String::new(),
            city: String::new(),
            iata_code: String::new(),
            fuel_types: FuelAvailability::none(),
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.icao)
    }
}
