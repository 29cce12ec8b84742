use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{open_if_exists, read_rows, write_rows, LoadReport};
use crate::types::airport::Airport;
use crate::types::planner_error::PlannerError;

pub const AIRPORT_HEADER: [&str; 12] = [
    "Airport ID",
    "Airport Name",
    "Latitude",
    "Longitude",
    "Elevation (Ft.)",
    "Frequency",
    "Region_State",
    "Region_Abbr.",
    "City",
    "ICAO",
    "iata_code",
    "Fuel Types",
];

/// One line of the airport database, in column order.
#[derive(Debug, Serialize, Deserialize)]
struct AirportRecord {
    airport_id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    elevation_ft: f64,
    radio_frequency: f64,
    region_state: String,
    region_abbr: String,
    city: String,
    icao: String,
    iata_code: String,
    fuel_types: String,
}

impl TryFrom<AirportRecord> for Airport {
    type Error = PlannerError;

    fn try_from(record: AirportRecord) -> Result<Self, Self::Error> {
        if record.icao.is_empty() {
            return Err(PlannerError::InvalidRecord(format!(
                "airport '{}' has no ICAO code",
                record.name
            )));
        }

        Ok(Airport {
            fuel_types: record.fuel_types.parse()?,
            airport_id: record.airport_id,
            name: record.name,
            icao: record.icao,
            latitude: record.latitude,
            longitude: record.longitude,
            elevation_ft: record.elevation_ft,
            radio_frequency: record.radio_frequency,
            region_state: record.region_state,
            region_abbr: record.region_abbr,
            city: record.city,
            iata_code: record.iata_code,
        })
    }
}

impl From<&Airport> for AirportRecord {
    fn from(airport: &Airport) -> Self {
        AirportRecord {
            airport_id: airport.airport_id.clone(),
            name: airport.name.clone(),
            latitude: airport.latitude,
            longitude: airport.longitude,
            elevation_ft: airport.elevation_ft,
            radio_frequency: airport.radio_frequency,
            region_state: airport.region_state.clone(),
            region_abbr: airport.region_abbr.clone(),
            city: airport.city.clone(),
            icao: airport.icao.clone(),
            iata_code: airport.iata_code.clone(),
            fuel_types: airport.fuel_types.code().to_string(),
        }
    }
}

/// The airport database: every known airport, optionally bound to the CSV file it came from.
#[derive(Debug, Default)]
pub struct AirportRegistry {
    airports: Vec<Airport>,
    path: Option<PathBuf>,
}

impl AirportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_airports(airports: Vec<Airport>) -> Self {
        AirportRegistry {
            airports,
            path: None,
        }
    }

    /// Loads the registry from `path`. A missing file gives an empty registry
    /// that will be created on the next [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, LoadReport), PlannerError> {
        let path = path.as_ref();
        let (mut registry, report) = match open_if_exists(path)? {
            Some(file) => Self::from_reader(file)?,
            None => (
                Self::new(),
                LoadReport {
                    missing_file: true,
                    ..LoadReport::default()
                },
            ),
        };
        registry.path = Some(path.to_path_buf());
        Ok((registry, report))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<(Self, LoadReport), PlannerError> {
        let (airports, report) = read_rows::<AirportRecord, Airport, R>(reader)?;
        Ok((Self::from_airports(airports), report))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the registry back to the file it was loaded from.
    pub fn save(&self) -> Result<(), PlannerError> {
        let path = self.path.as_ref().ok_or_else(|| {
            PlannerError::InvalidInput("the airport registry has no backing file".to_string())
        })?;
        self.save_to(path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), PlannerError> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), PlannerError> {
        write_rows(
            writer,
            &AIRPORT_HEADER,
            self.airports.iter().map(AirportRecord::from),
        )
    }

    pub fn add(&mut self, airport: Airport) {
        self.airports.push(airport);
    }

    /// Replaces the airport with code `icao` by `updated`.
    pub fn modify(&mut self, icao: &str, updated: Airport) -> Result<(), PlannerError> {
        let slot = self
            .airports
            .iter_mut()
            .find(|airport| airport.has_icao(icao))
            .ok_or_else(|| PlannerError::AirportNotFound(icao.to_string()))?;
        *slot = updated;
        Ok(())
    }

    /// Changes one field of the airport with code `icao`, see [`Airport::set_field`].
    pub fn modify_field(
        &mut self,
        icao: &str,
        field: &str,
        value: &str,
    ) -> Result<(), PlannerError> {
        let mut updated = self
            .find(icao)
            .cloned()
            .ok_or_else(|| PlannerError::AirportNotFound(icao.to_string()))?;
        updated.set_field(field, value)?;
        self.modify(icao, updated)
    }

    /// Removes every airport with code `icao` and returns how many were removed.
    pub fn remove(&mut self, icao: &str) -> Result<usize, PlannerError> {
        let before = self.airports.len();
        self.airports.retain(|airport| !airport.has_icao(icao));
        match before - self.airports.len() {
            0 => Err(PlannerError::AirportNotFound(icao.to_string())),
            removed => Ok(removed),
        }
    }

    pub fn find(&self, icao: &str) -> Option<&Airport> {
        self.airports.iter().find(|airport| airport.has_icao(icao))
    }

    /// Airports whose name contains `fragment`, ignoring case.
    pub fn search_by_name(&self, fragment: &str) -> Vec<&Airport> {
        let needle = fragment.trim().to_lowercase();
        self.airports
            .iter()
            .filter(|airport| airport.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// An immutable copy of the current airports that can be shared across threads.
    pub fn snapshot(&self) -> Arc<[Airport]> {
        Arc::from(self.airports.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fuel_type::{FuelAvailability, FuelType};

    const SAMPLE: &str = "\
Airport ID,Airport Name,Latitude,Longitude,Elevation (Ft.),Frequency,Region_State,Region_Abbr.,City,ICAO,iata_code,Fuel Types
1,John F Kennedy Intl,40.6413,-73.7781,13,119.1,New York,NY,New York,KJFK,JFK,3
// closed for the season
2,Los Angeles Intl,33.9416,-118.4085,125,133.9,California,CA,Los Angeles,KLAX,LAX,2.0

3,Broken Field,not-a-number,-80.0,10,122.8,Florida,FL,Nowhere,KBRK,BRK,1
4, Santa Monica Muni ,34.0158,-118.4513,177,120.1,California,CA,Santa Monica,KSMO,SMO,1
";

    fn sample_registry() -> (AirportRegistry, LoadReport) {
        AirportRegistry::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("planner_airports_{}.csv", name))
    }

    #[test]
    fn test_load_skips_comments_and_bad_rows() {
        let (registry, report) = sample_registry();

        assert_eq!(registry.len(), 3);
        assert_eq!(report.loaded, 3);
        assert_eq!(report.skipped.len(), 1);
        assert!(!report.missing_file);

        let jfk = registry.find("kjfk").unwrap();
        assert_eq!(jfk.name, "John F Kennedy Intl");
        assert_eq!(jfk.radio_frequency, 119.1);
        assert_eq!(jfk.fuel_types, FuelAvailability::both());

        let lax = registry.find("KLAX").unwrap();
        assert!(lax.sells(FuelType::JetA));
        assert!(!lax.sells(FuelType::Avgas));

        assert_eq!(registry.find("KSMO").unwrap().name, "Santa Monica Muni");
        assert!(registry.find("KBRK").is_none());
    }

    #[test]
    fn test_missing_file_gives_empty_registry() {
        let path = scratch_file("missing");
        let _ = std::fs::remove_file(&path);

        let (registry, report) = AirportRegistry::load(&path).unwrap();

        assert!(registry.is_empty());
        assert!(report.missing_file);
        assert_eq!(registry.path(), Some(path.as_path()));
    }

    #[test]
    fn test_save_and_reload() {
        let path = scratch_file("roundtrip");
        let (mut registry, _) = sample_registry();
        registry.add(Airport::new(
            "Teterboro".to_string(),
            "KTEB".to_string(),
            40.8501,
            -74.0608,
            119.5,
            FuelAvailability::both(),
        ));
        registry.save_to(&path).unwrap();

        let (reloaded, report) = AirportRegistry::load(&path).unwrap();

        assert_eq!(report.loaded, 4);
        assert!(report.skipped.is_empty());
        let teb = reloaded.find("KTEB").unwrap();
        assert_eq!(teb.latitude, 40.8501);
        assert_eq!(teb.fuel_types, FuelAvailability::both());
        assert_eq!(reloaded.find("KLAX").unwrap().city, "Los Angeles");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_registry_writes_header() {
        let mut out = Vec::new();
        AirportRegistry::new().write_to(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), AIRPORT_HEADER.join(","));
    }

    #[test]
    fn test_save_without_path_fails() {
        let registry = AirportRegistry::new();
        assert!(matches!(registry.save(), Err(PlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_modify_and_remove() {
        let (mut registry, _) = sample_registry();

        let mut updated = registry.find("KSMO").unwrap().clone();
        updated.radio_frequency = 123.3;
        registry.modify("ksmo", updated).unwrap();
        assert_eq!(registry.find("KSMO").unwrap().radio_frequency, 123.3);

        assert_eq!(registry.remove("KSMO").unwrap(), 1);
        assert!(registry.find("KSMO").is_none());

        assert!(matches!(
            registry.remove("KSMO"),
            Err(PlannerError::AirportNotFound(_))
        ));
        assert!(matches!(
            registry.modify("EGLL", Airport::default()),
            Err(PlannerError::AirportNotFound(_))
        ));
    }

    #[test]
    fn test_modify_field() {
        let (mut registry, _) = sample_registry();

        registry.modify_field("klax", "fuel", "Avgas;Jet A").unwrap();
        assert_eq!(registry.find("KLAX").unwrap().fuel_types, FuelAvailability::both());

        registry.modify_field("KSMO", "icao", "KSMX").unwrap();
        assert!(registry.find("KSMO").is_none());
        assert_eq!(registry.find("KSMX").unwrap().city, "Santa Monica");

        assert!(matches!(
            registry.modify_field("EGLL", "city", "London"),
            Err(PlannerError::AirportNotFound(_))
        ));
    }

    #[test]
    fn test_search_by_name() {
        let (registry, _) = sample_registry();

        let found: Vec<&str> = registry
            .search_by_name("intl")
            .iter()
            .map(|airport| airport.icao.as_str())
            .collect();

        assert_eq!(found, vec!["KJFK", "KLAX"]);
        assert!(registry.search_by_name("heathrow").is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let (mut registry, _) = sample_registry();
        let snapshot = registry.snapshot();

        registry.remove("KJFK").unwrap();

        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.iter().any(|airport| airport.has_icao("KJFK")));
    }
}
