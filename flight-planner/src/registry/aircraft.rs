use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{open_if_exists, read_rows, write_rows, LoadReport};
use crate::types::aircraft::Aircraft;
use crate::types::planner_error::PlannerError;

pub const AIRCRAFT_HEADER: [&str; 6] = [
    "Make and Model",
    "Plane Type",
    "Fuel Type",
    "Fuel Burn Rate",
    "Fuel Capacity",
    "Airspeed",
];

#[derive(Debug, Serialize, Deserialize)]
struct AircraftRecord {
    make_model: String,
    category: String,
    fuel_type: String,
    fuel_burn_rate: f64,
    fuel_capacity: f64,
    airspeed: f64,
}

impl TryFrom<AircraftRecord> for Aircraft {
    type Error = PlannerError;

    fn try_from(record: AircraftRecord) -> Result<Self, Self::Error> {
        if record.make_model.is_empty() {
            return Err(PlannerError::InvalidRecord(
                "aircraft without make and model".to_string(),
            ));
        }

        let aircraft = Aircraft::new(
            record.make_model,
            record.category.parse()?,
            record.fuel_type.parse()?,
            record.fuel_burn_rate,
            record.fuel_capacity,
            record.airspeed,
        );
        aircraft.check_performance()?;
        Ok(aircraft)
    }
}

impl From<&Aircraft> for AircraftRecord {
    fn from(aircraft: &Aircraft) -> Self {
        AircraftRecord {
            make_model: aircraft.make_model.clone(),
            category: aircraft.category.to_string(),
            fuel_type: aircraft.fuel_type.code().to_string(),
            fuel_burn_rate: aircraft.fuel_burn_rate,
            fuel_capacity: aircraft.fuel_capacity,
            airspeed: aircraft.airspeed,
        }
    }
}

/// Every known aircraft type, keyed by make and model.
#[derive(Debug, Default)]
pub struct AircraftRegistry {
    aircraft: Vec<Aircraft>,
    path: Option<PathBuf>,
}

impl AircraftRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_aircraft(aircraft: Vec<Aircraft>) -> Self {
        AircraftRegistry {
            aircraft,
            path: None,
        }
    }

    /// Loads the registry from `path`; a missing file gives an empty registry bound to `path`.
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
        let (aircraft, report) = read_rows::<AircraftRecord, Aircraft, R>(reader)?;
        Ok((Self::from_aircraft(aircraft), report))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn save(&self) -> Result<(), PlannerError> {
        let path = self.path.as_ref().ok_or_else(|| {
            PlannerError::InvalidInput("the aircraft registry has no backing file".to_string())
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
            &AIRCRAFT_HEADER,
            self.aircraft.iter().map(AircraftRecord::from),
        )
    }

    pub fn add(&mut self, aircraft: Aircraft) {
        self.aircraft.push(aircraft);
    }

    pub fn modify(&mut self, make_model: &str, updated: Aircraft) -> Result<(), PlannerError> {
        let slot = self
            .aircraft
            .iter_mut()
            .find(|aircraft| aircraft.has_model(make_model))
            .ok_or_else(|| PlannerError::AircraftNotFound(make_model.to_string()))?;
        *slot = updated;
        Ok(())
    }

    /// Changes one field of the aircraft named `make_model`, see [`Aircraft::set_field`].
    pub fn modify_field(
        &mut self,
        make_model: &str,
        field: &str,
        value: &str,
    ) -> Result<(), PlannerError> {
        let mut updated = self
            .find(make_model)
            .cloned()
            .ok_or_else(|| PlannerError::AircraftNotFound(make_model.to_string()))?;
        updated.set_field(field, value)?;
        self.modify(make_model, updated)
    }

    /// Removes every aircraft named `make_model`, returning how many went.
    pub fn remove(&mut self, make_model: &str) -> Result<usize, PlannerError> {
        let before = self.aircraft.len();
        self.aircraft.retain(|aircraft| !aircraft.has_model(make_model));
        match before - self.aircraft.len() {
            0 => Err(PlannerError::AircraftNotFound(make_model.to_string())),
            removed => Ok(removed),
        }
    }

    pub fn find(&self, make_model: &str) -> Option<&Aircraft> {
        self.aircraft
            .iter()
            .find(|aircraft| aircraft.has_model(make_model))
    }

    pub fn search_by_name(&self, fragment: &str) -> Vec<&Aircraft> {
        let needle = fragment.trim().to_lowercase();
        self.aircraft
            .iter()
            .filter(|aircraft| aircraft.make_model.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn snapshot(&self) -> Arc<[Aircraft]> {
        Arc::from(self.aircraft.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::aircraft::AircraftCategory;
    use crate::types::fuel_type::FuelType;

    const SAMPLE: &str = "\
Make and Model,Plane Type,Fuel Type,Fuel Burn Rate,Fuel Capacity,Airspeed
Cessna 172,Prop,1,30,212,122
Boeing 737-800,Jet,2,2500,26020,450
// retired
Beechcraft King Air 350,Turbo Prop,Jet A,380,2040,312
Mystery Glider,Glider,1,0,0,60
Piper Cub,Prop,1,-1,45,75
";

    fn sample_registry() -> (AircraftRegistry, LoadReport) {
        AircraftRegistry::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_parses_codes_and_labels() {
        let (registry, report) = sample_registry();

        assert_eq!(registry.len(), 3);
        assert_eq!(report.skipped.len(), 2);

        let cessna = registry.find("cessna 172").unwrap();
        assert_eq!(cessna.category, AircraftCategory::Prop);
        assert_eq!(cessna.fuel_type, FuelType::Avgas);
        assert_eq!(cessna.fuel_capacity, 212.0);

        let king_air = registry.find("Beechcraft King Air 350").unwrap();
        assert_eq!(king_air.category, AircraftCategory::TurboProp);
        assert_eq!(king_air.fuel_type, FuelType::JetA);

        assert!(registry.find("Mystery Glider").is_none());
        assert!(registry.find("Piper Cub").is_none());
    }

    #[test]
    fn test_skipped_rows_name_their_line() {
        let (_, report) = sample_registry();
        let lines: Vec<u64> = report.skipped.iter().map(|row| row.line).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0] >= 5);
        assert!(lines[0] < lines[1]);
        assert!(report.skipped.iter().all(|row| !row.reason.is_empty()));
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join("planner_aircraft_roundtrip.csv");
        let (mut registry, _) = sample_registry();
        registry.add(Aircraft::new(
            "Cirrus SR22".to_string(),
            AircraftCategory::Prop,
            FuelType::Avgas,
            68.0,
            348.0,
            183.0,
        ));
        registry.save_to(&path).unwrap();

        let (reloaded, report) = AircraftRegistry::load(&path).unwrap();

        assert_eq!(report.loaded, 4);
        assert!(report.skipped.is_empty());
        let sr22 = reloaded.find("Cirrus SR22").unwrap();
        assert_eq!(sr22.airspeed, 183.0);
        assert_eq!(sr22.fuel_type, FuelType::Avgas);
        assert_eq!(
            reloaded.find("Boeing 737-800").unwrap().category,
            AircraftCategory::Jet
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_remove_unknown_model() {
        let (mut registry, _) = sample_registry();
        assert!(matches!(
            registry.remove("Concorde"),
            Err(PlannerError::AircraftNotFound(_))
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_modify_replaces_entry() {
        let (mut registry, _) = sample_registry();
        let mut faster = registry.find("Cessna 172").unwrap().clone();
        faster.airspeed = 130.0;

        registry.modify("CESSNA 172", faster).unwrap();

        assert_eq!(registry.find("Cessna 172").unwrap().airspeed, 130.0);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_modify_field() {
        let (mut registry, _) = sample_registry();

        registry.modify_field("boeing 737-800", "capacity", "26000").unwrap();
        assert_eq!(registry.find("Boeing 737-800").unwrap().fuel_capacity, 26000.0);

        assert!(matches!(
            registry.modify_field("Concorde", "airspeed", "1300"),
            Err(PlannerError::AircraftNotFound(_))
        ));
        assert!(registry.modify_field("Cessna 172", "airspeed", "-3").is_err());
        assert_eq!(registry.find("Cessna 172").unwrap().airspeed, 122.0);
    }

    #[test]
    fn test_search_by_name() {
        let (registry, _) = sample_registry();
        let found = registry.search_by_name("boeing");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].make_model, "Boeing 737-800");
    }
}
