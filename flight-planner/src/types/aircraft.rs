use std::fmt;
use std::str::FromStr;

use super::fuel_type::FuelType;
use super::parse_number;
use super::planner_error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AircraftCategory {
    Jet,
    Prop,
    TurboProp,
}

impl AircraftCategory {
    pub fn as_str(&self) -> &str {
        match self {
            AircraftCategory::Jet => "Jet",
            AircraftCategory::Prop => "Prop",
            AircraftCategory::TurboProp => "TurboProp",
        }
    }
}

impl FromStr for AircraftCategory {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "jet" => Ok(AircraftCategory::Jet),
            "prop" | "piston" => Ok(AircraftCategory::Prop),
            "turboprop" => Ok(AircraftCategory::TurboProp),
            _ => Err(PlannerError::InvalidRecord(format!(
                "unknown aircraft category '{}'",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for AircraftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An aircraft type as kept by the aircraft registry, keyed by make and model.
#[derive(Debug, Clone)]
pub struct Aircraft {
    pub make_model: String,
    pub category: AircraftCategory,
    pub fuel_type: FuelType,
    /// Fuel burned per hour of flight.
    pub fuel_burn_rate: f64,
    pub fuel_capacity: f64,
    /// Cruise airspeed in knots.
    pub airspeed: f64,
}

impl Aircraft {
    pub fn new(
        make_model: String,
        category: AircraftCategory,
        fuel_type: FuelType,
        fuel_burn_rate: f64,
        fuel_capacity: f64,
        airspeed: f64,
    ) -> Self {
        Aircraft {
            make_model,
            category,
            fuel_type,
            fuel_burn_rate,
            fuel_capacity,
            airspeed,
        }
    }

    /// Distance the aircraft covers on a full tank: endurance times airspeed.
    /// Zero when the burn rate is not positive.
    pub fn max_range(&self) -> f64 {
        if self.fuel_burn_rate <= 0.0 {
            return 0.0;
        }
        (self.fuel_capacity / self.fuel_burn_rate) * self.airspeed
    }

    /// Rejects negative or non-numeric burn rate, capacity and airspeed.
    pub fn check_performance(&self) -> Result<(), PlannerError> {
        let figures = [self.fuel_burn_rate, self.fuel_capacity, self.airspeed];
        if figures.iter().any(|value| value.is_nan() || *value < 0.0) {
            return Err(PlannerError::InvalidRecord(format!(
                "aircraft '{}' has negative performance figures",
                self.make_model
            )));
        }
        Ok(())
    }

    /// Updates one field from its textual value.
    ///
    /// Accepted fields: `model`, `category`, `fuel`, `burn`, `capacity`, `airspeed`.
    /// The aircraft is left untouched when the value is rejected.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), PlannerError> {
        let mut updated = self.clone();
        match field.trim().to_lowercase().as_str() {
            "model" | "make_model" => {
                if value.trim().is_empty() {
                    return Err(PlannerError::InvalidInput(
                        "make and model cannot be empty".to_string(),
                    ));
                }
                updated.make_model = value.trim().to_string();
            }
            "category" | "type" => updated.category = value.parse()?,
            "fuel" | "fuel_type" => updated.fuel_type = value.parse()?,
            "burn" | "fuel_burn_rate" => updated.fuel_burn_rate = parse_number(field, value)?,
            "capacity" | "fuel_capacity" => updated.fuel_capacity = parse_number(field, value)?,
            "airspeed" => updated.airspeed = parse_number(field, value)?,
            other => {
                return Err(PlannerError::InvalidInput(format!(
                    "unknown aircraft field '{}'",
                    other
                )))
            }
        }
        updated.check_performance()?;
        *self = updated;
        Ok(())
    }

    pub fn has_model(&self, make_model: &str) -> bool {
        self.make_model.trim().eq_ignore_ascii_case(make_model.trim())
    }
}

impl PartialEq for Aircraft {
    fn eq(&self, other: &Self) -> bool {
        self.has_model(&other.make_model)
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.make_model, self.category, self.fuel_type)
    }
}
