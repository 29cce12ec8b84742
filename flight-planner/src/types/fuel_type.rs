use std::fmt;
use std::str::FromStr;

use super::planner_error::PlannerError;

/// Fuel an aircraft burns or an airport sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FuelType {
    Avgas,
    JetA,
}

impl FuelType {
    pub fn as_str(&self) -> &str {
        match self {
            FuelType::Avgas => "AVGAS",
            FuelType::JetA => "Jet A",
        }
    }

    /// Numeric code used by the registry files: `1` for AVGAS, `2` for Jet A.
    pub fn code(&self) -> u8 {
        match self {
            FuelType::Avgas => 1,
            FuelType::JetA => 2,
        }
    }

    fn from_label(label: &str) -> Option<FuelType> {
        let normalized: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "avgas" | "100ll" | "1" | "1.0" => Some(FuelType::Avgas),
            "jeta" | "jet" | "2" | "2.0" => Some(FuelType::JetA),
            _ => None,
        }
    }
}

impl FromStr for FuelType {
    type Err = PlannerError;

    /// Accepts the labels seen in registry files regardless of case or spacing
    /// (`"AVGAS"`, `"Avgas"`, `"100LL"`, `"Jet A"`, `"JET-A"`) and the numeric codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::from_label(s)
            .ok_or_else(|| PlannerError::InvalidRecord(format!("unknown fuel type '{}'", s.trim())))
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of fuel types an airport can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FuelAvailability {
    avgas: bool,
    jet_a: bool,
}

impl FuelAvailability {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn only(fuel: FuelType) -> Self {
        let mut availability = Self::default();
        availability.insert(fuel);
        availability
    }

    pub fn both() -> Self {
        FuelAvailability {
            avgas: true,
            jet_a: true,
        }
    }

    pub fn insert(&mut self, fuel: FuelType) {
        match fuel {
            FuelType::Avgas => self.avgas = true,
            FuelType::JetA => self.jet_a = true,
        }
    }

    pub fn contains(&self, fuel: FuelType) -> bool {
        match fuel {
            FuelType::Avgas => self.avgas,
            FuelType::JetA => self.jet_a,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.avgas && !self.jet_a
    }

    pub fn types(&self) -> Vec<FuelType> {
        let mut types = Vec::new();
        if self.avgas {
            types.push(FuelType::Avgas);
        }
        if self.jet_a {
            types.push(FuelType::JetA);
        }
        types
    }

    /// Registry encoding: `0` none, `1` AVGAS, `2` Jet A, `3` both.
    pub fn code(&self) -> u8 {
        self.types().iter().map(FuelType::code).sum()
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::none()),
            1 => Some(Self::only(FuelType::Avgas)),
            2 => Some(Self::only(FuelType::JetA)),
            3 => Some(Self::both()),
            _ => None,
        }
    }
}

impl FromStr for FuelAvailability {
    type Err = PlannerError;

    /// Parses either a numeric code (`"3"`, `"3.0"`) or a list of labels
    /// separated by `;`, `/`, `|` or `+` (`"AVGAS;Jet A"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::none());
        }

        if let Ok(value) = trimmed.parse::<f64>() {
            return match value {
                v if v.fract() == 0.0 && (0.0..=3.0).contains(&v) => {
                    Self::from_code(v as u8).ok_or_else(|| unknown_availability(trimmed))
                }
                _ => Err(unknown_availability(trimmed)),
            };
        }

        let mut availability = Self::none();
        for label in trimmed.split(|c| matches!(c, ';' | '/' | '|' | '+')) {
            if label.trim().is_empty() {
                continue;
            }
            availability.insert(label.parse()?);
        }
        Ok(availability)
    }
}

fn unknown_availability(raw: &str) -> PlannerError {
    PlannerError::InvalidRecord(format!("unknown fuel availability code '{}'", raw))
}

impl fmt::Display for FuelAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let types = self.types();
        let labels: Vec<&str> = types.iter().map(|fuel| fuel.as_str()).collect();
        write!(f, "{}", labels.join(", "))
    }
}
