use super::error::AppError;
use std::collections::HashSet;

/// One of the fixed city-comparison positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// Returns the 1-based position shown to the user.
    pub const fn index(self) -> usize {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// All slots, in dispatch order.
    pub fn all() -> &'static [Self] {
        &[Self::First, Self::Second]
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl TryFrom<usize> for Slot {
    type Error = AppError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            _ => Err(AppError::ConfigError(format!("Invalid slot index: {index}"))),
        }
    }
}

/// A city as listed by the upstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityOption {
    pub id: String,
}

/// A pollutant identifier with its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterOption {
    pub name: String,
    pub display_name: String,
}

/// Drops repeated parameter names, keeping the first label seen for each.
pub fn dedup_parameters<I>(raw: I) -> Vec<ParameterOption>
where
    I: IntoIterator<Item = ParameterOption>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|p| seen.insert(p.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, display_name: &str) -> ParameterOption {
        ParameterOption {
            name: name.to_string(),
            display_name: display_name.to_string(),
        }
    }

    #[test]
    fn test_first_display_name_wins() {
        let options = dedup_parameters(vec![param("pm25", "PM2.5"), param("pm25", "DUPLICATE")]);

        assert_eq!(options, vec![param("pm25", "PM2.5")]);
    }

    #[test]
    fn test_dedup_keeps_response_order() {
        let options = dedup_parameters(vec![
            param("o3", "O₃"),
            param("pm25", "PM2.5"),
            param("o3", "Ozone"),
            param("no2", "NO₂"),
        ]);

        let names: Vec<_> = options.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["o3", "pm25", "no2"]);
        assert_eq!(options[0].display_name, "O₃");
    }

    #[test]
    fn test_slot_index_round_trip() {
        for slot in Slot::all() {
            assert_eq!(Slot::try_from(slot.index()).unwrap(), *slot);
        }
        assert!(Slot::try_from(0).is_err());
        assert!(Slot::try_from(3).is_err());
    }

    #[test]
    fn test_slots_are_ordered() {
        assert!(Slot::First < Slot::Second);
        assert_eq!(Slot::Second.to_string(), "2");
    }
}
