/// Placeholder climate-zone rule: addresses mentioning "NY" map to 4A.
const NY_MARKER: &str = "NY";
const NY_CLIMATE_ZONE: &str = "4A - Mixed-Humid";
const UNKNOWN_CLIMATE_ZONE: &str = "Unknown";

/// Building metadata for the current interaction. Never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BuildingProfile {
    pub address: String,
    pub floor_area_sqft: f64,
}

impl BuildingProfile {
    pub fn new<A: Into<String>>(address: A, floor_area_sqft: f64) -> Self {
        Self {
            address: address.into(),
            floor_area_sqft,
        }
    }

    /// Derived on every call from the address text; not a geocoding lookup.
    pub fn climate_zone(&self) -> &'static str {
        if self.address.contains(NY_MARKER) {
            NY_CLIMATE_ZONE
        } else {
            UNKNOWN_CLIMATE_ZONE
        }
    }
}
