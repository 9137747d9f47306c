//! Tunables for length and proximity computations.

/// Tolerance used when a company has not configured its own (100 m).
pub const DEFAULT_TOLERANCE_KM: f64 = 0.1;

/// Decimal places kept when a route length is stored.
pub const DEFAULT_LENGTH_DECIMALS: u32 = 2;

/// How distance from a stop to a route is measured
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProximityMode {
    /// Distance to the nearest clicked point only
    #[default]
    Vertex,
    /// Distance to the nearest point on any segment
    Segment,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub tolerance_km: f64,
    pub proximity_mode: ProximityMode,
    pub length_decimals: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance_km: DEFAULT_TOLERANCE_KM,
            proximity_mode: ProximityMode::Vertex,
            length_decimals: DEFAULT_LENGTH_DECIMALS,
        }
    }
}
