pub mod analysis;
pub mod building;
pub mod finance;
pub mod usage;

pub use analysis::{
    Co2Grade, CompositionSlice, CompositionSnapshot, Grade, RoiEstimate, TrendPoint, TrendSeries,
    UtilitySeries,
};
pub use building::BuildingProfile;
pub use finance::FinancialAssumptions;
pub use usage::{UsageRecord, UsageTable, UtilityColumn};
