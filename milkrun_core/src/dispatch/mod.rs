pub mod report;
pub mod scheduler;

pub use report::{
    CoverageSummary, DispatchOutcome, RoundReport, SingleTripReport, SingleTripVehicleReport,
    Stop, UnservedCustomer, UnservedReason, VehicleTrip,
};
pub use scheduler::{DispatchError, DispatchScheduler};
