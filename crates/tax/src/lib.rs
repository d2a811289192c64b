//! Tax contract namespace.
//!
//! Request/response records for the estimated-tax engine. The computation
//! itself lives behind the engine's API; only its contract is defined here.

pub mod estimate;

pub use estimate::{
    EntityType, Month, PaymentStatus, Quarter, QuarterlyPayment, Rate, TaxComputeRequest,
    TaxComputeResponse, TaxFilingType,
};
