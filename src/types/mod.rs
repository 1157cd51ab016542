pub mod trip;

pub use trip::{TripForm, TripPlan, TripRequest, DATE_FORMAT, DEFAULT_INTERESTS};
