pub mod decision;
pub mod query;

pub use decision::ServiceDecision;
pub use query::DecisionQuery;
