//! Static country information shown by the globe viewer.
//!
//! The table is fixed at build time and keyed by the identifier each country
//! mesh carries as its node name in the globe model.

/// Country records and identifier lookups.
pub mod country;

pub use country::{COUNTRIES, CountryRecord, lookup, lookup_node_name};
