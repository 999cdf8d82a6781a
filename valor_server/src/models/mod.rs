//! Land valuation data models.

pub mod district;
pub mod land_type;
