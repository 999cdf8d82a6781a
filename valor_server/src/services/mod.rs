//! Lookup services over the in-memory district table.

pub mod department_service;
pub mod normalize;
pub mod valuation_service;
