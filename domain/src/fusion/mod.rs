//! Fusion subdomain: per-model outcomes, the judge verdict and the final
//! result returned to the caller.

pub mod value_objects;
