pub mod leveling;
pub mod traverse;
pub mod validation;
