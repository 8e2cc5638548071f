pub mod dates;
pub mod level;
pub mod pollutant;
pub mod station;
