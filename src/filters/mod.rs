pub mod commify;
pub mod datesplit;
pub mod dedent;
pub mod trim;
