pub mod calculator;
pub mod calculators;
pub mod processors;
