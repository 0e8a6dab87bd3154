pub mod aggregate;
pub mod dataset;
pub mod selection;
pub mod state;
