//! Pure numeric helpers: sequence stacking, fold splitting, and criterion formulas.

pub mod combine;
pub mod criteria;
pub mod kfold;

pub use combine::*;
pub use criteria::*;
pub use kfold::*;
