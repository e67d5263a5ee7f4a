pub use well_data::parameters::{WELL_PARAMETERS_F64, WellParameters, well_parameters};
pub use well_data::wells::{WELLS_F64, iter_wells, well_production};
pub use well_data::{PhaseArrays, WellProduction};

mod well_data;
