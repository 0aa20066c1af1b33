pub mod engine;
pub mod routes;

pub use engine::{
    check9, check_col_placement, check_region_placement, check_row_placement, solve, validate,
    Coordinate, Validation,
};
