pub mod defect_engine;
pub mod model_catalog;
