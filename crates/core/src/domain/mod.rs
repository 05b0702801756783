pub mod model_index;
pub mod step;
pub mod thesis;
pub mod update;
