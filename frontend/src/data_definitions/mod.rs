pub mod directory_params;
pub mod directory_state;
