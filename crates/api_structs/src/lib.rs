mod birthday;
mod status;

pub mod dtos {
    pub use crate::birthday::dtos::*;
}

pub use crate::birthday::api::*;
pub use crate::status::api::*;
