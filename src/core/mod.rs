pub mod events;
pub mod pagination;
pub mod registry;

pub use crate::domain::model::{Fundraiser, FundraiserCreated, Identity, NewFundraiser};
pub use crate::domain::ports::{EventSink, RegistrySettings};
pub use crate::utils::error::Result;
