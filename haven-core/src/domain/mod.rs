pub mod property;

pub use property::{
    FilterCriteria, OwnerRecord, PropertyImageRecord, PropertyRecord,
    PropertyView,
};
