pub mod properties;
pub mod property_images;

pub use properties::PropertyRepository;
pub use property_images::PropertyImageRepository;
