pub mod properties;
pub mod property_images;

pub use properties::PostgresPropertyRepository;
pub use property_images::PostgresPropertyImageRepository;
