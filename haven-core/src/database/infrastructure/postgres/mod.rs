pub mod repositories;

pub use repositories::{
    PostgresPropertyImageRepository, PostgresPropertyRepository,
};
