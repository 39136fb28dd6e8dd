//! Address book domain
//!
//! Every address belongs to one user and only that user may read or change
//! it. A user has at most one live default address; every write that sets
//! `is_default` clears the flag on the user's other addresses in the same
//! transaction.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{AddressError, AddressResult};
pub use models::{Address, AddressInput};
pub use postgres::PgAddressRepository;
pub use repository::AddressRepository;
pub use service::AddressService;
