//! HTTP routers for the catalog. Reads are public, writes need an admin.

pub mod categories;
pub mod products;
