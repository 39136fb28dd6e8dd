use axum::Router;
use domain_addresses::{AddressService, PgAddressRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = AddressService::new(PgAddressRepository::new(state.db.clone()));
    handlers::router(service)
}
