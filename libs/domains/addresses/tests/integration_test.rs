//! Address book against a migrated SQLite database

use axum_helpers::Actor;
use domain_addresses::*;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

fn service(db: &TestDatabase) -> AddressService<PgAddressRepository> {
    AddressService::new(PgAddressRepository::new(db.connection()))
}

fn input(street: &str, is_default: bool) -> AddressInput {
    AddressInput {
        street: street.to_string(),
        city: "Springfield".to_string(),
        postal_code: Some("12345".to_string()),
        country: None,
        apartment: None,
        phone_number: None,
        is_default,
    }
}

async fn defaults(service: &AddressService<PgAddressRepository>, actor: Actor) -> Vec<Uuid> {
    service
        .list(actor)
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.is_default)
        .map(|a| a.id)
        .collect()
}

#[tokio::test]
async fn test_list_puts_default_first_then_newest() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = Actor::customer(TestDataBuilder::from_test_name("list_order").user_id());

    let home = service.create(user, input("Home", true)).await.unwrap();
    let work = service.create(user, input("Work", false)).await.unwrap();
    let gym = service.create(user, input("Gym", false)).await.unwrap();

    let ids: Vec<_> = service.list(user).await.unwrap().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![home.id, gym.id, work.id]);
}

#[tokio::test]
async fn test_at_most_one_default_after_any_sequence() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let data = TestDataBuilder::from_test_name("one_default");
    let user = Actor::customer(data.user_id());
    let other = Actor::customer(data.other_user_id());

    let a = service.create(user, input("A", true)).await.unwrap();
    let b = service.create(user, input("B", true)).await.unwrap();
    assert_eq!(defaults(&service, user).await, vec![b.id]);

    let c = service.create(user, input("C", false)).await.unwrap();
    let theirs = service.create(other, input("Theirs", true)).await.unwrap();

    for id in [a.id, c.id, b.id, a.id] {
        service.set_default(user, id).await.unwrap();
        assert_eq!(defaults(&service, user).await, vec![id]);
    }

    service.update(user, c.id, input("C2", true)).await.unwrap();
    assert_eq!(defaults(&service, user).await, vec![c.id]);
    assert_eq!(service.get_default(user).await.unwrap().id, c.id);

    // The other user's book is untouched
    assert_eq!(defaults(&service, other).await, vec![theirs.id]);
}

#[tokio::test]
async fn test_foreign_set_default_leaves_defaults_intact() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let data = TestDataBuilder::from_test_name("foreign_default");
    let owner = Actor::customer(data.user_id());
    let intruder = Actor::customer(data.other_user_id());

    let home = service.create(owner, input("Home", true)).await.unwrap();
    let spare = service.create(owner, input("Spare", false)).await.unwrap();
    let mine = service.create(intruder, input("Mine", true)).await.unwrap();

    let result = service.set_default(intruder, spare.id).await;
    assert!(matches!(result, Err(AddressError::Forbidden(_))));

    assert_eq!(defaults(&service, owner).await, vec![home.id]);
    assert_eq!(defaults(&service, intruder).await, vec![mine.id]);
}

#[tokio::test]
async fn test_foreign_reads_and_writes_are_forbidden() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let data = TestDataBuilder::from_test_name("foreign_access");
    let owner = Actor::customer(data.user_id());
    let intruder = Actor::customer(data.other_user_id());

    let home = service.create(owner, input("Home", false)).await.unwrap();

    assert!(matches!(service.get(intruder, home.id).await, Err(AddressError::Forbidden(_))));
    assert!(matches!(
        service.update(intruder, home.id, input("Hijack", false)).await,
        Err(AddressError::Forbidden(_))
    ));
    assert!(matches!(service.delete(intruder, home.id).await, Err(AddressError::Forbidden(_))));

    assert_eq!(service.get(owner, home.id).await.unwrap().street, "Home");
}

#[tokio::test]
async fn test_deleted_address_is_gone() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = Actor::customer(TestDataBuilder::from_test_name("deleted").user_id());

    let home = service.create(user, input("Home", true)).await.unwrap();
    service.delete(user, home.id).await.unwrap();

    assert!(matches!(service.get(user, home.id).await, Err(AddressError::NotFound(_))));
    assert!(service.list(user).await.unwrap().is_empty());
    assert!(matches!(service.get_default(user).await, Err(AddressError::NoDefault)));
    assert!(matches!(service.delete(user, home.id).await, Err(AddressError::NotFound(_))));
}
