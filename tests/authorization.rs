//! Integration tests for listing authorization

use std::path::Path;

use rust_decimal::Decimal;
use smallvec::smallvec;
use testresult::TestResult;

use bazaar::{
    listings::{ListingError, ListingService},
    products::{Product, ProductId, status},
    store::{
        StoreError,
        products::ProductRepository,
        users::{Bootstrap, UserRepository},
    },
    users::{Password, Role, User, UserId},
};

fn admin() -> UserId {
    UserId::from(1)
}

fn owner() -> UserId {
    UserId::from(2)
}

fn stranger() -> UserId {
    UserId::from(5)
}

fn stores(dir: &Path) -> Result<(ProductRepository, UserRepository), StoreError> {
    let accounts = vec![
        User::from_role(admin(), Role::ADMIN_ROLE_ID, "admin", Password::new("admin123")),
        User::from_role(owner(), 2, "alice", Password::new("pw")),
        User::from_role(stranger(), 2, "bob", Password::new("pw")),
    ];

    let products = ProductRepository::open(dir.join("products.json"))?;
    let users = UserRepository::open(dir.join("users.json"), Bootstrap::Accounts(accounts))?;

    Ok((products, users))
}

fn guitar() -> Product {
    Product {
        title: "Acoustic guitar".to_string(),
        category_id: 4,
        description: "Spruce top, barely played".to_string(),
        price: Decimal::new(18000, 2),
        location: "York".to_string(),
        tags: smallvec!["music".to_string()],
        published_at: "2024-05-20T18:00:00Z".parse().ok(),
        status: status::ON_SALE.to_string(),
        ..Product::default()
    }
}

#[test]
fn publish_stamps_the_acting_seller_onto_the_listing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    // Whatever seller the input claims, the stored copy belongs to the
    // account that published it.
    let mut listing = guitar();
    listing.seller_id = UserId::from(999);

    let id = service.publish(listing, owner())?;
    let stored = service.product(id).ok_or("listing not stored")?;

    assert!(id.is_assigned());
    assert_eq!(stored.seller_id, owner());
    assert!(service.is_owner(id, owner()));

    Ok(())
}

#[test]
fn publish_requires_a_known_account() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;

    {
        let mut service = ListingService::new(&mut products, &users);
        let result = service.publish(guitar(), UserId::from(999));

        assert!(matches!(result, Err(ListingError::UnknownUser(user)) if user == UserId::from(999)));
    }

    assert!(products.is_empty(), "a refused publish must not store anything");
    assert!(!dir.path().join("products.json").exists());

    Ok(())
}

#[test]
fn any_known_account_may_publish_regardless_of_role() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let by_admin = service.publish(guitar(), admin())?;
    let by_normal = service.publish(guitar(), owner())?;

    assert!(service.is_owner(by_admin, admin()));
    assert!(service.is_owner(by_normal, owner()));
    assert!(service.may_publish(admin()));
    assert!(!service.may_publish(UserId::from(999)));

    Ok(())
}

#[test]
fn edit_replaces_fields_but_preserves_identity_and_ownership() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;

    // The replacement claims a different id and seller; both claims lose.
    let mut replacement = guitar();
    replacement.id = ProductId::from(77);
    replacement.seller_id = stranger();
    replacement.title = "Acoustic guitar with case".to_string();
    replacement.price = Decimal::new(16500, 2);

    service.edit(id, replacement, owner())?;

    let stored = service.product(id).ok_or("listing not stored")?;

    assert_eq!(stored.id, id);
    assert_eq!(stored.seller_id, owner());
    assert_eq!(stored.title, "Acoustic guitar with case");
    assert_eq!(stored.price, Decimal::new(16500, 2));
    assert!(service.product(ProductId::from(77)).is_none());

    Ok(())
}

#[test]
fn edit_is_owner_only_even_for_administrators() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;

    let by_stranger = service.edit(id, guitar(), stranger());
    assert!(matches!(
        by_stranger,
        Err(ListingError::Forbidden { user, listing }) if user == stranger() && listing == id
    ));

    // Moderation rights cover deletion and status, not rewriting someone
    // else's listing.
    let by_admin = service.edit(id, guitar(), admin());
    assert!(matches!(by_admin, Err(ListingError::Forbidden { .. })));

    let stored = service.product(id).ok_or("listing not stored")?;
    assert_eq!(stored.title, "Acoustic guitar");

    Ok(())
}

#[test]
fn edit_of_a_missing_listing_reports_not_found() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let result = service.edit(ProductId::from(9), guitar(), owner());

    assert!(matches!(result, Err(ListingError::NotFound(id)) if id == ProductId::from(9)));

    Ok(())
}

#[test]
fn delete_allows_the_owner() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;

    service.delete(id, owner())?;

    assert!(service.product(id).is_none());

    Ok(())
}

#[test]
fn delete_allows_administrators_on_any_listing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;

    service.delete(id, admin())?;

    assert!(service.product(id).is_none());

    Ok(())
}

#[test]
fn delete_rejects_unrelated_normal_accounts() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;
    let result = service.delete(id, stranger());

    assert!(matches!(
        result,
        Err(ListingError::Forbidden { user, listing }) if user == stranger() && listing == id
    ));
    assert!(service.product(id).is_some());

    Ok(())
}

#[test]
fn delete_of_a_missing_listing_is_not_found_even_for_admins() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let result = service.delete(ProductId::from(99), admin());

    assert!(matches!(result, Err(ListingError::NotFound(_))));

    Ok(())
}

#[test]
fn ban_and_unban_rewrite_only_the_status() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;

    service.ban(id, admin())?;

    let banned = service.product(id).cloned().ok_or("listing not stored")?;
    assert_eq!(banned.status, status::DELISTED);

    service.unban(id, admin())?;

    let restored = service.product(id).ok_or("listing not stored")?;
    assert_eq!(restored.status, status::ON_SALE);

    // Everything but the status rode through both moderation passes.
    assert_eq!(restored.title, banned.title);
    assert_eq!(restored.price, banned.price);
    assert_eq!(restored.seller_id, owner());
    assert_eq!(restored.published_at, banned.published_at);
    assert_eq!(restored.tags, banned.tags);

    Ok(())
}

#[test]
fn moderation_is_admin_only_even_for_the_owner() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;

    assert!(matches!(
        service.ban(id, owner()),
        Err(ListingError::Forbidden { .. })
    ));
    assert!(matches!(
        service.unban(id, stranger()),
        Err(ListingError::Forbidden { .. })
    ));

    let stored = service.product(id).ok_or("listing not stored")?;
    assert_eq!(stored.status, status::ON_SALE);

    Ok(())
}

#[test]
fn moderation_checks_the_role_before_the_listing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    // A non-admin is refused without revealing whether the listing exists.
    let missing = ProductId::from(321);

    assert!(matches!(
        service.ban(missing, owner()),
        Err(ListingError::Forbidden { .. })
    ));
    assert!(matches!(
        service.ban(missing, admin()),
        Err(ListingError::NotFound(_))
    ));

    Ok(())
}

#[test]
fn outcomes_collapse_to_plain_yes_or_no() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;
    let mut service = ListingService::new(&mut products, &users);

    let id = service.publish(guitar(), owner())?;

    // Callers that only want the old boolean verdict can drop the detail.
    assert!(service.edit(id, guitar(), stranger()).is_err());
    assert!(service.delete(id, admin()).is_ok());
    assert!(service.delete(id, admin()).is_err());

    Ok(())
}

#[test]
fn service_mutations_persist_through_the_stores() -> TestResult {
    let dir = tempfile::tempdir()?;
    let (mut products, users) = stores(dir.path())?;

    let id = {
        let mut service = ListingService::new(&mut products, &users);
        let id = service.publish(guitar(), owner())?;

        service.ban(id, admin())?;

        id
    };

    let reopened = ProductRepository::open(dir.path().join("products.json"))?;
    let stored = reopened.find(id).ok_or("listing not persisted")?;

    assert_eq!(stored.seller_id, owner());
    assert_eq!(stored.status, status::DELISTED);

    Ok(())
}
