#![cfg(feature = "memory")]

use shop_repo::memory::InMemoryRepo;
use shop_types::domain::item::Item;
use shop_types::domain::order::Order;
use shop_types::domain::role::Role;
use shop_types::domain::user::{User, UserKey};
use shop_types::ports::item_repository::ItemRepository;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::user_repository::UserRepository;

fn bbailey() -> User {
    User::new(
        "bbailey",
        "password",
        "Bob",
        "Bailey",
        "bbailey@revature.com",
        Role::User,
    )
}

#[tokio::test]
async fn memory_repo_user_crud_flow() {
    let repo = InMemoryRepo::new();

    let created = UserRepository::save(&repo, bbailey()).await.unwrap();
    assert_eq!(created.id, 1);

    let by_key = repo
        .get_by_unique_key(UserKey::Email, "bbailey@revature.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_key.id, created.id);

    let authed = repo
        .get_by_credentials("bbailey", "password")
        .await
        .unwrap();
    assert!(authed.is_some());
    let wrong = repo.get_by_credentials("bbailey", "nope").await.unwrap();
    assert!(wrong.is_none());

    let mut changed = created.clone();
    changed.first_name = "Robert".into();
    assert!(UserRepository::update(&repo, changed).await.unwrap());
    let fetched = UserRepository::get_by_id(&repo, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.first_name, "Robert");

    assert!(UserRepository::delete_by_id(&repo, created.id).await.unwrap());
    assert!(UserRepository::get_all(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn memory_repo_rejects_duplicate_usernames() {
    let repo = InMemoryRepo::new();
    UserRepository::save(&repo, bbailey()).await.unwrap();

    let mut dup = bbailey();
    dup.email = "other@revature.com".into();
    assert!(UserRepository::save(&repo, dup).await.is_err());
}

#[tokio::test]
async fn memory_repo_links_items_to_orders() {
    let repo = InMemoryRepo::new();
    let order = OrderRepository::save(&repo, Order::new(1, true, "Seattle", "NYC"))
        .await
        .unwrap();
    let other = OrderRepository::save(&repo, Order::new(2, true, "Seattle", "NYC"))
        .await
        .unwrap();

    let water = ItemRepository::save(&repo, Item::new("MalWart H2O", "Water 1L", 0.99, 50), order.id)
        .await
        .unwrap();
    ItemRepository::save(&repo, Item::new("BlunderBread", "White bread", 2.99, 20), other.id)
        .await
        .unwrap();

    let items = repo.get_items_by_order_id(order.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, water.id);

    let mine = repo.get_orders_by_user_id(1).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, order.id);

    assert!(OrderRepository::delete_by_id(&repo, order.id).await.unwrap());
    assert_eq!(repo.link_count(), 1);
    assert!(repo.get_items_by_order_id(order.id).await.unwrap().is_empty());
    // the item row itself is owned by the item store
    assert!(ItemRepository::get_by_id(&repo, water.id).await.unwrap().is_some());
}

#[tokio::test]
async fn memory_repo_reports_success_for_missing_rows() {
    let repo = InMemoryRepo::new();
    assert!(ItemRepository::get_by_id(&repo, 99).await.unwrap().is_none());
    assert!(ItemRepository::update(&repo, Item { id: 99, ..Item::default() })
        .await
        .unwrap());
    assert!(ItemRepository::delete_by_id(&repo, 99).await.unwrap());
    assert!(OrderRepository::delete_by_id(&repo, 99).await.unwrap());
    assert!(ItemRepository::get_all(&repo).await.unwrap().is_empty());
}
