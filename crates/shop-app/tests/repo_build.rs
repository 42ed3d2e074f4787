use shop_repo::{build_repo, Repo};
use shop_types::domain::item::Item;
use shop_types::ports::item_repository::ItemRepository;
use shop_types::ports::user_repository::UserRepository;

#[tokio::test]
async fn builds_sqlite_repo_from_url() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shop-test.db");
    let url = format!("sqlite://{}", db_path.display());

    let repo: Repo = build_repo(Some(&url), 2).await.expect("build repo");
    // basic sanity: fresh schema, no rows yet
    let users = UserRepository::get_all(&repo).await.expect("list users");
    assert!(users.is_empty());

    let saved = ItemRepository::save(&repo, Item::new("Crate", "Wooden", 12.5, 4), 1)
        .await
        .expect("save item");
    let listed = ItemRepository::get_all(&repo).await.expect("list items");
    assert_eq!(listed, vec![saved]);
}

#[tokio::test]
async fn sqlite_schema_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("reopen.db").display());

    {
        let repo = build_repo(Some(&url), 1).await.expect("first open");
        ItemRepository::save(&repo, Item::new("Lamp", "Desk lamp", 30.0, 1), 1)
            .await
            .unwrap();
    }
    let repo = build_repo(Some(&url), 1).await.expect("second open");
    assert_eq!(ItemRepository::get_all(&repo).await.unwrap().len(), 1);
}
