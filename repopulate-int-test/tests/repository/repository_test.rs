use repopulate::collection::{compare_ids, EntityId, Update};
use repopulate::common::{PageParam, SortSpec, Value};
use repopulate::errors::{ErrorKind, PopulateResult};
use repopulate::filter::{all, field};
use repopulate::projection;
use repopulate::repository::{Repository, RepositoryMetadata};
use repopulate_int_test::test_util::{
    ann, bob, create_test_context, generate_user, is_entity_not_found, seed, User,
};

#[tokio::test]
async fn test_save_entity_assigns_id() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    let users = ctx.users()?;

    let user = generate_user();
    let saved: User = users.save_entity(&user).await?;
    let id = EntityId::from(saved.id.clone().unwrap_or_default());
    assert!(!id.is_blank());
    assert_eq!(saved.email, user.email);

    let found = users.get_by_id(Some(&id), None).await?;
    assert_eq!(found.to_entity::<User>()?, saved);
    Ok(())
}

#[tokio::test]
async fn test_blank_id_is_not_found_before_store_call() -> PopulateResult<()> {
    // an unbound model would fail the call if the store were reached
    let users = Repository::new(
        RepositoryMetadata::builder("User")
            .not_found_error(repopulate_int_test::test_util::entity_not_found)
            .build(),
    );

    let blank = EntityId::from("");
    for id in [None, Some(&blank)] {
        let err = users.get_by_id(id, None).await.unwrap_err();
        assert!(is_entity_not_found(&err));
        assert_eq!(err.message(), "User not found");

        let err = users.update_by_id(id, Update::new().set("email", "x"), None).await.unwrap_err();
        assert!(is_entity_not_found(&err));

        let err = users.delete_by_id(id, None).await.unwrap_err();
        assert!(is_entity_not_found(&err));
    }

    let err = users.get_one(all(), None).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::RepositoryNotConfigured);
    Ok(())
}

#[tokio::test]
async fn test_get_by_id_unknown_is_not_found() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.users()?;

    let ghost = EntityId::from("ghost");
    let err = users.get_by_id(Some(&ghost), None).await.unwrap_err();
    assert!(is_entity_not_found(&err));
    assert_eq!(users.get_by_id_or_null(Some(&ghost), None).await?, None);
    assert_eq!(users.get_by_id_or_null(None, None).await?, None);
    Ok(())
}

#[tokio::test]
async fn test_get_by_id_with_projection() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.users()?;

    let user = users
        .get_by_id(Some(&ann()), Some(&projection! { firstName: true, email: true }))
        .await?;
    assert_eq!(user.get("_id"), Value::from("u1"));
    assert_eq!(user.get("firstName"), Value::from("Ann"));
    assert_eq!(user.get("email"), Value::from("ann@example.com"));
    assert_eq!(user.get("lastName"), Value::Null);
    assert_eq!(user.get("todos"), Value::Null);
    Ok(())
}

#[tokio::test]
async fn test_get_one() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.users()?;

    let bob_doc = users.get_one(field("email").eq("bob@example.com"), None).await?;
    assert_eq!(bob_doc.id(), Some(bob()));

    let err = users.get_one(field("email").eq("nobody"), None).await.unwrap_err();
    assert!(is_entity_not_found(&err));
    assert_eq!(users.get_one_or_null(field("email").eq("nobody"), None).await?, None);
    Ok(())
}

#[tokio::test]
async fn test_get_with_paging_and_sort() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.users()?;

    let sort = SortSpec::new().by("firstName", -1);
    let found = users
        .get(all(), Some(&projection! { firstName: true }), Some("1".into()), None, Some(sort))
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("firstName"), Value::from("Bob"));

    // a non-numeric limit counts as unspecified
    let found = users
        .get(all(), None, Some(PageParam::from("lots")), Some(PageParam::from(1)), None)
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), Some(bob()));
    Ok(())
}

#[tokio::test]
async fn test_count_distinct_and_exists() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.users()?;
    let todos = ctx.todos()?;

    assert_eq!(users.count(all()).await?, 2);
    assert_eq!(todos.count(field("done").eq(true)).await?, 1);
    assert_eq!(todos.distinct(all(), "owner").await?, vec![Value::from("u1")]);
    assert_eq!(
        todos.distinct(all(), "comments").await?,
        vec![Value::from("c1"), Value::from("c2")]
    );

    assert!(users.is_exists(field("firstName").eq("Ann")).await?);
    assert!(!users.is_exists(field("firstName").eq("Cid")).await?);
    assert!(users.is_exists_with_id(Some(&bob())).await?);
    assert!(!users.is_exists_with_id(Some(&EntityId::from("ghost"))).await?);
    assert!(!users.is_exists_with_id(None).await?);
    Ok(())
}

#[tokio::test]
async fn test_update_by_id_returns_updated_document() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let todos = ctx.todos()?;
    let t1 = EntityId::from("t1");

    let updated = todos
        .update_by_id(Some(&t1), Update::new().set("done", true), Some(&projection! { done: true }))
        .await?;
    assert_eq!(updated.get("done"), Value::from(true));
    assert_eq!(updated.get("title"), Value::Null);

    let ghost = EntityId::from("ghost");
    assert_eq!(
        todos
            .update_by_id_or_return_null(Some(&ghost), Update::new().set("done", true), None)
            .await?,
        None
    );
    let err = todos
        .update_by_id(Some(&ghost), Update::new().set("done", true), None)
        .await
        .unwrap_err();
    assert!(is_entity_not_found(&err));
    Ok(())
}

#[tokio::test]
async fn test_update_one_and_update_many() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let todos = ctx.todos()?;

    let updated = todos
        .update_one(field("title").eq("review"), Update::new().push("comments", "c9"), None)
        .await?;
    assert_eq!(updated.get("comments"), Value::Array(vec![Value::from("c9")]));
    assert_eq!(
        todos
            .update_one_or_return_null(field("title").eq("none"), Update::new().set("done", false), None)
            .await?,
        None
    );

    let result = todos.update_many(all(), Update::new().set("done", false)).await?;
    assert_eq!(result.matched_count(), 2);
    assert_eq!(result.affected_count(), 1);
    assert_eq!(todos.count(field("done").eq(false)).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_delete_by_id_and_delete_many() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.users()?;

    let removed = users.delete_by_id(Some(&bob()), None).await?;
    assert_eq!(removed.get("firstName"), Value::from("Bob"));
    assert_eq!(users.delete_by_id_or_return_null(Some(&bob()), None).await?, None);
    let err = users.delete_by_id(Some(&bob()), None).await.unwrap_err();
    assert!(is_entity_not_found(&err));

    let result = users.delete_many(all()).await?;
    assert_eq!(result.affected_count(), 1);
    assert_eq!(users.count(all()).await?, 0);
    Ok(())
}

#[test]
fn test_compare_ids() {
    assert!(compare_ids(Some(&ann()), Some(&EntityId::from("u1"))));
    assert!(!compare_ids(Some(&ann()), Some(&bob())));
    assert!(!compare_ids(None, Some(&bob())));
    assert!(!compare_ids(Some(&EntityId::from("")), Some(&EntityId::from(""))));
}
