use repopulate::collection::EntityId;
use repopulate::common::Value;
use repopulate::errors::{ErrorKind, PopulateResult};
use repopulate::recursive_projection;
use repopulate::repository::{EntityTypeAware, MixinRepository};
use repopulate_int_test::test_util::{create_test_context, seed, COMMENT, TODO, USER};

#[tokio::test]
async fn test_resolve_by_entity_type() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let router = ctx.router()?;

    let comments = router.resolve(COMMENT)?;
    assert_eq!(comments.entity_name(), "Comment");
    assert!(comments.match_by_entity_type(COMMENT));

    let c2 = EntityId::from("c2");
    let comment = comments
        .get_populated_by_id(Some(&c2), Some(&recursive_projection! { text: true, author: "firstName" }))
        .await?;
    assert_eq!(comment.get("author.firstName"), Value::from("Ann"));

    assert_eq!(router.resolve(TODO)?.entity_name(), "Todo");
    Ok(())
}

#[tokio::test]
async fn test_unknown_entity_type_fails() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    let router = ctx.router()?;

    let err = router.resolve(USER).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::RouteNotFound);
    assert_eq!(err.message(), "Can't use repository, associated with entity type USER");
    Ok(())
}

#[tokio::test]
async fn test_router_over_plain_repositories() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let router = MixinRepository::new(vec![ctx.users()?, ctx.todos()?]);

    let users = router.resolve(USER)?;
    assert_eq!(users.entity_type(), Some(USER));
    assert_eq!(users.count(repopulate::filter::all()).await?, 2);
    assert!(router.resolve(COMMENT).is_err());
    Ok(())
}
