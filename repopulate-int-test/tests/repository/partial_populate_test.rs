use repopulate::collection::{EntityId, Update};
use repopulate::common::Value;
use repopulate::doc;
use repopulate::errors::{ErrorKind, PopulateResult};
use repopulate::filter::{all, field};
use repopulate::populated_projection;
use repopulate::projection::PopulatedProjection;
use repopulate::store::InMemoryStoreConfig;
use repopulate_int_test::test_util::{
    ann, create_test_context, create_test_context_with, is_entity_not_found, seed, TODO, USER,
};
use serde_json::json;

#[tokio::test]
async fn test_all_fields_with_one_level_population() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.partial("User", USER)?;

    let projection = populated_projection! { __all: true, todos: { comments: true } };
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;

    assert_eq!(
        user,
        doc! {
            "_id": "u1",
            firstName: "Ann",
            lastName: "Lee",
            email: "ann@example.com",
            todos: [
                { "_id": "t1", comments: ["c1", "c2"] },
                { "_id": "t2", comments: [] }
            ]
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_populate_without_restriction() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.partial("User", USER)?;

    let projection = populated_projection! { firstName: true, todos: null };
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;

    assert_eq!(user.get("firstName"), Value::from("Ann"));
    assert_eq!(user.get("email"), Value::Null);
    assert_eq!(
        user.get("todos"),
        Value::Array(vec![
            Value::Document(doc! {
                "_id": "t1", title: "write", done: false, owner: "u1", comments: ["c1", "c2"]
            }),
            Value::Document(doc! {
                "_id": "t2", title: "review", done: true, owner: "u1", comments: []
            }),
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_selection_string_and_exclusions() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.partial("User", USER)?;

    let projection = populated_projection! { todos: "title" };
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;
    assert_eq!(
        user,
        doc! {
            "_id": "u1",
            todos: [{ "_id": "t1", title: "write" }, { "_id": "t2", title: "review" }]
        }
    );

    let projection = populated_projection! { todos: { done: false, comments: false, owner: 0 } };
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;
    assert_eq!(
        user.get("todos"),
        Value::Array(vec![
            Value::Document(doc! { "_id": "t1", title: "write" }),
            Value::Document(doc! { "_id": "t2", title: "review" }),
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_get_populated_many() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let todos = ctx.partial("Todo", TODO)?;

    let projection = populated_projection! { title: true, owner: "email" };
    let found = todos
        .get_populated(field("done").eq(false), Some(&projection), None, None, None)
        .await?;
    assert_eq!(
        found,
        vec![doc! { "_id": "t1", title: "write", owner: { "_id": "u1", email: "ann@example.com" } }]
    );

    let found = todos.get_populated(all(), None, Some(1.into()), None, None).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("owner"), Value::from("u1"));
    Ok(())
}

#[tokio::test]
async fn test_projection_parsed_from_json() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let todos = ctx.partial("Todo", TODO)?;

    let projection = PopulatedProjection::from_json(&json!({
        "title": 1,
        "comments": { "text": true },
        "owner": null
    }))?;
    let todo = todos
        .get_one_populated(field("title").eq("write"), projection.as_ref())
        .await?;

    assert_eq!(todo.get("title"), Value::from("write"));
    assert_eq!(todo.get("done"), Value::Null);
    assert_eq!(
        todo.get("comments"),
        Value::Array(vec![
            Value::Document(doc! { "_id": "c1", text: "first" }),
            Value::Document(doc! { "_id": "c2", text: "second" }),
        ])
    );
    assert_eq!(todo.get("owner.firstName"), Value::from("Ann"));
    Ok(())
}

#[tokio::test]
async fn test_update_populated() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let todos = ctx.partial("Todo", TODO)?;
    let t2 = EntityId::from("t2");

    let projection = populated_projection! { title: true, owner: { firstName: true } };
    let todo = todos
        .update_populated_by_id(Some(&t2), Update::new().set("title", "ship"), Some(&projection))
        .await?;
    assert_eq!(
        todo,
        doc! { "_id": "t2", title: "ship", owner: { "_id": "u1", firstName: "Ann" } }
    );

    let todo = todos
        .update_one_populated(field("title").eq("write"), Update::new().set("done", true), Some(&projection))
        .await?;
    assert_eq!(todo.get("owner.firstName"), Value::from("Ann"));

    let ghost = EntityId::from("ghost");
    assert_eq!(
        todos
            .update_populated_by_id_or_null(Some(&ghost), Update::new().set("done", true), None)
            .await?,
        None
    );
    assert_eq!(
        todos
            .update_one_populated_or_null(field("title").eq("none"), Update::new().set("done", true), None)
            .await?,
        None
    );
    let err = todos
        .update_one_populated(field("title").eq("none"), Update::new().set("done", true), None)
        .await
        .unwrap_err();
    assert!(is_entity_not_found(&err));
    Ok(())
}

#[tokio::test]
async fn test_populated_not_found() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.partial("User", USER)?;
    let projection = populated_projection! { todos: null };

    let err = users.get_populated_by_id(None, Some(&projection)).await.unwrap_err();
    assert!(is_entity_not_found(&err));
    let ghost = EntityId::from("ghost");
    assert_eq!(users.get_populated_by_id_or_null(Some(&ghost), Some(&projection)).await?, None);
    assert_eq!(
        users
            .get_one_populated_or_null(field("firstName").eq("Cid"), Some(&projection))
            .await?,
        None
    );
    let err = users
        .get_one_populated(field("firstName").eq("Cid"), Some(&projection))
        .await
        .unwrap_err();
    assert!(is_entity_not_found(&err));
    Ok(())
}

#[tokio::test]
async fn test_undeclared_relation() -> PopulateResult<()> {
    let projection = populated_projection! { firstName: null };

    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.partial("User", USER)?;
    let err = users.get_populated_by_id(Some(&ann()), Some(&projection)).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidFieldName);

    let ctx = create_test_context_with(InMemoryStoreConfig::new().strict_populate(false))?;
    seed(&ctx).await?;
    let users = ctx.partial("User", USER)?;
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;
    assert_eq!(user, doc! { "_id": "u1", firstName: "Ann" });
    Ok(())
}
