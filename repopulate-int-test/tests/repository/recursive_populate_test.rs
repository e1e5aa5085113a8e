use repopulate::collection::{EntityId, Update};
use repopulate::common::Value;
use repopulate::doc;
use repopulate::errors::PopulateResult;
use repopulate::filter::field;
use repopulate::projection::RecursiveProjection;
use repopulate::recursive_projection;
use repopulate_int_test::test_util::{ann, create_test_context, is_entity_not_found, seed, TODO, USER};
use serde_json::json;

#[tokio::test]
async fn test_relation_only_level_keeps_id_and_nested_relations() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let todos = ctx.recursive("Todo", TODO)?;
    let t1 = EntityId::from("t1");

    let projection = recursive_projection! {
        title: true,
        comments: { author: { email: true, todos: true } }
    };
    let todo = todos.get_populated_by_id(Some(&t1), Some(&projection)).await?;

    assert_eq!(
        todo,
        doc! {
            "_id": "t1",
            title: "write",
            comments: [
                { "_id": "c1", author: { "_id": "u2", email: "bob@example.com", todos: [] } },
                { "_id": "c2", author: { "_id": "u1", email: "ann@example.com", todos: ["t1", "t2"] } }
            ]
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_three_levels_deep() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.recursive("User", USER)?;

    let projection = recursive_projection! {
        firstName: true,
        todos: {
            title: true,
            comments: { text: true, author: { firstName: true } }
        }
    };
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;

    assert_eq!(
        user,
        doc! {
            "_id": "u1",
            firstName: "Ann",
            todos: [
                {
                    "_id": "t1",
                    title: "write",
                    comments: [
                        { "_id": "c1", text: "first", author: { "_id": "u2", firstName: "Bob" } },
                        { "_id": "c2", text: "second", author: { "_id": "u1", firstName: "Ann" } }
                    ]
                },
                { "_id": "t2", title: "review", comments: [] }
            ]
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_populate_at_depth_selects_id_only() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.recursive("User", USER)?;

    let projection = recursive_projection! { todos: { title: true, comments: null } };
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;

    assert_eq!(
        user.get("todos"),
        Value::Array(vec![
            Value::Document(doc! {
                "_id": "t1",
                title: "write",
                comments: [{ "_id": "c1" }, { "_id": "c2" }]
            }),
            Value::Document(doc! { "_id": "t2", title: "review", comments: [] }),
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_nested_all_keeps_every_field() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.recursive("User", USER)?;

    let projection = recursive_projection! { email: true, todos: { __all: true, owner: "email" } };
    let user = users
        .get_one_populated(field("firstName").eq("Ann"), Some(&projection))
        .await?;

    assert_eq!(user.get("email"), Value::from("ann@example.com"));
    assert_eq!(user.get("firstName"), Value::Null);
    assert_eq!(user.get("todos.1.title"), Value::from("review"));
    assert_eq!(user.get("todos.1.done"), Value::from(true));
    assert_eq!(user.get("todos.0.comments"), Value::Array(vec![Value::from("c1"), Value::from("c2")]));
    assert_eq!(
        user.get("todos.0.owner"),
        Value::Document(doc! { "_id": "u1", email: "ann@example.com" })
    );
    Ok(())
}

// An empty nested projection still returns the identifier of each relation.
#[tokio::test]
async fn test_empty_nested_projection_returns_ids() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.recursive("User", USER)?;

    let projection = recursive_projection! { todos: {} };
    let user = users.get_populated_by_id(Some(&ann()), Some(&projection)).await?;
    assert_eq!(
        user,
        doc! { "_id": "u1", todos: [{ "_id": "t1" }, { "_id": "t2" }] }
    );
    Ok(())
}

#[tokio::test]
async fn test_cyclic_relations_follow_the_projection() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let users = ctx.recursive("User", USER)?;

    let projection = RecursiveProjection::from_json(&json!({
        "firstName": true,
        "todos": { "owner": { "todos": { "title": true } } }
    }))?;
    let found = users
        .get_populated(field("firstName").eq("Ann"), projection.as_ref(), None, None, None)
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get("todos.0.owner._id"), Value::from("u1"));
    assert_eq!(found[0].get("todos.0.owner.todos.1.title"), Value::from("review"));
    assert_eq!(found[0].get("todos.0.owner.todos.1.owner"), Value::Null);
    Ok(())
}

#[tokio::test]
async fn test_update_populated_recursively() -> PopulateResult<()> {
    let ctx = create_test_context()?;
    seed(&ctx).await?;
    let todos = ctx.recursive("Todo", TODO)?;
    let t2 = EntityId::from("t2");

    let projection = recursive_projection! { comments: { author: "email" } };
    let todo = todos
        .update_populated_by_id(Some(&t2), Update::new().push("comments", "c1"), Some(&projection))
        .await?;
    assert_eq!(
        todo,
        doc! {
            "_id": "t2",
            comments: [{ "_id": "c1", author: { "_id": "u2", email: "bob@example.com" } }]
        }
    );

    let blank = EntityId::from("  ");
    let err = todos
        .update_populated_by_id(Some(&blank), Update::new().set("done", true), Some(&projection))
        .await
        .unwrap_err();
    assert!(is_entity_not_found(&err));
    Ok(())
}
