use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use repopulate::collection::EntityId;
use repopulate::doc;
use repopulate::errors::{ErrorKind, PopulateError, PopulateResult};
use repopulate::repository::{
    MixinRepository, PartialPopulateRepository, RecursivePopulateRepository, Repository, RepositoryMetadata,
};
use repopulate::store::{InMemoryStore, InMemoryStoreConfig, ModelSchema};
use serde::{Deserialize, Serialize};

pub const USER: &str = "USER";
pub const TODO: &str = "TODO";
pub const COMMENT: &str = "COMMENT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub todos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub done: bool,
    pub owner: Option<String>,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// Builds a user with random names and no todos.
pub fn generate_user() -> User {
    User {
        id: None,
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: FreeEmail().fake(),
        todos: Vec::new(),
    }
}

/// The not-found error used by every repository of the test domain.
pub fn entity_not_found(entity_name: &str) -> PopulateError {
    PopulateError::new(
        &format!("{} not found", entity_name),
        ErrorKind::Extension("EntityNotFound".to_string()),
    )
}

pub fn is_entity_not_found(error: &PopulateError) -> bool {
    error.kind() == &ErrorKind::Extension("EntityNotFound".to_string())
}

/// A store with the `User` / `Todo` / `Comment` models registered.
///
/// - `User.todos` references `Todo`
/// - `Todo.owner` references `User`, `Todo.comments` references `Comment`
/// - `Comment.author` references `User`
#[derive(Clone)]
pub struct TestContext {
    store: InMemoryStore,
}

impl TestContext {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub fn metadata(&self, entity_name: &str, entity_type: &str) -> PopulateResult<RepositoryMetadata> {
        Ok(RepositoryMetadata::builder(entity_name)
            .model(self.store.model(entity_name)?)
            .entity_type(entity_type)
            .not_found_error(entity_not_found)
            .build())
    }

    pub fn users(&self) -> PopulateResult<Repository> {
        Ok(Repository::new(self.metadata("User", USER)?))
    }

    pub fn todos(&self) -> PopulateResult<Repository> {
        Ok(Repository::new(self.metadata("Todo", TODO)?))
    }

    pub fn partial(&self, entity_name: &str, entity_type: &str) -> PopulateResult<PartialPopulateRepository> {
        Ok(PartialPopulateRepository::partial(self.metadata(entity_name, entity_type)?))
    }

    pub fn recursive(&self, entity_name: &str, entity_type: &str) -> PopulateResult<RecursivePopulateRepository> {
        Ok(RecursivePopulateRepository::recursive(self.metadata(entity_name, entity_type)?))
    }

    /// A router over the todo and comment repositories.
    pub fn router(&self) -> PopulateResult<MixinRepository<RecursivePopulateRepository>> {
        Ok(MixinRepository::new(vec![
            self.recursive("Todo", TODO)?,
            self.recursive("Comment", COMMENT)?,
        ]))
    }
}

pub fn create_test_context() -> PopulateResult<TestContext> {
    create_test_context_with(InMemoryStoreConfig::new())
}

pub fn create_test_context_with(config: InMemoryStoreConfig) -> PopulateResult<TestContext> {
    let store = InMemoryStore::new(config);
    store.register(ModelSchema::new("User").reference("todos", "Todo"))?;
    store.register(
        ModelSchema::new("Todo")
            .reference("owner", "User")
            .reference("comments", "Comment"),
    )?;
    store.register(ModelSchema::new("Comment").reference("author", "User"))?;
    Ok(TestContext::new(store))
}

pub fn ann() -> EntityId {
    EntityId::from("u1")
}

pub fn bob() -> EntityId {
    EntityId::from("u2")
}

/// Inserts two users, two todos owned by Ann and two comments on the first
/// todo.
pub async fn seed(ctx: &TestContext) -> PopulateResult<()> {
    let users = ctx.store().model("User")?;
    users
        .insert(doc! {
            "_id": "u1",
            firstName: "Ann",
            lastName: "Lee",
            email: "ann@example.com",
            todos: ["t1", "t2"]
        })
        .await?;
    users
        .insert(doc! {
            "_id": "u2",
            firstName: "Bob",
            lastName: "Ray",
            email: "bob@example.com",
            todos: []
        })
        .await?;

    let todos = ctx.store().model("Todo")?;
    todos
        .insert(doc! {
            "_id": "t1",
            title: "write",
            done: false,
            owner: "u1",
            comments: ["c1", "c2"]
        })
        .await?;
    todos
        .insert(doc! {
            "_id": "t2",
            title: "review",
            done: true,
            owner: "u1",
            comments: []
        })
        .await?;

    let comments = ctx.store().model("Comment")?;
    comments
        .insert(doc! { "_id": "c1", text: "first", author: "u2" })
        .await?;
    comments
        .insert(doc! { "_id": "c2", text: "second", author: "u1" })
        .await?;
    Ok(())
}
