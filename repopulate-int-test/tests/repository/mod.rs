mod mixin_repository_test;
mod partial_populate_test;
mod recursive_populate_test;
mod repository_test;
