//! GraphQL API adapter.
//!
//! `Query.listOrders`, `Query.order(id)` and `Mutation.createOrder(price, tax)`
//! served at `/graphql` (POST only, permissive CORS).

mod schema;
mod server;

pub use schema::{GraphqlWorkflows, MutationRoot, OrderObject, OrderSchema, QueryRoot, build_schema};
pub use server::create_graphql_router;
