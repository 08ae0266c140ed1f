//! GraphQL schema and resolvers.

use std::sync::Arc;
use std::time::Instant;

use async_graphql::{
    Context, EmptySubscription, Error, ErrorExtensions, Object, Result, Schema, SimpleObject,
};

use crate::application::dto::{CreateOrderDto, OrderDto};
use crate::application::use_cases::{CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase};
use crate::domain::order::{OrderError, OrderRepository};
use crate::error::ServiceError;
use crate::infrastructure::metrics::{self, Adapter};

/// Executable schema type.
pub type OrderSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Workflows reachable from resolvers, stored as schema data.
pub struct GraphqlWorkflows {
    create_order: CreateOrderUseCase<dyn OrderRepository>,
    list_orders: ListOrdersUseCase<dyn OrderRepository>,
    get_order: GetOrderUseCase<dyn OrderRepository>,
}

impl GraphqlWorkflows {
    /// Build all workflows over one repository.
    #[must_use]
    pub fn new(order_repo: &Arc<dyn OrderRepository>) -> Self {
        Self {
            create_order: CreateOrderUseCase::new(Arc::clone(order_repo)),
            list_orders: ListOrdersUseCase::new(Arc::clone(order_repo)),
            get_order: GetOrderUseCase::new(Arc::clone(order_repo)),
        }
    }
}

/// Build the schema with its workflows attached.
#[must_use]
pub fn build_schema(order_repo: &Arc<dyn OrderRepository>) -> OrderSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(GraphqlWorkflows::new(order_repo))
        .finish()
}

/// GraphQL `Order` type. Every field is nullable.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "Order")]
pub struct OrderObject {
    /// Order ID.
    pub id: Option<String>,
    /// Base price.
    pub price: Option<f64>,
    /// Tax.
    pub tax: Option<f64>,
    /// `price + tax`.
    #[graphql(name = "final_price")]
    pub final_price: Option<f64>,
}

impl From<OrderDto> for OrderObject {
    fn from(dto: OrderDto) -> Self {
        Self {
            price: Some(dto.price_f64()),
            tax: Some(dto.tax_f64()),
            final_price: Some(dto.final_price_f64()),
            id: Some(dto.id),
        }
    }
}

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> Error {
        let code = self.code();
        let context = self.context().to_vec();
        Error::new(self.message()).extend_with(move |_, e| {
            e.set("code", code.reason().to_string());
            for (key, value) in context {
                e.set(key, value);
            }
        })
    }
}

fn resolver_error(error: OrderError) -> Error {
    let error = ServiceError::from(error);
    metrics::record_request_error(Adapter::Graphql, error.code());
    if error.code().http_status().is_server_error() {
        tracing::error!(error = %error, "GraphQL resolver failed");
    }
    error.extend()
}

/// Query root.
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// All orders, newest first.
    async fn list_orders(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<OrderObject>>>> {
        let started = Instant::now();
        let workflows = ctx.data::<GraphqlWorkflows>()?;
        let orders = workflows
            .list_orders
            .execute()
            .await
            .map_err(resolver_error)?;

        metrics::record_orders_listed(Adapter::Graphql);
        metrics::record_request_duration(Adapter::Graphql, "list_orders", started.elapsed());
        Ok(Some(
            orders
                .into_iter()
                .map(|order| Some(OrderObject::from(order)))
                .collect(),
        ))
    }

    /// One order by id.
    async fn order(&self, ctx: &Context<'_>, id: String) -> Result<Option<OrderObject>> {
        let started = Instant::now();
        let workflows = ctx.data::<GraphqlWorkflows>()?;
        let order = workflows
            .get_order
            .execute(&id)
            .await
            .map_err(resolver_error)?;

        metrics::record_request_duration(Adapter::Graphql, "get_order", started.elapsed());
        Ok(Some(order.into()))
    }
}

/// Mutation root.
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create an order; `final_price` is computed as `price + tax`.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        price: f64,
        tax: f64,
    ) -> Result<Option<OrderObject>> {
        let started = Instant::now();
        let workflows = ctx.data::<GraphqlWorkflows>()?;
        let dto = CreateOrderDto::from_f64(price, tax).map_err(resolver_error)?;
        let order = workflows
            .create_order
            .execute(dto)
            .await
            .map_err(resolver_error)?;

        metrics::record_order_created(Adapter::Graphql);
        metrics::record_request_duration(Adapter::Graphql, "create_order", started.elapsed());
        Ok(Some(order.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::repository::MockOrderRepository;
    use crate::infrastructure::persistence::InMemoryOrderRepository;
    use async_graphql::Value;
    use serde_json::json;

    fn schema() -> OrderSchema {
        let repo: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
        build_schema(&repo)
    }

    #[tokio::test]
    async fn create_then_list() {
        let schema = schema();

        let created = schema
            .execute("mutation { createOrder(price: 100.0, tax: 10.0) { id price tax final_price } }")
            .await;
        assert!(created.errors.is_empty(), "{:?}", created.errors);
        let created = created.data.into_json().unwrap();
        assert_eq!(created["createOrder"]["final_price"], json!(110.0));

        let listed = schema
            .execute("{ listOrders { id final_price } }")
            .await
            .data
            .into_json()
            .unwrap();
        assert_eq!(listed["listOrders"][0]["id"], created["createOrder"]["id"]);
    }

    #[tokio::test]
    async fn list_orders_empty() {
        let response = schema().execute("{ listOrders { id } }").await;
        assert!(response.errors.is_empty());
        assert_eq!(response.data.into_json().unwrap(), json!({ "listOrders": [] }));
    }

    #[tokio::test]
    async fn negative_tax_is_field_error() {
        let response = schema()
            .execute("mutation { createOrder(price: 1.0, tax: -1.0) { id } }")
            .await;

        assert_eq!(response.errors.len(), 1);
        let extensions = response.errors[0].extensions.as_ref().unwrap();
        assert_eq!(extensions.get("code"), Some(&Value::String("INVALID_REQUEST".to_string())));
        assert_eq!(extensions.get("field"), Some(&Value::String("tax".to_string())));
        assert_eq!(response.data.into_json().unwrap(), json!({ "createOrder": null }));
    }

    #[tokio::test]
    async fn storage_failure_nulls_only_the_failing_field() {
        let mut mock = MockOrderRepository::new();
        mock.expect_find_all()
            .returning(|| Err(OrderError::storage("connection reset")));
        let repo: Arc<dyn OrderRepository> = Arc::new(mock);

        let response = build_schema(&repo).execute("{ listOrders { id } }").await;

        assert_eq!(response.errors.len(), 1);
        let extensions = response.errors[0].extensions.as_ref().unwrap();
        assert_eq!(extensions.get("code"), Some(&Value::String("STORAGE_ERROR".to_string())));
        assert_eq!(response.data.into_json().unwrap(), json!({ "listOrders": null }));
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let response = schema().execute(r#"{ order(id: "nope") { id } }"#).await;

        assert_eq!(response.errors.len(), 1);
        let extensions = response.errors[0].extensions.as_ref().unwrap();
        assert_eq!(extensions.get("code"), Some(&Value::String("ORDER_NOT_FOUND".to_string())));
    }

    #[test]
    fn sdl_uses_expected_names() {
        let sdl = schema().sdl();
        assert!(sdl.contains("listOrders: [Order]\n"));
        assert!(sdl.contains("createOrder("));
        assert!(sdl.contains("tax: Float!"));
        assert!(sdl.contains("type Order {"));
        assert!(sdl.contains("id: String\n"));
        assert!(sdl.contains("final_price: Float\n"));
    }
}
