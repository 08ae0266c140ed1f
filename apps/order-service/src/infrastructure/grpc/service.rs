//! gRPC OrderService implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};

use super::proto::order::v1::{
    CreateOrderRequest, GetOrderRequest, ListOrdersRequest, ListOrdersResponse, Order,
    order_service_server::{OrderService, OrderServiceServer},
};

use crate::application::dto::{CreateOrderDto, OrderDto};
use crate::application::use_cases::{CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase};
use crate::domain::order::{OrderError, OrderRepository};
use crate::error::ServiceError;
use crate::infrastructure::metrics::{self, Adapter};
use crate::infrastructure::server::ServerError;

/// gRPC OrderService adapter.
pub struct OrderServiceAdapter<O>
where
    O: OrderRepository + ?Sized,
{
    create_order: Arc<CreateOrderUseCase<O>>,
    list_orders: Arc<ListOrdersUseCase<O>>,
    get_order: Arc<GetOrderUseCase<O>>,
}

impl<O> OrderServiceAdapter<O>
where
    O: OrderRepository + ?Sized,
{
    /// Create a new OrderService adapter.
    pub const fn new(
        create_order: Arc<CreateOrderUseCase<O>>,
        list_orders: Arc<ListOrdersUseCase<O>>,
        get_order: Arc<GetOrderUseCase<O>>,
    ) -> Self {
        Self {
            create_order,
            list_orders,
            get_order,
        }
    }
}

/// Create an OrderService gRPC server over one repository.
pub fn create_order_service<O>(order_repo: &Arc<O>) -> OrderServiceServer<OrderServiceAdapter<O>>
where
    O: OrderRepository + ?Sized + 'static,
{
    OrderServiceServer::new(OrderServiceAdapter::new(
        Arc::new(CreateOrderUseCase::new(Arc::clone(order_repo))),
        Arc::new(ListOrdersUseCase::new(Arc::clone(order_repo))),
        Arc::new(GetOrderUseCase::new(Arc::clone(order_repo))),
    ))
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Self {
            price: dto.price_f64(),
            tax: dto.tax_f64(),
            final_price: dto.final_price_f64(),
            id: dto.id,
        }
    }
}

fn to_status(error: OrderError) -> Status {
    let error = ServiceError::from(error);
    metrics::record_request_error(Adapter::Grpc, error.code());
    if error.code().http_status().is_server_error() {
        tracing::error!(error = %error, "gRPC call failed");
    }
    error.to_status()
}

#[tonic::async_trait]
impl<O> OrderService for OrderServiceAdapter<O>
where
    O: OrderRepository + ?Sized + 'static,
{
    async fn create_order(
        &self,
        request: Request<CreateOrderRequest>,
    ) -> Result<Response<Order>, Status> {
        let started = Instant::now();
        let req = request.into_inner();

        let dto = CreateOrderDto::from_f64(req.price, req.tax).map_err(to_status)?;
        let order = self.create_order.execute(dto).await.map_err(to_status)?;

        metrics::record_order_created(Adapter::Grpc);
        metrics::record_request_duration(Adapter::Grpc, "create_order", started.elapsed());
        Ok(Response::new(order.into()))
    }

    async fn list_orders(
        &self,
        _request: Request<ListOrdersRequest>,
    ) -> Result<Response<ListOrdersResponse>, Status> {
        let started = Instant::now();
        let orders = self.list_orders.execute().await.map_err(to_status)?;

        metrics::record_orders_listed(Adapter::Grpc);
        metrics::record_request_duration(Adapter::Grpc, "list_orders", started.elapsed());
        Ok(Response::new(ListOrdersResponse {
            orders: orders.into_iter().map(Order::from).collect(),
        }))
    }

    async fn get_order(&self, request: Request<GetOrderRequest>) -> Result<Response<Order>, Status> {
        let started = Instant::now();
        let req = request.into_inner();

        if req.id.is_empty() {
            return Err(to_status(OrderError::validation("id", "must not be empty")));
        }

        let order = self.get_order.execute(&req.id).await.map_err(to_status)?;

        metrics::record_request_duration(Adapter::Grpc, "get_order", started.elapsed());
        Ok(Response::new(order.into()))
    }
}

/// gRPC listener bound to one port.
pub struct GrpcServer<O>
where
    O: OrderRepository + ?Sized + 'static,
{
    port: u16,
    service: OrderServiceServer<OrderServiceAdapter<O>>,
    cancel: CancellationToken,
}

impl<O> GrpcServer<O>
where
    O: OrderRepository + ?Sized + 'static,
{
    /// Create a new gRPC server.
    #[must_use]
    pub const fn new(
        port: u16,
        service: OrderServiceServer<OrderServiceAdapter<O>>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            port,
            service,
            cancel,
        }
    }

    /// Run the server until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if binding fails or the transport fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(self.port, e.to_string()))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::ServerFailed` on a transport error.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let port = listener.local_addr().map_or(self.port, |a| a.port());
        tracing::info!(server = "grpc", port, "Server listening");

        tonic::transport::Server::builder()
            .add_service(self.service)
            .serve_with_incoming_shutdown(
                TcpListenerStream::new(listener),
                self.cancel.cancelled_owned(),
            )
            .await
            .map_err(|e| ServerError::ServerFailed(e.to_string()))?;

        tracing::info!(server = "grpc", "Server stopped");
        Ok(())
    }
}
