use actix_web::http::header::AUTHORIZATION;
use actix_web::{guard, web, web::Data, App, HttpRequest, HttpResponse, HttpServer};
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::Data as GraphQLData;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use serde::Deserialize;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::auth::JwtService;
use crate::dynamodb::DynamoTable;
use crate::graphql::auth::Token;
use crate::graphql::{build_schema, GraphQLSchema};

#[derive(Debug, Deserialize, Clone)]
pub struct ServingConfig {
    pub port: u16,
}

pub async fn run_and_serve(config: ServingConfig, dynamodb: DynamoTable, jwt: JwtService) -> () {
    let schema: GraphQLSchema = build_schema(dynamodb, jwt);
    info!("GraphQL server is running on http://localhost:{}", config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(Data::new(schema.clone()))
            .configure(configure)
    })
    .bind(("0.0.0.0", config.port))
    .expect("Unable to bind server")
    .run()
    .await
    .expect("Failed to start web server")
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::post().to(index))
            .route(
                web::get()
                    .guard(guard::Header("upgrade", "websocket"))
                    .to(index_ws),
            )
            .route(web::get().to(index_playground)),
    );
}

async fn index(
    schema: web::Data<GraphQLSchema>,
    http_request: HttpRequest,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(token) = bearer_token(&http_request) {
        request = request.data(token);
    }
    schema.execute(request).await.into()
}

async fn index_ws(
    schema: web::Data<GraphQLSchema>,
    request: HttpRequest,
    payload: web::Payload,
) -> actix_web::Result<HttpResponse> {
    GraphQLSubscription::new(GraphQLSchema::clone(&*schema))
        .on_connection_init(on_connection_init)
        .start(&request, payload)
}

async fn index_playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(
            GraphQLPlaygroundConfig::new("/").subscription_endpoint("/"),
        ))
}

/// Subscriptions present their credential in the connection payload under
/// the same key queries use as a header. A connection without one is still
/// accepted; resolvers requiring identity will reject it later.
async fn on_connection_init(value: serde_json::Value) -> async_graphql::Result<GraphQLData> {
    let mut data = GraphQLData::default();
    if let Some(token) = value.get("Authorization").and_then(|v| v.as_str()) {
        data.insert(Token(token.to_owned()));
    }
    Ok(data)
}

fn bearer_token(request: &HttpRequest) -> Option<Token> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| Token(value.to_owned()))
}
