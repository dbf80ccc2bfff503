//! # HTTP Server
//!
//! Router, request envelope and caller resolution.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /graphql                                                          │
//! │  Authorization: Bearer eyJ...                                           │
//! │  { "query": "query GetMyOrders { myOrders { id } }", "variables": {} }  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CorsLayer ─► TraceLayer ─► graphql_handler                             │
//! │                                  │                                      │
//! │                 ┌────────────────┼────────────────┐                     │
//! │                 ▼                ▼                ▼                     │
//! │          parse body,      resolve token     Operation::parse            │
//! │          root field       → Caller          (typed variables)           │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                        resolvers::execute                               │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │  200 { "data": { "myOrders": [...] } }                                  │
//! │  200 { "data": null, "errors": [{ "message", "code" }] }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::resolvers::{self, Caller};
use crate::schema::{self, Operation, RootField};
use crate::AppState;

/// Incoming request body.
///
/// With a `query` document, its root field picks the operation and
/// `operationName` is only the client's label. Without one,
/// `operationName` must be the root field name itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Value,
}

impl GraphQLRequest {
    /// The operation to run and the key its result goes under.
    pub fn root_field(&self) -> ApiResult<RootField> {
        match (&self.query, &self.operation_name) {
            (Some(query), _) => schema::root_field(query)
                .ok_or_else(|| ApiError::bad_input("Query has no root field")),
            (None, Some(name)) => Ok(RootField {
                name: name.clone(),
                response_key: name.clone(),
            }),
            (None, None) => Err(ApiError::bad_input(
                "Request must carry a query or an operationName",
            )),
        }
    }
}

/// Response envelope. `errors` is omitted on success.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLResponse {
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiError>,
}

impl GraphQLResponse {
    fn success(response_key: String, payload: Value) -> Self {
        let mut data = Map::new();
        data.insert(response_key, payload);
        GraphQLResponse {
            data: Some(Value::Object(data)),
            errors: Vec::new(),
        }
    }

    fn failure(error: ApiError) -> Self {
        GraphQLResponse {
            data: None,
            errors: vec![error],
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Single operation endpoint. Always answers 200 with an envelope.
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<GraphQLResponse> {
    let caller = caller_from_headers(&state, &headers);

    let response = match handle(&state, &caller, &body).await {
        Ok((name, payload)) => GraphQLResponse::success(name, payload),
        Err(error) => {
            debug!(code = ?error.code, message = %error.message, "Operation failed");
            GraphQLResponse::failure(error)
        }
    };

    Json(response)
}

async fn handle(state: &AppState, caller: &Caller, body: &[u8]) -> ApiResult<(String, Value)> {
    let request: GraphQLRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_input(format!("Malformed request body: {e}")))?;

    let field = request.root_field()?;
    let operation = Operation::parse(&field.name, request.variables)?;
    let payload = resolvers::execute(state, caller, operation).await?;

    Ok((field.response_key, payload))
}

/// Reads the Authorization header. Missing or bad tokens give an
/// anonymous caller.
fn caller_from_headers(state: &AppState, headers: &HeaderMap) -> Caller {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| state.tokens.resolve_token(value))
        .map(Caller::user)
        .unwrap_or_else(Caller::anonymous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bazaar_store::seed::SEED_PASSWORD;
    use bazaar_store::MarketStore;
    use serde_json::json;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = ApiConfig {
            password_hash_cost: 1,
            ..ApiConfig::default()
        };
        let hash = crate::auth::hash_password(SEED_PASSWORD, 1).unwrap();
        AppState::new(config, MarketStore::seeded(&hash))
    }

    async fn call(state: &AppState, token: Option<&str>, operation: &str, variables: Value) -> Value {
        post(
            state,
            token,
            json!({ "operationName": operation, "variables": variables }),
        )
        .await
    }

    async fn post(state: &AppState, token: Option<&str>, body: Value) -> Value {
        let mut request = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let request = request.body(Body::from(body.to_string())).unwrap();

        let response = router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(state: &AppState, email: &str) -> String {
        let response = call(
            state,
            None,
            "login",
            json!({ "email": email, "password": SEED_PASSWORD }),
        )
        .await;
        response["data"]["login"]["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn error_code(response: &Value) -> &str {
        response["errors"][0]["code"].as_str().unwrap()
    }

    fn error_message(response: &Value) -> &str {
        response["errors"][0]["message"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_register_then_login_resolves_same_user() {
        let state = test_state();

        let registered = call(
            &state,
            None,
            "register",
            json!({
                "email": "carol@buyer.com",
                "password": "hunter22",
                "name": "Carol",
                "role": "BUYER"
            }),
        )
        .await;
        let user_id = registered["data"]["register"]["user"]["id"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(registered["data"]["register"]["user"].get("passwordHash").is_none());

        let logged_in = call(
            &state,
            None,
            "login",
            json!({ "email": "carol@buyer.com", "password": "hunter22" }),
        )
        .await;
        let token = logged_in["data"]["login"]["token"].as_str().unwrap();
        assert_eq!(state.tokens.resolve_token(token).as_deref(), Some(user_id.as_str()));

        let me = call(&state, Some(token), "me", json!({})).await;
        assert_eq!(me["data"]["me"]["id"], user_id.as_str());
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let state = test_state();
        let variables = json!({
            "email": "jane@buyer.com",
            "password": "password123",
            "name": "Jane Again",
            "role": "BUYER"
        });

        let response = call(&state, None, "register", variables).await;

        assert!(response["data"].is_null());
        assert_eq!(error_code(&response), "BAD_USER_INPUT");
        assert_eq!(error_message(&response), "Email already in use");
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let state = test_state();
        let response = call(
            &state,
            None,
            "login",
            json!({ "email": "jane@buyer.com", "password": "nope-nope" }),
        )
        .await;

        assert_eq!(error_code(&response), "UNAUTHENTICATED");
        assert_eq!(error_message(&response), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_invalid_token_is_anonymous() {
        let state = test_state();

        let response = call(&state, Some("garbage"), "myOrders", json!({})).await;
        assert_eq!(error_code(&response), "UNAUTHENTICATED");

        // Public queries still work for anonymous callers.
        let response = call(&state, Some("garbage"), "products", Value::Null).await;
        assert_eq!(response["data"]["products"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_order_for_entire_stock_sells_out() {
        let state = test_state();
        let token = login(&state, "jane@buyer.com").await;

        let response = call(
            &state,
            Some(&token),
            "createOrder",
            json!({ "items": [{ "productId": "104", "quantity": 3 }] }),
        )
        .await;
        let order = &response["data"]["createOrder"];
        assert_eq!(order["status"], "PENDING");
        assert_eq!(order["totalPrice"], 1499.97);
        assert_eq!(order["items"][0]["product"]["status"], "SOLD");

        let product = call(&state, None, "product", json!({ "id": "104" })).await;
        assert_eq!(product["data"]["product"]["stock"], 0);
        assert_eq!(product["data"]["product"]["status"], "SOLD");

        let listed = call(&state, None, "products", json!({})).await;
        assert_eq!(listed["data"]["products"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_order_over_stock_names_product() {
        let state = test_state();
        let token = login(&state, "alice@buyer.com").await;

        let response = call(
            &state,
            Some(&token),
            "createOrder",
            json!({ "items": [
                { "productId": "103", "quantity": 1 },
                { "productId": "106", "quantity": 3 }
            ] }),
        )
        .await;

        assert_eq!(error_code(&response), "BAD_USER_INPUT");
        assert_eq!(error_message(&response), "Insufficient stock for Designer Handbag");

        let shoes = state.store.read().await.find_product("103").unwrap().stock;
        assert_eq!(shoes, 25);
    }

    #[tokio::test]
    async fn test_average_rating_over_reviews() {
        let state = test_state();
        let seller = login(&state, "john@seller.com").await;

        // Fresh listing so the ratings are exactly [5, 4, 5].
        let added = call(
            &state,
            Some(&seller),
            "addProduct",
            json!({ "input": {
                "title": "Vintage Camera",
                "description": "Film camera in working order",
                "price": 250,
                "category": "ELECTRONICS",
                "condition": "GOOD",
                "stock": 1
            } }),
        )
        .await;
        let product_id = added["data"]["addProduct"]["id"].as_str().unwrap().to_string();
        assert!(added["data"]["addProduct"]["averageRating"].is_null());

        for (email, rating) in [
            ("jane@buyer.com", 5),
            ("alice@buyer.com", 4),
            ("bob@seller.com", 5),
        ] {
            let token = login(&state, email).await;
            let response = call(
                &state,
                Some(&token),
                "addReview",
                json!({ "input": { "productId": product_id, "rating": rating, "comment": "ok" } }),
            )
            .await;
            assert!(response.get("errors").is_none(), "{response}");
        }

        let product = call(&state, None, "product", json!({ "id": product_id })).await;
        let avg = product["data"]["product"]["averageRating"].as_f64().unwrap();
        assert!((avg - 14.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_delete_product_removes_reviews() {
        let state = test_state();
        let token = login(&state, "bob@seller.com").await;

        let before = call(&state, None, "productReviews", json!({ "productId": "104" })).await;
        assert_eq!(before["data"]["productReviews"].as_array().unwrap().len(), 1);

        let deleted = call(&state, Some(&token), "deleteProduct", json!({ "id": "104" })).await;
        assert_eq!(deleted["data"]["deleteProduct"], true);

        let after = call(&state, None, "productReviews", json!({ "productId": "104" })).await;
        assert_eq!(after["data"]["productReviews"], json!([]));
    }

    #[tokio::test]
    async fn test_review_rules() {
        let state = test_state();

        let jane = login(&state, "jane@buyer.com").await;
        let again = call(
            &state,
            Some(&jane),
            "addReview",
            json!({ "input": { "productId": "103", "rating": 4, "comment": "again" } }),
        )
        .await;
        assert_eq!(error_code(&again), "BAD_USER_INPUT");
        assert_eq!(error_message(&again), "You have already reviewed this product");

        let bob = login(&state, "bob@seller.com").await;
        let own = call(
            &state,
            Some(&bob),
            "addReview",
            json!({ "input": { "productId": "103", "rating": 5, "comment": "mine" } }),
        )
        .await;
        assert_eq!(error_code(&own), "FORBIDDEN");
        assert_eq!(error_message(&own), "Cannot review your own product");
    }

    #[tokio::test]
    async fn test_page_zero_rejected() {
        let state = test_state();
        let response = call(
            &state,
            None,
            "paginatedProducts",
            json!({ "page": 0, "limit": 10 }),
        )
        .await;

        assert_eq!(error_code(&response), "BAD_USER_INPUT");
        assert_eq!(error_message(&response), "Page and limit must be positive numbers");
    }

    #[tokio::test]
    async fn test_price_range_filter() {
        let state = test_state();
        let response = call(
            &state,
            None,
            "productsByFilter",
            json!({ "filter": { "minPrice": 100, "maxPrice": 500 } }),
        )
        .await;

        let products = response["data"]["productsByFilter"].as_array().unwrap();
        let ids: Vec<_> = products.iter().map(|p| p["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["103", "104"]);
        for product in products {
            let price = product["price"].as_f64().unwrap();
            assert!((100.0..=500.0).contains(&price));
        }

        let stale = call(
            &state,
            None,
            "productsByFilter",
            json!({ "filter": { "minPriceCents": 10000 } }),
        )
        .await;
        assert!(stale["data"].is_null());
        assert_eq!(error_code(&stale), "BAD_USER_INPUT");
    }

    #[tokio::test]
    async fn test_query_document_selects_operation() {
        let state = test_state();

        let response = post(
            &state,
            None,
            json!({
                "operationName": "GetProducts",
                "query": "query GetProducts {\n  products {\n    id\n    price\n    seller { id name }\n  }\n}",
                "variables": {}
            }),
        )
        .await;
        let products = response["data"]["products"].as_array().unwrap();
        assert_eq!(products.len(), 8);
        assert_eq!(products[0]["price"], 999.99);

        let token = login(&state, "jane@buyer.com").await;
        let response = post(
            &state,
            Some(&token),
            json!({
                "operationName": "CreateOrder",
                "query": "mutation CreateOrder($items: [OrderItemInput!]!) { placed: createOrder(items: $items) { id totalPrice } }",
                "variables": { "items": [{ "productId": "108", "quantity": 2 }] }
            }),
        )
        .await;
        assert_eq!(response["data"]["placed"]["totalPrice"], 91.98);
    }

    #[tokio::test]
    async fn test_request_without_operation() {
        let state = test_state();

        let response = post(&state, None, json!({ "variables": {} })).await;
        assert_eq!(error_code(&response), "BAD_USER_INPUT");

        let response = post(&state, None, json!({ "query": "query Nothing" })).await;
        assert_eq!(error_message(&response), "Query has no root field");
    }

    #[tokio::test]
    async fn test_buyer_cannot_add_product() {
        let state = test_state();
        let token = login(&state, "jane@buyer.com").await;

        let response = call(
            &state,
            Some(&token),
            "addProduct",
            json!({ "input": {
                "title": "Old Lamp",
                "description": "Works",
                "price": 15.0,
                "category": "HOME",
                "condition": "FAIR",
                "stock": 1
            } }),
        )
        .await;

        assert_eq!(error_code(&response), "FORBIDDEN");
        assert_eq!(error_message(&response), "Only sellers can add products");
    }

    #[tokio::test]
    async fn test_malformed_requests() {
        let state = test_state();

        let unknown = call(&state, None, "dropTables", json!({})).await;
        assert_eq!(error_code(&unknown), "BAD_USER_INPUT");

        let request = Request::builder()
            .method("POST")
            .uri("/graphql")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["data"].is_null());
        assert_eq!(error_code(&body), "BAD_USER_INPUT");
    }

    #[tokio::test]
    async fn test_update_order_status_by_seller() {
        let state = test_state();
        let john = login(&state, "john@seller.com").await;

        let response = call(
            &state,
            Some(&john),
            "updateOrderStatus",
            json!({ "id": "202", "status": "DELIVERED" }),
        )
        .await;
        assert_eq!(response["data"]["updateOrderStatus"]["status"], "DELIVERED");

        let bob = login(&state, "bob@seller.com").await;
        let response = call(
            &state,
            Some(&bob),
            "updateOrderStatus",
            json!({ "id": "202", "status": "CANCELLED" }),
        )
        .await;
        assert_eq!(error_code(&response), "FORBIDDEN");
    }
}
