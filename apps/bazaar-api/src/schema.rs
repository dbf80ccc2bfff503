//! # Operation Schema
//!
//! The typed routing table: every operation the endpoint accepts is one
//! variant of [`Operation`], with its variables as typed fields.
//!
//! ## Request Decoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /graphql                                                          │
//! │  { "operationName": "createOrder",                                      │
//! │    "variables": { "items": [{ "productId": "104", "quantity": 1 }] } }  │
//! │                              │                                          │
//! │                              │  serde (adjacently tagged)               │
//! │                              ▼                                          │
//! │  Operation::CreateOrder { items: vec![OrderItemInput { .. }] }          │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  resolvers::execute  ──►  resolvers::order::create_order               │
//! │                                                                         │
//! │  Unknown names, unknown or ill-typed variables fail here with           │
//! │  BAD_USER_INPUT, before any resolver runs.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Query Documents
//! Apollo-style clients send a `query` document and a client-side operation
//! name (`GetProducts`). [`root_field`] reads the first root field of the
//! document (`products`) and that field selects the [`Operation`]. The
//! endpoint is GraphQL-shaped JSON, not a GraphQL engine:
//! - only the first root field runs
//! - arguments come from `variables` by name; inline literals are not read
//! - the selection set is ignored and the full view is returned

use serde::Deserialize;
use serde_json::{json, Map, Value};

use bazaar_core::catalog::ProductFilter;
use bazaar_core::{
    OrderItemInput, OrderStatus, ProductCategory, ProductInput, ProductStatus, ReviewInput,
    UserRole,
};

use crate::error::{ApiError, ApiResult};

/// Every query and mutation, keyed by its wire name.
#[derive(Debug, Clone, Deserialize)]
#[serde(
    tag = "operationName",
    content = "variables",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    deny_unknown_fields
)]
pub enum Operation {
    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------
    Products {},
    Product {
        id: String,
    },
    ProductsByCategory {
        category: ProductCategory,
    },
    ProductsByFilter {
        #[serde(default)]
        filter: ProductFilter,
    },
    PaginatedProducts {
        page: i64,
        limit: i64,
    },
    User {
        id: String,
    },
    Me {},
    Orders {},
    MyOrders {},
    MyProducts {},
    ProductReviews {
        product_id: String,
    },

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------
    Register {
        email: String,
        password: String,
        name: String,
        role: UserRole,
    },
    Login {
        email: String,
        password: String,
    },
    AddProduct {
        input: ProductInput,
    },
    UpdateProduct {
        id: String,
        input: ProductInput,
        status: Option<ProductStatus>,
    },
    DeleteProduct {
        id: String,
    },
    AddReview {
        input: ReviewInput,
    },
    DeleteReview {
        id: String,
    },
    CreateOrder {
        items: Vec<OrderItemInput>,
    },
    UpdateOrderStatus {
        id: String,
        status: OrderStatus,
    },
    UpdateUser {
        name: Option<String>,
        phone: Option<String>,
        address: Option<String>,
    },
}

impl Operation {
    /// Decodes `variables` as the arguments of the operation called `name`.
    ///
    /// Absent or `null` variables count as `{}`.
    pub fn parse(name: &str, variables: Value) -> ApiResult<Self> {
        let variables = match variables {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        serde_json::from_value(json!({
            "operationName": name,
            "variables": variables,
        }))
        .map_err(|e| ApiError::bad_input(format!("Invalid operation {name}: {e}")))
    }

    /// True for operations that change the store.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::Register { .. }
                | Operation::Login { .. }
                | Operation::AddProduct { .. }
                | Operation::UpdateProduct { .. }
                | Operation::DeleteProduct { .. }
                | Operation::AddReview { .. }
                | Operation::DeleteReview { .. }
                | Operation::CreateOrder { .. }
                | Operation::UpdateOrderStatus { .. }
                | Operation::UpdateUser { .. }
        )
    }
}

/// The field a query document selects at its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootField {
    /// Schema field name; selects the [`Operation`].
    pub name: String,
    /// Key under `data` in the response: the alias if one is given.
    pub response_key: String,
}

/// Finds the first root field of a query document.
///
/// ```text
///   mutation AddProduct($input: ProductInput!) {
///     created: addProduct(input: $input) { id }
///   }                                    ──► name "addProduct", key "created"
/// ```
///
/// Returns `None` when the document has no selection set.
pub fn root_field(document: &str) -> Option<RootField> {
    let source: String = document
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");

    let body = &source[source.find('{')? + 1..];
    let (first, rest) = take_name(body)?;

    match rest.trim_start().strip_prefix(':') {
        Some(aliased) => {
            let (name, _) = take_name(aliased)?;
            Some(RootField {
                name: name.to_string(),
                response_key: first.to_string(),
            })
        }
        None => Some(RootField {
            name: first.to_string(),
            response_key: first.to_string(),
        }),
    }
}

/// Splits a GraphQL name off the front of `input`, skipping ignored tokens.
fn take_name(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(input.len());
    let name = &input[..end];

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some((name, &input[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_without_variables() {
        let op = Operation::parse("products", Value::Null).unwrap();
        assert!(matches!(op, Operation::Products {}));
        assert!(!op.is_mutation());

        let op = Operation::parse("me", json!({})).unwrap();
        assert!(matches!(op, Operation::Me {}));
    }

    #[test]
    fn test_parse_camel_case_variables() {
        let op = Operation::parse("productReviews", json!({ "productId": "103" })).unwrap();
        match op {
            Operation::ProductReviews { product_id } => assert_eq!(product_id, "103"),
            other => panic!("unexpected operation: {other:?}"),
        }

        let op = Operation::parse(
            "createOrder",
            json!({ "items": [{ "productId": "104", "quantity": 2 }] }),
        )
        .unwrap();
        assert!(op.is_mutation());
        match op {
            Operation::CreateOrder { items } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].product_id, "104");
                assert_eq!(items[0].quantity, 2);
            }
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn test_parse_enums_and_optional_fields() {
        let op = Operation::parse(
            "register",
            json!({
                "email": "new@buyer.com",
                "password": "secret1",
                "name": "New",
                "role": "SELLER"
            }),
        )
        .unwrap();
        assert!(matches!(
            op,
            Operation::Register {
                role: UserRole::Seller,
                ..
            }
        ));

        let op = Operation::parse("updateUser", json!({ "phone": "+1555" })).unwrap();
        match op {
            Operation::UpdateUser {
                name,
                phone,
                address,
            } => {
                assert_eq!(name, None);
                assert_eq!(phone.as_deref(), Some("+1555"));
                assert_eq!(address, None);
            }
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operation_is_input_error() {
        let err = Operation::parse("dropDatabase", Value::Null).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadUserInput);
    }

    #[test]
    fn test_unknown_variables_are_input_errors() {
        let err = Operation::parse(
            "productsByFilter",
            json!({ "filter": { "minPriceCents": 10000 } }),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadUserInput);

        let err = Operation::parse("product", json!({ "id": "101", "slug": "iphone" }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadUserInput);
    }

    #[test]
    fn test_filter_variables_in_dollars() {
        let op = Operation::parse(
            "productsByFilter",
            json!({ "filter": { "minPrice": 100, "maxPrice": 500.5 } }),
        )
        .unwrap();
        match op {
            Operation::ProductsByFilter { filter } => {
                assert_eq!(filter.min_price_cents, Some(10000));
                assert_eq!(filter.max_price_cents, Some(50050));
            }
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn test_root_field_of_named_query() {
        let field = root_field(
            "query GetProductsByFilter($filter: ProductFilter!) {\n  productsByFilter(filter: $filter) { id }\n}",
        )
        .unwrap();
        assert_eq!(field.name, "productsByFilter");
        assert_eq!(field.response_key, "productsByFilter");
    }

    #[test]
    fn test_root_field_shorthand_alias_and_comments() {
        assert_eq!(root_field("{ me { id } }").unwrap().name, "me");

        let field = root_field(
            "# listing {\nmutation AddProduct($input: ProductInput!) {\n  created: addProduct(input: $input) { id }\n}",
        )
        .unwrap();
        assert_eq!(field.name, "addProduct");
        assert_eq!(field.response_key, "created");

        assert_eq!(root_field("query Broken"), None);
        assert_eq!(root_field("{ }"), None);
    }

    #[test]
    fn test_ill_typed_variables_are_input_errors() {
        let err = Operation::parse("paginatedProducts", json!({ "page": "one", "limit": 10 }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadUserInput);

        let err = Operation::parse("productsByCategory", json!({ "category": "CARS" }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadUserInput);
    }
}
