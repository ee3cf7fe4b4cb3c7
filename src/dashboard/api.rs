//! JSON endpoint for ranked sales.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    analytics::{Dimension, TransactionAnalytics},
    dashboard::handlers::{MonthQuery, month_filter_from_query},
};

/// Sales grouped by `dimension` for the month in the query string, as a JSON
/// array of `{"name": ..., "total_sales": ...}` objects.
///
/// An unknown dimension or month gives a 400 response with a JSON error body.
pub async fn get_sales_by_dimension(
    State(analytics): State<TransactionAnalytics>,
    Path(dimension): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    match sales_by_dimension_json(&analytics, &dimension, query) {
        Ok(body) => Json(body).into_response(),
        Err(error) => {
            tracing::warn!("Rejected sales request: {error}");
            error.into_json_response()
        }
    }
}

fn sales_by_dimension_json(
    analytics: &TransactionAnalytics,
    dimension: &str,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<serde_json::Value, Error> {
    let dimension: Dimension = dimension.parse()?;
    let month_filter = month_filter_from_query(query)?;

    let groups = analytics
        .with_month_filter(month_filter)
        .sales_by_dimension(dimension);

    serde_json::to_value(groups).map_err(|error| Error::JSONSerializationError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        MonthFilter,
        analytics::{TransactionAnalytics, test_utils::product_sale},
        endpoints,
    };

    use super::get_sales_by_dimension;

    fn server() -> TestServer {
        let analytics = TransactionAnalytics::from_transactions(
            vec![
                product_sale("1", date!(2023 - 01 - 03), "Coffee", "Latte", "Astoria", 3.0),
                product_sale("2", date!(2023 - 01 - 04), "Tea", "Chai", "Astoria", 5.0),
                product_sale("3", date!(2023 - 02 - 01), "Coffee", "Latte", "Hell's Kitchen", 4.0),
            ],
            MonthFilter::All,
        );
        let app = Router::new()
            .route(endpoints::SALES_BY_DIMENSION_API, get(get_sales_by_dimension))
            .with_state(analytics);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn returns_ranked_groups() {
        let response = server().get("/api/sales/product_category").await;

        response.assert_status_ok();
        response.assert_json(&json!([
            { "name": "Coffee", "total_sales": 7.0 },
            { "name": "Tea", "total_sales": 5.0 },
        ]));
    }

    #[tokio::test]
    async fn respects_month() {
        let response = server()
            .get("/api/sales/store_location")
            .add_query_param("month", 2)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([
            { "name": "Hell's Kitchen", "total_sales": 4.0 },
        ]));
    }

    #[tokio::test]
    async fn rejects_unknown_dimension() {
        let response = server().get("/api/sales/colour").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "\"colour\" is not a supported sales dimension");
    }

    #[tokio::test]
    async fn rejects_invalid_month() {
        let response = server()
            .get("/api/sales/product_type")
            .add_query_param("month", 13)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn rejects_non_numeric_month() {
        let response = server()
            .get("/api/sales/product_type")
            .add_query_param("month", "june")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_month_is_an_empty_array() {
        let response = server()
            .get("/api/sales/product_type")
            .add_query_param("month", 6)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }
}
