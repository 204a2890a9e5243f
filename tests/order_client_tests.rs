//! Tests for OrderClient against a recording stub API
//!
//! These tests verify that:
//! - Invalid input never reaches the network
//! - Requests carry the expected method, path, headers and body
//! - Responses are validated before being returned
//! - get_by_id degrades malformed or missing orders to None

mod support;

use axum::http::{Method, StatusCode};
use chrono::SubsecRound;
use order_client::prelude::*;
use serde_json::{Value, json};
use support::*;

const DATE: &str = "2024-03-01T10:00:00.000Z";

fn issue_summary(err: &OrderClientError) -> Vec<(String, IssueCode, String)> {
    err.issues()
        .unwrap_or_default()
        .iter()
        .map(|i| (i.path_string(), i.code, i.message.clone()))
        .collect()
}

// =============================================================================
// create
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_sends_order_with_initial_status() {
        let api = StubApi::start().await;
        let date = Utc::now().trunc_subsecs(3);
        let data = CreationOrderData::new(
            Seller {
                id: 1,
                cpf: "123.456.789-01".to_string(),
                name: "John Doe".to_string(),
            },
            date,
            vec![OrderItem {
                description: "Item 1".to_string(),
                ammount: 2.0,
            }],
        );
        let wire_date = serde_json::to_value(&data).unwrap()["date"].clone();

        api.respond_json(
            StatusCode::OK,
            json!({
                "id": 1,
                "status": "WAITING_PAYMENT",
                "seller": seller_json(),
                "date": wire_date,
                "items": [{"description": "Item 1", "ammount": 2}]
            }),
        );

        let order = api.client().create(&data).await.unwrap();

        assert_eq!(order, persisted_order(1, OrderStatus::WaitingPayment, date));

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/orders");
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));

        let body = requests[0].body.clone().unwrap();
        assert_eq!(body["status"], "WAITING_PAYMENT");
        assert_eq!(body["seller"], seller_json());
        assert_eq!(body["date"], wire_date);
        assert_eq!(body["items"][0]["description"], "Item 1");
        assert_eq!(body["items"][0]["ammount"].as_f64(), Some(2.0));
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_create_ignores_caller_status() {
        let api = StubApi::start().await;
        api.respond_json(StatusCode::OK, persisted_json(3, OrderStatus::WaitingPayment, DATE));

        let mut input = creation_json(DATE);
        input["status"] = json!("DELIVERED");
        api.client().create(&input).await.unwrap();

        let body = api.requests()[0].body.clone().unwrap();
        assert_eq!(body["status"], "WAITING_PAYMENT");
    }

    #[tokio::test]
    async fn test_create_sends_date_at_wire_precision() {
        let api = StubApi::start().await;
        let precise = Utc::now().trunc_subsecs(3) + chrono::Duration::microseconds(750);
        let data = CreationOrderData {
            seller: persisted_order(1, OrderStatus::WaitingPayment, precise).seller,
            date: precise,
            items: persisted_order(1, OrderStatus::WaitingPayment, precise).items,
        };
        let expected = persisted_order(1, OrderStatus::WaitingPayment, precise.trunc_subsecs(3));
        api.respond_json(StatusCode::OK, serde_json::to_value(&expected).unwrap());

        let order = api.client().create(&data).await.unwrap();

        let body = api.requests()[0].body.clone().unwrap();
        assert_eq!(
            body["date"].as_str().and_then(|d| d.parse::<DateTime<Utc>>().ok()),
            Some(precise.trunc_subsecs(3))
        );
        assert_eq!(order.date, data.date.trunc_subsecs(3));
    }

    #[tokio::test]
    async fn test_create_coerces_numeric_ammount() {
        let api = StubApi::start().await;
        api.respond_json(StatusCode::OK, persisted_json(2, OrderStatus::WaitingPayment, DATE));

        let mut input = creation_json(DATE);
        input["items"][0]["ammount"] = json!("2");
        api.client().create(&input).await.unwrap();

        let body = api.requests()[0].body.clone().unwrap();
        assert_eq!(body["items"][0]["ammount"].as_f64(), Some(2.0));
    }

    #[tokio::test]
    async fn test_create_invalid_cpf() {
        let api = StubApi::start().await;
        let mut input = creation_json(DATE);
        input["seller"]["cpf"] = json!("wrong data");

        let err = api.client().create(&input).await.unwrap_err();

        assert!(matches!(err, OrderClientError::Validation(_)));
        assert_eq!(
            issue_summary(&err),
            vec![(
                "seller.cpf".to_string(),
                IssueCode::Custom,
                "invalid CPF".to_string()
            )]
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_empty_items() {
        let api = StubApi::start().await;
        let mut input = creation_json(DATE);
        input["items"] = json!([]);

        let err = api.client().create(&input).await.unwrap_err();

        assert_eq!(
            issue_summary(&err),
            vec![(
                "items".to_string(),
                IssueCode::TooSmall,
                "an order must have at least 1 item.".to_string()
            )]
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_missing_date() {
        let api = StubApi::start().await;
        let mut input = creation_json(DATE);
        input.as_object_mut().unwrap().remove("date");

        let err = api.client().create(&input).await.unwrap_err();

        assert_eq!(
            issue_summary(&err),
            vec![(
                "date".to_string(),
                IssueCode::InvalidType,
                "Required".to_string()
            )]
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_missing_seller() {
        let api = StubApi::start().await;
        let input = json!({
            "date": DATE,
            "items": [{"description": "Item 1", "ammount": 200}]
        });

        let err = api.client().create(&input).await.unwrap_err();

        assert_eq!(
            issue_summary(&err),
            vec![(
                "seller".to_string(),
                IssueCode::InvalidType,
                "Required".to_string()
            )]
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_seller_id_must_fit_u64() {
        let api = StubApi::start().await;

        for id in [json!(2.0), json!(1e20)] {
            let mut input = creation_json(DATE);
            input["seller"]["id"] = id;

            let err = api.client().create(&input).await.unwrap_err();

            assert!(matches!(err, OrderClientError::Validation(_)));
            let issues = issue_summary(&err);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].0, "seller.id");
            assert_eq!(issues[0].1, IssueCode::InvalidType);
        }
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_reports_every_violation() {
        let api = StubApi::start().await;
        let input = json!({
            "seller": {"id": -2, "cpf": "1234", "name": ""},
            "date": "not a date",
            "items": [{"description": "Item 1"}]
        });

        let err = api.client().create(&input).await.unwrap_err();

        let paths: Vec<String> = issue_summary(&err).into_iter().map(|(p, _, _)| p).collect();
        assert_eq!(
            paths,
            vec!["seller.id", "seller.cpf", "seller.name", "date", "items.0.ammount"]
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_invalid_response_is_error() {
        let api = StubApi::start().await;
        api.respond_json(StatusCode::OK, json!({"unexpected": true}));

        let err = api.client().create(&creation_json(DATE)).await.unwrap_err();

        assert!(matches!(err, OrderClientError::InvalidResponse(_)));
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_create_non_json_response_is_error() {
        let api = StubApi::start().await;
        api.respond_raw(StatusCode::BAD_GATEWAY, "upstream down");

        let err = api.client().create(&creation_json(DATE)).await.unwrap_err();

        assert_eq!(err.error_code(), "INVALID_RESPONSE");
    }
}

// =============================================================================
// update_status
// =============================================================================

mod update_status_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_status_sends_full_order() {
        let api = StubApi::start().await;
        let date = Utc::now().trunc_subsecs(3);
        let order = persisted_order(5, OrderStatus::WaitingPayment, date);

        let mut echoed = serde_json::to_value(&order).unwrap();
        echoed["status"] = json!("PAYMENT_APPROVED");
        api.respond_json(StatusCode::OK, echoed.clone());

        let updated = api
            .client()
            .update_status(&order, OrderStatus::PaymentApproved)
            .await
            .unwrap();

        assert_eq!(
            updated,
            Order {
                status: OrderStatus::PaymentApproved,
                ..order.clone()
            }
        );

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/orders/5");
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(requests[0].body, Some(echoed));
    }

    #[tokio::test]
    async fn test_update_status_without_id() {
        let api = StubApi::start().await;
        let mut order = persisted_json(5, OrderStatus::WaitingPayment, DATE);
        order.as_object_mut().unwrap().remove("id");

        let err = api
            .client()
            .update_status(&order, OrderStatus::PaymentApproved)
            .await
            .unwrap_err();

        assert!(matches!(err, OrderClientError::Validation(_)));
        assert_eq!(
            issue_summary(&err),
            vec![(
                String::new(),
                IssueCode::InvalidType,
                "sale identifier not found".to_string()
            )]
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_forbidden_transitions_never_reach_the_network() {
        let api = StubApi::start().await;
        let client = api.client();

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                if from.can_transition_to(to) {
                    continue;
                }
                let order = persisted_json(5, from, DATE);

                let err = client.update_status(&order, to).await.unwrap_err();

                match err {
                    OrderClientError::Transition(e) => {
                        assert_eq!((e.from, e.to), (from, to));
                        assert_eq!(
                            e.to_string(),
                            format!("cannot update status from {} to {}", from, to)
                        );
                    }
                    other => panic!("expected transition error for {} -> {}, got {}", from, to, other),
                }
            }
        }

        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_sent_to_canceled_is_refused() {
        let api = StubApi::start().await;
        let order = persisted_json(5, OrderStatus::Sent, DATE);

        let err = api
            .client()
            .update_status(&order, OrderStatus::Canceled)
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("SENT"));
        assert!(message.contains("CANCELED"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_allowed_transitions_issue_one_request_each() {
        let allowed = [
            (OrderStatus::WaitingPayment, OrderStatus::PaymentApproved),
            (OrderStatus::WaitingPayment, OrderStatus::Canceled),
            (OrderStatus::PaymentApproved, OrderStatus::Sent),
            (OrderStatus::PaymentApproved, OrderStatus::Canceled),
            (OrderStatus::Sent, OrderStatus::Delivered),
        ];

        for (from, to) in allowed {
            let api = StubApi::start().await;
            api.respond_json(StatusCode::OK, persisted_json(5, to, DATE));

            let updated = api
                .client()
                .update_status(&persisted_json(5, from, DATE), to)
                .await
                .unwrap();

            assert_eq!(updated.status, to);
            let requests = api.requests();
            assert_eq!(requests.len(), 1, "{} -> {}", from, to);
            assert_eq!(requests[0].body.as_ref().unwrap()["status"], json!(to));
        }
    }

    #[tokio::test]
    async fn test_update_status_unknown_current_status() {
        let api = StubApi::start().await;
        let mut order = persisted_json(5, OrderStatus::Sent, DATE);
        order["status"] = json!("LOST");

        let err = api
            .client()
            .update_status(&order, OrderStatus::Delivered)
            .await
            .unwrap_err();

        assert_eq!(issue_summary(&err)[0].0, "status");
        assert_eq!(issue_summary(&err)[0].1, IssueCode::InvalidEnumValue);
        assert_eq!(api.request_count(), 0);
    }
}

// =============================================================================
// get_by_id
// =============================================================================

mod get_by_id_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_by_id_returns_order() {
        let api = StubApi::start().await;
        let date = Utc::now().trunc_subsecs(3);
        let order = persisted_order(5, OrderStatus::Sent, date);
        api.respond_json(StatusCode::OK, serde_json::to_value(&order).unwrap());

        let found = api.client().get_by_id(&5).await.unwrap();

        assert_eq!(found, Some(order));
        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/orders/5");
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_rejects_non_numeric_id() {
        let api = StubApi::start().await;

        let err = api.client().get_by_id(&json!({})).await.unwrap_err();

        assert_eq!(
            issue_summary(&err),
            vec![(
                String::new(),
                IssueCode::InvalidType,
                "expected number, received object".to_string()
            )]
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_malformed_order_is_none() {
        let api = StubApi::start().await;
        api.respond_json(StatusCode::OK, json!({"id": 5, "status": "SENT"}));

        let found = api.client().get_by_id(&5u64).await.unwrap();

        assert!(found.is_none());
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_is_none() {
        let api = StubApi::start().await;
        api.respond_raw(StatusCode::NOT_FOUND, "Not found");

        assert!(api.client().get_by_id(&9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_non_json_body_is_none() {
        let api = StubApi::start().await;
        api.respond_raw(StatusCode::OK, "<html></html>");

        assert!(api.client().get_by_id(&9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_parses_echoed_date() {
        let api = StubApi::start().await;
        let date = Utc::now().trunc_subsecs(3);
        let mut body: Value = persisted_json(5, OrderStatus::Sent, DATE);
        body["date"] = json!(date.to_rfc3339());
        api.respond_json(StatusCode::OK, body);

        let found = api.client().get_by_id(&5).await.unwrap().unwrap();

        assert_eq!(found.date, date);
    }
}

// =============================================================================
// Transport failures
// =============================================================================

mod transport_tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_failure_is_propagated() {
        let client = OrderClient::new(closed_port_url().await);

        let err = client.get_by_id(&1).await.unwrap_err();
        assert!(matches!(err, OrderClientError::Transport(_)));

        let err = client.create(&creation_json(DATE)).await.unwrap_err();
        assert_eq!(err.error_code(), "TRANSPORT_ERROR");
    }

    #[tokio::test]
    async fn test_validation_runs_before_transport() {
        let client = OrderClient::new(closed_port_url().await);
        let order = persisted_json(1, OrderStatus::Delivered, DATE);

        let err = client
            .update_status(&order, OrderStatus::Canceled)
            .await
            .unwrap_err();

        assert!(matches!(err, OrderClientError::Transition(_)));
    }
}
