//! Walk one order through its lifecycle against a running API
//!
//! ```sh
//! cargo run --example fake_api &
//! cargo run --example order_walkthrough
//! ```

use order_client::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

async fn walkthrough<S: OrderService>(service: &S) -> anyhow::Result<()> {
    // Form input with a bad CPF and no items: every problem is reported
    let rejected = service
        .create(&json!({
            "seller": {"id": 1, "cpf": "wrong data", "name": "John Doe"},
            "date": "2024-03-01T10:00:00.000Z",
            "items": []
        }))
        .await;
    if let Err(e) = rejected {
        println!("rejected before sending: {}", e);
    }

    let order = service
        .create(&CreationOrderData::new(
            Seller {
                id: 1,
                cpf: "123.456.789-01".to_string(),
                name: "John Doe".to_string(),
            },
            Utc::now(),
            vec![OrderItem {
                description: "Item 1".to_string(),
                ammount: 2.0,
            }],
        ))
        .await?;
    println!("created order {} ({})", order.id, order.status.label());

    let order = service
        .update_status(&order, OrderStatus::PaymentApproved)
        .await?;
    println!("order {} is now {}", order.id, order.status.label());

    if let Err(e) = service.update_status(&order, OrderStatus::Delivered).await {
        println!("refused: {}", e);
    }

    match service.get_by_id(&order.id).await? {
        Some(found) => println!("found order {} from {}", found.id, found.seller.name),
        None => println!("order {} not found", order.id),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load(None)?;
    let client = OrderClient::from_config(&config.client);

    walkthrough(&client).await
}
