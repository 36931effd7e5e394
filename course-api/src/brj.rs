/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! BRJ order API: forwards validated registrations and returns the order
//! identifier together with the payment link.

use course_types::responses::OrderResponse;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::config::BrjConfig;
use crate::upstream::{UpstreamClient, UpstreamError};
use crate::validation::ValidatedLead;

const SERVICE: &str = "brj";
const ORDER_SOURCE: &str = "landing-page";

#[derive(Debug, Serialize)]
struct OrderPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<&'a str>,
    customer: Customer<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_month: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
    consent: bool,
    source: &'static str,
}

#[derive(Debug, Serialize)]
struct Customer<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedOrder {
    #[serde(alias = "order_id", alias = "orderId")]
    id: OrderId,
    #[serde(default, alias = "paymentUrl")]
    payment_url: Option<String>,
}

/// BRJ returns numeric ids for some products and string ids for others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrderId {
    Text(String),
    Number(u64),
}

impl OrderId {
    fn into_string(self) -> String {
        match self {
            OrderId::Text(id) => id,
            OrderId::Number(id) => id.to_string(),
        }
    }
}

/// Client for the BRJ order endpoint.
#[derive(Debug, Clone)]
pub struct BrjClient {
    upstream: UpstreamClient,
    orders_url: Url,
    api_key: String,
    product_id: Option<String>,
}

impl BrjClient {
    pub fn new(upstream: UpstreamClient, config: &BrjConfig) -> Result<Self, String> {
        let mut orders_url =
            Url::parse(&config.api_url).map_err(|e| format!("BRJ_API_URL is invalid: {e}"))?;
        orders_url
            .path_segments_mut()
            .map_err(|_| "BRJ_API_URL cannot be a base URL".to_string())?
            .pop_if_empty()
            .push("orders");

        Ok(Self {
            upstream,
            orders_url,
            api_key: config.api_key.clone(),
            product_id: config.product_id.clone(),
        })
    }

    pub fn orders_url(&self) -> &Url {
        &self.orders_url
    }

    /// Create an order for `lead`.
    ///
    /// All attempts of one submission share an `Idempotency-Key`, so a retry
    /// after a lost response cannot create a second order.
    pub async fn submit_order(
        &self,
        lead: &ValidatedLead,
    ) -> Result<OrderResponse, UpstreamError> {
        let idempotency_key = Uuid::new_v4().to_string();
        let payload = OrderPayload {
            product_id: self.product_id.as_deref(),
            customer: Customer {
                name: &lead.name,
                email: &lead.email,
                phone: &lead.phone,
            },
            preferred_month: lead.preferred_month.as_deref(),
            note: lead.note.as_deref(),
            consent: lead.consent,
            source: ORDER_SOURCE,
        };

        tracing::info!(
            idempotency_key = %idempotency_key,
            preferred_month = ?lead.preferred_month,
            "Submitting order to BRJ"
        );

        let created: CreatedOrder = self
            .upstream
            .send_json(SERVICE, |http| {
                http.post(self.orders_url.clone())
                    .bearer_auth(&self.api_key)
                    .header("Idempotency-Key", idempotency_key.as_str())
                    .json(&payload)
            })
            .await?;

        let order_id = created.id.into_string();
        tracing::info!(order_id = %order_id, "BRJ order created");

        Ok(OrderResponse {
            order_id,
            payment_url: created.payment_url.filter(|u| !u.is_empty()),
        })
    }
}
