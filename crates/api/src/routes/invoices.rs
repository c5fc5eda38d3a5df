//! # Invoice Routes
//!
//! - `POST /api/quickbook/invoices`              - create with line items
//! - `POST /api/quickbook/invoices/cost-of-fuel` - fixed fuel invoice

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use qbo_bridge_core::custom_fields::value::numeric_value;
use qbo_bridge_infra::quickbooks::CostOfFuelInvoice;
use serde_json::Value;

use crate::context::SharedContext;
use crate::error::{AppError, OperationResultExt};
use crate::extractors::{custom_fields, line_items, object_body, object_param, string_param};

const DEFAULT_FUEL_FIELD_TYPE: &str = "NUMBER";

pub fn router() -> Router<SharedContext> {
    Router::new()
        .route("/api/quickbook/invoices", post(create_invoice))
        .route("/api/quickbook/invoices/cost-of-fuel", post(create_cost_of_fuel_invoice))
}

async fn create_invoice(
    State(ctx): State<SharedContext>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);

    let customer_id = string_param(&body, "customerId");
    if customer_id.is_empty() {
        return Err(AppError::BadRequest("customerId is required".to_string()));
    }

    let lines = line_items(&body);
    if lines.is_empty() {
        return Err(AppError::BadRequest("At least one line item is required".to_string()));
    }

    let data = ctx
        .accounting
        .create_invoice(
            &customer_id,
            &lines,
            &custom_fields(&body),
            object_param(&body, "additionalData"),
        )
        .await
        .or_failure("Failed to create invoice")?;

    Ok(Json(data))
}

async fn create_cost_of_fuel_invoice(
    State(ctx): State<SharedContext>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);

    let invoice = CostOfFuelInvoice {
        definition_id: string_param(&body, "definitionId"),
        customer_id: string_param(&body, "customerId"),
        item_id: string_param(&body, "itemId"),
        fuel_cost: body.get("fuelCost").and_then(numeric_value).unwrap_or(0.0),
        field_type: match body.get("fieldType") {
            None | Some(Value::Null) => DEFAULT_FUEL_FIELD_TYPE.to_string(),
            Some(_) => string_param(&body, "fieldType"),
        },
    };

    if invoice.definition_id.is_empty()
        || invoice.customer_id.is_empty()
        || invoice.item_id.is_empty()
    {
        return Err(AppError::BadRequest(
            "definitionId, customerId and itemId are required".to_string(),
        ));
    }

    let data = ctx
        .accounting
        .create_invoice_with_cost_of_fuel(&invoice)
        .await
        .or_failure("Failed to create invoice with cost of fuel custom field")?;

    Ok(Json(data))
}
