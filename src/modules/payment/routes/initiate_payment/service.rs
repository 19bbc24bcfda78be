use super::types::{request, response};
use crate::{
    modules::{
        payment::service::{self as payment, InitiatePaymentPayload},
        plan,
        transaction::repository::{
            self as transactions, CreateTransactionPayload, Gateway, TransactionStatus,
            UpdateTransactionPayload, PLAN_SUBSCRIPTION_TYPE, SUBSCRIPTION_TRANSACTION_TYPE,
        },
        vendor,
    },
    types::Context,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

fn payment_type(gateway: Gateway) -> &'static str {
    match gateway {
        Gateway::AlatPay => "BANK_TRANSFER",
        Gateway::Flutterwave => "CARD",
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let vendor = vendor::repository::find_by_id(&ctx.db_conn.pool, payload.auth.vendor_id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::VendorNotFound)?;

    let plan = plan::repository::find_by_id(&ctx.db_conn.pool, payload.body.plan_id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::PlanNotFound)?;

    let gateway = payload.body.gateway;
    let transaction = transactions::create(
        &ctx.db_conn.pool,
        CreateTransactionPayload {
            user_id: vendor.id.clone(),
            plan_id: Some(plan.id.clone()),
            amount: plan.price.clone(),
            currency: plan.currency.clone(),
            kind: PLAN_SUBSCRIPTION_TYPE.to_string(),
            reference: transactions::plan_payment_reference(&plan.id, &vendor.id, Utc::now()),
            description: Some(format!("Subscription to {} plan", plan.name)),
            payment_type: Some(payment_type(gateway).to_string()),
            transaction_type: Some(SUBSCRIPTION_TRANSACTION_TYPE.to_string()),
            gateway,
        },
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?;

    let initiated = match payment::initiate(
        ctx.clone(),
        InitiatePaymentPayload {
            transaction: &transaction,
            vendor: &vendor,
            plan: &plan,
        },
    )
    .await
    {
        Ok(initiated) => initiated,
        Err(err) => {
            tracing::error!(
                "{} refused transaction {}: {:?}",
                gateway,
                transaction.id,
                err
            );

            if let Err(err) = transactions::update(
                &ctx.db_conn.pool,
                transaction.id.clone(),
                UpdateTransactionPayload {
                    status: Some(TransactionStatus::Failed),
                    ..Default::default()
                },
            )
            .await
            {
                tracing::error!(
                    "Transaction {} stays pending after its gateway refused it: {:?}",
                    transaction.id,
                    err
                );
            }

            return Err(response::Error::FailedToInitiatePayment);
        }
    };

    let transaction = transactions::update(
        &ctx.db_conn.pool,
        transaction.id.clone(),
        UpdateTransactionPayload {
            external_reference: Some(initiated.external_reference.clone()),
            metadata: Some(initiated.details.clone()),
            ..Default::default()
        },
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?
    .ok_or(response::Error::UnexpectedError)?;

    tracing::info!(
        "Vendor {} initiated payment {} for plan {} through {}",
        vendor.id,
        transaction.id,
        plan.id,
        gateway
    );

    Ok(response::Success::PaymentInitiated(
        response::InitiatedPayment {
            transaction_id: transaction.id,
            reference: transaction.reference,
            gateway: gateway.to_string(),
            payment_details: initiated.details,
            callback_endpoint: format!("{}/v1/api/vendor/plans/payment-callback", ctx.app.url),
        },
    ))
}
