use super::repository::{self, CreatePlanPayload};
use crate::{
    modules::{auth::service::jwt::Role, payment::service::flutterwave},
    types::Context,
};
use bigdecimal::BigDecimal;
use std::sync::Arc;

pub struct SeedPlan {
    pub name: &'static str,
    pub price: u32,
    pub features: &'static [&'static str],
    pub is_popular: bool,
}

pub const CURRENCY: &str = "NGN";
pub const INTERVAL: &str = "Monthly";

pub const PLANS: [SeedPlan; 3] = [
    SeedPlan {
        name: "Basic",
        price: 1500,
        features: &["Visibility to FicaGo Subscribers", "Post a single service"],
        is_popular: true,
    },
    SeedPlan {
        name: "Premium",
        price: 2500,
        features: &[
            "Visibility to FicaGo Subscribers",
            "Post multiple services",
            "Verification badge",
        ],
        is_popular: false,
    },
    SeedPlan {
        name: "Pro",
        price: 5000,
        features: &[
            "Visibility to FicaGo Subscribers",
            "Post multiple services",
            "Verification badge",
            "Priority on search Page",
        ],
        is_popular: true,
    },
];

async fn create_external_plan(ctx: &Context, plan: &SeedPlan) -> Option<String> {
    tracing::info!("Creating plan on Flutterwave: {}", plan.name);

    match flutterwave::create_plan(
        &ctx.payment.flutterwave,
        flutterwave::CreatePaymentPlanPayload {
            amount: BigDecimal::from(plan.price),
            name: plan.name.to_string(),
            interval: INTERVAL.to_lowercase(),
            duration: None,
        },
    )
    .await
    {
        Ok(external_plan) => {
            tracing::info!(
                "Plan created on Flutterwave: {} ({})",
                plan.name,
                external_plan.id
            );
            Some(external_plan.id)
        }
        Err(err) => {
            tracing::error!(
                "Failed to create plan on Flutterwave: {}: {:?}",
                plan.name,
                err
            );
            None
        }
    }
}

/// Seeds the vendor plans when no plan exists yet.
pub async fn seed(ctx: Arc<Context>) {
    let count = match repository::count(&ctx.db_conn.pool).await {
        Ok(count) => count,
        Err(_) => return,
    };

    if count > 0 {
        tracing::info!("Plans already exist, skipping seeding");
        return;
    }

    tracing::info!("Seeding plans...");

    for plan in PLANS.iter() {
        let external_plan_id = create_external_plan(&ctx, plan).await;

        if repository::create(
            &ctx.db_conn.pool,
            CreatePlanPayload {
                name: plan.name.to_string(),
                price: BigDecimal::from(plan.price),
                currency: CURRENCY.to_string(),
                interval: INTERVAL.to_string(),
                features: plan.features.iter().map(|f| f.to_string()).collect(),
                is_popular: plan.is_popular,
                role: Role::Vendor,
                external_plan_id,
            },
        )
        .await
        .is_err()
        {
            tracing::error!("Stopped seeding plans at {}", plan.name);
            return;
        }
    }

    tracing::info!("Plans seeded successfully");
}
