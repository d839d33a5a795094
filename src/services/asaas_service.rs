//! Asaas 支付服务

use super::{send_json, with_query, Filters};
use crate::client::{ApiClient, RequestOptions};
use crate::models::transaction::{AsaasDepositRequest, AsaasWithdrawalRequest, PaymentMethod};
use crate::models::ApiResponse;
use reqwest::Method;
use serde::Serialize;

/// 创建充值，默认 PIX
pub async fn create_deposit(
    client: &ApiClient,
    amount: f64,
    payment_method: Option<PaymentMethod>,
) -> ApiResponse {
    let body = AsaasDepositRequest {
        amount,
        payment_method: payment_method.unwrap_or(PaymentMethod::Pix),
    };
    send_json(client, "/asaas/deposit", Method::POST, &body, true).await
}

/// 申请提现，`bank_data` 原样透传给服务端
pub async fn create_withdrawal<B: Serialize>(
    client: &ApiClient,
    amount: f64,
    bank_data: &B,
) -> ApiResponse {
    send_json(
        client,
        "/asaas/withdraw",
        Method::POST,
        &AsaasWithdrawalRequest { amount, bank_data },
        true,
    )
    .await
}

pub async fn get_transactions(client: &ApiClient, filters: Filters<'_>) -> ApiResponse {
    let endpoint = with_query("/asaas/transactions", filters.iter().copied());
    client.request(&endpoint, RequestOptions::get()).await
}

pub async fn get_transaction(client: &ApiClient, id: &str) -> ApiResponse {
    client
        .request(&format!("/asaas/transaction/{}", id), RequestOptions::get())
        .await
}

pub async fn get_payment_status(client: &ApiClient, asaas_id: &str) -> ApiResponse {
    client
        .request(
            &format!("/asaas/payment/{}/status", asaas_id),
            RequestOptions::get(),
        )
        .await
}
