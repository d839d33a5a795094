//! Transaction, payment and investment domain models

use serde::{Deserialize, Serialize};

/// Transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Investment,
    Return,
    Referral,
    Bonus,
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    BankTransfer,
    CreditCard,
    System,
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

macro_rules! impl_as_str {
    ($ty:ty { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_as_str!(TransactionType {
    Deposit => "deposit",
    Withdrawal => "withdrawal",
    Investment => "investment",
    Return => "return",
    Referral => "referral",
    Bonus => "bonus",
});

impl_as_str!(PaymentMethod {
    Pix => "pix",
    BankTransfer => "bank_transfer",
    CreditCard => "credit_card",
    System => "system",
});

impl_as_str!(TransactionStatus {
    Pending => "pending",
    Processing => "processing",
    Completed => "completed",
    Failed => "failed",
    Cancelled => "cancelled",
});

impl TransactionStatus {
    /// 终态不再变化
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Create investment request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvestmentRequest<'a> {
    pub trader_id: &'a str,
    pub amount: f64,
}

/// Amount-only request (PIX deposit)
#[derive(Debug, Serialize)]
pub struct AmountRequest {
    pub amount: f64,
}

/// PIX withdrawal request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixWithdrawalRequest<'a> {
    pub amount: f64,
    pub pix_key: &'a str,
}

/// Asaas deposit request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasDepositRequest {
    pub amount: f64,
    pub payment_method: PaymentMethod,
}

/// Asaas withdrawal request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasWithdrawalRequest<'a, B: Serialize> {
    pub amount: f64,
    pub bank_data: &'a B,
}
