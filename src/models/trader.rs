//! Trader catalog
//! 内置的交易员列表，无需网络请求

use serde::Serialize;

/// Trading-strategy provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trader {
    pub id: &'static str,
    pub name: &'static str,
    pub avatar: &'static str,
    /// 历史成功率（百分比）
    pub success_rate: f64,
    pub period: &'static str,
    pub period_in_days: u32,
    pub min_investment: f64,
    pub max_investment: f64,
    pub description: &'static str,
}

impl Trader {
    /// 金额是否在该交易员的投资区间内（含边界）
    pub fn accepts_amount(&self, amount: f64) -> bool {
        amount >= self.min_investment && amount <= self.max_investment
    }
}

pub static AVAILABLE_TRADERS: [Trader; 4] = [
    Trader {
        id: "trader_1",
        name: "Carlos Silva",
        avatar: "/img/traders/carlos.jpg",
        success_rate: 85.5,
        period: "30 dias",
        period_in_days: 30,
        min_investment: 100.0,
        max_investment: 10_000.0,
        description: "Especialista em day trade com foco em ações de tecnologia",
    },
    Trader {
        id: "trader_2",
        name: "Ana Costa",
        avatar: "/img/traders/ana.jpg",
        success_rate: 92.3,
        period: "45 dias",
        period_in_days: 45,
        min_investment: 500.0,
        max_investment: 25_000.0,
        description: "Expert em forex e commodities com 10 anos de experiência",
    },
    Trader {
        id: "trader_3",
        name: "Roberto Santos",
        avatar: "/img/traders/roberto.jpg",
        success_rate: 78.9,
        period: "60 dias",
        period_in_days: 60,
        min_investment: 200.0,
        max_investment: 15_000.0,
        description: "Especialista em criptomoedas e ativos digitais",
    },
    Trader {
        id: "trader_4",
        name: "Marina Oliveira",
        avatar: "/img/traders/marina.jpg",
        success_rate: 88.7,
        period: "90 dias",
        period_in_days: 90,
        min_investment: 1_000.0,
        max_investment: 50_000.0,
        description: "Gestora de fundos com foco em investimentos de longo prazo",
    },
];

pub fn find_trader(id: &str) -> Option<&'static Trader> {
    AVAILABLE_TRADERS.iter().find(|t| t.id == id)
}
