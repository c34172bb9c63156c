//! Wallet transactions and the small aggregates the screens show.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub wallet_id: String,
    pub title: String,
    pub description: String,
    /// Signed: income positive, expenses negative.
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub icon: String,
}

/// Income and expense sums for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    /// Sum of absolute expense amounts.
    pub expense: f64,
}

/// Transactions belonging to `wallet_id`, in their original order.
pub fn for_wallet<'a>(all: &'a [Transaction], wallet_id: &str) -> Vec<&'a Transaction> {
    all.iter().filter(|t| t.wallet_id == wallet_id).collect()
}

/// At most `limit` transactions for the home screen preview.
pub fn recent<'a>(all: &'a [Transaction], wallet_id: &str, limit: usize) -> Vec<&'a Transaction> {
    all.iter()
        .filter(|t| t.wallet_id == wallet_id)
        .take(limit)
        .collect()
}

pub fn totals(transactions: &[&Transaction]) -> Totals {
    transactions.iter().fold(Totals::default(), |mut acc, t| {
        match t.kind {
            TransactionKind::Income => acc.income += t.amount,
            TransactionKind::Expense => acc.expense += t.amount.abs(),
        }
        acc
    })
}

struct Row(
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    f64,
    &'static str,
    (i32, u32, u32),
    &'static str,
);

const SAMPLE_ROWS: &[Row] = &[
    Row("t1", "1", "Salary", "Monthly salary", 4500.00, "income", (2024, 12, 24), "💼"),
    Row("t2", "1", "Grocery Store", "Weekly groceries", -125.50, "food", (2024, 12, 23), "🛒"),
    Row("t3", "1", "Netflix", "Monthly subscription", -15.99, "entertainment", (2024, 12, 22), "🎬"),
    Row("t4", "1", "Coffee Shop", "Morning coffee", -5.50, "food", (2024, 12, 21), "☕"),
    Row("t5", "2", "Transfer In", "Monthly savings", 1000.00, "transfer", (2024, 12, 20), "💰"),
    Row("t6", "2", "Interest", "Savings interest", 45.00, "income", (2024, 12, 15), "📈"),
    Row("t7", "2", "Emergency Fund", "Added to emergency", 500.00, "transfer", (2024, 12, 10), "🏦"),
    Row("t8", "3", "ATM Withdrawal", "Cash withdrawal", 200.00, "transfer", (2024, 12, 24), "🏧"),
    Row("t9", "3", "Taxi", "Uber ride", -25.00, "transport", (2024, 12, 23), "🚕"),
    Row("t10", "3", "Street Food", "Lunch", -12.00, "food", (2024, 12, 22), "🌮"),
    Row("t11", "4", "Amazon", "Electronics purchase", -299.99, "shopping", (2024, 12, 24), "📦"),
    Row("t12", "4", "Gas Station", "Fuel", -65.00, "transport", (2024, 12, 22), "⛽"),
    Row("t13", "4", "Restaurant", "Dinner with family", -85.50, "food", (2024, 12, 20), "🍽️"),
    Row("t14", "4", "Spotify", "Music subscription", -9.99, "entertainment", (2024, 12, 18), "🎵"),
    Row("t15", "5", "Vacation Savings", "Monthly contribution", 500.00, "transfer", (2024, 12, 20), "✈️"),
    Row("t16", "5", "Hotel Booking", "Summer trip deposit", -350.00, "travel", (2024, 12, 15), "🏨"),
    Row("t17", "5", "Flight Tickets", "Round trip booking", -650.00, "travel", (2024, 12, 10), "🛫"),
];

/// The demo transactions, newest first within each wallet.
pub fn sample_transactions() -> Vec<Transaction> {
    SAMPLE_ROWS
        .iter()
        .filter_map(|Row(id, wallet_id, title, description, amount, category, (y, m, d), icon)| {
            let date = NaiveDate::from_ymd_opt(*y, *m, *d)?;
            Some(Transaction {
                id: (*id).into(),
                wallet_id: (*wallet_id).into(),
                title: (*title).into(),
                description: (*description).into(),
                amount: *amount,
                kind: if *amount >= 0.0 {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                },
                category: (*category).into(),
                date,
                icon: (*icon).into(),
            })
        })
        .collect()
}
