//! Wallets shown in the card stack.

/// What sort of account a wallet represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletKind {
    Cash,
    Bank,
    Credit,
    Savings,
}

impl WalletKind {
    pub fn icon(self) -> &'static str {
        match self {
            WalletKind::Cash => "💵",
            WalletKind::Bank => "🏦",
            WalletKind::Credit => "💳",
            WalletKind::Savings => "🏛️",
        }
    }

    /// Upper-case label printed under the wallet name.
    pub fn label(self) -> &'static str {
        match self {
            WalletKind::Cash => "CASH",
            WalletKind::Bank => "BANK",
            WalletKind::Credit => "CREDIT",
            WalletKind::Savings => "SAVINGS",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub currency: String,
    /// Gradient start, `#rrggbb`.
    pub color: String,
    /// Gradient end, `#rrggbb`.
    pub color_end: String,
    /// Last four digits, when the wallet has a card.
    pub card_number: Option<String>,
    pub kind: WalletKind,
}

impl Wallet {
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color).unwrap_or(FALLBACK_RGB)
    }

    pub fn rgb_end(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color_end).unwrap_or(FALLBACK_RGB)
    }
}

const FALLBACK_RGB: (u8, u8, u8) = (0x66, 0x7e, 0xea);

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn wallet(
    id: &str,
    name: &str,
    balance: f64,
    colors: (&str, &str),
    card_number: Option<&str>,
    kind: WalletKind,
) -> Wallet {
    Wallet {
        id: id.into(),
        name: name.into(),
        balance,
        currency: "USD".into(),
        color: colors.0.into(),
        color_end: colors.1.into(),
        card_number: card_number.map(Into::into),
        kind,
    }
}

/// The demo wallets, in stack order.
pub fn sample_wallets() -> Vec<Wallet> {
    use WalletKind::*;
    vec![
        wallet("1", "Main Wallet", 5432.50, ("#667eea", "#764ba2"), Some("4532"), Bank),
        wallet("2", "Savings", 12890.00, ("#f093fb", "#f5576c"), Some("8901"), Savings),
        wallet("3", "Cash Wallet", 850.25, ("#4facfe", "#00f2fe"), None, Cash),
        wallet("4", "Credit Card", 3200.75, ("#43e97b", "#38f9d7"), Some("2356"), Credit),
        wallet("5", "Travel Fund", 6750.00, ("#fa709a", "#fee140"), Some("7789"), Savings),
    ]
}
