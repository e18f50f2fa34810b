use rust_decimal::Decimal;

/// Magic Eden reports collection prices in lamports.
pub const LAMPORTS_PER_SOL: i64 = 1_000_000_000;

/// Binance ticker prices are stored as integer 10^-8 units.
pub const TICKER_PRICE_SCALE: i64 = 100_000_000;

pub fn lamports_to_sol(lamports: i64) -> Decimal {
    Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL)
}

/// Human-readable SOL amount. Integral amounts keep a single trailing
/// zero ("1.0"), fractional amounts drop insignificant zeros ("1.5").
pub fn format_sol(lamports: i64) -> String {
    let sol = lamports_to_sol(lamports).normalize();
    if sol.scale() == 0 {
        format!("{}.0", sol)
    } else {
        sol.to_string()
    }
}

pub fn ticker_price_to_decimal(units: i64) -> Decimal {
    Decimal::from(units) / Decimal::from(TICKER_PRICE_SCALE)
}
