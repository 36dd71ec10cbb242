//! Human-readable fee breakdown for a quote.
//!
//! Pure string building over the quote's fee set; nothing here touches the
//! network or the flow state.

use glide_relay::{FeeAmount, Quote};
use std::fmt::Write;

const WIDTH: usize = 44;

fn usd(fee: &Option<FeeAmount>) -> f64 {
    fee.as_ref()
        .and_then(|f| f.amount_usd.as_deref())
        .and_then(|s| s.trim_start_matches('$').parse().ok())
        .unwrap_or(0.0)
}

fn row(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, " {:<26}{:>16}", label, value);
}

/// Render the fee table shown before submission.
///
/// Covers origin gas, destination gas, relayer service fee, app fee, and
/// the subsidized total. USER PAYS is the fee sum net of subsidization,
/// clamped at zero; this flow requests full subsidization, so it reads
/// $0.00 whenever the sponsor covers the set.
pub fn render_fee_breakdown(quote: &Quote) -> String {
    let fees = &quote.fees;
    let rows = [
        ("Origin gas", &fees.gas),
        ("Destination gas", &fees.relayer_gas),
        ("Relayer service", &fees.relayer_service),
        ("App fee", &fees.app),
    ];

    let rule = "-".repeat(WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, " FEE BREAKDOWN");
    let _ = writeln!(out, "{}", rule);

    let mut total = 0.0;
    for (label, fee) in rows {
        let value = usd(fee);
        total += value;
        row(&mut out, label, format!("${:.2}", value));
    }

    let subsidized = usd(&fees.subsidized);
    row(&mut out, "Subsidized by sponsor", format!("-${:.2}", subsidized));

    let _ = writeln!(out, "{}", rule);
    let user_pays = (total - subsidized).max(0.0);
    row(&mut out, "USER PAYS", format!("${:.2}", user_pays));

    if let Some(received) = quote
        .details
        .as_ref()
        .and_then(|d| d.currency_out.as_ref())
        .and_then(|c| c.amount_formatted.as_deref())
    {
        let symbol = quote
            .details
            .as_ref()
            .and_then(|d| d.currency_out.as_ref())
            .and_then(|c| c.currency.as_ref())
            .and_then(|c| c.symbol.as_deref())
            .unwrap_or("");
        row(&mut out, "User receives", format!("{} {}", received, symbol).trim().to_string());
    }
    let _ = writeln!(out, "{}", rule);

    out
}
