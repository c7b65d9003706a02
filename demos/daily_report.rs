//! Daily reconciliation example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use grifo_core::utils::MemoryStorage;
use grifo_core::{
    entries, CashLedger, MeterConfig, MeterReading, PriceCatalog, Product, ReconciliationEngine,
    StationStorage,
};
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("⛽ Grifo Core - Daily Reconciliation Example\n");

    let storage = MemoryStorage::new();
    let day = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();

    // 1. Register the current price board
    println!("💲 Registering prices...");
    let mut catalog = PriceCatalog::new(storage.clone());
    for (product, price) in [
        (Product::Octane90, "14.00"),
        (Product::Octane95, "15.00"),
        (Product::Diesel, "15.00"),
    ] {
        let entry = catalog
            .register_price(
                product,
                BigDecimal::from_str(price)?,
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            )
            .await?;
        println!(
            "  ✓ {} at S/ {} per gallon from {}",
            entry.product, entry.price_per_gallon, entry.effective_from
        );
    }
    println!();

    // 2. Record the day's meter readings
    println!("🔢 Recording meter readings...");
    let mut storage = storage;
    let pumps = [
        ("D-01", Product::Octane90, 120_500u64, 120_980u64),
        ("D-02", Product::Octane95, 98_200, 98_410),
        ("D-03", Product::Diesel, 999_999_950, 130), // rolls over the 9-digit display
    ];
    for (pump_id, product, initial, final_reading) in pumps {
        let mut reading = MeterReading::open(pump_id.to_string(), product, day, initial);
        reading.close(final_reading);
        storage.save_reading(&reading).await?;
        println!("  ✓ {pump_id} ({product}): {initial} -> {final_reading}");
    }
    println!();

    // 3. Record the day's cash movements
    println!("💸 Recording cash entries...");
    let mut cash = CashLedger::new(storage.clone());
    cash.record_entry(entries::expense(
        day,
        BigDecimal::from_str("150.00")?,
        "Compra de aceite",
    ))
    .await?;
    cash.record_entry(entries::voucher(
        day,
        BigDecimal::from_str("95.50")?,
        "Transportes Cusco",
    ))
    .await?;
    cash.record_entry(entries::deposit(
        day,
        BigDecimal::from_str("3000.00")?,
        "BCP ventanilla",
    ))
    .await?;
    println!("  ✓ 1 expense, 1 voucher, 1 deposit\n");

    // 4. Reconcile the day
    let engine = ReconciliationEngine::new(storage, MeterConfig::nine_digit(10_000));
    let report = engine.reconcile(day).await?;

    println!("📈 Reconciliation for {}", report.date);
    println!("{:-<72}", "");
    for pump in &report.pumps {
        println!(
            "  {:<6} {:<4} {:>11} -> {:>11}  {:>8} gal  S/ {:>10}{}",
            pump.pump_id,
            pump.product,
            pump.initial_reading,
            pump.final_reading,
            pump.gallons,
            pump.subtotal,
            if pump.meter_wrapped { "  (wrapped)" } else { "" },
        );
    }
    println!("{:-<72}", "");
    println!("  Gross revenue : S/ {}", report.gross_revenue);
    println!("  Expenses      : S/ {}", report.totals.expenses);
    println!("  Vouchers      : S/ {}", report.totals.vouchers);
    println!("  Deposits      : S/ {} (informational)", report.totals.deposits);
    println!("  NET BALANCE   : S/ {}", report.net_balance);

    if report.has_warnings() {
        println!("\n⚠️  Warnings:");
        for warning in &report.warnings {
            println!("  - {:?}", warning);
        }
    }

    Ok(())
}
