use protocol7::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🌀 Protocol-7 - Integrity check");

    let msg = encode_message("Protocol-7", None)?;
    msg.check_integrity()?;
    println!("✅ {} symbols verified under key {}", msg.len(), msg.key().value());

    let symbol = msg
        .get(0)
        .ok_or_else(|| anyhow::anyhow!("empty message"))?;

    // Single flips are caught by the parities.
    for (row, col) in [(0, 0), (3, 2), (6, 4)] {
        let mut grid = *symbol.grid();
        grid.toggle(row, col);
        report(&format!("flip ({row}, {col})"), check_integrity(&grid, symbol.record(), msg.key()));
    }

    // Clearing a 2×2 block of set cells keeps every parity; only the
    // harmonic checksum notices.
    let mut block = Grid::zeroed();
    for (row, col) in [(2, 1), (2, 3), (4, 1), (4, 3)] {
        block.set(Cell { row, col });
    }
    let record = verify(&block, msg.key());
    report(
        "erase 2×2 block",
        check_integrity(&Grid::zeroed(), &record, msg.key()),
    );

    // A key of the opposite parity flips every row check.
    let wrong = msg.key().with_opposite_parity();
    report(
        &format!("key {}", wrong.value()),
        check_integrity(symbol.grid(), symbol.record(), wrong),
    );

    Ok(())
}

fn report(label: &str, outcome: Result<()>) {
    match outcome {
        Ok(()) => println!("   {label}: ⚠️  not detected"),
        Err(e) => println!("   {label}: ❌ {e}"),
    }
}
