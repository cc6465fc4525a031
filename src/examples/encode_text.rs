use protocol7::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Usage: encode_text [TEXT] [--spread] [--random-key]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let spread = args.iter().any(|a| a == "--spread");
    let random_key = args.iter().any(|a| a == "--random-key");
    let text = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "A".to_string());

    println!("🌀 Protocol-7 - Encoding {:?}", text);

    let config = if spread {
        EncoderConfig::spread()
    } else {
        EncoderConfig::default()
    };
    let key = random_key.then(|| RandomKey::from_entropy().next_key());

    let mut msg = Message::with_config(&config, key)?;
    msg.encode_str(&text)?;

    println!("🔑 Key: {} (stride {})\n", msg.key().value(), config.stride);

    for (ch, symbol) in text.chars().zip(msg.iter()) {
        println!("━━━━━━━━━━━━━━━━━━━━");
        println!("{:?} = {:#04x}", ch, ch as u32);
        let rendered = symbol.grid().to_string();
        for (line, check) in rendered.lines().zip(symbol.row_checks()) {
            println!("   {}  | {}", line, check);
        }
        let cols: Vec<String> = symbol.col_checks().iter().map(|c| c.to_string()).collect();
        println!("   {}", cols.join(""));
        println!("   harmonic: {}", symbol.harmonic());
    }

    println!("\n🔒 Digest: {:#018x}", msg.digest());
    println!("\n{}", msg.to_json()?);

    Ok(())
}
