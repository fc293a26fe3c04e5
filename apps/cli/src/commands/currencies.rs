use avquote_core::currency::CURRENCIES;

pub fn execute() -> anyhow::Result<()> {
    for info in CURRENCIES {
        println!("{}  {:<4} {}", info.code, info.symbol, info.name);
    }
    Ok(())
}
