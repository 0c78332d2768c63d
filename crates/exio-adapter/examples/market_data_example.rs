/*
[INPUT]:  Public API endpoint
[OUTPUT]: Market metadata printed to stdout
[POS]:    Examples - REST market data
[UPDATE]: When public endpoints change
*/

use exio_adapter::ExioClient;

/// Example: fetch trading pairs and currencies from the public API
#[tokio::main]
async fn main() {
    let client = ExioClient::new().expect("client init");

    match client.get_symbols().await {
        Ok(list) => {
            println!("=== Symbols ({}) ===", list.symbols.len());
            for symbol in &list.symbols {
                println!("  {} - {}", symbol.name, symbol.description);
            }
        }
        Err(err) => eprintln!("get_symbols failed: {err}"),
    }

    match client.get_currencies().await {
        Ok(currencies) => {
            println!("=== Currencies ({}) ===", currencies.len());
            for currency in &currencies {
                println!("  {} - {}", currency.id, currency.name);
            }
        }
        Err(err) => eprintln!("get_currencies failed: {err}"),
    }
}
