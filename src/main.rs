#[tokio::main]
async fn main() {
    if let Err(e) = musaaf_lib::run().await {
        eprintln!("musaaf: {e}");
        std::process::exit(1);
    }
}
