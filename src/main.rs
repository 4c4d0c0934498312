#[tokio::main]
async fn main() {
    if let Err(e) = velix_lib::run().await {
        eprintln!("velix-health: {e}");
        std::process::exit(1);
    }
}
