#[tokio::main]
async fn main() {
    if let Err(e) = zoomtrack_lib::run().await {
        eprintln!("zoomtrack: {e}");
        std::process::exit(1);
    }
}
