//! rdl - download files through a relay from the command line.

#[tokio::main]
async fn main() -> relay_dl::Result<()> {
    env_logger::init();
    relay_dl::cli::run().await
}
