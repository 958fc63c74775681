use registry_migrator::cli::{Args, Runner};

#[tokio::main]
async fn main() {
    let runner = Runner::new(Args::parse_args());

    if let Err(e) = runner.run().await {
        runner.output().error(&e.to_string());
        std::process::exit(1);
    }
}
