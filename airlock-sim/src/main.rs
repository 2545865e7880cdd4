#[derive(clap::Parser)]
#[command(name = "airlock-sim")]
#[command(about = "Simulated lock-box controller")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:80")]
    listen: String,
    /// Respond 503 to /open, as a jammed lock would
    #[arg(long)]
    fail: bool,
    /// Sleep this many milliseconds before answering any request
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli: Cli = clap::Parser::parse();
    let listener = match tokio::net::TcpListener::bind(&cli.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("failed to bind to {}: {e}", cli.listen);
            std::process::exit(1);
        }
    };
    println!("Simulated lock-box controller listening on http://{}", cli.listen);

    let config = airlock_sim::SimConfig {
        fail_open: cli.fail,
        delay: cli.delay_ms.map(std::time::Duration::from_millis),
    };
    if let Err(e) = airlock_sim::serve(listener, config).await {
        eprintln!("server error: {e}");
        std::process::exit(1);
    }
}
