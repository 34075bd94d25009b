use airdrop_checker_app::{Args, Command};
use clap::Parser;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level.as_str())).init();

    let outcome = match args.command {
        Command::Check { username } => airdrop_checker_app::check(args.client, &username)
            .await
            .map(|result| println!("{}", result)),
        Command::Serve(serve) => airdrop_checker_app::serve(args.client, serve).await,
    };

    if let Err(err) = outcome {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
