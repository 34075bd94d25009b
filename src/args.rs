use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(flatten)]
    pub client: ClientArgs,

    /// Log filter used when RUST_LOG is not set
    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub struct ClientArgs {
    /// API OAuth access token
    #[clap(short, long, env)]
    pub api_token: Option<SecretString>,

    /// GitHub API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Estimate the airdrop allocation of a single account
    Check {
        /// GitHub username
        username: String,
    },
    /// Start the HTTP service
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address the HTTP server binds to
    #[clap(long, env = "APP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port the HTTP server listens on
    #[clap(long, env = "APP_PORT", default_value_t = 3000, parse(try_from_str=port_in_range))]
    pub port: u16,

    /// Request header carrying the login of the signed-in user, set by the authenticating proxy
    #[clap(long, env, default_value = "x-forwarded-user")]
    pub identity_header: String,
}

fn port_in_range(value: &str) -> clap::Result<u16, String> {
    number_in_range(value, 1, u16::MAX, "port".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

#[test]
fn port_range_test() {
    assert_eq!(port_in_range("8080"), Ok(8080));
    assert!(port_in_range("0").is_err());
    assert!(port_in_range("65536").is_err());
    assert!(port_in_range("http").is_err());
}

#[test]
fn serve_defaults_test() {
    for var in ["API_TOKEN", "API_URL", "LOG_LEVEL", "APP_HOST", "APP_PORT", "IDENTITY_HEADER"] {
        std::env::remove_var(var);
    }
    let args = Args::try_parse_from(["airdrop_checker", "serve"]).unwrap();
    assert_eq!(args.client.api_url, "https://api.github.com");
    match args.command {
        Command::Serve(serve) => {
            assert_eq!(serve.host, "127.0.0.1");
            assert_eq!(serve.port, 3000);
            assert_eq!(serve.identity_header, "x-forwarded-user");
        }
        command => panic!("Unexpected command: {:?}", command),
    }
}

#[test]
fn check_command_test() {
    let args = Args::try_parse_from(["airdrop_checker", "--api-url", "http://localhost:9000", "check", "octocat"]).unwrap();
    assert_eq!(args.client.api_url, "http://localhost:9000");
    assert!(matches!(args.command, Command::Check { username } if username == "octocat"));
}
