use catalogo_client::{parse_command, render, ApiClient, Command, Session};
use catalogo_util::{api_base_url, load_env_file};
use reqwest::Client;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();

    // stdout carries the rendered views, so diagnostics go to stderr.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| err as Box<dyn std::error::Error>)?;

    let api = ApiClient::new(Url::parse(&api_base_url())?, Client::builder().build()?);
    let mut session = Session::new(api);

    print!("{}", render(session.state()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line, session.state().view()) {
            Ok(Command::Quit) => break,
            Ok(Command::Dispatch(action)) => session.dispatch(action).await,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        }
        print!("{}", render(session.state()));
    }

    Ok(())
}
