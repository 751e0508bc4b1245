//! Send a one-off message through a Synology Chat incoming webhook.
//!
//! Connection settings come from the environment, the message text from
//! the command line:
//!
//! ```text
//! SYNOCHAT_HOSTNAME=nas.local SYNOCHAT_TOKEN=... synochat-send backup finished
//! ```

use std::env;
use std::process;

use synochat::IncomingWebhook;

fn usage(problem: &str) -> ! {
    eprintln!("error: {problem}");
    eprintln!();
    eprintln!("usage: synochat-send <message text>...");
    eprintln!();
    eprintln!("environment:");
    eprintln!("  SYNOCHAT_HOSTNAME       DSM hostname (required)");
    eprintln!("  SYNOCHAT_TOKEN          incoming-webhook token (required)");
    eprintln!("  SYNOCHAT_PORT           port, default 443");
    eprintln!("  SYNOCHAT_FILE_URL       file URL to attach to the message");
    eprintln!("  SYNOCHAT_NO_VERIFY_SSL  accept self-signed certificates");
    process::exit(1);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    let hostname = match env::var("SYNOCHAT_HOSTNAME") {
        Ok(hostname) => hostname,
        Err(_) => usage("SYNOCHAT_HOSTNAME is not set"),
    };
    let token = match env::var("SYNOCHAT_TOKEN") {
        Ok(token) => token,
        Err(_) => usage("SYNOCHAT_TOKEN is not set"),
    };

    let mut webhook = IncomingWebhook::new(hostname, token);

    if let Ok(port) = env::var("SYNOCHAT_PORT") {
        match port.parse() {
            Ok(port) => webhook = webhook.with_port(port),
            Err(_) => usage("SYNOCHAT_PORT is not a port number"),
        }
    }
    if env::var("SYNOCHAT_NO_VERIFY_SSL").is_ok() {
        webhook = webhook.with_verify_ssl(false);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        usage("no message text given");
    }
    let text = args.join(" ");
    let file_url = env::var("SYNOCHAT_FILE_URL").ok();

    match webhook.send(&text, file_url.as_deref()).await {
        Ok(()) => println!("OK"),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
