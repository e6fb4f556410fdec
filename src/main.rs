// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Aurasniff CLI - Experience Cloud recon
//!
//! Thin collaborator over the aurasniff library: parses arguments, runs
//! the pipeline up to the requested stage and prints the results.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use aurasniff::{HttpClientConfig, Recon};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aurasniff=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "endpoints" | "config" | "routes" | "components" => match parse_options(&args[2..]) {
            Ok(options) => run(&args[1], options).await,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ExitCode::from(1)
            }
        },
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("aurasniff {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

struct Options {
    url: String,
    sid: Option<String>,
    token: String,
    insecure: bool,
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut url = None;
    let mut sid = None;
    let mut token = String::new();
    let mut insecure = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sid" => sid = Some(iter.next().context("--sid needs a value")?.clone()),
            "--token" => token = iter.next().context("--token needs a value")?.clone(),
            "--insecure" => insecure = true,
            flag if flag.starts_with('-') => anyhow::bail!("unknown flag: {}", flag),
            value => url = Some(value.clone()),
        }
    }

    let url = url.context("missing site URL, e.g. https://acme.my.site.com/s")?;
    Ok(Options {
        url: normalize_base_url(&url),
        sid,
        token,
        insecure,
    })
}

/// Strip the trailing `/s` or `/` the operator usually pastes along
fn normalize_base_url(url: &str) -> String {
    let url = url.strip_suffix("/s").unwrap_or(url);
    let url = url.strip_suffix('/').unwrap_or(url);
    url.to_string()
}

async fn run(command: &str, options: Options) -> ExitCode {
    let mut config = HttpClientConfig::new().accept_invalid_certs(options.insecure);
    if let Some(sid) = options.sid {
        config = config.session_cookie(sid);
    }

    let mut recon = match Recon::new(&options.url, config) {
        Ok(r) => r.with_token(options.token),
        Err(e) => {
            eprintln!("Failed to set up recon: {}", e);
            return ExitCode::from(1);
        }
    };

    let result = match command {
        "endpoints" | "config" => recon.discover().await,
        "routes" => recon.collect_routes().await.map(|_| ()),
        "components" => recon.mine_components().await.map(|_| ()),
        _ => unreachable!("checked in main"),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::from(1);
    }

    let session = recon.session();
    match command {
        "endpoints" => {
            println!(
                "Active endpoint: {}",
                session.active_endpoint.as_deref().unwrap_or("(none)")
            );
        }
        "config" => {
            println!(
                "Active endpoint: {}",
                session.active_endpoint.as_deref().unwrap_or("(none)")
            );
            if let Some(ref context) = session.context {
                println!("fwuid: {}", context.fwuid);
                println!("app:   {}", context.app);
            }
            println!(
                "Bootstrap URL: {}",
                session.bootstrap_url.as_deref().unwrap_or("(none)")
            );
        }
        "routes" => {
            println!("=== Routes ({}) ===", session.routes.len());
            for route in &session.routes {
                println!("  {} (view {})", route.path, route.view_uuid);
            }
        }
        "components" => {
            println!("=== Custom Components ({}) ===", session.components.len());
            for descriptor in &session.components {
                println!("  {}", descriptor);
            }
        }
        _ => {}
    }

    ExitCode::SUCCESS
}

fn print_usage() {
    println!(
        r#"Aurasniff - Salesforce Experience Cloud (Aura) Recon

USAGE:
    aurasniff <COMMAND> <url> [OPTIONS]

COMMANDS:
    endpoints <url>     Probe and select the active Aura endpoint
    config <url>        Extract the Aura context and bootstrap URL
    routes <url>        Collect the site's UI routes
    components <url>    Mine custom component descriptors across routes
    help                Show this help message
    version             Show version information

OPTIONS:
    --sid <value>       Salesforce session id cookie for authenticated calls
    --token <value>     Aura token sent with every action request
    --insecure          Accept invalid TLS certificates (recon targets only)

EXAMPLES:
    aurasniff endpoints https://acme.my.site.com/s
    aurasniff components https://acme.my.site.com --sid 00Dxx... --token eyJ...
"#
    );
}
