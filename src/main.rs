// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Presto CLI - HTTP Request Workbench
//!
//! Thin front end over the presto library.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};

use presto::{
    ClientConfig, Error, ExportConfig, FileStore, HttpMethod, Orchestrator, PageOptions,
    ReportFormat, RequestParams, ReqwestTransport, ResponseRecord, Session,
};

const DEFAULT_DATA_DIR: &str = ".presto";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("presto=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<Error>() {
                Some(err) if err.is_validation() => eprintln!("{}", err),
                _ => eprintln!("Error: {:#}", e),
            }
            ExitCode::from(1)
        }
    }
}

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    command: Option<String>,
    positional: Vec<String>,
    token: String,
    body: String,
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    format: Option<ReportFormat>,
    wait: Option<Duration>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
    proxy: Option<String>,
    insecure: bool,
    page: Option<PageOptions>,
    margin_mm: Option<f32>,
}

impl Args {
    fn parse(mut iter: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = Args::default();

        while let Some(arg) = iter.next() {
            let mut value = |name: &str| {
                iter.next()
                    .ok_or_else(|| anyhow!("Missing value for {}", name))
            };

            match arg.as_str() {
                "--token" => args.token = value("--token")?,
                "--body" => args.body = value("--body")?,
                "--data-dir" => args.data_dir = Some(value("--data-dir")?.into()),
                "--out-dir" => args.out_dir = Some(value("--out-dir")?.into()),
                "--format" => args.format = Some(value("--format")?.parse()?),
                "--wait-ms" => args.wait = Some(millis(&value("--wait-ms")?)?),
                "--timeout-ms" => args.timeout = Some(millis(&value("--timeout-ms")?)?),
                "--user-agent" => args.user_agent = Some(value("--user-agent")?),
                "--header" => args.headers.push(header(&value("--header")?)?),
                "--proxy" => args.proxy = Some(value("--proxy")?),
                "--insecure" => args.insecure = true,
                "--page" => args.page = Some(value("--page")?.parse()?),
                "--margin-mm" => {
                    let raw = value("--margin-mm")?;
                    let margin: f32 = raw
                        .parse()
                        .with_context(|| format!("Invalid margin: {}", raw))?;
                    args.margin_mm = Some(margin);
                }
                "--help" | "-h" => args.command = Some("help".to_string()),
                "--version" | "-v" => args.command = Some("version".to_string()),
                opt if opt.starts_with("--") => bail!("Unknown option: {}", opt),
                _ if args.command.is_none() => args.command = Some(arg.clone()),
                _ => args.positional.push(arg.clone()),
            }
        }

        Ok(args)
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| env::var_os("PRESTO_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default().accept_invalid_certs(self.insecure);
        if let Some(timeout) = self.timeout {
            config = config.timeout(timeout);
        }
        if let Some(ref user_agent) = self.user_agent {
            config = config.user_agent(user_agent.clone());
        }
        if let Some(ref proxy) = self.proxy {
            config = config.proxy(proxy.clone());
        }
        for (name, value) in &self.headers {
            config = config.header(name.clone(), value.clone());
        }
        config
    }

    fn session(&self) -> anyhow::Result<Session> {
        let transport = ReqwestTransport::with_config(self.client_config())
            .context("Failed to create HTTP client")?;
        let store = FileStore::new(self.data_dir());
        tracing::debug!(data_dir = %store.dir().display(), "Using preset store");
        Ok(Session::new(Arc::new(transport), Arc::new(store)))
    }

    fn export_config(&self) -> ExportConfig {
        let mut config = ExportConfig::default();
        if let Some(ref dir) = self.out_dir {
            config = config.out_dir(dir.clone());
        }
        if let Some(format) = self.format {
            config = config.format(format);
        }
        if let Some(wait) = self.wait {
            config = config.response_wait(wait);
        }
        let mut page = self.page.clone().unwrap_or_default();
        if let Some(margin) = self.margin_mm {
            page = page.margins(margin);
        }
        config.page(page)
    }

    /// `<METHOD> <URL>` starting at positional `offset`
    fn request(&self, offset: usize) -> anyhow::Result<RequestParams> {
        let (method, url) = match (self.positional.get(offset), self.positional.get(offset + 1)) {
            (Some(method), Some(url)) => (method, url),
            _ => bail!("Expected <METHOD> <URL>"),
        };
        let method: HttpMethod = method.parse()?;
        Ok(RequestParams::new(method, url.clone())
            .bearer_token(self.token.clone())
            .body(self.body.clone()))
    }

    fn arg(&self, index: usize, name: &str) -> anyhow::Result<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| anyhow!("Missing <{}>", name))
    }
}

/// `Name: value`
fn header(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid header '{}', expected 'Name: value'", raw),
    }
}

fn millis(value: &str) -> anyhow::Result<Duration> {
    let ms: u64 = value
        .parse()
        .with_context(|| format!("Invalid milliseconds: {}", value))?;
    Ok(Duration::from_millis(ms))
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let command = match args.command.as_deref() {
        Some(command) => command,
        None => {
            print_usage();
            return Ok(ExitCode::from(1));
        }
    };

    match command {
        "send" => {
            let session = args.session()?;
            session.set_form(args.request(0)?);
            let response = session.send_form().await?;
            Ok(print_response(response.as_ref()))
        }
        "save" => {
            let name = args.arg(0, "name")?.to_string();
            let session = args.session()?;
            session.set_form(args.request(1)?);
            match session.save_form(name)? {
                Some(preset) => {
                    println!("Saved preset {} ({})", preset.name, preset.id);
                    Ok(ExitCode::SUCCESS)
                }
                None => bail!("Preset name and URL are required"),
            }
        }
        "list" => {
            let presets = args.session()?.presets();
            if presets.is_empty() {
                println!("No saved requests");
            }
            for preset in &presets {
                println!("{}  {:<6} {}  {}", preset.id, preset.method.as_str(), preset.url, preset.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        "run" => {
            let id = args.arg(0, "id")?;
            let session = args.session()?;
            if session.preset(id).is_none() {
                return Err(Error::preset_not_found(id).into());
            }
            let response = session.load_and_run(id).await?;
            Ok(print_response(response.as_ref()))
        }
        "delete" => {
            let id = args.arg(0, "id")?;
            if args.session()?.delete_preset(id)? {
                println!("Deleted preset {}", id);
                Ok(ExitCode::SUCCESS)
            } else {
                Err(Error::preset_not_found(id).into())
            }
        }
        "export" => {
            let id = args.arg(0, "id")?;
            let orchestrator = Orchestrator::new(args.session()?, &args.export_config());
            let path = orchestrator.export_preset(id).await?;
            println!("Exported to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        "export-all" => {
            let orchestrator = Orchestrator::new(args.session()?, &args.export_config());
            match orchestrator.export_all().await? {
                Some(path) => println!("Exported to {}", path.display()),
                None => println!("No saved requests to export"),
            }
            Ok(ExitCode::SUCCESS)
        }
        "help" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        "version" => {
            println!("presto {}", presto::VERSION);
            Ok(ExitCode::SUCCESS)
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Ok(ExitCode::from(1))
        }
    }
}

fn print_response(response: Option<&ResponseRecord>) -> ExitCode {
    let response = match response {
        Some(r) => r,
        None => {
            eprintln!("Nothing sent: URL is empty");
            return ExitCode::from(1);
        }
    };

    println!("=== Response ===");
    println!("Status: {} {}", response.status, response.status_text);
    println!("Time: {}ms", response.time);

    if !response.headers.is_empty() {
        println!("\n=== Headers ===");
        for (name, value) in &response.headers {
            println!("{}: {}", name, value);
        }
    }

    let body = response.formatted_body();
    if !body.is_empty() {
        println!("\n=== Body ===");
        println!("{}", body);
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn print_usage() {
    println!(
        r#"Presto - HTTP Request Workbench

USAGE:
    presto <COMMAND> [OPTIONS]

COMMANDS:
    send <METHOD> <URL>          Send a request and print the response
    save <NAME> <METHOD> <URL>   Save a request as a preset
    list                         List saved presets
    run <ID>                     Send a saved preset
    delete <ID>                  Delete a saved preset
    export <ID>                  Export a preset and its response
    export-all                   Export all presets to one document
    help                         Show this help message
    version                      Show version information

OPTIONS:
    --token <TOKEN>       Bearer token
    --body <JSON>         Request body (sent for POST, PUT and PATCH)
    --data-dir <DIR>      Preset directory (default: $PRESTO_DATA_DIR or .presto)
    --out-dir <DIR>       Export directory (default: .)
    --format <FORMAT>     pdf, html or json (default: pdf)
    --wait-ms <MS>        Longest wait for a response when exporting
                          (default: wait until each request completes, which
                          never ends for an endpoint that never answers)
    --timeout-ms <MS>     HTTP request timeout (default: none)
    --user-agent <UA>     User agent (default: presto/<version>)
    --header <H>          Extra header 'Name: value', repeatable
    --proxy <URL>         Route requests through a proxy
    --insecure            Accept invalid TLS certificates
    --page <SIZE>         PDF page size: a4 or letter (default: a4)
    --margin-mm <MM>      PDF page margin (default: 15)

EXAMPLES:
    presto send GET https://api.example.com/users --token abc123
    presto save "Create User" POST https://api.example.com/users --body '{{"name":"Ada"}}'
    presto export-all --format html --out-dir reports
"#
    );
}
