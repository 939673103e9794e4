use anyhow::{Context, Result};
use clap::Parser;
use gobook_kernel::config::{default_program_path, KernelConfig, ToolchainConfig, DEFAULT_LISTEN};
use gobook_kernel::server::KernelServer;
use gobook_kernel::Kernel;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// gobook-kernel - runs Go notebook cells for the editor
#[derive(Parser, Debug)]
#[command(name = "gobook-kernel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "GOBOOK_LISTEN", default_value = DEFAULT_LISTEN)]
    listen: SocketAddr,

    /// Where the generated program is written [default: $TMPDIR/main.go]
    #[arg(long, env = "GOBOOK_PROGRAM")]
    program_path: Option<PathBuf>,

    /// go binary used to locate GOPATH
    #[arg(long, env = "GOBOOK_GO", default_value = "go")]
    go: String,

    /// gopls binary [default: $GOPATH/bin/gopls]
    #[arg(long, env = "GOBOOK_GOPLS")]
    gopls: Option<PathBuf>,

    /// Command that runs the program; the file path is appended
    #[arg(long, env = "GOBOOK_RUN", default_value = "go run")]
    run_command: String,

    /// Command that formats the program; the file path is appended
    #[arg(long, env = "GOBOOK_FORMAT", default_value = "go fmt")]
    format_command: String,

    /// Log filter, e.g. `info` or `gobook_kernel=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn kernel_config(&self) -> Result<KernelConfig> {
        let run_command = ToolchainConfig::parse_command(&self.run_command)
            .with_context(|| format!("invalid --run-command: {:?}", self.run_command))?;
        let format_command = ToolchainConfig::parse_command(&self.format_command)
            .with_context(|| format!("invalid --format-command: {:?}", self.format_command))?;

        Ok(KernelConfig {
            listen: self.listen,
            program_path: self.program_path.clone().unwrap_or_else(default_program_path),
            toolchain: ToolchainConfig {
                go: self.go.clone(),
                gopls: self.gopls.clone(),
                run_command,
                format_command,
            },
        })
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match &cli.log_file {
        Some(path) => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

async fn serve(config: KernelConfig) -> Result<()> {
    let kernel = Kernel::from_config(&config);

    let server = KernelServer::bind(config.listen, kernel)
        .await
        .with_context(|| format!("cannot listen on {}", config.listen))?;

    info!(addr = %server.local_addr()?, "kernel running");
    println!(
        "ctrl + click to view generated go code: {}",
        config.program_path.display()
    );

    server.serve().await.context("server stopped")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.kernel_config()?;
    let runtime = tokio::runtime::Runtime::new().context("failed to create Tokio runtime")?;
    runtime.block_on(serve(config))
}
