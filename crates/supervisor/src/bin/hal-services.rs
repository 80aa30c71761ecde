use clap::{Parser, Subcommand};
use hal9000_supervisor::{ServiceState, ServicesManifest, Supervisor, SupervisorConfig};

#[derive(Parser)]
#[command(name = "hal-services", about = "HAL9000 services supervisor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start one service, or every enabled service if no name is given.
    Start { name: Option<String> },
    /// Stop one service, or every running service if no name is given.
    Stop { name: Option<String> },
    /// Report each service's state.
    Status,
    /// Stop then start a service.
    Restart { name: String },
    /// Show the last N lines of a service's log.
    Logs {
        name: String,
        #[arg(long, default_value_t = 50)]
        tail: usize,
    },
    /// Check a service's command resolution, executable bit, and recent errors.
    Diagnose { name: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = SupervisorConfig::load();
    let manifest = match ServicesManifest::load(&config.manifest_path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: failed to load services manifest: {e}");
            std::process::exit(1);
        }
    };
    let supervisor = Supervisor::new(config.runtime_dir.clone(), manifest);

    let result = run(&supervisor, cli.command).await;
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(supervisor: &Supervisor, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Start { name } => {
            for name in target_names(supervisor, name) {
                match supervisor.start(&name) {
                    Ok(pid) => println!("{name}: started, pid {pid}"),
                    Err(e) => println!("{name}: {e}"),
                }
            }
        }
        Command::Stop { name } => {
            for name in target_names(supervisor, name) {
                match supervisor.stop(&name).await {
                    Ok(()) => println!("{name}: stopped"),
                    Err(e) => println!("{name}: {e}"),
                }
            }
        }
        Command::Status => {
            for (name, status) in supervisor.status_all() {
                match status {
                    Ok(ServiceState::Running { pid, uptime }) => println!("{name}: running (pid {pid}, up {}s)", uptime.as_secs()),
                    Ok(ServiceState::Stopped) => println!("{name}: stopped"),
                    Ok(ServiceState::Disabled) => println!("{name}: disabled"),
                    Err(e) => println!("{name}: error ({e})"),
                }
            }
        }
        Command::Restart { name } => {
            let pid = supervisor.restart(&name).await?;
            println!("{name}: restarted, pid {pid}");
        }
        Command::Logs { name, tail } => {
            for line in supervisor.logs(&name, tail)? {
                println!("{line}");
            }
        }
        Command::Diagnose { name } => {
            let diagnosis = supervisor.diagnose(&name)?;
            println!("service: {}", diagnosis.name);
            println!("command on PATH or absolute: {}", diagnosis.on_path_or_absolute);
            println!("executable bit set: {}", diagnosis.executable);
            println!("state: {:?}", diagnosis.state);
            if diagnosis.recent_errors.is_empty() {
                println!("no recent errors in log");
            } else {
                println!("recent errors:");
                for line in diagnosis.recent_errors {
                    println!("  {line}");
                }
            }
        }
    }
    Ok(())
}

fn target_names(supervisor: &Supervisor, name: Option<String>) -> Vec<String> {
    match name {
        Some(name) => vec![name],
        None => supervisor.services().iter().map(|s| s.name.clone()).collect(),
    }
}
