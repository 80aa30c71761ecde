use clap::{Parser, Subcommand};
use hal9000_scheduler::{SchedulerConfig, Schedule};

#[derive(Parser)]
#[command(name = "hal-scheduler", about = "HAL9000 cron-driven task scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the scheduler.
    Start {
        /// Re-exec detached into its own process group and return immediately.
        #[arg(long)]
        daemon: bool,
    },
    /// Stop a running scheduler by signaling its recorded PID.
    Stop,
    /// Ask a running scheduler to reload its on-disk schedule (SIGHUP).
    Reload,
    /// Report whether the scheduler is running.
    Status,
    /// Set or update a task's cron expression.
    Set { task: String, cron: String },
    /// Enable a disabled task.
    Enable { task: String },
    /// Disable a task without removing it.
    Disable { task: String },
    /// Run a task once immediately, bypassing cron evaluation.
    Run { task: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = SchedulerConfig::load();

    // `start --daemon` detaches with stdout/stderr wired to /dev/null, so
    // only the foreground run loop needs a log file to write to.
    let _log_guard = if matches!(cli.command, Command::Start { daemon: false }) {
        let _ = std::fs::create_dir_all(&config.log_dir);
        let file_appender = tracing_appender::rolling::daily(&config.log_dir, "hal-scheduler.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(non_blocking)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
        None
    };

    let result = match cli.command {
        Command::Start { daemon } => start(&config, daemon).await,
        Command::Stop => stop(&config),
        Command::Reload => signal_running(&config, nix::sys::signal::Signal::SIGHUP),
        Command::Status => status(&config),
        Command::Set { task, cron } => mutate_schedule(&config, |s| s.set(&task, &cron)),
        Command::Enable { task } => mutate_schedule(&config, |s| s.enable(&task)),
        Command::Disable { task } => mutate_schedule(&config, |s| s.disable(&task)),
        Command::Run { task } => run_once(&config, &task).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn start(config: &SchedulerConfig, daemon: bool) -> anyhow::Result<()> {
    if daemon {
        let args: Vec<String> = std::env::args().skip(1).filter(|a| a != "--daemon").collect();
        let pid = hal9000_scheduler::daemon::spawn_detached(&args)?;
        println!("scheduler started, pid {pid}");
        return Ok(());
    }
    hal9000_scheduler::daemon::run_foreground(config).await?;
    Ok(())
}

fn stop(config: &SchedulerConfig) -> anyhow::Result<()> {
    signal_running(config, nix::sys::signal::Signal::SIGTERM)
}

fn signal_running(config: &SchedulerConfig, signal: nix::sys::signal::Signal) -> anyhow::Result<()> {
    let pid = hal9000_scheduler::pidfile::read_pid(&config.pid_path).ok_or_else(|| anyhow::anyhow!("scheduler is not running"))?;
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), signal)?;
    Ok(())
}

fn status(config: &SchedulerConfig) -> anyhow::Result<()> {
    match hal9000_scheduler::pidfile::read_pid(&config.pid_path) {
        Some(pid) if hal9000_scheduler::pidfile::is_process_running(pid) => {
            println!("running, pid {pid}");
        }
        _ => println!("not running"),
    }
    Ok(())
}

fn mutate_schedule(config: &SchedulerConfig, f: impl FnOnce(&mut Schedule) -> Result<(), hal9000_scheduler::SchedulerError>) -> anyhow::Result<()> {
    let mut schedule = Schedule::load(&config.schedule_path)?;
    f(&mut schedule)?;
    schedule.save(&config.schedule_path)?;
    Ok(())
}

async fn run_once(config: &SchedulerConfig, task: &str) -> anyhow::Result<()> {
    let tasks = hal9000_scheduler::discover_tasks(&config.tasks_dir)?;
    let handler = tasks.get(task).ok_or_else(|| anyhow::anyhow!("no such task '{task}'"))?;
    let outcome = handler.run().await;
    println!("{}", outcome.message);
    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }
    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
