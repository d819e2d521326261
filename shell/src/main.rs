use clap::Parser;
use fsh::{FshError, Shell};
use fsh_config::FshConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

mod completer;

/// fsh - Interactive shell for local filesystem maintenance
#[derive(Parser, Debug)]
#[command(name = "fsh", version, about)]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "FSH_CONFIG_FILE")]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => fsh_config::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}, using defaults");
            FshConfig::default()
        }),
        None => fsh_config::load().unwrap_or_default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.directive())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut shell = Shell::new()?;
    run_repl(&mut shell, &config)?;

    Ok(())
}

fn run_repl(shell: &mut Shell, config: &FshConfig) -> Result<(), Box<dyn std::error::Error>> {
    use completer::FshHelper;
    use rustyline::error::ReadlineError;
    use rustyline::{CompletionType, Config, Editor};

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(config.shell.history.max_entries)?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .build();

    let cwd = Arc::new(RwLock::new(shell.cwd().to_path_buf()));
    let helper = FshHelper::new(cwd.clone());

    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(helper));

    let history_path: PathBuf = config.shell.history.path();
    if config.shell.history.enabled {
        let _ = rl.load_history(&history_path);
    }

    loop {
        {
            let mut cwd_guard = cwd.write().unwrap();
            *cwd_guard = shell.cwd().to_path_buf();
        }

        let prompt = config.shell.prompt.replace("{cwd}", &shell.display_cwd());

        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match shell.execute(&line) {
                    Ok(()) => {}
                    Err(FshError::Exit) => break,
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("err: {err}");
                break;
            }
        }
    }

    if config.shell.history.enabled {
        let _ = rl.save_history(&history_path);
    }

    Ok(())
}
