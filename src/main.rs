use std::process::ExitCode;

use clap::Parser;

use arbor::cli::{Cli, Command, ConfigCommand, TmuxCommand};
use arbor::commands::{self, pr::PrOptions, tmux_new::TmuxNewOptions, Context};
use arbor::{errors, git};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            // Cancellation is the user closing the dialog, not a failure:
            // exit silently with the conventional interrupt code.
            if errors::is_cancelled(&err) {
                return ExitCode::from(errors::EXIT_CANCELLED);
            }
            eprintln!("arbor: {err:#}");
            ExitCode::from(errors::exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    git::ensure_installed()?;

    let ctx = Context {
        git: git::Git::new(cli.debug),
        repo_override: cli.repo,
        quiet: cli.quiet,
        debug: cli.debug,
    };

    match cli.command {
        Command::New {
            branch,
            start_point,
            base_dir,
            cd,
        } => commands::new::run(&ctx, &branch, start_point.as_deref(), base_dir.as_deref(), cd)?,
        Command::Go {
            query,
            no_fzf,
            index,
        } => commands::go::run(&ctx, query.as_deref(), index, no_fzf)?,
        Command::Clean {
            query,
            force,
            keep_branch,
            yes,
        } => commands::clean::run(&ctx, query.as_deref(), force, keep_branch, yes)?,
        Command::Open { query, editor } => {
            commands::open::run(&ctx, query.as_deref(), editor.as_deref())?
        }
        Command::Pr {
            number,
            branch,
            remote,
            cd,
            force,
        } => commands::pr::run(
            &ctx,
            number,
            &PrOptions {
                branch,
                remote,
                cd,
                force,
            },
        )?,
        Command::Tmux(TmuxCommand::New {
            branch,
            start_point,
            base_dir,
            count,
            layout,
            sync_panes,
            no_attach,
            session_name,
        }) => commands::tmux_new::run(
            &ctx,
            &branch,
            start_point.as_deref(),
            &TmuxNewOptions {
                base_dir,
                count,
                layout,
                sync_panes,
                no_attach,
                session_name,
            },
        )?,
        Command::Config(config_cmd) => match config_cmd {
            ConfigCommand::List => commands::config_cmd::run_list()?,
            ConfigCommand::Get { key } => commands::config_cmd::run_get(&key)?,
            ConfigCommand::Set { key, value } => commands::config_cmd::run_set(&key, &value)?,
            ConfigCommand::Reset => commands::config_cmd::run_reset()?,
        },
        Command::Hook { shell } => commands::hook::run(&shell)?,
        Command::External(args) => return commands::passthrough::run(&ctx, &args),
    }

    Ok(ExitCode::SUCCESS)
}
