//! Command Runner CLI

use anyhow::{bail, Context, Result};
use cmd_runner::Command;
use std::env;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "run" => run_command(&args[2..], true),
        "render" => run_command(&args[2..], false),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            std::process::exit(1)
        }
    }
}

fn print_usage() {
    println!("Command Runner v{}", cmd_runner::VERSION);
    println!();
    println!("Usage:");
    println!("  cmd-runner run [flags] <program> [args...]     Build, escape, and execute");
    println!("  cmd-runner render [flags] <program> [args...]  Print the escaped command line");
    println!();
    println!("Flags:");
    println!("  --always-log    Report the run even when it succeeds");
    println!("  --merge-stderr  Append 2>&1 so stderr is captured in order");
    println!("  --json          Print the run result as JSON");
    println!();
    println!("Examples:");
    println!("  cmd-runner run ls -la");
    println!("  cmd-runner run --merge-stderr tar czf backup.tgz './my docs'");
    println!("  cmd-runner render rm -rf '$(pwd)'");
}

fn run_command(args: &[String], execute: bool) -> Result<()> {
    let mut always_log = false;
    let mut merge_stderr = false;
    let mut json = false;

    let mut rest = args;
    while let Some(first) = rest.first() {
        match first.as_str() {
            "--always-log" => always_log = true,
            "--merge-stderr" => merge_stderr = true,
            "--json" => json = true,
            _ => break,
        }
        rest = &rest[1..];
    }

    let Some((program, program_args)) = rest.split_first() else {
        bail!("no program given; see `cmd-runner` for usage");
    };

    let mut command = Command::new(program).with_always_log(always_log);

    for arg in program_args {
        command.argument(arg);
    }

    if merge_stderr {
        command.redirect_stderr_to_stdout();
    }

    if !execute {
        println!("{}", command.to_command_string());
        return Ok(());
    }

    command.run();

    if json {
        let record = command.record().context("no run recorded")?;
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        for line in command.last_output() {
            println!("{}", line);
        }
    }

    let exit_code = command.last_exit_code().unwrap_or(-1);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
