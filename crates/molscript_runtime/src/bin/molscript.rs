//! molscript CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use molscript_language::CompileFlags;
use molscript_runtime::Repl;
use molscript_runtime::listing::ListingConfig;
use molscript_runtime::session::Session;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    check_only: bool,
    show_listing: bool,
    show_spans: bool,
    show_help: bool,
    show_version: bool,
    debug: bool,
    silent: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-c" | "--check" => config.check_only = true,
            "-l" | "--listing" => config.show_listing = true,
            "--spans" => config.show_spans = true,
            "--debug" => config.debug = true,
            "-s" | "--silent" => config.silent = true,
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn init_tracing(config: &CliConfig) {
    let default = if config.debug {
        "molscript_language=debug,molscript_runtime=debug"
    } else if config.silent {
        "off"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when any file failed to compile.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("molscript {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    init_tracing(&config);

    let flags = CompileFlags::default()
        .with_check_only(config.check_only)
        .with_debug(config.debug)
        .with_silent(config.silent);
    let listing = ListingConfig {
        show_spans: config.show_spans,
        ..ListingConfig::default()
    };

    if config.files.is_empty() {
        let mut repl = Repl::new()?
            .with_session(Session::with_flags(flags))
            .with_listing(listing);
        repl.run()?;
        return Ok(true);
    }

    let mut session = Session::with_flags(flags);
    let mut all_ok = true;
    for file in &config.files {
        let program = session.compile_file(file)?;
        if config.show_listing {
            print!(
                "{}",
                molscript_runtime::listing::render_listing_with_config(program, &listing)
            );
        } else if let Some(message) = &program.error_message {
            eprintln!("{message}");
        }
        if program.is_ok() {
            if !config.show_listing {
                println!("{}: {} commands", file.display(), program.len());
            }
        } else {
            all_ok = false;
        }
    }

    Ok(all_ok)
}

fn print_help() {
    println!(
        "\x1b[1mmolscript\x1b[0m - Molecular-viewer script compiler

\x1b[1mUSAGE:\x1b[0m
    molscript [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Scripts to compile; with none, start the console

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -c, --check        Syntax check only; `define` leaves the registry alone
    -l, --listing      Print the command listing of each file
    --spans            Show source spans in listings
    --debug            Log each assembled command
    -s, --silent       Suppress compiler log output

\x1b[1mEXAMPLES:\x1b[0m
    molscript                        Start the console
    molscript -c view.spt            Check view.spt and exit
    molscript -l view.spt            Print the listing of view.spt
    RUST_LOG=debug molscript x.spt   Compile with full logging

\x1b[1mCONSOLE COMMANDS:\x1b[0m
    :help                Show console commands
    :load PATH           Compile a script file
    :spans on|off        Toggle source spans
    Ctrl+D               Exit the console
    Ctrl+C               Cancel current input"
    );
}
