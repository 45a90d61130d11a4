/**
 * spa-scope
 *
 * Scopes CSS files to a single-spa application container
 */
use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use std::process;

use single_spa_scoped::Scoper;
use single_spa_scoped_cli::compile::collect_inputs;
use single_spa_scoped_cli::compile::parallel::{parallel_scope, write_outputs};
use single_spa_scoped_cli::config::scope::{resolve_options, ScopeOverrides};
use single_spa_scoped_cli::logging::{self, LogLevel};

fn main() {
    let matches = Command::new("spa-scope")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scope CSS to a single-spa application")
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .help("CSS files or glob patterns")
                .num_args(1..),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("JSON file with scoping options"),
        )
        .arg(
            Arg::new("app-name")
                .short('n')
                .long("app-name")
                .value_name("NAME")
                .help("Application name (defaults to the name in ./package.json)"),
        )
        .arg(
            Arg::new("additional-selector")
                .long("additional-selector")
                .value_name("SELECTOR")
                .action(ArgAction::Append)
                .help("Extra selector to scope every rule under; repeatable"),
        )
        .arg(
            Arg::new("exclude-parcels")
                .long("exclude-parcels")
                .action(ArgAction::SetTrue)
                .help("Keep styles out of nested parcels"),
        )
        .arg(
            Arg::new("keyframe-suffix")
                .long("keyframe-suffix")
                .value_name("SUFFIX")
                .help("Fixed suffix for keyframe names instead of a generated one"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Write scoped files here instead of printing them"),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue)
                .help("Print the effective options as JSON and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("More output; repeat for debug output"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only report errors"),
        )
        .get_matches();

    logging::init(LogLevel::from_flags(
        matches.get_count("verbose"),
        matches.get_flag("quiet"),
    ));

    let overrides = ScopeOverrides {
        app_name: matches.get_one::<String>("app-name").cloned(),
        additional_selectors: matches
            .get_many::<String>("additional-selector")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        exclude_parcels: matches.get_flag("exclude-parcels"),
        keyframe_suffix: matches.get_one::<String>("keyframe-suffix").cloned(),
    };
    let config = matches.get_one::<String>("config").map(PathBuf::from);
    let options = resolve_options(config.as_deref(), overrides).unwrap_or_else(|e| {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    });

    if matches.get_flag("print-config") {
        match serde_json::to_string_pretty(&options) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let scoper = Scoper::new(&options).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let patterns: Vec<String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let files = collect_inputs(&patterns).unwrap_or_else(|e| {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    });

    let mut scoped = Vec::with_capacity(files.len());
    let mut failed = false;
    for result in parallel_scope(&files, &scoper) {
        match result {
            Ok(file) => scoped.push(file),
            Err(e) => {
                tracing::error!("{:#}", e);
                failed = true;
            }
        }
    }

    match matches.get_one::<String>("out-dir") {
        Some(dir) => {
            let written = write_outputs(&scoped, Path::new(dir)).unwrap_or_else(|e| {
                eprintln!("Error: {:#}", e);
                process::exit(1);
            });
            tracing::info!("Wrote {} files to {}", written.len(), dir);
        }
        None => {
            for file in &scoped {
                print!("{}", file.css);
                if !file.css.ends_with('\n') {
                    println!();
                }
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
