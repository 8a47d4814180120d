//! Debug console for the varstash variable store.
//!
//! Stands in for a host runtime during development: reads line-oriented
//! commands from stdin and drives the same operation surface a boundary
//! adapter would, printing results in the legacy 1/0 flag convention.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use varstash_core::VarKind;
use varstash_host::{init_logging, SharedRegistry, VarOps, VarstashConfig};

#[derive(Parser)]
#[command(name = "varstash", version, about, long_about = None)]
struct Cli {
    /// Path to a config file (default: the per-user config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable file logging regardless of config
    #[arg(long)]
    no_file_log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => VarstashConfig::load_from(path)?,
        None => VarstashConfig::load().unwrap_or_default(),
    };

    let mut logging = config.logging.clone();
    if cli.no_file_log {
        logging.enabled = false;
    }
    let _guard = init_logging("cli", &logging)?;

    info!("varstash console ready, type 'help' for commands");

    let ops = VarOps::new(SharedRegistry::new());
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if config.log_operations {
            debug!(target: "varstash", "command: {}", command);
        }
        match run_command(&ops, command) {
            Ok(Output::Quit) => break,
            Ok(Output::Text(text)) => println!("{}", text),
            Err(msg) => eprintln!("error: {}", msg),
        }
    }

    Ok(())
}

enum Output {
    Text(String),
    Quit,
}

const HELP: &str = "\
global:  set-int|set-float|set-text <name> <value>
         get-int|get-float|get-text <name>
         del <name> | type <name> | upper | name-at <index> | dump
player:  pset-int|pset-float|pset-text <id> <name> <value>
         pget-int|pget-float|pget-text <id> <name>
         pdel <id> <name> | ptype <id> <name> | pupper <id>
         pname-at <id> <index> | pdump <id> | disconnect <id>
other:   help | quit";

fn run_command(ops: &VarOps, line: &str) -> Result<Output, String> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let (cmd, args) = args.split_first().expect("line is non-empty");

    let text = match *cmd {
        "help" => HELP.to_string(),
        "quit" | "exit" => return Ok(Output::Quit),

        // ===== Global scope =====
        "set-int" => {
            let (name, value) = name_and_value(args)?;
            ops.set_int(name, parse(value)?).to_string()
        }
        "set-float" => {
            let (name, value) = name_and_value(args)?;
            ops.set_float(name, parse(value)?).to_string()
        }
        "set-text" => {
            let (name, words) = name_and_words(args)?;
            ops.set_text(name, &words).to_string()
        }
        "get-int" => ops.get_int(one(args)?).to_string(),
        "get-float" => ops.get_float(one(args)?).to_string(),
        "get-text" => match ops.get_text(one(args)?) {
            Some(value) => value,
            None => "(not found)".to_string(),
        },
        "del" => ops.delete(one(args)?).to_string(),
        "type" => kind_name(ops.type_of(one(args)?)),
        "upper" => {
            none(args)?;
            ops.upper_index().to_string()
        }
        "name-at" => match ops.name_at(parse(one(args)?)?) {
            Some(name) => name,
            None => "(not found)".to_string(),
        },
        "dump" => {
            none(args)?;
            let mut out = Vec::new();
            for index in 0..ops.upper_index() {
                if let Some(name) = ops.name_at(index) {
                    out.push(format!("{:>4}  {}  {}", index, kind_name(ops.type_of(&name)), name));
                }
            }
            if out.is_empty() {
                "(empty)".to_string()
            } else {
                out.join("\n")
            }
        }

        // ===== Player scopes =====
        "pset-int" => {
            let (id, name, value) = id_name_value(args)?;
            ops.set_player_int(id, name, parse(value)?).to_string()
        }
        "pset-float" => {
            let (id, name, value) = id_name_value(args)?;
            ops.set_player_float(id, name, parse(value)?).to_string()
        }
        "pset-text" => {
            let (id, rest) = id_and_rest(args)?;
            let (name, words) = name_and_words(rest)?;
            ops.set_player_text(id, name, &words).to_string()
        }
        "pget-int" => {
            let (id, name) = id_and_name(args)?;
            ops.get_player_int(id, name).to_string()
        }
        "pget-float" => {
            let (id, name) = id_and_name(args)?;
            ops.get_player_float(id, name).to_string()
        }
        "pget-text" => {
            let (id, name) = id_and_name(args)?;
            match ops.get_player_text(id, name) {
                Some(value) => value,
                None => "(not found)".to_string(),
            }
        }
        "pdel" => {
            let (id, name) = id_and_name(args)?;
            ops.delete_player(id, name).to_string()
        }
        "ptype" => {
            let (id, name) = id_and_name(args)?;
            kind_name(ops.player_type_of(id, name))
        }
        "pupper" => ops.player_upper_index(parse(one(args)?)?).to_string(),
        "pname-at" => {
            let (id, index) = id_and_name(args)?;
            match ops.player_name_at(id, parse(index)?) {
                Some(name) => name,
                None => "(not found)".to_string(),
            }
        }
        "pdump" => {
            let id = parse(one(args)?)?;
            let mut out = Vec::new();
            for index in 0..ops.player_upper_index(id) {
                if let Some(name) = ops.player_name_at(id, index) {
                    out.push(format!(
                        "{:>4}  {}  {}",
                        index,
                        kind_name(ops.player_type_of(id, &name)),
                        name
                    ));
                }
            }
            if out.is_empty() {
                "(empty)".to_string()
            } else {
                out.join("\n")
            }
        }
        "disconnect" => {
            ops.on_entity_disconnect(parse(one(args)?)?);
            "ok".to_string()
        }

        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(Output::Text(text))
}

fn kind_name(raw: u32) -> String {
    VarKind::from_raw(raw)
        .unwrap_or(VarKind::None)
        .to_string()
}

fn parse<T: std::str::FromStr>(token: &str) -> Result<T, String> {
    token
        .parse()
        .map_err(|_| format!("bad argument '{}'", token))
}

fn none(args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        Ok(())
    } else {
        Err("unexpected arguments".to_string())
    }
}

fn one<'a>(args: &[&'a str]) -> Result<&'a str, String> {
    match args {
        &[only] => Ok(only),
        _ => Err("expected exactly one argument".to_string()),
    }
}

fn name_and_value<'a>(args: &[&'a str]) -> Result<(&'a str, &'a str), String> {
    match args {
        &[name, value] => Ok((name, value)),
        _ => Err("expected <name> <value>".to_string()),
    }
}

/// Name plus the remaining words joined as the text value.
fn name_and_words<'a>(args: &[&'a str]) -> Result<(&'a str, String), String> {
    match args.split_first() {
        Some((&name, words)) if !words.is_empty() => Ok((name, words.join(" "))),
        _ => Err("expected <name> <text>".to_string()),
    }
}

fn id_and_rest<'a, 'b>(args: &'b [&'a str]) -> Result<(u32, &'b [&'a str]), String> {
    match args.split_first() {
        Some((id, rest)) => Ok((parse(id)?, rest)),
        None => Err("expected <id> ...".to_string()),
    }
}

fn id_and_name<'a>(args: &[&'a str]) -> Result<(u32, &'a str), String> {
    match args {
        &[id, name] => Ok((parse(id)?, name)),
        _ => Err("expected <id> <name>".to_string()),
    }
}

fn id_name_value<'a>(args: &[&'a str]) -> Result<(u32, &'a str, &'a str), String> {
    match args {
        &[id, name, value] => Ok((parse(id)?, name, value)),
        _ => Err("expected <id> <name> <value>".to_string()),
    }
}
