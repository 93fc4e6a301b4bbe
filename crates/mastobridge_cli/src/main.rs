//! CLI entry point.
//!
//! # Responsibility
//! - Convert ids between native and wire form from the shell.
//! - Verify `mastobridge_core` linkage.

use log::error;
use mastobridge_core::{
    core_version, init_stderr_logging, to_native_id_padded, to_wire_id, DEFAULT_NATIVE_ID_WIDTH,
};
use std::process::ExitCode;

const USAGE: &str =
    "usage: mastobridge_cli <encode NATIVE_ID | decode WIRE_ID [WIDTH] | version>";

fn main() -> ExitCode {
    let level = std::env::var("MASTOBRIDGE_LOG").unwrap_or_else(|_| "warn".to_string());
    if let Err(err) = init_stderr_logging(&level) {
        eprintln!("logging disabled: {err}");
    }

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["encode", id] => to_wire_id(id),
        ["decode", id] => to_native_id_padded(id, DEFAULT_NATIVE_ID_WIDTH),
        ["decode", id, width] => match width.parse::<usize>() {
            Ok(width) => to_native_id_padded(id, width),
            Err(_) => {
                eprintln!("{USAGE}");
                return ExitCode::from(2);
            }
        },
        ["version"] => Ok(core_version().to_string()),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_convert module=cli status=error error_code={}", err.code());
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
