//! CLI entrypoint for `multi-mcp-config-check`.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use multi_mcp_config_check::error::usage_exit_code;
use multi_mcp_config_check::{Args, CheckError, logging, run};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version text go to stdout, usage errors to stderr.
            let _usage_written = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };
    logging::init(args.verbose);
    let mut stdout = io::stdout().lock();
    match run(&args, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn report_failure(err: &CheckError) {
    let mut stderr = io::stderr().lock();
    // Nowhere left to report a failing stderr.
    let _error_written = writeln!(stderr, "error: {err}");
    if let Some(hint) = err.guidance() {
        let _hint_written = writeln!(stderr, "hint: {hint}");
    }
}
