// check-coding-style: Gwyddion C coding style checker
//
// Can be used as makeprg in vim:
//
//     :set makeprg=check-coding-style\ %

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use crossterm::tty::IsTty;

use cstyle::checker::constants::DEFAULT_MAX_LINE_LENGTH;
use cstyle::report::{ColorChoice, Reporter};
use cstyle::{CheckError, CheckOptions, Checker, Rule};

/// Check C source files for coding style violations.
///
/// Warnings are printed as FILE:LINE: MESSAGE.  Without FILE arguments the
/// source is read from standard input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source files to check
    files: Vec<PathBuf>,

    /// Exit with status 1 when any warning was reported
    #[arg(long)]
    exit_status: bool,

    /// Skip a rule (may be repeated)
    #[arg(long = "disable", value_enum, value_name = "RULE")]
    disabled: Vec<Rule>,

    /// List the available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// When to colour the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Maximum line length
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH, value_name = "N")]
    max_line_length: usize,
}

/// Outcome of a whole run
#[derive(Debug, Default)]
struct Summary {
    warnings: usize,
    errors: usize,
}

impl Summary {
    fn exit_code(&self, warnings_fail: bool) -> ExitCode {
        if self.errors > 0 {
            ExitCode::from(2)
        } else if warnings_fail && self.warnings > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}

struct Driver<O: Write, E: Write> {
    checker: Checker,
    out: Reporter<O>,
    err: Reporter<E>,
    summary: Summary,
}

impl<O: Write, E: Write> Driver<O, E> {
    fn check(&mut self, filename: &str, contents: &[u8]) -> Result<()> {
        let source = String::from_utf8_lossy(contents);
        let report = self.checker.check_source(&source);
        log::debug!(
            "{}: {} warnings, {} errors",
            filename,
            report.warnings.len(),
            report.errors.len()
        );

        for error in &report.errors {
            self.err.error(filename, error)?;
        }
        for warning in &report.warnings {
            self.out.warning(filename, warning)?;
        }
        self.summary.warnings += report.warnings.len();
        self.summary.errors += report.errors.len();
        Ok(())
    }

    fn unreadable(&mut self, filename: &str, error: io::Error) -> Result<()> {
        log::debug!("{}: {}", filename, error);
        self.err.error(filename, &CheckError::Io(error))?;
        self.summary.errors += 1;
        Ok(())
    }
}

fn list_rules() {
    for rule in Rule::ALL {
        println!("{:<20} {}", rule.name(), rule.description());
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let cli = Cli::parse();
    if cli.list_rules {
        list_rules();
        return Ok(ExitCode::SUCCESS);
    }

    let options = CheckOptions {
        max_line_length: cli.max_line_length,
        disabled: cli.disabled.iter().copied().collect(),
        ..CheckOptions::default()
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut driver = Driver {
        checker: Checker::new(options),
        out: Reporter::new(stdout.lock(), cli.color.enabled(stdout.is_tty())),
        err: Reporter::new(stderr.lock(), cli.color.enabled(stderr.is_tty())),
        summary: Summary::default(),
    };

    if cli.files.is_empty() {
        let mut contents = Vec::new();
        match io::stdin().read_to_end(&mut contents) {
            Ok(_) => driver.check("STDIN", &contents)?,
            Err(e) => driver.unreadable("STDIN", e)?,
        }
    } else {
        for path in &cli.files {
            let filename = path.display().to_string();
            match fs::read(path) {
                Ok(contents) => driver.check(&filename, &contents)?,
                Err(e) => driver.unreadable(&filename, e)?,
            }
        }
    }

    driver.out.flush()?;
    driver.err.flush()?;
    log::debug!(
        "{} warnings, {} errors in total",
        driver.summary.warnings,
        driver.summary.errors
    );
    Ok(driver.summary.exit_code(cli.exit_status))
}
