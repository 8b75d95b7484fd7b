//! Command-line driver that exercises the diagnostic subsystem end to end.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command};
use crash::FatalSignal;
use logging::{
    Broadcaster, LogConfig, LogLevel, debug_log, error_log, fatal_log, install_broadcaster,
    set_thread_name,
};

/// Parsed command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    log_level: Option<LogLevel>,
    thread_name: Option<String>,
    threads: usize,
    remote_level: Option<LogLevel>,
    fatal: bool,
    crash: Option<FatalSignal>,
    fault: bool,
    messages: Vec<String>,
}

/// Echoes remote deliveries to standard output.
struct StdoutBroadcaster {
    threshold: LogLevel,
}

impl Broadcaster for StdoutBroadcaster {
    fn has_subscriber_at_or_above(&self, level: LogLevel) -> bool {
        level.passes(self.threshold)
    }

    fn deliver(&self, level: LogLevel, line: &str) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "remote {level}: {line}");
        let _ = stdout.flush();
    }
}

fn parse_level(text: &str) -> Result<LogLevel, logging::ParseLevelError> {
    text.parse()
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("faultline")
        .about("Emit diagnostics through the faultline logging and crash subsystem.")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Local threshold: fatal, off, error, or debug (overrides FAULTLINE_LOG_LEVEL).")
                .allow_hyphen_values(true)
                .value_parser(parse_level),
        )
        .arg(
            Arg::new("thread-name")
                .long("thread-name")
                .value_name("NAME")
                .help("Label for the main thread."),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("N")
                .help("Log from N worker threads named worker-<i> instead of the main thread.")
                .value_parser(clap::value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("remote-level")
                .long("remote-level")
                .value_name("LEVEL")
                .help("Echo lines at or above LEVEL to standard output as a remote observer.")
                .allow_hyphen_values(true)
                .value_parser(parse_level),
        )
        .arg(
            Arg::new("fatal")
                .long("fatal")
                .help("Finish with a fatal message, which logs the stack and aborts.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("crash")
                .long("crash")
                .value_name("SIGNAL")
                .help("Finish by raising a fatal signal.")
                .value_parser(PossibleValuesParser::new(["segv", "bus", "fpe", "ill"])),
        )
        .arg(
            Arg::new("fault")
                .long("fault")
                .help("Finish by reading an unmapped address, a real segmentation fault.")
                .action(ArgAction::SetTrue)
                .conflicts_with("crash"),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .help("Messages logged at error and at debug level.")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

fn fatal_signal_from_name(name: &str) -> Option<FatalSignal> {
    match name {
        "segv" => Some(FatalSignal::Segv),
        "bus" => Some(FatalSignal::Bus),
        "fpe" => Some(FatalSignal::Fpe),
        "ill" => Some(FatalSignal::Ill),
        _ => None,
    }
}

/// Parses `args`, including the program name.
pub fn parse<I, T>(args: I) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = clap_command().try_get_matches_from(args)?;

    Ok(Options {
        log_level: matches.get_one::<LogLevel>("log-level").copied(),
        thread_name: matches.get_one::<String>("thread-name").cloned(),
        threads: matches.get_one::<usize>("threads").copied().unwrap_or(0),
        remote_level: matches.get_one::<LogLevel>("remote-level").copied(),
        fatal: matches.get_flag("fatal"),
        crash: matches
            .get_one::<String>("crash")
            .and_then(|name| fatal_signal_from_name(name)),
        fault: matches.get_flag("fault"),
        messages: matches
            .get_many::<String>("message")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    })
}

/// Prints a parse failure; usage errors exit with status 1.
pub fn report_usage_error(error: &clap::Error) -> ExitCode {
    let _ = error.print();
    if error.use_stderr() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    let _ = writeln!(io::stderr(), "faultline: {message}");
    ExitCode::from(1)
}

fn log_messages(messages: &[String]) {
    for message in messages {
        error_log!("{message}");
        debug_log!("{message}");
    }
}

/// Runs the driver with parsed options.
pub fn run(options: &Options) -> ExitCode {
    let config = match LogConfig::from_env() {
        Ok(config) => config,
        Err(error) => return fail(error),
    };
    let config = options
        .log_level
        .map_or(config, |level| config.with_level(level));
    logging::init(config);

    if let Some(threshold) = options.remote_level {
        if let Err(error) = install_broadcaster(StdoutBroadcaster { threshold }) {
            return fail(error);
        }
    }

    if let Some(name) = &options.thread_name {
        set_thread_name!("{name}");
    }

    if let Err(error) = crash::install_crash_handlers() {
        error_log!("crash handlers unavailable: {error}");
    }

    if options.threads == 0 {
        log_messages(&options.messages);
    } else {
        let workers: Vec<_> = (0..options.threads)
            .map(|index| {
                let messages = options.messages.clone();
                thread::spawn(move || {
                    set_thread_name!("worker-{index}");
                    log_messages(&messages);
                })
            })
            .collect();
        for worker in workers {
            if worker.join().is_err() {
                return fail("worker thread panicked");
            }
        }
    }

    if options.fatal {
        fatal_log!("fatal error requested");
    }

    if let Some(signal) = options.crash {
        if let Err(error) = signal.raise() {
            return fail(format_args!("cannot raise {signal}: {error}"));
        }
        return fail(format_args!("{signal} was raised but the process survived"));
    }

    if options.fault {
        if let Err(error) = crash::fault_on_unmapped_read() {
            return fail(format_args!("cannot fault: {error}"));
        }
        return fail("the unmapped read completed");
    }

    ExitCode::SUCCESS
}
