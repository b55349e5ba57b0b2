//! Command-line argument parsing for the relabs driver.
//!
//! This module handles parsing command-line arguments and determining
//! which command to execute.

use thiserror::Error;

use crate::error::ValidationError;
use crate::models::ThreadId;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Load a thread and page forward `pages` times
    Thread { thread_id: ThreadId, pages: u32 },
    /// Post a reply
    Reply { thread_id: ThreadId, body: String },
    /// Print the initial route (default)
    ShowRoute,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("{0} needs a thread id")]
    MissingThreadId(&'static str),
    #[error(transparent)]
    InvalidThreadId(#[from] ValidationError),
    #[error("--pages expects a number, got '{0}'")]
    InvalidPages(String),
    #[error("reply needs a message")]
    MissingReplyBody,
    #[error("unknown argument '{0}'")]
    Unknown(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use relabs::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["relabs".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    let Some(first) = args.next() else {
        return Ok(CliCommand::ShowRoute);
    };

    match first.as_str() {
        "--version" | "-V" => Ok(CliCommand::Version),
        "thread" => {
            let thread_id = thread_arg(args.next(), "thread")?;
            let mut pages = 0;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--pages" | "-p" => {
                        let raw = args.next().unwrap_or_default();
                        pages = raw.parse().map_err(|_| ArgsError::InvalidPages(raw))?;
                    }
                    _ => return Err(ArgsError::Unknown(arg)),
                }
            }
            Ok(CliCommand::Thread { thread_id, pages })
        }
        "reply" => {
            let thread_id = thread_arg(args.next(), "reply")?;
            let body = args.collect::<Vec<_>>().join(" ");
            if body.trim().is_empty() {
                return Err(ArgsError::MissingReplyBody);
            }
            Ok(CliCommand::Reply { thread_id, body })
        }
        _ => Err(ArgsError::Unknown(first)),
    }
}

fn thread_arg(arg: Option<String>, command: &'static str) -> Result<ThreadId, ArgsError> {
    let raw = arg.ok_or(ArgsError::MissingThreadId(command))?;
    Ok(raw.parse::<ThreadId>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let args: Vec<String> = std::iter::once("relabs")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    fn id(n: i64) -> ThreadId {
        ThreadId::new(n).unwrap()
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), Ok(CliCommand::ShowRoute));
    }

    #[test]
    fn test_parse_thread() {
        assert_eq!(
            parse(&["thread", "42"]),
            Ok(CliCommand::Thread {
                thread_id: id(42),
                pages: 0
            })
        );
        assert_eq!(
            parse(&["thread", "42", "--pages", "3"]),
            Ok(CliCommand::Thread {
                thread_id: id(42),
                pages: 3
            })
        );
    }

    #[test]
    fn test_parse_thread_errors() {
        assert_eq!(
            parse(&["thread"]),
            Err(ArgsError::MissingThreadId("thread"))
        );
        assert_eq!(
            parse(&["thread", "0"]),
            Err(ArgsError::InvalidThreadId(ValidationError::InvalidThreadId(0)))
        );
        assert_eq!(
            parse(&["thread", "5", "--pages", "many"]),
            Err(ArgsError::InvalidPages("many".to_string()))
        );
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(
            parse(&["reply", "9", "thanks", "for", "this"]),
            Ok(CliCommand::Reply {
                thread_id: id(9),
                body: "thanks for this".to_string()
            })
        );
        assert_eq!(parse(&["reply", "9"]), Err(ArgsError::MissingReplyBody));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse(&["--update"]),
            Err(ArgsError::Unknown("--update".to_string()))
        );
    }
}
