//! Command-line surface of the `quizgate` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::TestType;

#[derive(Parser, Debug)]
#[command(name = "quizgate", version, about = "Client for the QA quiz service")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, env = "QUIZGATE_CONFIG", default_value = "./config.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Log out and forget the stored tokens.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Fetch a quiz.
    Test {
        #[arg(value_parser = parse_test_type)]
        test_type: TestType,
    },
    /// Submit answers read from a JSON file.
    Submit {
        #[arg(value_parser = parse_test_type)]
        test_type: TestType,
        #[arg(long)]
        answers: PathBuf,
    },
    /// Adopt a token pair issued by an external provider (e.g. Google).
    ExternalLogin {
        #[arg(long)]
        token: String,
        #[arg(long)]
        refresh_token: String,
    },
    /// Print the quiz navigation menu.
    Menu,
    /// Print the configuration JSON schema.
    Schema,
}

fn parse_test_type(value: &str) -> Result<TestType, String> {
    value.parse::<TestType>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "quizgate",
            "--config",
            "other.yaml",
            "submit",
            "theory",
            "--answers",
            "answers.json",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("other.yaml"));
        assert_eq!(
            cli.command,
            Command::Submit {
                test_type: TestType::Theory,
                answers: PathBuf::from("answers.json"),
            }
        );
    }

    #[test]
    fn test_unknown_test_type_is_rejected() {
        assert!(Cli::try_parse_from(["quizgate", "test", "history"]).is_err());
    }

    #[test]
    fn test_external_login_flags() {
        let cli = Cli::try_parse_from([
            "quizgate",
            "external-login",
            "--token",
            "t",
            "--refresh-token",
            "r",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::ExternalLogin { .. }));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
