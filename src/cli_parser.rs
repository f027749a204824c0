//! CLI argument parsing and help text for pkgrev-hooks.

/// Commands answered without loading configuration.
pub fn is_info_command(command: &str) -> bool {
    matches!(
        command,
        "help" | "--help" | "-h" | "version" | "--version" | "-V"
    )
}

/// Arguments to the `render` command.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    pub name: String,
    pub image: String,
    pub namespace: Option<String>,
    pub revision: i64,
}

/// Parse `render` arguments (everything after the command word).
pub fn parse_render_args(args: &[String]) -> Result<RenderArgs, String> {
    let mut name = None;
    let mut image = None;
    let mut namespace = None;
    let mut revision = 1i64;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };
        match flag.as_str() {
            "--name" => name = Some(value()?),
            "--image" => image = Some(value()?),
            "--namespace" => namespace = Some(value()?),
            "--revision" => {
                let raw = value()?;
                revision = raw
                    .parse()
                    .map_err(|_| format!("Invalid revision number: {}", raw))?;
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    match (name, image) {
        (Some(name), Some(image)) => Ok(RenderArgs {
            name,
            image,
            namespace,
            revision,
        }),
        _ => Err("Usage: pkgrev-hooks render --name <REVISION> --image <IMAGE> [--namespace NS] [--revision N]".to_string()),
    }
}

/// Print general usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "pkgrev-hooks - package revision lifecycle hooks v{}

USAGE:
    pkgrev-hooks [COMMAND] [OPTIONS]

COMMANDS:
    render       Print the provider workload an active revision would own
    config       Show the effective configuration
    version      Show version information
    help         Show this help message

EXAMPLES:
    pkgrev-hooks render --name provider-aws-8d2f1c --image crossplane/provider-aws:v0.1.1
    pkgrev-hooks config show

ENVIRONMENT:
    PKGREV_HOOKS_CONFIG      Path to a TOML config file
    PKGREV_HOOKS_NAMESPACE   Namespace for provider workloads
    PKGREV_HOOKS_LOG_LEVEL   Log level when RUST_LOG is unset
    PKGREV_HOOKS_LOG_FORMAT  Log format (pretty, json)
    RUST_LOG                 Log filter

EXIT CODES:
    0  Success
    1  Failure
    2  Configuration error
",
        version
    );
}

/// Print detailed help for a specific command.
pub fn print_command_help(command: &str) {
    match command {
        "render" => eprintln!(
            "pkgrev-hooks render --name <REVISION> --image <IMAGE> [--namespace NS] [--revision N]

Builds the ServiceAccount and Deployment the provider hooks apply for an
active revision and prints them as JSON. Nothing is sent to the platform."
        ),
        "config" => eprintln!(
            "pkgrev-hooks config show

Prints the configuration after defaults, file and environment overrides."
        ),
        _ => eprintln!(
            "No detailed help available for '{}'. Use 'pkgrev-hooks help' for general usage.",
            command
        ),
    }
}
