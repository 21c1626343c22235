use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod customer;
mod geo;
mod loader;
mod proximity;
mod writer;

use config::Config;
use loader::LoadError;

#[derive(Parser, Debug)]
#[command(name = "nearby-customers", version)]
#[command(about = "Keep the customers within a distance of the office, sorted by user id. Input and output are JSON lines.", long_about = None)]
struct Cli {
    /// Path to the customers file (one JSON object per line)
    #[arg(value_parser = existing_file)]
    input: PathBuf,

    /// Path to the output file. Created or overwritten.
    output: PathBuf,
}

fn existing_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("no such file: {}", arg))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nearby_customers=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load, filter, sort, write. The output file is only touched once every earlier stage succeeded.
fn run(input: &Path, output: &Path, config: &Config) -> Result<usize> {
    let customers = loader::load_customers_from_path(input)
        .map_err(|e| {
            let bad_format = matches!(e, LoadError::Format { .. });
            let e = anyhow::Error::new(e);
            if bad_format {
                e.context("Incorrect JSON format. Please provide a valid customer JSON")
            } else {
                e
            }
        })
        .with_context(|| format!("loading {}", input.display()))?;

    let nearby = proximity::customers_within_distance(customers, config)
        .context("filtering customers by distance")?;
    let nearby = proximity::sort_customers_by_id(nearby).context("sorting customers")?;

    writer::write_customers_to_path(output, &nearby)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(nearby.len())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env().context("reading configuration")?;
    tracing::debug!(?config, "configuration");

    let written = run(&cli.input, &cli.output, &config)?;
    tracing::info!(
        written,
        output = %cli.output.display(),
        "wrote nearby customers"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CUSTOMERS: &str = concat!(
        r#"{"latitude": "52.986375", "user_id": 12, "name": "Christina McArdle", "longitude": "-6.043701"}"#, "\n",
        r#"{"latitude": "51.92893", "user_id": 1, "name": "Alice Cahill", "longitude": "-10.27699"}"#, "\n",
        r#"{"latitude": "53.4", "user_id": 8, "name": "Near One", "longitude": "-6.3"}"#, "\n",
        r#"{"latitude": "51.5074", "user_id": 2, "name": "London", "longitude": "-0.1278"}"#, "\n",
        r#"{"latitude": "53.35", "user_id": 12, "name": "Christina Again", "longitude": "-6.25"}"#, "\n",
    );

    #[test]
    fn cli_parses_two_paths() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("customers.txt");
        fs::write(&input, "").unwrap();
        let output = dir.path().join("out.txt");

        let cli = Cli::try_parse_from([
            "nearby-customers",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(cli.input, input);
        assert_eq!(cli.output, output);
    }

    #[test]
    fn cli_rejects_missing_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("missing.txt");
        let result = Cli::try_parse_from(["nearby-customers", input.to_str().unwrap(), "out.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_needs_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("customers.txt");
        fs::write(&input, "").unwrap();
        assert!(Cli::try_parse_from(["nearby-customers", input.to_str().unwrap()]).is_err());
    }

    #[test]
    fn end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("customers.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, CUSTOMERS).unwrap();

        let written = run(&input, &output, &Config::default()).unwrap();
        assert_eq!(written, 2);

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"latitude":"53.4","user_id":8,"name":"Near One","longitude":"-6.3"}"#, "\n",
                r#"{"latitude":"53.35","user_id":12,"name":"Christina Again","longitude":"-6.25"}"#, "\n",
            )
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "").unwrap();

        assert_eq!(run(&input, &output, &Config::default()).unwrap(), 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn invalid_input_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("invalid.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, format!("{}not json at all\n", CUSTOMERS)).unwrap();

        let err = run(&input, &output, &Config::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Incorrect JSON format"));
        assert!(err.downcast_ref::<LoadError>().is_some());
        assert!(!output.exists());
    }

    #[test]
    fn non_utf8_input_is_reported_as_bad_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.txt");
        let output = dir.path().join("out.txt");
        fs::write(
            &input,
            &b"{\"user_id\": 1, \"name\": \"\xff\xfe\", \"latitude\": \"53.3\", \"longitude\": \"-6.2\"}\n"[..],
        )
        .unwrap();

        let err = run(&input, &output, &Config::default()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("Incorrect JSON format"), "{}", msg);
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Format { line: 1, .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn bad_record_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "{\"user_id\": 1, \"latitude\": \"x\", \"longitude\": \"0\"}\n").unwrap();

        assert!(run(&input, &output, &Config::default()).is_err());
        assert!(!output.exists());
    }
}
