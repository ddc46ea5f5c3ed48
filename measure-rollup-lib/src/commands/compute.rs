use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::component::load_tree;
use crate::reports::{ReportableComponent, generate_console, generate_csv, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   compute";

#[derive(Parser, Debug)]
pub struct ComputeArgs {
    /// Component tree with raw leaf measures (JSON)
    #[arg(value_name = "TREE")]
    pub tree: Utf8PathBuf,

    /// Path to configuration file (default is `rollup.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Output computed measures to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output computed measures to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output computed measures to the console.
    /// If omitted, console output is shown only when no other reports are generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

/// Compute the measures of a component tree and report them
///
/// # Errors
///
/// Returns an error if the configuration or tree cannot be loaded, if the
/// computation fails, or if a report cannot be written
pub fn compute<H: Host>(host: &mut H, args: &ComputeArgs) -> Result<()> {
    init_logging(args.log_level);

    match compute_inner(host, args, Utf8Path::new(".")) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Computation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

fn compute_inner<H: Host>(host: &mut H, args: &ComputeArgs, base_dir: &Utf8Path) -> Result<()> {
    let config = Config::load(base_dir, args.config.as_ref())?;
    let executor = config.executor()?;

    let text = fs::read_to_string(&args.tree).into_app_err_with(|| format!("reading component tree '{}'", args.tree))?;
    let (root, mut repository) = load_tree(&text, executor.metrics())?;

    let summary = executor.execute(&root, &mut repository)?;
    for (keys, added) in summary.iter() {
        for key in keys {
            log::debug!(target: LOG_TARGET, "{key}: {added} measures");
        }
    }

    let components = ReportableComponent::collect(&root, executor.metrics(), &repository);

    if let Some(filename) = &args.csv {
        let mut csv_output = String::new();
        generate_csv(&components, &mut csv_output)?;
        fs::write(filename, csv_output).into_app_err_with(|| format!("writing CSV report to '{filename}'"))?;
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&components, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    }

    let generating_reports = args.csv.is_some() || args.json.is_some();
    if args.console || !generating_reports {
        let mut console_output = String::new();
        generate_console(&components, args.color.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    const TREE: &str = r#"{
        "key": "project",
        "type": "PROJECT",
        "children": [
            {
                "key": "src",
                "type": "DIRECTORY",
                "children": [
                    { "key": "src/a.rs", "type": "FILE", "measures": { "ncloc": { "value": 5 } } },
                    { "key": "src/b.rs", "type": "FILE", "measures": { "ncloc": { "value": 3 } } }
                ]
            }
        ]
    }"#;

    const CONFIG: &str = r#"
[[metrics]]
key = "ncloc"
type = "int"

[[formulas]]
kind = "int_sum"
metric = "ncloc"
"#;

    struct Workspace {
        _dir: tempfile::TempDir,
        root: Utf8PathBuf,
    }

    fn workspace(tree: &str) -> Workspace {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        fs::write(root.join("tree.json"), tree).unwrap();
        fs::write(root.join("rollup.toml"), CONFIG).unwrap();
        Workspace { _dir: dir, root }
    }

    fn args(ws: &Workspace) -> ComputeArgs {
        ComputeArgs {
            tree: ws.root.join("tree.json"),
            config: Some(ws.root.join("rollup.toml")),
            color: ColorMode::Never,
            log_level: LogLevel::None,
            csv: None,
            json: None,
            console: false,
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_compute_to_console() {
        let ws = workspace(TREE);
        let mut host = TestHost::new();
        compute(&mut host, &args(&ws)).unwrap();

        let output = host.output_text();
        assert!(output.contains("project PROJECT\n  ncloc : 8\n"), "{output}");
        assert!(output.contains("  src DIRECTORY\n    ncloc : 8\n"), "{output}");
        assert!(output.contains("src/a.rs FILE\n"), "{output}");
        assert!(!output.contains("ncloc : 5"), "{output}");
        assert_eq!(host.exit_code, None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_compute_to_files() {
        let ws = workspace(TREE);
        let mut host = TestHost::new();
        let args = ComputeArgs {
            csv: Some(ws.root.join("out.csv")),
            json: Some(ws.root.join("out.json")),
            ..args(&ws)
        };
        compute(&mut host, &args).unwrap();

        assert!(host.output_buf.is_empty());

        let csv = fs::read_to_string(ws.root.join("out.csv")).unwrap();
        assert!(csv.contains("project,PROJECT,ncloc,8,"), "{csv}");
        assert!(csv.contains("src,DIRECTORY,ncloc,8,"), "{csv}");

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(ws.root.join("out.json")).unwrap()).unwrap();
        assert_eq!(json["components"][0]["measures"]["ncloc"]["value"], 8);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_compute_with_console_and_files() {
        let ws = workspace(TREE);
        let mut host = TestHost::new();
        let args = ComputeArgs {
            json: Some(ws.root.join("out.json")),
            console: true,
            ..args(&ws)
        };
        compute(&mut host, &args).unwrap();
        assert!(host.output_text().contains("ncloc : 8"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_tree_exits_with_error() {
        let ws = workspace(r#"{ "key": "f", "type": "FILE", "measures": { "ncloc": { "value": "many" } } }"#);
        let mut host = TestHost::new();
        let _ = compute(&mut host, &args(&ws)).unwrap_err();

        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_text().contains("Computation failed"));
        assert!(host.output_buf.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_tree_exits_with_error() {
        let ws = workspace(TREE);
        let mut host = TestHost::new();
        let args = ComputeArgs {
            tree: ws.root.join("missing.json"),
            ..args(&ws)
        };
        let _ = compute(&mut host, &args).unwrap_err();
        assert_eq!(host.exit_code, Some(1));
    }
}
