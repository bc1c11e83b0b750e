use panel_chart::api::{ChartConverter, ConvertOptions, ThemeMode};
use panel_chart::core::{PanelSchema, RawResultSet};
use panel_chart::telemetry::init_default_tracing;
use std::fs;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: panel_convert_tool <metric|tabular> --schema <path> --data <path> [--options <path>] [--theme light|dark] [--output <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataKind {
    Metric,
    Tabular,
}

#[derive(Debug)]
struct CliArgs {
    kind: DataKind,
    schema: PathBuf,
    data: PathBuf,
    options: Option<PathBuf>,
    theme: Option<ThemeMode>,
    output: Option<PathBuf>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let schema = PanelSchema::from_json_str(&read(&args.schema)?).map_err(|err| err.to_string())?;
    let raw = read(&args.data)?;
    let data = match args.kind {
        DataKind::Metric => RawResultSet::metric_from_json_str(&raw),
        DataKind::Tabular => RawResultSet::tabular_from_json_str(&raw),
    }
    .map_err(|err| err.to_string())?;

    let options = match &args.options {
        Some(path) => ConvertOptions::from_json_str(&read(path)?).map_err(|err| err.to_string())?,
        None => ConvertOptions::default(),
    };

    let converter = ChartConverter::new(options);
    let configuration = match args.theme {
        Some(mode) => converter.with_theme(mode).convert(&schema, &data),
        None => converter.convert(&schema, &data),
    };
    let json = configuration
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;

    match &args.output {
        Some(path) => fs::write(path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next().as_deref() {
        Some("metric") => DataKind::Metric,
        Some("tabular") => DataKind::Tabular,
        _ => return Err(USAGE.to_owned()),
    };

    let mut schema = None::<PathBuf>;
    let mut data = None::<PathBuf>;
    let mut options = None::<PathBuf>;
    let mut theme = None::<ThemeMode>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--schema" => schema = Some(PathBuf::from(value("--schema")?)),
            "--data" => data = Some(PathBuf::from(value("--data")?)),
            "--options" => options = Some(PathBuf::from(value("--options")?)),
            "--output" => output = Some(PathBuf::from(value("--output")?)),
            "--theme" => {
                theme = Some(match value("--theme")?.as_str() {
                    "light" => ThemeMode::Light,
                    "dark" => ThemeMode::Dark,
                    other => return Err(format!("unknown theme `{other}`")),
                });
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        kind,
        schema: schema.ok_or_else(|| "missing --schema".to_owned())?,
        data: data.ok_or_else(|| "missing --data".to_owned())?,
        options,
        theme,
        output,
    })
}
