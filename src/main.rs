use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, stdout};
use std::path::Path;

use anyhow::{Context, Result, bail};

use odelens::analysis::compare::{
    MultiComparison, NamedSeries, compare_pair, compare_with_exact, scan_roots, summarize,
};
use odelens::config::AnalysisConfig;
use odelens::data::loader::load_table;
use odelens::report::{ErrorRow, error_rows, table_stride, write_error_table, write_json};

const USAGE: &str = "\
usage: odelens [--config FILE.json] <command> ...

  summary FILE [--name N]
  compare REFERENCE OTHER [--names A,B] [--table OUT.tsv]
  exact FILE FORMULA [--name N] [--table OUT.tsv] [--points X1,X2,...]
  multi FILE[=NAME]... [--exact FORMULA]
  roots FORMULA [--range MIN,MAX] [--samples N]

Formulas use x, + - * / ^ (or **), pi, e and sin cos tan exp log sqrt abs.
Reports are printed to stdout as JSON; set RUST_LOG=info for progress.";

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse(std::env::args().skip(1));
    let config = match args.option("config") {
        Some(path) => AnalysisConfig::from_json_file(Path::new(path))?,
        None => AnalysisConfig::default(),
    };

    let Some((command, rest)) = args.positional.split_first() else {
        eprintln!("{USAGE}");
        bail!("missing command");
    };

    match command.as_str() {
        "summary" => cmd_summary(rest, &args, &config),
        "compare" => cmd_compare(rest, &args, &config),
        "exact" => cmd_exact(rest, &args, &config),
        "multi" => cmd_multi(rest, &args, &config),
        "roots" => cmd_roots(rest, &args, &config),
        other => {
            eprintln!("{USAGE}");
            bail!("unknown command: {other}")
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_summary(rest: &[String], args: &Args, config: &AnalysisConfig) -> Result<()> {
    let [file] = rest else {
        bail!("summary takes exactly one FILE");
    };
    let data = load_named(file, args.option("name"), config)?;
    write_json(stdout().lock(), &summarize(&data))
}

fn cmd_compare(rest: &[String], args: &Args, config: &AnalysisConfig) -> Result<()> {
    let [reference, other] = rest else {
        bail!("compare takes REFERENCE and OTHER");
    };
    let (name_a, name_b) = match args.option("names") {
        Some(names) => names
            .split_once(',')
            .map(|(a, b)| (Some(a.trim()), Some(b.trim())))
            .context("--names expects A,B")?,
        None => (None, None),
    };
    let reference = load_named(reference, name_a, config)?;
    let other = load_named(other, name_b, config)?;

    let cmp = compare_pair(&reference, &other, &config.thresholds)
        .with_context(|| format!("comparing '{}' with '{}'", reference.name, other.name))?;
    if let Some(path) = args.option("table") {
        let rows = error_rows(&cmp.aligned, 1);
        write_table_file(path, &rows, &cmp.reference_name, &cmp.other_name)?;
    }
    write_json(stdout().lock(), &cmp)
}

fn cmd_exact(rest: &[String], args: &Args, config: &AnalysisConfig) -> Result<()> {
    let [file, formula] = rest else {
        bail!("exact takes FILE and FORMULA");
    };
    let points = match args.option("points") {
        Some(list) => parse_list(list).context("parsing --points")?,
        None => Vec::new(),
    };
    let method = load_named(file, args.option("name"), config)?;
    let cmp = compare_with_exact(&method, formula, &points, config)
        .with_context(|| format!("comparing '{}' with y(x) = {formula}", method.name))?;

    if let Some(path) = args.option("table") {
        let stride = table_stride(cmp.aligned.len(), config.table_rows);
        let rows = error_rows(&cmp.aligned, stride);
        write_table_file(path, &rows, &cmp.method_name, "exact")?;
    }
    write_json(stdout().lock(), &cmp)
}

fn cmd_multi(rest: &[String], args: &Args, config: &AnalysisConfig) -> Result<()> {
    if rest.is_empty() {
        bail!("multi needs at least one FILE");
    }
    let results = rest.iter().map(|entry| {
        let (path, name) = match entry.split_once('=') {
            Some((path, name)) => (path, name.to_string()),
            None => (entry.as_str(), default_name(entry)),
        };
        let result = load_table(Path::new(path), config.columns).map(|t| t.series);
        (name, result)
    });

    let multi = MultiComparison::from_results(results, args.option("exact"), config);
    if multi.methods.is_empty() {
        bail!("none of the {} inputs could be read", rest.len());
    }
    write_json(stdout().lock(), &multi)
}

fn cmd_roots(rest: &[String], args: &Args, config: &AnalysisConfig) -> Result<()> {
    let [formula] = rest else {
        bail!("roots takes exactly one FORMULA");
    };
    let mut scan = config.root_scan;
    if let Some(range) = args.option("range") {
        let (lo, hi) = range.split_once(',').context("--range expects MIN,MAX")?;
        scan.x_min = lo.trim().parse().context("parsing --range minimum")?;
        scan.x_max = hi.trim().parse().context("parsing --range maximum")?;
    }
    if let Some(samples) = args.option("samples") {
        scan.samples = samples.parse().context("parsing --samples")?;
    }

    let result =
        scan_roots(formula, &scan).with_context(|| format!("scanning f(x) = {formula}"))?;
    write_json(stdout().lock(), &result)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_named(path: &str, name: Option<&str>, config: &AnalysisConfig) -> Result<NamedSeries> {
    let table =
        load_table(Path::new(path), config.columns).with_context(|| format!("loading {path}"))?;
    let name = name.map(str::to_string).unwrap_or_else(|| default_name(path));
    Ok(NamedSeries::new(name, table.series))
}

fn default_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Comma-separated numbers, e.g. `0.5,1,1.5`.
fn parse_list(list: &str) -> Result<Vec<f64>> {
    list.split(',')
        .map(|v| v.trim().parse::<f64>().with_context(|| format!("'{v}' is not a number")))
        .collect()
}

fn write_table_file(path: &str, rows: &[ErrorRow], name_a: &str, name_b: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    write_error_table(BufWriter::new(file), rows, name_a, name_b)?;
    log::info!("error table written to {path}");
    Ok(())
}

/// `--key value` options plus positional arguments, in order.
struct Args {
    positional: Vec<String>,
    options: HashMap<String, String>,
}

impl Args {
    fn parse(raw: impl Iterator<Item = String>) -> Self {
        let mut positional = Vec::new();
        let mut options = HashMap::new();
        let mut raw = raw.peekable();
        while let Some(arg) = raw.next() {
            match arg.strip_prefix("--") {
                Some(key) => {
                    let value = raw.next_if(|v| !v.starts_with("--")).unwrap_or_default();
                    options.insert(key.to_string(), value);
                }
                None => positional.push(arg),
            }
        }
        Self {
            positional,
            options,
        }
    }

    fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}
