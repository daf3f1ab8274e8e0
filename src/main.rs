//! Leadsplit CLI - merge lead CSV files and split them between team members
//!
//! # Main Command
//!
//! ```bash
//! leadsplit split leads1.csv leads2.csv --names team.txt -o out/
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! leadsplit parse input.csv         # Just parse one CSV to JSON
//! leadsplit merge a.csv b.csv       # Merge files into one CSV
//! ```

use clap::{Parser, Subcommand};
use leadsplit::{
    merge_inputs, parse_bytes_auto, parse_content, parse_recipients, split_leads,
    to_csv_bytes, FileStatus, NamedInput, SplitOptions, SplitRequest,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "leadsplit")]
#[command(about = "Merge lead CSV files and split them randomly between team members", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge lead files and split them randomly between recipients
    Split {
        /// Input CSV files (up to 10)
        files: Vec<PathBuf>,

        /// Text file with recipient names, one per line
        #[arg(short, long)]
        names: Option<PathBuf>,

        /// Recipient name (repeat for each person)
        #[arg(long = "name", conflicts_with = "names")]
        name: Vec<String>,

        /// Directory for the share files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Serialize every share afresh, skipping the conversion memo
        #[arg(long)]
        no_cache: bool,
    },

    /// Parse a CSV file and output JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge lead files into a single CSV without splitting
    Merge {
        /// Input CSV files (up to 10)
        files: Vec<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split {
            files,
            names,
            name,
            output_dir,
            no_cache,
        } => cmd_split(&files, names.as_deref(), name, &output_dir, no_cache),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Merge { files, output } => cmd_merge(&files, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Read every input path into a named in-memory blob.
fn read_inputs(files: &[PathBuf]) -> Result<Vec<NamedInput>, Box<dyn std::error::Error>> {
    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        let bytes =
            fs::read(path).map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        inputs.push(NamedInput::new(name, bytes));
    }
    Ok(inputs)
}

fn cmd_split(
    files: &[PathBuf],
    names_file: Option<&Path>,
    name_args: Vec<String>,
    output_dir: &Path,
    no_cache: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let recipients = match names_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
            parse_recipients(&text)
        }
        None => name_args
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
    };

    if recipients.is_empty() {
        return Err("No recipient names given; use --names <file> or --name <name>".into());
    }

    eprintln!("📄 Splitting {} file(s) for: {}", files.len(), recipients.join(", "));

    let request = SplitRequest {
        files: read_inputs(files)?,
        recipients,
    };
    let outcome = split_leads(request, SplitOptions { no_cache })?;

    // Per-file diagnostics
    eprintln!();
    for report in &outcome.reports {
        match &report.status {
            FileStatus::Included { rows } => {
                eprintln!("   ✅ {} ({} leads)", report.file, rows);
            }
            FileStatus::SkippedEmpty => {
                eprintln!("   ⚠️  {} (no data rows, skipped)", report.file);
            }
            FileStatus::SkippedError { reason } => {
                eprintln!("   ❌ {} ({})", report.file, reason);
            }
        }
    }

    for warning in &outcome.warnings {
        eprintln!("\n⚠️  {}", warning);
    }

    // Write shares
    fs::create_dir_all(output_dir)?;
    eprintln!();
    for share in &outcome.shares {
        let path = output_dir.join(&share.file_name);
        fs::write(&path, &share.bytes)?;
        if share.rows > 0 {
            eprintln!("   💾 {} → {} ({} leads)", share.recipient, path.display(), share.rows);
        } else {
            eprintln!("   💾 {} → {} (no leads assigned)", share.recipient, path.display());
        }
    }

    let summary = outcome.summary();
    eprintln!(
        "\n✨ Done! {} leads from {} file(s) split between {} people.",
        summary.total_rows, summary.files_included, summary.recipients
    );

    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let bytes = fs::read(input)?;
    let result = match delimiter {
        Some(d) => {
            let encoding = leadsplit::detect_encoding(&bytes);
            let content = leadsplit::decode_content(&bytes, &encoding);
            parse_content(&content, d, encoding)?
        }
        None => parse_bytes_auto(&bytes)?,
    };

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        match result.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        },
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_merge(files: &[PathBuf], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Merging {} file(s)...", files.len());

    let inputs = read_inputs(files)?;
    let merged = merge_inputs(&inputs);

    if merged.set.is_empty() {
        return Err("No valid lead data found in the input files".into());
    }

    eprintln!(
        "✅ Combined {} leads from {} file(s)",
        merged.set.len(),
        merged.included_count()
    );

    let bytes = to_csv_bytes(&merged.set.headers, &merged.set.records)?;
    write_output(&String::from_utf8(bytes)?, output)?;

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
