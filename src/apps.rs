use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::config::ExtractorConfig;
use crate::pipeline::DialoguePipeline;
use crate::report::ReportRenderer;

#[derive(Debug, Parser)]
#[command(
    name = "extract_dialogues",
    disable_help_subcommand = true,
    about = "Extract AI_Output dialogue into one workbook per character",
    long_about = "Scan each input directory for *.d scripts, group AI_Output lines by character, and write one .xlsx workbook per character with one sheet per input directory.",
    after_help = "Without flags the tool reads Input_Gothic, Input_Gothic2 and Input_NotR, applies overrides from config.yaml when present, and writes to Output/."
)]
/// CLI for `extract_dialogues`.
///
/// Flags override values from `--config`, which in turn override the defaults.
struct ExtractDialoguesCli {
    #[arg(
        long,
        value_name = "YAML",
        help = "Optional run configuration (input_dirs, override_file, output_dir)"
    )]
    config: Option<PathBuf>,
    #[arg(
        long = "input-dir",
        value_name = "DIR",
        help = "Input directory to scan, repeat as needed in processing order"
    )]
    input_dirs: Vec<PathBuf>,
    #[arg(
        long = "override-file",
        value_name = "YAML",
        help = "File name to character name overrides (missing file means none)"
    )]
    override_file: Option<PathBuf>,
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        help = "Directory receiving one workbook per character"
    )]
    output_dir: Option<PathBuf>,
}

impl ExtractDialoguesCli {
    fn into_config(self) -> Result<ExtractorConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ExtractorConfig::from_yaml_file(path)?,
            None => ExtractorConfig::default(),
        };
        if !self.input_dirs.is_empty() {
            config = config.with_input_dirs(self.input_dirs);
        }
        if let Some(override_file) = self.override_file {
            config = config.with_override_file(override_file);
        }
        if let Some(output_dir) = self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        Ok(config)
    }
}

/// Run the extractor with CLI arguments (program name excluded).
pub fn run_extract_dialogues<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<ExtractDialoguesCli, _>(
        std::iter::once("extract_dialogues".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = cli.into_config()?;
    let pipeline = DialoguePipeline::from_config(&config)?;
    let renderer = ReportRenderer::new(&config.output_dir);
    let summary = pipeline.run(&renderer)?;

    for path in &summary.written {
        println!("Saved: {}", path.display());
    }
    println!(
        "collections: {} | files: {} | characters: {} | dialogue lines: {}",
        summary.collections, summary.files, summary.characters, summary.records
    );
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ExtractDialoguesCli {
        parse_cli::<ExtractDialoguesCli, _>(
            std::iter::once("extract_dialogues").chain(args.iter().copied()),
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn no_flags_yields_default_config() {
        let config = parse(&[]).into_config().unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn flags_override_defaults_in_order() {
        let config = parse(&[
            "--input-dir",
            "scripts/b",
            "--input-dir",
            "scripts/a",
            "--output-dir",
            "out",
            "--override-file",
            "names.yaml",
        ])
        .into_config()
        .unwrap();
        assert_eq!(
            config.input_dirs,
            vec![PathBuf::from("scripts/b"), PathBuf::from("scripts/a")]
        );
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.override_file, PathBuf::from("names.yaml"));
    }

    #[test]
    fn help_is_not_an_error() {
        let parsed = parse_cli::<ExtractDialoguesCli, _>(["extract_dialogues", "--help"]).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_cli::<ExtractDialoguesCli, _>(["extract_dialogues", "--bogus"]).is_err());
    }
}
